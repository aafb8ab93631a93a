//! time-announce - spoken time announcements for DVMBridge
//!
//! Synthesizes a short announcement, pads it into P25 LDU-aligned 8kHz PCM
//! and streams it to DVMBridge as length-prefixed UDP frames paced at 20ms.

pub mod announcement;
pub mod announcer;
pub mod audio;
pub mod config;
pub mod error;
pub mod speech;
pub mod transport;

pub use error::{AnnounceError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "time-announce";
