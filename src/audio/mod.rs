//! PCM sample buffers for DVMBridge
//!
//! DVMBridge expects 8kHz 16-bit mono PCM. Its P25 vocoder consumes audio in
//! LDUs of 9 IMBE frames, each built from 160 samples, so every buffer handed
//! to the transmitter is padded to a whole number of LDUs.

pub mod builder;
pub mod splice;

pub use builder::{BufferLayout, BufferOptions, SampleBuffer, SampleBufferBuilder};

use std::time::Duration;

/// Sample rate expected by DVMBridge
pub const SAMPLE_RATE: u32 = 8000;

/// Samples per voice frame (20ms at 8kHz)
pub const FRAME_SAMPLES: usize = 160;

/// Bytes per voice frame
pub const FRAME_BYTES: usize = FRAME_SAMPLES * 2;

/// IMBE frames per LDU
pub const FRAMES_PER_LDU: usize = 9;

/// Samples per LDU (1440)
pub const LDU_SAMPLES: usize = FRAMES_PER_LDU * FRAME_SAMPLES;

/// Real-time length of one frame
pub const FRAME_DURATION: Duration = Duration::from_millis(20);

/// Number of samples covering `seconds` of audio, rounded to the nearest sample
pub fn samples_for(seconds: f32) -> usize {
    (SAMPLE_RATE as f32 * seconds.max(0.0)).round() as usize
}

/// Serialize samples in host byte order, the layout DVMBridge receives
pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_ne_bytes()).collect()
}

/// Parse host byte order PCM; a trailing odd byte is dropped
pub fn bytes_to_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_ne_bytes([pair[0], pair[1]]))
        .collect()
}
