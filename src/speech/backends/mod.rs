//! TTS engine backends

// espeak / espeak-ng, piped straight into sox
pub mod espeak;

// SVOX pico2wave, via a temporary wav file
pub mod pico;

pub use espeak::{EspeakSettings, EspeakSynth};
pub use pico::PicoSynth;
