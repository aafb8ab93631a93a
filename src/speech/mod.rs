//! Speech synthesis system

pub mod backends;
pub mod sox;
pub mod synth;

pub use backends::{EspeakSettings, EspeakSynth, PicoSynth};
pub use synth::{create_synth, Synthesizer, TtsEngine};
