//! Speech synthesizer abstraction
//!
//! Synthesizers turn announcement text into 8kHz mono samples ready for the
//! buffer builder. Each engine runs as a subprocess whose audio is
//! resampled by sox.

use super::backends::{EspeakSettings, EspeakSynth, PicoSynth};
use crate::Result;
use log::{info, warn};
use std::fmt;
use std::str::FromStr;

/// Available TTS engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TtsEngine {
    #[default]
    Espeak,
    Pico,
}

impl TtsEngine {
    /// Parse an engine name, falling back to espeak for unknown names
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!("Unknown TTS engine '{}', using espeak", name);
            TtsEngine::Espeak
        })
    }
}

impl FromStr for TtsEngine {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "espeak" | "espeak-ng" => Ok(TtsEngine::Espeak),
            "pico" | "pico2wave" => Ok(TtsEngine::Pico),
            other => Err(format!("unknown TTS engine: {}", other)),
        }
    }
}

impl fmt::Display for TtsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TtsEngine::Espeak => write!(f, "espeak"),
            TtsEngine::Pico => write!(f, "pico"),
        }
    }
}

/// Text-to-PCM synthesizer
pub trait Synthesizer {
    /// Engine name for logging
    fn name(&self) -> &'static str;

    /// Synthesize `text` into 8kHz 16-bit mono samples
    ///
    /// An empty result is not an error here; callers decide how to report
    /// a silent announcement.
    fn synthesize(&mut self, text: &str) -> Result<Vec<i16>>;
}

/// Create the synthesizer for the configured engine
pub fn create_synth(
    engine: TtsEngine,
    espeak: EspeakSettings,
    pico_language: &str,
) -> Box<dyn Synthesizer> {
    info!("Using {} TTS engine", engine);
    match engine {
        TtsEngine::Espeak => Box::new(EspeakSynth::new(espeak)),
        TtsEngine::Pico => Box::new(PicoSynth::new(pico_language)),
    }
}
