//! SVOX pico backend
//!
//! pico2wave can only write to a named `.wav` file, so each announcement is
//! rendered into a private temporary file and then converted by sox.
//!
//! Dependencies:
//! - pico2wave (install with: sudo apt install libttspico-utils)
//! - sox

use crate::speech::{sox, Synthesizer};
use crate::{AnnounceError, Result};
use log::{debug, error};
use std::path::Path;
use std::process::{Command, Stdio};

/// Languages shipped with pico2wave
pub const PICO_LANGUAGES: &[&str] = &["en-US", "en-GB", "de-DE", "es-ES", "fr-FR", "it-IT"];

/// pico2wave rendered through sox
pub struct PicoSynth {
    language: String,
}

impl PicoSynth {
    pub fn new(language: &str) -> Self {
        if !PICO_LANGUAGES.contains(&language) {
            debug!("pico language {} is not one of {:?}", language, PICO_LANGUAGES);
        }
        Self {
            language: language.to_string(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn pico_command(&self, wav: &Path, text: &str) -> Command {
        let mut cmd = Command::new("pico2wave");
        cmd.arg("-l").arg(&self.language);
        cmd.arg("-w").arg(wav);
        cmd.arg(text);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::piped());
        cmd
    }
}

impl Synthesizer for PicoSynth {
    fn name(&self) -> &'static str {
        "pico"
    }

    fn synthesize(&mut self, text: &str) -> Result<Vec<i16>> {
        // Removed when dropped, on every return path
        let wav = tempfile::Builder::new()
            .prefix("time-announce-")
            .suffix(".wav")
            .tempfile()?;
        debug!("Rendering pico2wave to {:?}: {}", wav.path(), text);

        let output = self.pico_command(wav.path(), text).output().map_err(|e| {
            error!("Failed to spawn pico2wave: {}", e);
            AnnounceError::Speech(format!("Failed to start pico2wave: {}", e))
        })?;
        if !output.status.success() {
            return Err(AnnounceError::Speech(format!(
                "pico2wave exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let samples = sox::convert_file(wav.path()).map_err(|e| match e {
            AnnounceError::Audio(msg) => AnnounceError::Speech(msg),
            other => other,
        })?;
        debug!("pico produced {} samples", samples.len());
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pico_command() {
        let synth = PicoSynth::new("en-GB");
        let cmd = synth.pico_command(Path::new("/tmp/x.wav"), "hello");
        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(cmd.get_program(), "pico2wave");
        assert_eq!(args, vec!["-l", "en-GB", "-w", "/tmp/x.wav", "hello"]);
    }

    #[test]
    fn test_language() {
        assert_eq!(PicoSynth::new("de-DE").language(), "de-DE");
        // Unknown languages are passed through for pico2wave to reject
        assert_eq!(PicoSynth::new("xx-XX").language(), "xx-XX");
    }
}
