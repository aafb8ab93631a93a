//! espeak backend
//!
//! Runs espeak with `--stdout` and pipes its wav output directly into sox,
//! so no temporary files are involved.
//!
//! Dependencies:
//! - espeak or espeak-ng (install with: sudo apt install espeak-ng espeak-ng-espeak)
//! - sox (install with: sudo apt install sox)

use crate::speech::{sox, Synthesizer};
use crate::{AnnounceError, Result};
use log::{debug, error};
use std::process::{Command, Stdio};

/// espeak voice parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EspeakSettings {
    /// Voice name, optionally with a variant (e.g. `en-us+m3`)
    pub voice: String,

    /// Pitch (0-99)
    pub pitch: u32,

    /// Speed in words per minute (80-450)
    pub speed: u32,

    /// Amplitude (0-200)
    pub amplitude: u32,
}

impl Default for EspeakSettings {
    fn default() -> Self {
        Self {
            voice: "en-us+m3".to_string(),
            pitch: 40,
            speed: 140,
            amplitude: 100,
        }
    }
}

impl EspeakSettings {
    /// Clamp every parameter into the range espeak accepts
    pub fn clamped(self) -> Self {
        Self {
            pitch: self.pitch.min(99),
            speed: self.speed.clamp(80, 450),
            amplitude: self.amplitude.min(200),
            ..self
        }
    }
}

/// espeak piped through sox
pub struct EspeakSynth {
    settings: EspeakSettings,
    program: String,
}

impl EspeakSynth {
    pub fn new(settings: EspeakSettings) -> Self {
        Self {
            settings: settings.clamped(),
            program: "espeak".to_string(),
        }
    }

    /// Use a different espeak binary (e.g. `espeak-ng`)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn settings(&self) -> &EspeakSettings {
        &self.settings
    }

    /// Build the espeak half of the pipeline
    fn espeak_command(&self, text: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-v").arg(&self.settings.voice);
        cmd.arg("-p").arg(self.settings.pitch.to_string());
        cmd.arg("-s").arg(self.settings.speed.to_string());
        cmd.arg("-a").arg(self.settings.amplitude.to_string());
        cmd.arg(text);
        cmd.arg("--stdout");
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::null());
        cmd
    }
}

impl Synthesizer for EspeakSynth {
    fn name(&self) -> &'static str {
        "espeak"
    }

    fn synthesize(&mut self, text: &str) -> Result<Vec<i16>> {
        debug!("Speaking with {}: {}", self.program, text);

        let mut espeak = self.espeak_command(text).spawn().map_err(|e| {
            error!("Failed to spawn {}: {}", self.program, e);
            AnnounceError::Speech(format!("Failed to start {}: {}", self.program, e))
        })?;

        let Some(wav) = espeak.stdout.take() else {
            let _ = espeak.kill();
            let _ = espeak.wait();
            return Err(AnnounceError::Speech(format!(
                "{} stdout was not captured",
                self.program
            )));
        };

        let converted = sox::command(Some("wav"), "-")
            .stdin(Stdio::from(wav))
            .output();

        // Reap espeak whether or not sox managed to run
        let status = espeak.wait()?;

        let output = converted
            .map_err(|e| AnnounceError::Speech(format!("Failed to start sox: {}", e)))?;
        if !status.success() {
            return Err(AnnounceError::Speech(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        let samples = sox::decode_output("sox", output)?;
        debug!("espeak produced {} samples", samples.len());
        Ok(samples)
    }
}
