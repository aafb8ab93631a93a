//! End-to-end announcement run
//!
//! Ties the configuration, a synthesizer, the buffer builder and the
//! transmitter together for one announcement.

use crate::audio::splice::load_splice;
use crate::audio::{BufferOptions, SampleBuffer, SampleBufferBuilder};
use crate::config::Config;
use crate::speech::Synthesizer;
use crate::transport::{PacedFrameTransmitter, PacketSink, TransmitReport};
use crate::Result;
use log::{error, info, warn};
use std::path::Path;

/// How an announcement run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnounceOutcome {
    /// Speech was synthesized and fully sent
    Sent(TransmitReport),
    /// The buffer was sent, but synthesis produced no speech
    SentSilence(TransmitReport),
    /// Test mode: buffer built, nothing sent
    Built,
    /// Test mode: buffer built without speech, nothing sent
    BuiltSilence,
}

impl AnnounceOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            AnnounceOutcome::Sent(_) | AnnounceOutcome::Built => 0,
            AnnounceOutcome::SentSilence(_) | AnnounceOutcome::BuiltSilence => 2,
        }
    }
}

/// Builder options from config, loading the pre-announce splice if set
///
/// A splice that fails to load is skipped with a warning.
pub fn buffer_options(config: &Config) -> BufferOptions {
    let pre_announce = config.pre_announce().and_then(|path| {
        load_splice(&path)
            .map_err(|e| warn!("Skipping pre-announce splice: {}", e))
            .ok()
    });

    BufferOptions {
        lead_silence: config.lead_silence(),
        trail_silence: config.trail_silence(),
        pre_announce,
    }
}

/// Synthesize `text` and lay it out into an LDU-aligned buffer
///
/// A synthesis failure is logged and yields a buffer of aligned silence;
/// check [`SampleBuffer::has_speech`] to tell the two apart.
pub fn prepare_buffer(
    options: BufferOptions,
    synth: &mut dyn Synthesizer,
    text: &str,
) -> SampleBuffer {
    let speech = match synth.synthesize(text) {
        Ok(samples) => samples,
        Err(e) => {
            error!("{} synthesis failed: {}", synth.name(), e);
            Vec::new()
        }
    };
    if speech.is_empty() {
        error!("No audio generated by {}", synth.name());
    }

    let buffer = SampleBufferBuilder::new(options).build(&speech);
    let layout = buffer.layout();
    info!(
        "Generated {} samples ({} lead silence + audio + {} trail silence + LDU padding)",
        buffer.len(),
        layout.lead,
        layout.trail
    );
    buffer
}

/// Write the outgoing buffer as raw host-order PCM
pub fn dump_buffer(buffer: &SampleBuffer, path: &Path) -> Result<()> {
    std::fs::write(path, buffer.to_bytes())?;
    info!("Wrote {} bytes of raw PCM to {}", buffer.len() * 2, path.display());
    Ok(())
}

/// Send a prepared buffer and classify the result
pub fn send_buffer<S: PacketSink>(
    buffer: &SampleBuffer,
    transmitter: &mut PacedFrameTransmitter<S>,
) -> Result<AnnounceOutcome> {
    let report = transmitter.transmit(buffer.samples())?;
    if buffer.has_speech() {
        Ok(AnnounceOutcome::Sent(report))
    } else {
        warn!("Sent {} frames of silence only", report.frames_sent);
        Ok(AnnounceOutcome::SentSilence(report))
    }
}
