//! Announcement buffer assembly
//!
//! Lays out lead silence, an optional pre-announce splice, speech, trail
//! silence and LDU padding into one contiguous buffer.

use super::{samples_for, samples_to_bytes, FRAME_SAMPLES, LDU_SAMPLES, SAMPLE_RATE};
use log::debug;
use std::time::Duration;

/// Options for building an announcement buffer
#[derive(Debug, Clone, Default)]
pub struct BufferOptions {
    /// Silence before the announcement, in seconds
    pub lead_silence: f32,

    /// Silence after the announcement, in seconds
    pub trail_silence: f32,

    /// Pre-recorded audio played before the speech (8kHz mono)
    pub pre_announce: Option<Vec<i16>>,
}

/// Sample counts of each segment in a built buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferLayout {
    pub lead: usize,
    pub splice: usize,
    pub speech: usize,
    pub trail: usize,
    pub padding: usize,
}

impl BufferLayout {
    pub fn total(&self) -> usize {
        self.lead + self.splice + self.speech + self.trail + self.padding
    }
}

/// An LDU-aligned announcement, ready for transmission
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<i16>,
    layout: BufferLayout,
}

impl SampleBuffer {
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn layout(&self) -> BufferLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether the synthesizer contributed any samples
    ///
    /// A buffer without speech is still valid to send, but means the
    /// synthesis step failed upstream.
    pub fn has_speech(&self) -> bool {
        self.layout.speech > 0
    }

    /// Whether every sample is zero
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0)
    }

    /// Playback length at 8kHz
    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.samples.len() as u64 * 1_000_000_000 / SAMPLE_RATE as u64)
    }

    /// Number of 20ms frames the transmitter will send
    pub fn frame_count(&self) -> usize {
        self.samples.len().div_ceil(FRAME_SAMPLES)
    }

    /// Raw bytes in host order, as written to the wire
    pub fn to_bytes(&self) -> Vec<u8> {
        samples_to_bytes(&self.samples)
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

/// Builds LDU-aligned announcement buffers
///
/// The lead silence is rounded up to a whole LDU so the announcement starts
/// on an LDU boundary, and the finished buffer is padded to a whole LDU.
/// Building is deterministic; the same options and speech always produce the
/// same buffer.
#[derive(Debug, Clone, Default)]
pub struct SampleBufferBuilder {
    options: BufferOptions,
}

impl SampleBufferBuilder {
    pub fn new(options: BufferOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BufferOptions {
        &self.options
    }

    /// Lead silence in samples, rounded up to the next LDU boundary
    pub fn lead_samples(&self) -> usize {
        round_up_to_ldu(samples_for(self.options.lead_silence))
    }

    /// Trail silence in samples (not aligned)
    pub fn trail_samples(&self) -> usize {
        samples_for(self.options.trail_silence)
    }

    /// Assemble a buffer around the synthesized speech
    pub fn build(&self, speech: &[i16]) -> SampleBuffer {
        let splice = self.options.pre_announce.as_deref().unwrap_or(&[]);
        let lead = self.lead_samples();
        let trail = self.trail_samples();

        let unpadded = lead + splice.len() + speech.len() + trail;
        let padding = round_up_to_ldu(unpadded) - unpadded;

        let mut samples = Vec::with_capacity(unpadded + padding);
        samples.resize(lead, 0);
        samples.extend_from_slice(splice);
        samples.extend_from_slice(speech);
        samples.resize(unpadded + padding, 0);

        let layout = BufferLayout {
            lead,
            splice: splice.len(),
            speech: speech.len(),
            trail,
            padding,
        };

        debug!(
            "Built {} samples: {} lead + {} splice + {} speech + {} trail + {} padding",
            samples.len(),
            layout.lead,
            layout.splice,
            layout.speech,
            layout.trail,
            layout.padding
        );

        SampleBuffer { samples, layout }
    }
}

fn round_up_to_ldu(samples: usize) -> usize {
    samples.div_ceil(LDU_SAMPLES) * LDU_SAMPLES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(lead: f32, trail: f32) -> SampleBufferBuilder {
        SampleBufferBuilder::new(BufferOptions {
            lead_silence: lead,
            trail_silence: trail,
            pre_announce: None,
        })
    }

    #[test]
    fn test_round_up_to_ldu() {
        assert_eq!(round_up_to_ldu(0), 0);
        assert_eq!(round_up_to_ldu(1), 1440);
        assert_eq!(round_up_to_ldu(1440), 1440);
        assert_eq!(round_up_to_ldu(1441), 2880);
    }

    #[test]
    fn test_lead_is_smallest_ldu_multiple() {
        for tenths in 0..100 {
            let seconds = tenths as f32 / 10.0;
            let lead = builder(seconds, 0.0).lead_samples();
            let needed = samples_for(seconds);
            assert_eq!(lead % LDU_SAMPLES, 0);
            assert!(lead >= needed);
            assert!(lead < needed + LDU_SAMPLES);
        }
    }

    #[test]
    fn test_layout_segments_in_order() {
        let mut b = builder(0.1, 0.05);
        b.options.pre_announce = Some(vec![7; 100]);
        let buffer = b.build(&[3; 50]);
        let layout = buffer.layout();

        // 800 lead samples round up to one LDU
        assert_eq!(layout.lead, 1440);
        assert_eq!(layout.splice, 100);
        assert_eq!(layout.speech, 50);
        assert_eq!(layout.trail, 400);
        assert_eq!(layout.total(), buffer.len());
        assert_eq!(buffer.len(), 2880);

        let s = buffer.samples();
        assert!(s[..1440].iter().all(|&x| x == 0));
        assert!(s[1440..1540].iter().all(|&x| x == 7));
        assert!(s[1540..1590].iter().all(|&x| x == 3));
        assert!(s[1590..].iter().all(|&x| x == 0));
    }

    #[test]
    fn test_empty_speech_is_aligned_silence() {
        let buffer = builder(0.0, 0.0).build(&[]);
        assert!(buffer.is_empty());
        assert!(!buffer.has_speech());

        let buffer = builder(0.3, 0.3).build(&[]);
        assert_eq!(buffer.len() % LDU_SAMPLES, 0);
        assert!(buffer.is_silent());
        assert!(!buffer.has_speech());
    }

    #[test]
    fn test_frame_count_and_duration() {
        let buffer = builder(0.0, 0.0).build(&[1; 1600]);
        assert_eq!(buffer.len(), 2880);
        assert_eq!(buffer.frame_count(), 18);
        assert_eq!(buffer.duration(), Duration::from_millis(360));
        assert_eq!(buffer.to_bytes().len(), 5760);
    }
}
