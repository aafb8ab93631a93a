//! Real-time paced frame transmitter
//!
//! Frames are scheduled against a single start instant: frame `k` is due at
//! `start + k * 20ms`. A frame delayed by the scheduler is followed by a
//! shorter sleep, so lateness never accumulates over a long announcement.

use super::packet::{encode_packet, packet_count};
use super::sink::{PacketSink, UdpSink};
use crate::audio::{FRAME_DURATION, FRAME_SAMPLES};
use crate::{AnnounceError, Result};
use log::{debug, info, warn};
use std::thread;
use std::time::{Duration, Instant};

/// Lifecycle of a single transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitState {
    Idle,
    Streaming,
    Completed,
    Aborted,
}

/// Summary of a completed transmission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmitReport {
    pub frames_sent: usize,
    pub bytes_sent: usize,
    pub elapsed: Duration,
    /// Worst delay between a frame's target time and its send
    pub max_lateness: Duration,
}

/// Sends a sample buffer as paced, length-prefixed frames
///
/// A transmitter is single-use: once a transmission has completed or
/// aborted, the sink has been dropped and further calls fail.
pub struct PacedFrameTransmitter<S: PacketSink> {
    sink: Option<S>,
    state: TransmitState,
}

impl PacedFrameTransmitter<UdpSink> {
    /// Open a UDP transmitter towards DVMBridge
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        Ok(Self::new(UdpSink::connect(host, port)?))
    }
}

impl<S: PacketSink> PacedFrameTransmitter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink: Some(sink),
            state: TransmitState::Idle,
        }
    }

    pub fn state(&self) -> TransmitState {
        self.state
    }

    /// Stream `samples` to the sink, blocking until the last frame is sent
    ///
    /// The first send error aborts the transmission; remaining frames are
    /// never sent. The sink is released before this returns, on success and
    /// on failure.
    pub fn transmit(&mut self, samples: &[i16]) -> Result<TransmitReport> {
        if self.state != TransmitState::Idle {
            return Err(AnnounceError::Other(format!(
                "Transmitter already used (state {:?})",
                self.state
            )));
        }
        let Some(mut sink) = self.sink.take() else {
            return Err(AnnounceError::Other("Transmitter has no sink".to_string()));
        };

        let bytes = samples.len() * 2;
        info!("Sending {} bytes ({} frames)", bytes, packet_count(bytes));

        self.state = TransmitState::Streaming;
        let start = Instant::now();
        let mut max_lateness = Duration::ZERO;
        let mut frame = 0usize;

        for chunk in samples.chunks(FRAME_SAMPLES) {
            let packet = encode_packet(chunk);

            let target = FRAME_DURATION * frame as u32;
            let elapsed = start.elapsed();
            if let Some(wait) = target.checked_sub(elapsed) {
                thread::sleep(wait);
            } else {
                max_lateness = max_lateness.max(elapsed - target);
            }

            if let Err(source) = sink.send_packet(&packet) {
                self.state = TransmitState::Aborted;
                drop(sink);
                warn!("Send failed on frame {}, aborting: {}", frame, source);
                return Err(AnnounceError::Transmit {
                    frame,
                    sent: frame,
                    source,
                });
            }

            frame += 1;
        }

        drop(sink);
        self.state = TransmitState::Completed;

        let report = TransmitReport {
            frames_sent: frame,
            bytes_sent: bytes,
            elapsed: start.elapsed(),
            max_lateness,
        };
        debug!(
            "Transmission finished in {:?} (max lateness {:?})",
            report.elapsed, report.max_lateness
        );
        info!("Done sending audio");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Default)]
    struct CountingSink {
        packets: usize,
    }

    impl PacketSink for CountingSink {
        fn send_packet(&mut self, packet: &[u8]) -> io::Result<()> {
            assert_eq!(packet.len(), 324);
            self.packets += 1;
            Ok(())
        }
    }

    #[test]
    fn test_state_transitions() {
        let mut tx = PacedFrameTransmitter::new(CountingSink::default());
        assert_eq!(tx.state(), TransmitState::Idle);

        let report = tx.transmit(&[0; 320]).unwrap();
        assert_eq!(tx.state(), TransmitState::Completed);
        assert_eq!(report.frames_sent, 2);
        assert_eq!(report.bytes_sent, 640);
    }

    #[test]
    fn test_single_use() {
        let mut tx = PacedFrameTransmitter::new(CountingSink::default());
        tx.transmit(&[0; 160]).unwrap();
        assert!(tx.transmit(&[0; 160]).is_err());
        assert_eq!(tx.state(), TransmitState::Completed);
    }

    #[test]
    fn test_empty_buffer_sends_nothing() {
        let mut tx = PacedFrameTransmitter::new(CountingSink::default());
        let report = tx.transmit(&[]).unwrap();
        assert_eq!(report.frames_sent, 0);
        assert_eq!(tx.state(), TransmitState::Completed);
    }

    #[test]
    fn test_partial_final_frame_counts() {
        let mut tx = PacedFrameTransmitter::new(CountingSink::default());
        let report = tx.transmit(&[5; 161]).unwrap();
        assert_eq!(report.frames_sent, 2);
    }
}
