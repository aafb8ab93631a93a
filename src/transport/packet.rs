//! DVMBridge packet framing
//!
//! Each datagram is a 4-byte big-endian length followed by one 320-byte PCM
//! frame. Only the length is byte-swapped; samples go out in host order.

use crate::audio::{FRAME_BYTES, FRAME_SAMPLES};

/// Size of the length prefix
pub const HEADER_BYTES: usize = 4;

/// Size of one datagram
pub const PACKET_BYTES: usize = HEADER_BYTES + FRAME_BYTES;

/// Wrap one frame of samples in a length-prefixed packet
///
/// Samples are written in host byte order. A short frame is zero-padded on
/// the right; a long one is truncated to one frame. The length field always
/// reads 320.
pub fn encode_packet(frame: &[i16]) -> [u8; PACKET_BYTES] {
    let mut packet = [0u8; PACKET_BYTES];
    packet[..HEADER_BYTES].copy_from_slice(&(FRAME_BYTES as u32).to_be_bytes());

    for (slot, sample) in packet[HEADER_BYTES..]
        .chunks_exact_mut(2)
        .zip(frame.iter().take(FRAME_SAMPLES))
    {
        slot.copy_from_slice(&sample.to_ne_bytes());
    }
    packet
}

/// Number of packets needed to carry `bytes` of PCM
pub fn packet_count(bytes: usize) -> usize {
    bytes.div_ceil(FRAME_BYTES)
}
