//! Outbound stream to DVMBridge

pub mod packet;
pub mod sink;
pub mod transmitter;

pub use packet::{encode_packet, packet_count, HEADER_BYTES, PACKET_BYTES};
pub use sink::{PacketSink, UdpSink};
pub use transmitter::{PacedFrameTransmitter, TransmitReport, TransmitState};
