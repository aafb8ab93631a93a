//! Packet destinations

use crate::{AnnounceError, Result};
use log::debug;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

/// Anything that can take one datagram at a time
///
/// The transmitter owns its sink for the length of one transmission and
/// drops it when the transmission ends, whatever the outcome.
pub trait PacketSink {
    /// Send one packet; any error aborts the transmission
    fn send_packet(&mut self, packet: &[u8]) -> io::Result<()>;
}

/// Unconnected UDP socket aimed at DVMBridge
///
/// Every packet goes out with `send_to`, so ICMP port-unreachable replies
/// never surface as send errors; a receiver that is down or restarting just
/// misses frames.
pub struct UdpSink {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpSink {
    /// Resolve `host:port` and open a socket for it
    ///
    /// Accepts IPv4 and IPv6 literals as well as host names; the first
    /// resolved address wins.
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let peer = (host, port)
            .to_socket_addrs()
            .map_err(|e| {
                AnnounceError::Socket(format!("Failed to resolve {}:{}: {}", host, port, e))
            })?
            .next()
            .ok_or_else(|| {
                AnnounceError::Socket(format!("No address found for {}:{}", host, port))
            })?;

        let local: SocketAddr = match peer {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };

        let socket = UdpSocket::bind(local)
            .map_err(|e| AnnounceError::Socket(format!("Failed to open UDP socket: {}", e)))?;

        debug!("UDP socket {:?} targeting {}", socket.local_addr().ok(), peer);
        Ok(Self { socket, peer })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl PacketSink for UdpSink {
    fn send_packet(&mut self, packet: &[u8]) -> io::Result<()> {
        let sent = self.socket.send_to(packet, self.peer)?;
        if sent != packet.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short send: {} of {} bytes", sent, packet.len()),
            ));
        }
        Ok(())
    }
}

impl Drop for UdpSink {
    fn drop(&mut self) {
        debug!("Closing UDP socket to {}", self.peer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_loopback() {
        let sink = UdpSink::connect("127.0.0.1", 32001).unwrap();
        assert_eq!(sink.peer(), "127.0.0.1:32001".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_send_to_closed_port_keeps_going() {
        let port = {
            let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
            socket.local_addr().unwrap().port()
        };
        let mut sink = UdpSink::connect("127.0.0.1", port).unwrap();
        for _ in 0..5 {
            sink.send_packet(&[0; 324]).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
    }

    #[test]
    fn test_connect_unresolvable() {
        let err = UdpSink::connect("no such host.invalid", 32001).err().unwrap();
        assert!(matches!(err, AnnounceError::Socket(_)));
    }
}
