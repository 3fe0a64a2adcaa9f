use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket as StdUdpSocket};

use async_trait::async_trait;
use ipscope_common::network::interface;
use ipscope_common::utils::interface::NetworkInterfaceExtension;
use pnet::datalink::NetworkInterface;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::{CandidateSource, CandidateStream, ProbeError};

const MAX_INTERFACES: usize = 8;
const HOST_TYPE_PREFERENCE: u32 = 126;
const COMPONENT_RTP: u32 = 1;
/// Destination used only to ask the OS which source address it would route
/// from. Nothing is sent.
const ROUTE_PROBE: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 80);

/// Gathers host candidates the way a peer connection does with no relay
/// servers configured: one UDP socket per local address, each reported as a
/// `typ host` candidate line.
///
/// The address the default route would use is reported first.
#[derive(Debug, Default, Clone)]
pub struct HostGatherer;

impl HostGatherer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CandidateSource for HostGatherer {
    async fn gather(&self) -> Result<CandidateStream, ProbeError> {
        let interfaces: Vec<NetworkInterface> =
            interface::get_prioritized_interfaces(MAX_INTERFACES);

        let mut addresses: Vec<IpAddr> = Vec::new();
        if let Some(route_source) = default_route_source() {
            addresses.push(route_source);
        }
        for intf in &interfaces {
            addresses.extend(intf.get_ipv4_addrs().into_iter().map(IpAddr::V4));
            addresses.extend(intf.get_ipv6_addrs().into_iter().map(IpAddr::V6));
        }

        if addresses.is_empty() {
            return Err(ProbeError::Setup("no local addresses to bind".to_string()));
        }

        let (tx, rx) = mpsc::channel(addresses.len());
        let foundation: u32 = rand::random();

        tokio::spawn(async move {
            for (idx, addr) in addresses.into_iter().enumerate() {
                let socket = match UdpSocket::bind(SocketAddr::new(addr, 0)).await {
                    Ok(socket) => socket,
                    Err(e) => {
                        trace!("Skipping {addr}: {e}");
                        continue;
                    }
                };
                let port: u16 = match socket.local_addr() {
                    Ok(local) => local.port(),
                    Err(_) => continue,
                };
                let line = host_candidate_line(foundation, idx, addr, port);
                if tx.send(Ok(line)).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }
}

fn default_route_source() -> Option<IpAddr> {
    let socket = StdUdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect(ROUTE_PROBE).ok()?;
    let source = socket.local_addr().ok()?.ip();
    debug!("Default route source address is {source}");
    Some(source)
}

fn host_candidate_line(foundation: u32, idx: usize, addr: IpAddr, port: u16) -> String {
    let local_preference: u32 = 65535u32.saturating_sub(idx as u32);
    let priority: u32 = (HOST_TYPE_PREFERENCE << 24) + (local_preference << 8) + (256 - COMPONENT_RTP);
    format!("candidate:{foundation} {COMPONENT_RTP} udp {priority} {addr} {port} typ host generation 0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prober::extract_candidate;

    #[test]
    fn candidate_line_carries_address_and_port() {
        let line = host_candidate_line(7, 0, IpAddr::V4(Ipv4Addr::new(192, 168, 0, 3)), 50123);
        assert_eq!(
            line,
            "candidate:7 1 udp 2130706431 192.168.0.3 50123 typ host generation 0"
        );
        assert_eq!(extract_candidate(&line).map(|c| c.to_string()), Some("192.168.0.3".to_string()));
    }

    #[test]
    fn later_candidates_have_lower_priority() {
        let addr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let priority = |line: String| -> u32 {
            line.split_whitespace().nth(3).unwrap().parse().unwrap()
        };
        assert!(priority(host_candidate_line(1, 0, addr, 1)) > priority(host_candidate_line(1, 1, addr, 1)));
    }
}
