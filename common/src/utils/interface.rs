use std::net::{Ipv4Addr, Ipv6Addr};

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;

pub trait NetworkInterfaceExtension {
    fn get_ipv4_addrs(&self) -> Vec<Ipv4Addr>;
    fn get_ipv6_addrs(&self) -> Vec<Ipv6Addr>;
    /// Up, not loopback, and holding at least one address.
    fn is_usable(&self) -> bool;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_addrs(&self) -> Vec<Ipv4Addr> {
        self.ips
            .iter()
            .filter_map(|ip| {
                if let IpNetwork::V4(ipv4) = ip {
                    Some(ipv4.ip())
                } else {
                    None
                }
            })
            .collect()
    }

    fn get_ipv6_addrs(&self) -> Vec<Ipv6Addr> {
        self.ips
            .iter()
            .filter_map(|ip| {
                if let IpNetwork::V6(ipv6) = ip {
                    Some(ipv6.ip())
                } else {
                    None
                }
            })
            .collect()
    }

    fn is_usable(&self) -> bool {
        self.is_up() && !self.is_loopback() && !self.ips.is_empty()
    }
}
