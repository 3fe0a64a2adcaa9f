use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
#[cfg(target_os = "macos")]
use macos_impl::{is_physical, is_wireless, link_speed_mbps};
#[cfg(target_os = "linux")]
use linux_impl::{is_physical, is_wireless, link_speed_mbps};
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
use fallback_impl::{is_physical, is_wireless, link_speed_mbps};

use crate::device::ConnectionInfo;
use crate::utils::interface::NetworkInterfaceExtension;

/// Returns up, non-loopback interfaces that carry at least one address,
/// wired-looking names first.
pub fn get_prioritized_interfaces(limit: usize) -> Vec<NetworkInterface> {
    prioritize(datalink::interfaces(), limit)
}

fn prioritize(interfaces: Vec<NetworkInterface>, limit: usize) -> Vec<NetworkInterface> {
    let mut interfaces: Vec<NetworkInterface> = interfaces
        .into_iter()
        .filter(|i| i.is_usable())
        .collect();

    interfaces.sort_by_key(|i| if i.name.starts_with('e') { 0 } else { 1 });

    interfaces.into_iter().take(limit).collect()
}

/// Picks the interface most likely to carry the default route.
pub fn primary_interface() -> Option<NetworkInterface> {
    let interfaces: Vec<NetworkInterface> = get_prioritized_interfaces(usize::MAX)
        .into_iter()
        .filter(|i| has_lan_address(i))
        .collect();
    select_primary(interfaces, is_wired)
}

fn select_primary(
    interfaces: Vec<NetworkInterface>,
    is_wired: impl Fn(&NetworkInterface) -> bool,
) -> Option<NetworkInterface> {
    match interfaces.len() {
        0 => None,
        1 => interfaces.into_iter().next(),
        _ => interfaces
            .iter()
            .find(|&interface| is_wired(interface))
            .or(interfaces.first())
            .cloned(),
    }
}

fn has_lan_address(interface: &NetworkInterface) -> bool {
    interface.ips.iter().any(|net| match net {
        IpNetwork::V4(ipv4) => !ipv4.ip().is_loopback() && !ipv4.ip().is_unspecified(),
        IpNetwork::V6(ipv6) => !ipv6.ip().is_loopback(),
    })
}

/// True when any interface could reach beyond this host.
pub fn is_online() -> bool {
    datalink::interfaces().iter().any(|i| i.is_usable())
}

/// Connection readout for `interface`. Fields the platform cannot report stay `None`.
pub fn connection_info(interface: &NetworkInterface) -> ConnectionInfo {
    let kind: &str = if is_wireless(interface) {
        "wifi"
    } else if is_physical(interface) {
        "ethernet"
    } else {
        "virtual"
    };

    ConnectionInfo {
        kind: Some(kind.to_string()),
        downlink_mbps: link_speed_mbps(interface),
        rtt_ms: None,
    }
}

fn is_wired(interface: &NetworkInterface) -> bool {
    is_physical(interface) && !is_wireless(interface)
}

#[cfg(target_os = "linux")]
mod linux_impl {
    use super::*;
    use std::fs;
    use std::path::Path;

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/device", interface.name)).exists()
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/wireless", interface.name)).exists()
    }

    /// Negotiated speed; the kernel reports -1 (or fails the read) for links without one.
    pub fn link_speed_mbps(interface: &NetworkInterface) -> Option<f64> {
        let raw = fs::read_to_string(format!("/sys/class/net/{}/speed", interface.name)).ok()?;
        let speed: i64 = raw.trim().parse().ok()?;
        (speed > 0).then_some(speed as f64)
    }
}

#[cfg(target_os = "macos")]
mod macos_impl {
    use super::*;
    use std::collections::HashSet;
    use std::process::Command;
    use std::sync::OnceLock;

    struct HardwareInfo {
        physical_devices: HashSet<String>,
        wireless_devices: HashSet<String>,
    }

    /// Runs `networksetup` once on first access.
    fn get_hardware_info() -> &'static HardwareInfo {
        static HARDWARE_INFO: OnceLock<HardwareInfo> = OnceLock::new();

        HARDWARE_INFO.get_or_init(|| {
            let mut physical = HashSet::new();
            let mut wireless = HashSet::new();

            if let Ok(output) = Command::new("networksetup").arg("-listallhardwareports").output() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                for line in stdout.lines() {
                    if let Some(device) = line.strip_prefix("Device: ") {
                        physical.insert(device.trim().to_string());
                    }
                }
            }

            for device in &physical {
                let is_wifi = Command::new("networksetup")
                    .arg("-getairportnetwork")
                    .arg(device)
                    .output()
                    .map(|out| out.status.success())
                    .unwrap_or(false);

                if is_wifi {
                    wireless.insert(device.clone());
                }
            }

            HardwareInfo {
                physical_devices: physical,
                wireless_devices: wireless,
            }
        })
    }

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        get_hardware_info().physical_devices.contains(&interface.name)
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        get_hardware_info().wireless_devices.contains(&interface.name)
    }

    pub fn link_speed_mbps(_interface: &NetworkInterface) -> Option<f64> {
        None
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod fallback_impl {
    use super::*;

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        interface.mac.is_some()
    }

    pub fn is_wireless(_interface: &NetworkInterface) -> bool {
        false
    }

    pub fn link_speed_mbps(_interface: &NetworkInterface) -> Option<f64> {
        None
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
