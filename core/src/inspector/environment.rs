use std::env;

use ipscope_common::device::{ConnectionInfo, Dimensions};
use ipscope_common::network::interface;

/// Read-only view of the machine the tool runs on.
///
/// `None` from any readout means "not observable here" and is rendered as a
/// placeholder, never treated as an error.
pub trait Environment: Send + Sync {
    fn identification(&self) -> String;
    fn platform(&self) -> Option<String>;
    fn language(&self) -> Option<String>;
    fn screen(&self) -> Option<Dimensions>;
    fn viewport(&self) -> Option<Dimensions>;
    fn color_depth(&self) -> Option<u8>;
    fn online(&self) -> Option<bool>;
    fn cookies_enabled(&self) -> Option<bool>;
    fn connection(&self) -> Option<ConnectionInfo>;
}

#[derive(Debug, Default, Clone)]
pub struct NativeEnvironment {
    user_agent: Option<String>,
}

impl NativeEnvironment {
    pub fn new(user_agent: Option<String>) -> Self {
        Self { user_agent }
    }
}

impl Environment for NativeEnvironment {
    fn identification(&self) -> String {
        match &self.user_agent {
            Some(ua) if !ua.trim().is_empty() => ua.clone(),
            _ => synthesized_identification(),
        }
    }

    fn platform(&self) -> Option<String> {
        let os: String = sys_info::os_type().unwrap_or_else(|_| env::consts::OS.to_string());
        match sys_info::os_release() {
            Ok(release) if !release.is_empty() => {
                Some(format!("{} {} ({})", os, release, env::consts::ARCH))
            }
            _ => Some(format!("{} ({})", os, env::consts::ARCH)),
        }
    }

    fn language(&self) -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| locale_to_language_tag(&value))
    }

    /// Physical display size is not observable from a terminal.
    fn screen(&self) -> Option<Dimensions> {
        None
    }

    fn viewport(&self) -> Option<Dimensions> {
        crossterm::terminal::size()
            .ok()
            .map(|(cols, rows)| Dimensions::new(cols.into(), rows.into()))
    }

    fn color_depth(&self) -> Option<u8> {
        color_depth_from(
            env::var("COLORTERM").ok().as_deref(),
            env::var("TERM").ok().as_deref(),
        )
    }

    fn online(&self) -> Option<bool> {
        Some(interface::is_online())
    }

    /// There is no cookie jar outside a browser.
    fn cookies_enabled(&self) -> Option<bool> {
        None
    }

    fn connection(&self) -> Option<ConnectionInfo> {
        interface::primary_interface().map(|intf| interface::connection_info(&intf))
    }
}

fn synthesized_identification() -> String {
    let os: String = sys_info::os_type().unwrap_or_else(|_| env::consts::OS.to_string());
    let release: String = sys_info::os_release().unwrap_or_default();
    format!(
        "ipscope/{} ({} {}; {})",
        env!("CARGO_PKG_VERSION"),
        os,
        release,
        env::consts::ARCH
    )
}

/// `en_US.UTF-8` becomes `en-US`. `C` and `POSIX` carry no language.
fn locale_to_language_tag(locale: &str) -> Option<String> {
    let base: &str = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

fn color_depth_from(colorterm: Option<&str>, term: Option<&str>) -> Option<u8> {
    if matches!(colorterm, Some("truecolor") | Some("24bit")) {
        return Some(24);
    }
    match term {
        Some(term) if term.contains("256color") => Some(8),
        Some("dumb") | Some("") | None => None,
        Some(_) => Some(4),
    }
}
