//! Device and browser classification over an identification string, plus a
//! flat snapshot of what the environment reports about itself.
//!
//! Both classifiers are ordered first-match-wins tables. Several vendor tokens
//! routinely appear together (a Chrome string also says `Safari`, an iPad
//! string also says `Mobile`), so the order is part of the contract.

use std::sync::LazyLock;

use ipscope_common::device::{BrowserFamily, DeviceKind, DeviceSnapshot};
use regex::Regex;

mod environment;

pub use environment::{Environment, NativeEnvironment};

static TABLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(tablet|ipad|playbook|silk)").expect("tablet pattern is valid")
});

static MOBILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Mobile|Android|iP(hone|od)|IEMobile|BlackBerry|Kindle|Silk-Accelerated|(hpw|web)OS|Opera M(obi|ini)",
    )
    .expect("mobile pattern is valid")
});

const BROWSER_SIGNATURES: &[(&[&str], BrowserFamily)] = &[
    (&["Firefox"], BrowserFamily::Firefox),
    (&["Opera", "OPR"], BrowserFamily::Opera),
    (&["Trident"], BrowserFamily::InternetExplorer),
    (&["Edge"], BrowserFamily::Edge),
    (&["Chrome"], BrowserFamily::Chrome),
    (&["Safari"], BrowserFamily::Safari),
];

/// Tablet signatures are checked before the broader mobile ones.
pub fn classify_device(identification: &str) -> DeviceKind {
    if TABLET.is_match(identification) || is_android_tablet(identification) {
        return DeviceKind::Tablet;
    }
    if MOBILE.is_match(identification) {
        return DeviceKind::Mobile;
    }
    DeviceKind::Desktop
}

pub fn identify_browser(identification: &str) -> BrowserFamily {
    BROWSER_SIGNATURES
        .iter()
        .find(|(tokens, _)| tokens.iter().any(|token| identification.contains(token)))
        .map(|(_, family)| *family)
        .unwrap_or(BrowserFamily::Unknown)
}

/// Android without a later `mobi` token, case-insensitive.
///
/// Checking the last `android` occurrence is enough: if any occurrence has no
/// `mobi` after it, the last one doesn't either.
fn is_android_tablet(identification: &str) -> bool {
    let lower: String = identification.to_lowercase();
    match lower.rfind("android") {
        Some(pos) => !lower[pos + "android".len()..].contains("mobi"),
        None => false,
    }
}

/// Reads every field fresh from `env`; nothing is cached between calls.
pub fn snapshot(env: &dyn Environment) -> DeviceSnapshot {
    let identification: String = env.identification();
    DeviceSnapshot {
        kind: classify_device(&identification),
        browser: identify_browser(&identification),
        identification,
        platform: env.platform(),
        language: env.language(),
        screen: env.screen(),
        viewport: env.viewport(),
        color_depth: env.color_depth(),
        online: env.online(),
        cookies_enabled: env.cookies_enabled(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipscope_common::device::{ConnectionInfo, Dimensions};

    const CHROME_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
    const SAFARI_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15";
    const FIREFOX_LINUX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:127.0) Gecko/20100101 Firefox/127.0";
    const OPERA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36 OPR/111.0.0.0";
    const LEGACY_EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/70.0.3538.102 Safari/537.36 Edge/18.19041";
    const IE11: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64; Trident/7.0; rv:11.0) like Gecko";
    const IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";
    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";
    const ANDROID_PHONE: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Mobile Safari/537.36";
    const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

    #[test]
    fn chrome_wins_over_safari_token() {
        assert_eq!(identify_browser(CHROME_DESKTOP), BrowserFamily::Chrome);
        assert_eq!(identify_browser(SAFARI_MAC), BrowserFamily::Safari);
    }

    #[test]
    fn browser_precedence_order() {
        assert_eq!(identify_browser(FIREFOX_LINUX), BrowserFamily::Firefox);
        assert_eq!(identify_browser(OPERA), BrowserFamily::Opera);
        assert_eq!(identify_browser(LEGACY_EDGE), BrowserFamily::Edge);
        assert_eq!(identify_browser(IE11), BrowserFamily::InternetExplorer);
        assert_eq!(identify_browser("curl/8.5.0"), BrowserFamily::Unknown);
    }

    #[test]
    fn tablet_check_precedes_mobile() {
        assert!(MOBILE.is_match(IPAD));
        assert_eq!(classify_device(IPAD), DeviceKind::Tablet);
        assert_eq!(classify_device(ANDROID_TABLET), DeviceKind::Tablet);
    }

    #[test]
    fn phones_are_mobile() {
        assert_eq!(classify_device(IPHONE), DeviceKind::Mobile);
        assert_eq!(classify_device(ANDROID_PHONE), DeviceKind::Mobile);
        assert_eq!(classify_device("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80) Presto/2.5.25"), DeviceKind::Mobile);
    }

    #[test]
    fn everything_else_is_desktop() {
        assert_eq!(classify_device(CHROME_DESKTOP), DeviceKind::Desktop);
        assert_eq!(classify_device("ipscope/0.1.0 (Linux 6.8.0; x86_64)"), DeviceKind::Desktop);
    }

    #[test]
    fn android_tablet_check_is_case_insensitive() {
        assert!(is_android_tablet("ANDROID 12; Tab"));
        assert!(!is_android_tablet("android 12; MOBILE"));
        assert!(is_android_tablet("Android Mobile Android"));
    }

    struct FixedEnvironment;

    impl Environment for FixedEnvironment {
        fn identification(&self) -> String {
            IPAD.to_string()
        }
        fn platform(&self) -> Option<String> {
            Some("iPadOS".to_string())
        }
        fn language(&self) -> Option<String> {
            None
        }
        fn screen(&self) -> Option<Dimensions> {
            Some(Dimensions::new(2048, 2732))
        }
        fn viewport(&self) -> Option<Dimensions> {
            Some(Dimensions::new(1024, 1366))
        }
        fn color_depth(&self) -> Option<u8> {
            Some(24)
        }
        fn online(&self) -> Option<bool> {
            Some(true)
        }
        fn cookies_enabled(&self) -> Option<bool> {
            Some(false)
        }
        fn connection(&self) -> Option<ConnectionInfo> {
            None
        }
    }

    #[test]
    fn snapshot_passes_readouts_through() {
        let snap = snapshot(&FixedEnvironment);
        assert_eq!(snap.kind, DeviceKind::Tablet);
        assert_eq!(snap.browser, BrowserFamily::Safari);
        assert_eq!(snap.platform.as_deref(), Some("iPadOS"));
        assert_eq!(snap.language, None);
        assert_eq!(snap.viewport, Some(Dimensions::new(1024, 1366)));
        assert_eq!(snap.cookies_enabled, Some(false));
    }
}
