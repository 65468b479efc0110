//! Platform detection for choosing browser clipboard paths.
//!
//! Based on the usual user-agent sniffing, cached on first use.

use std::sync::OnceLock;

use keybar_core::PasteCapability;

/// Cached platform detection results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Platform {
    pub ios: bool,
    pub mac: bool,
    pub android: bool,
    pub chrome: bool,
    pub safari: bool,
    pub gecko: bool,
    pub mobile: bool,
}

impl Platform {
    /// Classify a user agent, navigator platform string and touch point count.
    pub fn detect(user_agent: &str, platform: &str, max_touch_points: i32) -> Self {
        let user_agent = user_agent.to_lowercase();
        let platform = platform.to_lowercase();

        // iPadOS reports a Mac platform, but with touch
        let ios = user_agent.contains("iphone")
            || user_agent.contains("ipad")
            || user_agent.contains("ipod")
            || (platform.contains("mac") && max_touch_points > 0);
        let mac = platform.contains("mac") && !ios;
        let android = user_agent.contains("android");
        // Edge also says Chrome
        let chrome = user_agent.contains("chrome") && !user_agent.contains("edg");
        let safari = user_agent.contains("safari") && !user_agent.contains("chrome");
        let gecko = user_agent.contains("gecko/") && !user_agent.contains("like gecko");
        let mobile = ios || android || user_agent.contains("mobile");

        Self {
            ios,
            mac,
            android,
            chrome,
            safari,
            gecko,
            mobile,
        }
    }

    /// Preferred paste path, given what the page can offer.
    ///
    /// Mobile browsers gate `readText` behind prompts that rarely resolve in
    /// a toolbar tap, so they go through the proxy input first.
    pub fn paste_capability(&self, has_proxy: bool, has_read_api: bool) -> PasteCapability {
        match (self.mobile, has_proxy, has_read_api) {
            (true, true, _) => PasteCapability::Proxy,
            (_, _, true) => PasteCapability::Direct,
            (_, true, false) => PasteCapability::Proxy,
            (_, false, false) => PasteCapability::Unavailable,
        }
    }
}

static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Get cached platform info. Detection runs once on first call.
pub fn platform() -> &'static Platform {
    PLATFORM.get_or_init(detect_platform)
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn detect_platform() -> Platform {
    let Some(window) = web_sys::window() else {
        return Platform::default();
    };

    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default();
    let platform_str = navigator.platform().unwrap_or_default();
    let detected = Platform::detect(&user_agent, &platform_str, navigator.max_touch_points());
    tracing::debug!(?detected, "platform detected");
    detected
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn detect_platform() -> Platform {
    Platform::default()
}
