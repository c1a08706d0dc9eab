//! Standalone (installed PWA) display detection.
//!
//! Checks the `(display-mode: standalone)` media query, falling back to the
//! iOS-only `navigator.standalone` flag. Requires a browser environment; SSR
//! and tests always report a normal browser tab.

#[cfg(test)]
#[path = "display_mode_test.rs"]
mod display_mode_test;

/// Where the app is running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HostContext {
    /// Regular browser tab with browser chrome.
    #[default]
    Browser,
    /// Launched from the home screen without browser chrome.
    Standalone,
}

impl HostContext {
    #[must_use]
    pub fn from_standalone(standalone: bool) -> Self {
        if standalone { Self::Standalone } else { Self::Browser }
    }

    #[must_use]
    pub fn is_standalone(self) -> bool {
        self == Self::Standalone
    }
}

/// Detect the current host context.
pub fn detect() -> HostContext {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return HostContext::Browser;
        };

        let media = window
            .match_media("(display-mode: standalone)")
            .ok()
            .flatten()
            .map_or(false, |mq| mq.matches());
        if media {
            return HostContext::Standalone;
        }

        let navigator = window.navigator();
        let ios = js_sys::Reflect::get(&navigator, &wasm_bindgen::JsValue::from_str("standalone"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        HostContext::from_standalone(ios)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        HostContext::Browser
    }
}
