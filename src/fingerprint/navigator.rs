//! Navigator-derived signals: plugin list, coarse browser/platform strings,
//! and the automation heuristics.
//!
//! The heuristics are weak on purpose. `webdriver` is trivially spoofed,
//! an empty plugin list is normal on mobile, and proxy use cannot be seen
//! from page script at all, so the proxy flag is constant.

use js_sys::Reflect;
use wasm_bindgen::JsValue;

use super::{BrowserEnv, SignalProbe};
use crate::dom;

/// Ordered `navigator.plugins` names.
pub struct PluginsProbe;

impl SignalProbe for PluginsProbe {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "plugins"
    }

    fn probe(&self, env: &BrowserEnv) -> Option<Vec<String>> {
        let plugins = env.navigator.plugins().ok()?;
        Some(
            (0..plugins.length())
                .filter_map(|i| plugins.item(i))
                .map(|plugin| plugin.name())
                .collect(),
        )
    }
}

/// `navigator.appName`
pub struct AppNameProbe;

impl SignalProbe for AppNameProbe {
    type Output = String;

    fn name(&self) -> &'static str {
        "browser"
    }

    fn probe(&self, env: &BrowserEnv) -> Option<String> {
        dom::read_string(env.navigator_js(), "appName")
    }
}

/// `navigator.platform`
pub struct PlatformProbe;

impl SignalProbe for PlatformProbe {
    type Output = String;

    fn name(&self) -> &'static str {
        "os"
    }

    fn probe(&self, env: &BrowserEnv) -> Option<String> {
        dom::read_string(env.navigator_js(), "platform")
    }
}

/// Raw navigator observations the heuristics are computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorTraits {
    pub webdriver: bool,
    pub plugin_count: u32,
    pub language_count: u32,
}

/// Binary heuristic flags. Not authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeuristicFlags {
    pub possible_automation: bool,
    pub proxy: bool,
    pub headless: bool,
}

impl HeuristicFlags {
    pub fn assess(traits: &NavigatorTraits) -> Self {
        Self {
            possible_automation: traits.webdriver
                || traits.plugin_count == 0
                || traits.language_count == 0,
            proxy: false,
            headless: traits.webdriver,
        }
    }
}

pub struct AutomationProbe;

impl SignalProbe for AutomationProbe {
    type Output = HeuristicFlags;

    fn name(&self) -> &'static str {
        "automation"
    }

    fn probe(&self, env: &BrowserEnv) -> Option<HeuristicFlags> {
        let nav = env.navigator_js();
        let webdriver = Reflect::get(nav, &JsValue::from_str("webdriver"))
            .map(|v| v == JsValue::TRUE)
            .unwrap_or(false);
        let traits = NavigatorTraits {
            webdriver,
            plugin_count: dom::read_length(nav, "plugins")?,
            language_count: dom::read_length(nav, "languages")?,
        };
        Some(HeuristicFlags::assess(&traits))
    }
}
