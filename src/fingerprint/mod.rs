//! Browser fingerprint collection.
//!
//! Each signal comes from its own [`SignalProbe`]. A probe returns a typed
//! `Option`; when it returns `None` (API missing, context refused, a call
//! threw) the collector substitutes that field's sentinel and carries on.
//! Collection as a whole never fails.
//!
//! ## Usage
//!
//! ```javascript
//! import init, { collect_fingerprint } from './pkg/letterbox_wasm.js';
//! await init();
//! console.log(collect_fingerprint()); // { resolution: "1920x1080", ... }
//! ```

use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Navigator, Window};

use crate::dom;
use crate::error::Result;
use crate::session::SessionState;

pub mod canvas;
pub mod fonts;
pub mod locale;
pub mod navigator;
pub mod screen;
pub mod submit;
pub mod webgl;

use navigator::HeuristicFlags;

/// Sentinel for a string signal whose probe failed.
pub const UNAVAILABLE: &str = "unavailable";

/// Browser handles shared by all probes.
pub struct BrowserEnv {
    pub window: Window,
    pub document: Document,
    pub navigator: Navigator,
}

impl BrowserEnv {
    pub fn current() -> Result<Self> {
        let window = dom::window()?;
        let document = dom::document()?;
        let navigator = window.navigator();
        Ok(Self { window, document, navigator })
    }

    /// The navigator as a plain JS value, for `Reflect` reads.
    pub fn navigator_js(&self) -> &JsValue {
        self.navigator.as_ref()
    }
}

/// One fingerprinting signal source.
pub trait SignalProbe {
    type Output;

    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Read the signal; `None` when it cannot be observed.
    fn probe(&self, env: &BrowserEnv) -> Option<Self::Output>;
}

fn run<P: SignalProbe>(probe: &P, env: &BrowserEnv) -> Option<P::Output> {
    let value = probe.probe(env);
    if value.is_none() {
        log::debug!("fingerprint probe '{}' unavailable", probe.name());
    }
    value
}

/// Raw probe results before sentinel substitution.
#[derive(Debug, Default)]
pub struct Signals {
    pub resolution: Option<String>,
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub canvas: Option<String>,
    pub webgl: Option<String>,
    pub plugins: Option<Vec<String>>,
    pub fonts: Option<Vec<String>>,
    pub heuristics: Option<HeuristicFlags>,
    pub browser: Option<String>,
    pub os: Option<String>,
}

impl Signals {
    pub fn probe_all(env: &BrowserEnv) -> Self {
        Self {
            resolution: run(&screen::ResolutionProbe, env),
            timezone: run(&locale::TimezoneProbe, env),
            language: run(&locale::LanguageProbe, env),
            canvas: run(&canvas::CanvasProbe, env),
            webgl: run(&webgl::WebGlProbe, env),
            plugins: run(&navigator::PluginsProbe, env),
            fonts: run(&fonts::FontProbe::default(), env),
            heuristics: run(&navigator::AutomationProbe, env),
            browser: run(&navigator::AppNameProbe, env),
            os: run(&navigator::PlatformProbe, env),
        }
    }
}

/// The flat signal map sent to the backend. Field names on the wire follow
/// the `/register` contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintRecord {
    pub resolution: String,
    pub timezone: String,
    pub language: String,
    pub canvas: String,
    pub webgl: String,
    pub plugins: Vec<String>,
    pub fonts: Vec<String>,
    #[serde(rename = "isTor")]
    pub possible_automation: u8,
    #[serde(rename = "isProxy")]
    pub proxy: u8,
    #[serde(rename = "isHeadless")]
    pub headless: u8,
    pub browser: String,
    pub os: String,
}

impl FingerprintRecord {
    /// Substitute sentinels for every signal that was not observed.
    pub fn from_signals(signals: Signals) -> Self {
        let or_unavailable = |v: Option<String>| v.unwrap_or_else(|| UNAVAILABLE.to_string());
        let flags = signals.heuristics.unwrap_or_default();
        Self {
            resolution: or_unavailable(signals.resolution),
            timezone: or_unavailable(signals.timezone),
            language: or_unavailable(signals.language),
            canvas: or_unavailable(signals.canvas),
            webgl: or_unavailable(signals.webgl),
            plugins: signals.plugins.unwrap_or_default(),
            fonts: signals.fonts.unwrap_or_default(),
            possible_automation: flags.possible_automation as u8,
            proxy: flags.proxy as u8,
            headless: flags.headless as u8,
            browser: or_unavailable(signals.browser),
            os: or_unavailable(signals.os),
        }
    }

    /// Collect from the current page. Without a window every field is a sentinel.
    pub fn collect() -> Self {
        match BrowserEnv::current() {
            Ok(env) => Self::from_signals(Signals::probe_all(&env)),
            Err(e) => {
                log::warn!("fingerprint collection without browser: {}", e);
                Self::from_signals(Signals::default())
            }
        }
    }
}

/// Count mouse moves and clicks on the document for the rest of the page's life.
pub fn track_interactions(document: &Document, session: Rc<SessionState>) -> Result<()> {
    let moves = session.clone();
    dom::listen(document, "mousemove", move |_| moves.record_mouse_move())?;
    dom::listen(document, "click", move |_| session.record_click())?;
    Ok(())
}

/// Collect the fingerprint and return it as a JS object.
#[wasm_bindgen]
pub fn collect_fingerprint() -> std::result::Result<JsValue, JsValue> {
    let record = FingerprintRecord::collect();
    serde_wasm_bindgen::to_value(&record).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_signals_degrade_to_sentinels() {
        let record = FingerprintRecord::from_signals(Signals::default());
        assert_eq!(record.resolution, UNAVAILABLE);
        assert_eq!(record.canvas, UNAVAILABLE);
        assert_eq!(record.webgl, UNAVAILABLE);
        assert_eq!(record.timezone, UNAVAILABLE);
        assert!(record.plugins.is_empty());
        assert!(record.fonts.is_empty());
        assert_eq!(record.possible_automation, 0);
        assert_eq!(record.proxy, 0);
        assert_eq!(record.headless, 0);
    }

    #[test]
    fn test_one_failed_probe_leaves_others_intact() {
        let record = FingerprintRecord::from_signals(Signals {
            resolution: Some("1920x1080".into()),
            timezone: Some("America/Sao_Paulo".into()),
            language: Some("pt-BR".into()),
            canvas: None,
            webgl: Some("Intel Inc. - Intel Iris".into()),
            plugins: Some(vec!["PDF Viewer".into()]),
            fonts: Some(vec!["Arial".into()]),
            heuristics: Some(HeuristicFlags {
                possible_automation: true,
                proxy: false,
                headless: true,
            }),
            browser: Some("Netscape".into()),
            os: Some("Linux x86_64".into()),
        });
        assert_eq!(record.canvas, UNAVAILABLE);
        assert_eq!(record.resolution, "1920x1080");
        assert_eq!(record.webgl, "Intel Inc. - Intel Iris");
        assert_eq!(record.possible_automation, 1);
        assert_eq!(record.headless, 1);
        assert_eq!(record.proxy, 0);
    }

    #[test]
    fn test_record_wire_names() {
        let record = FingerprintRecord::from_signals(Signals::default());
        let json = serde_json::to_value(&record).unwrap();
        for key in [
            "resolution", "timezone", "language", "canvas", "webgl", "plugins", "fonts",
            "isTor", "isProxy", "isHeadless", "browser", "os",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json.as_object().unwrap().len(), 12);
    }
}
