//! Timezone and UI language signals.

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{BrowserEnv, SignalProbe};
use crate::dom;

#[wasm_bindgen]
extern "C" {
    /// `Intl.DateTimeFormat()`, caught so a missing or patched `Intl` reads as absent.
    #[wasm_bindgen(catch, js_namespace = Intl, js_name = DateTimeFormat)]
    fn date_time_format() -> std::result::Result<JsValue, JsValue>;
}

fn resolved_time_zone() -> Option<String> {
    let format = date_time_format().ok()?;
    let resolve: Function = Reflect::get(&format, &JsValue::from_str("resolvedOptions"))
        .ok()?
        .dyn_into()
        .ok()?;
    let options = resolve.call0(&format).ok()?;
    dom::read_string(&options, "timeZone")
}

/// IANA zone name from `Intl.DateTimeFormat().resolvedOptions().timeZone`.
pub struct TimezoneProbe;

impl SignalProbe for TimezoneProbe {
    type Output = String;

    fn name(&self) -> &'static str {
        "timezone"
    }

    fn probe(&self, _env: &BrowserEnv) -> Option<String> {
        resolved_time_zone().filter(|tz| !tz.is_empty())
    }
}

/// `navigator.language`
pub struct LanguageProbe;

impl SignalProbe for LanguageProbe {
    type Output = String;

    fn name(&self) -> &'static str {
        "language"
    }

    fn probe(&self, env: &BrowserEnv) -> Option<String> {
        env.navigator.language()
    }
}
