//! WebGL vendor/renderer signal.

use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGlRenderingContext};

use super::{BrowserEnv, SignalProbe};
use crate::dom;

/// Context names tried in order.
const CONTEXT_KINDS: [&str; 2] = ["webgl", "experimental-webgl"];

pub struct WebGlProbe;

impl SignalProbe for WebGlProbe {
    type Output = String;

    fn name(&self) -> &'static str {
        "webgl"
    }

    fn probe(&self, env: &BrowserEnv) -> Option<String> {
        let canvas: HtmlCanvasElement = dom::create(&env.document, "canvas").ok()?;
        let gl = CONTEXT_KINDS
            .iter()
            .find_map(|kind| canvas.get_context(kind).ok().flatten())?
            .dyn_into::<WebGlRenderingContext>()
            .ok()?;

        let vendor = gl.get_parameter(WebGlRenderingContext::VENDOR).ok()?.as_string()?;
        let renderer = gl.get_parameter(WebGlRenderingContext::RENDERER).ok()?.as_string()?;
        Some(format_webgl(&vendor, &renderer))
    }
}

pub fn format_webgl(vendor: &str, renderer: &str) -> String {
    format!("{} - {}", vendor, renderer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(format_webgl("Mozilla", "Mozilla"), "Mozilla - Mozilla");
    }
}
