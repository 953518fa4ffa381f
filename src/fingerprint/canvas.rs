//! Canvas rendering signal.
//!
//! Draws a fixed scene (filled rect plus two text runs with alpha blending)
//! on a fresh 2D canvas and reports a SHA-256 digest of its PNG data URL.
//! Differences in font rasterization and anti-aliasing between devices show
//! up as different digests.

use sha2::{Digest, Sha256};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::{BrowserEnv, SignalProbe};
use crate::dom;

pub struct CanvasProbe;

impl SignalProbe for CanvasProbe {
    type Output = String;

    fn name(&self) -> &'static str {
        "canvas"
    }

    fn probe(&self, env: &BrowserEnv) -> Option<String> {
        match render_scene(&env.document) {
            Ok(data_url) => Some(digest(&data_url)),
            Err(e) => {
                log::debug!("canvas scene failed: {:?}", e);
                None
            }
        }
    }
}

/// Get a 2D context on a fresh canvas element.
pub(crate) fn context_2d(document: &Document) -> Option<CanvasRenderingContext2d> {
    let canvas: HtmlCanvasElement = dom::create(document, "canvas").ok()?;
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn render_scene(document: &Document) -> Result<String, JsValue> {
    let canvas: HtmlCanvasElement = dom::create(document, "canvas")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context refused"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    ctx.set_text_baseline("top");
    ctx.set_font("14px Arial");
    ctx.set_text_baseline("alphabetic");
    ctx.set_fill_style_str("#f60");
    ctx.fill_rect(125.0, 1.0, 62.0, 20.0);
    ctx.set_fill_style_str("#069");
    ctx.fill_text("Hello, world!", 2.0, 15.0)?;
    ctx.set_fill_style_str("rgba(102, 204, 0, 0.7)");
    ctx.fill_text("Canvas fingerprint", 4.0, 40.0)?;

    canvas.to_data_url()
}

/// Hex SHA-256 of the serialized canvas.
pub fn digest(data_url: &str) -> String {
    hex::encode(Sha256::digest(data_url.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_stable_hex() {
        let a = digest("data:image/png;base64,AAAA");
        let b = digest("data:image/png;base64,AAAA");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_digest_separates_renderings() {
        assert_ne!(
            digest("data:image/png;base64,AAAA"),
            digest("data:image/png;base64,AAAB")
        );
    }
}
