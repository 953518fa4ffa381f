//! Installed-font signal.
//!
//! Measures a test string under `72px <candidate>, monospace` and compares it
//! with the monospace-only width. A different width means the candidate font
//! rendered. Fonts metrically identical to the fallback are missed.

use super::canvas::context_2d;
use super::{BrowserEnv, SignalProbe};

/// Fonts checked by default.
pub const COMMON_FONTS: &[&str] = &[
    "Arial",
    "Times New Roman",
    "Courier New",
    "Georgia",
    "Verdana",
];

/// Wide/narrow glyph mix so metric differences add up.
pub const TEST_TEXT: &str = "mmmmmmmmmmlli";

const BASELINE_FONT: &str = "72px monospace";

pub struct FontProbe {
    pub candidates: &'static [&'static str],
}

impl Default for FontProbe {
    fn default() -> Self {
        Self { candidates: COMMON_FONTS }
    }
}

impl SignalProbe for FontProbe {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "fonts"
    }

    fn probe(&self, env: &BrowserEnv) -> Option<Vec<String>> {
        let ctx = context_2d(&env.document)?;
        ctx.set_text_baseline("top");
        detect_fonts(self.candidates, |font| {
            ctx.set_font(font);
            ctx.measure_text(TEST_TEXT).ok().map(|m| m.width())
        })
    }
}

/// CSS font shorthand for a candidate with the monospace fallback.
pub fn candidate_font(family: &str) -> String {
    format!("72px {}, monospace", family)
}

/// Run the width comparison with `measure` (font shorthand → width).
///
/// `None` if the baseline cannot be measured; candidates that fail to
/// measure are treated as absent.
pub fn detect_fonts<F>(candidates: &[&str], mut measure: F) -> Option<Vec<String>>
where
    F: FnMut(&str) -> Option<f64>,
{
    let baseline = measure(BASELINE_FONT)?;
    Some(
        candidates
            .iter()
            .filter(|family| {
                measure(&candidate_font(family)).map_or(false, |width| width != baseline)
            })
            .map(|family| family.to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_measure(font: &str) -> Option<f64> {
        if font == BASELINE_FONT {
            Some(100.0)
        } else if font.contains("Arial") || font.contains("Georgia") {
            Some(120.5)
        } else if font.contains("Verdana") {
            None
        } else {
            Some(100.0)
        }
    }

    #[test]
    fn test_detects_fonts_with_different_width() {
        let fonts = detect_fonts(COMMON_FONTS, fake_measure).unwrap();
        assert_eq!(fonts, vec!["Arial".to_string(), "Georgia".to_string()]);
    }

    #[test]
    fn test_baseline_failure_is_unavailable() {
        assert!(detect_fonts(COMMON_FONTS, |_| None).is_none());
    }

    #[test]
    fn test_measures_with_fallback_spec() {
        let mut seen = Vec::new();
        detect_fonts(&["Times New Roman"], |font| {
            seen.push(font.to_string());
            Some(1.0)
        });
        assert_eq!(seen, vec![BASELINE_FONT, "72px Times New Roman, monospace"]);
    }
}
