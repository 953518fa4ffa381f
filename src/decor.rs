//! Decorative heart glyphs.
//!
//! Two layers share the generator: the fixed page background and the
//! faint overlay baked into exported letter images. Placement is computed
//! from any [`Rng`] so layouts are reproducible under a seeded generator.

use rand::seq::SliceRandom;
use rand::Rng;
use web_sys::{Document, HtmlElement};

use crate::dom;
use crate::error::{AppError, Result};

const BACKGROUND_GLYPH: &str = "❤️";
const EXPORT_GLYPHS: [&str; 3] = ["❤️", "💖", "✨"];
const EXPORT_COLORS: [&str; 3] = ["#ffcccc", "#ff9999", "#ff6666"];

/// Class carried by background glyphs (styled by the page CSS).
pub const BACKGROUND_CLASS: &str = "heart-icon";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphLayer {
    /// Fixed to the viewport behind all page content.
    PageBackground,
    /// Absolutely placed inside the export container, behind the text.
    LetterExport,
}

/// One placed glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub layer: GlyphLayer,
    pub text: &'static str,
    pub color: Option<&'static str>,
    pub font_size_px: Option<f64>,
    pub opacity: f64,
    /// Percent of the container (or viewport) width.
    pub x: f64,
    /// Percent of the container (or viewport) height.
    pub y: f64,
    pub rotation_deg: f64,
}

impl Glyph {
    pub fn random<R: Rng>(rng: &mut R, layer: GlyphLayer) -> Self {
        match layer {
            GlyphLayer::PageBackground => Self {
                layer,
                text: BACKGROUND_GLYPH,
                color: None,
                font_size_px: None,
                x: rng.gen_range(0.0..100.0),
                y: rng.gen_range(0.0..100.0),
                rotation_deg: rng.gen_range(0.0..360.0),
                opacity: rng.gen_range(0.1..0.5),
            },
            GlyphLayer::LetterExport => Self {
                layer,
                text: EXPORT_GLYPHS.choose(rng).copied().unwrap_or(BACKGROUND_GLYPH),
                color: EXPORT_COLORS.choose(rng).copied(),
                font_size_px: Some(rng.gen_range(20.0..50.0)),
                opacity: rng.gen_range(0.2..0.5),
                x: rng.gen_range(10.0..90.0),
                y: rng.gen_range(10.0..90.0),
                rotation_deg: rng.gen_range(0.0..360.0),
            },
        }
    }

    /// Inline style declarations, in application order.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let transform = format!("translate(-50%, -50%) rotate({}deg)", self.rotation_deg);
        match self.layer {
            GlyphLayer::PageBackground => vec![
                ("position", "fixed".into()),
                ("left", format!("{}vw", self.x)),
                ("top", format!("{}vh", self.y)),
                ("transform", transform),
                ("z-index", "-1".into()),
                ("opacity", self.opacity.to_string()),
                ("pointer-events", "none".into()),
            ],
            GlyphLayer::LetterExport => {
                let mut decls = vec![("position", "absolute".to_string())];
                if let Some(color) = self.color {
                    decls.push(("color", color.into()));
                }
                if let Some(size) = self.font_size_px {
                    decls.push(("font-size", format!("{}px", size)));
                }
                decls.extend([
                    ("opacity", self.opacity.to_string()),
                    ("pointer-events", "none".into()),
                    ("line-height", "1".into()),
                    ("user-select", "none".into()),
                    ("left", format!("{}%", self.x)),
                    ("top", format!("{}%", self.y)),
                    ("transform", transform),
                    ("z-index", "0".into()),
                ]);
                decls
            }
        }
    }

    /// Build the `<span>` for this glyph.
    pub fn to_element(&self, document: &Document) -> Result<HtmlElement> {
        let span: HtmlElement = dom::create(document, "span")?;
        span.set_text_content(Some(self.text));
        if self.layer == GlyphLayer::PageBackground {
            let _ = span.class_list().add_1(BACKGROUND_CLASS);
        }
        dom::set_styles(&span, &self.declarations())?;
        Ok(span)
    }
}

pub fn scatter<R: Rng>(rng: &mut R, layer: GlyphLayer, count: usize) -> Vec<Glyph> {
    (0..count).map(|_| Glyph::random(rng, layer)).collect()
}

/// Insert the page background once, through a single fragment.
pub fn decorate_background(count: usize) -> Result<()> {
    let document = dom::document()?;
    let body = dom::body()?;
    let fragment = document.create_document_fragment();
    for glyph in scatter(&mut rand::thread_rng(), GlyphLayer::PageBackground, count) {
        fragment
            .append_child(&glyph.to_element(&document)?.into())
            .map_err(|e| AppError::dom("appendChild", e))?;
    }
    body.append_child(&fragment)
        .map_err(|e| AppError::dom("appendChild", e))?;
    log::debug!("background decorated with {} glyphs", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_background_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let glyphs = scatter(&mut rng, GlyphLayer::PageBackground, 80);
        assert_eq!(glyphs.len(), 80);
        for g in &glyphs {
            assert_eq!(g.text, BACKGROUND_GLYPH);
            assert!((0.0..100.0).contains(&g.x));
            assert!((0.0..100.0).contains(&g.y));
            assert!((0.0..360.0).contains(&g.rotation_deg));
            assert!((0.1..0.5).contains(&g.opacity));
        }
    }

    #[test]
    fn test_export_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for g in scatter(&mut rng, GlyphLayer::LetterExport, 15) {
            assert!(EXPORT_GLYPHS.contains(&g.text));
            assert!(EXPORT_COLORS.contains(&g.color.unwrap()));
            assert!((20.0..50.0).contains(&g.font_size_px.unwrap()));
            assert!((0.2..0.5).contains(&g.opacity));
            assert!((10.0..90.0).contains(&g.x));
            assert!((10.0..90.0).contains(&g.y));
        }
    }

    #[test]
    fn test_seeded_layout_is_reproducible() {
        let a = scatter(&mut StdRng::seed_from_u64(3), GlyphLayer::LetterExport, 15);
        let b = scatter(&mut StdRng::seed_from_u64(3), GlyphLayer::LetterExport, 15);
        assert_eq!(a, b);
    }

    #[test]
    fn test_background_declarations_stay_behind_content() {
        let mut rng = StdRng::seed_from_u64(1);
        let decls = Glyph::random(&mut rng, GlyphLayer::PageBackground).declarations();
        let get = |name: &str| decls.iter().find(|(k, _)| *k == name).map(|(_, v)| v.clone());
        assert_eq!(get("position").as_deref(), Some("fixed"));
        assert_eq!(get("z-index").as_deref(), Some("-1"));
        assert_eq!(get("pointer-events").as_deref(), Some("none"));
        assert!(get("left").unwrap().ends_with("vw"));
    }

    #[test]
    fn test_export_declarations_sit_under_text() {
        let mut rng = StdRng::seed_from_u64(2);
        let decls = Glyph::random(&mut rng, GlyphLayer::LetterExport).declarations();
        let get = |name: &str| decls.iter().find(|(k, _)| *k == name).map(|(_, v)| v.clone());
        assert_eq!(get("position").as_deref(), Some("absolute"));
        assert_eq!(get("z-index").as_deref(), Some("0"));
        assert!(get("font-size").unwrap().ends_with("px"));
        assert!(get("left").unwrap().ends_with('%'));
    }
}
