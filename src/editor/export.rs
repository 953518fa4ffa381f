//! Download-as-image.
//!
//! The letter is copied into an off-screen container styled like the
//! editable region, decorated, rasterized by the page's `html2canvas`
//! global, encoded as JPEG and handed to the browser as a download.
//! The container is always removed once rasterization settles.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlAnchorElement, HtmlCanvasElement, HtmlElement};

use super::placeholder::is_visually_empty;
use crate::config::AppConfig;
use crate::decor::{self, GlyphLayer};
use crate::dom;
use crate::error::{describe_js, AppError, Result};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = html2canvas)]
    fn html2canvas(
        element: &HtmlElement,
        options: &JsValue,
    ) -> std::result::Result<js_sys::Promise, JsValue>;
}

/// Computed properties copied from the region onto the container.
const COPIED_STYLES: &[&str] = &[
    "padding",
    "font-family",
    "font-size",
    "text-align",
    "color",
    "box-sizing",
    "line-height",
    "white-space",
    "border",
    "border-radius",
];

/// Options passed to `html2canvas`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterOptions {
    pub scale: f64,
    pub logging: bool,
    #[serde(rename = "useCORS")]
    pub use_cors: bool,
    /// `null` lets the container's own background through.
    pub background_color: Option<String>,
}

impl RasterOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            scale: config.raster_scale,
            logging: config.raster_logging,
            use_cors: true,
            background_color: None,
        }
    }

    fn to_js(&self) -> Result<JsValue> {
        let serializer = serde_wasm_bindgen::Serializer::new().serialize_missing_as_null(true);
        self.serialize(&serializer)
            .map_err(|e| AppError::Render(format!("options: {}", e)))
    }
}

/// Markup to bake into the image; visually empty drafts render blank.
pub fn export_markup(draft: &str) -> &str {
    if is_visually_empty(draft) {
        ""
    } else {
        draft
    }
}

/// Build the off-screen copy of `region`. Not yet attached to the document.
fn build_container(
    document: &Document,
    region: &HtmlElement,
    config: &AppConfig,
) -> Result<HtmlElement> {
    let container: HtmlElement = dom::create(document, "div")?;
    dom::set_styles(
        &container,
        &[
            ("position", "absolute".to_string()),
            ("left", "-9999px".into()),
            ("top", "-9999px".into()),
            ("width", format!("{}px", region.offset_width())),
            ("min-height", format!("{}px", region.offset_height())),
            ("background-color", "white".into()),
        ],
    )?;

    let computed = dom::window()?
        .get_computed_style(region)
        .map_err(|e| AppError::dom("getComputedStyle", e))?;
    if let Some(computed) = computed {
        for property in COPIED_STYLES {
            if let Ok(value) = computed.get_property_value(property) {
                let _ = container.style().set_property(property, &value);
            }
        }
    }

    container.set_inner_html(export_markup(&region.inner_html()));

    let mut rng = rand::thread_rng();
    for glyph in decor::scatter(&mut rng, GlyphLayer::LetterExport, config.export_glyphs) {
        container
            .append_child(&glyph.to_element(document)?.into())
            .map_err(|e| AppError::dom("appendChild", e))?;
    }
    Ok(container)
}

async fn rasterize(container: &HtmlElement, options: &RasterOptions) -> Result<HtmlCanvasElement> {
    let promise = html2canvas(container, &options.to_js()?)
        .map_err(|e| AppError::Render(describe_js(&e)))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| AppError::Render(describe_js(&e)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| AppError::Render("html2canvas did not return a canvas".into()))
}

fn download(document: &Document, body: &HtmlElement, href: &str, file_name: &str) -> Result<()> {
    let link: HtmlAnchorElement = dom::create(document, "a")?;
    link.set_download(file_name);
    link.set_href(href);
    body.append_child(&link)
        .map_err(|e| AppError::dom("appendChild", e))?;
    link.click();
    link.remove();
    Ok(())
}

/// Render the letter in `region` to a JPEG and trigger its download.
pub async fn export_letter(region: &HtmlElement, config: &AppConfig) -> Result<()> {
    let document = dom::document()?;
    let body = dom::body()?;

    let container = build_container(&document, region, config)?;
    body.append_child(&container)
        .map_err(|e| AppError::dom("appendChild", e))?;

    let rendered = rasterize(&container, &RasterOptions::from_config(config)).await;
    container.remove();

    let canvas = rendered?;
    let quality = JsValue::from_f64(config.jpeg_quality());
    let image = canvas
        .to_data_url_with_type_and_encoder_options("image/jpeg", &quality)
        .map_err(|e| AppError::Render(format!("toDataURL: {}", describe_js(&e))))?;
    download(&document, &body, &image, &config.export_file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_draft_exports_blank() {
        assert_eq!(export_markup("<br>"), "");
        assert_eq!(export_markup("  "), "");
        assert_eq!(export_markup("<b>Dear you</b>"), "<b>Dear you</b>");
    }

    #[test]
    fn test_raster_options_shape() {
        let options = RasterOptions::from_config(&AppConfig::default());
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["scale"], 2.0);
        assert_eq!(json["useCORS"], true);
        assert_eq!(json["logging"], true);
        assert!(json["backgroundColor"].is_null());
    }
}
