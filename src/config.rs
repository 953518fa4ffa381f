//! Page configuration.
//!
//! Every field has a default matching the stock letter page, so the host
//! page can call `mount()` with no options or override just a few:
//!
//! ```javascript
//! mount({ registerEndpoint: '/api/register', backgroundGlyphs: 40 });
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::{AppError, Result};

/// DOM ids (and one selector) the editor binds to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub letter_content: String,
    pub bold_button: String,
    pub italic_button: String,
    pub underline_button: String,
    pub send_button: String,
    pub download_button: String,
    pub email_form: String,
    pub sender_email: String,
    pub recipient_email: String,
    pub send_email_button: String,
    pub cancel_email_button: String,
    /// CSS selector, not an id.
    pub actions_row: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            letter_content: "letterContent".into(),
            bold_button: "boldBtn".into(),
            italic_button: "italicBtn".into(),
            underline_button: "underlineBtn".into(),
            send_button: "sendBtn".into(),
            download_button: "downloadBtn".into(),
            email_form: "emailForm".into(),
            sender_email: "senderEmail".into(),
            recipient_email: "recipientEmail".into(),
            send_email_button: "sendEmailBtn".into(),
            cancel_email_button: "cancelEmailBtn".into(),
            actions_row: ".actions-row".into(),
        }
    }
}

/// Configuration for the whole page.
/// All features are enabled by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    // Endpoints
    pub register_endpoint: String,
    pub send_email_endpoint: String,
    // Feature toggles
    pub collect_fingerprint: bool,
    pub decorate_background: bool,
    // Decoration
    pub background_glyphs: usize,
    pub export_glyphs: usize,
    // Image export
    pub export_file_name: String,
    pub export_quality: f64,
    pub raster_scale: f64,
    pub raster_logging: bool,
    // Logging
    pub log_level: String,
    pub elements: ElementIds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            register_endpoint: "/register".into(),
            send_email_endpoint: "/send-email".into(),
            collect_fingerprint: true,
            decorate_background: true,
            background_glyphs: 80,
            export_glyphs: 15,
            export_file_name: "sua-carta-anonima.jpg".into(),
            export_quality: 0.9,
            raster_scale: 2.0,
            raster_logging: true,
            log_level: "info".into(),
            elements: ElementIds::default(),
        }
    }
}

impl AppConfig {
    /// Read the options object passed to `mount`. `undefined` and `null`
    /// mean defaults; anything that does not deserialize is a config error.
    pub fn from_js(options: JsValue) -> Result<Self> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(options).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Parsed log level; unknown names fall back to `Info`.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// JPEG quality clamped to the range the canvas encoder accepts.
    pub fn jpeg_quality(&self) -> f64 {
        self.export_quality.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_page() {
        let config = AppConfig::default();
        assert_eq!(config.register_endpoint, "/register");
        assert_eq!(config.send_email_endpoint, "/send-email");
        assert_eq!(config.background_glyphs, 80);
        assert_eq!(config.export_glyphs, 15);
        assert_eq!(config.raster_scale, 2.0);
        assert_eq!(config.elements.letter_content, "letterContent");
        assert_eq!(config.elements.actions_row, ".actions-row");
    }

    #[test]
    fn test_partial_override() {
        let config: AppConfig = serde_json::from_str(
            r#"{"registerEndpoint": "/api/register", "elements": {"boldButton": "b"}}"#,
        )
        .unwrap();
        assert_eq!(config.register_endpoint, "/api/register");
        assert_eq!(config.send_email_endpoint, "/send-email");
        assert_eq!(config.elements.bold_button, "b");
        assert_eq!(config.elements.italic_button, "italicBtn");
    }

    #[test]
    fn test_log_level_fallback() {
        let mut config = AppConfig::default();
        config.log_level = "debug".into();
        assert_eq!(config.log_level(), LevelFilter::Debug);
        config.log_level = "chatty".into();
        assert_eq!(config.log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_quality_clamped() {
        let mut config = AppConfig::default();
        config.export_quality = 3.0;
        assert_eq!(config.jpeg_quality(), 1.0);
    }
}
