//! # Letterbox WASM
//!
//! Front-end for the anonymous letter page, compiled to WebAssembly.
//!
//! ## Architecture
//!
//! ```text
//! mount()  (page load)
//!   ├─ Fingerprint collector ─▶ POST /register      (fire-and-forget)
//!   ├─ Letter editor
//!   │    ├─ toolbar / placeholder
//!   │    ├─ email form ─────────▶ POST /send-email
//!   │    └─ image export ───────▶ html2canvas ─▶ download
//!   └─ Decorative background
//! ```
//!
//! ## Usage
//!
//! ```javascript
//! import init, { mount } from './pkg/letterbox_wasm.js';
//! await init();
//! mount();                                  // stock page
//! mount({ registerEndpoint: '/api/reg' });  // override a few settings
//! ```
//!
//! The two flows share nothing but the load handler.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub mod config;
pub mod decor;
pub mod dom;
pub mod editor;
mod error;
pub mod fingerprint;
pub mod http;
pub mod session;

pub use config::{AppConfig, ElementIds};
pub use editor::email::{EmailFlow, EmailRequest, EmailState};
pub use editor::Editor;
pub use error::{AppError, ErrorCode, ErrorInfo, Result, ValidationError};
pub use fingerprint::{FingerprintRecord, SignalProbe};
pub use session::{BehaviorMetrics, SessionState};

/// Initialize the module
///
/// This sets up logging.
#[wasm_bindgen(start)]
pub fn init() {
    if console_log::init_with_level(log::Level::Debug).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
    log::info!("letterbox initialized");
}

/// Mount the page.
///
/// Runs immediately when the document has finished loading, otherwise on
/// the window `load` event. Options are a JS object deserialized into
/// [`AppConfig`]; missing or malformed options fall back to defaults.
#[wasm_bindgen]
pub fn mount(options: JsValue) -> std::result::Result<(), JsValue> {
    let config = AppConfig::from_js(options).unwrap_or_else(|e| {
        log::warn!("{} [{:?}], using defaults", e, e.code());
        AppConfig::default()
    });
    log::set_max_level(config.log_level());
    let config = Rc::new(config);

    let document = dom::document()?;
    if dom::read_string(&document, "readyState").as_deref() == Some("complete") {
        on_load(config);
        return Ok(());
    }

    let window = dom::window()?;
    let pending = std::cell::Cell::new(Some(config));
    dom::listen(&window, "load", move |_| {
        if let Some(config) = pending.take() {
            on_load(config);
        }
    })?;
    Ok(())
}

/// The page-load handler: start both flows. Failures in one do not stop the other.
fn on_load(config: Rc<AppConfig>) {
    if config.collect_fingerprint {
        if let Err(e) = start_fingerprint(&config) {
            log::error!("fingerprint flow not started: {}", e);
        }
    }

    if let Err(e) = Editor::mount(config.clone()) {
        log::warn!("editor not mounted: {}", e);
    }

    if config.decorate_background {
        if let Err(e) = decor::decorate_background(config.background_glyphs) {
            log::warn!("background not decorated: {}", e);
        }
    }
}

fn start_fingerprint(config: &AppConfig) -> Result<()> {
    let session = Rc::new(SessionState::new());
    fingerprint::track_interactions(&dom::document()?, session.clone())?;
    let record = FingerprintRecord::collect();
    fingerprint::submit::submit(record, session, config.register_endpoint.clone());
    Ok(())
}
