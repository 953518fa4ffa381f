//! Error types for the letterbox front-end
//!
//! This module provides the error taxonomy with:
//! - Detailed error variants for the DOM, network and rendering failure modes
//! - Error codes for programmatic handling
//! - User-friendly messages for the alert paths
//!
//! Fingerprint probe failures are not errors: a probe that fails yields `None`
//! and the collector substitutes a sentinel.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // DOM errors (1xx)
    DomUnavailable = 100,
    ElementMissing = 101,

    // Network errors (2xx)
    NetworkFailed = 200,
    ServerRejected = 201,
    ResponseParse = 202,

    // Input errors (3xx)
    ValidationFailed = 300,

    // Rendering errors (4xx)
    RenderFailed = 400,

    // Configuration errors (5xx)
    ConfigInvalid = 500,
}

/// A user input gate that blocked an editor or email-form transition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("letter is empty")]
    EmptyLetter,

    #[error("sender or recipient address is missing")]
    MissingAddress,

    #[error("sender or recipient address is malformed")]
    InvalidAddress,

    #[error("email form is not open")]
    FormClosed,
}

impl ValidationError {
    /// Text shown in the blocking alert.
    pub fn alert_text(&self) -> &'static str {
        match self {
            ValidationError::EmptyLetter => "Please write your letter before sending.",
            ValidationError::MissingAddress => "Please fill in both email fields.",
            ValidationError::InvalidAddress => "Please enter valid email addresses.",
            ValidationError::FormClosed => "Open the email form before sending.",
        }
    }
}

/// Main error type
#[derive(Error, Debug, Clone)]
pub enum AppError {
    // ===== DOM Errors =====
    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Missing element: #{0}")]
    MissingElement(String),

    // ===== Network Errors =====
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error! status: {status}, Message: {message}")]
    Server { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    // ===== Input Errors =====
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    // ===== Rendering Errors =====
    #[error("Render error: {0}")]
    Render(String),

    // ===== Configuration Errors =====
    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    /// Wrap a thrown JS value with the operation that threw it.
    pub fn dom(context: &str, err: JsValue) -> Self {
        AppError::Dom(format!("{}: {}", context, describe_js(&err)))
    }

    /// Get the error code for programmatic handling
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Dom(_) => ErrorCode::DomUnavailable,
            AppError::MissingElement(_) => ErrorCode::ElementMissing,
            AppError::Network(_) => ErrorCode::NetworkFailed,
            AppError::Server { .. } => ErrorCode::ServerRejected,
            AppError::Parse(_) => ErrorCode::ResponseParse,
            AppError::Validation(_) => ErrorCode::ValidationFailed,
            AppError::Render(_) => ErrorCode::RenderFailed,
            AppError::Config(_) => ErrorCode::ConfigInvalid,
        }
    }

    /// Get a user-friendly message for display
    pub fn user_message(&self) -> String {
        match self {
            AppError::Dom(_) | AppError::MissingElement(_) => {
                "The page did not load correctly. Please reload and try again.".into()
            }
            AppError::Network(_) => {
                "A network error occurred. Please check your internet connection.".into()
            }
            AppError::Server { message, .. } => {
                format!("The server refused the request: {}", message)
            }
            AppError::Parse(_) => "The server sent an unexpected response.".into(),
            AppError::Validation(v) => v.alert_text().into(),
            AppError::Render(_) => "An error occurred while generating the letter image.".into(),
            AppError::Config(_) => "Invalid configuration.".into(),
        }
    }

    /// Whether the details are meaningful to the person using the page.
    ///
    /// DOM and configuration failures are the page author's problem; the
    /// alert paths replace them with a generic message.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            AppError::Network(_)
                | AppError::Server { .. }
                | AppError::Parse(_)
                | AppError::Validation(_)
                | AppError::Render(_)
        )
    }
}

/// Best-effort text for a thrown JS value (Error objects, strings, anything else).
pub fn describe_js(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Ok(message) = js_sys::Reflect::get(err, &JsValue::from_str("message")) {
        if let Some(s) = message.as_string() {
            return s;
        }
    }
    format!("{:?}", err)
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        serde_wasm_bindgen::to_value(&ErrorInfo::from(&err))
            .unwrap_or_else(|_| JsValue::from_str(&err.to_string()))
    }
}

/// Error information for JavaScript consumption
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    pub code: u32,
    pub message: String,
    pub user_message: String,
    pub is_user_visible: bool,
}

impl From<&AppError> for ErrorInfo {
    fn from(err: &AppError) -> Self {
        ErrorInfo {
            code: err.code() as u32,
            message: err.to_string(),
            user_message: err.user_message(),
            is_user_visible: err.is_user_visible(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Network("down".into()).code(), ErrorCode::NetworkFailed);
        assert_eq!(
            AppError::Server { status: 500, message: "boom".into() }.code(),
            ErrorCode::ServerRejected
        );
        assert_eq!(
            AppError::from(ValidationError::EmptyLetter).code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(AppError::Render("x".into()).code(), ErrorCode::RenderFailed);
    }

    #[test]
    fn test_server_error_combines_status_and_message() {
        let err = AppError::Server { status: 400, message: "Request must be JSON".into() };
        assert_eq!(
            err.to_string(),
            "HTTP error! status: 400, Message: Request must be JSON"
        );
        assert!(err.user_message().contains("Request must be JSON"));
    }

    #[test]
    fn test_validation_user_message_matches_alert() {
        for v in [
            ValidationError::EmptyLetter,
            ValidationError::MissingAddress,
            ValidationError::InvalidAddress,
            ValidationError::FormClosed,
        ] {
            assert_eq!(AppError::from(v).user_message(), v.alert_text());
        }
    }

    #[test]
    fn test_user_visibility() {
        assert!(AppError::Server { status: 500, message: "x".into() }.is_user_visible());
        assert!(AppError::Network("down".into()).is_user_visible());
        assert!(AppError::Parse("bad".into()).is_user_visible());
        assert!(AppError::from(ValidationError::MissingAddress).is_user_visible());
        assert!(AppError::Render("x".into()).is_user_visible());
        assert!(!AppError::Dom("no body".into()).is_user_visible());
        assert!(!AppError::MissingElement("letterContent".into()).is_user_visible());
        assert!(!AppError::Config("bad".into()).is_user_visible());
    }

    #[test]
    fn test_error_info() {
        let err = AppError::Server { status: 400, message: "Request must be JSON".into() };
        let info = ErrorInfo::from(&err);
        assert_eq!(info.code, 201);
        assert_eq!(info.message, err.to_string());
        assert!(info.is_user_visible);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["userMessage"], "The server refused the request: Request must be JSON");
        assert_eq!(json["isUserVisible"], true);
    }
}
