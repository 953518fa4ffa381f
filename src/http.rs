//! JSON-over-fetch client for the two backend endpoints.
//!
//! Protocol:
//!   POST <endpoint> with `Content-Type: application/json`
//!   2xx: any JSON body
//!   non-2xx: JSON body carrying a `message` field

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::dom;
use crate::error::{describe_js, AppError, Result};

/// POST `body` as JSON and return the decoded JSON response.
///
/// One attempt only; no retry, no timeout.
pub async fn post_json<T: Serialize + ?Sized>(url: &str, body: &T) -> Result<Value> {
    let payload = serde_json::to_string(body).map_err(|e| AppError::Parse(e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&payload));

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| AppError::Network(format!("Request::new failed: {}", describe_js(&e))))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| AppError::dom("set header", e))?;

    let window = dom::window()?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| AppError::Network(format!("fetch failed: {}", describe_js(&e))))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| AppError::Network("response is not a Response".into()))?;

    let status = resp.status();
    let body = read_json(&resp).await;

    if !resp.ok() {
        // A non-JSON error body is a parse failure, as with any other body.
        let body = body?;
        return Err(AppError::Server {
            status,
            message: error_message(&body),
        });
    }

    body
}

async fn read_json(resp: &Response) -> Result<Value> {
    let promise = resp
        .json()
        .map_err(|e| AppError::Parse(format!("json() failed: {}", describe_js(&e))))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| AppError::Parse(describe_js(&e)))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| AppError::Parse(e.to_string()))
}

/// The `message` field of an error body, rendered the way JS template
/// interpolation would render it.
pub fn error_message(body: &Value) -> String {
    match body.get("message") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "undefined".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(&json!({"status": "error", "message": "Database error"})),
            "Database error"
        );
        assert_eq!(error_message(&json!({"message": 42})), "42");
        assert_eq!(error_message(&json!({"status": "error"})), "undefined");
    }
}
