//! Error types for the browser-facing edges of the crate.
//!
//! The simulation itself cannot fail; only mounting onto a page and talking
//! to the text-generation service can.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element #{0} is missing or not a canvas")]
    NotACanvas(String),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("invalid ink config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        MountError::Js(describe_js(&value))
    }
}

impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no window to fetch from")]
    NoWindow,
    #[error("request failed: {0}")]
    Request(String),
    #[error("service answered HTTP {0}")]
    Status(u16),
    #[error("response body was not text")]
    Body,
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<JsValue> for GenerationError {
    fn from(value: JsValue) -> Self {
        GenerationError::Request(describe_js(&value))
    }
}

/// Best-effort readable text for a thrown JS value.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(MountError::NotACanvas("ink".into()).to_string(), "element #ink is missing or not a canvas");
        assert_eq!(GenerationError::Status(503).to_string(), "service answered HTTP 503");
        let decode = serde_json::from_str::<u8>("x").unwrap_err();
        assert!(GenerationError::from(decode).to_string().starts_with("malformed json"));
    }
}
