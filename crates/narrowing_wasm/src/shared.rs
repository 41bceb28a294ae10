//! Conversions shared by the bindings.

use narrowing_core::config::{precision_from_f64, NarrowingConfig};
use narrowing_core::Result;
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

pub(crate) fn to_js<T: Serialize>(value: &T) -> std::result::Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Validates a precision coming from JavaScript against the configured range.
pub(crate) fn checked_precision(value: f64, config: &NarrowingConfig) -> Result<i64> {
    let requested = precision_from_f64(value)?;
    config.check_precision(requested)?;
    Ok(requested)
}

/// A tick positioned in pixels, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct TickMark {
    pub x: f64,
    pub label: String,
}
