//! Stateless step generation and table projection.

use crate::shared::{checked_precision, js_error, to_js};
use narrowing_core::steps::ApproximationStep;
use narrowing_core::NarrowingConfig;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

/// Generates the full step sequence for `max_precision` decimal digits.
///
/// The precision must be a whole number inside the default configured range.
#[wasm_bindgen]
pub fn generate_steps(max_precision: f64) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let config = NarrowingConfig::default();
    let precision = checked_precision(max_precision, &config).map_err(js_error)?;
    let steps = narrowing_core::generate_steps(precision).map_err(js_error)?;

    to_js(&steps)
}

#[wasm_bindgen]
pub fn generate_comparison_table(steps: JsValue, current_step: u32) -> Result<JsValue, JsValue> {
    let steps: Vec<ApproximationStep> = from_value(steps)
        .map_err(|e| JsValue::from_str(&format!("Invalid steps: {}", e)))?;
    let rows = narrowing_core::generate_comparison_table(&steps, current_step as usize);

    to_js(&rows)
}

#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    to_js(&NarrowingConfig::default())
}
