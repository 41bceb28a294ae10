//! Playback runner driven by the page's timer and controls.

use crate::shared::{checked_precision, js_error, to_js, TickMark};
use js_sys::Float64Array;
use narrowing_core::playback::{Action, PlayState, Playback};
use narrowing_core::viewport::NumberLine;
use narrowing_core::NarrowingConfig;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmPlayback {
    playback: Playback,
}

#[wasm_bindgen]
impl WasmPlayback {
    /// Builds a playback at the configured default precision.
    ///
    /// `config` may be `undefined`/`null` to use the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmPlayback, JsValue> {
        console_error_panic_hook::set_once();

        let config = if config.is_undefined() || config.is_null() {
            NarrowingConfig::default()
        } else {
            from_value(config).map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        let playback = Playback::new(config).map_err(js_error)?;
        Ok(WasmPlayback { playback })
    }

    pub fn play(&mut self) {
        self.playback.apply(Action::Play);
    }

    pub fn pause(&mut self) {
        self.playback.apply(Action::Pause);
    }

    /// Play when stopped, pause when playing (the space-bar binding).
    pub fn toggle_play(&mut self) {
        if self.playback.play_state == PlayState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn next_step(&mut self) {
        self.playback.apply(Action::NextStep);
    }

    pub fn prev_step(&mut self) {
        self.playback.apply(Action::PrevStep);
    }

    pub fn go_to_step(&mut self, step: u32) {
        self.playback.apply(Action::GoToStep(step as usize));
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.playback.apply(Action::SetSpeed(speed));
    }

    pub fn faster(&mut self) {
        self.playback.apply(Action::Faster);
    }

    pub fn slower(&mut self) {
        self.playback.apply(Action::Slower);
    }

    pub fn reset(&mut self) {
        self.playback.apply(Action::Reset);
    }

    pub fn toggle_table(&mut self) {
        self.playback.apply(Action::ToggleTable);
    }

    pub fn clear_announcements(&mut self) {
        self.playback.apply(Action::ClearAnnouncements);
    }

    /// Applies a tagged action object, e.g. `{ type: "go_to_step", value: 2 }`.
    pub fn dispatch(&mut self, action: JsValue) -> Result<(), JsValue> {
        let action: Action =
            from_value(action).map_err(|e| JsValue::from_str(&format!("Invalid action: {}", e)))?;
        self.playback.apply(action);
        Ok(())
    }

    /// Regenerates the sequence; the previous one stays in place if `precision` is rejected.
    pub fn set_precision(&mut self, precision: f64) -> Result<(), JsValue> {
        let requested = checked_precision(precision, self.playback.config()).map_err(js_error)?;
        self.playback.set_precision(requested).map_err(js_error)
    }

    pub fn current_step(&self) -> u32 {
        self.playback.current_step as u32
    }

    pub fn step_count(&self) -> u32 {
        self.playback.steps.len() as u32
    }

    pub fn is_playing(&self) -> bool {
        self.playback.play_state == PlayState::Playing
    }

    pub fn step_delay_ms(&self) -> f64 {
        self.playback.step_delay_ms()
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.playback)
    }

    pub fn comparison_table(&self) -> Result<JsValue, JsValue> {
        to_js(&self.playback.comparison_table())
    }

    /// `[min, max]` of the number line for the current step.
    pub fn visual_bounds(&self) -> Result<Float64Array, JsValue> {
        let (min, max) = self
            .playback
            .visual_bounds()
            .ok_or_else(|| JsValue::from_str("No current step"))?;
        Ok(Float64Array::from(&[min, max][..]))
    }

    /// Tick marks for a number line `width` pixels wide with `padding` pixels on each side.
    pub fn ticks(&self, width: f64, padding: f64) -> Result<JsValue, JsValue> {
        let step = self
            .playback
            .current()
            .ok_or_else(|| JsValue::from_str("No current step"))?;
        let line = NumberLine::for_step(step, self.playback.config().view_padding, width, padding);

        let marks: Vec<TickMark> = line
            .labelled_ticks()
            .into_iter()
            .map(|(x, label)| TickMark { x, label })
            .collect();
        to_js(&marks)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::WasmPlayback;
    use narrowing_core::table::ComparisonRow;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn playback() -> WasmPlayback {
        WasmPlayback::new(JsValue::UNDEFINED).expect("playback")
    }

    #[wasm_bindgen_test]
    fn steps_through_default_sequence() {
        let mut playback = playback();
        assert_eq!(playback.step_count(), 4);

        playback.toggle_play();
        assert!(playback.is_playing());
        playback.next_step();
        assert_eq!(playback.current_step(), 1);

        let rows: Vec<ComparisonRow> =
            from_value(playback.comparison_table().expect("table")).expect("decode");
        assert_eq!(rows.len(), 4);

        playback.toggle_play();
        assert!(!playback.is_playing());
    }

    #[wasm_bindgen_test]
    fn rejected_precision_keeps_sequence() {
        let mut playback = playback();
        let message = playback
            .set_precision(1.5)
            .err()
            .and_then(|err| err.as_string())
            .unwrap_or_default();
        assert!(message.contains("whole number"));
        assert_eq!(playback.step_count(), 4);

        playback.set_precision(5.0).expect("precision 5");
        assert_eq!(playback.step_count(), 6);
    }

    #[wasm_bindgen_test]
    fn speed_controls_scale_delay() {
        let mut playback = playback();
        playback.faster();
        playback.faster();
        playback.faster();
        playback.faster();
        assert_eq!(playback.step_delay_ms(), 400.0);
    }

    #[wasm_bindgen_test]
    fn visual_bounds_and_ticks_are_available() {
        let playback = playback();
        let bounds = playback.visual_bounds().expect("bounds").to_vec();
        assert_eq!(bounds.len(), 2);
        assert!(bounds[0] < 1.0 && bounds[1] > 2.0);
        assert!(playback.ticks(800.0, 40.0).is_ok());
    }
}
