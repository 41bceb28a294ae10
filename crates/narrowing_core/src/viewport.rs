//! Number-line geometry for the current interval.
//!
//! Everything here is expressed in value space or in abstract pixels; the host decides
//! how to draw it.

use crate::steps::ApproximationStep;
use serde::{Deserialize, Serialize};

/// Smallest visible span of the number line, so narrow intervals stay readable.
pub const MIN_DISPLAY_WIDTH: f64 = 0.1;

/// Value range to show for `step`: twice the interval width around its centre, plus `padding`.
pub fn visual_bounds(step: &ApproximationStep, padding: f64) -> (f64, f64) {
    let center = step.center();
    let display_width = (step.width() * 2.0).max(MIN_DISPLAY_WIDTH);
    (
        center - display_width / 2.0 - padding,
        center + display_width / 2.0 + padding,
    )
}

/// Picks a 1/2/5-style tick spacing for a visible `range`.
pub fn tick_spacing(range: f64) -> Option<f64> {
    if !(range.is_finite() && range > 0.0) {
        return None;
    }
    let magnitude = 10f64.powf(range.log10().floor());
    let normalized = range / magnitude;

    let spacing = if normalized <= 2.0 {
        magnitude * 0.2
    } else if normalized <= 5.0 {
        magnitude * 0.5
    } else {
        magnitude
    };
    Some(spacing)
}

/// Tick values in `[min, max]`, each an exact multiple of the spacing.
pub fn ticks(min: f64, max: f64) -> Vec<f64> {
    let Some(spacing) = tick_spacing(max - min) else {
        return Vec::new();
    };
    let first = (min / spacing).ceil() as i64;
    let last = (max / spacing).floor() as i64;
    (first..=last).map(|k| k as f64 * spacing).collect()
}

/// Label for a tick, using as many decimals as the spacing needs (at most 3).
pub fn format_tick_label(value: f64, spacing: f64) -> String {
    if (value - value.round()).abs() < 1e-3 {
        return format!("{}", value.round() as i64);
    }
    let decimals = if spacing > 0.0 && spacing.is_finite() {
        (-spacing.log10().floor()).max(0.0) as usize
    } else {
        3
    };
    format!("{:.*}", decimals.min(3), value)
}

/// Maps values in `[min, max]` onto `[padding, width - padding]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberLine {
    pub min: f64,
    pub max: f64,
    pub width: f64,
    pub padding: f64,
}

impl NumberLine {
    pub fn new(min: f64, max: f64, width: f64, padding: f64) -> Self {
        Self {
            min,
            max,
            width,
            padding,
        }
    }

    /// Number line framing `step`, with `view_padding` in value space and `padding` in pixels.
    pub fn for_step(step: &ApproximationStep, view_padding: f64, width: f64, padding: f64) -> Self {
        let (min, max) = visual_bounds(step, view_padding);
        Self::new(min, max, width, padding)
    }

    pub fn scale_x(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return self.padding;
        }
        (value - self.min) / span * (self.width - 2.0 * self.padding) + self.padding
    }

    pub fn ticks(&self) -> Vec<f64> {
        ticks(self.min, self.max)
    }

    /// Tick positions paired with their labels.
    pub fn labelled_ticks(&self) -> Vec<(f64, String)> {
        let Some(spacing) = tick_spacing(self.max - self.min) else {
            return Vec::new();
        };
        self.ticks()
            .into_iter()
            .map(|value| (self.scale_x(value), format_tick_label(value, spacing)))
            .collect()
    }
}
