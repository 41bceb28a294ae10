use crate::arithmetic::{supported_precision, MAX_SUPPORTED_PRECISION};
use crate::error::{NarrowingError, Result};
use crate::steps::{generate_steps, ApproximationStep};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Settings shared by the engine and the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NarrowingConfig {
    pub min_precision: usize,
    pub max_precision: usize,
    pub default_precision: usize,
    pub min_speed: f64,
    pub max_speed: f64,
    pub default_speed: f64,
    pub speed_step: f64,
    /// Time spent on one step at 1× speed, in milliseconds.
    pub step_duration_ms: f64,
    /// Extra room on each side of the number line around the current interval.
    pub view_padding: f64,
}

impl Default for NarrowingConfig {
    fn default() -> Self {
        Self {
            min_precision: 2,
            max_precision: 6,
            default_precision: 3,
            min_speed: 0.25,
            max_speed: 2.0,
            default_speed: 1.0,
            speed_step: 0.25,
            step_duration_ms: 800.0,
            view_padding: 0.1,
        }
    }
}

impl NarrowingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_precision > self.max_precision {
            return Err(NarrowingError::InvalidConfig(format!(
                "min_precision ({}) must not exceed max_precision ({})",
                self.min_precision, self.max_precision
            )));
        }
        if self.max_precision > MAX_SUPPORTED_PRECISION {
            return Err(NarrowingError::InvalidConfig(format!(
                "max_precision ({}) exceeds the supported maximum of {}",
                self.max_precision, MAX_SUPPORTED_PRECISION
            )));
        }
        if !(self.min_precision..=self.max_precision).contains(&self.default_precision) {
            return Err(NarrowingError::InvalidConfig(format!(
                "default_precision ({}) must lie in {}..={}",
                self.default_precision, self.min_precision, self.max_precision
            )));
        }
        if !(self.min_speed.is_finite() && self.min_speed > 0.0) || self.min_speed > self.max_speed
        {
            return Err(NarrowingError::InvalidConfig(format!(
                "speed range {}..={} must be positive and ordered",
                self.min_speed, self.max_speed
            )));
        }
        if !(self.min_speed..=self.max_speed).contains(&self.default_speed) {
            return Err(NarrowingError::InvalidConfig(format!(
                "default_speed ({}) must lie in {}..={}",
                self.default_speed, self.min_speed, self.max_speed
            )));
        }
        if !(self.speed_step.is_finite() && self.speed_step > 0.0) {
            return Err(NarrowingError::InvalidConfig(
                "speed_step must be positive.".to_string(),
            ));
        }
        if !(self.step_duration_ms.is_finite() && self.step_duration_ms > 0.0) {
            return Err(NarrowingError::InvalidConfig(
                "step_duration_ms must be positive.".to_string(),
            ));
        }
        if !(self.view_padding.is_finite() && self.view_padding >= 0.0) {
            return Err(NarrowingError::InvalidConfig(
                "view_padding must be non-negative.".to_string(),
            ));
        }
        Ok(())
    }

    /// Accepts `requested` only if it lies in `min_precision..=max_precision`.
    pub fn check_precision(&self, requested: i64) -> Result<usize> {
        let precision = supported_precision(requested)?;
        if precision < self.min_precision || precision > self.max_precision {
            warn!(
                requested,
                min = self.min_precision,
                max = self.max_precision,
                "precision outside configured range"
            );
            return Err(NarrowingError::PrecisionOutOfRange {
                requested,
                min: self.min_precision,
                max: self.max_precision,
            });
        }
        Ok(precision)
    }

    /// Range-checked [`generate_steps`].
    pub fn generate_steps(&self, requested: i64) -> Result<Vec<ApproximationStep>> {
        let precision = self.check_precision(requested)?;
        generate_steps(precision as i64)
    }

    pub fn clamp_speed(&self, speed: f64) -> Result<f64> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(NarrowingError::InvalidSpeed(speed));
        }
        Ok(speed.clamp(self.min_speed, self.max_speed))
    }
}

/// Converts a precision received as a floating-point number (e.g. from JavaScript).
pub fn precision_from_f64(value: f64) -> Result<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(NarrowingError::NonIntegerPrecision(value));
    }
    if value < 0.0 {
        return Err(NarrowingError::NegativePrecision(value as i64));
    }
    if value > i64::MAX as f64 {
        return Err(NarrowingError::PrecisionTooLarge {
            requested: i64::MAX,
            max: MAX_SUPPORTED_PRECISION,
        });
    }
    Ok(value as i64)
}
