//! Digit-by-digit narrowing of the bracket around √2.
//!
//! Each step fixes one more decimal digit: starting from `[1, 2]`, the scan walks
//! the digits 0..=9 at the new place value, keeps the largest candidate whose square
//! stays below 2 and stops at the first candidate whose square overshoots.

use crate::error::{NarrowingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, warn};

/// The value whose square root is being bracketed.
pub const TARGET: f64 = 2.0;

/// Absolute band within which a square is classified as equal to the target.
pub const EQUALITY_TOLERANCE: f64 = 1e-10;

/// Largest number of decimal digits the engine will narrow to.
///
/// At 10 digits the upper bound `1.4142135624` squares to within `7.6e-11` of 2,
/// which falls inside [`EQUALITY_TOLERANCE`].
pub const MAX_SUPPORTED_PRECISION: usize = 9;

/// How a square relates to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareRelation {
    #[serde(rename = "< 2")]
    Below,
    #[serde(rename = "= 2")]
    Equal,
    #[serde(rename = "> 2")]
    Above,
}

impl SquareRelation {
    /// Comparison tag shown next to a square, e.g. `"< 2"`.
    pub fn tag(self) -> &'static str {
        match self {
            SquareRelation::Below => "< 2",
            SquareRelation::Equal => "= 2",
            SquareRelation::Above => "> 2",
        }
    }

    /// The same relation read from the target's side, e.g. `x² > 2` as `2 < x²`.
    pub fn flipped(self) -> Self {
        match self {
            SquareRelation::Below => SquareRelation::Above,
            SquareRelation::Equal => SquareRelation::Equal,
            SquareRelation::Above => SquareRelation::Below,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            SquareRelation::Below => "<",
            SquareRelation::Equal => "=",
            SquareRelation::Above => ">",
        }
    }
}

impl fmt::Display for SquareRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One bracketing interval together with the squares of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
    pub lower_square: f64,
    pub upper_square: f64,
}

impl Bounds {
    /// Builds the record, recomputing both squares from the endpoints.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            lower_square: lower * lower,
            upper_square: upper * upper,
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Classifies `square` against 2 using [`EQUALITY_TOLERANCE`].
pub fn compare_with_two(square: f64) -> SquareRelation {
    compare_square(square, TARGET)
}

fn compare_square(square: f64, target: f64) -> SquareRelation {
    let diff = square - target;
    if diff.abs() < EQUALITY_TOLERANCE {
        SquareRelation::Equal
    } else if diff < 0.0 {
        SquareRelation::Below
    } else {
        SquareRelation::Above
    }
}

/// Checks that `requested` is a precision the engine can narrow to.
pub fn supported_precision(requested: i64) -> Result<usize> {
    if requested < 0 {
        warn!(requested, "rejecting negative precision");
        return Err(NarrowingError::NegativePrecision(requested));
    }
    if requested > MAX_SUPPORTED_PRECISION as i64 {
        warn!(requested, "rejecting precision beyond f64 resolution");
        return Err(NarrowingError::PrecisionTooLarge {
            requested,
            max: MAX_SUPPORTED_PRECISION,
        });
    }
    Ok(requested as usize)
}

/// Generates the nested bracketing intervals for steps `0..=max_precision`.
///
/// The result always has `max_precision + 1` entries; invalid input is rejected
/// before any interval is computed.
pub fn generate_approximation_bounds(max_precision: i64) -> Result<Vec<Bounds>> {
    let digits = supported_precision(max_precision)?;
    debug!(max_precision = digits, "generating approximation bounds");
    let bounds = narrow_towards(TARGET, digits);
    debug!(steps = bounds.len(), "approximation bounds generated");
    Ok(bounds)
}

/// Runs the digit scan for `sqrt(target)`, assuming `1 <= target <= 4`.
fn narrow_towards(target: f64, digits: usize) -> Vec<Bounds> {
    let mut lower = 1.0_f64;
    let mut upper = 2.0_f64;

    let mut bounds = Vec::with_capacity(digits + 1);
    bounds.push(Bounds::new(lower, upper));

    for step in 1..=digits {
        let step_size = 10f64.powi(-(step as i32));

        let mut next_lower = lower;
        let mut next_upper = upper;

        // Below keeps scanning; the first overshoot (or an exact hit) ends it.
        for digit in 0..=9u8 {
            let candidate = lower + f64::from(digit) * step_size;
            match compare_square(candidate * candidate, target) {
                SquareRelation::Below => next_lower = candidate,
                SquareRelation::Above => {
                    next_upper = candidate;
                    break;
                }
                SquareRelation::Equal => {
                    next_lower = candidate;
                    next_upper = candidate;
                    break;
                }
            }
        }

        lower = next_lower;
        upper = next_upper;
        trace!(step, lower, upper, "narrowed interval");

        bounds.push(Bounds::new(lower, upper));
    }

    bounds
}

/// Renders `value` with exactly `digits` fractional digits.
pub fn format_decimal(value: f64, digits: usize) -> String {
    format!("{:.*}", digits, value)
}
