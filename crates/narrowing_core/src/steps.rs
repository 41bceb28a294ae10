//! Display-ready records for each narrowing step.

use crate::arithmetic::{
    compare_with_two, format_decimal, generate_approximation_bounds, Bounds, SquareRelation,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A bound rendered for display: its value, its square and how the square compares to 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub value: String,
    pub square: String,
    pub comparison: SquareRelation,
}

impl Expression {
    /// Formats `value` with `precision` fractional digits and its square with one more.
    ///
    /// The tag is computed from the unrounded square.
    pub fn new(value: f64, precision: usize) -> Self {
        let square = value * value;
        Self {
            value: format_decimal(value, precision),
            square: format_decimal(square, precision + 1),
            comparison: compare_with_two(square),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproximationStep {
    /// Position in the sequence, which is also the number of decimal digits fixed so far.
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
    pub lower_square: f64,
    pub upper_square: f64,
    pub lower_expression: Expression,
    pub upper_expression: Expression,
    pub description: String,
}

impl ApproximationStep {
    pub fn from_bounds(index: usize, bounds: &Bounds) -> Self {
        let lower_expression = Expression::new(bounds.lower, index);
        let upper_expression = Expression::new(bounds.upper, index);
        let description = describe(index, &lower_expression, &upper_expression);

        Self {
            index,
            lower: bounds.lower,
            upper: bounds.upper,
            lower_square: bounds.lower_square,
            upper_square: bounds.upper_square,
            lower_expression,
            upper_expression,
            description,
        }
    }

    pub fn precision(&self) -> usize {
        self.index
    }

    pub fn interval(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// The value reported as "√2 so far": the lower bound.
    pub fn approximation(&self) -> f64 {
        self.lower
    }

    pub fn is_exact(&self) -> bool {
        self.lower_expression.comparison == SquareRelation::Equal
    }
}

fn describe(index: usize, lower: &Expression, upper: &Expression) -> String {
    if lower.comparison == SquareRelation::Equal {
        return format!(
            "{}² = {} = 2, so √2 = {} exactly",
            lower.value, lower.square, lower.value
        );
    }

    if index == 0 {
        format!(
            "First, √2 lies in [{}, {}] because {}² = {} < 2 < {} = {}²",
            lower.value, upper.value, lower.value, lower.square, upper.square, upper.value
        )
    } else {
        format!(
            "Compare squares: {}² = {} {} 2 {} {} = {}², so √2 lies in [{}, {}]",
            lower.value,
            lower.square,
            lower.comparison.symbol(),
            upper.comparison.flipped().symbol(),
            upper.square,
            upper.value,
            lower.value,
            upper.value
        )
    }
}

/// Generates every step from precision 0 up to `max_precision`.
///
/// The returned sequence is complete and immutable; a different precision means a new call.
pub fn generate_steps(max_precision: i64) -> Result<Vec<ApproximationStep>> {
    let bounds = generate_approximation_bounds(max_precision)?;
    let steps: Vec<ApproximationStep> = bounds
        .iter()
        .enumerate()
        .map(|(index, bound)| ApproximationStep::from_bounds(index, bound))
        .collect();
    debug!(steps = steps.len(), "formatted approximation steps");
    Ok(steps)
}
