//! Comparison-table projection over the revealed steps.

use crate::arithmetic::SquareRelation;
use crate::steps::{ApproximationStep, Expression};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundKind {
    Lower,
    Upper,
}

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub step_index: usize,
    pub bound: BoundKind,
    pub value: String,
    pub square: String,
    pub comparison: SquareRelation,
    /// Whether the row belongs to the most recently revealed step.
    pub is_highlight: bool,
}

impl ComparisonRow {
    fn new(step_index: usize, bound: BoundKind, expr: &Expression, is_highlight: bool) -> Self {
        Self {
            step_index,
            bound,
            value: expr.value.clone(),
            square: expr.square.clone(),
            comparison: expr.comparison,
            is_highlight,
        }
    }
}

/// Lists a lower-bound row then an upper-bound row for each step in `0..=current_step`.
///
/// A cursor past the end of `steps` reveals the whole sequence.
pub fn generate_comparison_table(
    steps: &[ApproximationStep],
    current_step: usize,
) -> Vec<ComparisonRow> {
    let revealed = steps.iter().take(current_step.saturating_add(1));

    revealed
        .enumerate()
        .flat_map(|(i, step)| {
            let is_highlight = i == current_step;
            [
                ComparisonRow::new(i, BoundKind::Lower, &step.lower_expression, is_highlight),
                ComparisonRow::new(i, BoundKind::Upper, &step.upper_expression, is_highlight),
            ]
        })
        .collect()
}
