//! The `narrowing_core` crate provides the engine behind the √2 number-line demo.
//! Everything here is pure and synchronous; the presentation layer owns rendering and timers.
//!
//! Key components:
//! - **Arithmetic**: the digit scan that narrows `[lower, upper]` by one decimal digit per step.
//! - **Steps**: display-ready `ApproximationStep` records (formatted bounds, squares, tags, text).
//! - **Table**: the comparison-table projection of the revealed steps.
//! - **Viewport**: number-line bounds, scale and ticks for the current interval.
//! - **Playback**: cursor and play/pause/speed state over an immutable step sequence.

pub mod arithmetic;
pub mod config;
pub mod error;
pub mod playback;
pub mod steps;
pub mod table;
pub mod viewport;

pub use arithmetic::{generate_approximation_bounds, Bounds, SquareRelation};
pub use config::NarrowingConfig;
pub use error::{NarrowingError, Result};
pub use steps::{generate_steps, ApproximationStep, Expression};
pub use table::{generate_comparison_table, BoundKind, ComparisonRow};
