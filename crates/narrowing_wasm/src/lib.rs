//! WASM bindings for the narrowing core.
//!
//! `sequence` exposes the stateless entry points (step generation and the comparison
//! table); `playback` wraps the cursor/state machine the page drives from its timer.

mod playback;
mod sequence;
mod shared;

pub use playback::WasmPlayback;
pub use sequence::{default_config, generate_comparison_table, generate_steps};
