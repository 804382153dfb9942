/// Shared types, errors and configuration for levelmap.
///
/// Every other crate in the workspace builds on the grid types defined here:
/// a `TextLevel` is measured into `GridDims`, rasterized into an
/// `IntensityGrid`, then persisted by `lv-export`.

pub mod config;
pub mod error;
pub mod grid;

pub use config::{ConvertConfig, OverflowPolicy};
pub use error::CoreError;
pub use grid::{GridDims, IntensityGrid, TextLevel};
