use lv_core::config::OverflowPolicy;
use lv_core::error::CoreError;
use lv_core::grid::{IntensityGrid, TextLevel};

use crate::intensity::IntensityLut;

/// Convertit un `TextLevel` en grille d'intensités.
///
/// The grid is `rows × cols` of the level's bounding box. Each line fills
/// only its own length; cells past the end of a short line stay 0.
///
/// # Example
/// ```
/// use lv_core::config::OverflowPolicy;
/// use lv_core::grid::TextLevel;
/// use lv_raster::Rasterizer;
///
/// let raster = Rasterizer::new(OverflowPolicy::Saturate);
/// let grid = raster.rasterize(&TextLevel::parse("ab\nc\n")).unwrap();
/// assert_eq!((grid.height, grid.width), (3, 2));
/// assert_eq!(grid.row(1), &[99, 0]);
/// ```
pub struct Rasterizer {
    lut: IntensityLut,
}

impl Rasterizer {
    /// Build a rasterizer for the given overflow policy.
    #[must_use]
    pub fn new(policy: OverflowPolicy) -> Self {
        Self {
            lut: IntensityLut::new(policy),
        }
    }

    /// Rasterize one level.
    ///
    /// Degenerate levels (no column) produce an empty grid; the caller
    /// decides whether to persist it.
    ///
    /// # Errors
    /// Returns [`CoreError::ValueOverflow`] under [`OverflowPolicy::Reject`]
    /// and [`CoreError::InvalidDimensions`] if the level does not fit `u32`.
    pub fn rasterize(&self, level: &TextLevel) -> Result<IntensityGrid, CoreError> {
        let dims = level.dimensions();
        let mut grid = IntensityGrid::for_dims(dims)?;
        if dims.is_degenerate() {
            log::debug!("Grille dégénérée {}×{}", dims.rows, dims.cols);
            return Ok(grid);
        }

        for (row, (line, cells)) in level
            .lines()
            .iter()
            .zip(grid.data.chunks_exact_mut(dims.cols))
            .enumerate()
        {
            for (col, (ch, cell)) in line.chars().zip(cells.iter_mut()).enumerate() {
                *cell = self
                    .lut
                    .map(ch)
                    .ok_or(CoreError::ValueOverflow { ch, row, col })?;
            }
        }
        Ok(grid)
    }
}
