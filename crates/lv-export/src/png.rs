use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use lv_core::grid::IntensityGrid;

use crate::error::ExportError;

/// Encode la grille en PNG niveaux de gris 8 bits dans `writer`.
///
/// # Errors
/// Returns [`ExportError::DegenerateGrid`] for a zero-sized grid and
/// [`ExportError::Encode`] if the encoder fails.
pub fn encode_into<W: Write>(grid: &IntensityGrid, writer: W) -> Result<(), ExportError> {
    if grid.width == 0 || grid.height == 0 {
        return Err(ExportError::DegenerateGrid {
            width: grid.width,
            height: grid.height,
        });
    }
    PngEncoder::new(writer).write_image(
        &grid.data,
        grid.width,
        grid.height,
        ExtendedColorType::L8,
    )?;
    Ok(())
}

/// Encode the grid to an in-memory PNG.
///
/// The encoding is deterministic: the same grid always yields the same bytes.
///
/// # Errors
/// Same as [`encode_into`].
///
/// # Example
/// ```
/// use lv_core::grid::IntensityGrid;
/// let mut grid = IntensityGrid::new(2, 1);
/// grid.set(0, 0, 255);
/// let bytes = lv_export::encode_png(&grid).unwrap();
/// assert_eq!(&bytes[1..4], b"PNG");
/// ```
pub fn encode_png(grid: &IntensityGrid) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    encode_into(grid, &mut bytes)?;
    Ok(bytes)
}

/// Écrit la grille dans `path`, en écrasant tout fichier existant.
///
/// # Errors
/// Returns [`ExportError::Write`] if the file cannot be created or flushed,
/// plus the errors of [`encode_into`].
///
/// # Example
/// ```no_run
/// use lv_core::grid::IntensityGrid;
/// use std::path::Path;
/// let grid = IntensityGrid::new(4, 4);
/// lv_export::write_png(&grid, Path::new("level1.png")).unwrap();
/// ```
pub fn write_png(grid: &IntensityGrid, path: &Path) -> Result<(), ExportError> {
    // Refuse before touching the filesystem.
    if grid.width == 0 || grid.height == 0 {
        return Err(ExportError::DegenerateGrid {
            width: grid.width,
            height: grid.height,
        });
    }

    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::options()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    encode_into(grid, &mut writer)?;
    writer.flush().map_err(write_err)?;

    log::debug!(
        "PNG écrit : {} ({}×{})",
        path.display(),
        grid.width,
        grid.height
    );
    Ok(())
}
