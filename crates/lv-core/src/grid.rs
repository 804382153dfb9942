use std::path::Path;

use crate::error::CoreError;

/// Contenu textuel d'un niveau, découpé en lignes.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line. A trailing terminator
/// yields a trailing empty line, so `"ab\n"` has two lines and the empty
/// string has exactly one.
///
/// # Example
/// ```
/// use lv_core::grid::TextLevel;
/// let level = TextLevel::parse("111\n555\n");
/// assert_eq!(level.lines(), ["111", "555", ""]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLevel {
    lines: Vec<String>,
}

impl TextLevel {
    /// Split raw text into lines.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    lines.push(std::mem::take(&mut current));
                }
                '\n' => lines.push(std::mem::take(&mut current)),
                _ => current.push(ch),
            }
        }
        lines.push(current);
        Self { lines }
    }

    /// Lit un fichier texte complet et le découpe en lignes.
    ///
    /// # Errors
    /// Returns [`CoreError::Read`] if the file cannot be read and
    /// [`CoreError::Encoding`] if it is not valid UTF-8.
    pub fn read(path: &Path) -> Result<Self, CoreError> {
        let bytes = std::fs::read(path).map_err(|source| CoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|e| CoreError::Encoding {
            path: path.to_path_buf(),
            valid_up_to: e.utf8_error().valid_up_to(),
        })?;
        Ok(Self::parse(&text))
    }

    /// Lines in file order, without terminators.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Bounding dimensions: line count and longest line in chars.
    ///
    /// # Example
    /// ```
    /// use lv_core::grid::TextLevel;
    /// let dims = TextLevel::parse("ab\nc\n").dimensions();
    /// assert_eq!((dims.rows, dims.cols), (3, 2));
    /// ```
    #[must_use]
    pub fn dimensions(&self) -> GridDims {
        GridDims {
            rows: self.lines.len(),
            cols: self
                .lines
                .iter()
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0),
        }
    }
}

/// Dimensions d'une grille : (lignes, colonnes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    /// Number of lines.
    pub rows: usize,
    /// Length of the longest line, in chars.
    pub cols: usize,
}

impl GridDims {
    /// True when the grid has no cell at all.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

/// Grille d'intensités 8 bits, row-major. Initialisée à zéro.
///
/// # Example
/// ```
/// use lv_core::grid::IntensityGrid;
/// let mut grid = IntensityGrid::new(3, 2);
/// grid.set(2, 1, 255);
/// assert_eq!(grid.get(2, 1), 255);
/// assert_eq!(grid.row(0), &[0, 0, 0]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntensityGrid {
    /// Pixels, one byte each, row-major.
    pub data: Vec<u8>,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
}

impl IntensityGrid {
    /// Crée une grille pré-allouée remplie de zéros.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Allocate a zeroed grid for the given dimensions.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if either side exceeds `u32`.
    pub fn for_dims(dims: GridDims) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidDimensions {
            rows: dims.rows,
            cols: dims.cols,
        };
        let width = u32::try_from(dims.cols).map_err(|_| invalid())?;
        let height = u32::try_from(dims.rows).map_err(|_| invalid())?;
        Ok(Self::new(width, height))
    }

    /// Dimensions as (rows, cols).
    #[must_use]
    pub fn dims(&self) -> GridDims {
        GridDims {
            rows: self.height as usize,
            cols: self.width as usize,
        }
    }

    /// Set the cell at column `x`, row `y`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        debug_assert!(x < self.width && y < self.height, "cell out of bounds");
        self.data[y as usize * self.width as usize + x as usize] = value;
    }

    /// Cell at column `x`, row `y`.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Mutable slice of row `y`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &mut self.data[start..start + w]
    }

    /// Slice of row `y`.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }
}
