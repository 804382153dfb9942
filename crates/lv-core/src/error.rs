use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input file could not be read.
    #[error("Lecture impossible : {}", path.display())]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid UTF-8 text.
    #[error("Texte non UTF-8 dans {} (valide jusqu'à l'octet {valid_up_to})", path.display())]
    Encoding {
        /// Path of the offending file.
        path: PathBuf,
        /// Byte offset of the first invalid sequence.
        valid_up_to: usize,
    },

    /// Grid has zero rows or zero columns.
    #[error("Grille dégénérée : {rows}×{cols}")]
    DegenerateGrid {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// A character's code point does not fit in an 8-bit pixel.
    #[error("Caractère {ch:?} (U+{:04X}) hors de la plage 8 bits en ({row}, {col})", u32::from(*ch))]
    ValueOverflow {
        /// Offending character.
        ch: char,
        /// Line index.
        row: usize,
        /// Character index within the line.
        col: usize,
    },

    /// Grid dimensions do not fit the image layer.
    #[error("Dimensions invalides : {rows}×{cols}")]
    InvalidDimensions {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}
