use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the export module.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Une image PNG ne peut pas avoir de côté nul.
    #[error("Grille dégénérée, rien à écrire : {width}×{height}")]
    DegenerateGrid {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// Destination not writable.
    #[error("Écriture impossible : {}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// PNG encoder failure.
    #[error("Erreur d'encodage PNG : {0}")]
    Encode(#[from] image::ImageError),
}
