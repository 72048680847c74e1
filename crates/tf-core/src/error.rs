use std::path::PathBuf;

use thiserror::Error;

/// Errors shared by every textify crate.
///
/// All variants are fatal to an invocation: nothing is retried and no
/// partial document is produced.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Unreadable source, corrupt container, or an image with no frames.
    #[error("Décodage impossible de {path} : {reason}")]
    Decode {
        /// Source that failed to decode.
        path: PathBuf,
        /// Underlying decoder message.
        reason: String,
    },

    /// Caller-supplied value rejected before any pixel work.
    #[error("Argument invalide : {0}")]
    InvalidArgument(String),

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Output could not be written.
    #[error("Écriture impossible vers {path}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Resampling failed.
    #[error("Redimensionnement impossible : {0}")]
    Resize(String),

    /// Pixel buffer does not match its declared dimensions.
    #[error("Dimensions invalides : {width}×{height} pour {len} octets")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
        /// Actual buffer length in bytes.
        len: usize,
    },
}
