use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the core.
///
/// Recoverable conditions (a non-finite metric, a missing calibration file, an
/// empty reference folder) never show up here; they are reported through the
/// diagnostics on [`crate::SkinReport`], [`crate::CalibrationHandle`] and
/// [`crate::FitReport`].
#[derive(Error, Debug)]
pub enum SkinError {
    #[error("failed to decode image{}: {message}", path_suffix(.path))]
    Decode {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to persist calibration table: {0}")]
    Calibration(String),

    #[error("reference root {path} is not usable: {message}")]
    ReferenceRoot { path: PathBuf, message: String },

    #[error("invalid analysis config: {0}")]
    Config(String),
}

impl SkinError {
    /// True when the caller supplied something unusable (as opposed to an
    /// internal or environment failure).
    pub fn is_input_error(&self) -> bool {
        matches!(self, SkinError::Decode { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SkinError::Io {
            path: path.into(),
            source,
        }
    }
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" {}", p.display()),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, SkinError>;
