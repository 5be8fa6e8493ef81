use std::path::PathBuf;

/// The primary error type for all operations in the `shrinkray` crate.
///
/// Only startup problems are fatal; everything past validation is handled
/// per item inside the scan and dispatch stages and surfaces as warnings on
/// the log queue instead.
#[derive(Debug)]
pub enum ResizeError {
    /// The root folder argument is empty, missing, or not a directory.
    InvalidRoot(PathBuf),

    /// An I/O error occurred, typically while reading a file or directory.
    /// Includes the path where the error happened.
    Io { source: std::io::Error, path: PathBuf },
}

impl std::fmt::Display for ResizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeError::InvalidRoot(path) => {
                write!(f, "Invalid root folder: '{}' is not a directory", path.display())
            }
            ResizeError::Io { source, path } => {
                write!(f, "I/O error on path '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ResizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResizeError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ResizeError {
    fn from(err: std::io::Error) -> Self {
        ResizeError::Io { source: err, path: PathBuf::new() } // Generic path
    }
}
