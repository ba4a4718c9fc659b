//! Error type for file-level meshcorr operations

use std::io;
use std::path::{Path, PathBuf};

use meshcorr_core::{CoreError, ErrorCategory};
use thiserror::Error;

/// Errors surfaced by reading and writing meshcorr files
///
/// The first error aborts the whole operation; targets being filled at the
/// time are left partially written.
#[derive(Debug, Error)]
pub enum MeshcorrError {
    /// Input path does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Read or write failure
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File content is not UTF-8 text
    #[error("{} is not valid UTF-8 text", .0.display())]
    Encoding(PathBuf),

    /// A record could not be interpreted
    #[error("Format error in {}: {error}", .path.display())]
    Format { path: PathBuf, error: CoreError },

    /// Internal storage invariant breached
    #[error("Structural violation: {0}")]
    Structural(CoreError),
}

impl MeshcorrError {
    /// Attach a path to a core error according to its category
    pub fn from_core(path: &Path, error: CoreError) -> Self {
        match error.category() {
            ErrorCategory::Format => MeshcorrError::Format {
                path: path.to_path_buf(),
                error,
            },
            ErrorCategory::Bounds | ErrorCategory::Structural => MeshcorrError::Structural(error),
        }
    }

    /// Map an `io::Error` from opening `path`, keeping not-found distinct
    pub fn from_open(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            MeshcorrError::NotFound(path.to_path_buf())
        } else {
            MeshcorrError::io(path, source)
        }
    }

    pub fn io(path: &Path, source: io::Error) -> Self {
        MeshcorrError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Source line for format errors
    pub fn line(&self) -> Option<usize> {
        match self {
            MeshcorrError::Format { error, .. } => error.line(),
            _ => None,
        }
    }
}

/// Result type for meshcorr file operations
pub type Result<T> = std::result::Result<T, MeshcorrError>;

/// Attach file context to core results
pub trait CoreResultExt<T> {
    fn in_file(self, path: &Path) -> Result<T>;
}

impl<T> CoreResultExt<T> for meshcorr_core::Result<T> {
    fn in_file(self, path: &Path) -> Result<T> {
        self.map_err(|error| MeshcorrError::from_core(path, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_by_category() {
        let path = Path::new("deck.bdf");
        let err = MeshcorrError::from_core(path, CoreError::MalformedNumber { line: 4, field: 3 });
        assert!(matches!(err, MeshcorrError::Format { .. }));
        assert_eq!(err.line(), Some(4));
        assert_eq!(
            err.to_string(),
            "Format error in deck.bdf: Malformed number in field 3 of record at line 4"
        );

        let err = MeshcorrError::from_core(path, CoreError::StructuralViolation { row: 0, col: 1 });
        assert!(matches!(err, MeshcorrError::Structural(_)));
    }

    #[test]
    fn test_open_errors() {
        let path = Path::new("missing.txt");
        let err = MeshcorrError::from_open(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, MeshcorrError::NotFound(_)));

        let err = MeshcorrError::from_open(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, MeshcorrError::Io { .. }));
    }
}
