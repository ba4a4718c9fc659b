//! Whole-file text loading
//!
//! Files are read completely before any parsing starts. With the `mmap`
//! feature the file is memory-mapped instead of copied.

use std::fs::File;
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;

use crate::error::{MeshcorrError, Result};

/// Text content of a file, validated as UTF-8
pub struct SourceText {
    inner: Inner,
}

enum Inner {
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
    Owned(String),
}

impl SourceText {
    /// Load `path` completely; the handle is closed before returning
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| MeshcorrError::from_open(path, e))?;
        let len = file
            .metadata()
            .map_err(|e| MeshcorrError::io(path, e))?
            .len();
        if len == 0 {
            return Ok(Self::from_string(String::new()));
        }
        Self::read_file(path, file)
    }

    #[cfg(feature = "mmap")]
    fn read_file(path: &Path, file: File) -> Result<Self> {
        // SAFETY: the mapping is read-only and only viewed as validated UTF-8;
        // concurrent truncation of the file by another process is not supported.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| MeshcorrError::io(path, e))?;
        if std::str::from_utf8(&mmap).is_err() {
            return Err(MeshcorrError::Encoding(path.to_path_buf()));
        }
        Ok(Self {
            inner: Inner::Mapped(mmap),
        })
    }

    #[cfg(not(feature = "mmap"))]
    fn read_file(path: &Path, mut file: File) -> Result<Self> {
        use std::io::Read;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| MeshcorrError::io(path, e))?;
        let text =
            String::from_utf8(bytes).map_err(|_| MeshcorrError::Encoding(path.to_path_buf()))?;
        Ok(Self::from_string(text))
    }

    pub fn from_string(text: String) -> Self {
        Self {
            inner: Inner::Owned(text),
        }
    }

    pub fn as_str(&self) -> &str {
        match &self.inner {
            #[cfg(feature = "mmap")]
            // Validated in `read_file`
            Inner::Mapped(mmap) => std::str::from_utf8(mmap).unwrap_or_default(),
            Inner::Owned(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_text_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "GRID,1,,0.0,0.0,0.0").unwrap();

        let text = SourceText::load(file.path()).unwrap();
        assert_eq!(text.as_str(), "GRID,1,,0.0,0.0,0.0\n");
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(SourceText::load(file.path()).unwrap().as_str(), "");
    }

    #[test]
    fn test_load_rejects_binary() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            SourceText::load(file.path()),
            Err(MeshcorrError::Encoding(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.bdf");
        assert!(matches!(
            SourceText::load(&missing),
            Err(MeshcorrError::NotFound(_))
        ));
    }
}
