//! Raw dump files: flat element buffers with no header.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Element type of a dump file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    U8,
    F32,
}

impl ElementType {
    /// Width of one element in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::F32 => 4,
        }
    }

    /// Default comparison tolerance for this element type.
    #[must_use]
    pub const fn default_tolerance(self) -> f64 {
        match self {
            Self::U8 => 1.0,
            Self::F32 => 0.05,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::U8 => "u8",
            Self::F32 => "f32",
        })
    }
}

impl FromStr for ElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "u8" | "uint8" => Ok(Self::U8),
            "f32" | "float32" => Ok(Self::F32),
            other => Err(Error::InvalidParameter {
                name: "dtype".to_string(),
                reason: format!("unknown element type {other:?}, expected u8 or f32"),
            }),
        }
    }
}

/// Write raw bytes to a dump file, creating the parent directory if needed.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_dump<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<usize> {
    let path = path.as_ref();
    let write_err = |source| Error::DumpWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, bytes).map_err(write_err)?;

    tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}

/// Read a dump file as a flat list of element values.
///
/// Multi-byte elements are read in native byte order, matching [`write_dump`]
/// callers that serialize with `to_ne_bytes`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its length is not a
/// multiple of the element width.
pub fn read_dump<P: AsRef<Path>>(path: P, element: ElementType) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::DumpRead {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.len() % element.width() != 0 {
        return Err(Error::Misaligned {
            path: path.to_path_buf(),
            len: bytes.len(),
            width: element.width(),
        });
    }

    let values = match element {
        ElementType::U8 => bytes.iter().map(|&b| f64::from(b)).collect(),
        ElementType::F32 => bytes
            .chunks_exact(4)
            .map(|c| f64::from(f32::from_ne_bytes([c[0], c[1], c[2], c[3]])))
            .collect(),
    };

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_width() {
        assert_eq!(ElementType::U8.width(), 1);
        assert_eq!(ElementType::F32.width(), 4);
    }

    #[test]
    fn test_parse_element_type() {
        assert_eq!("u8".parse::<ElementType>().unwrap(), ElementType::U8);
        assert_eq!("Float32".parse::<ElementType>().unwrap(), ElementType::F32);
        assert!("f64".parse::<ElementType>().is_err());
    }

    #[test]
    fn test_write_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.bin");

        assert_eq!(write_dump(&path, &[1, 2, 3]).unwrap(), 3);
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_write_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        let path = blocker.join("out.bin");

        let err = write_dump(&path, &[1]).unwrap_err();
        assert!(matches!(&err, Error::DumpWrite { path: p, .. } if *p == path));
    }

    #[test]
    fn test_read_missing_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");

        let err = read_dump(&path, ElementType::U8).unwrap_err();
        assert!(matches!(&err, Error::DumpRead { path: p, .. } if *p == path));
    }

    #[test]
    fn test_read_f32_native_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floats.bin");
        let bytes: Vec<u8> = [-2.5_f32, 0.25].iter().flat_map(|v| v.to_ne_bytes()).collect();
        fs::write(&path, bytes).unwrap();

        assert_eq!(read_dump(&path, ElementType::F32).unwrap(), vec![-2.5, 0.25]);
    }

    #[test]
    fn test_read_misaligned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.bin");
        fs::write(&path, [0u8; 5]).unwrap();

        let err = read_dump(&path, ElementType::F32).unwrap_err();
        assert!(matches!(err, Error::Misaligned { len: 5, width: 4, .. }));
    }
}
