//! Opaque binary picture payload

use std::fmt;
use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::errors::{ValueError, ValueResult};

/// Raw picture bytes. The bytes are never inspected; the portable form is
/// standard base64 with padding.
#[derive(Clone, PartialEq, Eq)]
pub struct Picture {
    data: Vec<u8>,
}

impl Picture {
    /// Wraps raw bytes
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// Decodes base64 text
    pub fn from_base64(encoded: &str) -> ValueResult<Self> {
        let data = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ValueError::invalid(format!("invalid base64 picture data: {}", e)))?;
        Ok(Self { data })
    }

    /// Reads the whole file at `path`
    pub fn from_file(path: &Path) -> ValueResult<Self> {
        let data = fs::read(path).map_err(|e| {
            ValueError::Io(format!("failed to read picture '{}': {}", path.display(), e))
        })?;
        Ok(Self { data })
    }

    /// Builds a picture from whichever source is given. A file takes
    /// precedence over base64 text; giving neither is an error.
    pub fn load(file: Option<&Path>, base64_data: Option<&str>) -> ValueResult<Self> {
        match (file, base64_data) {
            (Some(path), _) => Self::from_file(path),
            (None, Some(encoded)) if !encoded.is_empty() => Self::from_base64(encoded),
            _ => Err(ValueError::invalid(
                "a picture needs either a file path or base64 data",
            )),
        }
    }

    /// Returns the base64 portable form
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Writes the raw bytes to `path`
    pub fn save_to_file(&self, path: &Path) -> ValueResult<()> {
        fs::write(path, &self.data).map_err(|e| {
            ValueError::Io(format!("failed to write picture '{}': {}", path.display(), e))
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picture").field("len", &self.data.len()).finish()
    }
}

impl fmt::Display for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "picture ({} bytes)", self.data.len())
    }
}
