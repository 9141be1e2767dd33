//! GEDCOM source loading.
//!
//! # Responsibility
//! - Read `.ged` files from disk into UTF-8 text for the parser.
//!
//! # Invariants
//! - Only paths with a `.ged` extension (any case) are read.
//! - A leading UTF-8 BOM is removed from returned text.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File extension accepted for GEDCOM sources.
pub const GEDCOM_EXTENSION: &str = "ged";

/// Errors from reading a GEDCOM source file.
#[derive(Debug)]
pub enum SourceError {
    /// Path does not end in `.ged`.
    InvalidExtension(PathBuf),
    /// File could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File content is not valid UTF-8.
    NotUtf8(PathBuf),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidExtension(path) => write!(
                f,
                "invalid file type `{}`: GEDCOM files must have .{GEDCOM_EXTENSION} extension",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "failed to read GEDCOM file `{}`: {source}", path.display())
            }
            Self::NotUtf8(path) => {
                write!(f, "GEDCOM file `{}` is not valid UTF-8", path.display())
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidExtension(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::NotUtf8(_) => None,
        }
    }
}

/// Returns whether `path` carries the GEDCOM extension.
pub fn has_gedcom_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(GEDCOM_EXTENSION))
}

/// Reads a GEDCOM file into text.
///
/// # Errors
/// - [`SourceError::InvalidExtension`] when the path is not a `.ged` file.
/// - [`SourceError::NotUtf8`] when the content is not UTF-8.
/// - [`SourceError::Io`] for any other read failure.
pub fn load_gedcom_file(path: impl AsRef<Path>) -> Result<String, SourceError> {
    let path = path.as_ref();
    if !has_gedcom_extension(path) {
        warn!("event=source_load module=source status=error reason=invalid_extension");
        return Err(SourceError::InvalidExtension(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|err| {
        warn!(
            "event=source_load module=source status=error reason={:?}",
            err.kind()
        );
        if err.kind() == ErrorKind::InvalidData {
            SourceError::NotUtf8(path.to_path_buf())
        } else {
            SourceError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })?;

    info!(
        "event=source_load module=source status=ok bytes={}",
        text.len()
    );
    Ok(strip_bom(text))
}

fn strip_bom(text: String) -> String {
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}
