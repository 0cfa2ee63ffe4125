//! Input checks run before any carrier or payload is read in full.

use crate::markers::PDF_SIGNATURE;
use crate::{Result, StegoError};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

// ── Carrier ──────────────────────────────────────────────────────────────────

/// Checks that `path` exists and starts with `%PDF-`.
///
/// Only the first five bytes are read; no further PDF structure is examined.
pub fn validate_carrier<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| not_found_or_io(path, e))?;

    let mut header = Vec::with_capacity(PDF_SIGNATURE.len());
    file.by_ref()
        .take(PDF_SIGNATURE.len() as u64)
        .read_to_end(&mut header)?;

    validate_carrier_bytes(&header)
}

/// In-memory form of [`validate_carrier`].
pub fn validate_carrier_bytes(data: &[u8]) -> Result<()> {
    if data.starts_with(PDF_SIGNATURE) {
        Ok(())
    } else {
        Err(StegoError::InvalidFormat(
            "file does not start with the %PDF- signature".into(),
        ))
    }
}

// ── Payload ──────────────────────────────────────────────────────────────────

/// Checks the payload's extension against `allowed` (no leading dots,
/// case-insensitive). The file content is not inspected.
pub fn validate_payload_extension<P: AsRef<Path>, S: AsRef<str>>(
    path: P,
    allowed: &[S],
) -> Result<()> {
    let ext = path
        .as_ref()
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();

    let ok = !ext.is_empty()
        && allowed
            .iter()
            .any(|a| a.as_ref().trim_start_matches('.').eq_ignore_ascii_case(&ext));

    if ok {
        return Ok(());
    }

    let supported = allowed
        .iter()
        .map(|a| format!(".{}", a.as_ref().trim_start_matches('.')))
        .collect::<Vec<_>>()
        .join(", ");
    let ext = if ext.is_empty() {
        "(none)".to_string()
    } else {
        format!(".{}", ext.to_ascii_lowercase())
    };
    Err(StegoError::UnsupportedFormat { ext, supported })
}

/// Checks that a required input path exists.
pub fn require_exists<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        Ok(())
    } else {
        Err(StegoError::NotFound(path.to_path_buf()))
    }
}

pub(crate) fn not_found_or_io(path: &Path, e: std::io::Error) -> StegoError {
    if e.kind() == ErrorKind::NotFound {
        StegoError::NotFound(path.to_path_buf())
    } else {
        StegoError::IoError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_ALLOWED_EXTENSIONS;

    #[test]
    fn accepts_allowed_extensions_any_case() {
        for name in ["a.txt", "b.JPG", "c.Png", "d.pdf", "e.DOCX", "f.exe"] {
            validate_payload_extension(name, DEFAULT_ALLOWED_EXTENSIONS).unwrap();
        }
    }

    #[test]
    fn rejects_other_extensions() {
        let err = validate_payload_extension("archive.zip", DEFAULT_ALLOWED_EXTENSIONS).unwrap_err();
        match err {
            StegoError::UnsupportedFormat { ext, supported } => {
                assert_eq!(ext, ".zip");
                assert!(supported.contains(".docx"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_extension() {
        assert!(matches!(
            validate_payload_extension("Makefile", DEFAULT_ALLOWED_EXTENSIONS),
            Err(StegoError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn only_last_extension_counts() {
        validate_payload_extension("backup.zip.txt", DEFAULT_ALLOWED_EXTENSIONS).unwrap();
        assert!(validate_payload_extension("notes.txt.zip", DEFAULT_ALLOWED_EXTENSIONS).is_err());
    }

    #[test]
    fn carrier_signature_checked() {
        validate_carrier_bytes(b"%PDF-1.7\n").unwrap();
        assert!(matches!(
            validate_carrier_bytes(b"%PDF"),
            Err(StegoError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_carrier_bytes(b"PK\x03\x04"),
            Err(StegoError::InvalidFormat(_))
        ));
    }

    #[test]
    fn missing_carrier_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            validate_carrier(dir.path().join("nope.pdf")),
            Err(StegoError::NotFound(_))
        ));
    }
}
