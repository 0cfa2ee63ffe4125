//! The hidden package wire format.
//!
//! ```text
//! [name_len: u32 LE][name: name_len bytes, UTF-8][data_len: u32 LE][data: data_len bytes]
//! ```
//!
//! There is no version field, checksum or compression.

use crate::output;
use crate::{Result, StegoError};
use std::path::{Path, PathBuf};

const LEN_PREFIX: usize = 4;

// ── HiddenFile ───────────────────────────────────────────────────────────────

/// A payload recovered from (or about to be packed into) a carrier.
///
/// Returned by [`crate::PayloadCodec::extract_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenFile {
    /// The base file name stored in the package.
    pub filename: String,

    /// The raw file content, unmodified.
    pub data: Vec<u8>,
}

impl HiddenFile {
    /// Write this file into `output_dir`, creating the directory if necessary.
    ///
    /// An existing file is never overwritten: `name.ext` becomes `name_1.ext`,
    /// `name_2.ext` and so on. Returns the path actually written.
    ///
    /// ```no_run
    /// use pdfstego::PayloadCodec;
    ///
    /// let bytes = std::fs::read("stego.pdf").unwrap();
    /// let file = PayloadCodec::new().extract_bytes(&bytes).unwrap();
    /// let path = file.save_to_disk("./recovered").unwrap();
    /// println!("{}", path.display());
    /// ```
    pub fn save_to_disk<P: AsRef<Path>>(&self, output_dir: P) -> Result<PathBuf> {
        output::write_unique(
            output_dir.as_ref(),
            &self.filename,
            &self.data,
            output::DEFAULT_MAX_NAME_SUFFIX,
        )
    }

    /// Returns the file extension, or `None` if the filename has no extension.
    ///
    /// ```
    /// # use pdfstego::HiddenFile;
    /// let file = HiddenFile { filename: "notes.TXT".into(), data: vec![] };
    /// assert_eq!(file.extension(), Some("TXT"));
    /// ```
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
    }

    /// Returns `true` when the file's extension matches `ext`
    /// (case-insensitive comparison).
    pub fn has_extension(&self, ext: &str) -> bool {
        self.extension()
            .map(|e| e.eq_ignore_ascii_case(ext))
            .unwrap_or(false)
    }
}

// ── HiddenFileInfo ───────────────────────────────────────────────────────────

/// Header of a package: what is hidden, without the bytes themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenFileInfo {
    pub filename: String,

    /// Declared payload length in bytes.
    pub size: u32,
}

// ── Encoding ─────────────────────────────────────────────────────────────────

/// Pack `name` and `data` into a package body (markers not included).
///
/// Fails with [`StegoError::PayloadTooLarge`] when either length does not
/// fit in a `u32`.
pub fn encode(name: &str, data: &[u8]) -> Result<Vec<u8>> {
    let name_len = len_u32(name.len())?;
    let data_len = len_u32(data.len())?;

    let mut out = Vec::with_capacity(LEN_PREFIX * 2 + name.len() + data.len());
    out.extend_from_slice(&name_len.to_le_bytes());
    out.extend_from_slice(name.as_bytes());
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(data);
    Ok(out)
}

fn len_u32(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| StegoError::PayloadTooLarge {
        size: len,
        limit: u32::MAX as usize,
    })
}

// ── Decoding ─────────────────────────────────────────────────────────────────

/// The parsed length-prefixed header of a package body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageHeader {
    pub filename: String,
    pub data_len: u32,
    /// Offset of the first payload byte within the package body.
    pub data_offset: usize,
}

impl PackageHeader {
    pub fn info(&self) -> HiddenFileInfo {
        HiddenFileInfo {
            filename: self.filename.clone(),
            size: self.data_len,
        }
    }
}

/// Read the name and declared data length. The payload bytes are not touched.
pub fn parse_header(package: &[u8]) -> Result<PackageHeader> {
    let name_len = read_u32_le(package, 0, "name length")? as usize;

    let name_end = LEN_PREFIX
        .checked_add(name_len)
        .filter(|&end| end <= package.len())
        .ok_or_else(|| {
            StegoError::DataCorruption(format!(
                "file name of {name_len} bytes runs past the end of the package"
            ))
        })?;

    let filename = std::str::from_utf8(&package[LEN_PREFIX..name_end])
        .map_err(|e| StegoError::DataCorruption(format!("file name is not valid UTF-8: {e}")))?
        .to_owned();

    let data_len = read_u32_le(package, name_end, "data length")?;

    Ok(PackageHeader {
        filename,
        data_len,
        data_offset: name_end + LEN_PREFIX,
    })
}

/// Decode a complete package body.
///
/// The number of bytes following the header must equal the declared data
/// length exactly; anything else is [`StegoError::DataCorruption`].
pub fn decode(package: &[u8]) -> Result<HiddenFile> {
    let header = parse_header(package)?;
    let available = package.len() - header.data_offset;

    if available != header.data_len as usize {
        return Err(StegoError::DataCorruption(format!(
            "extracted data length mismatch: header declares {} bytes, package holds {available}",
            header.data_len
        )));
    }

    Ok(HiddenFile {
        filename: header.filename,
        data: package[header.data_offset..].to_vec(),
    })
}

fn read_u32_le(bytes: &[u8], offset: usize, what: &str) -> Result<u32> {
    bytes
        .get(offset..offset + LEN_PREFIX)
        .and_then(|b| <[u8; LEN_PREFIX]>::try_from(b).ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| StegoError::DataCorruption(format!("package too short to hold the {what}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_documented_layout() {
        let pkg = encode("secret.txt", b"hello").unwrap();
        assert_eq!(pkg, b"\x0a\x00\x00\x00secret.txt\x05\x00\x00\x00hello");
    }

    #[test]
    fn header_parse_skips_payload() {
        let mut pkg = encode("a.png", &[0u8; 32]).unwrap();
        // A header is readable even when the payload is cut short.
        pkg.truncate(pkg.len() - 20);
        let header = parse_header(&pkg).unwrap();
        assert_eq!(header.filename, "a.png");
        assert_eq!(header.data_len, 32);
        assert_eq!(header.data_offset, 4 + 5 + 4);
    }

    #[test]
    fn short_payload_is_corruption() {
        let mut pkg = encode("a.txt", b"0123456789").unwrap();
        pkg.truncate(pkg.len() - 3);
        assert!(matches!(decode(&pkg), Err(StegoError::DataCorruption(_))));
    }

    #[test]
    fn trailing_bytes_are_corruption() {
        let mut pkg = encode("a.txt", b"abc").unwrap();
        pkg.push(b'!');
        assert!(matches!(decode(&pkg), Err(StegoError::DataCorruption(_))));
    }

    #[test]
    fn empty_package_is_corruption() {
        assert!(matches!(parse_header(&[]), Err(StegoError::DataCorruption(_))));
    }

    #[test]
    fn oversized_name_length_is_corruption() {
        let pkg = [0xff, 0xff, 0xff, 0xff, b'a'];
        assert!(matches!(parse_header(&pkg), Err(StegoError::DataCorruption(_))));
    }

    #[test]
    fn missing_data_length_is_corruption() {
        let pkg = b"\x01\x00\x00\x00a\x05\x00";
        assert!(matches!(parse_header(pkg), Err(StegoError::DataCorruption(_))));
    }

    #[test]
    fn non_utf8_name_is_corruption() {
        let pkg = b"\x02\x00\x00\x00\xff\xfe\x00\x00\x00\x00";
        assert!(matches!(parse_header(pkg), Err(StegoError::DataCorruption(_))));
    }

    #[test]
    fn unicode_name_survives() {
        let pkg = encode("báo cáo.docx", b"x").unwrap();
        let file = decode(&pkg).unwrap();
        assert_eq!(file.filename, "báo cáo.docx");
        assert_eq!(file.data, b"x");
    }

    #[test]
    fn empty_payload_decodes() {
        let file = decode(&encode("empty.txt", b"").unwrap()).unwrap();
        assert!(file.data.is_empty());
    }
}
