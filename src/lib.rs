//! # pdfstego
//!
//! A Rust library for hiding a file inside a PDF document and recovering it again.
//!
//! ## What this crate does
//!
//! 1. **Validate the carrier**: checks that the file starts with the `%PDF-` signature.
//! 2. **Embed**: packs the payload's file name and bytes into a length-prefixed
//!    package and appends it, wrapped in two text markers, after the last `%%EOF`.
//! 3. **Detect / describe**: finds the package and reads its header without
//!    touching the payload bytes.
//! 4. **Extract**: decodes the package, checks its declared length, and writes the
//!    payload to disk under a name that never overwrites an existing file.
//!
//! The package is plainly visible to anyone reading the file byte-for-byte; this is
//! a container format, not encryption.
//!
//! ## Quick example
//!
//! ```no_run
//! use pdfstego::PayloadCodec;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = PayloadCodec::new();
//!
//! codec.embed("cover.pdf", "secret.txt", "stego.pdf")?;
//!
//! if let Some(info) = codec.describe("stego.pdf") {
//!     println!("{}: {} bytes", info.filename, info.size);
//! }
//!
//! let written = codec.extract("stego.pdf", "./recovered")?;
//! println!("saved to {}", written.display());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use thiserror::Error;

mod codec;
mod codec_extraction;
mod codec_inspection;
pub mod markers;
mod output;
pub mod package;
pub mod validator;

pub use codec::{EmbedReport, PayloadCodec};
pub use package::{HiddenFile, HiddenFileInfo};

// ── Configuration ────────────────────────────────────────────────────────────

/// File extensions accepted as payloads by default (compared case-insensitively).
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["txt", "jpg", "png", "pdf", "docx", "exe"];

/// Runtime configuration for [`PayloadCodec`].
///
/// A codec never changes its configuration after construction.
#[derive(Debug, Clone)]
pub struct StegoConfig {
    /// Extensions (without the leading dot) a payload may carry.
    pub allowed_extensions: Vec<String>,

    /// If set, [`PayloadCodec::embed`] returns [`StegoError::PayloadTooLarge`]
    /// for any payload larger than this many bytes.
    pub max_payload_size: Option<usize>,

    /// Highest numeric suffix tried when the extracted file name is taken
    /// (`name_1.ext` … `name_N.ext`).
    pub max_name_suffix: u32,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| (*e).to_string())
                .collect(),
            max_payload_size: None,
            max_name_suffix: output::DEFAULT_MAX_NAME_SUFFIX,
        }
    }
}

// ── Error type ───────────────────────────────────────────────────────────────

/// Every error that this crate can produce.
#[derive(Error, Debug)]
pub enum StegoError {
    /// A required input path does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The carrier does not start with the `%PDF-` signature.
    #[error("Not a valid PDF file: {0}")]
    InvalidFormat(String),

    /// The payload's extension is not in the allow-list.
    #[error("Unsupported file format: {ext}. Supported formats: {supported}")]
    UnsupportedFormat { ext: String, supported: String },

    /// The carrier has no `%%EOF` marker to anchor the package.
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// The carrier contains no complete package.
    #[error("No hidden data found in this PDF")]
    NoHiddenData,

    /// The package is present but its contents disagree with its header.
    #[error("Data corruption detected: {0}")]
    DataCorruption(String),

    /// The payload cannot be described by a 32-bit length, or exceeds the
    /// configured maximum.
    #[error("Payload of {size} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    /// The recovered file name would escape the output directory.
    #[error("Refusing to write hidden file with unsafe name '{0}'")]
    InvalidFileName(String),

    /// Every candidate destination name up to the configured bound is taken.
    #[error("No free file name for '{}' after {attempts} attempts", .path.display())]
    NameCollision { path: PathBuf, attempts: u32 },

    /// A filesystem I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, StegoError>;
