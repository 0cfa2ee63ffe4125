use crate::markers::{self, PACKAGE_END, PACKAGE_START};
use crate::validator::{self, not_found_or_io};
use crate::{output, package, Result, StegoConfig, StegoError};
use std::path::{Path, PathBuf};

// ── PayloadCodec ─────────────────────────────────────────────────────────────

/// Entry point for hiding, detecting, describing and extracting payloads.
///
/// The codec holds nothing but its configuration, so it is cheap to clone and
/// safe to share between threads. Every operation reads its inputs fresh.
///
/// ```no_run
/// use pdfstego::{PayloadCodec, StegoConfig};
///
/// // Default allow-list and limits
/// let codec = PayloadCodec::new();
///
/// // Custom configuration
/// let cfg = StegoConfig {
///     max_payload_size: Some(10 * 1024 * 1024),
///     ..Default::default()
/// };
/// let codec = PayloadCodec::with_config(cfg);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayloadCodec {
    config: StegoConfig,
}

/// What a successful [`PayloadCodec::embed`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReport {
    /// Name stored in the package (base name of the payload path).
    pub filename: String,
    pub payload_size: usize,
    pub output: PathBuf,
    pub output_size: usize,
}

impl PayloadCodec {
    // ── Constructors ──────────────────────────────────────────────────────────

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StegoConfig) -> Self {
        Self { config }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Returns a reference to the active [`StegoConfig`].
    pub fn config(&self) -> &StegoConfig {
        &self.config
    }

    // ── Validation ────────────────────────────────────────────────────────────

    /// Checks that `path` exists and carries the `%PDF-` signature.
    pub fn validate_carrier<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        validator::validate_carrier(path)
    }

    /// Checks the payload's extension against the configured allow-list.
    pub fn validate_payload_extension<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        validator::validate_payload_extension(path, self.config.allowed_extensions.as_slice())
    }

    // ── Embedding ─────────────────────────────────────────────────────────────

    /// Hide `payload` inside a copy of `carrier`, written to `output`.
    ///
    /// The package is appended right after the carrier's last `%%EOF`; any
    /// bytes the carrier had after that marker (including an earlier package)
    /// are dropped. `output` is replaced atomically, so on error it is either
    /// untouched or absent. The carrier itself is never modified.
    pub fn embed<C, P, O>(&self, carrier: C, payload: P, output: O) -> Result<EmbedReport>
    where
        C: AsRef<Path>,
        P: AsRef<Path>,
        O: AsRef<Path>,
    {
        let (carrier, payload, output) = (carrier.as_ref(), payload.as_ref(), output.as_ref());

        self.validate_carrier(carrier)?;
        self.validate_payload_extension(payload)?;
        validator::require_exists(payload)?;

        let carrier_bytes = std::fs::read(carrier).map_err(|e| not_found_or_io(carrier, e))?;
        let payload_bytes = std::fs::read(payload).map_err(|e| not_found_or_io(payload, e))?;

        let filename = payload
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| StegoError::NotFound(payload.to_path_buf()))?;

        let stego = self.embed_bytes(&carrier_bytes, &filename, &payload_bytes)?;
        output::write_atomic(output, &stego)?;

        tracing::info!(
            file = %filename,
            bytes = payload_bytes.len(),
            output = %output.display(),
            "payload embedded"
        );

        Ok(EmbedReport {
            filename,
            payload_size: payload_bytes.len(),
            output: output.to_path_buf(),
            output_size: stego.len(),
        })
    }

    /// In-memory form of [`embed`](Self::embed): returns the carrier bytes with
    /// the package for (`filename`, `data`) appended after the last `%%EOF`.
    ///
    /// The carrier signature is checked; the extension allow-list is not,
    /// since no payload path is involved.
    pub fn embed_bytes(&self, carrier: &[u8], filename: &str, data: &[u8]) -> Result<Vec<u8>> {
        validator::validate_carrier_bytes(carrier)?;

        if let Some(limit) = self.config.max_payload_size {
            if data.len() > limit {
                return Err(StegoError::PayloadTooLarge {
                    size: data.len(),
                    limit,
                });
            }
        }

        let package = package::encode(filename, data)?;

        let eof = markers::find_eof_offset(carrier)
            .ok_or_else(|| StegoError::InvalidPdf("%%EOF marker not found".into()))?;

        let mut out =
            Vec::with_capacity(eof + PACKAGE_START.len() + package.len() + PACKAGE_END.len() + 2);
        out.extend_from_slice(&carrier[..eof]);
        out.push(b'\n');
        out.extend_from_slice(PACKAGE_START);
        out.extend_from_slice(&package);
        out.extend_from_slice(PACKAGE_END);
        out.push(b'\n');
        Ok(out)
    }

    // ── Shared helpers ────────────────────────────────────────────────────────

    /// Validate and read a carrier in full.
    pub(crate) fn read_carrier(&self, path: &Path) -> Result<Vec<u8>> {
        self.validate_carrier(path)?;
        std::fs::read(path).map_err(|e| not_found_or_io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARRIER: &[u8] = b"%PDF-1.4\n...body...\n%%EOF\n";

    #[test]
    fn embed_bytes_matches_documented_output() {
        let out = PayloadCodec::new()
            .embed_bytes(CARRIER, "secret.txt", b"hello")
            .unwrap();
        let expected_tail: &[u8] = b"%%EOF\n<<HIDDEN_DATA_START>>\x0a\x00\x00\x00secret.txt\x05\x00\x00\x00hello<<HIDDEN_DATA_END>>\n";
        assert!(out.ends_with(expected_tail));
        assert!(out.starts_with(b"%PDF-1.4\n...body...\n%%EOF"));
    }

    #[test]
    fn embed_bytes_drops_trailing_garbage() {
        let carrier = b"%PDF-1.4\n%%EOF\ntrailing junk";
        let out = PayloadCodec::new().embed_bytes(carrier, "a.txt", b"x").unwrap();
        assert!(!out.windows(5).any(|w| w == b"junk"));
    }

    #[test]
    fn embed_bytes_requires_eof() {
        let err = PayloadCodec::new()
            .embed_bytes(b"%PDF-1.4\nbody", "a.txt", b"x")
            .unwrap_err();
        assert!(matches!(err, StegoError::InvalidPdf(_)));
    }

    #[test]
    fn embed_bytes_requires_signature() {
        let err = PayloadCodec::new()
            .embed_bytes(b"hello %%EOF", "a.txt", b"x")
            .unwrap_err();
        assert!(matches!(err, StegoError::InvalidFormat(_)));
    }

    #[test]
    fn payload_size_limit() {
        let codec = PayloadCodec::with_config(StegoConfig {
            max_payload_size: Some(4),
            ..Default::default()
        });
        let err = codec.embed_bytes(CARRIER, "a.txt", b"12345").unwrap_err();
        assert!(matches!(err, StegoError::PayloadTooLarge { size: 5, limit: 4 }));
        codec.embed_bytes(CARRIER, "a.txt", b"1234").unwrap();
    }
}
