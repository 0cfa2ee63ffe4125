use crate::{markers, output, package, HiddenFile, Result, StegoError};
use std::path::{Path, PathBuf};

/// Extraction functionality for PayloadCodec.
impl super::PayloadCodec {
    // ── Extraction ────────────────────────────────────────────────────────────

    /// Recover the hidden file from `carrier` and write it into `output_dir`.
    ///
    /// The directory is created if missing. When `output_dir/name` already
    /// exists the file is written as `name_1.ext`, `name_2.ext`, … up to
    /// [`StegoConfig::max_name_suffix`](crate::StegoConfig::max_name_suffix).
    /// Returns the path that was written.
    ///
    /// Fails with [`StegoError::NoHiddenData`] when there is no package and
    /// with [`StegoError::DataCorruption`] when the payload length disagrees
    /// with the header.
    ///
    /// ```no_run
    /// use pdfstego::PayloadCodec;
    ///
    /// let path = PayloadCodec::new().extract("stego.pdf", "./out").unwrap();
    /// println!("recovered {}", path.display());
    /// ```
    pub fn extract<C, D>(&self, carrier: C, output_dir: D) -> Result<PathBuf>
    where
        C: AsRef<Path>,
        D: AsRef<Path>,
    {
        let data = self.read_carrier(carrier.as_ref())?;
        let file = self.extract_bytes(&data)?;

        let written = output::write_unique(
            output_dir.as_ref(),
            &file.filename,
            &file.data,
            self.config().max_name_suffix,
        )?;

        tracing::info!(
            file = %file.filename,
            bytes = file.data.len(),
            path = %written.display(),
            "hidden file extracted"
        );
        Ok(written)
    }

    /// In-memory form of [`extract`](Self::extract): decode the package
    /// without touching the filesystem.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<HiddenFile> {
        let range = markers::locate_package(data).ok_or(StegoError::NoHiddenData)?;
        package::decode(&data[range])
    }
}
