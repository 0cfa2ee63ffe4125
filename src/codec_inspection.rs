use crate::{markers, package, HiddenFileInfo, Result};
use std::path::Path;

/// Detection and header inspection for PayloadCodec.
impl super::PayloadCodec {
    // ── Detection ─────────────────────────────────────────────────────────────

    /// Returns `true` when the carrier holds a start marker followed later by
    /// an end marker.
    ///
    /// A missing file, a non-PDF and a PDF without a package all give `false`;
    /// the reason is logged at debug level. Use [`try_detect`](Self::try_detect)
    /// to tell them apart.
    pub fn detect<P: AsRef<Path>>(&self, carrier: P) -> bool {
        let carrier = carrier.as_ref();
        self.try_detect(carrier).unwrap_or_else(|e| {
            tracing::debug!(carrier = %carrier.display(), error = %e, "detect failed");
            false
        })
    }

    /// Like [`detect`](Self::detect) but reports why a carrier could not be read.
    pub fn try_detect<P: AsRef<Path>>(&self, carrier: P) -> Result<bool> {
        let data = self.read_carrier(carrier.as_ref())?;
        Ok(Self::detect_bytes(&data))
    }

    /// In-memory form of [`detect`](Self::detect). The signature is not checked.
    pub fn detect_bytes(data: &[u8]) -> bool {
        markers::locate_package(data).is_some()
    }

    // ── Description ───────────────────────────────────────────────────────────

    /// Returns the hidden file's name and declared size without reading the
    /// payload bytes, or `None` when there is no readable package.
    ///
    /// Errors are logged as warnings; use [`try_describe`](Self::try_describe)
    /// to receive them.
    pub fn describe<P: AsRef<Path>>(&self, carrier: P) -> Option<HiddenFileInfo> {
        let carrier = carrier.as_ref();
        self.try_describe(carrier).unwrap_or_else(|e| {
            tracing::warn!(carrier = %carrier.display(), error = %e, "cannot read hidden file info");
            None
        })
    }

    /// Like [`describe`](Self::describe), but a carrier that cannot be read or
    /// a package whose header is damaged is an error. A carrier without a
    /// package is still `Ok(None)`.
    pub fn try_describe<P: AsRef<Path>>(&self, carrier: P) -> Result<Option<HiddenFileInfo>> {
        let data = self.read_carrier(carrier.as_ref())?;
        Self::describe_bytes(&data)
    }

    /// In-memory form of [`try_describe`](Self::try_describe).
    pub fn describe_bytes(data: &[u8]) -> Result<Option<HiddenFileInfo>> {
        let Some(range) = markers::locate_package(data) else {
            return Ok(None);
        };
        let header = package::parse_header(&data[range])?;
        Ok(Some(header.info()))
    }
}
