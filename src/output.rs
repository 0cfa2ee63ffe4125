//! Writing results to disk: atomic replacement for embed output and
//! collision-free naming for extracted files.

use crate::{Result, StegoError};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

pub(crate) const DEFAULT_MAX_NAME_SUFFIX: u32 = 9999;

/// Replace `dest` with `data` via a temporary file in the same directory,
/// so a failure never leaves a partially written `dest` behind.
///
/// The result keeps the permissions of the file it replaces; a new file gets
/// the same umask-governed mode as a plain `fs::write`.
pub(crate) fn write_atomic(dest: &Path, data: &[u8]) -> Result<()> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // open(2) applies the umask to this mode, as it does for File::create.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir)?;

    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    if let Ok(existing) = fs::metadata(dest) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    tmp.persist(dest).map_err(|e| StegoError::IoError(e.error))?;
    Ok(())
}

/// Write `data` to `dir/name`, falling back to `stem_1.ext`, `stem_2.ext`, …
/// up to `max_suffix` when the name is taken. Creates `dir` if needed.
///
/// Each candidate is opened with create-new semantics, so a file that
/// appears concurrently is skipped rather than overwritten.
pub(crate) fn write_unique(dir: &Path, name: &str, data: &[u8], max_suffix: u32) -> Result<PathBuf> {
    ensure_plain_file_name(name)?;
    fs::create_dir_all(dir)?;

    let (stem, ext) = split_name(name);
    for n in 0..=max_suffix {
        let candidate = if n == 0 {
            dir.join(name)
        } else {
            dir.join(format!("{stem}_{n}{ext}"))
        };

        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => {
                fill_or_discard(file, &candidate, data)?;
                return Ok(candidate);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(path = %candidate.display(), "destination taken");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(StegoError::NameCollision {
        path: dir.join(name),
        attempts: max_suffix.saturating_add(1),
    })
}

/// Write `data` into a freshly claimed file; on failure remove the partial
/// file so the name is not left holding truncated content.
fn fill_or_discard<W: Write>(mut file: W, path: &Path, data: &[u8]) -> Result<()> {
    if let Err(e) = file.write_all(data).and_then(|()| file.flush()) {
        drop(file);
        if let Err(rm) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %rm, "cannot remove partial file");
        }
        return Err(e.into());
    }
    Ok(())
}

/// Split `name` into stem and extension (with its dot). A leading dot does
/// not start an extension, matching how `.bashrc` has none.
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 => name.split_at(i),
        _ => (name, ""),
    }
}

fn ensure_plain_file_name(name: &str) -> Result<()> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !Path::new(name).has_root();
    if plain {
        Ok(())
    } else {
        Err(StegoError::InvalidFileName(name.to_string()))
    }
}
