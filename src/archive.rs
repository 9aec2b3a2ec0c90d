use memmap2::Mmap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

use crate::error::{ResolveError, Result};

/// Checks whether the archive contains an entry with exactly this path.
/// Never mutates the archive.
pub fn contains_entry(archive_path: &Path, entry_path: &str) -> Result<bool> {
    let file = File::open(archive_path).map_err(|e| unreadable(archive_path, &e))?;
    let mmap = unsafe { Mmap::map(&file).map_err(|e| unreadable(archive_path, &e))? };
    let mut archive =
        ZipArchive::new(Cursor::new(&mmap[..])).map_err(|e| unreadable(archive_path, &e))?;
    Ok(archive.by_name(entry_path).is_ok())
}

/// Extracts the first entry whose full path ends with `entry_suffix` and
/// decodes it as UTF-8 text. Archives place class-tree-rooted entries under
/// directory prefixes, hence the suffix match.
///
/// Open failures and missing entries both come back as `None`; the log line
/// is the only place the two cases differ.
pub fn extract_entry(archive_path: &Path, entry_suffix: &str) -> Option<String> {
    let file = match File::open(archive_path) {
        Ok(f) => f,
        Err(err) => {
            tracing::warn!("cannot open archive {}: {err}", archive_path.display());
            return None;
        }
    };
    let mmap = match unsafe { Mmap::map(&file) } {
        Ok(m) => m,
        Err(err) => {
            tracing::warn!("cannot map archive {}: {err}", archive_path.display());
            return None;
        }
    };
    let mut archive = match ZipArchive::new(Cursor::new(&mmap[..])) {
        Ok(a) => a,
        Err(err) => {
            tracing::warn!("cannot read zip structure of {}: {err}", archive_path.display());
            return None;
        }
    };

    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(
                    "skipping entry {index} of {}: {err}",
                    archive_path.display()
                );
                continue;
            }
        };
        if !entry.name().ends_with(entry_suffix) {
            continue;
        }

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        if let Err(err) = entry.read_to_end(&mut bytes) {
            tracing::warn!(
                "failed to read entry {} of {}: {err}",
                entry.name(),
                archive_path.display()
            );
            return None;
        }
        return Some(String::from_utf8_lossy(&bytes).into_owned());
    }

    tracing::debug!(
        "no entry ending with {entry_suffix} in {}",
        archive_path.display()
    );
    None
}

fn unreadable(path: &Path, err: &dyn std::fmt::Display) -> ResolveError {
    ResolveError::ArchiveUnreadable {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
