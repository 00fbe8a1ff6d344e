//! Filesystem helper for whole-file overwrite.
//!
//! The journal file is always rewritten in full. Writing to a sibling temp
//! file and renaming onto the target keeps an interrupted write from leaving
//! a truncated journal behind.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write `text` to `path` by way of a sibling temp file and an atomic rename.
///
/// On some platforms (notably Windows), `fs::rename` fails if the destination
/// already exists; that case is handled by removing the destination and
/// retrying. If the rename ultimately fails, the temp file is cleaned up.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or the rename fails
/// even after the fallback attempt.
pub fn save_atomic(path: &Path, text: &str) -> io::Result<()> {
    let temp_path = temp_sibling(path);
    fs::write(&temp_path, text)?;

    if let Err(initial_err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(path);
        fs::rename(&temp_path, path).map_err(|retry_err| {
            let _ = fs::remove_file(&temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("journal"));
    name.push(".tmp");
    path.with_file_name(name)
}
