//! Size-rotated trace file writer.
//!
//! Trace output grows without bound during long sessions, so the writer
//! rotates the file once it crosses a size threshold and keeps a small set of
//! timestamped backups.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// File size that triggers rotation (8 MB).
const ROTATE_AT_BYTES: u64 = 8 * 1024 * 1024;

/// Rotated files kept before the oldest is deleted.
const BACKUPS_KEPT: usize = 2;

/// Append-only line writer with size-based rotation.
///
/// The handle opens lazily on first write and reopens after each rotation.
/// A `Mutex` guards the handle so the exporter can be driven from any thread.
pub struct RotatingWriter {
    path: PathBuf,
    handle: Mutex<Option<File>>,
}

impl RotatingWriter {
    /// Creates a writer for the given path without touching the filesystem.
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            handle: Mutex::new(None),
        }
    }

    /// Appends one line, rotating first if the file has grown past the
    /// threshold.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be opened, written, or
    /// rotated.
    pub fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("writer lock poisoned: {e}"),
                )
            })?;

        if self.needs_rotation() {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }

        let file = handle
            .as_mut()
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "trace file unavailable")
            })?;
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() > ROTATE_AT_BYTES)
    }

    /// Renames the current file to a timestamped backup and prunes backups
    /// beyond the retention limit.
    fn rotate(&self) -> std::io::Result<()> {
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        if self.path.exists() {
            let backup = self.path.with_extension(format!("jsonl.{stamp}"));
            fs::rename(&self.path, &backup)?;
        }

        self.prune_backups()
    }

    fn prune_backups(&self) -> std::io::Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        let Some(stem) = self.path.file_stem().and_then(|s| s.to_str()) else {
            return Ok(());
        };

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(stem) && name.contains(".jsonl."))
            })
            .collect();

        // Newest first by modification time.
        backups.sort_by_key(|path| {
            std::cmp::Reverse(fs::metadata(path).and_then(|m| m.modified()).ok())
        });

        for stale in backups.iter().skip(BACKUPS_KEPT) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingWriter")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines_with_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.jsonl");
        let writer = RotatingWriter::new(path.clone());

        writer.append_line("{\"span\":\"a\"}").unwrap();
        writer.append_line("{\"span\":\"b\"}").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\"span\":\"a\"}\n{\"span\":\"b\"}\n");
    }

    #[test]
    fn creates_the_file_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.jsonl");
        let writer = RotatingWriter::new(path.clone());
        assert!(!path.exists());

        writer.append_line("{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn rotates_once_the_threshold_is_crossed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.jsonl");

        // Seed a file already past the threshold so the next write rotates.
        fs::write(&path, vec![b'x'; (ROTATE_AT_BYTES + 1) as usize]).unwrap();

        let writer = RotatingWriter::new(path.clone());
        writer.append_line("{\"span\":\"fresh\"}").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\"span\":\"fresh\"}\n");

        let backups: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.contains(".jsonl."))
            })
            .collect();
        assert_eq!(backups.len(), 1);
    }
}
