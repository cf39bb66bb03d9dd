//! Flat record files rewritten in full on every mutation.
//!
//! Writes go to a sibling temporary file which is then renamed over the
//! target, so a crash mid-write leaves the previous contents intact.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::Utf8Error;

use crate::error::PersistenceError;

#[derive(Debug)]
pub struct RecordFile {
    path: PathBuf,
    failures: Vec<PersistenceError>,
}

impl RecordFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            failures: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file as raw bytes. Decoding is left to the line
    /// codecs so one bad line cannot hide the rest of the file.
    ///
    /// A missing file reads as empty. Any other failure is logged and also
    /// reads as empty so the owning store starts with no records.
    pub fn read(&self) -> Vec<u8> {
        match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                let err = PersistenceError::ReadFailed {
                    path: self.path.clone(),
                    source,
                };
                tracing::warn!(error = %err, "starting with no records");
                Vec::new()
            }
        }
    }

    /// Replace the file contents. Returns `false` and queues the failure
    /// when the write did not land.
    pub fn write(&mut self, contents: &str) -> bool {
        match write_atomic(&self.path, contents) {
            Ok(()) => true,
            Err(source) => {
                let err = PersistenceError::WriteFailed {
                    path: self.path.clone(),
                    source,
                };
                tracing::warn!(error = %err, "record file not saved; keeping in-memory state");
                self.failures.push(err);
                false
            }
        }
    }

    /// Drain failures recorded since the last call.
    pub fn take_failures(&mut self) -> Vec<PersistenceError> {
        std::mem::take(&mut self.failures)
    }
}

/// Split raw file contents into `(line number, line)` pairs, 1-based.
///
/// A trailing `\r` is dropped. A line that is not valid UTF-8 is yielded
/// as `Err` on its own.
pub(crate) fn numbered_lines(
    contents: &[u8],
) -> impl Iterator<Item = (usize, Result<&str, Utf8Error>)> + '_ {
    contents.split(|b| *b == b'\n').enumerate().map(|(idx, raw)| {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        (idx + 1, std::str::from_utf8(raw))
    })
}

pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path);
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(contents.as_bytes())?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
