//! Append-only JSON-lines ledger.
//!
//! One entry per line. The ledger is never truncated, rotated or rewritten.
//!
//! Appends from concurrent processes are serialized with an exclusive
//! `fs2` lock on the ledger file. Each record goes out in a single
//! `write_all` of one complete line followed by `sync_data`. If an earlier
//! writer died mid-line, the next append starts on a fresh line so only the
//! torn record is lost. Readers take a shared lock and skip lines that do
//! not parse.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use clash_core::ContextSnapshot;
use fs2::FileExt;
use tracing::debug;

use crate::entry::AuditEntry;
use crate::error::{AuditError, AuditResult};

/// Handle to a ledger file.
#[derive(Debug, Clone)]
pub struct AuditLedger {
    path: PathBuf,
}

impl AuditLedger {
    /// Open the ledger at `path`, creating parent directories.
    ///
    /// The file itself is created on the first append.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::StorageError`] if the parent directory cannot be
    /// created.
    pub fn open(path: impl Into<PathBuf>) -> AuditResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| storage_error(&path, e))?;
        }
        Ok(Self { path })
    }

    /// Open the ledger for an invocation context: `<repo>/.clash/audit.log`
    /// inside a repository, the home-level ledger otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Location`] if no home directory is available
    /// outside a repository, or a storage error as in [`AuditLedger::open`].
    pub fn for_context(ctx: &ContextSnapshot) -> AuditResult<Self> {
        Self::open(clash_core::dirs::audit_log_path_for(ctx)?)
    }

    /// Path to the ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be serialized, the lock cannot
    /// be taken, or the write fails. Failures are never swallowed.
    pub fn record(&self, entry: &AuditEntry) -> AuditResult<()> {
        let mut line =
            serde_json::to_vec(entry).map_err(|e| AuditError::SerializationError(e.to_string()))?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&self.path)
            .map_err(|e| storage_error(&self.path, e))?;

        file.lock_exclusive().map_err(|e| AuditError::LockError {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let result = append_line(&mut file, &line).map_err(|e| storage_error(&self.path, e));
        // Closing the file releases the lock as well.
        let _ = FileExt::unlock(&file);
        result?;

        debug!(id = %entry.id, outcome = %entry.outcome, path = %self.path.display(), "ledger entry appended");
        Ok(())
    }

    /// Find the first entry with `id`.
    ///
    /// Scans from the start; unparseable lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::EntryNotFound`] if no entry matches (including
    /// when the ledger does not exist yet), or a storage error if the file
    /// cannot be read.
    pub fn find(&self, id: &str) -> AuditResult<AuditEntry> {
        let not_found = || AuditError::EntryNotFound {
            entry_id: id.to_owned(),
        };
        let Some(contents) = self.read_all()? else {
            return Err(not_found());
        };
        parse_lines(&contents)
            .find(|entry| entry.id == id)
            .ok_or_else(not_found)
    }

    /// Every parseable entry, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file exists but cannot be read.
    pub fn entries(&self) -> AuditResult<Vec<AuditEntry>> {
        Ok(self
            .read_all()?
            .map(|contents| parse_lines(&contents).collect())
            .unwrap_or_default())
    }

    /// The last `limit` parseable entries, oldest first.
    ///
    /// # Errors
    ///
    /// See [`AuditLedger::entries`].
    pub fn recent(&self, limit: usize) -> AuditResult<Vec<AuditEntry>> {
        let mut entries = self.entries()?;
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
        Ok(entries)
    }

    /// Read the whole ledger under a shared lock; `None` if it does not exist.
    fn read_all(&self) -> AuditResult<Option<Vec<u8>>> {
        let mut file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(&self.path, e)),
        };

        file.lock_shared().map_err(|e| AuditError::LockError {
            path: self.path.display().to_string(),
            source: e,
        })?;
        let mut contents = Vec::new();
        let result = file.read_to_end(&mut contents);
        let _ = FileExt::unlock(&file);
        result.map_err(|e| storage_error(&self.path, e))?;

        Ok(Some(contents))
    }
}

/// Write `line`, first terminating a torn last line if there is one.
fn append_line(file: &mut File, line: &[u8]) -> io::Result<()> {
    let len = file.metadata()?.len();
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
    }
    file.write_all(line)?;
    file.sync_data()
}

fn parse_lines(contents: &[u8]) -> impl Iterator<Item = AuditEntry> + '_ {
    contents
        .split(|b| *b == b'\n')
        .enumerate()
        .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
        .filter_map(|(idx, line)| match serde_json::from_slice(line) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(line = idx.saturating_add(1), error = %e, "skipping unparseable ledger line");
                None
            },
        })
}

fn storage_error(path: &Path, source: io::Error) -> AuditError {
    AuditError::StorageError {
        path: path.display().to_string(),
        source,
    }
}
