// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WAL writer for durable append operations
//!
//! Each append writes one transaction as one line and fsyncs before
//! returning. A failed append truncates the file back to where it started,
//! so a transaction that reports failure never reappears on replay.

use crate::entry::WalEntry;
use crate::error::StoreError;
use crate::journal::Journal;
use crate::operation::Operation;
use crate::reader::WalReader;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// WAL writer for durable append operations
pub struct WalWriter {
    path: PathBuf,
    file: File,
    next_sequence: u64,
    machine_id: String,
    /// File length after the last successful append
    end: u64,
}

impl WalWriter {
    /// Open or create a WAL file
    ///
    /// If the file exists, scans it to find the next sequence number. The
    /// file is expected to have been repaired already; anything after the
    /// first bad entry is ignored for numbering.
    pub fn open(path: &Path, machine_id: &str) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let next_sequence = WalReader::open(path)
            .last_sequence()?
            .map(|s| s + 1)
            .unwrap_or(0);

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let end = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file,
            next_sequence,
            machine_id: machine_id.to_string(),
            end,
        })
    }

    fn write_entry(&mut self, entry: &WalEntry) -> Result<u64, StoreError> {
        let mut line = entry.to_line()?;
        line.push('\n');
        self.file.write_all(line.as_bytes())?;
        self.file.sync_all()?;
        Ok(line.len() as u64)
    }

    /// Get the path to the WAL file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }

    /// Last assigned sequence number, `None` if nothing was written
    pub fn last_sequence(&self) -> Option<u64> {
        self.next_sequence.checked_sub(1)
    }
}

impl Journal for WalWriter {
    fn append(&mut self, ops: &[Operation]) -> Result<u64, StoreError> {
        let sequence = self.next_sequence;
        let entry = WalEntry::new(sequence, &self.machine_id, ops.to_vec());

        match self.write_entry(&entry) {
            Ok(written) => {
                self.next_sequence += 1;
                self.end += written;
                Ok(sequence)
            }
            Err(e) => {
                if let Err(truncate_err) = self.file.set_len(self.end) {
                    tracing::error!(
                        path = %self.path.display(),
                        error = %truncate_err,
                        "failed to roll back partial WAL append"
                    );
                }
                Err(e)
            }
        }
    }

    fn next_sequence(&self) -> u64 {
        self.next_sequence
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
