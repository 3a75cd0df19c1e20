// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WAL reader for iterating and validating entries
//!
//! Invalid entries (checksum mismatch or parse errors) mark the truncation
//! point: everything before them is trusted, nothing after them is.

use crate::entry::WalEntry;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when reading WAL entries
#[derive(Debug, Error)]
pub enum WalReadError {
    #[error("corrupted entry at line {line}: {reason}")]
    Corrupted { line: u64, reason: String },
    #[error("checksum mismatch at line {line}")]
    ChecksumMismatch { line: u64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// WAL reader for iterating over entries
pub struct WalReader {
    path: PathBuf,
}

impl WalReader {
    /// Open a WAL for reading; a missing file reads as empty
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Iterate over all entries, yielding an error at the first bad one
    pub fn entries(&self) -> Result<WalEntryIter, WalReadError> {
        WalEntryIter::new(&self.path, 0)
    }

    /// Iterate over entries with `sequence >= from`
    pub fn entries_from(&self, from: u64) -> Result<WalEntryIter, WalReadError> {
        WalEntryIter::new(&self.path, from)
    }

    /// Last valid sequence number, if any entry is readable
    pub fn last_sequence(&self) -> Result<Option<u64>, WalReadError> {
        let mut last = None;
        for entry in self.entries()? {
            match entry {
                Ok(entry) => last = Some(entry.sequence),
                Err(_) => break,
            }
        }
        Ok(last)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Iterator over WAL entries with position tracking
pub struct WalEntryIter {
    reader: Option<BufReader<File>>,
    line_number: u64,
    skip_until_sequence: u64,
    /// Byte offset just past the last valid entry
    last_valid_position: u64,
}

impl WalEntryIter {
    fn new(path: &Path, skip_until_sequence: u64) -> Result<Self, WalReadError> {
        let reader = match File::open(path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            reader,
            line_number: 0,
            skip_until_sequence,
            last_valid_position: 0,
        })
    }

    /// Byte offset after the last successfully validated entry.
    ///
    /// After the iterator yields an error, truncating the file here drops the
    /// torn tail and keeps every committed transaction.
    pub fn last_valid_position(&self) -> u64 {
        self.last_valid_position
    }
}

impl Iterator for WalEntryIter {
    type Item = Result<WalEntry, WalReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;

        loop {
            let mut line = String::new();
            let read = match reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(n) => n,
                Err(e) => return Some(Err(WalReadError::Io(e))),
            };
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                // Blank lines between entries are harmless
                if line.ends_with('\n') {
                    self.last_valid_position += read as u64;
                }
                continue;
            }

            // A final line without newline was cut off mid-write
            if !line.ends_with('\n') {
                return Some(Err(WalReadError::Corrupted {
                    line: self.line_number,
                    reason: "unterminated entry".to_string(),
                }));
            }

            let entry = match WalEntry::from_line(trimmed) {
                Ok(e) => e,
                Err(e) => {
                    return Some(Err(WalReadError::Corrupted {
                        line: self.line_number,
                        reason: e.to_string(),
                    }));
                }
            };
            if !entry.verify() {
                return Some(Err(WalReadError::ChecksumMismatch {
                    line: self.line_number,
                }));
            }

            self.last_valid_position = reader
                .stream_position()
                .unwrap_or(self.last_valid_position + read as u64);

            if entry.sequence < self.skip_until_sequence {
                continue;
            }
            return Some(Ok(entry));
        }
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
