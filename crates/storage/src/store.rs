// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Journaled record store with crash recovery
//!
//! `Store` owns the materialized state and the journal. A commit stages the
//! transaction against the state (which enforces the storage invariants),
//! appends it to the journal, and reverts the staged changes if the append
//! fails. Readers only ever observe committed transactions because the
//! caller holds the store exclusively for the whole commit.

use crate::error::StoreError;
use crate::journal::Journal;
use crate::operation::Operation;
use crate::reader::WalReader;
use crate::snapshot::{SnapshotManager, SnapshotMeta};
use crate::state::MaterializedState;
use crate::writer::WalWriter;
use fs2::FileExt;
use rollcall_core::Config;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Journal file name inside the data directory
pub const WAL_FILE: &str = "wal.jsonl";
/// Lock file guarding the data directory against a second process
pub const LOCK_FILE: &str = "rollcall.lock";
const SNAPSHOTS_DIR: &str = "snapshots";
const KEEP_SNAPSHOTS: usize = 2;

pub struct Store {
    journal: Box<dyn Journal>,
    state: MaterializedState,
    snapshots: Option<SnapshotManager>,
    /// Transactions between automatic snapshots; 0 disables them
    snapshot_interval: u64,
    ops_since_snapshot: u64,
    // Held for the lifetime of the store; the OS releases it on drop
    _lock: Option<File>,
}

impl Store {
    /// Open or create a store in `dir`.
    ///
    /// Takes an exclusive lock on the directory, loads the newest snapshot,
    /// and replays the journal after it. A torn or corrupt tail (from a
    /// crash mid-append) is truncated; only whole transactions survive.
    pub fn open(dir: &Path, config: &Config) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        let lock = Self::acquire_lock(dir)?;

        let wal_path = dir.join(WAL_FILE);
        let snapshots = SnapshotManager::new(&dir.join(SNAPSHOTS_DIR));

        let (mut state, replay_from) = match Self::load_latest_snapshot(&snapshots) {
            Some((state, from)) => (state, from),
            None => (MaterializedState::new(), 0),
        };

        let replayed = Self::replay(&wal_path, &mut state, replay_from)?;
        let writer = WalWriter::open(&wal_path, &config.machine_id)?;

        tracing::info!(
            dir = %dir.display(),
            replay_from,
            replayed,
            next_sequence = writer.next_sequence(),
            "store opened"
        );

        Ok(Self {
            journal: Box::new(writer),
            state,
            snapshots: Some(snapshots),
            snapshot_interval: config.snapshot_interval,
            ops_since_snapshot: replayed,
            _lock: Some(lock),
        })
    }

    /// Store over an arbitrary journal with empty state and no snapshots
    pub fn with_journal(journal: Box<dyn Journal>) -> Self {
        Self {
            journal,
            state: MaterializedState::new(),
            snapshots: None,
            snapshot_interval: 0,
            ops_since_snapshot: 0,
            _lock: None,
        }
    }

    fn acquire_lock(dir: &Path) -> Result<File, StoreError> {
        let path = dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        file.try_lock_exclusive()
            .map_err(|_| StoreError::Locked(dir.to_path_buf()))?;
        Ok(file)
    }

    fn load_latest_snapshot(snapshots: &SnapshotManager) -> Option<(MaterializedState, u64)> {
        let meta = match snapshots.latest_snapshot() {
            Ok(Some(meta)) => meta,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "cannot list snapshots, replaying full journal");
                return None;
            }
        };
        match snapshots.load_snapshot(&meta.id) {
            Ok(storable) => {
                let from = storable.replay_from;
                Some((storable.into_materialized(), from))
            }
            Err(e) => {
                tracing::warn!(id = %meta.id, error = %e, "unreadable snapshot, replaying full journal");
                None
            }
        }
    }

    /// Apply journal entries with `sequence >= from`, truncating a bad tail.
    /// Returns the number of transactions applied.
    fn replay(
        wal_path: &Path,
        state: &mut MaterializedState,
        from: u64,
    ) -> Result<u64, StoreError> {
        let reader = WalReader::open(wal_path);
        let mut iter = reader.entries_from(from)?;
        let mut applied = 0;
        let mut corruption = None;

        for entry in iter.by_ref() {
            match entry {
                Ok(entry) => match state.apply_all(&entry.ops) {
                    Ok(_) => applied += 1,
                    Err(e) => {
                        // Only accepted transactions are journaled, so this
                        // means the journal and snapshot disagree
                        tracing::warn!(sequence = entry.sequence, error = %e, "skipping unappliable entry");
                    }
                },
                Err(e) => {
                    corruption = Some(e);
                    break;
                }
            }
        }

        if let Some(e) = corruption {
            let position = iter.last_valid_position();
            tracing::warn!(error = %e, position, "truncating WAL at first bad entry");
            truncate_file(wal_path, position)?;
        }
        Ok(applied)
    }

    /// Commit a transaction atomically. Returns its journal sequence.
    ///
    /// Fails with [`StoreError::Apply`] if any operation's condition does
    /// not hold, and with an IO error if the journal write fails; in both
    /// cases no operation of the transaction takes effect.
    pub fn commit(&mut self, ops: Vec<Operation>) -> Result<u64, StoreError> {
        if ops.is_empty() {
            return Err(StoreError::EmptyTransaction);
        }

        let applied = self.state.apply_all(&ops)?;
        let sequence = match self.journal.append(&ops) {
            Ok(sequence) => sequence,
            Err(e) => {
                self.state.revert(applied);
                tracing::error!(error = %e, ops = ops.len(), "journal append failed, transaction reverted");
                return Err(e);
            }
        };

        tracing::debug!(
            sequence,
            ops = ?ops.iter().map(Operation::kind).collect::<Vec<_>>(),
            "committed"
        );

        self.ops_since_snapshot += 1;
        if let Err(e) = self.maybe_snapshot() {
            // The commit is already durable in the journal
            tracing::warn!(error = %e, "automatic snapshot failed");
        }
        Ok(sequence)
    }

    /// Committed state for reads
    pub fn state(&self) -> &MaterializedState {
        &self.state
    }

    /// Sequence the next commit will receive
    pub fn next_sequence(&self) -> u64 {
        self.journal.next_sequence()
    }

    /// Write a snapshot of the current state.
    ///
    /// Returns `None` for stores without a snapshot directory.
    pub fn create_snapshot(&mut self) -> Result<Option<SnapshotMeta>, StoreError> {
        let Some(snapshots) = &self.snapshots else {
            return Ok(None);
        };
        let replay_from = self.journal.next_sequence();
        let meta = snapshots.create_snapshot(&self.state, replay_from)?;
        snapshots.cleanup_old_snapshots(KEEP_SNAPSHOTS)?;

        self.journal.append(&[Operation::SnapshotTaken {
            snapshot_id: meta.id.clone(),
        }])?;
        self.ops_since_snapshot = 0;

        tracing::info!(id = %meta.id, replay_from, "snapshot created");
        Ok(Some(meta))
    }

    /// Snapshot if the configured interval has elapsed
    pub fn maybe_snapshot(&mut self) -> Result<Option<SnapshotMeta>, StoreError> {
        if self.snapshot_interval > 0 && self.ops_since_snapshot >= self.snapshot_interval {
            self.create_snapshot()
        } else {
            Ok(None)
        }
    }
}

fn truncate_file(path: &Path, position: u64) -> Result<(), StoreError> {
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_len(position)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
