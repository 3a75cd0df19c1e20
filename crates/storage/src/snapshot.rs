// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot management for fast recovery
//!
//! A snapshot captures every record at a point in the journal. Recovery
//! loads the newest snapshot and replays only the entries after it.

use crate::state::MaterializedState;
use chrono::{DateTime, Utc};
use rollcall_core::{DutyAssignment, Event, Participation, User};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot not found: {0}")]
    NotFound(String),
    #[error("invalid snapshot format: {0}")]
    InvalidFormat(String),
}

/// Serializable version of the full record state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorableState {
    pub version: u32,
    /// First journal sequence not covered by this snapshot
    pub replay_from: u64,
    pub timestamp: DateTime<Utc>,
    pub users: Vec<User>,
    pub events: Vec<Event>,
    pub participations: Vec<Participation>,
    pub duties: Vec<DutyAssignment>,
}

impl StorableState {
    /// Current version of the snapshot format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn from_materialized(state: &MaterializedState, replay_from: u64) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            replay_from,
            timestamp: Utc::now(),
            users: state.users().cloned().collect(),
            events: state.events().cloned().collect(),
            participations: state.participations().cloned().collect(),
            duties: state.duties().cloned().collect(),
        }
    }

    pub fn into_materialized(self) -> MaterializedState {
        MaterializedState::from_records(self.events, self.users, self.participations, self.duties)
    }
}

/// Snapshot metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotMeta {
    pub id: String,
    pub replay_from: u64,
}

/// Manages snapshot creation, discovery, and cleanup
pub struct SnapshotManager {
    snapshots_dir: PathBuf,
}

impl SnapshotManager {
    pub fn new(snapshots_dir: &Path) -> Self {
        Self {
            snapshots_dir: snapshots_dir.to_path_buf(),
        }
    }

    /// Snapshot IDs sort by the sequence they cover
    pub fn generate_id(replay_from: u64) -> String {
        format!("{:012}", replay_from)
    }

    /// Write a snapshot of `state`, atomically replacing any previous one
    /// with the same ID
    pub fn create_snapshot(
        &self,
        state: &MaterializedState,
        replay_from: u64,
    ) -> Result<SnapshotMeta, SnapshotError> {
        fs::create_dir_all(&self.snapshots_dir)?;

        let id = Self::generate_id(replay_from);
        let storable = StorableState::from_materialized(state, replay_from);

        let path = self.snapshot_path(&id);
        let tmp = path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer(&mut writer, &storable)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp, &path)?;

        Ok(SnapshotMeta { id, replay_from })
    }

    /// Load a snapshot by ID
    pub fn load_snapshot(&self, id: &str) -> Result<StorableState, SnapshotError> {
        let path = self.snapshot_path(id);
        if !path.exists() {
            return Err(SnapshotError::NotFound(id.to_string()));
        }

        let reader = BufReader::new(File::open(&path)?);
        let state: StorableState = serde_json::from_reader(reader)?;

        if state.version != StorableState::CURRENT_VERSION {
            return Err(SnapshotError::InvalidFormat(format!(
                "unsupported version: {} (expected {})",
                state.version,
                StorableState::CURRENT_VERSION
            )));
        }
        Ok(state)
    }

    /// List available snapshots, newest first
    pub fn list_snapshots(&self) -> Result<Vec<SnapshotMeta>, SnapshotError> {
        if !self.snapshots_dir.exists() {
            return Ok(Vec::new());
        }

        let mut snapshots = Vec::new();
        for entry in fs::read_dir(&self.snapshots_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(replay_from) = stem.parse::<u64>() {
                snapshots.push(SnapshotMeta {
                    id: stem.to_string(),
                    replay_from,
                });
            }
        }

        snapshots.sort_by(|a, b| b.replay_from.cmp(&a.replay_from));
        Ok(snapshots)
    }

    pub fn latest_snapshot(&self) -> Result<Option<SnapshotMeta>, SnapshotError> {
        Ok(self.list_snapshots()?.into_iter().next())
    }

    /// Delete all but the `keep` newest snapshots
    pub fn cleanup_old_snapshots(&self, keep: usize) -> Result<Vec<String>, SnapshotError> {
        let mut deleted = Vec::new();
        for snapshot in self.list_snapshots()?.into_iter().skip(keep) {
            fs::remove_file(self.snapshot_path(&snapshot.id))?;
            deleted.push(snapshot.id);
        }
        Ok(deleted)
    }

    fn snapshot_path(&self, id: &str) -> PathBuf {
        self.snapshots_dir.join(format!("{}.json", id))
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
