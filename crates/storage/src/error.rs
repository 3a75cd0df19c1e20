// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage error types

use crate::reader::WalReadError;
use crate::snapshot::SnapshotError;
use crate::state::ApplyError;
use rollcall_core::Rejection;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from Store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("WAL read error: {0}")]
    WalRead(#[from] WalReadError),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("transaction rejected: {0}")]
    Apply(#[from] ApplyError),
    #[error("store at {0} is locked by another process")]
    Locked(PathBuf),
    #[error("empty transaction")]
    EmptyTransaction,
}

impl From<StoreError> for Rejection {
    /// Conflicts detected inside a commit keep their domain meaning;
    /// everything else is a storage fault.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Apply(apply) => apply.into(),
            other => Rejection::StorageFailure(other.to_string()),
        }
    }
}
