// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WAL entry structure with checksum verification
//!
//! Each entry carries one whole transaction: a sequence number, timestamp,
//! machine ID, the transaction's operations, and a CRC32 checksum over them.
//! A torn or corrupted line fails verification and drops the entire
//! transaction on replay.

use crate::error::StoreError;
use crate::operation::Operation;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A single entry in the write-ahead log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalEntry {
    /// Monotonically increasing sequence number
    pub sequence: u64,
    /// Microseconds since Unix epoch
    pub timestamp_micros: u64,
    pub machine_id: String,
    /// Operations of one transaction, applied in order
    pub ops: Vec<Operation>,
    /// CRC32 checksum of the serialized operations
    pub checksum: u32,
}

impl WalEntry {
    /// Create a new WAL entry with computed checksum
    pub fn new(sequence: u64, machine_id: &str, ops: Vec<Operation>) -> Self {
        let timestamp_micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0);
        Self::new_with_timestamp(sequence, timestamp_micros, machine_id, ops)
    }

    /// Create a new WAL entry with a specific timestamp (for testing)
    pub fn new_with_timestamp(
        sequence: u64,
        timestamp_micros: u64,
        machine_id: &str,
        ops: Vec<Operation>,
    ) -> Self {
        let checksum = Self::calculate_checksum(&ops);
        Self {
            sequence,
            timestamp_micros,
            machine_id: machine_id.to_string(),
            ops,
            checksum,
        }
    }

    fn calculate_checksum(ops: &[Operation]) -> u32 {
        // Operations hold only strings, integers and timestamps, so
        // serialization cannot fail
        let json = serde_json::to_string(ops).unwrap_or_default();
        crc32fast::hash(json.as_bytes())
    }

    /// Verify the checksum matches the operations
    pub fn verify(&self) -> bool {
        self.checksum == Self::calculate_checksum(&self.ops)
    }

    /// Serialize to newline-delimited JSON (one line)
    pub fn to_line(&self) -> Result<String, StoreError> {
        serde_json::to_string(self).map_err(StoreError::from)
    }

    /// Parse from a single line of JSON
    pub fn from_line(line: &str) -> Result<Self, StoreError> {
        serde_json::from_str(line).map_err(StoreError::from)
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
