// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-event admission gates
//!
//! Admissions for one event run one at a time; admissions for different
//! events never wait on each other.

use rollcall_core::EventId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OwnedMutexGuard;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("timed out after {waited:?} waiting for admission gate of event {event_id}")]
pub struct GateTimeout {
    pub event_id: EventId,
    pub waited: Duration,
}

/// Held while an admission checks and commits
pub type GateGuard = OwnedMutexGuard<()>;

#[derive(Default)]
pub struct AdmissionGates {
    gates: Mutex<HashMap<EventId, Arc<tokio::sync::Mutex<()>>>>,
}

impl AdmissionGates {
    pub fn new() -> Self {
        Self::default()
    }

    fn gate(&self, event_id: &EventId) -> Arc<tokio::sync::Mutex<()>> {
        let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        gates.entry(event_id.clone()).or_default().clone()
    }

    /// Wait for exclusive admission rights on `event_id`, up to `timeout`
    pub async fn acquire(
        &self,
        event_id: &EventId,
        timeout: Duration,
    ) -> Result<GateGuard, GateTimeout> {
        let gate = self.gate(event_id);
        tokio::time::timeout(timeout, gate.lock_owned())
            .await
            .map_err(|_| GateTimeout {
                event_id: event_id.clone(),
                waited: timeout,
            })
    }

    /// Drop the gate of a deleted event
    pub fn forget(&self, event_id: &EventId) {
        let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        gates.remove(event_id);
    }

    /// Number of events with a live gate
    pub fn len(&self) -> usize {
        self.gates.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "gates_tests.rs"]
mod tests;
