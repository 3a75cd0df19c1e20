// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine handle shared by request handlers

use crate::gates::AdmissionGates;
use chrono::{DateTime, Utc};
use rollcall_core::{
    Clock, Config, Event, EventId, EventStatus, EventView, IdGen, Rejection, Role, User, UserId,
};
use rollcall_storage::{Operation, Store};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Engine tuning knobs
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on waiting for an event's admission gate
    pub admission_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            admission_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&Config> for EngineConfig {
    fn from(config: &Config) -> Self {
        Self {
            admission_timeout: config.admission_timeout,
        }
    }
}

struct Inner<C, I> {
    store: Mutex<Store>,
    gates: AdmissionGates,
    clock: C,
    ids: I,
    config: EngineConfig,
}

/// The participation and check-in engine.
///
/// Cheap to clone; clones share the store. Every mutation commits one
/// atomic transaction while holding the store exclusively, and the store
/// re-checks capacity, uniqueness and check-in state inside that commit.
/// The store lock is never held across an `.await`.
///
/// That lock is the storage critical section: it covers the journal fsync,
/// so commits for different events serialize on it and an admission's
/// commit blocks its tokio worker for the length of one fsync.
pub struct Engine<C: Clock, I: IdGen> {
    inner: Arc<Inner<C, I>>,
}

impl<C: Clock, I: IdGen> Clone for Engine<C, I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock, I: IdGen> Engine<C, I> {
    pub fn new(store: Store, clock: C, ids: I, config: EngineConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                store: Mutex::new(store),
                gates: AdmissionGates::new(),
                clock,
                ids,
                config,
            }),
        }
    }

    /// Lifecycle phase of an event as of now
    pub fn resolve_status(&self, event: &Event) -> EventStatus {
        event.status_at(self.now())
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.inner.clock.now()
    }

    pub(crate) fn next_id(&self) -> String {
        self.inner.ids.next()
    }

    pub(crate) fn gates(&self) -> &AdmissionGates {
        &self.inner.gates
    }

    pub(crate) fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Exclusive access to the store; only call from synchronous sections
    pub(crate) fn store(&self) -> Result<MutexGuard<'_, Store>, Rejection> {
        self.inner
            .store
            .lock()
            .map_err(|_| Rejection::StorageFailure("store lock poisoned".to_string()))
    }

    /// Short store read; the guard is released before returning
    pub(crate) fn event_exists(&self, id: &EventId) -> Result<bool, Rejection> {
        Ok(self.store()?.state().event(id).is_some())
    }

    /// Commit a transaction on an already locked store
    pub(crate) fn commit(store: &mut Store, ops: Vec<Operation>) -> Result<u64, Rejection> {
        store.commit(ops).map_err(Rejection::from)
    }

    /// Write a snapshot now, regardless of the interval
    pub fn snapshot(&self) -> Result<(), Rejection> {
        let mut store = self.store()?;
        store.create_snapshot().map_err(Rejection::from)?;
        Ok(())
    }

    pub(crate) fn view(store: &Store, event: &Event, now: DateTime<Utc>) -> EventView {
        EventView::new(event.clone(), store.state().admitted_count(&event.id), now)
    }
}

/// Look up a user and require a role capability
pub(crate) fn require_role(
    store: &Store,
    user_id: &UserId,
    allowed: fn(Role) -> bool,
    required: &'static str,
) -> Result<User, Rejection> {
    let user = store
        .state()
        .user(user_id)
        .ok_or_else(|| Rejection::user_not_found(user_id))?;
    if !allowed(user.role) {
        return Err(Rejection::RoleMismatch {
            user_id: user_id.clone(),
            actual: user.role,
            required,
        });
    }
    Ok(user.clone())
}

/// Log a rejection at the boundary of a public operation
pub(crate) trait LogRejection {
    fn log_rejection(self, operation: &'static str) -> Self;
}

impl<T> LogRejection for Result<T, Rejection> {
    fn log_rejection(self, operation: &'static str) -> Self {
        if let Err(rejection) = &self {
            if rejection.is_retryable() {
                tracing::error!(operation, code = rejection.code(), reason = %rejection, "storage failure");
            } else {
                tracing::warn!(operation, code = rejection.code(), reason = %rejection, "rejected");
            }
        }
        self
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
