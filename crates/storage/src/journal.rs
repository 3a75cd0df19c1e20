// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable sink for committed transactions

use crate::error::StoreError;
use crate::operation::Operation;

/// Append-only record of committed transactions.
///
/// `append` must be all-or-nothing: when it returns an error, the
/// transaction must not be visible on the next replay.
pub trait Journal: Send {
    /// Persist one transaction, returning its sequence number
    fn append(&mut self, ops: &[Operation]) -> Result<u64, StoreError>;

    /// Sequence number the next append will receive
    fn next_sequence(&self) -> u64;
}

#[cfg(any(test, feature = "test-support"))]
mod memory {
    use super::*;
    use crate::entry::WalEntry;
    use std::sync::{Arc, Mutex, MutexGuard};

    type FailurePredicate = Box<dyn Fn(&[Operation]) -> bool + Send>;

    #[derive(Default)]
    struct MemoryJournalState {
        entries: Vec<WalEntry>,
        fail_when: Option<FailurePredicate>,
    }

    /// In-memory journal with injectable write failures.
    ///
    /// Clones share the same entries, so a test can keep a handle after
    /// giving one to a store.
    #[derive(Clone, Default)]
    pub struct MemoryJournal {
        inner: Arc<Mutex<MemoryJournalState>>,
    }

    impl MemoryJournal {
        pub fn new() -> Self {
            Self::default()
        }

        fn lock(&self) -> MutexGuard<'_, MemoryJournalState> {
            self.inner.lock().unwrap_or_else(|e| e.into_inner())
        }

        /// Fail every append whose transaction matches `predicate`
        pub fn fail_when(&self, predicate: impl Fn(&[Operation]) -> bool + Send + 'static) {
            self.lock().fail_when = Some(Box::new(predicate));
        }

        /// Fail every append until cleared
        pub fn fail_all(&self) {
            self.fail_when(|_| true);
        }

        pub fn clear_failure(&self) {
            self.lock().fail_when = None;
        }

        /// All committed entries, oldest first
        pub fn entries(&self) -> Vec<WalEntry> {
            self.lock().entries.clone()
        }

        /// All committed operations, flattened across transactions
        pub fn operations(&self) -> Vec<Operation> {
            self.lock()
                .entries
                .iter()
                .flat_map(|e| e.ops.iter().cloned())
                .collect()
        }
    }

    impl Journal for MemoryJournal {
        fn append(&mut self, ops: &[Operation]) -> Result<u64, StoreError> {
            let mut state = self.lock();
            if state.fail_when.as_ref().is_some_and(|fail| fail(ops)) {
                return Err(StoreError::Io(std::io::Error::other(
                    "injected journal failure",
                )));
            }
            let sequence = state.entries.len() as u64;
            state
                .entries
                .push(WalEntry::new(sequence, "memory", ops.to_vec()));
            Ok(sequence)
        }

        fn next_sequence(&self) -> u64 {
            self.lock().entries.len() as u64
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryJournal;

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
