// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rollcall-storage: journaled record store
//!
//! Every state change is a transaction of typed operations, journaled as a
//! single checksummed line and applied all or nothing.

mod entry;
mod error;
mod journal;
mod operation;
mod reader;
mod snapshot;
mod state;
mod store;
#[cfg(test)]
mod test_fixtures;
mod writer;

pub use entry::WalEntry;
pub use error::StoreError;
pub use journal::Journal;
#[cfg(any(test, feature = "test-support"))]
pub use journal::MemoryJournal;
pub use operation::{
    CheckInOp, DutyAssignOp, EventCreateOp, EventDeleteOp, Operation, ParticipationCreateOp,
    UserCreateOp,
};
pub use reader::{WalEntryIter, WalReadError, WalReader};
pub use snapshot::{SnapshotError, SnapshotManager, SnapshotMeta, StorableState};
pub use state::{Applied, ApplyError, MaterializedState};
pub use store::{Store, LOCK_FILE, WAL_FILE};
pub use writer::WalWriter;
