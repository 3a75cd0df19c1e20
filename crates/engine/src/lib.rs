// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Rollcall participation and check-in engine

mod catalog;
mod checkin;
mod engine;
mod gates;
mod identity;
mod ledger;
mod provisioner;
mod stats;
#[cfg(test)]
mod test_helpers;

pub use catalog::EventDetails;
pub use engine::{Engine, EngineConfig};
pub use gates::{AdmissionGates, GateGuard, GateTimeout};
pub use ledger::{Participant, TicketView};
pub use stats::{Stats, StatsScope};
