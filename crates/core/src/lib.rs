// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rollcall-core: domain types for the Rollcall participation engine
//!
//! This crate provides:
//! - Clock and ID generation abstractions (real and fake)
//! - Events, identities, participations and duty assignments
//! - The pure event status resolver
//! - The rejection taxonomy shared by every operation
//! - TOML configuration

pub mod clock;
pub mod config;
pub mod event;
pub mod id;
pub mod identity;
pub mod participation;
pub mod rejection;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{Config, ConfigError, CONFIG_FILE};
pub use event::{resolve_status, Event, EventStatus, EventView, NewEvent};
pub use id::{EventId, IdGen, SequentialIdGen, TicketId, UserId, UuidIdGen};
pub use identity::{normalize_contact, Profile, Role, User};
pub use participation::{AttendanceState, CheckIn, DutyAssignment, Participation};
pub use rejection::Rejection;
