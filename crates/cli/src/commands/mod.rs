// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod checkin;
pub mod event;
pub mod register;
pub mod stats;
pub mod user;
pub mod volunteer;

use rollcall_core::{SystemClock, UuidIdGen};
use rollcall_engine::Engine;

/// Engine as the CLI runs it: wall-clock time and UUID identifiers
pub type CliEngine = Engine<SystemClock, UuidIdGen>;
