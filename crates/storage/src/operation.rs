// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Journal operation types
//!
//! Every state change is a typed operation. Operations are grouped into
//! transactions; a transaction is journaled as one entry and applied all or
//! nothing.

use chrono::{DateTime, Utc};
use rollcall_core::{DutyAssignment, Event, EventId, Participation, TicketId, User};
use serde::{Deserialize, Serialize};

/// All state-changing operations in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    UserCreate(UserCreateOp),

    EventCreate(EventCreateOp),
    /// Removes the event with all participations and duties referencing it
    EventDelete(EventDeleteOp),

    /// Conditional insert: fails if the pair exists or the event is full
    ParticipationCreate(ParticipationCreateOp),
    /// Conditional update: fails unless the ticket is still unchecked
    CheckIn(CheckInOp),

    /// Absorbed without error if the pair already exists
    DutyAssign(DutyAssignOp),

    // Snapshot marker
    SnapshotTaken { snapshot_id: String },
}

impl Operation {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::UserCreate(_) => "user_create",
            Operation::EventCreate(_) => "event_create",
            Operation::EventDelete(_) => "event_delete",
            Operation::ParticipationCreate(_) => "participation_create",
            Operation::CheckIn(_) => "check_in",
            Operation::DutyAssign(_) => "duty_assign",
            Operation::SnapshotTaken { .. } => "snapshot_taken",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreateOp {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCreateOp {
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDeleteOp {
    pub id: EventId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationCreateOp {
    pub participation: Participation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInOp {
    pub ticket: TicketId,
    /// Event the ticket was presented at
    pub event_id: EventId,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignOp {
    pub duty: DutyAssignment,
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
