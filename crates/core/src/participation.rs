// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Participation records and duty assignments
//!
//! A participation moves through a two-state machine:
//!
//! ```text
//! Registered ──check-in──▶ CheckedIn
//! ```
//!
//! No transition leaves `CheckedIn`.

use crate::id::{EventId, TicketId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attendance state of a participation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceState {
    Registered,
    CheckedIn,
}

/// One admitted registrant of one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    /// Doubles as the attendance ticket
    pub id: TicketId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub registered_at: DateTime<Utc>,
    pub checked_in: bool,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl Participation {
    pub fn new(
        id: TicketId,
        event_id: EventId,
        user_id: UserId,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            event_id,
            user_id,
            registered_at,
            checked_in: false,
            checked_in_at: None,
        }
    }

    pub fn state(&self) -> AttendanceState {
        if self.checked_in {
            AttendanceState::CheckedIn
        } else {
            AttendanceState::Registered
        }
    }
}

/// A committed check-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckIn {
    pub ticket: TicketId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub checked_in_at: DateTime<Utc>,
}

/// Binding of a volunteer to an event they staff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignment {
    pub event_id: EventId,
    pub user_id: UserId,
    pub assigned_at: DateTime<Utc>,
}
