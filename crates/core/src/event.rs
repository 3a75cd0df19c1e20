// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events and their derived lifecycle status
//!
//! An event is immutable once created. Its status is never stored; it is a
//! projection of the event window onto the current time, recomputed on
//! every read.

use crate::id::{EventId, UserId};
use crate::rejection::Rejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of an event relative to `now`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Upcoming,
    Live,
    Completed,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventStatus::Upcoming => "UPCOMING",
            EventStatus::Live => "LIVE",
            EventStatus::Completed => "COMPLETED",
        };
        f.write_str(s)
    }
}

/// Resolve the phase of the window `[start, end]` at `now`.
///
/// Both ends of the window are inclusive.
pub fn resolve_status(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> EventStatus {
    if now < start {
        EventStatus::Upcoming
    } else if now <= end {
        EventStatus::Live
    } else {
        EventStatus::Completed
    }
}

/// A stored event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub venue: String,
    /// Hard registration ceiling
    pub capacity: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    /// Entry fee in minor currency units
    pub fee: u64,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn status_at(&self, now: DateTime<Utc>) -> EventStatus {
        resolve_status(self.start_time, self.end_time, now)
    }

    /// Registration window is open: deadline and end both still ahead or now
    pub fn accepts_registrations_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.registration_deadline && now <= self.end_time
    }
}

/// Organizer input for a new event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub venue: String,
    pub capacity: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    #[serde(default)]
    pub fee: u64,
}

impl NewEvent {
    /// Check the event facts are consistent
    pub fn validate(&self) -> Result<(), Rejection> {
        if self.name.trim().is_empty() {
            return Err(Rejection::validation("event name must not be blank"));
        }
        if self.venue.trim().is_empty() {
            return Err(Rejection::validation("venue must not be blank"));
        }
        if self.capacity == 0 {
            return Err(Rejection::validation("capacity must be positive"));
        }
        if self.start_time >= self.end_time {
            return Err(Rejection::validation("start time must precede end time"));
        }
        if self.registration_deadline > self.end_time {
            return Err(Rejection::validation(
                "registration deadline must not be after end time",
            ));
        }
        Ok(())
    }

    pub fn into_event(self, id: EventId, owner: UserId, created_at: DateTime<Utc>) -> Event {
        Event {
            id,
            name: self.name,
            venue: self.venue,
            capacity: self.capacity,
            start_time: self.start_time,
            end_time: self.end_time,
            registration_deadline: self.registration_deadline,
            fee: self.fee,
            owner,
            created_at,
        }
    }
}

/// Read model: an event with its status resolved at read time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub status: EventStatus,
    pub registered: u32,
}

impl EventView {
    pub fn new(event: Event, registered: u32, now: DateTime<Utc>) -> Self {
        let status = event.status_at(now);
        Self {
            event,
            status,
            registered,
        }
    }

    pub fn seats_left(&self) -> u32 {
        self.event.capacity.saturating_sub(self.registered)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
