// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed rejections returned by every engine operation
//!
//! Each precondition failure has its own variant so the request layer can
//! map it to a status code without parsing messages.

use crate::id::{EventId, TicketId, UserId};
use crate::identity::Role;
use thiserror::Error;

/// Why an operation was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("validation failed: {0}")]
    ValidationError(String),
    #[error("registration deadline has passed for event {0}")]
    DeadlinePassed(EventId),
    #[error("event {0} has already ended")]
    EventEnded(EventId),
    #[error("user {user_id} is already registered for event {event_id}")]
    AlreadyRegistered { event_id: EventId, user_id: UserId },
    #[error("event {event_id} is full ({capacity} registrations)")]
    CapacityExceeded { event_id: EventId, capacity: u32 },
    #[error("ticket not found: {0}")]
    TicketNotFound(TicketId),
    #[error("ticket {0} is already checked in")]
    AlreadyCheckedIn(TicketId),
    #[error("ticket {ticket} was issued for event {issued_for}, not {claimed}")]
    EventMismatch {
        ticket: TicketId,
        issued_for: EventId,
        claimed: EventId,
    },
    #[error("event {0} has expired")]
    EventExpired(EventId),
    #[error("an identity with contact {0} already exists")]
    DuplicateIdentity(String),
    #[error("user {user_id} has role {actual}, operation requires {required}")]
    RoleMismatch {
        user_id: UserId,
        actual: Role,
        required: &'static str,
    },
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl Rejection {
    pub fn validation(message: impl Into<String>) -> Self {
        Rejection::ValidationError(message.into())
    }

    pub fn event_not_found(id: &EventId) -> Self {
        Rejection::NotFound {
            kind: "event",
            id: id.0.clone(),
        }
    }

    pub fn user_not_found(id: &UserId) -> Self {
        Rejection::NotFound {
            kind: "user",
            id: id.0.clone(),
        }
    }

    /// Stable machine-readable code for the request layer
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::NotFound { .. } => "not_found",
            Rejection::ValidationError(_) => "validation_error",
            Rejection::DeadlinePassed(_) => "deadline_passed",
            Rejection::EventEnded(_) => "event_ended",
            Rejection::AlreadyRegistered { .. } => "already_registered",
            Rejection::CapacityExceeded { .. } => "capacity_exceeded",
            Rejection::TicketNotFound(_) => "ticket_not_found",
            Rejection::AlreadyCheckedIn(_) => "already_checked_in",
            Rejection::EventMismatch { .. } => "event_mismatch",
            Rejection::EventExpired(_) => "event_expired",
            Rejection::DuplicateIdentity(_) => "duplicate_identity",
            Rejection::RoleMismatch { .. } => "role_mismatch",
            Rejection::StorageFailure(_) => "storage_failure",
        }
    }

    /// Whether a blind retry is safe.
    ///
    /// Only storage faults qualify: nothing was written, so repeating the
    /// call cannot duplicate a record.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Rejection::StorageFailure(_))
    }
}

#[cfg(test)]
#[path = "rejection_tests.rs"]
mod tests;
