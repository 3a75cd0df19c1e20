// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Check-in validation
//!
//! ```text
//! Registered ──check_in──▶ CheckedIn
//! ```
//!
//! The transition is committed as a conditional update that only applies
//! to an unchecked ticket, so two scans of one ticket cannot both win.

use crate::engine::{Engine, LogRejection};
use rollcall_core::{CheckIn, Clock, EventId, IdGen, Rejection, TicketId};
use rollcall_storage::{CheckInOp, Operation};

impl<C: Clock, I: IdGen> Engine<C, I> {
    /// Check in the holder of `ticket` at the scanner of `claimed_event`
    pub fn check_in(&self, ticket: &TicketId, claimed_event: &EventId) -> Result<CheckIn, Rejection> {
        let span = tracing::info_span!("checkin.scan", ticket = %ticket, event = %claimed_event);
        let _guard = span.enter();
        self.try_check_in(ticket, claimed_event)
            .log_rejection("check_in")
    }

    fn try_check_in(&self, ticket: &TicketId, claimed_event: &EventId) -> Result<CheckIn, Rejection> {
        let now = self.now();
        let mut store = self.store()?;
        let state = store.state();

        let participation = state
            .participation(ticket)
            .ok_or_else(|| Rejection::TicketNotFound(ticket.clone()))?;
        if participation.checked_in {
            return Err(Rejection::AlreadyCheckedIn(ticket.clone()));
        }
        if &participation.event_id != claimed_event {
            return Err(Rejection::EventMismatch {
                ticket: ticket.clone(),
                issued_for: participation.event_id.clone(),
                claimed: claimed_event.clone(),
            });
        }
        let event = state
            .event(claimed_event)
            .ok_or_else(|| Rejection::event_not_found(claimed_event))?;
        if now > event.end_time {
            return Err(Rejection::EventExpired(claimed_event.clone()));
        }
        let user_id = participation.user_id.clone();

        Self::commit(
            &mut store,
            vec![Operation::CheckIn(CheckInOp {
                ticket: ticket.clone(),
                event_id: claimed_event.clone(),
                at: now,
            })],
        )?;
        tracing::info!(user = %user_id, "checked in");
        Ok(CheckIn {
            ticket: ticket.clone(),
            event_id: claimed_event.clone(),
            user_id,
            checked_in_at: now,
        })
    }
}

#[cfg(test)]
#[path = "checkin_tests.rs"]
mod tests;
