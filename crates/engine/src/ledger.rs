// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration ledger: capacity-gated admission and ticket issue
//!
//! An admission holds the event's gate for its whole check-then-commit, so
//! concurrent admits for one event are linearized. The store's conditional
//! insert re-checks pair uniqueness and the running count inside the commit
//! itself, so the ceiling holds even for a writer that bypasses the gate.

use crate::engine::{require_role, Engine, LogRejection};
use chrono::{DateTime, Utc};
use rollcall_core::{
    AttendanceState, Clock, EventId, EventView, IdGen, Participation, Rejection, Role, TicketId,
    UserId,
};
use rollcall_storage::{Operation, ParticipationCreateOp};
use serde::Serialize;
use tracing::Instrument;

/// A user's ticket together with the event it admits to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketView {
    pub ticket: TicketId,
    pub state: AttendanceState,
    pub registered_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub event: EventView,
}

/// One admitted registrant of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub ticket: TicketId,
    pub user_id: UserId,
    pub name: String,
    pub contact: String,
    pub state: AttendanceState,
}

impl<C: Clock, I: IdGen> Engine<C, I> {
    /// Admit `user` to `event`, returning the issued ticket.
    ///
    /// Checks, in order: the event exists, the user exists and may
    /// register, the deadline has not passed, the event has not ended, the
    /// user holds no ticket yet, and a seat is left.
    pub async fn admit(&self, event_id: &EventId, user_id: &UserId) -> Result<TicketId, Rejection> {
        let span = tracing::info_span!("ledger.admit", event = %event_id, user = %user_id);
        self.try_admit(event_id, user_id)
            .instrument(span)
            .await
            .log_rejection("admit")
    }

    async fn try_admit(&self, event_id: &EventId, user_id: &UserId) -> Result<TicketId, Rejection> {
        // Unknown ids must not leave a gate behind
        if !self.event_exists(event_id)? {
            return Err(Rejection::event_not_found(event_id));
        }
        let _gate = self
            .gates()
            .acquire(event_id, self.config().admission_timeout)
            .await
            .map_err(|e| Rejection::StorageFailure(e.to_string()))?;

        let now = self.now();
        let mut store = self.store()?;
        let state = store.state();

        let Some(event) = state.event(event_id) else {
            // Deleted while this admission waited on its gate
            self.gates().forget(event_id);
            return Err(Rejection::event_not_found(event_id));
        };
        require_role(&store, user_id, Role::can_register, "ATTENDEE")?;
        if now > event.registration_deadline {
            return Err(Rejection::DeadlinePassed(event_id.clone()));
        }
        // Unreachable while events validate deadline <= end; kept for
        // records that bypass validation
        if now > event.end_time {
            return Err(Rejection::EventEnded(event_id.clone()));
        }
        if state.registration(event_id, user_id).is_some() {
            return Err(Rejection::AlreadyRegistered {
                event_id: event_id.clone(),
                user_id: user_id.clone(),
            });
        }
        let admitted = state.admitted_count(event_id);
        if admitted >= event.capacity {
            return Err(Rejection::CapacityExceeded {
                event_id: event_id.clone(),
                capacity: event.capacity,
            });
        }

        let ticket = TicketId(self.next_id());
        let participation = Participation::new(ticket.clone(), event_id.clone(), user_id.clone(), now);
        Self::commit(
            &mut store,
            vec![Operation::ParticipationCreate(ParticipationCreateOp { participation })],
        )?;
        tracing::info!(ticket = %ticket, seat = admitted + 1, "admitted");
        Ok(ticket)
    }

    /// Tickets held by `user`, oldest registration first.
    ///
    /// Participations whose event no longer exists are skipped.
    pub fn tickets_for(&self, user: &UserId) -> Result<Vec<TicketView>, Rejection> {
        let store = self.store()?;
        let now = self.now();
        let state = store.state();
        let mut tickets: Vec<TicketView> = state
            .participations()
            .filter(|p| &p.user_id == user)
            .filter_map(|p| {
                let event = state.event(&p.event_id)?;
                Some(TicketView {
                    ticket: p.id.clone(),
                    state: p.state(),
                    registered_at: p.registered_at,
                    checked_in_at: p.checked_in_at,
                    event: Self::view(&store, event, now),
                })
            })
            .collect();
        tickets.sort_by(|a, b| (a.registered_at, &a.ticket).cmp(&(b.registered_at, &b.ticket)));
        Ok(tickets)
    }

    /// Admitted registrants of `event`, in registration order
    pub fn participants(&self, event: &EventId) -> Result<Vec<Participant>, Rejection> {
        let store = self.store()?;
        let state = store.state();
        if state.event(event).is_none() {
            return Err(Rejection::event_not_found(event));
        }
        let mut rows: Vec<&Participation> = state
            .participations()
            .filter(|p| &p.event_id == event)
            .collect();
        rows.sort_by(|a, b| (a.registered_at, &a.id).cmp(&(b.registered_at, &b.id)));
        Ok(rows
            .into_iter()
            .filter_map(|p| {
                let user = state.user(&p.user_id)?;
                Some(Participant {
                    ticket: p.id.clone(),
                    user_id: user.id.clone(),
                    name: user.name.clone(),
                    contact: user.contact.clone(),
                    state: p.state(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
