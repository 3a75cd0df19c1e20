// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state from WAL replay
//!
//! The MaterializedState is the in-memory representation of all records,
//! rebuilt by replaying journaled transactions on top of a snapshot.
//!
//! Applying an operation is where the storage-level invariants live: a
//! participation insert is conditional on the pair being new and the
//! event's running count being under capacity, a check-in is conditional on
//! the ticket being unchecked, and a duty needs a volunteer. A transaction
//! that trips any of these is rolled back entirely.

use crate::operation::*;
use rollcall_core::{
    normalize_contact, DutyAssignment, Event, EventId, Participation, Rejection, Role, TicketId,
    User, UserId,
};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Error applying an operation to state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("entity not found: {kind} {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("entity already exists: {kind} {id}")]
    AlreadyExists { kind: &'static str, id: String },
    #[error("contact already bound: {0}")]
    DuplicateContact(String),
    #[error("already registered: {user_id} for {event_id}")]
    AlreadyRegistered { event_id: EventId, user_id: UserId },
    #[error("capacity {capacity} reached for {event_id}")]
    CapacityExceeded { event_id: EventId, capacity: u32 },
    #[error("ticket already checked in: {0}")]
    AlreadyCheckedIn(TicketId),
    #[error("ticket {ticket} belongs to {issued_for}, presented at {claimed}")]
    EventMismatch {
        ticket: TicketId,
        issued_for: EventId,
        claimed: EventId,
    },
    #[error("event expired: {0}")]
    EventExpired(EventId),
    #[error("user {user_id} is {actual}, needs {required}")]
    RoleMismatch {
        user_id: UserId,
        actual: Role,
        required: &'static str,
    },
}

impl From<ApplyError> for Rejection {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::NotFound { kind: "ticket", id } => {
                Rejection::TicketNotFound(TicketId(id))
            }
            ApplyError::NotFound { kind, id } => Rejection::NotFound { kind, id },
            ApplyError::AlreadyExists { kind, id } => {
                Rejection::StorageFailure(format!("identifier collision: {kind} {id}"))
            }
            ApplyError::DuplicateContact(contact) => Rejection::DuplicateIdentity(contact),
            ApplyError::AlreadyRegistered { event_id, user_id } => {
                Rejection::AlreadyRegistered { event_id, user_id }
            }
            ApplyError::CapacityExceeded { event_id, capacity } => {
                Rejection::CapacityExceeded { event_id, capacity }
            }
            ApplyError::AlreadyCheckedIn(ticket) => Rejection::AlreadyCheckedIn(ticket),
            ApplyError::EventMismatch {
                ticket,
                issued_for,
                claimed,
            } => Rejection::EventMismatch {
                ticket,
                issued_for,
                claimed,
            },
            ApplyError::EventExpired(id) => Rejection::EventExpired(id),
            ApplyError::RoleMismatch {
                user_id,
                actual,
                required,
            } => Rejection::RoleMismatch {
                user_id,
                actual,
                required,
            },
        }
    }
}

/// Records removed by an event delete, kept to undo it
#[derive(Debug)]
struct Cascade {
    event: Event,
    participations: Vec<Participation>,
    duties: Vec<DutyAssignment>,
}

/// Inverse of one applied operation
#[derive(Debug)]
enum Undo {
    Nothing,
    RemoveUser(UserId),
    RemoveEvent(EventId),
    RestoreEvent(Box<Cascade>),
    RemoveParticipation(TicketId),
    RevertCheckIn(TicketId),
    RemoveDuty(EventId, UserId),
}

/// Undo log of a transaction accepted by [`MaterializedState::apply_all`]
#[derive(Debug)]
#[must_use]
pub struct Applied(Vec<Undo>);

/// Full record state materialized from the journal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializedState {
    events: HashMap<EventId, Event>,
    users: HashMap<UserId, User>,
    /// Normalized contact -> owner
    contacts: HashMap<String, UserId>,
    participations: HashMap<TicketId, Participation>,
    /// (event, user) -> ticket; enforces one participation per pair
    registrations: HashMap<(EventId, UserId), TicketId>,
    /// Running participation count per event
    admitted: HashMap<EventId, u32>,
    duties: BTreeMap<(EventId, UserId), DutyAssignment>,
}

impl MaterializedState {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state and its indexes from stored records
    pub fn from_records(
        events: Vec<Event>,
        users: Vec<User>,
        participations: Vec<Participation>,
        duties: Vec<DutyAssignment>,
    ) -> Self {
        let mut state = Self::new();
        for user in users {
            state
                .contacts
                .insert(normalize_contact(&user.contact), user.id.clone());
            state.users.insert(user.id.clone(), user);
        }
        for event in events {
            state.events.insert(event.id.clone(), event);
        }
        for p in participations {
            state.insert_participation(p);
        }
        for duty in duties {
            state
                .duties
                .insert((duty.event_id.clone(), duty.user_id.clone()), duty);
        }
        state
    }

    // === Reads ===

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.get(id)
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user_by_contact(&self, contact: &str) -> Option<&User> {
        self.contacts
            .get(&normalize_contact(contact))
            .and_then(|id| self.users.get(id))
    }

    pub fn participation(&self, ticket: &TicketId) -> Option<&Participation> {
        self.participations.get(ticket)
    }

    pub fn participations(&self) -> impl Iterator<Item = &Participation> {
        self.participations.values()
    }

    /// Participation of `user` in `event`, if admitted
    pub fn registration(&self, event: &EventId, user: &UserId) -> Option<&Participation> {
        self.registrations
            .get(&(event.clone(), user.clone()))
            .and_then(|ticket| self.participations.get(ticket))
    }

    /// Number of participations currently held for an event
    pub fn admitted_count(&self, event: &EventId) -> u32 {
        self.admitted.get(event).copied().unwrap_or(0)
    }

    pub fn has_duty(&self, event: &EventId, user: &UserId) -> bool {
        self.duties.contains_key(&(event.clone(), user.clone()))
    }

    pub fn duties(&self) -> impl Iterator<Item = &DutyAssignment> {
        self.duties.values()
    }

    // === Writes ===

    /// Apply a transaction: every operation or none of them.
    ///
    /// On the first failing operation, the operations already applied are
    /// undone in reverse order and the error is returned. On success the
    /// returned [`Applied`] can revert the whole transaction, which the store
    /// does when the journal write fails.
    pub fn apply_all(&mut self, ops: &[Operation]) -> Result<Applied, ApplyError> {
        let mut undo_log = Vec::with_capacity(ops.len());
        for op in ops {
            match self.apply(op) {
                Ok(undo) => undo_log.push(undo),
                Err(e) => {
                    self.rollback(undo_log);
                    return Err(e);
                }
            }
        }
        Ok(Applied(undo_log))
    }

    /// Revert a transaction previously accepted by [`apply_all`].
    ///
    /// [`apply_all`]: MaterializedState::apply_all
    pub fn revert(&mut self, applied: Applied) {
        self.rollback(applied.0);
    }

    fn rollback(&mut self, undo_log: Vec<Undo>) {
        for undo in undo_log.into_iter().rev() {
            self.undo(undo);
        }
    }

    fn apply(&mut self, op: &Operation) -> Result<Undo, ApplyError> {
        match op {
            Operation::UserCreate(UserCreateOp { user }) => {
                if self.users.contains_key(&user.id) {
                    return Err(ApplyError::AlreadyExists {
                        kind: "user",
                        id: user.id.0.clone(),
                    });
                }
                let key = normalize_contact(&user.contact);
                if self.contacts.contains_key(&key) {
                    return Err(ApplyError::DuplicateContact(key));
                }
                self.contacts.insert(key, user.id.clone());
                self.users.insert(user.id.clone(), user.clone());
                Ok(Undo::RemoveUser(user.id.clone()))
            }

            Operation::EventCreate(EventCreateOp { event }) => {
                if self.events.contains_key(&event.id) {
                    return Err(ApplyError::AlreadyExists {
                        kind: "event",
                        id: event.id.0.clone(),
                    });
                }
                self.events.insert(event.id.clone(), event.clone());
                Ok(Undo::RemoveEvent(event.id.clone()))
            }

            Operation::EventDelete(EventDeleteOp { id }) => {
                let event = self.events.remove(id).ok_or_else(|| ApplyError::NotFound {
                    kind: "event",
                    id: id.0.clone(),
                })?;
                let tickets: Vec<TicketId> = self
                    .participations
                    .values()
                    .filter(|p| &p.event_id == id)
                    .map(|p| p.id.clone())
                    .collect();
                let mut participations = Vec::with_capacity(tickets.len());
                for ticket in tickets {
                    if let Some(p) = self.remove_participation(&ticket) {
                        participations.push(p);
                    }
                }
                self.admitted.remove(id);
                let duty_keys: Vec<(EventId, UserId)> = self
                    .duties
                    .keys()
                    .filter(|(event_id, _)| event_id == id)
                    .cloned()
                    .collect();
                let duties = duty_keys
                    .iter()
                    .filter_map(|key| self.duties.remove(key))
                    .collect();
                Ok(Undo::RestoreEvent(Box::new(Cascade {
                    event,
                    participations,
                    duties,
                })))
            }

            Operation::ParticipationCreate(ParticipationCreateOp { participation }) => {
                let event = self.events.get(&participation.event_id).ok_or_else(|| {
                    ApplyError::NotFound {
                        kind: "event",
                        id: participation.event_id.0.clone(),
                    }
                })?;
                if !self.users.contains_key(&participation.user_id) {
                    return Err(ApplyError::NotFound {
                        kind: "user",
                        id: participation.user_id.0.clone(),
                    });
                }
                let pair = (participation.event_id.clone(), participation.user_id.clone());
                if self.registrations.contains_key(&pair) {
                    return Err(ApplyError::AlreadyRegistered {
                        event_id: pair.0,
                        user_id: pair.1,
                    });
                }
                if self.admitted_count(&event.id) >= event.capacity {
                    return Err(ApplyError::CapacityExceeded {
                        event_id: event.id.clone(),
                        capacity: event.capacity,
                    });
                }
                if self.participations.contains_key(&participation.id) {
                    return Err(ApplyError::AlreadyExists {
                        kind: "ticket",
                        id: participation.id.0.clone(),
                    });
                }
                self.insert_participation(participation.clone());
                Ok(Undo::RemoveParticipation(participation.id.clone()))
            }

            Operation::CheckIn(CheckInOp {
                ticket,
                event_id,
                at,
            }) => {
                let p = self
                    .participations
                    .get(ticket)
                    .ok_or_else(|| ApplyError::NotFound {
                        kind: "ticket",
                        id: ticket.0.clone(),
                    })?;
                if p.checked_in {
                    return Err(ApplyError::AlreadyCheckedIn(ticket.clone()));
                }
                if &p.event_id != event_id {
                    return Err(ApplyError::EventMismatch {
                        ticket: ticket.clone(),
                        issued_for: p.event_id.clone(),
                        claimed: event_id.clone(),
                    });
                }
                let event = self
                    .events
                    .get(event_id)
                    .ok_or_else(|| ApplyError::NotFound {
                        kind: "event",
                        id: event_id.0.clone(),
                    })?;
                if *at > event.end_time {
                    return Err(ApplyError::EventExpired(event_id.clone()));
                }
                if let Some(p) = self.participations.get_mut(ticket) {
                    p.checked_in = true;
                    p.checked_in_at = Some(*at);
                }
                Ok(Undo::RevertCheckIn(ticket.clone()))
            }

            Operation::DutyAssign(DutyAssignOp { duty }) => {
                if !self.events.contains_key(&duty.event_id) {
                    return Err(ApplyError::NotFound {
                        kind: "event",
                        id: duty.event_id.0.clone(),
                    });
                }
                let user = self
                    .users
                    .get(&duty.user_id)
                    .ok_or_else(|| ApplyError::NotFound {
                        kind: "user",
                        id: duty.user_id.0.clone(),
                    })?;
                if !user.role.can_staff() {
                    return Err(ApplyError::RoleMismatch {
                        user_id: user.id.clone(),
                        actual: user.role,
                        required: "VOLUNTEER",
                    });
                }
                let key = (duty.event_id.clone(), duty.user_id.clone());
                if self.duties.contains_key(&key) {
                    return Ok(Undo::Nothing);
                }
                self.duties.insert(key, duty.clone());
                Ok(Undo::RemoveDuty(
                    duty.event_id.clone(),
                    duty.user_id.clone(),
                ))
            }

            Operation::SnapshotTaken { .. } => Ok(Undo::Nothing),
        }
    }

    fn undo(&mut self, undo: Undo) {
        match undo {
            Undo::Nothing => {}
            Undo::RemoveUser(id) => {
                if let Some(user) = self.users.remove(&id) {
                    self.contacts.remove(&normalize_contact(&user.contact));
                }
            }
            Undo::RemoveEvent(id) => {
                self.events.remove(&id);
            }
            Undo::RestoreEvent(cascade) => {
                let Cascade {
                    event,
                    participations,
                    duties,
                } = *cascade;
                self.events.insert(event.id.clone(), event);
                for p in participations {
                    self.insert_participation(p);
                }
                for duty in duties {
                    self.duties
                        .insert((duty.event_id.clone(), duty.user_id.clone()), duty);
                }
            }
            Undo::RemoveParticipation(ticket) => {
                self.remove_participation(&ticket);
            }
            Undo::RevertCheckIn(ticket) => {
                if let Some(p) = self.participations.get_mut(&ticket) {
                    p.checked_in = false;
                    p.checked_in_at = None;
                }
            }
            Undo::RemoveDuty(event_id, user_id) => {
                self.duties.remove(&(event_id, user_id));
            }
        }
    }

    fn insert_participation(&mut self, p: Participation) {
        self.registrations
            .insert((p.event_id.clone(), p.user_id.clone()), p.id.clone());
        *self.admitted.entry(p.event_id.clone()).or_insert(0) += 1;
        self.participations.insert(p.id.clone(), p);
    }

    fn remove_participation(&mut self, ticket: &TicketId) -> Option<Participation> {
        let p = self.participations.remove(ticket)?;
        self.registrations
            .remove(&(p.event_id.clone(), p.user_id.clone()));
        // Events without tickets have no counter entry
        if let Some(count) = self.admitted.get_mut(&p.event_id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.admitted.remove(&p.event_id);
            }
        }
        Some(p)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
