// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event catalog: create, read, list and cascade delete

use crate::engine::{require_role, Engine, LogRejection};
use rollcall_core::{Clock, EventId, EventView, IdGen, NewEvent, Rejection, Role, UserId};
use rollcall_storage::{EventCreateOp, EventDeleteOp, Operation};
use serde::Serialize;

/// An event as seen by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetails {
    #[serde(flatten)]
    pub view: EventView,
    pub has_registered: bool,
}

impl<C: Clock, I: IdGen> Engine<C, I> {
    /// Create an event owned by `organizer`
    pub fn create_event(&self, organizer: &UserId, new: NewEvent) -> Result<EventId, Rejection> {
        let span = tracing::info_span!("catalog.create", organizer = %organizer, name = %new.name);
        let _guard = span.enter();
        self.try_create_event(organizer, new)
            .log_rejection("create_event")
    }

    fn try_create_event(&self, organizer: &UserId, new: NewEvent) -> Result<EventId, Rejection> {
        new.validate()?;
        let mut store = self.store()?;
        require_role(&store, organizer, Role::can_organize, "ORGANIZER")?;

        let id = EventId(self.next_id());
        let event = new.into_event(id.clone(), organizer.clone(), self.now());
        Self::commit(&mut store, vec![Operation::EventCreate(EventCreateOp { event })])?;
        tracing::info!(event = %id, "event created");
        Ok(id)
    }

    /// Event with its status resolved now
    pub fn event(&self, id: &EventId) -> Result<EventView, Rejection> {
        let store = self.store()?;
        let event = store
            .state()
            .event(id)
            .ok_or_else(|| Rejection::event_not_found(id))?;
        Ok(Self::view(&store, event, self.now()))
    }

    /// All events, soonest start first
    pub fn list_events(&self) -> Result<Vec<EventView>, Rejection> {
        let store = self.store()?;
        let now = self.now();
        let mut views: Vec<EventView> = store
            .state()
            .events()
            .map(|e| Self::view(&store, e, now))
            .collect();
        views.sort_by(|a, b| {
            (a.event.start_time, &a.event.id).cmp(&(b.event.start_time, &b.event.id))
        });
        Ok(views)
    }

    /// Events owned by `organizer`, newest first
    pub fn list_owned_events(&self, organizer: &UserId) -> Result<Vec<EventView>, Rejection> {
        let store = self.store()?;
        let now = self.now();
        let mut views: Vec<EventView> = store
            .state()
            .events()
            .filter(|e| &e.owner == organizer)
            .map(|e| Self::view(&store, e, now))
            .collect();
        views.sort_by(|a, b| {
            (b.event.created_at, &b.event.id).cmp(&(a.event.created_at, &a.event.id))
        });
        Ok(views)
    }

    /// Event details plus whether `user` already holds a ticket for it
    pub fn event_details_for(
        &self,
        id: &EventId,
        user: &UserId,
    ) -> Result<EventDetails, Rejection> {
        let store = self.store()?;
        let event = store
            .state()
            .event(id)
            .ok_or_else(|| Rejection::event_not_found(id))?;
        Ok(EventDetails {
            view: Self::view(&store, event, self.now()),
            has_registered: store.state().registration(id, user).is_some(),
        })
    }

    /// Delete an event and, in the same transaction, every participation
    /// and duty assignment that references it. Only the owner may delete.
    pub fn delete_event(&self, organizer: &UserId, id: &EventId) -> Result<(), Rejection> {
        let span = tracing::info_span!("catalog.delete", organizer = %organizer, event = %id);
        let _guard = span.enter();
        self.try_delete_event(organizer, id)
            .log_rejection("delete_event")
    }

    fn try_delete_event(&self, organizer: &UserId, id: &EventId) -> Result<(), Rejection> {
        let mut store = self.store()?;
        let owner = store
            .state()
            .event(id)
            .ok_or_else(|| Rejection::event_not_found(id))?
            .owner
            .clone();
        let user = require_role(&store, organizer, Role::can_organize, "ORGANIZER")?;
        if owner != user.id {
            return Err(Rejection::RoleMismatch {
                user_id: user.id,
                actual: user.role,
                required: "event owner",
            });
        }

        let tickets = store.state().admitted_count(id);
        Self::commit(
            &mut store,
            vec![Operation::EventDelete(EventDeleteOp { id: id.clone() })],
        )?;
        self.gates().forget(id);
        tracing::info!(tickets, "event deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
