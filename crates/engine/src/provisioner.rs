// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Volunteer provisioning and duty assignment

use crate::engine::{require_role, Engine, LogRejection};
use rollcall_core::{
    Clock, DutyAssignment, EventId, EventView, IdGen, Profile, Rejection, Role, User, UserId,
};
use rollcall_storage::{DutyAssignOp, Operation, Store, UserCreateOp};
use std::collections::BTreeSet;

/// Distinct event ids, rejecting an empty set
fn event_set(event_ids: &[EventId]) -> Result<BTreeSet<EventId>, Rejection> {
    if event_ids.is_empty() {
        return Err(Rejection::validation("at least one event is required"));
    }
    Ok(event_ids.iter().cloned().collect())
}

fn require_events(store: &Store, events: &BTreeSet<EventId>) -> Result<(), Rejection> {
    match events.iter().find(|id| store.state().event(id).is_none()) {
        Some(missing) => Err(Rejection::event_not_found(missing)),
        None => Ok(()),
    }
}

impl<C: Clock, I: IdGen> Engine<C, I> {
    /// Create a volunteer identity and its duty assignments in one
    /// transaction. Either all of them exist afterwards or none do.
    pub fn create_volunteer_with_duties(
        &self,
        organizer: &UserId,
        profile: Profile,
        event_ids: &[EventId],
    ) -> Result<UserId, Rejection> {
        let span = tracing::info_span!(
            "provisioner.create",
            organizer = %organizer,
            events = event_ids.len()
        );
        let _guard = span.enter();
        self.try_create_volunteer(organizer, profile, event_ids)
            .log_rejection("create_volunteer_with_duties")
    }

    fn try_create_volunteer(
        &self,
        organizer: &UserId,
        profile: Profile,
        event_ids: &[EventId],
    ) -> Result<UserId, Rejection> {
        let mut store = self.store()?;
        require_role(&store, organizer, Role::can_organize, "ORGANIZER")?;
        let events = event_set(event_ids)?;
        profile.validate()?;
        require_events(&store, &events)?;
        let contact = profile.contact_key();
        if store.state().user_by_contact(&contact).is_some() {
            return Err(Rejection::DuplicateIdentity(contact));
        }

        let volunteer = self.new_user(profile, Role::Volunteer);
        let id = volunteer.id.clone();
        let now = self.now();
        let mut ops = Vec::with_capacity(events.len() + 1);
        ops.push(Operation::UserCreate(UserCreateOp { user: volunteer }));
        ops.extend(events.into_iter().map(|event_id| {
            Operation::DutyAssign(DutyAssignOp {
                duty: DutyAssignment {
                    event_id,
                    user_id: id.clone(),
                    assigned_at: now,
                },
            })
        }));

        let duties = ops.len() - 1;
        Self::commit(&mut store, ops)?;
        tracing::info!(volunteer = %id, duties, "volunteer provisioned");
        Ok(id)
    }

    /// Assign more duties to an existing volunteer.
    ///
    /// Pairs that already exist are skipped, so retrying is always safe.
    pub fn assign_duties(&self, volunteer: &UserId, event_ids: &[EventId]) -> Result<(), Rejection> {
        let span = tracing::info_span!("provisioner.assign", volunteer = %volunteer, events = event_ids.len());
        let _guard = span.enter();
        self.try_assign_duties(volunteer, event_ids)
            .log_rejection("assign_duties")
    }

    fn try_assign_duties(&self, volunteer: &UserId, event_ids: &[EventId]) -> Result<(), Rejection> {
        let events = event_set(event_ids)?;
        let mut store = self.store()?;
        require_role(&store, volunteer, Role::can_staff, "VOLUNTEER")?;
        require_events(&store, &events)?;

        let now = self.now();
        let (existing, fresh): (Vec<EventId>, Vec<EventId>) = events
            .into_iter()
            .partition(|event_id| store.state().has_duty(event_id, volunteer));
        if !existing.is_empty() {
            tracing::debug!(skipped = existing.len(), "duties already assigned");
        }
        if fresh.is_empty() {
            return Ok(());
        }

        let added = fresh.len();
        let ops = fresh
            .into_iter()
            .map(|event_id| {
                Operation::DutyAssign(DutyAssignOp {
                    duty: DutyAssignment {
                        event_id,
                        user_id: volunteer.clone(),
                        assigned_at: now,
                    },
                })
            })
            .collect();
        Self::commit(&mut store, ops)?;
        tracing::info!(added, "duties assigned");
        Ok(())
    }

    /// Events `volunteer` is assigned to, soonest start first
    pub fn assigned_events(&self, volunteer: &UserId) -> Result<Vec<EventView>, Rejection> {
        let store = self.store()?;
        let now = self.now();
        let state = store.state();
        let mut views: Vec<EventView> = state
            .duties()
            .filter(|d| &d.user_id == volunteer)
            .filter_map(|d| state.event(&d.event_id))
            .map(|e| Self::view(&store, e, now))
            .collect();
        views.sort_by(|a, b| {
            (a.event.start_time, &a.event.id).cmp(&(b.event.start_time, &b.event.id))
        });
        Ok(views)
    }

    /// Volunteers assigned to `event`
    pub fn volunteers_for(&self, event: &EventId) -> Result<Vec<User>, Rejection> {
        let store = self.store()?;
        let state = store.state();
        if state.event(event).is_none() {
            return Err(Rejection::event_not_found(event));
        }
        Ok(state
            .duties()
            .filter(|d| &d.event_id == event)
            .filter_map(|d| state.user(&d.user_id).cloned())
            .collect())
    }
}

#[cfg(test)]
#[path = "provisioner_tests.rs"]
mod tests;
