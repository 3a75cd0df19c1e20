// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identity registry

use crate::engine::{Engine, LogRejection};
use rollcall_core::{Clock, IdGen, Profile, Rejection, Role, User, UserId};
use rollcall_storage::{Operation, UserCreateOp};

impl<C: Clock, I: IdGen> Engine<C, I> {
    /// Register a new identity with a fixed role.
    ///
    /// The contact must not be bound to any existing identity, compared
    /// case-insensitively after trimming.
    pub fn register_identity(&self, profile: Profile, role: Role) -> Result<UserId, Rejection> {
        let span = tracing::info_span!("identity.register", role = %role);
        let _guard = span.enter();
        self.try_register_identity(profile, role)
            .log_rejection("register_identity")
    }

    fn try_register_identity(&self, profile: Profile, role: Role) -> Result<UserId, Rejection> {
        profile.validate()?;
        let mut store = self.store()?;
        let contact = profile.contact_key();
        if store.state().user_by_contact(&contact).is_some() {
            return Err(Rejection::DuplicateIdentity(contact));
        }

        let user = self.new_user(profile, role);
        let id = user.id.clone();
        Self::commit(&mut store, vec![Operation::UserCreate(UserCreateOp { user })])?;
        tracing::info!(user = %id, "identity registered");
        Ok(id)
    }

    pub(crate) fn new_user(&self, profile: Profile, role: Role) -> User {
        User {
            id: UserId(self.next_id()),
            name: profile.name.trim().to_string(),
            contact: profile.contact_key(),
            credential: profile.credential,
            role,
            created_at: self.now(),
        }
    }

    pub fn user(&self, id: &UserId) -> Result<User, Rejection> {
        let store = self.store()?;
        store
            .state()
            .user(id)
            .cloned()
            .ok_or_else(|| Rejection::user_not_found(id))
    }

    /// Look up an identity by contact address
    pub fn user_by_contact(&self, contact: &str) -> Result<User, Rejection> {
        let store = self.store()?;
        store
            .state()
            .user_by_contact(contact)
            .cloned()
            .ok_or_else(|| Rejection::NotFound {
                kind: "user",
                id: contact.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
