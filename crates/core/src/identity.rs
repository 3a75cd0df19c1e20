// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identities and their fixed roles
//!
//! Role is a closed tag assigned at creation. Operations ask the role for a
//! capability instead of comparing role names.

use crate::id::UserId;
use crate::rejection::Rejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of an identity, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Organizer,
    Attendee,
    Volunteer,
}

impl Role {
    /// May create and delete events, and provision volunteers
    pub fn can_organize(self) -> bool {
        matches!(self, Role::Organizer)
    }

    /// May register for events and hold tickets
    pub fn can_register(self) -> bool {
        matches!(self, Role::Attendee)
    }

    /// May hold duty assignments
    pub fn can_staff(self) -> bool {
        matches!(self, Role::Volunteer)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Organizer => "ORGANIZER",
            Role::Attendee => "ATTENDEE",
            Role::Volunteer => "VOLUNTEER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ORGANIZER" => Ok(Role::Organizer),
            "ATTENDEE" => Ok(Role::Attendee),
            "VOLUNTEER" => Ok(Role::Volunteer),
            other => Err(Rejection::validation(format!("unknown role: {other}"))),
        }
    }
}

/// Caller-supplied profile for a new identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub contact: String,
    /// Opaque credential, stored as given
    pub credential: String,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            credential: credential.into(),
        }
    }

    /// Check the profile is well-formed
    pub fn validate(&self) -> Result<(), Rejection> {
        if self.name.trim().is_empty() {
            return Err(Rejection::validation("name must not be blank"));
        }
        let contact = self.contact.trim();
        if contact.is_empty() || !contact.contains('@') || contact.contains(char::is_whitespace) {
            return Err(Rejection::validation(format!(
                "contact is not an address: {:?}",
                self.contact
            )));
        }
        if self.credential.is_empty() {
            return Err(Rejection::validation("credential must not be empty"));
        }
        Ok(())
    }

    /// Contact in the form used for uniqueness checks
    pub fn contact_key(&self) -> String {
        normalize_contact(&self.contact)
    }
}

/// Canonical form of a contact address (trimmed, lowercase)
pub fn normalize_contact(contact: &str) -> String {
    contact.trim().to_lowercase()
}

/// A stored identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub contact: String,
    pub credential: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
