// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rollcall user` - Identity registration and lookup

use super::CliEngine;
use crate::error::CliError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::{Args, Subcommand};
use rollcall_core::{Profile, Role, User, UserId};
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a new identity
    Add {
        #[arg(long)]
        name: String,
        /// Contact address, unique across identities
        #[arg(long)]
        contact: String,
        /// Opaque credential, stored as given
        #[arg(long)]
        credential: String,
        /// organizer, attendee or volunteer
        #[arg(long, default_value = "attendee")]
        role: Role,
    },
    /// Show an identity
    Show { id: String },
}

/// Identity as printed; never includes the credential
#[derive(Serialize)]
pub struct UserRow {
    pub id: UserId,
    pub name: String,
    pub contact: String,
    pub role: Role,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            contact: user.contact,
            role: user.role,
        }
    }
}

impl fmt::Display for UserRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<38} {:<20} {:<28} {}",
            self.id, self.name, self.contact, self.role
        )
    }
}

pub fn handle(engine: &CliEngine, command: UserCommand, format: OutputFormat) -> Result<()> {
    match command {
        UserCommand::Add {
            name,
            contact,
            credential,
            role,
        } => {
            let id = engine
                .register_identity(Profile::new(name, contact, credential), role)
                .map_err(CliError::from)?;
            let user = engine.user(&id).map_err(CliError::from)?;
            output::print(&UserRow::from(user), format);
        }
        UserCommand::Show { id } => {
            let user = engine.user(&UserId(id)).map_err(CliError::from)?;
            output::print(&UserRow::from(user), format);
        }
    }
    Ok(())
}
