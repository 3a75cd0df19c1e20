// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rollcall volunteer` - Volunteer provisioning and duty rosters

use super::event::EventRow;
use super::user::UserRow;
use super::CliEngine;
use crate::error::CliError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::{Args, Subcommand};
use rollcall_core::{EventId, Profile, UserId};

#[derive(Args)]
pub struct VolunteerArgs {
    #[command(subcommand)]
    pub command: VolunteerCommand,
}

#[derive(Subcommand)]
pub enum VolunteerCommand {
    /// Create a volunteer and assign duties in one step
    Create {
        /// Organizer provisioning the volunteer
        #[arg(long)]
        organizer: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        contact: String,
        #[arg(long)]
        credential: String,
        /// Event to staff (repeatable)
        #[arg(long = "event", required = true)]
        events: Vec<String>,
    },
    /// Assign additional duties to an existing volunteer
    Assign {
        volunteer: String,
        /// Event to staff (repeatable)
        #[arg(long = "event", required = true)]
        events: Vec<String>,
    },
    /// List the events a volunteer staffs
    Duties { volunteer: String },
    /// List the volunteers staffing an event
    List { event: String },
}

fn event_ids(events: Vec<String>) -> Vec<EventId> {
    events.into_iter().map(EventId).collect()
}

pub fn handle(engine: &CliEngine, command: VolunteerCommand, format: OutputFormat) -> Result<()> {
    match command {
        VolunteerCommand::Create {
            organizer,
            name,
            contact,
            credential,
            events,
        } => {
            let id = engine
                .create_volunteer_with_duties(
                    &UserId(organizer),
                    Profile::new(name, contact, credential),
                    &event_ids(events),
                )
                .map_err(CliError::from)?;
            let user = engine.user(&id).map_err(CliError::from)?;
            output::print(&UserRow::from(user), format);
        }
        VolunteerCommand::Assign { volunteer, events } => {
            let volunteer = UserId(volunteer);
            engine
                .assign_duties(&volunteer, &event_ids(events))
                .map_err(CliError::from)?;
            list_duties(engine, &volunteer, format)?;
        }
        VolunteerCommand::Duties { volunteer } => {
            list_duties(engine, &UserId(volunteer), format)?;
        }
        VolunteerCommand::List { event } => {
            let rows: Vec<UserRow> = engine
                .volunteers_for(&EventId(event))
                .map_err(CliError::from)?
                .into_iter()
                .map(UserRow::from)
                .collect();
            output::print_list(&rows, "No volunteers", format);
        }
    }
    Ok(())
}

fn list_duties(engine: &CliEngine, volunteer: &UserId, format: OutputFormat) -> Result<()> {
    let rows: Vec<EventRow> = engine
        .assigned_events(volunteer)
        .map_err(CliError::from)?
        .into_iter()
        .map(EventRow)
        .collect();
    output::print_list(&rows, "No duties", format);
    Ok(())
}
