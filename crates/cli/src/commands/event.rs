// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rollcall event` - Event catalog commands

use super::CliEngine;
use crate::error::CliError;
use crate::output::{self, money, OutputFormat};
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use rollcall_core::{EventId, EventView, NewEvent, UserId};
use rollcall_engine::{EventDetails, Participant};
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct EventArgs {
    #[command(subcommand)]
    pub command: EventCommand,
}

#[derive(Subcommand)]
pub enum EventCommand {
    /// Create an event
    Create {
        /// Organizer who will own the event
        #[arg(long)]
        organizer: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        venue: String,
        #[arg(long)]
        capacity: u32,
        /// RFC 3339 start time
        #[arg(long)]
        start: DateTime<Utc>,
        /// RFC 3339 end time
        #[arg(long)]
        end: DateTime<Utc>,
        /// RFC 3339 registration deadline
        #[arg(long)]
        deadline: DateTime<Utc>,
        /// Fee in minor currency units
        #[arg(long, default_value_t = 0)]
        fee: u64,
    },
    /// List events
    List {
        /// Only events owned by this organizer, newest first
        #[arg(long)]
        organizer: Option<String>,
    },
    /// Show an event
    Show {
        id: String,
        /// Also report whether this user is registered
        #[arg(long)]
        user: Option<String>,
    },
    /// Delete an event with its tickets and duty assignments
    Delete {
        id: String,
        #[arg(long)]
        organizer: String,
    },
    /// List the registrants of an event
    Participants { id: String },
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct EventRow(pub EventView);

impl fmt::Display for EventRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.0;
        write!(
            f,
            "{:<38} {:<24} {:<10} {:>4}/{:<4} {}",
            v.event.id,
            v.event.name,
            v.status,
            v.registered,
            v.event.capacity,
            v.event.start_time.to_rfc3339()
        )
    }
}

#[derive(Serialize)]
#[serde(transparent)]
struct DetailsRow(EventDetails);

impl fmt::Display for DetailsRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.0.view;
        writeln!(f, "Event: {}", v.event.name)?;
        writeln!(f, "  ID: {}", v.event.id)?;
        writeln!(f, "  Venue: {}", v.event.venue)?;
        writeln!(f, "  Status: {}", v.status)?;
        writeln!(f, "  Starts: {}", v.event.start_time.to_rfc3339())?;
        writeln!(f, "  Ends: {}", v.event.end_time.to_rfc3339())?;
        writeln!(
            f,
            "  Registration closes: {}",
            v.event.registration_deadline.to_rfc3339()
        )?;
        writeln!(f, "  Seats: {}/{} ({} left)", v.registered, v.event.capacity, v.seats_left())?;
        write!(f, "  Fee: {}", money(v.event.fee))?;
        if self.0.has_registered {
            write!(f, "\n  You are registered")?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(transparent)]
struct ParticipantRow(Participant);

impl fmt::Display for ParticipantRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.0;
        write!(
            f,
            "{:<38} {:<20} {:<28} {:?}",
            p.ticket, p.name, p.contact, p.state
        )
    }
}

pub fn handle(engine: &CliEngine, command: EventCommand, format: OutputFormat) -> Result<()> {
    match command {
        EventCommand::Create {
            organizer,
            name,
            venue,
            capacity,
            start,
            end,
            deadline,
            fee,
        } => {
            let new = NewEvent {
                name,
                venue,
                capacity,
                start_time: start,
                end_time: end,
                registration_deadline: deadline,
                fee,
            };
            let id = engine
                .create_event(&UserId(organizer), new)
                .map_err(CliError::from)?;
            let view = engine.event(&id).map_err(CliError::from)?;
            output::print(&EventRow(view), format);
        }
        EventCommand::List { organizer } => {
            let views = match organizer {
                Some(organizer) => engine.list_owned_events(&UserId(organizer)),
                None => engine.list_events(),
            }
            .map_err(CliError::from)?;
            let rows: Vec<EventRow> = views.into_iter().map(EventRow).collect();
            output::print_list(&rows, "No events", format);
        }
        EventCommand::Show { id, user } => {
            let id = EventId(id);
            let details = match user {
                Some(user) => engine.event_details_for(&id, &UserId(user)),
                None => engine.event(&id).map(|view| EventDetails {
                    view,
                    has_registered: false,
                }),
            }
            .map_err(CliError::from)?;
            output::print(&DetailsRow(details), format);
        }
        EventCommand::Delete { id, organizer } => {
            let id = EventId(id);
            engine
                .delete_event(&UserId(organizer), &id)
                .map_err(CliError::from)?;
            output::print(&Deleted { deleted: id }, format);
        }
        EventCommand::Participants { id } => {
            let rows: Vec<ParticipantRow> = engine
                .participants(&EventId(id))
                .map_err(CliError::from)?
                .into_iter()
                .map(ParticipantRow)
                .collect();
            output::print_list(&rows, "No participants", format);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct Deleted {
    deleted: EventId,
}

impl fmt::Display for Deleted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deleted event {}", self.deleted)
    }
}
