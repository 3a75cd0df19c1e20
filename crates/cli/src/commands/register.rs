// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rollcall register` and `rollcall tickets` - Admission ledger commands

use super::CliEngine;
use crate::error::CliError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use rollcall_core::{EventId, TicketId, UserId};
use rollcall_engine::TicketView;
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
struct Admitted {
    ticket: TicketId,
    event_id: EventId,
    user_id: UserId,
}

impl fmt::Display for Admitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bare ticket so scripts can capture it
        write!(f, "{}", self.ticket)
    }
}

#[derive(Serialize)]
#[serde(transparent)]
struct TicketRow(TicketView);

impl fmt::Display for TicketRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.0;
        write!(
            f,
            "{:<38} {:<24} {:<10} {:?}",
            t.ticket, t.event.event.name, t.event.status, t.state
        )?;
        if let Some(at) = t.checked_in_at {
            write!(f, " at {}", at.to_rfc3339())?;
        }
        Ok(())
    }
}

pub async fn register(
    engine: &CliEngine,
    event: String,
    user: String,
    format: OutputFormat,
) -> Result<()> {
    let event_id = EventId(event);
    let user_id = UserId(user);
    let ticket = engine
        .admit(&event_id, &user_id)
        .await
        .map_err(CliError::from)?;
    output::print(
        &Admitted {
            ticket,
            event_id,
            user_id,
        },
        format,
    );
    Ok(())
}

pub fn tickets(engine: &CliEngine, user: String, format: OutputFormat) -> Result<()> {
    let rows: Vec<TicketRow> = engine
        .tickets_for(&UserId(user))
        .map_err(CliError::from)?
        .into_iter()
        .map(TicketRow)
        .collect();
    output::print_list(&rows, "No tickets", format);
    Ok(())
}
