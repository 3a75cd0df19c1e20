// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rollcall check-in` - Ticket scanning at the door

use super::CliEngine;
use crate::error::CliError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use rollcall_core::{CheckIn, EventId, TicketId};
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
#[serde(transparent)]
struct CheckInRow(CheckIn);

impl fmt::Display for CheckInRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Checked in {} at {}",
            self.0.user_id,
            self.0.checked_in_at.to_rfc3339()
        )
    }
}

pub fn handle(engine: &CliEngine, ticket: String, event: String, format: OutputFormat) -> Result<()> {
    let check_in = engine
        .check_in(&TicketId(ticket), &EventId(event))
        .map_err(CliError::from)?;
    output::print(&CheckInRow(check_in), format);
    Ok(())
}
