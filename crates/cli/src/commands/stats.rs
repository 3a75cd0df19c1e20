// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rollcall stats` - Registration and revenue rollups

use super::CliEngine;
use crate::error::CliError;
use crate::output::{self, money, OutputFormat};
use anyhow::Result;
use rollcall_core::UserId;
use rollcall_engine::{Stats, StatsScope};
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
#[serde(transparent)]
struct StatsRow(Stats);

impl fmt::Display for StatsRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registrations: {}", self.0.registrations)?;
        writeln!(f, "Check-ins: {}", self.0.check_ins)?;
        writeln!(f, "Active volunteers: {}", self.0.active_volunteers)?;
        write!(f, "Revenue: {}", money(self.0.revenue))
    }
}

pub fn handle(engine: &CliEngine, organizer: Option<String>, format: OutputFormat) -> Result<()> {
    let scope = match organizer {
        Some(id) => StatsScope::Organizer(UserId(id)),
        None => StatsScope::Global,
    };
    let stats = engine.stats(&scope).map_err(CliError::from)?;
    output::print(&StatsRow(stats), format);
    Ok(())
}
