// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only rollups over participations and duty assignments
//!
//! Rows whose event or identity is missing are skipped rather than
//! counted, so the figures stay consistent with deletions.

use crate::engine::Engine;
use rollcall_core::{Clock, EventId, IdGen, Rejection, UserId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Which events a rollup covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsScope {
    Global,
    /// Events owned by one organizer
    Organizer(UserId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub registrations: u64,
    pub check_ins: u64,
    pub active_volunteers: u64,
    /// Sum of admitted count times fee, in minor currency units
    pub revenue: u64,
}

impl<C: Clock, I: IdGen> Engine<C, I> {
    pub fn stats(&self, scope: &StatsScope) -> Result<Stats, Rejection> {
        let store = self.store()?;
        let state = store.state();

        // In-scope events and their fees
        let fees: HashMap<&EventId, u64> = state
            .events()
            .filter(|e| match scope {
                StatsScope::Global => true,
                StatsScope::Organizer(owner) => &e.owner == owner,
            })
            .map(|e| (&e.id, e.fee))
            .collect();

        let mut stats = Stats::default();
        let mut admitted: HashMap<&EventId, u64> = HashMap::new();
        for p in state.participations() {
            if !fees.contains_key(&p.event_id) || state.user(&p.user_id).is_none() {
                continue;
            }
            stats.registrations += 1;
            if p.checked_in {
                stats.check_ins += 1;
            }
            *admitted.entry(&p.event_id).or_default() += 1;
        }

        stats.revenue = admitted.iter().fold(0u64, |total, (event, count)| {
            let fee = fees.get(event).copied().unwrap_or(0);
            total.saturating_add(count.saturating_mul(fee))
        });

        let volunteers: HashSet<&UserId> = state
            .duties()
            .filter(|d| fees.contains_key(&d.event_id))
            .filter(|d| state.user(&d.user_id).is_some_and(|u| u.role.can_staff()))
            .map(|d| &d.user_id)
            .collect();
        stats.active_volunteers = volunteers.len() as u64;

        tracing::debug!(?scope, ?stats, "stats computed");
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
