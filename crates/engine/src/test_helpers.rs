// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine fixture over an in-memory journal and a frozen clock

use crate::{Engine, EngineConfig};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rollcall_core::{
    EventId, FakeClock, NewEvent, Profile, Role, SequentialIdGen, UserId,
};
use rollcall_storage::{MemoryJournal, Store};

/// Drive a future to completion on a fresh single-threaded runtime
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
        .block_on(future)
}

pub type TestEngine = Engine<FakeClock, SequentialIdGen>;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap()
}

/// Event starting a day after `t0`, running two hours, registration
/// closing an hour before the start
pub fn new_event(name: &str, capacity: u32) -> NewEvent {
    let start = t0() + Duration::days(1);
    NewEvent {
        name: name.to_string(),
        venue: "Main Hall".to_string(),
        capacity,
        start_time: start,
        end_time: start + Duration::hours(2),
        registration_deadline: start - Duration::hours(1),
        fee: 2_500,
    }
}

pub struct Harness {
    pub engine: TestEngine,
    pub clock: FakeClock,
    pub journal: MemoryJournal,
    pub organizer: UserId,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let clock = FakeClock::at(t0());
        let journal = MemoryJournal::new();
        let store = Store::with_journal(Box::new(journal.clone()));
        let engine = Engine::new(store, clock.clone(), SequentialIdGen::new("id"), config);
        let organizer = engine
            .register_identity(
                Profile::new("Olive Organizer", "olive@example.com", "pw"),
                Role::Organizer,
            )
            .unwrap();
        Self {
            engine,
            clock,
            journal,
            organizer,
        }
    }

    pub fn user(&self, name: &str, role: Role) -> UserId {
        self.engine
            .register_identity(
                Profile::new(name, format!("{}@example.com", name.to_lowercase()), "pw"),
                role,
            )
            .unwrap()
    }

    pub fn attendee(&self, name: &str) -> UserId {
        self.user(name, Role::Attendee)
    }

    pub fn event(&self, capacity: u32) -> EventId {
        self.engine
            .create_event(&self.organizer, new_event("Meetup", capacity))
            .unwrap()
    }

    pub fn volunteer(&self, name: &str, events: &[EventId]) -> UserId {
        self.engine
            .create_volunteer_with_duties(
                &self.organizer,
                Profile::new(name, format!("{}@example.com", name.to_lowercase()), "pw"),
                events,
            )
            .unwrap()
    }
}
