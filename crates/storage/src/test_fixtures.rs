// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record builders shared by the storage tests

use crate::operation::*;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rollcall_core::{
    DutyAssignment, Event, EventId, Participation, Role, TicketId, User, UserId,
};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap()
}

pub fn user(id: &str, role: Role) -> User {
    User {
        id: UserId::from(id),
        name: format!("User {id}"),
        contact: format!("{id}@example.com"),
        credential: "secret".to_string(),
        role,
        created_at: t0(),
    }
}

/// Event starting a day after `t0`, lasting two hours, deadline at start
pub fn event(id: &str, capacity: u32) -> Event {
    let start = t0() + Duration::days(1);
    Event {
        id: EventId::from(id),
        name: format!("Event {id}"),
        venue: "Hall A".to_string(),
        capacity,
        start_time: start,
        end_time: start + Duration::hours(2),
        registration_deadline: start,
        fee: 1_500,
        owner: UserId::from("org-1"),
        created_at: t0(),
    }
}

pub fn create_user(id: &str, role: Role) -> Operation {
    Operation::UserCreate(UserCreateOp {
        user: user(id, role),
    })
}

pub fn create_event(id: &str, capacity: u32) -> Operation {
    Operation::EventCreate(EventCreateOp {
        event: event(id, capacity),
    })
}

pub fn delete_event(id: &str) -> Operation {
    Operation::EventDelete(EventDeleteOp {
        id: EventId::from(id),
    })
}

pub fn admit(ticket: &str, event: &str, user: &str) -> Operation {
    Operation::ParticipationCreate(ParticipationCreateOp {
        participation: Participation::new(
            TicketId::from(ticket),
            EventId::from(event),
            UserId::from(user),
            t0(),
        ),
    })
}

pub fn check_in(ticket: &str, event: &str, at: DateTime<Utc>) -> Operation {
    Operation::CheckIn(CheckInOp {
        ticket: TicketId::from(ticket),
        event_id: EventId::from(event),
        at,
    })
}

pub fn assign(event: &str, user: &str) -> Operation {
    Operation::DutyAssign(DutyAssignOp {
        duty: DutyAssignment {
            event_id: EventId::from(event),
            user_id: UserId::from(user),
            assigned_at: t0(),
        },
    })
}
