//! Test utilities for ticket-desk
//!
//! Shared fixtures for the unit tests: tickets, drafts, and a clock that
//! only moves when told to.

#![cfg(test)]

use crate::core::{Clock, Priority, Status, Ticket, TicketBuilder, TicketDraft, TicketForm};
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Create a test ticket with the given properties
pub fn create_test_ticket(title: &str, priority: Priority, status: Status) -> Ticket {
    TicketBuilder::new()
        .title(title)
        .description(format!("Test ticket: {title}"))
        .priority(priority)
        .status(status)
        .build()
}

/// A validated draft, for tests that only care about title and status
pub fn draft(title: &str, status: Status) -> TicketDraft {
    TicketForm {
        title: title.to_string(),
        status: status.as_str().to_string(),
        ..TicketForm::default()
    }
    .validate()
    .expect("test draft should be valid")
}

/// Clock for deterministic timestamps
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// 2024-06-10T06:13:20Z, where every default clock starts
    pub fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_718_000_000, 0).unwrap()
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(Self::start()),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_ticket() {
        let ticket = create_test_ticket("Test", Priority::High, Status::InProgress);
        assert_eq!(ticket.title, "Test");
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(ticket.status, Status::InProgress);
        assert!(ticket.created_at <= ticket.updated_at);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::default();
        assert_eq!(clock.now(), ManualClock::start());
        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now() - ManualClock::start(), Duration::seconds(90));
    }
}
