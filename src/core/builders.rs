use super::{Priority, Status, Ticket, TicketId};
use chrono::Utc;

/// Builder for assembling [`Ticket`] values directly
///
/// Bypasses form validation; meant for fixtures and benchmarks.
#[derive(Default)]
pub struct TicketBuilder {
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Build the ticket with a fresh ID, last updated when created
    pub fn build(self) -> Ticket {
        let created_at = Utc::now();
        Ticket {
            id: TicketId::new(),
            title: self.title.unwrap_or_default(),
            description: self.description,
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            created_at,
            updated_at: created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_builder() {
        let ticket = TicketBuilder::new()
            .title("Test Ticket")
            .description("A test ticket")
            .priority(Priority::High)
            .status(Status::InProgress)
            .build();

        assert_eq!(ticket.title, "Test Ticket");
        assert_eq!(ticket.description.as_deref(), Some("A test ticket"));
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(ticket.status, Status::InProgress);
        assert_eq!(ticket.created_at, ticket.updated_at);
    }

    #[test]
    fn test_builder_defaults() {
        let ticket = TicketBuilder::new().title("Defaults").build();
        assert_eq!(ticket.status, Status::Open);
        assert_eq!(ticket.priority, Priority::Medium);
        assert!(ticket.description.is_none());
    }

    #[test]
    fn test_each_build_gets_a_new_id() {
        let builder = || TicketBuilder::new().title("Same");
        assert_ne!(builder().build().id, builder().build().id);
    }
}
