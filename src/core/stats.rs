use super::{Priority, Status, Ticket};
use serde::Serialize;

/// Ticket counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
}

impl TicketStats {
    /// Count tickets in a single pass
    #[must_use]
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        tickets.iter().fold(Self::default(), |mut stats, ticket| {
            stats.total += 1;
            match ticket.status {
                Status::Open => stats.open += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Closed => stats.closed += 1,
            }
            stats
        })
    }

    #[must_use]
    pub const fn count(&self, status: Status) -> usize {
        match status {
            Status::Open => self.open,
            Status::InProgress => self.in_progress,
            Status::Closed => self.closed,
        }
    }
}

/// Ticket counts by priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PriorityBreakdown {
    #[must_use]
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let mut breakdown = Self::default();
        for ticket in tickets {
            match ticket.priority {
                Priority::Low => breakdown.low += 1,
                Priority::Medium => breakdown.medium += 1,
                Priority::High => breakdown.high += 1,
            }
        }
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TicketBuilder;

    fn with_statuses(statuses: &[Status]) -> Vec<Ticket> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                TicketBuilder::new()
                    .title(format!("Ticket {i}"))
                    .status(*status)
                    .build()
            })
            .collect()
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(TicketStats::from_tickets(&[]), TicketStats::default());
    }

    #[test]
    fn test_counts_by_status() {
        let tickets = with_statuses(&[
            Status::Open,
            Status::Open,
            Status::InProgress,
            Status::Closed,
        ]);
        let stats = TicketStats::from_tickets(&tickets);

        assert_eq!(
            stats,
            TicketStats {
                total: 4,
                open: 2,
                in_progress: 1,
                closed: 1,
            }
        );
        assert_eq!(stats.count(Status::Open), 2);
    }

    #[test]
    fn test_counts_match_filtering() {
        let tickets = with_statuses(&[
            Status::Closed,
            Status::InProgress,
            Status::Closed,
            Status::Open,
            Status::Closed,
        ]);
        let stats = TicketStats::from_tickets(&tickets);

        for status in Status::ALL {
            let filtered = tickets.iter().filter(|t| t.status == status).count();
            assert_eq!(stats.count(status), filtered);
        }
        assert_eq!(stats.total, stats.open + stats.in_progress + stats.closed);
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(TicketStats::default()).unwrap();
        assert!(value.get("inProgress").is_some());
    }

    #[test]
    fn test_priority_breakdown() {
        let tickets = vec![
            TicketBuilder::new().title("a").priority(Priority::High).build(),
            TicketBuilder::new().title("b").priority(Priority::High).build(),
            TicketBuilder::new().title("c").build(),
        ];
        let breakdown = PriorityBreakdown::from_tickets(&tickets);
        assert_eq!(breakdown.high, 2);
        assert_eq!(breakdown.medium, 1);
        assert_eq!(breakdown.low, 0);
    }
}
