use crate::core::{PriorityBreakdown, Priority, Status, Ticket, TicketStats};
use crate::error::Result;
use crate::service::Notice;
use chrono::Local;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Renders results either as colored text or as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    #[must_use]
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{} {}", "✓".green().bold(), message.green());
        }
    }

    /// Errors always go to stderr, also in JSON mode
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn notice(&self, notice: &Notice) {
        if notice.is_error() {
            self.error(&notice.message);
        } else {
            self.success(&notice.message);
        }
    }

    /// Spinner shown while a simulated delay elapses
    ///
    /// Returns `None` in JSON mode or when there is no delay.
    #[must_use]
    pub fn spinner(&self, message: &str, latency: Duration) -> Option<ProgressBar> {
        if self.json || latency.is_zero() {
            return None;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Some(spinner)
    }

    pub fn print_tickets(&self, tickets: &[Ticket]) {
        if tickets.is_empty() {
            self.info("No tickets found");
            self.info("Create your first ticket with 'ticket-desk ticket new --title <TITLE>'");
            return;
        }

        for ticket in tickets {
            self.info(&format!(
                "{}  {} {} {}",
                ticket.id.short().dimmed(),
                status_label(ticket.status, 12),
                priority_label(ticket.priority, 7),
                ticket.title
            ));
        }
        self.info(&format!("\n{} ticket(s)", tickets.len()));
    }

    pub fn print_ticket(&self, ticket: &Ticket) {
        self.info(&ticket.title.bold().to_string());
        self.info(&format!("  ID:       {}", ticket.id));
        self.info(&format!("  Status:   {}", status_label(ticket.status, 0)));
        self.info(&format!("  Priority: {}", priority_label(ticket.priority, 0)));
        self.info(&format!(
            "  Created:  {}",
            ticket.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ));
        self.info(&format!(
            "  Updated:  {}",
            ticket.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ));
        if let Some(description) = &ticket.description {
            self.info("");
            self.info(description);
        }
    }

    pub fn print_stats(&self, stats: &TicketStats, breakdown: Option<&PriorityBreakdown>) {
        self.info("Statistics:");
        self.info(&format!("  Total tickets: {}", stats.total));
        for status in Status::ALL {
            let label = format!("{}:", capitalize(status.label()));
            self.info(&format!("  {label:<14} {}", stats.count(status)));
        }

        if let Some(breakdown) = breakdown {
            self.info("");
            self.info("Priority breakdown:");
            self.info(&format!("  High:   {}", breakdown.high));
            self.info(&format!("  Medium: {}", breakdown.medium));
            self.info(&format!("  Low:    {}", breakdown.low));
        }
    }
}

/// Padding is applied before coloring so escape codes do not count as width
fn status_label(status: Status, width: usize) -> String {
    let label = format!("{:<width$}", status.label());
    match status {
        Status::Open => label.blue().to_string(),
        Status::InProgress => label.yellow().to_string(),
        Status::Closed => label.green().to_string(),
    }
}

fn priority_label(priority: Priority, width: usize) -> String {
    let label = format!("{:<width$}", priority.as_str());
    match priority {
        Priority::High => label.red().to_string(),
        Priority::Medium => label.yellow().to_string(),
        Priority::Low => label.green().to_string(),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_labels_pad_before_coloring() {
        colored::control::set_override(true);
        let status = status_label(Status::Open, 12);
        let priority = priority_label(Priority::High, 7);
        colored::control::unset_override();

        assert!(status.contains("open        "));
        assert!(priority.contains("high   "));
        assert!(status.ends_with("\u{1b}[0m"));
    }

    #[test]
    #[serial_test::serial]
    fn test_labels_without_color_have_exact_width() {
        colored::control::set_override(false);
        assert_eq!(status_label(Status::InProgress, 12), "in progress ");
        assert_eq!(priority_label(Priority::Low, 7), "low    ");
        colored::control::unset_override();
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("in progress"), "In progress");
        assert_eq!(capitalize(""), "");
    }
}
