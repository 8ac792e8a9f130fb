//! Handlers for the `ticket` subcommands
//!
//! Every handler checks the session, loads the collection once, and applies
//! at most one mutation to it.

use super::HandlerContext;
use super::common::report_ticket;
use crate::cli::OutputFormatter;
use crate::core::{Priority, TicketForm};
use crate::error::{Result, TicketDeskError};
use crate::service::Action;
use dialoguer::{Confirm, theme::ColorfulTheme};

/// Field overrides for `ticket edit`
#[derive(Debug, Default)]
pub struct TicketEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

pub async fn handle_ticket_list(ctx: &HandlerContext, output: &OutputFormatter) -> Result<()> {
    ctx.require_session()?;
    let store = ctx.load_tickets(Action::LoadTickets, output).await?;

    if output.is_json() {
        output.json(store.list())
    } else {
        output.print_tickets(store.list());
        Ok(())
    }
}

/// Create a ticket from the given fields
///
/// The form is validated before anything is loaded, so a rejected form
/// leaves the stored collection untouched.
pub async fn handle_ticket_new(
    title: String,
    description: Option<String>,
    status: String,
    priority: &str,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    ctx.require_session()?;

    let form = TicketForm {
        title,
        description: description.unwrap_or_default(),
        status,
        priority: priority.parse::<Priority>()?,
    };
    let draft = form.validate().map_err(TicketDeskError::Validation)?;

    let mut store = ctx.load_tickets(Action::LoadTickets, output).await?;
    let ticket = store
        .create(draft)
        .map_err(|e| Action::Create.escalate(e))?;

    report_ticket(output, Action::Create, &ticket)
}

pub async fn handle_ticket_show(
    reference: &str,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    ctx.require_session()?;
    let store = ctx.load_tickets(Action::LoadTickets, output).await?;
    let ticket = store.resolve(reference)?;

    if output.is_json() {
        output.json(ticket)
    } else {
        output.print_ticket(ticket);
        Ok(())
    }
}

/// Replace a ticket's fields, prefilled from its current values
pub async fn handle_ticket_edit(
    reference: &str,
    edit: TicketEdit,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    ctx.require_session()?;
    let mut store = ctx.load_tickets(Action::LoadTickets, output).await?;
    let current = store.resolve(reference)?.clone();

    let mut form = TicketForm::from_ticket(&current);
    if let Some(title) = edit.title {
        form.title = title;
    }
    if let Some(description) = edit.description {
        form.description = description;
    }
    if let Some(status) = edit.status {
        form.status = status;
    }
    if let Some(priority) = edit.priority {
        form.priority = priority.parse()?;
    }
    let draft = form.validate().map_err(TicketDeskError::Validation)?;

    match store
        .update(&current.id, draft)
        .map_err(|e| Action::Update.escalate(e))?
    {
        Some(ticket) => report_ticket(output, Action::Update, &ticket),
        None => {
            output.info("Nothing changed: the ticket no longer exists");
            Ok(())
        },
    }
}

/// Delete a ticket after confirmation
///
/// `--yes` and JSON mode skip the prompt.
pub async fn handle_ticket_delete(
    reference: &str,
    yes: bool,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    ctx.require_session()?;
    let mut store = ctx.load_tickets(Action::LoadTickets, output).await?;
    let target = store.resolve(reference)?.clone();

    if !yes && !output.is_json() {
        output.info(&format!("{}  {}", target.id.short(), target.title));
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(
                "Are you sure you want to delete this ticket? This action cannot be undone.",
            )
            .default(false)
            .interact()?;
        if !confirmed {
            output.info("Cancelled");
            return Ok(());
        }
    }

    match store
        .delete(&target.id)
        .map_err(|e| Action::Delete.escalate(e))?
    {
        Some(ticket) => report_ticket(output, Action::Delete, &ticket),
        None => {
            output.info("Nothing changed: the ticket no longer exists");
            Ok(())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::{LoginForm, Status};
    use crate::storage::{KeyValueStore, KvTicketRepository, MemoryStore, TicketRepository};
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn signed_in() -> (TempDir, Arc<MemoryStore>, HandlerContext) {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(&file, "[latency]\nload_ms = 0\nauth_ms = 0\n").unwrap();
        let config = Config::load(Some(&file)).unwrap();

        let backing = Arc::new(MemoryStore::new());
        let ctx = HandlerContext::with_store(config, backing.clone());
        ctx.authenticator()
            .login(&LoginForm::new("demo@example.com", "password123"))
            .await
            .unwrap();
        (dir, backing, ctx)
    }

    fn stored(backing: &Arc<MemoryStore>) -> Vec<crate::core::Ticket> {
        let store: Arc<dyn KeyValueStore> = backing.clone();
        KvTicketRepository::new(store).load_all().unwrap()
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_new_edit_delete_flow() {
        let (_dir, backing, ctx) = signed_in().await;
        let output = OutputFormatter::new(true, true);

        handle_ticket_new(
            "Fix login bug".to_string(),
            None,
            "open".to_string(),
            "high",
            &ctx,
            &output,
        )
        .await
        .unwrap();
        let tickets = stored(&backing);
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].priority, Priority::High);

        let edit = TicketEdit {
            status: Some("closed".to_string()),
            ..TicketEdit::default()
        };
        handle_ticket_edit(tickets[0].id.short(), edit, &ctx, &output)
            .await
            .unwrap();
        let edited = stored(&backing);
        assert_eq!(edited[0].status, Status::Closed);
        assert_eq!(edited[0].title, "Fix login bug");

        handle_ticket_delete(edited[0].id.as_str(), true, &ctx, &output)
            .await
            .unwrap();
        assert!(stored(&backing).is_empty());
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_short_title_is_rejected() {
        let (_dir, backing, ctx) = signed_in().await;
        let output = OutputFormatter::new(true, true);

        let err = handle_ticket_new("ab".to_string(), None, "open".to_string(), "medium", &ctx, &output)
            .await
            .unwrap_err();

        let TicketDeskError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.get("title"), Some("Title must be at least 3 characters"));
        assert!(stored(&backing).is_empty());
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_ticket_commands_require_session() {
        let (_dir, _backing, ctx) = signed_in().await;
        ctx.authenticator().logout().unwrap();
        let output = OutputFormatter::new(true, true);

        let err = handle_ticket_list(&ctx, &output).await.unwrap_err();
        assert!(matches!(err, TicketDeskError::NotAuthenticated));
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_unknown_reference() {
        let (_dir, _backing, ctx) = signed_in().await;
        let output = OutputFormatter::new(true, true);

        let err = handle_ticket_show("missing", &ctx, &output).await.unwrap_err();
        assert!(matches!(err, TicketDeskError::TicketNotFound { .. }));
    }
}
