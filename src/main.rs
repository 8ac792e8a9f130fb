//! ticket-desk - local ticket tracker
//!
//! This is the main entry point for the ticket-desk CLI application.
//! It parses arguments, loads configuration, and dispatches to the command
//! handlers.

use clap::Parser;
use std::process;
use ticket_desk::cli::handlers::{
    HandlerContext, TicketEdit, handle_dashboard, handle_login, handle_logout, handle_signup,
    handle_ticket_delete, handle_ticket_edit, handle_ticket_list, handle_ticket_new,
    handle_ticket_show, handle_whoami,
};
use ticket_desk::cli::{Cli, Commands, OutputFormatter, TicketCommands};
use ticket_desk::config::Config;
use ticket_desk::error::{Result, TicketDeskError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    init_logging(cli.verbose);

    if let Err(e) = run(cli, &formatter).await {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Logs go to stderr so JSON output on stdout stays parseable
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = Some(data_dir);
    }
    if cli.no_delay {
        config.latency.disable();
    }

    let Some(command) = cli.command else {
        formatter.info("ticket-desk: track tickets locally");
        formatter.info("");
        formatter.info("Sign in with 'ticket-desk login' (demo@example.com / password123),");
        formatter.info("then run 'ticket-desk dashboard' or 'ticket-desk ticket list'.");
        return Ok(());
    };

    let ctx = HandlerContext::new(config);
    dispatch_command(command, &ctx, formatter).await
}

async fn dispatch_command(
    command: Commands,
    ctx: &HandlerContext,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        Commands::Login { email, password } => handle_login(email, password, ctx, formatter).await,
        Commands::Signup {
            name,
            email,
            password,
            confirm_password,
        } => handle_signup(name, email, password, confirm_password, ctx, formatter).await,
        Commands::Logout => handle_logout(ctx, formatter),
        Commands::Whoami => handle_whoami(ctx, formatter),
        Commands::Dashboard { detailed } => handle_dashboard(detailed, ctx, formatter).await,
        Commands::Ticket { command } => handle_ticket_command(command, ctx, formatter).await,
    }
}

async fn handle_ticket_command(
    command: TicketCommands,
    ctx: &HandlerContext,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        TicketCommands::List => handle_ticket_list(ctx, formatter).await,
        TicketCommands::New {
            title,
            description,
            status,
            priority,
        } => handle_ticket_new(title, description, status, &priority, ctx, formatter).await,
        TicketCommands::Show { ticket } => handle_ticket_show(&ticket, ctx, formatter).await,
        TicketCommands::Edit {
            ticket,
            title,
            description,
            status,
            priority,
        } => {
            let edit = TicketEdit {
                title,
                description,
                status,
                priority,
            };
            handle_ticket_edit(&ticket, edit, ctx, formatter).await
        },
        TicketCommands::Delete { ticket, yes } => {
            handle_ticket_delete(&ticket, yes, ctx, formatter).await
        },
    }
}

fn handle_error(error: &TicketDeskError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() && !formatter.is_json() {
        eprintln!("\nSuggestions:");
        for suggestion in &suggestions {
            eprintln!("  • {suggestion}");
        }
    }

    if formatter.is_json() {
        let _ = formatter.json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "error_type": format!("{error:?}"),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
            "is_config_error": error.is_config_error(),
        }));
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
