//! Command-line interface
//!
//! The CLI is the presentation layer: it turns flags and prompts into forms,
//! calls the services, and renders tickets, stats and notices.

pub mod handlers;
mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Local ticket tracker with a mock sign-in
#[derive(Parser, Debug)]
#[command(name = "ticket-desk", version, about, long_about = None)]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the stored tickets and session
    #[arg(long, global = true, env = "TICKET_DESK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip the simulated load and sign-in delays
    #[arg(long, global = true)]
    pub no_delay: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with the demo account
    Login {
        #[arg(long)]
        email: Option<String>,

        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,

        /// Defaults to --password when that is given
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Ticket counts by status
    Dashboard {
        /// Include the priority breakdown
        #[arg(long)]
        detailed: bool,
    },

    /// Manage tickets
    Ticket {
        #[command(subcommand)]
        command: TicketCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum TicketCommands {
    /// List tickets in creation order
    List,

    /// Create a ticket
    New {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// open, in_progress or closed
        #[arg(short, long, default_value = "open")]
        status: String,

        /// low, medium or high
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },

    /// Show one ticket
    Show {
        /// Ticket ID or unique ID prefix
        ticket: String,
    },

    /// Replace a ticket's fields; omitted fields keep their current value
    Edit {
        /// Ticket ID or unique ID prefix
        ticket: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        status: Option<String>,

        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Delete a ticket
    Delete {
        /// Ticket ID or unique ID prefix
        ticket: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
