//! Command handlers
//!
//! Each handler takes the parsed arguments, a [`HandlerContext`] built from
//! the loaded configuration, and the output formatter. Dashboard and ticket
//! handlers require a session before touching any ticket data.

mod auth;
mod common;
mod dashboard;
mod ticket;

pub use auth::{handle_login, handle_logout, handle_signup, handle_whoami};
pub use common::HandlerContext;
pub use dashboard::handle_dashboard;
pub use ticket::{
    TicketEdit, handle_ticket_delete, handle_ticket_edit, handle_ticket_list, handle_ticket_new,
    handle_ticket_show,
};
