//! Core domain types: tickets, form validation, and statistics

mod builders;
mod clock;
mod stats;
mod ticket;
mod validation;

pub use builders::TicketBuilder;
pub use clock::{Clock, SystemClock};
pub use stats::{PriorityBreakdown, TicketStats};
pub use ticket::{Priority, Status, Ticket, TicketDraft, TicketId};
pub use validation::{LoginForm, SignupForm, TicketForm, ValidationErrors};
