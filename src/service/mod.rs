//! Application services: ticket operations, mock authentication, notices

mod auth;
mod notice;
mod tickets;

pub use auth::{Authenticator, DemoAccount};
pub use notice::{Action, Notice, NoticeKind};
pub use tickets::TicketStore;
