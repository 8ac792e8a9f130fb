//! Form validation
//!
//! Every rule is evaluated independently and all failures are collected into
//! [`ValidationErrors`], keyed by field name, so a front end can show each
//! message next to its field.

use super::{Priority, Status, Ticket, TicketDraft};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const TITLE_MIN_LEN: usize = 3;
pub const NAME_MIN_LEN: usize = 2;
pub const PASSWORD_MIN_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\S+@\S+\.\S+").unwrap()
});

/// Field name to message map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message for one field, if it failed
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Raw ticket input as entered by the user
///
/// `status` stays free text because the front end may hand over anything;
/// the validator decides whether it names a real status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketForm {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: Priority,
}

impl Default for TicketForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: Status::Open.as_str().to_string(),
            priority: Priority::Medium,
        }
    }
}

impl TicketForm {
    /// Form prefilled from an existing ticket, for editing
    #[must_use]
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            title: ticket.title.clone(),
            description: ticket.description.clone().unwrap_or_default(),
            status: ticket.status.as_str().to_string(),
            priority: ticket.priority,
        }
    }

    /// Collect every rule violation without building anything
    #[must_use]
    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", "Title is required");
        } else if title.chars().count() < TITLE_MIN_LEN {
            errors.add("title", "Title must be at least 3 characters");
        }

        if self.status.trim().is_empty() {
            errors.add("status", "Status is required");
        } else if self.status.parse::<Status>().is_err() {
            errors.add("status", "Status must be open, in_progress, or closed");
        }

        errors
    }

    /// Validate and convert into a draft the repository will accept
    pub fn validate(&self) -> Result<TicketDraft, ValidationErrors> {
        let errors = self.errors();
        let status = match self.status.parse::<Status>() {
            Ok(status) if errors.is_empty() => status,
            _ => return Err(errors),
        };

        let description = self.description.trim();
        Ok(TicketDraft {
            title: self.title.trim().to_string(),
            description: (!description.is_empty()).then(|| self.description.clone()),
            status,
            priority: self.priority,
        })
    }
}

/// Sign-in form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        errors
    }
}

/// Registration form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    #[must_use]
    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Name is required");
        } else if name.chars().count() < NAME_MIN_LEN {
            errors.add("name", "Name must be at least 2 characters");
        }

        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);

        if self.confirm_password.trim().is_empty() {
            errors.add("confirmPassword", "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.add("confirmPassword", "Passwords do not match");
        }

        errors
    }
}

fn check_email(email: &str, errors: &mut ValidationErrors) {
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.add("email", "Email is invalid");
    }
}

fn check_password(password: &str, errors: &mut ValidationErrors) {
    if password.trim().is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < PASSWORD_MIN_LEN {
        errors.add("password", "Password must be at least 6 characters");
    }
}
