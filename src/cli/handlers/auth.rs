//! Handlers for `login`, `signup`, `logout` and `whoami`

use super::HandlerContext;
use super::common::{finish_spinner, report_success};
use crate::cli::OutputFormatter;
use crate::core::{LoginForm, SignupForm};
use crate::error::Result;
use crate::service::Action;
use crate::storage::Session;
use dialoguer::{Input, Password, theme::ColorfulTheme};

/// Sign in, prompting for whatever was not given on the command line
pub async fn handle_login(
    email: Option<String>,
    password: Option<String>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    let auth = ctx.authenticator();
    let spinner = output.spinner("Signing in...", ctx.latency().auth());
    let result = auth.login(&LoginForm::new(email, password)).await;
    finish_spinner(spinner);

    let session = result.map_err(|e| Action::Login.escalate(e))?;
    report_session(output, Action::Login, &session)
}

/// Create an account and sign in
///
/// The confirmation defaults to `--password` when only that was given.
pub async fn handle_signup(
    name: String,
    email: String,
    password: Option<String>,
    confirm_password: Option<String>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let prompted = password.is_none();
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };
    let confirm_password = match confirm_password {
        Some(confirm) => confirm,
        None if prompted => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Confirm password")
            .interact()?,
        None => password.clone(),
    };

    let form = SignupForm {
        name,
        email,
        password,
        confirm_password,
    };
    let auth = ctx.authenticator();
    let spinner = output.spinner("Creating account...", ctx.latency().auth());
    let result = auth.signup(&form).await;
    finish_spinner(spinner);

    let session = result.map_err(|e| Action::Signup.escalate(e))?;
    report_session(output, Action::Signup, &session)
}

pub fn handle_logout(ctx: &HandlerContext, output: &OutputFormatter) -> Result<()> {
    ctx.authenticator()
        .logout()
        .map_err(|e| Action::Logout.escalate(e))?;

    report_success(output, Action::Logout, serde_json::json!({}))
}

pub fn handle_whoami(ctx: &HandlerContext, output: &OutputFormatter) -> Result<()> {
    let session = ctx.require_session()?;
    if output.is_json() {
        output.json(&session.user)
    } else {
        output.info(&format!("{} <{}>", session.user.name, session.user.email));
        Ok(())
    }
}

fn report_session(output: &OutputFormatter, action: Action, session: &Session) -> Result<()> {
    report_success(output, action, serde_json::json!({ "user": session.user }))?;
    output.info(&format!("Welcome, {}!", session.user.name));
    Ok(())
}
