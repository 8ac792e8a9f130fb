//! Handler for the `dashboard` command

use super::HandlerContext;
use crate::cli::OutputFormatter;
use crate::core::PriorityBreakdown;
use crate::error::Result;
use crate::service::Action;

/// Show ticket counts by status, plus priorities in detailed mode
///
/// # Errors
///
/// Returns an error if:
/// - No session is stored
/// - The ticket collection cannot be read
pub async fn handle_dashboard(
    detailed: bool,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let session = ctx.require_session()?;
    let store = ctx.load_tickets(Action::LoadStats, output).await?;

    let stats = store.stats();
    let breakdown = detailed.then(|| PriorityBreakdown::from_tickets(store.list()));

    if output.is_json() {
        let mut value = serde_json::json!({
            "user": session.user,
            "stats": stats,
        });
        if let Some(breakdown) = breakdown {
            value["priorities"] = serde_json::to_value(breakdown)?;
        }
        output.json(&value)
    } else {
        output.info(&format!("Welcome back, {}!", session.user.name));
        output.info("");
        output.print_stats(&stats, breakdown.as_ref());
        Ok(())
    }
}
