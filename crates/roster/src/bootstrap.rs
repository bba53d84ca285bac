//! Session bootstrap.
//!
//! One round of Neon API calls up front seeds the shared context with
//! who the user is and what projects they own, so the project agent can
//! triage without an extra tool round-trip.

use anyhow::Result;
use serde_json::Value;
use shoal_core::SharedContext;
use shoal_neon::NeonClient;

/// Build the initial shared context for a new session.
///
/// Fetches the current user and their projects. A failed user lookup is
/// a hard error (the API key is unusable); a failed project list arrives
/// as an inline `{"error": ...}` value the agent can read.
pub async fn bootstrap(neon: &NeonClient) -> Result<SharedContext> {
    tracing::debug!("fetching user info and projects");
    let user_info = neon.get_current_user_info().await?;
    let user_projects = neon.list_projects().await?;
    Ok(initial_context(&user_info, &user_projects))
}

/// The initial context: exactly `user_info` and `user_projects`, each a
/// descriptive string wrapping the raw fetched value.
fn initial_context(user_info: &Value, user_projects: &Value) -> SharedContext {
    let mut context = SharedContext::new();
    context.set(
        "user_info",
        Value::String(format!(
            "Here is what you know about the user's info:\n{user_info}"
        )),
    );
    context.set(
        "user_projects",
        Value::String(format!(
            "Here is what you know about the user's projects:\n{user_projects}"
        )),
    );
    context
}
