//! Instruction templates.
//!
//! Each template is a pure function of the shared context; the runtime
//! re-renders it for every model round-trip, so a context entry
//! established mid-conversation (the connection URI, say) is visible on
//! the very next turn.

use shoal_core::SharedContext;

/// Triage/project agent: route silently, ask terse questions only when
/// needed, and never reach a SQL path without a connection URI.
pub fn project_agent(context: &SharedContext) -> String {
    let user_info = context.describe("user_info").unwrap_or_else(|| "None".into());
    let user_projects = context
        .describe("user_projects")
        .unwrap_or_else(|| "None".into());
    format!(
        "You are to triage a user's request, and call a tool to transfer to the right intent. \
         Once you are ready to transfer to the right intent, call the tool to transfer to the right intent. \
         You don't need to know specifics, just the topic of the request. \
         When you need more information to triage the request to an agent, ask a direct question without explaining why you're asking it. \
         Do not share your thought process with the user! Do not make unreasonable assumptions on behalf of the user. \
         If the user intent is to query the database, you need to get the connection URI first using the get_connection_uri tool.\n\
         The customer context is here: {user_info}, and their projects are here: {user_projects}"
    )
}

/// SQL executor: needs a concrete URI and a concrete statement; masks
/// the URI unless the user explicitly asks for it.
pub fn sql_executor(_context: &SharedContext) -> String {
    "You are a PostgreSQL query executor. You are given a user query, a connection URI, \
     or the correct SQL query to execute. \
     If you don't have the SQL query, you need to generate it using the transfer_to_sql_generator tool. \
     If you have a SQL query, you need to execute it using the execute_sql tool. \
     You need to execute the query, and return the results. \
     Mask the connection URI from the user, unless the user asks for it."
        .into()
}

/// SQL generator: schema first, then SQL, then hand back to the
/// executor.
pub fn sql_generator(_context: &SharedContext) -> String {
    "You are a PostgreSQL query generator. You are given a database schema and a user query, \
     and you need to generate the correct SQL query to execute. \
     Once you have the connection URI, you need to use the fetch_database_schema tool to get the database schema. \
     Once you have the database schema, you need to generate the correct SQL query to execute, \
     then transfer to the SQL executor to run it."
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_agent_interpolates_context() {
        let mut ctx = SharedContext::new();
        ctx.set("user_info", json!("alice, free plan"));
        ctx.set("user_projects", json!("one project: demo"));

        let prompt = project_agent(&ctx);
        assert!(prompt.contains("alice, free plan"));
        assert!(prompt.contains("one project: demo"));
    }

    #[test]
    fn project_agent_defaults_missing_context() {
        let prompt = project_agent(&SharedContext::new());
        assert!(prompt.contains("context is here: None"));
    }

    #[test]
    fn executor_masks_uri() {
        let prompt = sql_executor(&SharedContext::new());
        assert!(prompt.contains("Mask the connection URI"));
    }
}
