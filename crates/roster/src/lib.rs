//! The shoal agent roster.
//!
//! Three agents cover the conversation: a project agent that triages
//! and manages Neon projects and branches, a SQL executor that runs
//! statements, and a SQL generator that writes them from the live
//! schema. All three are constructed here, in one place, with their
//! hand-off targets referenced by name.

pub use bootstrap::bootstrap;

mod bootstrap;
mod instructions;
mod tools;

use shoal_core::Agent;
use shoal_neon::NeonClient;
use shoal_runtime::Runtime;

/// The entry-point agent.
pub const PROJECT_AGENT: &str = "project_agent";
/// The statement-running agent.
pub const SQL_EXECUTOR: &str = "sql_executor";
/// The statement-writing agent.
pub const SQL_GENERATOR: &str = "sql_generator";

/// Register every tool and agent on the runtime.
///
/// The hand-off graph is: project agent to executor, executor to
/// generator or back to the project agent, generator to executor. The
/// project agent never hands off to the generator directly; SQL is
/// always brokered through the executor.
pub fn build_roster(runtime: &mut Runtime, neon: NeonClient) {
    tools::register_neon_tools(runtime, neon);
    tools::register_sql_tools(runtime);

    tools::register_hand_off(
        runtime,
        "transfer_to_sql_executor",
        SQL_EXECUTOR,
        "Transfer to the SQL executor agent.",
    );
    tools::register_hand_off(
        runtime,
        "transfer_to_sql_generator",
        SQL_GENERATOR,
        "Transfer to the SQL generator agent.",
    );
    tools::register_hand_off(
        runtime,
        "transfer_to_project_agent",
        PROJECT_AGENT,
        "Transfer back to the project agent.",
    );

    runtime.add_agent(
        Agent::new(PROJECT_AGENT)
            .description("Triage requests and manage Neon projects and branches")
            .instructions(instructions::project_agent)
            .tool("transfer_to_sql_executor")
            .tool("list_projects_with_details")
            .tool("get_project")
            .tool("create_project")
            .tool("delete_project")
            .tool("get_connection_uri")
            .tool("create_project_branch")
            .tool("list_project_branches")
            .tool("get_project_branch")
            .tool("delete_project_branch"),
    );

    runtime.add_agent(
        Agent::new(SQL_EXECUTOR)
            .description("Execute SQL statements against a Neon database")
            .instructions(instructions::sql_executor)
            .tool("transfer_to_sql_generator")
            .tool("transfer_to_project_agent")
            .tool("execute_sql"),
    );

    runtime.add_agent(
        Agent::new(SQL_GENERATOR)
            .description("Generate SQL from the live database schema")
            .instructions(instructions::sql_generator)
            .tool("transfer_to_sql_executor")
            .tool("fetch_database_schema"),
    );
}
