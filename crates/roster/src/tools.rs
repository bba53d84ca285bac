//! Tool definitions and registration.
//!
//! Every callable the agents know is declared here: a typed parameter
//! struct (its schema is what the model sees), a [`Tool`] definition,
//! and a handler closing over the Neon client or the SQL executor.
//! Hand-off tools take no arguments and return
//! [`ToolOutput::HandOff`]; everything else returns data.

use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;
use shoal_core::{ContextUpdates, Tool, ToolOutput};
use shoal_neon::{BranchParams, ConnectionUriParams, NeonClient};
use shoal_runtime::Runtime;

#[derive(JsonSchema, Deserialize)]
struct NoParams {}

#[derive(JsonSchema, Deserialize)]
struct ProjectRefParams {
    /// The ID of the project.
    project_id: String,
}

#[derive(JsonSchema, Deserialize)]
struct CreateProjectParams {
    /// The name of the project.
    name: String,
    /// The ID of the region for the project.
    region_id: String,
    /// The PostgreSQL major version. Defaults to 16.
    pg_version: Option<u16>,
}

#[derive(JsonSchema, Deserialize)]
struct GetConnectionUriParams {
    /// The ID of the project.
    project_id: String,
    /// The name of the database. Defaults to "neondb".
    database_name: Option<String>,
    /// The name of the role. Defaults to "neondb_owner".
    role_name: Option<String>,
    /// The ID of the branch.
    branch_id: Option<String>,
    /// The ID of the endpoint.
    endpoint_id: Option<String>,
    /// Whether to use connection pooling.
    pooled: Option<bool>,
}

#[derive(JsonSchema, Deserialize)]
struct CreateBranchParams {
    /// The ID of the project.
    project_id: String,
    /// The ID of the parent branch.
    parent_id: Option<String>,
    /// The name of the new branch.
    name: Option<String>,
    /// The type of endpoint for the branch (e.g. "read_write").
    endpoint_type: Option<String>,
}

#[derive(JsonSchema, Deserialize)]
struct BranchRefParams {
    /// The ID of the project.
    project_id: String,
    /// The ID of the branch.
    branch_id: String,
}

#[derive(JsonSchema, Deserialize)]
struct ExecuteSqlParams {
    /// The connection URI for the database.
    connection_uri: String,
    /// The SQL statement to execute.
    sql_query: String,
}

#[derive(JsonSchema, Deserialize)]
struct FetchSchemaParams {
    /// The connection URI for the database.
    connection_uri: String,
}

fn tool<P: JsonSchema>(name: &str, description: &str) -> Tool {
    Tool {
        name: name.into(),
        description: description.into(),
        parameters: schema_for!(P),
        strict: false,
    }
}

/// Register a hand-off tool: no arguments, returns the target agent.
pub(crate) fn register_hand_off(
    runtime: &mut Runtime,
    name: &str,
    target: &'static str,
    description: &str,
) {
    runtime.register(tool::<NoParams>(name, description), move |_args, _ctx| async move {
        Ok(ToolOutput::hand_off(target))
    });
}

/// Register the Neon management tools.
pub(crate) fn register_neon_tools(runtime: &mut Runtime, neon: NeonClient) {
    let client = neon.clone();
    runtime.register_typed(
        tool::<NoParams>(
            "list_projects_with_details",
            "List all projects for the authenticated user with details.",
        ),
        move |_: NoParams, _ctx| {
            let client = client.clone();
            async move { Ok(ToolOutput::json(&client.list_projects_with_details().await?)) }
        },
    );

    let client = neon.clone();
    runtime.register_typed(
        tool::<ProjectRefParams>("get_project", "Get details of a specific project."),
        move |params: ProjectRefParams, _ctx| {
            let client = client.clone();
            async move { Ok(ToolOutput::json(&client.get_project(&params.project_id).await?)) }
        },
    );

    let client = neon.clone();
    runtime.register_typed(
        tool::<CreateProjectParams>(
            "create_project",
            "Create a new project with the specified name, region and PostgreSQL version.",
        ),
        move |params: CreateProjectParams, _ctx| {
            let client = client.clone();
            async move {
                let value = client
                    .create_project(&params.name, &params.region_id, params.pg_version)
                    .await?;
                Ok(ToolOutput::json(&value))
            }
        },
    );

    let client = neon.clone();
    runtime.register_typed(
        tool::<ProjectRefParams>(
            "delete_project",
            "Delete a project and all its associated resources. Permanent and cannot be undone.",
        ),
        move |params: ProjectRefParams, _ctx| {
            let client = client.clone();
            async move { Ok(ToolOutput::json(&client.delete_project(&params.project_id).await?)) }
        },
    );

    let client = neon.clone();
    runtime.register_typed(
        tool::<GetConnectionUriParams>(
            "get_connection_uri",
            "Get the connection URI for a specific database in a project.",
        ),
        move |params: GetConnectionUriParams, _ctx| {
            let client = client.clone();
            async move {
                let request = ConnectionUriParams {
                    project_id: params.project_id,
                    database_name: params.database_name,
                    role_name: params.role_name,
                    branch_id: params.branch_id,
                    endpoint_id: params.endpoint_id,
                    pooled: params.pooled,
                };
                let value = client.get_connection_uri(&request).await?;
                // Establish the URI in the shared context so every
                // later instruction template can see that it exists.
                let mut updates = ContextUpdates::new();
                if let Some(uri) = value.get("uri").and_then(Value::as_str) {
                    updates.insert("connection_uri".into(), Value::String(uri.into()));
                }
                Ok(ToolOutput::data_with(value.to_string(), updates))
            }
        },
    );

    let client = neon.clone();
    runtime.register_typed(
        tool::<CreateBranchParams>("create_project_branch", "Create a new branch in a project."),
        move |params: CreateBranchParams, _ctx| {
            let client = client.clone();
            async move {
                let branch = BranchParams {
                    parent_id: params.parent_id,
                    name: params.name,
                    endpoint_type: params.endpoint_type,
                };
                let value = client
                    .create_project_branch(&params.project_id, &branch)
                    .await?;
                Ok(ToolOutput::json(&value))
            }
        },
    );

    let client = neon.clone();
    runtime.register_typed(
        tool::<ProjectRefParams>("list_project_branches", "List all branches in a project."),
        move |params: ProjectRefParams, _ctx| {
            let client = client.clone();
            async move {
                let value = client.list_project_branches(&params.project_id).await?;
                Ok(ToolOutput::json(&value))
            }
        },
    );

    let client = neon.clone();
    runtime.register_typed(
        tool::<BranchRefParams>("get_project_branch", "Get details of a specific branch in a project."),
        move |params: BranchRefParams, _ctx| {
            let client = client.clone();
            async move {
                let value = client
                    .get_project_branch(&params.project_id, &params.branch_id)
                    .await?;
                Ok(ToolOutput::json(&value))
            }
        },
    );

    let client = neon;
    runtime.register_typed(
        tool::<BranchRefParams>("delete_project_branch", "Delete a specific branch in a project."),
        move |params: BranchRefParams, _ctx| {
            let client = client.clone();
            async move {
                let value = client
                    .delete_project_branch(&params.project_id, &params.branch_id)
                    .await?;
                Ok(ToolOutput::json(&value))
            }
        },
    );
}

/// Register the SQL tools.
pub(crate) fn register_sql_tools(runtime: &mut Runtime) {
    runtime.register_typed(
        tool::<ExecuteSqlParams>(
            "execute_sql",
            "Execute a single SQL statement against the database behind the connection URI. \
             SELECT statements return rows; anything else is committed.",
        ),
        |params: ExecuteSqlParams, _ctx| async move {
            let rows = shoal_sql::execute_sql(&params.connection_uri, &params.sql_query).await?;
            Ok(ToolOutput::data(serde_json::to_string(&rows)?))
        },
    );

    runtime.register_typed(
        tool::<FetchSchemaParams>(
            "fetch_database_schema",
            "Fetch the public schema of the database: tables and their columns.",
        ),
        |params: FetchSchemaParams, _ctx| async move {
            let schema = shoal_sql::fetch_database_schema(&params.connection_uri).await?;
            Ok(ToolOutput::json(&schema))
        },
    );
}
