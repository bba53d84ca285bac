//! Project operations.

use crate::{NeonClient, Result};
use reqwest::Method;
use serde_json::{Value, json};

/// Default Postgres major version for new projects.
pub const DEFAULT_PG_VERSION: u16 = 16;

impl NeonClient {
    /// List projects, reshaped to the five fields the agents care
    /// about: id, name, region, Postgres version, org id.
    ///
    /// Non-2xx responses become a `{"error": ...}` value.
    pub async fn list_projects(&self) -> Result<Value> {
        let (status, body) = self.request(Method::GET, "/projects", &[], None).await?;
        Ok(filter_projects(Self::lenient(status, &body)?))
    }

    /// List projects with the full upstream shape.
    ///
    /// Non-2xx responses become a `{"error": ...}` value.
    pub async fn list_projects_with_details(&self) -> Result<Value> {
        let (status, body) = self.request(Method::GET, "/projects", &[], None).await?;
        Self::lenient(status, &body)
    }

    /// Get details of a specific project.
    ///
    /// Non-2xx responses become a `{"error": ...}` value.
    pub async fn get_project(&self, project_id: &str) -> Result<Value> {
        let path = format!("/projects/{project_id}");
        let (status, body) = self.request(Method::GET, &path, &[], None).await?;
        Self::lenient(status, &body)
    }

    /// Create a project. `pg_version` defaults to
    /// [`DEFAULT_PG_VERSION`] when `None`.
    ///
    /// Non-2xx responses become a `{"error": ...}` value.
    pub async fn create_project(
        &self,
        name: &str,
        region_id: &str,
        pg_version: Option<u16>,
    ) -> Result<Value> {
        let payload = project_body(name, region_id, pg_version);
        let (status, body) = self
            .request(Method::POST, "/projects", &[], Some(&payload))
            .await?;
        Self::lenient(status, &body)
    }

    /// Delete a project and all its resources. Permanent.
    ///
    /// Unlike the other project operations, a non-2xx response is
    /// returned as an error.
    pub async fn delete_project(&self, project_id: &str) -> Result<Value> {
        let path = format!("/projects/{project_id}");
        let (status, body) = self.request(Method::DELETE, &path, &[], None).await?;
        Self::strict(status, &body)
    }

    /// Get the connection URI for a database in a project.
    ///
    /// The returned URI is a secret; callers decide whether it may be
    /// shown. A non-2xx response is returned as an error.
    pub async fn get_connection_uri(&self, params: &ConnectionUriParams) -> Result<Value> {
        let path = format!("/projects/{}/connection_uri", params.project_id);
        let query = connection_uri_query(params);
        let (status, body) = self.request(Method::GET, &path, &query, None).await?;
        Self::strict(status, &body)
    }
}

/// Parameters for [`NeonClient::get_connection_uri`].
#[derive(Debug, Clone, Default)]
pub struct ConnectionUriParams {
    /// The project to connect to.
    pub project_id: String,
    /// Database name; defaults to `neondb`.
    pub database_name: Option<String>,
    /// Role name; defaults to `neondb_owner`.
    pub role_name: Option<String>,
    /// Optional branch to target.
    pub branch_id: Option<String>,
    /// Optional endpoint to target.
    pub endpoint_id: Option<String>,
    /// Whether to use a pooled endpoint.
    pub pooled: Option<bool>,
}

impl ConnectionUriParams {
    /// Parameters targeting a project with all defaults.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

/// Build the query string for a connection-URI request.
///
/// `database_name` and `role_name` are always present (with their
/// defaults); the optional parameters appear only when supplied, and
/// `pooled` is lowercased.
pub(crate) fn connection_uri_query(params: &ConnectionUriParams) -> Vec<(&'static str, String)> {
    let mut query = vec![
        (
            "database_name",
            params.database_name.clone().unwrap_or_else(|| "neondb".into()),
        ),
        (
            "role_name",
            params
                .role_name
                .clone()
                .unwrap_or_else(|| "neondb_owner".into()),
        ),
    ];
    if let Some(branch_id) = &params.branch_id {
        query.push(("branch_id", branch_id.clone()));
    }
    if let Some(endpoint_id) = &params.endpoint_id {
        query.push(("endpoint_id", endpoint_id.clone()));
    }
    if let Some(pooled) = params.pooled {
        query.push(("pooled", pooled.to_string()));
    }
    query
}

/// Request body for project creation.
pub(crate) fn project_body(name: &str, region_id: &str, pg_version: Option<u16>) -> Value {
    json!({
        "project": {
            "pg_version": pg_version.unwrap_or(DEFAULT_PG_VERSION),
            "name": name,
            "region_id": region_id,
        }
    })
}

/// Reduce each upstream project record to
/// `{id, name, region_id, pg_version, org_id}`.
///
/// An error value passes through untouched.
pub(crate) fn filter_projects(full: Value) -> Value {
    let Some(projects) = full.get("projects").and_then(Value::as_array) else {
        return full;
    };

    let filtered: Vec<Value> = projects
        .iter()
        .map(|project| {
            json!({
                "id": project.get("id").cloned().unwrap_or(Value::Null),
                "name": project.get("name").cloned().unwrap_or(Value::Null),
                "region_id": project.get("region_id").cloned().unwrap_or(Value::Null),
                "pg_version": project.get("pg_version").cloned().unwrap_or(Value::Null),
                "org_id": project.get("org_id").cloned().unwrap_or(Value::Null),
            })
        })
        .collect();

    json!({ "projects": filtered })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keeps_exactly_five_keys() {
        let upstream = json!({
            "projects": [{
                "id": "p1",
                "name": "demo",
                "region_id": "aws-us-east-2",
                "pg_version": 16,
                "org_id": "org1",
                "created_at": "2024-01-01T00:00:00Z",
                "quota": {"cpu": 4}
            }]
        });

        let filtered = filter_projects(upstream);
        let project = filtered["projects"][0].as_object().unwrap();
        let mut keys: Vec<_> = project.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["id", "name", "org_id", "pg_version", "region_id"]);
        assert_eq!(project["pg_version"], 16);
    }

    #[test]
    fn filter_passes_error_values_through() {
        let error = json!({"error": "HTTPError: 401"});
        assert_eq!(filter_projects(error.clone()), error);
    }

    #[test]
    fn project_body_defaults_pg_version() {
        let body = project_body("demo", "aws-us-east-2", None);
        assert_eq!(body["project"]["pg_version"], 16);
        assert_eq!(body["project"]["name"], "demo");
        assert_eq!(body["project"]["region_id"], "aws-us-east-2");
    }

    #[test]
    fn connection_uri_query_defaults() {
        let query = connection_uri_query(&ConnectionUriParams::new("p1"));
        assert_eq!(
            query,
            vec![
                ("database_name", "neondb".to_string()),
                ("role_name", "neondb_owner".to_string()),
            ]
        );
    }

    #[test]
    fn connection_uri_query_lowercases_pooled() {
        let params = ConnectionUriParams {
            pooled: Some(true),
            branch_id: Some("br-1".into()),
            ..ConnectionUriParams::new("p1")
        };
        let query = connection_uri_query(&params);
        assert!(query.contains(&("pooled", "true".to_string())));
        assert!(query.contains(&("branch_id", "br-1".to_string())));
    }
}
