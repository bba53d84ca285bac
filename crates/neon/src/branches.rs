//! Branch operations.

use crate::{NeonClient, Result};
use reqwest::Method;
use serde_json::{Value, json};

impl NeonClient {
    /// Create a branch in a project.
    ///
    /// Non-2xx responses become a `{"error": ...}` value.
    pub async fn create_project_branch(
        &self,
        project_id: &str,
        params: &BranchParams,
    ) -> Result<Value> {
        let path = format!("/projects/{project_id}/branches");
        let payload = branch_body(params);
        let (status, body) = self
            .request(Method::POST, &path, &[], Some(&payload))
            .await?;
        Self::lenient(status, &body)
    }

    /// List branches in a project.
    ///
    /// Non-2xx responses become a `{"error": ...}` value.
    pub async fn list_project_branches(&self, project_id: &str) -> Result<Value> {
        let path = format!("/projects/{project_id}/branches");
        let (status, body) = self.request(Method::GET, &path, &[], None).await?;
        Self::lenient(status, &body)
    }

    /// Get details of a branch.
    ///
    /// Non-2xx responses become a `{"error": ...}` value.
    pub async fn get_project_branch(&self, project_id: &str, branch_id: &str) -> Result<Value> {
        let path = format!("/projects/{project_id}/branches/{branch_id}");
        let (status, body) = self.request(Method::GET, &path, &[], None).await?;
        Self::lenient(status, &body)
    }

    /// Delete a branch.
    ///
    /// Non-2xx responses become a `{"error": ...}` value.
    pub async fn delete_project_branch(&self, project_id: &str, branch_id: &str) -> Result<Value> {
        let path = format!("/projects/{project_id}/branches/{branch_id}");
        let (status, body) = self.request(Method::DELETE, &path, &[], None).await?;
        Self::lenient(status, &body)
    }
}

/// Optional parameters for branch creation.
#[derive(Debug, Clone, Default)]
pub struct BranchParams {
    /// Parent branch id.
    pub parent_id: Option<String>,
    /// Branch name.
    pub name: Option<String>,
    /// Endpoint type (`read_write` or `read_only`); when set, the body
    /// grows an `endpoints` array.
    pub endpoint_type: Option<String>,
}

/// Build the branch-creation body. Every key is conditional: with no
/// parameters the body is exactly `{"branch": {}}`.
pub(crate) fn branch_body(params: &BranchParams) -> Value {
    let mut branch = serde_json::Map::new();
    if let Some(parent_id) = &params.parent_id {
        branch.insert("parent_id".into(), json!(parent_id));
    }
    if let Some(name) = &params.name {
        branch.insert("name".into(), json!(name));
    }

    let mut body = json!({ "branch": branch });
    if let Some(endpoint_type) = &params.endpoint_type {
        body["endpoints"] = json!([{ "type": endpoint_type }]);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_give_bare_branch_body() {
        let body = branch_body(&BranchParams::default());
        assert_eq!(body, json!({"branch": {}}));
        assert!(body.get("endpoints").is_none());
    }

    #[test]
    fn endpoint_type_adds_endpoints_array() {
        let params = BranchParams {
            endpoint_type: Some("read_write".into()),
            ..Default::default()
        };
        let body = branch_body(&params);
        assert_eq!(body["endpoints"], json!([{"type": "read_write"}]));
        assert_eq!(body["branch"], json!({}));
    }

    #[test]
    fn parent_and_name_nest_under_branch() {
        let params = BranchParams {
            parent_id: Some("br-main".into()),
            name: Some("feature".into()),
            endpoint_type: None,
        };
        let body = branch_body(&params);
        assert_eq!(body["branch"]["parent_id"], "br-main");
        assert_eq!(body["branch"]["name"], "feature");
        assert!(body.get("endpoints").is_none());
    }
}
