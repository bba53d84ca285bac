//! Current-user profile.

use crate::{NeonClient, Result};
use reqwest::Method;
use serde_json::{Value, json};

impl NeonClient {
    /// Get the current user's profile, filtered to
    /// `{name, last_name, email, id, plan}`.
    ///
    /// A non-2xx response is returned as an error.
    pub async fn get_current_user_info(&self) -> Result<Value> {
        let (status, body) = self.request(Method::GET, "/users/me", &[], None).await?;
        let user = Self::strict(status, &body)?;
        let filtered = filter_user(&user);
        if filtered["id"].is_null() {
            tracing::warn!("user id not found in the response");
        } else {
            tracing::info!(user_id = %filtered["id"], "retrieved user info");
        }
        Ok(filtered)
    }
}

/// Reduce the upstream profile to the five fields the triage prompt
/// needs.
pub(crate) fn filter_user(user: &Value) -> Value {
    json!({
        "name": user.get("name").cloned().unwrap_or(Value::Null),
        "last_name": user.get("last_name").cloned().unwrap_or(Value::Null),
        "email": user.get("email").cloned().unwrap_or(Value::Null),
        "id": user.get("id").cloned().unwrap_or(Value::Null),
        "plan": user.get("plan").cloned().unwrap_or(Value::Null),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_drops_extra_fields() {
        let upstream = json!({
            "name": "Test",
            "last_name": "User",
            "email": "test@example.com",
            "id": "user123",
            "plan": "free",
            "auth_accounts": [{"provider": "github"}]
        });
        let filtered = filter_user(&upstream);
        let keys: Vec<_> = filtered.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 5);
        assert_eq!(filtered["plan"], "free");
        assert!(filtered.get("auth_accounts").is_none());
    }

    #[test]
    fn filter_nulls_missing_fields() {
        let filtered = filter_user(&json!({"id": "user123"}));
        assert_eq!(filtered["id"], "user123");
        assert!(filtered["plan"].is_null());
    }
}
