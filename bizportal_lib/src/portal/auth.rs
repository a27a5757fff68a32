//! Sign-in, sign-out and the current user profile.

use bizportal_api::endpoints::auth;
use bizportal_api::types::{LoginRequest, User};
use bizportal_api::{unwrap_record, Client, Error};
use reqwest::Method;
use serde_json::Value;

use crate::error::PortalError;
use crate::messages::{classify_error, report};

pub struct Auth<'a> {
    client: &'a Client,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a token and starts a session.
    ///
    /// The login request never carries a previous token. Any existing session
    /// is replaced only once the backend has issued a new token.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, PortalError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(PortalError::InvalidInput(
                "email and password are required".to_string(),
            ));
        }
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let value = self
            .client
            .send_json(Method::POST, self.client.login_path(), Some(&request))
            .await
            .map_err(|e| report("login", e))?;

        let Some(token) = extract_token(&value) else {
            tracing::error!("login: response carried no token");
            return Err(classify_error(Error::Application {
                message: "Login failed: the server did not issue a session token".to_string(),
                body: Value::Null,
            }));
        };
        let user_value = extract_user(&value);
        self.client.session().begin(&token, user_value.as_ref());
        tracing::info!("Signed in as {}", email);

        Ok(user_value
            .map(serde_json::from_value)
            .transpose()?
            .unwrap_or_else(|| User {
                email: Some(email.to_string()),
                ..User::default()
            }))
    }

    /// Ends the session. The backend is told on a best-effort basis; the local
    /// session is cleared regardless of its answer. Returns whether a session
    /// was active.
    pub async fn logout(&self) -> bool {
        let session = self.client.session();
        if !session.is_authenticated() {
            return false;
        }
        let quiet = self.client.without_unauthorized_hook();
        if let Err(e) = quiet
            .send_json::<()>(Method::POST, auth::LOGOUT, None)
            .await
        {
            tracing::debug!("Logout notification failed: {}", e);
        }
        session.clear();
        true
    }

    /// Profile of the signed-in user, fetched from the backend.
    pub async fn current_user(&self) -> Result<User, PortalError> {
        let value = self
            .client
            .get_json(auth::PROFILE, Vec::new())
            .await
            .map_err(|e| report("load profile", e))?;
        let value = match value {
            Value::Object(mut map) if map.get("user").is_some_and(Value::is_object) => {
                map.remove("user").unwrap_or_default()
            }
            other => unwrap_record(other),
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Profile cached at login, without a network call.
    pub fn cached_user(&self) -> Option<User> {
        self.client
            .session()
            .user()
            .and_then(|v| serde_json::from_value(v).ok())
    }
}

fn extract_token(value: &Value) -> Option<String> {
    ["token", "accessToken"]
        .iter()
        .find_map(|k| value.get(*k))
        .or_else(|| value.get("data").and_then(|d| d.get("token")))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn extract_user(value: &Value) -> Option<Value> {
    value
        .get("user")
        .or_else(|| value.get("data").and_then(|d| d.get("user")))
        .filter(|u| u.is_object())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_is_found_at_top_level_or_under_data() {
        assert_eq!(extract_token(&json!({"token": "a"})).as_deref(), Some("a"));
        assert_eq!(
            extract_token(&json!({"accessToken": "b"})).as_deref(),
            Some("b")
        );
        assert_eq!(
            extract_token(&json!({"success": true, "data": {"token": "c"}})).as_deref(),
            Some("c")
        );
        assert_eq!(extract_token(&json!({"token": ""})), None);
        assert_eq!(extract_token(&json!({"message": "ok"})), None);
    }

    #[test]
    fn user_must_be_an_object() {
        assert!(extract_user(&json!({"user": {"name": "Ada"}})).is_some());
        assert!(extract_user(&json!({"data": {"user": {"name": "Ada"}}})).is_some());
        assert!(extract_user(&json!({"user": "Ada"})).is_none());
    }
}
