use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::user::Role;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// `data` of the login, register and refresh responses.
///
/// Every field is optional: a refresh response may carry only a token, and
/// the backend does not always return a refresh token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl AuthPayload {
    /// The access token, if present and non-empty.
    pub fn usable_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Decode each field on its own, so a mistyped field is dropped
    /// without discarding the others.
    pub fn from_value_lenient(data: &Value) -> Self {
        fn field<T: DeserializeOwned>(data: &Value, key: &str) -> Option<T> {
            data.get(key).and_then(|v| T::deserialize(v).ok())
        }

        Self {
            token: field(data, "token"),
            refresh_token: field(data, "refreshToken"),
            user_id: field(data, "userId"),
            email: field(data, "email"),
            first_name: field(data, "firstName"),
            last_name: field(data, "lastName"),
            role: field(data, "role"),
        }
    }

    pub fn has_user_fields(&self) -> bool {
        self.user_id.is_some()
            || self.email.is_some()
            || self.first_name.is_some()
            || self.last_name.is_some()
            || self.role.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_serializes_camel_case() {
        let req = RegisterRequest {
            first_name: "Ava".into(),
            last_name: "Vale".into(),
            email: "ava@example.com".into(),
            password: "Passw0rd!1".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 4, 9),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["firstName"], "Ava");
        assert_eq!(json["dateOfBirth"], "2001-04-09");
    }

    #[test]
    fn test_auth_payload_token_only() {
        let payload: AuthPayload = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(payload.usable_token(), Some("abc"));
        assert!(!payload.has_user_fields());

        let empty: AuthPayload = serde_json::from_str(r#"{"token": ""}"#).unwrap();
        assert_eq!(empty.usable_token(), None);
    }

    #[test]
    fn test_lenient_payload_skips_mistyped_fields() {
        let data = serde_json::json!({
            "token": "abc",
            "userId": "5",
            "email": "ava@example.com",
            "firstName": null,
            "role": "Admin"
        });
        let payload = AuthPayload::from_value_lenient(&data);
        assert_eq!(payload.usable_token(), Some("abc"));
        assert_eq!(payload.user_id, None);
        assert_eq!(payload.email.as_deref(), Some("ava@example.com"));
        assert_eq!(payload.first_name, None);
        assert_eq!(payload.role, Some(Role::Admin));
    }
}
