use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AuthPayload, Role, User};

/// Persisted authentication state.
///
/// A session with a token but no `user` is valid but incomplete;
/// `AuthService::bootstrap` fills the user in lazily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// The signed-in user's profile as kept in the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
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

impl AuthUser {
    pub fn display_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let name = name.trim();
        if !name.is_empty() {
            name.to_string()
        } else {
            self.email.clone().unwrap_or_else(|| "Unknown user".to_string())
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_ref().map(Role::is_admin).unwrap_or(false)
    }

    pub fn can_manage_courses(&self) -> bool {
        self.role
            .as_ref()
            .map(Role::can_manage_courses)
            .unwrap_or(false)
    }

    /// Overlay the fields present in `payload`, keeping the rest.
    fn merge_from(&mut self, payload: &AuthPayload) {
        if let Some(id) = payload.user_id {
            self.user_id = Some(id);
        }
        if let Some(ref email) = payload.email {
            self.email = Some(email.clone());
        }
        if let Some(ref first) = payload.first_name {
            self.first_name = Some(first.clone());
        }
        if let Some(ref last) = payload.last_name {
            self.last_name = Some(last.clone());
        }
        if let Some(ref role) = payload.role {
            self.role = Some(role.clone());
        }
    }
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
        }
    }
}

impl SessionData {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            refresh_token: None,
            user: None,
            created_at: Utc::now(),
        }
    }

    /// Normalize a login/register response into a session.
    ///
    /// Returns `None` when the response carries no usable token.
    pub fn from_auth_payload(payload: &AuthPayload) -> Option<Self> {
        let token = payload.usable_token()?;
        // A token-only response leaves the profile to be fetched later
        let user = payload.has_user_fields().then(|| {
            let mut user = AuthUser::default();
            user.merge_from(payload);
            user
        });

        Some(Self {
            token: token.to_string(),
            refresh_token: payload.refresh_token.clone().filter(|t| !t.is_empty()),
            user,
            created_at: Utc::now(),
        })
    }

    /// Apply a successful refresh: new token, user fields merged over the
    /// known profile. The refresh token is kept unless a new one is issued.
    pub fn apply_refresh(&mut self, token: &str, payload: &AuthPayload) {
        self.token = token.to_string();
        if let Some(next) = payload.refresh_token.as_deref().filter(|t| !t.is_empty()) {
            self.refresh_token = Some(next.to_string());
        }
        if payload.has_user_fields() {
            self.user
                .get_or_insert_with(AuthUser::default)
                .merge_from(payload);
        }
        self.created_at = Utc::now();
    }

    pub fn is_complete(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().and_then(|u| u.role.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> AuthPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_from_auth_payload_builds_user() {
        let p = payload(
            r#"{"token": "t1", "refreshToken": "r1", "userId": 5, "email": "ava@example.com", "firstName": "Ava", "lastName": "Vale", "role": "Admin"}"#,
        );
        let session = SessionData::from_auth_payload(&p).unwrap();
        assert_eq!(session.token, "t1");
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
        let user = session.user.unwrap();
        assert_eq!(user.user_id, Some(5));
        assert!(user.is_admin());
        assert_eq!(user.display_name(), "Ava Vale");
    }

    #[test]
    fn test_from_auth_payload_requires_token() {
        assert!(SessionData::from_auth_payload(&payload(r#"{"email": "a@b.c"}"#)).is_none());
        assert!(SessionData::from_auth_payload(&payload(r#"{"token": ""}"#)).is_none());
    }

    #[test]
    fn test_token_only_payload_is_incomplete() {
        let session = SessionData::from_auth_payload(&payload(r#"{"token": "t1"}"#)).unwrap();
        assert!(!session.is_complete());
        assert!(session.refresh_token.is_none());
    }

    #[test]
    fn test_apply_refresh_preserves_unreturned_fields() {
        let mut session = SessionData::from_auth_payload(&payload(
            r#"{"token": "old", "refreshToken": "r1", "userId": 5, "email": "ava@example.com", "firstName": "Ava", "lastName": "Vale", "role": "Lecturer"}"#,
        ))
        .unwrap();

        session.apply_refresh("new", &payload(r#"{"token": "new", "firstName": "Avery"}"#));

        assert_eq!(session.token, "new");
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
        let user = session.user.as_ref().unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Avery"));
        assert_eq!(user.last_name.as_deref(), Some("Vale"));
        assert_eq!(user.role, Some(Role::Lecturer));
    }

    #[test]
    fn test_apply_refresh_without_user_fields_keeps_incomplete_session() {
        let mut session = SessionData::new("old");
        session.apply_refresh("new", &payload(r#"{"token": "new"}"#));
        assert_eq!(session.token, "new");
        assert!(!session.is_complete());
    }

    #[test]
    fn test_session_without_user_parses() {
        let session: SessionData = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(session.token, "abc");
        assert!(session.user.is_none());
        assert!(session.role().is_none());
    }
}
