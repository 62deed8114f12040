use std::fmt;

use serde::{Deserialize, Serialize};

/// Account role as reported by the backend.
///
/// Unknown role names are kept verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Lecturer,
    Student,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "Admin",
            Role::Lecturer => "Lecturer",
            Role::Student => "Student",
            Role::Other(name) => name,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Admins and lecturers can manage courses and see lecturer reports.
    pub fn can_manage_courses(&self) -> bool {
        matches!(self, Role::Admin | Role::Lecturer)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Admin" => Role::Admin,
            "Lecturer" => Role::Lecturer,
            "Student" => Role::Student,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account. Also appears embedded in student and lecturer records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "ts", ts(type = "string | null"))]
    pub role: Option<Role>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// "First Last", trimmed; empty when neither name is known.
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// Join optional first and last names the way list views show them.
pub(crate) fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
        .trim()
        .to_string()
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub role: Role,
}

/// Profile update; the password is only sent when it is being changed.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_known_and_unknown_names() {
        let roles: Vec<Role> = serde_json::from_str(r#"["Admin", "Lecturer", "Student", "Registrar"]"#).unwrap();
        assert_eq!(
            roles,
            vec![
                Role::Admin,
                Role::Lecturer,
                Role::Student,
                Role::Other("Registrar".into())
            ]
        );
        assert_eq!(serde_json::to_string(&Role::Other("Registrar".into())).unwrap(), r#""Registrar""#);
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.is_admin());
        assert!(Role::Admin.can_manage_courses());
        assert!(Role::Lecturer.can_manage_courses());
        assert!(!Role::Student.can_manage_courses());
        assert!(!Role::Other("admin".into()).is_admin());
    }

    #[test]
    fn test_full_name_handles_missing_parts() {
        let user = User {
            first_name: Some("Ava".into()),
            ..Default::default()
        };
        assert_eq!(user.full_name(), "Ava");
        assert_eq!(User::default().full_name(), "");
    }

    #[test]
    fn test_update_user_omits_blank_password() {
        let req = UpdateUserRequest {
            first_name: "Ava".into(),
            last_name: "Vale".into(),
            email: "ava@example.com".into(),
            password: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["firstName"], "Ava");
    }
}
