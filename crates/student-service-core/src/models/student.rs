use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::{full_name, User};

/// A student record. Name and email normally live on the embedded `user`,
/// but some endpoints flatten them onto the student itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub enrollment_date: Option<String>,
}

impl Student {
    pub fn first_name(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.first_name.as_deref())
            .filter(|s| !s.is_empty())
            .or(self.first_name.as_deref())
    }

    pub fn last_name(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.last_name.as_deref())
            .filter(|s| !s.is_empty())
            .or(self.last_name.as_deref())
    }

    pub fn email(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .filter(|s| !s.is_empty())
            .or(self.email.as_deref())
    }

    pub fn full_name(&self) -> String {
        full_name(self.first_name(), self.last_name())
    }

    /// "Name (email)", or whatever part is known, for pickers and logs.
    pub fn display_label(&self) -> String {
        let name = self.full_name();
        let email = self.email().unwrap_or("");
        if !name.is_empty() {
            format!("{} ({})", name, email)
        } else if !email.is_empty() {
            email.to_string()
        } else {
            match self.student_id {
                Some(id) => format!("Student ID: {}", id),
                None => "Unknown student".to_string(),
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
}
