use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::{full_name, User};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Lecturer {
    #[serde(default)]
    pub lecturer_id: Option<i64>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub hire_date: Option<String>,
}

impl Lecturer {
    pub fn full_name(&self) -> String {
        match self.user {
            Some(ref u) => full_name(u.first_name.as_deref(), u.last_name.as_deref()),
            None => String::new(),
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CreateLecturerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
}
