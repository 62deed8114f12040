use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lecturer::Lecturer;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub credits: Option<i32>,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub lecturer_id: Option<i64>,
    #[serde(default)]
    pub lecturer: Option<Lecturer>,
    #[serde(default)]
    pub course_metadata: Option<Value>,
}

impl Course {
    /// "CODE - Title" as shown in pickers.
    pub fn display_label(&self) -> String {
        format!(
            "{} - {}",
            self.course_code.as_deref().unwrap_or("?"),
            self.title.as_deref().unwrap_or("Untitled")
        )
    }
}

/// Body for both course creation and update.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub course_code: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecturer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_metadata: Option<String>,
}
