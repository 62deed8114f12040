use std::fmt;

use serde::{Deserialize, Serialize};

use super::course::Course;
use super::student::Student;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnrollmentStatus {
    Active,
    Dropped,
    Completed,
    Other(String),
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EnrollmentStatus::Active => "Active",
            EnrollmentStatus::Dropped => "Dropped",
            EnrollmentStatus::Completed => "Completed",
            EnrollmentStatus::Other(s) => s,
        }
    }
}

impl From<String> for EnrollmentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Active" => EnrollmentStatus::Active,
            "Dropped" => EnrollmentStatus::Dropped,
            "Completed" => EnrollmentStatus::Completed,
            _ => EnrollmentStatus::Other(value),
        }
    }
}

impl From<EnrollmentStatus> for String {
    fn from(status: EnrollmentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default)]
    pub enrollment_id: Option<i64>,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub student: Option<Student>,
    #[serde(default)]
    pub course: Option<Course>,
    #[serde(default)]
    #[cfg_attr(feature = "ts", ts(type = "string | null"))]
    pub status: Option<EnrollmentStatus>,
    #[serde(default)]
    pub grade: Option<f64>,
    #[serde(default)]
    pub enrollment_date: Option<String>,
}

impl Enrollment {
    /// Student id from the embedded student, else the flat field.
    pub fn student_ref(&self) -> Option<i64> {
        self.student
            .as_ref()
            .and_then(|s| s.student_id)
            .or(self.student_id)
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self.status, Some(EnrollmentStatus::Dropped))
    }
}

/// One row of a batch enrollment form. Either side may still be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct NewEnrollment {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
}

impl NewEnrollment {
    pub fn new(student_id: i64, course_id: i64) -> Self {
        Self {
            student_id: Some(student_id),
            course_id: Some(course_id),
        }
    }

    /// Both ids, when the row is complete.
    pub fn pair(&self) -> Option<(i64, i64)> {
        Some((self.student_id?, self.course_id?))
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnrollmentRequest {
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub status: EnrollmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_parses_status_and_grade() {
        let json = r#"{"enrollmentId": 1, "status": "Dropped", "grade": 8.5, "student": {"studentId": 7}, "course": {"courseId": 3, "courseCode": "CS-1"}}"#;
        let enrollment: Enrollment = serde_json::from_str(json).unwrap();
        assert!(enrollment.is_dropped());
        assert_eq!(enrollment.grade, Some(8.5));
        assert_eq!(enrollment.student_ref(), Some(7));
    }

    #[test]
    fn test_student_ref_falls_back_to_flat_id() {
        let enrollment: Enrollment = serde_json::from_str(r#"{"studentId": 9, "status": "Waitlisted"}"#).unwrap();
        assert_eq!(enrollment.student_ref(), Some(9));
        assert_eq!(enrollment.status, Some(EnrollmentStatus::Other("Waitlisted".into())));
    }

    #[test]
    fn test_new_enrollment_pair_requires_both_ids() {
        assert_eq!(NewEnrollment::new(1, 2).pair(), Some((1, 2)));
        let partial = NewEnrollment {
            student_id: Some(1),
            course_id: None,
        };
        assert_eq!(partial.pair(), None);
    }
}
