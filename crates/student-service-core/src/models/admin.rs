use serde::{Deserialize, Serialize};

/// Aggregates shown on the admin dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: Option<i64>,
    #[serde(default)]
    pub total_students: Option<i64>,
    #[serde(default)]
    pub total_lecturers: Option<i64>,
    #[serde(default)]
    pub total_courses: Option<i64>,
    #[serde(default)]
    pub enrollment_stats: Option<EnrollmentStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentStats {
    #[serde(default)]
    pub total_enrollments: Option<i64>,
    #[serde(default)]
    pub active_enrollments: Option<i64>,
    #[serde(default)]
    pub completed_enrollments: Option<i64>,
    #[serde(default)]
    pub dropped_enrollments: Option<i64>,
}

impl DashboardStats {
    pub fn total_enrollments(&self) -> Option<i64> {
        self.enrollment_stats
            .as_ref()
            .and_then(|s| s.total_enrollments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashboard() {
        let json = r#"{"totalUsers": 40, "totalStudents": 30, "totalCourses": 8, "enrollmentStats": {"totalEnrollments": 55}}"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_users, Some(40));
        assert_eq!(stats.total_enrollments(), Some(55));
        assert_eq!(stats.total_lecturers, None);
    }
}
