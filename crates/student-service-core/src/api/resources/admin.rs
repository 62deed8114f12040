use chrono::NaiveDate;
use serde_json::Value;

use super::{data, API_PREFIX};
use crate::api::query::{Pageable, QueryString};
use crate::api::{ApiClient, ApiError};
use crate::models::{Course, DashboardStats, Enrollment, Page, Student};

/// Default look-back window for recent enrollments
const RECENT_ENROLLMENT_DAYS: u32 = 7;

/// `/api/v1/admin/*` reports.
pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn path(suffix: &str) -> String {
        format!("{}/admin/{}", API_PREFIX, suffix)
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        data(self.client.get(&Self::path("dashboard")).await?)
    }

    pub async fn active_students(&self, pageable: &Pageable) -> Result<Page<Student>, ApiError> {
        let path = format!("{}{}", Self::path("students/active"), pageable.query());
        data(self.client.get(&path).await?)
    }

    pub async fn enrollment_trends(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Value, ApiError> {
        let query = QueryString::new()
            .opt("startDate", start)
            .opt("endDate", end);
        let path = format!("{}{}", Self::path("reports/enrollment-trends"), query.render());
        self.client.get(&path).await
    }

    pub async fn enrollments(&self, pageable: &Pageable) -> Result<Page<Enrollment>, ApiError> {
        let path = format!("{}{}", Self::path("enrollments"), pageable.query());
        data(self.client.get(&path).await?)
    }

    /// Enrollments from the last `days` days (7 when `None`).
    pub async fn recent_enrollments(
        &self,
        days: Option<u32>,
        pageable: &Pageable,
    ) -> Result<Page<Enrollment>, ApiError> {
        let query = QueryString::new()
            .param("days", days.unwrap_or(RECENT_ENROLLMENT_DAYS))
            .pageable(pageable);
        let path = format!("{}{}", Self::path("enrollments/recent"), query.render());
        data(self.client.get(&path).await?)
    }

    pub async fn popular_courses(&self, pageable: &Pageable) -> Result<Page<Course>, ApiError> {
        let path = format!("{}{}", Self::path("courses/popular"), pageable.query());
        data(self.client.get(&path).await?)
    }
}
