use serde_json::Value;

use super::{data, API_PREFIX};
use crate::api::query::Pageable;
use crate::api::{ApiClient, ApiError};
use crate::models::{Course, CreateLecturerRequest, Lecturer, Page, Student};

/// `/api/v1/lecturers`
pub struct LecturersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> LecturersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn base() -> String {
        format!("{}/lecturers", API_PREFIX)
    }

    pub async fn list(&self, pageable: &Pageable) -> Result<Page<Lecturer>, ApiError> {
        let path = format!("{}{}", Self::base(), pageable.query());
        data(self.client.get(&path).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Lecturer, ApiError> {
        data(self.client.get(&format!("{}/{}", Self::base(), id)).await?)
    }

    pub async fn create(&self, request: &CreateLecturerRequest) -> Result<Lecturer, ApiError> {
        data(self.client.post(&Self::base(), request).await?)
    }

    pub async fn students(&self, id: i64, pageable: &Pageable) -> Result<Page<Student>, ApiError> {
        let path = format!("{}/{}/students{}", Self::base(), id, pageable.query());
        data(self.client.get(&path).await?)
    }

    /// Teaching statistics; the payload is passed through untyped.
    pub async fn stats(&self, id: i64) -> Result<Value, ApiError> {
        self.client
            .get(&format!("{}/{}/stats", Self::base(), id))
            .await
    }

    pub async fn courses(&self, id: i64, pageable: &Pageable) -> Result<Page<Course>, ApiError> {
        let path = format!("{}/{}/courses{}", Self::base(), id, pageable.query());
        data(self.client.get(&path).await?)
    }

    pub async fn course_students(
        &self,
        id: i64,
        course_id: i64,
        pageable: &Pageable,
    ) -> Result<Page<Student>, ApiError> {
        let path = format!(
            "{}/{}/courses/{}/students{}",
            Self::base(),
            id,
            course_id,
            pageable.query()
        );
        data(self.client.get(&path).await?)
    }

    /// Find the lecturer profile belonging to an account email.
    ///
    /// There is no lookup endpoint, so this scans one large page.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Lecturer>, ApiError> {
        let page = self.list(&Pageable::first(500)).await?;
        Ok(page
            .content
            .into_iter()
            .find(|l| l.email().map(|e| e.eq_ignore_ascii_case(email)).unwrap_or(false)))
    }
}
