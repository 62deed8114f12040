use chrono::NaiveDate;

use super::{data, API_PREFIX};
use crate::api::query::{encode_segment, Pageable, QueryString};
use crate::api::{ApiClient, ApiError};
use crate::models::{CreateStudentRequest, Page, Student, UpdateStudentRequest};

/// `/api/v1/students`
pub struct StudentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> StudentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn base() -> String {
        format!("{}/students", API_PREFIX)
    }

    pub async fn list(&self, pageable: &Pageable) -> Result<Page<Student>, ApiError> {
        let path = format!("{}{}", Self::base(), pageable.query());
        data(self.client.get(&path).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Student, ApiError> {
        data(self.client.get(&format!("{}/{}", Self::base(), id)).await?)
    }

    pub async fn create(&self, request: &CreateStudentRequest) -> Result<Student, ApiError> {
        data(self.client.post(&Self::base(), request).await?)
    }

    pub async fn update(&self, id: i64, request: &UpdateStudentRequest) -> Result<Student, ApiError> {
        data(self.client.put(&format!("{}/{}", Self::base(), id), request).await?)
    }

    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.client.del(&format!("{}/{}", Self::base(), id)).await?;
        Ok(())
    }

    pub async fn by_email(&self, email: &str) -> Result<Student, ApiError> {
        let path = format!("{}/email/{}", Self::base(), encode_segment(email));
        data(self.client.get(&path).await?)
    }

    pub async fn by_enrollment_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        pageable: &Pageable,
    ) -> Result<Page<Student>, ApiError> {
        let query = QueryString::new()
            .opt("startDate", start)
            .opt("endDate", end)
            .pageable(pageable);
        let path = format!("{}/enrollment-date-range{}", Self::base(), query.render());
        data(self.client.get(&path).await?)
    }
}
