use chrono::NaiveDate;

use super::{data, API_PREFIX};
use crate::api::query::{encode_segment, Pageable, QueryString};
use crate::api::{ApiClient, ApiError};
use crate::models::{Course, CourseRequest, Page};

/// `/api/v1/courses`
pub struct CoursesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CoursesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn base() -> String {
        format!("{}/courses", API_PREFIX)
    }

    async fn page(&self, path: String) -> Result<Page<Course>, ApiError> {
        data(self.client.get(&path).await?)
    }

    pub async fn list(&self, pageable: &Pageable) -> Result<Page<Course>, ApiError> {
        self.page(format!("{}{}", Self::base(), pageable.query())).await
    }

    pub async fn get(&self, id: i64) -> Result<Course, ApiError> {
        data(self.client.get(&format!("{}/{}", Self::base(), id)).await?)
    }

    pub async fn create(&self, request: &CourseRequest) -> Result<Course, ApiError> {
        data(self.client.post(&Self::base(), request).await?)
    }

    pub async fn update(&self, id: i64, request: &CourseRequest) -> Result<Course, ApiError> {
        data(self.client.put(&format!("{}/{}", Self::base(), id), request).await?)
    }

    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.client.del(&format!("{}/{}", Self::base(), id)).await?;
        Ok(())
    }

    pub async fn upcoming(&self, pageable: &Pageable) -> Result<Page<Course>, ApiError> {
        self.page(format!("{}/upcoming{}", Self::base(), pageable.query()))
            .await
    }

    pub async fn search_by_title(&self, title: &str, pageable: &Pageable) -> Result<Page<Course>, ApiError> {
        let query = QueryString::new().param("title", title).pageable(pageable);
        self.page(format!("{}/search{}", Self::base(), query.render()))
            .await
    }

    pub async fn by_lecturer(&self, lecturer_id: i64, pageable: &Pageable) -> Result<Page<Course>, ApiError> {
        self.page(format!(
            "{}/lecturer/{}{}",
            Self::base(),
            lecturer_id,
            pageable.query()
        ))
        .await
    }

    pub async fn by_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        pageable: &Pageable,
    ) -> Result<Page<Course>, ApiError> {
        let query = QueryString::new()
            .opt("startDate", start)
            .opt("endDate", end)
            .pageable(pageable);
        self.page(format!("{}/date-range{}", Self::base(), query.render()))
            .await
    }

    pub async fn by_credits(&self, credits: i32, pageable: &Pageable) -> Result<Page<Course>, ApiError> {
        self.page(format!(
            "{}/credits/{}{}",
            Self::base(),
            credits,
            pageable.query()
        ))
        .await
    }

    pub async fn by_credits_range(
        &self,
        min_credits: Option<i32>,
        max_credits: Option<i32>,
        pageable: &Pageable,
    ) -> Result<Page<Course>, ApiError> {
        let query = QueryString::new()
            .opt("minCredits", min_credits)
            .opt("maxCredits", max_credits)
            .pageable(pageable);
        self.page(format!("{}/credits-range{}", Self::base(), query.render()))
            .await
    }

    pub async fn by_code(&self, course_code: &str) -> Result<Course, ApiError> {
        let path = format!("{}/code/{}", Self::base(), encode_segment(course_code));
        data(self.client.get(&path).await?)
    }

    /// Courses with at least `capacity` seats.
    pub async fn by_min_capacity(&self, capacity: i32, pageable: &Pageable) -> Result<Page<Course>, ApiError> {
        self.page(format!(
            "{}/capacity/{}{}",
            Self::base(),
            capacity,
            pageable.query()
        ))
        .await
    }
}
