use std::collections::HashSet;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::{data, API_PREFIX};
use crate::api::query::{encode_segment, Pageable};
use crate::api::{ApiClient, ApiError, Method, RequestOptions};
use crate::models::{Enrollment, EnrollmentStatus, NewEnrollment, Page, UpdateEnrollmentRequest};

/// `/api/v1/enrollments`
pub struct EnrollmentsApi<'a> {
    client: &'a ApiClient,
}

/// Rejections raised before any batch request is sent.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BatchError {
    #[error("Please add at least one enrollment with both student and course selected")]
    Empty,

    #[error("Duplicate enrollment for student {student_id} in course {course_id}")]
    Duplicate { student_id: i64, course_id: i64 },
}

/// Result of a batch run: what was created and which rows failed.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub created: Vec<Enrollment>,
    pub failures: Vec<BatchFailure>,
}

#[derive(Debug)]
pub struct BatchFailure {
    pub student_id: i64,
    pub course_id: i64,
    pub error: ApiError,
}

impl BatchOutcome {
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary in the style of the console's notifications.
    pub fn summary(&self) -> String {
        let created = self.created.len();
        match (created, self.failures.first()) {
            (1, None) => "Enrollment created successfully".to_string(),
            (n, None) => format!("{} enrollments created successfully", n),
            (0, Some(first)) => first.error.to_string(),
            (n, Some(first)) => format!(
                "{} enrollments created, {} failed: {}",
                n,
                self.failures.len(),
                first.error
            ),
        }
    }
}

impl<'a> EnrollmentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn base() -> String {
        format!("{}/enrollments", API_PREFIX)
    }

    async fn page(&self, path: String) -> Result<Page<Enrollment>, ApiError> {
        data(self.client.get(&path).await?)
    }

    pub async fn list(&self, pageable: &Pageable) -> Result<Page<Enrollment>, ApiError> {
        self.page(format!("{}{}", Self::base(), pageable.query())).await
    }

    pub async fn get(&self, id: i64) -> Result<Enrollment, ApiError> {
        data(self.client.get(&format!("{}/{}", Self::base(), id)).await?)
    }

    pub async fn create(&self, student_id: i64, course_id: i64) -> Result<Enrollment, ApiError> {
        let body = json!({ "studentId": student_id, "courseId": course_id });
        data(self.client.post(&Self::base(), &body).await?)
    }

    pub async fn update(&self, id: i64, request: &UpdateEnrollmentRequest) -> Result<Enrollment, ApiError> {
        data(self.client.put(&format!("{}/{}", Self::base(), id), request).await?)
    }

    /// Mark an enrollment as dropped. The endpoint takes no body.
    pub async fn drop_enrollment(&self, id: i64) -> Result<Value, ApiError> {
        self.client
            .request(
                &format!("{}/{}/drop", Self::base(), id),
                RequestOptions::new(Method::Put),
            )
            .await
    }

    pub async fn by_student(&self, student_id: i64, pageable: &Pageable) -> Result<Page<Enrollment>, ApiError> {
        self.page(format!(
            "{}/student/{}{}",
            Self::base(),
            student_id,
            pageable.query()
        ))
        .await
    }

    pub async fn by_status(&self, status: &EnrollmentStatus, pageable: &Pageable) -> Result<Page<Enrollment>, ApiError> {
        self.page(format!(
            "{}/status/{}{}",
            Self::base(),
            encode_segment(status.as_str()),
            pageable.query()
        ))
        .await
    }

    pub async fn stats(&self) -> Result<Value, ApiError> {
        self.client.get(&format!("{}/stats", Self::base())).await
    }

    pub async fn by_lecturer(&self, lecturer_id: i64, pageable: &Pageable) -> Result<Page<Enrollment>, ApiError> {
        self.page(format!(
            "{}/lecturer/{}{}",
            Self::base(),
            lecturer_id,
            pageable.query()
        ))
        .await
    }

    pub async fn by_course(&self, course_id: i64, pageable: &Pageable) -> Result<Page<Enrollment>, ApiError> {
        self.page(format!(
            "{}/course/{}{}",
            Self::base(),
            course_id,
            pageable.query()
        ))
        .await
    }

    /// Create several enrollments one after another.
    ///
    /// Incomplete rows are ignored. Validation failures reject the whole
    /// batch before anything is sent; request failures are collected per row
    /// and do not stop the remaining rows.
    pub async fn create_batch(&self, rows: &[NewEnrollment]) -> Result<BatchOutcome, BatchError> {
        let pairs = validate_batch(rows)?;
        let mut outcome = BatchOutcome::default();

        for (student_id, course_id) in pairs {
            match self.create(student_id, course_id).await {
                Ok(enrollment) => {
                    debug!(student_id, course_id, "Enrollment created");
                    outcome.created.push(enrollment);
                }
                Err(error) => {
                    warn!(student_id, course_id, error = %error, "Enrollment failed");
                    outcome.failures.push(BatchFailure {
                        student_id,
                        course_id,
                        error,
                    });
                }
            }
        }

        Ok(outcome)
    }
}

/// Complete rows in order, rejecting empty batches and repeated pairs.
pub fn validate_batch(rows: &[NewEnrollment]) -> Result<Vec<(i64, i64)>, BatchError> {
    let pairs: Vec<(i64, i64)> = rows.iter().filter_map(NewEnrollment::pair).collect();
    if pairs.is_empty() {
        return Err(BatchError::Empty);
    }

    let mut seen = HashSet::new();
    for &(student_id, course_id) in &pairs {
        if !seen.insert((student_id, course_id)) {
            return Err(BatchError::Duplicate {
                student_id,
                course_id,
            });
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_batch_skips_incomplete_rows() {
        let rows = [
            NewEnrollment::new(1, 10),
            NewEnrollment {
                student_id: Some(2),
                course_id: None,
            },
            NewEnrollment::new(3, 10),
        ];
        assert_eq!(validate_batch(&rows).unwrap(), vec![(1, 10), (3, 10)]);
    }

    #[test]
    fn test_validate_batch_rejects_empty() {
        assert_eq!(validate_batch(&[]), Err(BatchError::Empty));
        assert_eq!(
            validate_batch(&[NewEnrollment::default()]),
            Err(BatchError::Empty)
        );
    }

    #[test]
    fn test_validate_batch_rejects_duplicates() {
        let rows = [
            NewEnrollment::new(1, 10),
            NewEnrollment::new(2, 10),
            NewEnrollment::new(1, 10),
        ];
        assert_eq!(
            validate_batch(&rows),
            Err(BatchError::Duplicate {
                student_id: 1,
                course_id: 10
            })
        );
    }

    #[test]
    fn test_outcome_summary() {
        let mut outcome = BatchOutcome::default();
        outcome.created.push(Enrollment::default());
        assert_eq!(outcome.summary(), "Enrollment created successfully");

        outcome.created.push(Enrollment::default());
        outcome.failures.push(BatchFailure {
            student_id: 4,
            course_id: 9,
            error: ApiError::from_status(
                reqwest::StatusCode::CONFLICT,
                json!({"message": "Course is full"}),
            ),
        });
        assert_eq!(
            outcome.summary(),
            "2 enrollments created, 1 failed: Course is full"
        );
        assert!(!outcome.is_complete_success());
    }
}
