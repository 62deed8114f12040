//! Data models for Student Service entities.
//!
//! This module contains the typed request payloads and response schemas
//! used by the resource wrappers:
//!
//! - `ApiResponse`, `Page`: the backend's envelope and Spring-style paging
//! - `User`, `Role`: accounts and their roles
//! - `Student`, `Lecturer`, `Course`, `Enrollment`: the managed records
//! - `DashboardStats`: admin dashboard aggregates
//! - Auth payloads for login, registration and token refresh

pub mod admin;
pub mod auth;
pub mod common;
pub mod course;
pub mod enrollment;
pub mod lecturer;
pub mod student;
pub mod user;

pub use admin::{DashboardStats, EnrollmentStats};
pub use auth::{AuthPayload, ChangePasswordRequest, LoginRequest, RegisterRequest};
pub use common::{ApiResponse, Page};
pub use course::{Course, CourseRequest};
pub use enrollment::{
    Enrollment, EnrollmentStatus, NewEnrollment, UpdateEnrollmentRequest,
};
pub use lecturer::{CreateLecturerRequest, Lecturer};
pub use student::{CreateStudentRequest, Student, UpdateStudentRequest};
pub use user::{CreateUserRequest, Role, UpdateUserRequest, User};
