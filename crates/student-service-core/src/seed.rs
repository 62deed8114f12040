//! Demo data seeding.
//!
//! Creates batches of lecturers, courses and students through the regular
//! resource endpoints. Every generated email and course code carries a
//! timestamp stamp so repeated runs do not collide.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError, Pageable};
use crate::models::{CourseRequest, CreateLecturerRequest, CreateStudentRequest};

const STUDENT_FIRST_NAMES: &[&str] = &[
    "Ava", "Noah", "Mila", "Leo", "Iris", "Nina", "Ethan", "Zoe", "Aria", "Owen",
];
const STUDENT_LAST_NAMES: &[&str] = &[
    "Vale", "Stone", "Wright", "Klein", "Nova", "Sato", "Reed", "Park", "Blake", "Mori",
];
const LECTURER_FIRST_NAMES: &[&str] = &[
    "Sage", "Rene", "Quinn", "Theo", "Nora", "Lina", "Hugo", "Ada", "Jules", "Remy",
];
const LECTURER_LAST_NAMES: &[&str] = &[
    "Aster", "Cobalt", "Frost", "Lumen", "Vega", "Cruz", "Hart", "Lin", "Rowe", "Khan",
];
const SPECIALIZATIONS: &[&str] = &[
    "Algorithms", "Databases", "AI", "Security", "UI/UX", "Cloud", "Networks", "Compilers",
];
const COURSE_TOPICS: &[&str] = &[
    "Systems", "Design", "Data", "Math", "Web", "Security", "Vision", "Language", "Cloud",
    "Robotics",
];
const COURSE_FORMATS: &[&str] = &["Studio", "Lab", "Seminar", "Workshop", "Field", "Clinic"];

/// Lecturers considered when attaching courses
const LECTURER_POOL_SIZE: u32 = 50;

/// How much demo data to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub prefix: String,
    pub students: u32,
    pub lecturers: u32,
    pub courses: u32,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            prefix: "demo".to_string(),
            students: 10,
            lecturers: 5,
            courses: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedStatus {
    Working,
    Ok,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedLogEntry {
    pub at: DateTime<Utc>,
    pub scope: &'static str,
    pub status: SeedStatus,
    pub message: String,
}

/// `YYYYMMDD-HHMMSS`
pub fn stamp(now: NaiveDateTime) -> String {
    now.format("%Y%m%d-%H%M%S").to_string()
}

pub fn seed_email(prefix: &str, kind: &str, stamp: &str, i: u32) -> String {
    format!("{}.{}.{}.{}@example.com", prefix, kind, stamp, i)
}

pub fn seed_password(i: u32) -> String {
    format!("Passw0rd!{}", i)
}

/// `{PREFIX}-{i:03}-{YYYYMMDD}`, with the prefix upper-cased and cut to four
/// characters.
pub fn course_code(prefix: &str, stamp: &str, i: u32) -> String {
    let short: String = prefix.to_uppercase().chars().take(4).collect();
    let day: String = stamp.chars().take(8).collect();
    format!("{}-{:03}-{}", short, i, day)
}

pub fn course_credits(i: u32) -> i32 {
    3 + (i % 3) as i32
}

pub fn course_capacity(i: u32) -> i32 {
    20 + (i % 5) as i32 * 5
}

pub struct Seeder<'a> {
    client: &'a ApiClient,
    plan: SeedPlan,
    stamp: String,
    today: NaiveDate,
    rng: StdRng,
    log: Vec<SeedLogEntry>,
}

impl<'a> Seeder<'a> {
    pub fn new(client: &'a ApiClient, plan: SeedPlan) -> Self {
        let now = Local::now().naive_local();
        Self {
            client,
            plan,
            stamp: stamp(now),
            today: now.date(),
            rng: StdRng::from_entropy(),
            log: Vec::new(),
        }
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    pub fn log(&self) -> &[SeedLogEntry] {
        &self.log
    }

    pub fn into_log(self) -> Vec<SeedLogEntry> {
        self.log
    }

    /// Seed lecturers, then courses, then students.
    ///
    /// The first failure stops the run and is recorded as an `error` entry.
    pub async fn run_all(&mut self) -> Result<(), ApiError> {
        info!(prefix = %self.plan.prefix, stamp = %self.stamp, "Seeding demo data");
        let result = async {
            self.seed_lecturers().await?;
            self.seed_courses().await?;
            self.seed_students().await
        }
        .await;

        if let Err(ref e) = result {
            warn!(error = %e, "Seeding stopped");
            self.push("error", SeedStatus::Error, e.to_string());
        }
        result
    }

    pub async fn seed_lecturers(&mut self) -> Result<(), ApiError> {
        for i in 1..=self.plan.lecturers {
            let email = seed_email(&self.plan.prefix, "lecturer", &self.stamp, i);
            let request = CreateLecturerRequest {
                first_name: self.pick(LECTURER_FIRST_NAMES),
                last_name: self.pick(LECTURER_LAST_NAMES),
                email: email.clone(),
                password: seed_password(i),
                specialization: Some(self.pick(SPECIALIZATIONS)),
                phone_number: None,
                hire_date: Some(self.today),
            };

            self.push("lecturers", SeedStatus::Working, format!("Creating {}", email));
            self.client.lecturers().create(&request).await?;
            self.push("lecturers", SeedStatus::Ok, format!("Created {}", email));
        }
        Ok(())
    }

    pub async fn seed_courses(&mut self) -> Result<(), ApiError> {
        let lecturer_ids: Vec<i64> = match self
            .client
            .lecturers()
            .list(&Pageable::first(LECTURER_POOL_SIZE))
            .await
        {
            Ok(page) => page.content.iter().filter_map(|l| l.lecturer_id).collect(),
            Err(e) => {
                warn!(error = %e, "Could not list lecturers, courses will be unassigned");
                Vec::new()
            }
        };

        for i in 1..=self.plan.courses {
            let code = course_code(&self.plan.prefix, &self.stamp, i);
            let title = format!(
                "{} {} {}",
                self.pick(COURSE_TOPICS),
                self.pick(COURSE_FORMATS),
                i
            );
            let request = CourseRequest {
                course_code: code.clone(),
                title,
                description: Some("Seeded demo course".to_string()),
                credits: Some(course_credits(i)),
                lecturer_id: lecturer_ids.choose(&mut self.rng).copied(),
                start_date: Some(self.today),
                end_date: None,
                capacity: Some(course_capacity(i)),
                course_metadata: None,
            };

            self.push("courses", SeedStatus::Working, format!("Creating {}", code));
            self.client.courses().create(&request).await?;
            self.push("courses", SeedStatus::Ok, format!("Created {}", code));
        }
        Ok(())
    }

    pub async fn seed_students(&mut self) -> Result<(), ApiError> {
        for i in 1..=self.plan.students {
            let email = seed_email(&self.plan.prefix, "student", &self.stamp, i);
            let request = CreateStudentRequest {
                first_name: self.pick(STUDENT_FIRST_NAMES),
                last_name: self.pick(STUDENT_LAST_NAMES),
                email: email.clone(),
                password: seed_password(i),
                date_of_birth: None,
                phone_number: None,
                address: None,
                enrollment_date: Some(self.today),
            };

            self.push("students", SeedStatus::Working, format!("Creating {}", email));
            self.client.students().create(&request).await?;
            self.push("students", SeedStatus::Ok, format!("Created {}", email));
        }
        Ok(())
    }

    fn pick(&mut self, items: &[&str]) -> String {
        items.choose(&mut self.rng).copied().unwrap_or_default().to_string()
    }

    fn push(&mut self, scope: &'static str, status: SeedStatus, message: String) {
        self.log.push(SeedLogEntry {
            at: Utc::now(),
            scope,
            status,
            message,
        });
    }
}
