//! Client-side filtering over lists that have already been fetched.
//!
//! The backend only offers exact lookups for most records, so the console
//! pulls a large page and narrows it locally. All matching is
//! case-insensitive and a blank query matches everything.

use std::collections::HashMap;

use crate::models::{Enrollment, Lecturer, Student};
use crate::utils::compact;

/// Lower-cased name and email of a student, as used for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct StudentKey {
    first: String,
    last: String,
    email: String,
}

impl StudentKey {
    fn from_student(student: &Student) -> Self {
        Self {
            first: student.first_name().unwrap_or("").to_lowercase(),
            last: student.last_name().unwrap_or("").to_lowercase(),
            email: student.email().unwrap_or("").to_lowercase(),
        }
    }

    fn name(&self) -> String {
        format!("{} {}", self.first, self.last).trim().to_string()
    }
}

/// Student names keyed by `studentId`, for enrollments that arrive
/// without an embedded student.
#[derive(Debug, Clone, Default)]
pub struct StudentDirectory {
    by_id: HashMap<i64, StudentKey>,
}

impl StudentDirectory {
    pub fn new(students: &[Student]) -> Self {
        let by_id = students
            .iter()
            .filter_map(|s| Some((s.student_id?, StudentKey::from_student(s))))
            .collect();
        Self { by_id }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn get(&self, id: Option<i64>) -> Option<&StudentKey> {
        id.and_then(|id| self.by_id.get(&id))
    }
}

/// A normalized search query.
#[derive(Debug, Clone)]
pub struct Query {
    lower: String,
    tokens: Vec<String>,
    compact: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        let tokens: Vec<String> = lower.split_whitespace().map(str::to_string).collect();
        let compact = tokens.concat();
        Self {
            lower,
            tokens,
            compact,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.lower.is_empty()
    }

    fn hit(&self, field: &str) -> bool {
        field.contains(&self.lower)
    }

    fn hit_nonempty(&self, field: &str) -> bool {
        !field.is_empty() && self.hit(field)
    }

    fn hit_compact(&self, field: &str) -> bool {
        !field.is_empty() && field.contains(&self.compact)
    }

    pub fn matches_student(&self, student: &Student) -> bool {
        if self.is_blank() {
            return true;
        }
        self.hit(&student.full_name().to_lowercase())
            || self.hit(&student.email().unwrap_or("").to_lowercase())
    }

    pub fn matches_lecturer(&self, lecturer: &Lecturer) -> bool {
        if self.is_blank() {
            return true;
        }
        self.hit(&lecturer.full_name().to_lowercase())
            || self.hit(&lecturer.email().unwrap_or("").to_lowercase())
            || self.hit(&lecturer.specialization.as_deref().unwrap_or("").to_lowercase())
    }

    pub fn matches_enrollment(&self, enrollment: &Enrollment, directory: &StudentDirectory) -> bool {
        if self.is_blank() {
            return true;
        }

        let embedded = enrollment
            .student
            .as_ref()
            .map(StudentKey::from_student)
            .unwrap_or_default();
        let known = directory.get(enrollment.student_ref());

        // Embedded fields win; the directory fills whatever is blank
        let pick = |own: &str, other: Option<&String>| -> String {
            if own.is_empty() {
                other.cloned().unwrap_or_default()
            } else {
                own.to_string()
            }
        };
        let first = pick(&embedded.first, known.map(|k| &k.first));
        let last = pick(&embedded.last, known.map(|k| &k.last));
        let email = pick(&embedded.email, known.map(|k| &k.email));

        let mut name = format!("{} {}", first, last).trim().to_string();
        if name.is_empty() {
            name = known.map(StudentKey::name).unwrap_or_default();
        }
        let name_compact = compact(&name);
        let all_tokens =
            self.tokens.len() > 1 && self.tokens.iter().all(|t| name_compact.contains(t.as_str()));

        let course = enrollment.course.as_ref();
        let code = course
            .and_then(|c| c.course_code.as_deref())
            .unwrap_or("")
            .to_lowercase();
        let title = course
            .and_then(|c| c.title.as_deref())
            .unwrap_or("")
            .to_lowercase();
        let status = enrollment
            .status
            .as_ref()
            .map(|s| s.as_str().to_lowercase())
            .unwrap_or_default();

        self.hit(&name)
            || self.hit_compact(&name_compact)
            || all_tokens
            || self.hit_nonempty(&first)
            || self.hit_compact(&compact(&first))
            || self.hit_nonempty(&last)
            || self.hit_compact(&compact(&last))
            || self.hit(&email)
            || self.hit(&code)
            || self.hit(&title)
            || self.hit(&status)
    }
}

pub fn filter_students<'a>(students: &'a [Student], query: &str) -> Vec<&'a Student> {
    let query = Query::new(query);
    students.iter().filter(|s| query.matches_student(s)).collect()
}

pub fn filter_lecturers<'a>(lecturers: &'a [Lecturer], query: &str) -> Vec<&'a Lecturer> {
    let query = Query::new(query);
    lecturers.iter().filter(|l| query.matches_lecturer(l)).collect()
}

pub fn filter_enrollments<'a>(
    enrollments: &'a [Enrollment],
    directory: &StudentDirectory,
    query: &str,
) -> Vec<&'a Enrollment> {
    let query = Query::new(query);
    enrollments
        .iter()
        .filter(|e| query.matches_enrollment(e, directory))
        .collect()
}
