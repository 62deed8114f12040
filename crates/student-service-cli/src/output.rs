//! Plain-text table output.

use student_service_core::models::{Course, Enrollment, Lecturer, Page, Student, User};
use student_service_core::utils::{format_date, format_optional, truncate_string};

const DASH: &str = "-";

fn cell(value: Option<&str>, width: usize) -> String {
    truncate_string(&format_optional(value, DASH), width)
}

fn id(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| DASH.to_string())
}

fn date(value: Option<&str>) -> String {
    value.map(format_date).unwrap_or_else(|| DASH.to_string())
}

/// Footer for a paged listing, e.g. `Page 1 of 3 (45 total)`.
pub fn page_footer<T>(page: &Page<T>) {
    let number = page.number.unwrap_or(0) + 1;
    match page.total_pages {
        Some(pages) if pages > 0 => {
            println!("\nPage {} of {} ({} total)", number, pages, page.total())
        }
        _ => println!("\n{} shown", page.content.len()),
    }
}

pub fn students<'a>(rows: impl IntoIterator<Item = &'a Student>) {
    println!("{:<6} {:<28} {:<34} {:<12}", "ID", "NAME", "EMAIL", "ENROLLED");
    for s in rows {
        println!(
            "{:<6} {:<28} {:<34} {:<12}",
            id(s.student_id),
            truncate_string(&s.full_name(), 28),
            cell(s.email(), 34),
            date(s.enrollment_date.as_deref()),
        );
    }
}

pub fn lecturers<'a>(rows: impl IntoIterator<Item = &'a Lecturer>) {
    println!("{:<6} {:<28} {:<34} {:<20}", "ID", "NAME", "EMAIL", "SPECIALIZATION");
    for l in rows {
        println!(
            "{:<6} {:<28} {:<34} {:<20}",
            id(l.lecturer_id),
            truncate_string(&l.full_name(), 28),
            cell(l.email(), 34),
            cell(l.specialization.as_deref(), 20),
        );
    }
}

pub fn courses<'a>(rows: impl IntoIterator<Item = &'a Course>) {
    println!(
        "{:<6} {:<18} {:<32} {:>7} {:>8} {:<12}",
        "ID", "CODE", "TITLE", "CREDITS", "CAPACITY", "STARTS"
    );
    for c in rows {
        println!(
            "{:<6} {:<18} {:<32} {:>7} {:>8} {:<12}",
            id(c.course_id),
            cell(c.course_code.as_deref(), 18),
            cell(c.title.as_deref(), 32),
            c.credits.map(|v| v.to_string()).unwrap_or_else(|| DASH.to_string()),
            c.capacity.map(|v| v.to_string()).unwrap_or_else(|| DASH.to_string()),
            date(c.start_date.as_deref()),
        );
    }
}

pub fn enrollments<'a>(rows: impl IntoIterator<Item = &'a Enrollment>) {
    println!(
        "{:<6} {:<26} {:<28} {:<10} {:>5}",
        "ID", "STUDENT", "COURSE", "STATUS", "GRADE"
    );
    for e in rows {
        let student = match e.student {
            Some(ref s) => s.display_label(),
            None => format!("Student ID: {}", id(e.student_ref())),
        };
        let course = e
            .course
            .as_ref()
            .map(Course::display_label)
            .unwrap_or_else(|| format!("Course ID: {}", id(e.course_id)));
        println!(
            "{:<6} {:<26} {:<28} {:<10} {:>5}",
            id(e.enrollment_id),
            truncate_string(&student, 26),
            truncate_string(&course, 28),
            e.status.as_ref().map(|s| s.as_str()).unwrap_or(DASH),
            e.grade.map(|g| format!("{:.1}", g)).unwrap_or_else(|| DASH.to_string()),
        );
    }
}

pub fn users<'a>(rows: impl IntoIterator<Item = &'a User>) {
    println!("{:<6} {:<28} {:<34} {:<10}", "ID", "NAME", "EMAIL", "ROLE");
    for u in rows {
        println!(
            "{:<6} {:<28} {:<34} {:<10}",
            id(u.user_id),
            truncate_string(&u.full_name(), 28),
            cell(u.email.as_deref(), 34),
            u.role.as_ref().map(|r| r.as_str()).unwrap_or(DASH),
        );
    }
}
