use anyhow::{bail, Result};

use student_service_core::api::Pageable;
use student_service_core::models::NewEnrollment;
use student_service_core::search::{self, StudentDirectory};

use super::Context;
use crate::output;

/// Enrollments pulled when searching
const ENROLLMENT_POOL_SIZE: u32 = 500;

/// Students pulled to resolve names for enrollments without an embedded student
const STUDENT_POOL_SIZE: u32 = 1000;

const LIST_PAGE_SIZE: u32 = 20;

pub async fn list(ctx: &Context, query: Option<&str>, page: u32) -> Result<()> {
    ctx.auth.require_authenticated()?;
    let client = ctx.client();

    let Some(q) = query.filter(|q| !q.trim().is_empty()) else {
        let result = client
            .enrollments()
            .list(&Pageable::new(page, LIST_PAGE_SIZE))
            .await?;
        output::enrollments(&result.content);
        output::page_footer(&result);
        return Ok(());
    };

    let enrollments = client.enrollments();
    let students = client.students();
    let pool_page = Pageable::first(ENROLLMENT_POOL_SIZE);
    let roster_page = Pageable::first(STUDENT_POOL_SIZE);
    let (pool, roster) = futures::try_join!(
        enrollments.list(&pool_page),
        students.list(&roster_page),
    )?;

    let directory = StudentDirectory::new(&roster.content);
    let hits = search::filter_enrollments(&pool.content, &directory, q);
    output::enrollments(hits.iter().copied());
    println!("\n{} of {} match", hits.len(), pool.content.len());
    Ok(())
}

pub async fn enroll(ctx: &Context, students: &[i64], courses: &[i64]) -> Result<()> {
    ctx.auth.require_admin_or_lecturer()?;
    if students.len() != courses.len() {
        bail!(
            "Each --student needs a matching --course ({} students, {} courses)",
            students.len(),
            courses.len()
        );
    }

    let rows: Vec<NewEnrollment> = students
        .iter()
        .zip(courses)
        .map(|(&s, &c)| NewEnrollment::new(s, c))
        .collect();

    let outcome = ctx.client().enrollments().create_batch(&rows).await?;
    for failure in &outcome.failures {
        eprintln!(
            "  student {} -> course {}: {}",
            failure.student_id, failure.course_id, failure.error
        );
    }
    println!("{}", outcome.summary());

    if outcome.created.is_empty() {
        bail!("No enrollments were created");
    }
    Ok(())
}

pub async fn drop_enrollment(ctx: &Context, id: i64) -> Result<()> {
    ctx.auth.require_authenticated()?;
    ctx.client().enrollments().drop_enrollment(id).await?;
    println!("Enrollment {} dropped", id);
    Ok(())
}
