use anyhow::{bail, Result};

use student_service_core::api::Pageable;
use student_service_core::models::Role;
use student_service_core::search;

use super::Context;
use crate::output;

/// Page size used when pulling a list to filter locally
const SEARCH_POOL_SIZE: u32 = 1000;

/// Page size used for plain listings
const LIST_PAGE_SIZE: u32 = 20;

pub async fn students(ctx: &Context, query: Option<&str>, page: u32) -> Result<()> {
    ctx.auth.require_authenticated()?;
    let api = ctx.client().students();

    match query {
        Some(q) => {
            let pool = api.list(&Pageable::first(SEARCH_POOL_SIZE)).await?;
            let hits = search::filter_students(&pool.content, q);
            output::students(hits.iter().copied());
            println!("\n{} of {} match", hits.len(), pool.content.len());
        }
        None => {
            let result = api.list(&Pageable::new(page, LIST_PAGE_SIZE)).await?;
            output::students(&result.content);
            output::page_footer(&result);
        }
    }
    Ok(())
}

pub async fn lecturers(ctx: &Context, query: Option<&str>, page: u32) -> Result<()> {
    ctx.auth.require_authenticated()?;
    let api = ctx.client().lecturers();

    match query {
        Some(q) => {
            let pool = api.list(&Pageable::first(SEARCH_POOL_SIZE)).await?;
            let hits = search::filter_lecturers(&pool.content, q);
            output::lecturers(hits.iter().copied());
            println!("\n{} of {} match", hits.len(), pool.content.len());
        }
        None => {
            let result = api.list(&Pageable::new(page, LIST_PAGE_SIZE)).await?;
            output::lecturers(&result.content);
            output::page_footer(&result);
        }
    }
    Ok(())
}

pub async fn courses(ctx: &Context, title: Option<&str>, page: u32) -> Result<()> {
    ctx.auth.require_authenticated()?;
    let api = ctx.client().courses();
    let pageable = Pageable::new(page, LIST_PAGE_SIZE);

    let result = match title.filter(|t| !t.trim().is_empty()) {
        Some(t) => api.search_by_title(t.trim(), &pageable).await?,
        None => api.list(&pageable).await?,
    };
    output::courses(&result.content);
    output::page_footer(&result);
    Ok(())
}

pub async fn users(ctx: &Context, page: u32) -> Result<()> {
    ctx.auth.require_admin()?;
    let result = ctx
        .client()
        .users()
        .list(&Pageable::new(page, LIST_PAGE_SIZE))
        .await?;
    output::users(&result.content);
    output::page_footer(&result);
    Ok(())
}

/// A student's own enrollments, or the courses a lecturer teaches.
pub async fn mine(ctx: &Context) -> Result<()> {
    ctx.auth.require_authenticated()?;
    let user = ctx
        .auth
        .bootstrap()
        .await
        .and_then(|s| s.user)
        .ok_or_else(|| anyhow::anyhow!("User profile is not available"))?;
    let Some(email) = user.email.as_deref() else {
        bail!("Signed-in user has no email on record");
    };
    let client = ctx.client();

    match user.role {
        Some(Role::Student) => {
            let student = client.students().by_email(email).await?;
            let Some(student_id) = student.student_id else {
                bail!("No student record found for {}", email);
            };
            let result = client
                .enrollments()
                .by_student(student_id, &Pageable::first(LIST_PAGE_SIZE * 5))
                .await?;
            output::enrollments(&result.content);
            output::page_footer(&result);
        }
        Some(Role::Lecturer) => {
            let lecturer = client.lecturers().find_by_email(email).await?;
            let Some(lecturer_id) = lecturer.and_then(|l| l.lecturer_id) else {
                bail!("No lecturer record found for {}", email);
            };
            let result = client
                .lecturers()
                .courses(lecturer_id, &Pageable::first(LIST_PAGE_SIZE * 5))
                .await?;
            output::courses(&result.content);
            output::page_footer(&result);
        }
        _ => bail!("Only students and lecturers have personal records"),
    }
    Ok(())
}
