use anyhow::{Context as _, Result};

use student_service_core::api::Pageable;
use student_service_core::seed::{SeedPlan, SeedStatus, Seeder};
use student_service_core::{Method, RequestOptions};

use super::Context;
use crate::output;

const RECENT_ENROLLMENTS: u32 = 10;

pub async fn dashboard(ctx: &Context) -> Result<()> {
    ctx.auth.require_authenticated()?;
    ctx.auth.bootstrap().await;
    ctx.auth.require_admin()?;

    let admin = ctx.client().admin();
    let recent_page = Pageable::first(RECENT_ENROLLMENTS);
    let (stats, recent) = futures::try_join!(
        admin.dashboard(),
        admin.recent_enrollments(None, &recent_page),
    )?;

    let show = |label: &str, value: Option<i64>| {
        let value = value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        println!("{:<20} {:>8}", label, value);
    };
    show("Users", stats.total_users);
    show("Students", stats.total_students);
    show("Lecturers", stats.total_lecturers);
    show("Courses", stats.total_courses);
    show("Enrollments", stats.total_enrollments());
    if let Some(ref e) = stats.enrollment_stats {
        show("  Active", e.active_enrollments);
        show("  Completed", e.completed_enrollments);
        show("  Dropped", e.dropped_enrollments);
    }

    println!("\nRecent enrollments");
    output::enrollments(&recent.content);
    Ok(())
}

pub async fn seed(ctx: &Context, plan: SeedPlan) -> Result<()> {
    ctx.auth.require_authenticated()?;
    ctx.auth.bootstrap().await;
    ctx.auth.require_admin()?;

    let mut seeder = Seeder::new(ctx.client(), plan);
    println!("Seeding with stamp {}", seeder.stamp());
    let result = seeder.run_all().await;

    for entry in seeder.log() {
        let marker = match entry.status {
            SeedStatus::Working => continue,
            SeedStatus::Ok => "ok",
            SeedStatus::Error => "error",
        };
        println!(
            "{} [{:<9}] {:<5} {}",
            entry.at.format("%H:%M:%S"),
            entry.scope,
            marker,
            entry.message
        );
    }

    result.context("Seeding failed")
}

/// Send a request through the authenticated client and print the body.
pub async fn raw(ctx: &Context, method: Method, path: &str, data: Option<&str>) -> Result<()> {
    let mut options = RequestOptions::new(method);
    if let Some(data) = data {
        let body = serde_json::from_str(data).context("--data is not valid JSON")?;
        options = options.with_body(body);
    }

    let body = ctx.client().request(path, options).await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
