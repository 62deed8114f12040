//! Student Service console - a terminal client for the Student Service API.
//!
//! Signs in against the backend, keeps the session between runs and offers
//! the same views as the web console: records, enrollments, the admin
//! dashboard and demo data seeding.

mod commands;
mod output;

use std::io;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use student_service_core::Method;

use commands::Context;

#[derive(Parser)]
#[command(
    name = "student-service",
    about = "Terminal client for the Student Service API",
    version
)]
struct Cli {
    /// API base URL (overrides STUDENT_SERVICE_API_BASE_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and keep the session for later commands
    Login {
        /// Account email (defaults to the last one used)
        #[arg(long)]
        email: Option<String>,
    },

    /// Create a student account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date_of_birth: Option<NaiveDate>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Admin dashboard totals and recent enrollments
    Dashboard,

    /// List students, optionally filtered by name or email
    Students {
        #[arg(long, short = 's')]
        search: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// List lecturers, optionally filtered by name, email or specialization
    Lecturers {
        #[arg(long, short = 's')]
        search: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// List courses, optionally searched by title
    Courses {
        #[arg(long, short = 't')]
        title: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// List enrollments, optionally filtered by student, course or status
    Enrollments {
        #[arg(long, short = 's')]
        search: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// List user accounts
    Users {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// Your own enrollments (students) or courses (lecturers)
    Mine,

    /// Enroll students in courses; pairs are matched by position
    ///
    /// Example: student-service enroll --student 4 --course 9 --student 5 --course 9
    Enroll {
        #[arg(long = "student", value_name = "STUDENT_ID", required = true)]
        students: Vec<i64>,
        #[arg(long = "course", value_name = "COURSE_ID", required = true)]
        courses: Vec<i64>,
    },

    /// Mark an enrollment as dropped
    Drop {
        /// Enrollment ID
        id: i64,
    },

    /// Create demo lecturers, courses and students
    Seed {
        /// Prefix used in generated emails and course codes
        #[arg(long, default_value = "demo")]
        prefix: String,
        #[arg(long, default_value_t = 10)]
        students: u32,
        #[arg(long, default_value_t = 5)]
        lecturers: u32,
        #[arg(long, default_value_t = 8)]
        courses: u32,
    },

    /// Send an arbitrary authenticated request and print the response
    Raw {
        /// GET, POST, PUT or DELETE
        method: Method,
        /// Path relative to the base URL, e.g. /api/v1/health
        path: String,
        /// JSON request body
        #[arg(long, short = 'd')]
        data: Option<String>,
    },
}

/// Initialize the tracing subscriber for logging
///
/// Logs go to stderr through a non-blocking writer; the returned guard must
/// live until exit so buffered lines are flushed.
fn init_tracing() -> WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let (writer, guard) = tracing_appender::non_blocking(io::stderr());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing();
    info!("Student Service console starting");

    let ctx = Context::new(cli.base_url.as_deref())?;

    match cli.command {
        Command::Login { email } => commands::account::login(&ctx, email).await,
        Command::Register {
            first_name,
            last_name,
            email,
            date_of_birth,
        } => commands::account::register(&ctx, first_name, last_name, email, date_of_birth).await,
        Command::Logout => commands::account::logout(&ctx).await,
        Command::Whoami => commands::account::whoami(&ctx).await,
        Command::Dashboard => commands::admin::dashboard(&ctx).await,
        Command::Students { search, page } => {
            commands::records::students(&ctx, search.as_deref(), page).await
        }
        Command::Lecturers { search, page } => {
            commands::records::lecturers(&ctx, search.as_deref(), page).await
        }
        Command::Courses { title, page } => {
            commands::records::courses(&ctx, title.as_deref(), page).await
        }
        Command::Enrollments { search, page } => {
            commands::enrollments::list(&ctx, search.as_deref(), page).await
        }
        Command::Users { page } => commands::records::users(&ctx, page).await,
        Command::Mine => commands::records::mine(&ctx).await,
        Command::Enroll { students, courses } => {
            commands::enrollments::enroll(&ctx, &students, &courses).await
        }
        Command::Drop { id } => commands::enrollments::drop_enrollment(&ctx, id).await,
        Command::Seed {
            prefix,
            students,
            lecturers,
            courses,
        } => {
            let plan = student_service_core::seed::SeedPlan {
                prefix,
                students,
                lecturers,
                courses,
            };
            commands::admin::seed(&ctx, plan).await
        }
        Command::Raw { method, path, data } => {
            commands::admin::raw(&ctx, method, &path, data.as_deref()).await
        }
    }
}
