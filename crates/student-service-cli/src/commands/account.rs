use std::io::{self, Write};

use anyhow::{bail, Context as _, Result};
use chrono::NaiveDate;
use tracing::warn;

use student_service_core::models::RegisterRequest;

use super::Context;

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}

fn remember_email(ctx: &Context, email: &str) {
    let mut config = ctx.config.clone();
    config.last_email = Some(email.to_string());
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }
}

pub async fn login(ctx: &Context, email: Option<String>) -> Result<()> {
    let email = match email.or_else(|| ctx.config.last_email.clone()) {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    if email.is_empty() {
        bail!("Email is required");
    }
    let password = rpassword::prompt_password(format!("Password for {}: ", email))
        .context("Failed to read password")?;

    ctx.auth.sign_in(&email, &password).await?;
    remember_email(ctx, &email);

    let session = ctx.auth.bootstrap().await;
    let name = session
        .and_then(|s| s.user)
        .map(|u| u.display_name())
        .unwrap_or(email);
    println!("Signed in as {}", name);
    Ok(())
}

pub async fn register(
    ctx: &Context,
    first_name: String,
    last_name: String,
    email: String,
    date_of_birth: Option<NaiveDate>,
) -> Result<()> {
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    let confirm =
        rpassword::prompt_password("Confirm password: ").context("Failed to read password")?;
    if password != confirm {
        bail!("Passwords do not match");
    }

    let request = RegisterRequest {
        first_name,
        last_name,
        email: email.clone(),
        password,
        date_of_birth,
    };
    ctx.auth.sign_up(&request).await?;
    remember_email(ctx, &email);

    println!("Registered and signed in as {}", email);
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    if !ctx.auth.is_authenticated() {
        println!("Not signed in");
        return Ok(());
    }
    ctx.auth.sign_out().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    ctx.auth.require_authenticated()?;
    let session = ctx.auth.bootstrap().await;

    match session.and_then(|s| s.user) {
        Some(user) => {
            println!("{}", user.display_name());
            if let Some(ref email) = user.email {
                println!("Email: {}", email);
            }
            if let Some(ref role) = user.role {
                println!("Role:  {}", role.as_str());
            }
        }
        None => println!("Signed in (profile unavailable)"),
    }
    println!("API:   {}", ctx.client().base_url());
    Ok(())
}
