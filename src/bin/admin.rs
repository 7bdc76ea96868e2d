//! CLI administration tool for campus-hub.
//!
//! Provides commands for bootstrapping accounts, viewing the analytics
//! snapshot, and performing database operations without requiring HTTP API
//! access.
//!
//! # Usage
//!
//! ```bash
//! # Bootstrap the first super-admin account
//! cargo run --bin admin -- user create --role super-admin
//!
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # View the analytics snapshot
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use campus_hub::application::services::{AnalyticsService, UserService};
use campus_hub::domain::entities::Role;
use campus_hub::domain::repositories::{UserFilter, UserRepository};
use campus_hub::infrastructure::persistence::{PgEventRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use rand::distr::Alphanumeric;
use rand::Rng;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing campus-hub.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show the analytics snapshot
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create an account (bootstrap the first super-admin with --role)
    Create {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Role: user, admin, or super-admin
        #[arg(short, long, default_value = "super-admin")]
        role: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List accounts
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create {
            username,
            email,
            role,
            yes,
        } => create_user(repo, username, email, role, yes).await?,
        UserAction::List => list_users(repo).await?,
    }

    Ok(())
}

/// Creates an account with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for username and email (or use provided)
/// 2. Prompt for a password, or generate a random one
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Create through [`UserService`], which applies the same validation
///    and argon2 hashing as the HTTP API
async fn create_user(
    repo: Arc<PgUserRepository>,
    username: Option<String>,
    email: Option<String>,
    role: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create account".bright_blue().bold());
    println!();

    let role = Role::parse(&role)
        .with_context(|| format!("Role must be 'user', 'admin', or 'super-admin', got '{role}'"))?;

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let use_generated = Confirm::new()
        .with_prompt("Generate a random password?")
        .default(true)
        .interact()?;

    let (password, generated) = if use_generated {
        (generate_password(), true)
    } else {
        let entered = Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?;
        (entered, false)
    };

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    println!("  Email:    {}", email.cyan());
    println!("  Role:     {}", role.to_string().bright_yellow());
    if generated {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "IMPORTANT: Save this password now! You won't be able to see it again."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let service = UserService::new(repo);
    let user = service
        .create(&username, &email, &password, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {:?}", e))?;

    println!();
    println!("{}", "Account created successfully!".green().bold());
    println!("  id: {}", user.id.to_string().bright_white());

    Ok(())
}

/// Lists accounts newest first.
async fn list_users(repo: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "Accounts".bright_blue().bold());
    println!();

    let users = repo
        .list(UserFilter::new(0, 100))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {:?}", e))?;

    if users.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<20} {:<30} {:<12} {:<17}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(86).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<20} {:<30} {:<12} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.role.to_string().bright_yellow(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());

    Ok(())
}

/// Prints the analytics snapshot.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Analytics snapshot".bright_blue().bold());
    println!();

    let pool = Arc::new(pool.clone());
    let service = AnalyticsService::new(
        Arc::new(PgEventRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool)),
    );

    let report = service
        .get_analytics()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to compute analytics: {:?}", e))?;

    println!("{}", "  Club activity (events per club):".bright_white());
    if report.club_activity.is_empty() {
        println!("    {}", "no events yet".yellow());
    }
    for metric in &report.club_activity {
        println!(
            "    {:<30} {}",
            metric.display_name.cyan(),
            metric.count.to_string().bright_white().bold()
        );
    }

    println!();
    println!("{}", "  Popularity ranking:".bright_white());
    for metric in &report.popularity_ranking {
        println!(
            "    {:<30} {}",
            metric.display_name.cyan(),
            metric.count.to_string().bright_white().bold()
        );
    }

    let census = report.user_census;
    println!();
    println!("{}", "  Accounts by role:".bright_white());
    println!("    students:     {}", census.students.to_string().bright_white());
    println!("    admins:       {}", census.admins.to_string().bright_white());
    println!("    super-admins: {}", census.super_admins.to_string().bright_white());

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await
                .context("Database query failed")?;

            println!("{}", "Database connection OK".green().bold());
            println!("  {}", version.bright_black());
        }
    }

    Ok(())
}

/// Generates a 20-character alphanumeric password.
///
/// Always satisfies the password policy: appends one letter and one digit
/// in case the random portion misses a class.
fn generate_password() -> String {
    let random: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(18)
        .map(char::from)
        .collect();
    format!("{random}a1")
}
