//! CLI administration tool for bio-links.
//!
//! Provides commands for managing accounts, cleaning up sessions, viewing
//! statistics and inspecting the database without going through the web UI.
//!
//! # Usage
//!
//! ```bash
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Delete a user together with their links and sessions
//! cargo run --bin admin -- user delete alice
//!
//! # Remove expired sessions
//! cargo run --bin admin -- session purge
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_PATH`: SQLite database location (see [`bio_links::config`])

use bio_links::config::database_url_from_env;
use bio_links::domain::entities::User;
use bio_links::domain::repositories::{LinkRepository, SessionRepository, UserRepository};
use bio_links::infrastructure::persistence::{
    SqliteLinkRepository, SqliteSessionRepository, SqliteUserRepository, pool,
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing bio-links.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage login sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,

    /// Delete a user, their links and their sessions
    Delete {
        /// Username or numeric ID
        username_or_id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Delete every expired session
    Purge,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = database_url_from_env();

    let pool = pool::connect(&database_url, 1, Duration::from_secs(30))
        .await
        .context("Failed to connect to database")?;

    pool::migrate(&pool)
        .await
        .context("Failed to apply migrations")?;

    let pool = Arc::new(pool);

    match cli.command {
        Commands::User { action } => handle_user_action(action, pool).await?,
        Commands::Session { action } => handle_session_action(action, pool).await?,
        Commands::Stats => handle_stats(pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: Arc<SqlitePool>) -> Result<()> {
    let users = SqliteUserRepository::new(pool.clone());

    match action {
        UserAction::List => list_users(&users, &SqliteLinkRepository::new(pool)).await,
        UserAction::Delete {
            username_or_id,
            yes,
        } => delete_user(&users, username_or_id, yes).await,
    }
}

/// Lists all users with their link counts.
///
/// # Output Format
///
/// ```text
/// 👥 Users
///
///   ID  Username             Email                          Links  Created
///   ─────────────────────────────────────────────────────────────────────────
///   1   alice                alice@example.com              3      2025-01-15 10:30
/// ```
async fn list_users(users: &SqliteUserRepository, links: &SqliteLinkRepository) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let all = users.list().await.context("Failed to list users")?;

    if all.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<6} {}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Links".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for user in &all {
        let link_count = links.list_by_owner(user.id).await?.len();

        println!(
            "  {:<3} {:<20} {:<30} {:<6} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            link_count,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", all.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a user by username or ID after confirmation.
///
/// # Lookup
///
/// - If input is numeric, lookup by ID first, then by username
/// - Otherwise, lookup by username (exact match)
///
/// Links and sessions go with the user through `ON DELETE CASCADE`.
async fn delete_user(users: &SqliteUserRepository, username_or_id: String, yes: bool) -> Result<()> {
    println!("{}", "🗑️  Delete User".bright_blue().bold());
    println!();

    let user = find_user(users, &username_or_id)
        .await?
        .context("User not found")?;

    println!("  User:  {}", user.username.cyan());
    println!("  Email: {}", user.email);
    println!("  ID:    {}", user.id.to_string().bright_black());
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete this user and all of their links?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    users
        .delete(user.id)
        .await
        .context("Failed to delete user")?;

    println!();
    println!("{}", "✅ User deleted".green().bold());
    println!();

    Ok(())
}

async fn find_user(users: &SqliteUserRepository, username_or_id: &str) -> Result<Option<User>> {
    if let Ok(id) = username_or_id.parse::<i64>()
        && let Some(user) = users.find_by_id(id).await?
    {
        return Ok(Some(user));
    }

    Ok(users.find_by_username(username_or_id).await?)
}

async fn handle_session_action(action: SessionAction, pool: Arc<SqlitePool>) -> Result<()> {
    let sessions = SqliteSessionRepository::new(pool);

    match action {
        SessionAction::Purge => {
            println!("{}", "🧹 Purging expired sessions...".bright_blue());

            let removed = sessions
                .delete_expired(Utc::now())
                .await
                .context("Failed to purge sessions")?;

            println!(
                "{} {}",
                "✅ Removed".green().bold(),
                format!("{removed} expired session(s)").bright_white()
            );
        }
    }

    Ok(())
}

/// Displays user, link and active session counts.
async fn handle_stats(pool: Arc<SqlitePool>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users = SqliteUserRepository::new(pool.clone()).count().await?;
    let links = SqliteLinkRepository::new(pool.clone()).count().await?;
    let sessions = SqliteSessionRepository::new(pool)
        .count_active(Utc::now())
        .await?;

    println!("  Users:           {}", users.to_string().bright_green().bold());
    println!("  Links:           {}", links.to_string().bright_green().bold());
    println!(
        "  Active sessions: {}",
        sessions.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;
            let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
                .fetch_one(pool)
                .await?;
            let page_count: i64 = sqlx::query_scalar("PRAGMA page_count")
                .fetch_one(pool)
                .await?;
            let page_size: i64 = sqlx::query_scalar("PRAGMA page_size")
                .fetch_one(pool)
                .await?;
            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await?;

            println!("  SQLite:       {}", version.bright_white());
            println!("  Journal mode: {}", journal_mode.bright_white());
            println!(
                "  Size:         {} KiB",
                (page_count * page_size / 1024).to_string().bright_white()
            );
            println!("  Migrations:   {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
