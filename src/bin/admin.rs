//! CLI administration tool for smart-url-shortener.
//!
//! Works directly against the PostgreSQL store, so records can be managed
//! and swept without the HTTP server running.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (optionally with a slug)
//! cargo run --bin admin -- link create https://example.com/page --slug promo
//!
//! # Inspect a code or short URL
//! cargo run --bin admin -- link inspect http://10.0.0.5:4000/promo
//!
//! # Delete a code
//! cargo run --bin admin -- link delete promo
//!
//! # Purge records older than twelve months now
//! cargo run --bin admin -- sweep
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
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `PUBLIC_BASE_URL` (optional): prefix for printed short URLs

use smart_url_shortener::application::services::{LinkService, RedirectService};
use smart_url_shortener::domain::repositories::RecordStore;
use smart_url_shortener::domain::retention_sweeper::{
    DEFAULT_SWEEP_INTERVAL, RetentionSweeper, retention_cutoff,
};
use smart_url_shortener::infrastructure::persistence::PgRecordStore;
use smart_url_shortener::utils::display_addr::display_base_url;
use smart_url_shortener::utils::extract_code::extract_code;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing smart-url-shortener.
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
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Delete records older than the retention window
    Sweep {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Shorten a URL
    Create {
        /// URL to shorten (scheme defaults to https)
        url: String,

        /// Custom short code
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Show clicks and timestamps without counting a click
    Inspect {
        /// Short code or full short URL
        code: String,
    },

    /// Delete a short link
    Delete {
        /// Short code or full short URL
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Sweep { yes } => handle_sweep(&pool, yes).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn store(pool: &PgPool) -> Arc<PgRecordStore> {
    Arc::new(PgRecordStore::new(Arc::new(pool.clone())))
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let store = store(pool);

    match action {
        LinkAction::Create { url, slug } => create_link(store, url, slug).await?,
        LinkAction::Inspect { code } => inspect_link(store, code).await?,
        LinkAction::Delete { code, yes } => delete_link(store, code, yes).await?,
    }

    Ok(())
}

async fn create_link(store: Arc<PgRecordStore>, url: String, slug: Option<String>) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let base_url = std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| display_base_url(4000));
    let service = LinkService::new(store, base_url);

    let assignment = service
        .assign(&url, slug.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    if assignment.created {
        println!("{}", "✅ Short link created".green().bold());
    } else {
        println!("{}", "ℹ️  Short link already existed".yellow());
    }
    println!();
    println!("  Code:      {}", assignment.short_code.cyan());
    println!("  Original:  {}", assignment.long_url.bright_white());
    println!(
        "  Short URL: {}",
        service
            .short_url(&assignment.short_code)
            .bright_yellow()
            .bold()
    );
    println!();

    Ok(())
}

/// Prints a record's counters.
///
/// # Output Format
///
/// ```text
/// 🔍 Short Link
///
///   Code:         promo
///   Original:     https://example.com/page
///   Clicks:       12
///   Created:      2025-01-14 09:12:44
///   Last clicked: Never
/// ```
async fn inspect_link(store: Arc<PgRecordStore>, code: String) -> Result<()> {
    println!("{}", "🔍 Short Link".bright_blue().bold());
    println!();

    let service = RedirectService::new(store);
    let info = service
        .inspect(extract_code(&code))
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:         {}", info.record.short_code.cyan());
    println!("  Original:     {}", info.record.long_url.bright_white());
    println!(
        "  Clicks:       {}",
        info.record.clicks.to_string().bright_green().bold()
    );
    println!("  Created:      {}", info.created_at_display.bright_black());
    println!("  Last clicked: {}", info.last_clicked_display.bright_black());
    println!();

    Ok(())
}

/// Deletes a record after confirmation (default: No).
async fn delete_link(store: Arc<PgRecordStore>, code: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short Link".bright_blue().bold());
    println!();

    let code = extract_code(&code).to_string();
    let service = RedirectService::new(store);

    let info = service
        .inspect(&code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:     {}", info.record.short_code.cyan());
    println!("  Original: {}", info.record.long_url.bright_white());
    println!(
        "  Clicks:   {}",
        info.record.clicks.to_string().bright_black()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .remove(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    if deleted {
        println!("{}", "✅ Link deleted".green().bold());
    } else {
        println!("{}", "⚠️  Link was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Runs one retention sweep immediately.
async fn handle_sweep(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Retention Sweep".bright_blue().bold());
    println!();

    let now = Utc::now();
    println!(
        "  Deleting records created before {}",
        retention_cutoff(now)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_white()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Run sweep now?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let sweeper = RetentionSweeper::new(store(pool), DEFAULT_SWEEP_INTERVAL);
    let deleted = sweeper
        .sweep_once(now)
        .await
        .map_err(|e| anyhow::anyhow!("Sweep failed: {}", e))?;

    println!(
        "{} {}",
        "✅ Deleted records:".green().bold(),
        deleted.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays record and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let records = store(pool)
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count records: {}", e))?;

    let clicks: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM urls")
        .fetch_one(pool)
        .await?;

    let expiring: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE created_at < $1")
            .bind(retention_cutoff(Utc::now() + chrono::Duration::days(30)))
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:               {}",
        records.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:              {}",
        clicks.to_string().bright_green().bold()
    );
    println!(
        "  Expiring in 30 days: {}",
        expiring.to_string().bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            store(pool)
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
