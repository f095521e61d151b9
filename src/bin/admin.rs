//! CLI administration tool for clicktrail.
//!
//! Reads the same Redis keys as the server, so stats and recent clicks can be
//! inspected without going through the HTTP API (and its bot filter).
//!
//! # Usage
//!
//! ```bash
//! # View aggregate statistics
//! cargo run --bin admin -- stats
//!
//! # List links with their click counts
//! cargo run --bin admin -- links --limit 20
//!
//! # Show the most recent clicks
//! cargo run --bin admin -- clicks --limit 10
//!
//! # Look up where a code points
//! cargo run --bin admin -- resolve aZ3kQ9
//!
//! # Check the Redis connection
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` (or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB`)
//! - `STORE_TIMEOUT_MS` (optional): per-command deadline

use clicktrail::application::services::{DashboardService, LinkService};
use clicktrail::config::{Config, mask_connection_string};
use clicktrail::domain::repositories::KeyValueStore;
use clicktrail::infrastructure::store::RedisStore;

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for inspecting clicktrail data.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show aggregate statistics
    Stats,

    /// List short links with click counts
    Links {
        /// Maximum number of links to show
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },

    /// Show the most recent clicks
    Clicks {
        /// Maximum number of clicks to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Print the target URL of a short code
    Resolve {
        /// Short code (e.g., "aZ3kQ9")
        code: String,
    },

    /// Check the Redis connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    let redis_url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL (or REDIS_HOST) must be set")?;

    let store: Arc<dyn KeyValueStore> = Arc::new(
        RedisStore::connect(redis_url, config.store_timeout)
            .await
            .with_context(|| format!("Failed to connect to {}", mask_connection_string(redis_url)))?,
    );

    let settings = &config.services;
    let dashboard = DashboardService::new(
        store.clone(),
        settings.dashboard_url_limit,
        settings.dashboard_click_limit,
    );

    match cli.command {
        Commands::Stats => handle_stats(&dashboard).await?,
        Commands::Links { limit } => handle_links(&dashboard, limit).await?,
        Commands::Clicks { limit } => handle_clicks(&dashboard, limit).await?,
        Commands::Resolve { code } => {
            let links = LinkService::new(store.clone(), settings.code_length);
            handle_resolve(&links, &code).await?
        }
        Commands::Check => handle_check(store.as_ref(), redis_url).await?,
    }

    Ok(())
}

/// Displays the dashboard counters.
async fn handle_stats(dashboard: &DashboardService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = dashboard
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read statistics: {}", e))?;

    println!("  Links:           {}", stats.total_urls.to_string().cyan());
    println!("  Total clicks:    {}", stats.total_clicks.to_string().cyan());
    println!("  Clicks today:    {}", stats.today_clicks.to_string().cyan());
    println!("  Unique visitors: {}", stats.unique_visitors.to_string().cyan());
    println!();

    Ok(())
}

/// Lists links in discovery order.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   Code       Clicks  Created               Target
///   ──────────────────────────────────────────────────────────
///   aZ3kQ9     3       2024-05-01 10:00      https://example.com/page
/// ```
async fn handle_links(dashboard: &DashboardService, limit: usize) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let logs = dashboard
        .url_logs(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if logs.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<7} {:<21} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for log in &logs {
        println!(
            "  {:<10} {:<7} {:<21} {}",
            log.code.cyan(),
            log.clicks,
            log.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            log.long_url
        );
    }

    println!();
    println!("  Shown: {}", logs.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Shows recent clicks, newest first.
async fn handle_clicks(dashboard: &DashboardService, limit: usize) -> Result<()> {
    println!("{}", "🖱️  Recent clicks".bright_blue().bold());
    println!();

    let records = dashboard
        .click_logs(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read click log: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No clicks recorded".yellow());
        return Ok(());
    }

    for record in &records {
        println!(
            "  {} {:<10} {:<16} {}",
            record
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Secs, true)
                .bright_black(),
            record.code.cyan(),
            record.ip,
            record.user_agent.bright_black()
        );
    }

    println!();

    Ok(())
}

async fn handle_resolve(links: &LinkService, code: &str) -> Result<()> {
    match links.resolve(code).await {
        Ok(url) => {
            println!("  {} → {}", code.cyan(), url.bright_white());
            Ok(())
        }
        Err(e) => {
            println!("{}", format!("❌ {}", e).red());
            Err(anyhow::anyhow!("Could not resolve {}", code))
        }
    }
}

/// Tests the Redis connection.
async fn handle_check(store: &dyn KeyValueStore, redis_url: &str) -> Result<()> {
    println!("{}", "🔍 Checking Redis connection...".bright_blue());

    store
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("PING failed: {}", e))?;

    println!("{}", "✅ Redis connection OK".green().bold());
    println!("  URL: {}", mask_connection_string(redis_url).bright_black());

    Ok(())
}
