//! Vigil CLI
//!
//! Conflict escalation probability scoring over open-source news.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use vigil_core::{find_target, target_ids, TARGETS};
use vigil_runtime::{RuntimeConfig, ServerConfig};
use vigil_scan::{LiveScanner, Scanner, SourceSettings};

#[derive(Parser)]
#[command(name = "vigil")]
#[command(author, version, about = "Vigil: conflict escalation monitor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API with background refresh
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "5000")]
        port: u16,

        /// NewsAPI key (or set NEWSAPI_KEY env var)
        #[arg(long, env = "NEWSAPI_KEY")]
        newsapi_key: Option<String>,

        /// Cache TTL in seconds; also the refresh interval
        #[arg(long, env = "CACHE_TTL_SECS", default_value = "14400")]
        cache_ttl_secs: u64,

        /// Disable the background refresh scheduler
        #[arg(long)]
        no_refresh: bool,
    },

    /// Scan one target and print the report as JSON
    Scan {
        /// Target id
        target: String,

        /// Window in days (1-90)
        #[arg(short, long, default_value = "7")]
        days: u32,

        /// NewsAPI key (or set NEWSAPI_KEY env var)
        #[arg(long, env = "NEWSAPI_KEY")]
        newsapi_key: Option<String>,
    },

    /// List monitored targets
    Targets,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            newsapi_key,
            cache_ttl_secs,
            no_refresh,
        } => {
            let mut config = RuntimeConfig {
                server: ServerConfig { host, port },
                sources: sources(newsapi_key),
                ..Default::default()
            }
            .with_cache_ttl(Duration::from_secs(cache_ttl_secs));
            config.refresh.enabled = !no_refresh;

            let scanner = LiveScanner::shared(config.sources.clone())?;
            vigil_runtime::serve(config, scanner).await?;
        }
        Commands::Scan {
            target,
            days,
            newsapi_key,
        } => {
            run_scan(&target, days, newsapi_key).await?;
        }
        Commands::Targets => {
            for target in TARGETS {
                println!("{:<10} {:+3}  {}", target.id, target.baseline_adjustment, target.description);
            }
        }
    }

    Ok(())
}

fn sources(newsapi_key: Option<String>) -> SourceSettings {
    if newsapi_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        info!("No NewsAPI key configured; NewsAPI will be skipped");
    }
    SourceSettings {
        newsapi_key,
        ..Default::default()
    }
}

async fn run_scan(target: &str, days: u32, newsapi_key: Option<String>) -> Result<()> {
    if find_target(target).is_none() {
        anyhow::bail!(
            "Unknown target '{}'. Must be one of: {}",
            target,
            target_ids().join(", ")
        );
    }

    let scanner = LiveScanner::new(sources(newsapi_key))?;
    let report = scanner.scan_threat(target, days).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
