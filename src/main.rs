mod cli;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mordecai_dashboard::activity::{ActivityQuery, ActivityType};
use mordecai_dashboard::config::DashboardConfig;

#[derive(Parser)]
#[command(
    name = "mordecai-dashboard",
    version,
    about = "Read-only monitoring dashboard for the Mordecai agent system"
)]
struct Cli {
    /// Config file (defaults to ~/.mordecai/dashboard.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve,
    /// Query the activity log from the terminal
    Activity {
        /// Only entries of this type (message, task, cron, heartbeat, memory, tool, error)
        #[arg(long = "type")]
        activity_type: Option<ActivityType>,
        /// Only entries from this channel
        #[arg(long)]
        channel: Option<String>,
        /// Case-insensitive text to find in summary, type or agent id
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
        /// Print the raw JSON page
        #[arg(long)]
        json: bool,
    },
    /// Check the data directory
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => DashboardConfig::load_from(path)?,
        None => DashboardConfig::load()?,
    };

    // Log to stderr so stdout stays clean for CLI output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => {
            server::serve(config).await?;
        }
        Command::Activity {
            activity_type,
            channel,
            search,
            page,
            page_size,
            json,
        } => {
            let query = ActivityQuery {
                activity_type,
                channel,
                search,
                page,
                page_size: page_size.unwrap_or(config.activity.default_page_size),
            };
            cli::activity::activity(&config, &query, json)?;
        }
        Command::Doctor => {
            cli::doctor::doctor(&config)?;
        }
    }

    Ok(())
}
