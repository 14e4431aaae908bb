//! PagePilot - grounded browser-agent core
//!
//! Offline tooling around the agent core: inspect recorded snapshots and
//! list the action registry.

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pagepilot_config::{ConfigLoader, ConfigValidator, LoggingConfig};

mod cli;
mod cmd_actions;
mod cmd_inspect;

use cli::{Cli, Commands};

/// Install the global subscriber: console always, daily-rotated file when
/// `logging.directory` is set.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console = if logging.is_json() {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().with_target(true).with_ansi(true).boxed()
    };

    let file = match logging.directory_path() {
        Some(log_dir) => {
            std::fs::create_dir_all(&log_dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("pagepilot")
                .filename_suffix("log")
                .build(&log_dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The writer flushes on drop, so the guard lives for the process.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    init_tracing(&config.logging)?;
    debug!(config = ?cli.config, "Configuration loaded");

    if !matches!(cli.command, Commands::Config) {
        let result = ConfigValidator::validate(&config)?;
        for warning in &result.warnings {
            warn!(path = %warning.path, "{}", warning.message);
        }
        result.into_result()?;
    }

    match cli.command {
        Commands::Inspect { snapshot, format } => cmd_inspect::handle_inspect(&snapshot, format),
        Commands::Actions { format } => cmd_actions::handle_actions(&config, format),
        Commands::Config => cmd_actions::handle_config(&config),
    }
}
