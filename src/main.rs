// tui-dropdown - terminal host for a searchable, alignable dropdown
//
// Architecture:
// - CLI (clap): config management subcommands, global --config override
// - Config: env > file > defaults, including the hosted dropdown's props
// - Logging: tracing into an in-memory buffer shown in the log strip,
//   optionally mirrored to rotating JSON files
// - TUI (ratatui): event loop that routes input into the dropdown

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui_dropdown::config::{Config, LogRotation, LoggingConfig};
use tui_dropdown::logging::{LogBuffer, TuiLogLayer};
use tui_dropdown::tui;

/// Install the global subscriber
///
/// Logs always go to the in-memory buffer (stdout belongs to the TUI).
/// With file logging enabled, a JSON layer writes to rotating files too;
/// the returned guard must live until exit so buffered lines get flushed.
fn init_tracing(
    logging: &LoggingConfig,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    // Precedence: RUST_LOG env var > config file > default "info"
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));

    if !logging.file_enabled {
        tracing_subscriber::registry()
            .with(filter)
            .with(TuiLogLayer::new(log_buffer.clone()))
            .init();
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        tracing_subscriber::registry()
            .with(filter)
            .with(TuiLogLayer::new(log_buffer.clone()))
            .init();
        return None;
    }

    let file_appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    // Writes happen on a background thread
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(log_buffer.clone()))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle CLI commands first (config --show, --reset, --path)
    if cli::handle_cli(&cli)? {
        return Ok(());
    }

    // Only seed the default location; an explicit --config is used as given
    if cli.config.is_none() {
        Config::ensure_config_exists();
    }

    let config = Config::load(cli.config.as_deref())?;

    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config.logging, &log_buffer);

    match &config.source {
        Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
        None => tracing::info!("No config file, using defaults"),
    }
    tracing::debug!(
        items = config.dropdown.items.len(),
        searchable = config.dropdown.searchable,
        theme = %config.theme,
        "Starting TUI"
    );

    if let Err(e) = tui::run_tui(config, log_buffer).await {
        tracing::error!("TUI error: {:?}", e);
        return Err(e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
