// CLI module - command-line argument parsing and handlers
//
// Provides subcommands for configuration management:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Print the config file location

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tui_dropdown::config::{Config, VERSION};

/// tui-dropdown - interactive dropdown widget host
#[derive(Parser)]
#[command(name = "tui-dropdown")]
#[command(version = VERSION)]
#[command(about = "Terminal host for a searchable, alignable dropdown", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/tui-dropdown/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    /// Config file in effect: `--config` or the default location
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::config_path)
    }
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli(cli: &Cli) -> Result<bool> {
    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path(cli)?;
            } else if show {
                handle_config_show(cli)?;
            } else if reset {
                handle_config_reset(cli)?;
            } else {
                // No flag provided, show help
                println!("Usage: tui-dropdown config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        None => Ok(false), // No subcommand, run the TUI
    }
}

fn require_path(cli: &Cli) -> Result<PathBuf> {
    match cli.config_path() {
        Some(path) => Ok(path),
        None => bail!("Could not determine config path (no home directory)"),
    }
}

fn handle_config_path(cli: &Cli) -> Result<()> {
    println!("{}", require_path(cli)?.display());
    Ok(())
}

fn handle_config_show(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    println!("# Effective configuration (env > file > defaults)");
    match &config.source {
        Some(path) => println!("# Source: {}", path.display()),
        None => println!("# Source: defaults (no config file)"),
    }
    println!();
    print!("{}", config.to_toml());
    Ok(())
}

fn confirm_overwrite(path: &Path) -> Result<bool> {
    eprint!(
        "Config file exists at {}. Overwrite? [y/N] ",
        path.display()
    );
    std::io::stderr().flush().context("Failed to flush stderr")?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("Failed to read confirmation")?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn handle_config_reset(cli: &Cli) -> Result<()> {
    let path = require_path(cli)?;

    // Confirm if file exists
    if path.exists() && !confirm_overwrite(&path)? {
        println!("Aborted.");
        return Ok(());
    }

    // Create parent directory
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    // Write the default config (using Config's single source of truth)
    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
