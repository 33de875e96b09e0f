//! deck-efiboot - EFI boot order manager
//!
//! Reorders the SteamOS / Windows boot entries and sets the one-time
//! next boot target through `efibootmgr`.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use deck_efiboot::backend::{BootBackend, DryRunBackend, EfibootmgrBackend, FileBackend};
use deck_efiboot::config::Config;
use deck_efiboot::i18n::{Locale, Messages};
use deck_efiboot::panel::Panel;

mod commands;
mod ui;

use commands::order::Direction;

#[derive(Parser)]
#[command(name = "deck-efiboot")]
#[command(author = "RavenLinux Team")]
#[command(version)]
#[command(about = "Manage SteamOS / Windows EFI boot order", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read boot variables but never write them
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Config file (default: ~/.config/deck-efiboot/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use a saved `efibootmgr -v` dump instead of running efibootmgr
    #[arg(long, global = true)]
    from_file: Option<PathBuf>,

    /// Steam language name for messages (english, schinese, ...)
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive boot order panel (default)
    Tui,

    /// Show current boot, next boot and the boot order
    #[command(visible_alias = "s")]
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also list entries the panel does not manage
        #[arg(short, long)]
        all: bool,
    },

    /// Move an entry of the boot order up
    Up {
        /// Row index as printed by `show`
        index: usize,
    },

    /// Move an entry of the boot order down
    Down {
        /// Row index as printed by `show`
        index: usize,
    },

    /// Boot the given entry next time only
    Next {
        /// Boot number, e.g. 0001
        number: String,
    },

    /// Parse a saved `efibootmgr -v` dump
    Parse {
        /// Path to the dump
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Route logs to stderr, or to a file while the TUI owns the terminal
fn init_tracing(verbose: bool, tui: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    if tui {
        let dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("deck-efiboot");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("deck-efiboot.log"))
            .context("Failed to open log file")?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

async fn dispatch<B: BootBackend>(backend: B, command: Commands, messages: &'static Messages) -> Result<()> {
    let panel = Panel::new(backend, messages);

    match command {
        Commands::Tui => ui::run(panel).await,
        Commands::Show { json, all } => commands::show::run(panel, json, all).await,
        Commands::Up { index } => commands::order::run(panel, index, Direction::Up).await,
        Commands::Down { index } => commands::order::run(panel, index, Direction::Down).await,
        Commands::Next { number } => commands::next::run(panel, &number).await,
        Commands::Parse { file, json } => commands::parse::run(&file, json, messages),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    init_tracing(cli.verbose, matches!(command, Commands::Tui))?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    debug!(?config, "loaded configuration");

    let language = cli.lang.as_deref().or(config.ui.language.as_deref());
    let messages = Locale::detect(language).messages();

    match (cli.from_file, cli.dry_run) {
        (Some(path), true) => dispatch(DryRunBackend::new(FileBackend::new(path)), command, messages).await,
        (Some(path), false) => dispatch(FileBackend::new(path), command, messages).await,
        (None, true) => {
            let backend = EfibootmgrBackend::with_config(&config.backend);
            dispatch(DryRunBackend::new(backend), command, messages).await
        }
        (None, false) => {
            dispatch(EfibootmgrBackend::with_config(&config.backend), command, messages).await
        }
    }
}
