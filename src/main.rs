// Only compile the browse view when the TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

use inventory_keeper::config::DEFAULT_LOG_FILTER;
use inventory_keeper::{open_inventory, Cli, Config, Session};

fn main() -> Result<()> {
    init_logging();

    let config = Config::from(Cli::parse());

    if config.browse {
        run_browse_mode(&config)?;
    } else {
        run_menu(&config)?;
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with the menu on stdout
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_menu(config: &Config) -> Result<()> {
    let mut stdout = io::stdout();
    let inventory = open_inventory(&config.store_path, &mut stdout)?;

    let mut session = Session::new(inventory, io::stdin().lock(), stdout);
    session.run()
}

#[cfg(feature = "tui")]
fn run_browse_mode(config: &Config) -> Result<()> {
    let mut stdout = io::stdout();
    let inventory = open_inventory(&config.store_path, &mut stdout)?;

    let mut app = ui::App::new(inventory.records().to_vec());
    ui::run_ui(&mut app)?;

    println!("✓ Browse view closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_browse_mode(_config: &Config) -> Result<()> {
    eprintln!("❌ Browse view not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
