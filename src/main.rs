//! chostty - a mock cohost client
//!
//! Renders a login / timeline / navigation UI with an immediate-mode
//! composition loop, on one of two front ends:
//! - terminal (ratatui + crossterm), cargo feature `terminal` (default)
//! - window (egui + eframe, OpenGL), cargo feature `graphics`
//!
//! The front end is fixed at build time. With both features enabled the
//! terminal front end runs.
//!
//! Usage: chostty [--init-config]

#[cfg(not(any(feature = "terminal", feature = "graphics")))]
compile_error!("enable at least one front end: `--features terminal` or `--features graphics`");

mod app;
mod backend;
mod config;
mod error;
#[cfg(feature = "terminal")]
mod input;
mod logging;
mod session;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use backend::BackendKind;
use config::Config;
use tracing::info;

fn main() -> Result<()> {
    // Parse arguments
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("chostty {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.iter().any(|a| a == "--init-config") {
        let path = Config::default()
            .save()
            .context("Failed to write default configuration")?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    // Run the application; the display is already restored when this returns
    if let Err(e) = run_app() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"chostty - a mock cohost client

USAGE:
    chostty [OPTIONS]

OPTIONS:
        --init-config    Write the default config file and exit
    -h, --help           Print help information
    -V, --version        Print version information

KEYBINDINGS (terminal):
    m / F10          Open the Actions menu
    j/k              Navigate up/down
    Tab              Switch panel
    Enter            Select/confirm
    Esc              Close menu / leave login form
    q                Quit
    Ctrl+C           Quit from anywhere

CONFIG:
    ~/.config/chostty/config.toml
"#
    );
}

fn run_app() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    logging::init(&config.logging, BackendKind::BUILT).context("Failed to set up logging")?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = BackendKind::BUILT.as_str(),
        "chostty starting"
    );

    let app = App::new(config);
    backend::launch(app)
}
