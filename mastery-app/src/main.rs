mod cli;
mod tui;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use cli::commands::{open_repo, run_cli};
use cli::opts::{Cli, Command};
use tui::app::TuiApp;

fn main() -> Result<()> {
    // stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    match &args.cmd {
        // The TUI blocks on repo calls itself, so it owns the runtime.
        Command::Tui => {
            let rt = Arc::new(Runtime::new()?);
            let repo = rt.block_on(open_repo(&args))?;
            let mut app = TuiApp::new(repo, rt);
            app.run()
        }
        _ => {
            let rt = Runtime::new()?;
            rt.block_on(run_cli(args))
        }
    }
}
