mod cli;
mod config;
mod error;
mod fallback;
mod handlers;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::load_config;
use handlers::{once, repl};
use terminal::Terminal;
use terminal::context::SessionContext;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let ctx = SessionContext::from_current_dir().context("Failed to determine working directory")?;
    let mut config = load_config(&ctx.root, cli.config.as_deref())?;
    if cli.no_fallback {
        config.fallback.enabled = false;
    }

    let mut terminal = Terminal::new(&config, ctx);
    terminal.dry_run = cli.dry_run;

    match cli.command {
        Some(text) => once::handle_once(&mut terminal, &text, cli.yes),
        None => repl::handle_repl(&mut terminal, cli.yes),
    }
}
