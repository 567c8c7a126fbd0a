use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aiterm", version, about = "A terminal that understands shell commands and plain language")]
pub struct Cli {
    /// Run a single line and exit instead of starting the interactive session
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,

    /// Config file (defaults to ./aiterm.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Validate and print commands without executing them
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,

    /// Never consult the natural-language fallback
    #[arg(long = "no-fallback")]
    pub no_fallback: bool,

    /// Run fallback suggestions without asking
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}
