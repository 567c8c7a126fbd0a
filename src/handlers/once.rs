use anyhow::{Result, bail};
use colored::*;
use crate::handlers::confirm_suggestion;
use crate::terminal::{Outcome, Terminal};

pub fn handle_once(terminal: &mut Terminal, text: &str, assume_yes: bool) -> Result<()> {
    let outcome = terminal.run_line(text, |s| confirm_suggestion(s, assume_yes))?;
    let message = outcome.message();

    if outcome.is_success() {
        if let Some(m) = message {
            print!("{}", m);
            if !m.ends_with('\n') {
                println!();
            }
        }
        return Ok(());
    }

    match outcome {
        Outcome::NotUnderstood => bail!("{}", message.unwrap_or_default()),
        _ => {
            eprintln!("{}", message.unwrap_or_default().red());
            bail!("❌ Command did not complete");
        }
    }
}
