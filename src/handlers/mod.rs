pub mod once;
pub mod repl;

use anyhow::{Context, Result};
use colored::*;
use std::io::{self, BufRead, Write};

/// Asks the user before a fallback suggestion is run. `assume_yes` skips the question.
pub fn confirm_suggestion(suggestion: &str, assume_yes: bool) -> Result<bool> {
    println!("{} {}", "Suggested command:".yellow(), suggestion.bold());
    if assume_yes {
        return Ok(true);
    }
    print!("Execute this command? [y/N]: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
