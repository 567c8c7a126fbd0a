use anyhow::{Context, Result};
use colored::*;
use log::debug;
use std::io::{self, BufRead, Write};
use crate::handlers::confirm_suggestion;
use crate::terminal::{NOT_UNDERSTOOD_MESSAGE, SUCCESS_MESSAGE, Terminal};

const EXIT_WORDS: &[&str] = &["exit", "quit"];

fn prompt(terminal: &Terminal) -> String {
    format!("{} {} $ ", ">".green(), terminal.ctx.cwd.display().to_string().blue())
}

fn render(message: &str) -> String {
    if message.starts_with("Error:") || message == NOT_UNDERSTOOD_MESSAGE {
        message.red().to_string()
    } else if message == SUCCESS_MESSAGE {
        message.green().to_string()
    } else if message.starts_with("[DRY-RUN]") {
        message.yellow().to_string()
    } else {
        message.trim_end().to_string()
    }
}

pub fn handle_repl(terminal: &mut Terminal, assume_yes: bool) -> Result<()> {
    // Ctrl-C reaches the running child (same process group) but must not end the session.
    ctrlc::set_handler(|| debug!("Interrupt received")).context("Failed to install Ctrl-C handler")?;

    println!("{}", "AI-Powered Terminal".cyan());
    println!("{}", "Type 'exit' to quit".cyan());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{}", prompt(terminal));
        io::stdout().flush().context("Failed to flush stdout")?;

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                println!();
                continue;
            }
            Err(e) => return Err(e).context("Failed to read input"),
        }

        let input = line.trim();
        if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
            println!("{}", "Goodbye!".yellow());
            break;
        }

        match terminal.process(input, |s| confirm_suggestion(s, assume_yes)) {
            Ok(Some(message)) => println!("{}", render(&message)),
            Ok(None) => {}
            Err(e) => println!("{}", format!("Error: {:#}", e).red()),
        }
    }
    Ok(())
}
