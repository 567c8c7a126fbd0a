pub mod ast;
pub mod commands;
pub mod context;
pub mod executor;
pub mod lexer;
pub mod parser;
pub mod validator;

use crate::config::TerminalConfig;
use crate::error::{ExecError, Rejection};
use crate::fallback::{Disabled, GeminiFallback, Suggest, SuggestionPolicy};
use anyhow::Result;
use commands::system::SystemCommand;
use context::SessionContext;
use executor::Executor;
use log::{debug, warn};
use parser::Mode;


pub const SUCCESS_MESSAGE: &str = "Command executed successfully";
pub const NOT_UNDERSTOOD_MESSAGE: &str = "Could not understand the command";

/// What happened to one line of input.
#[derive(Debug)]
pub enum Outcome {
    Empty,
    Output(String),
    DryRun(Vec<String>),
    NotUnderstood,
    Declined,
    Rejected(Rejection),
    Failed(ExecError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Empty | Outcome::Output(_) | Outcome::DryRun(_) | Outcome::Declined)
    }

    /// The text a front end should print, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Empty | Outcome::Declined => None,
            Outcome::Output(text) => Some(text.clone()),
            Outcome::DryRun(argv) => Some(format!("[DRY-RUN] {}", argv.join(" "))),
            Outcome::NotUnderstood => Some(NOT_UNDERSTOOD_MESSAGE.to_string()),
            Outcome::Rejected(reason) => Some(format!("Error: {}", reason)),
            Outcome::Failed(err) => Some(format!("Error: {}", err)),
        }
    }
}

pub struct Terminal {
    pub ctx: SessionContext,
    pub dry_run: bool,
    executor: Executor,
    fallback: Box<dyn Suggest>,
    policy: SuggestionPolicy,
}

impl Terminal {
    pub fn new(config: &TerminalConfig, ctx: SessionContext) -> Self {
        let fallback: Box<dyn Suggest> = if !config.fallback.enabled {
            Box::new(Disabled)
        } else {
            match GeminiFallback::from_config(config) {
                Ok(client) => Box::new(client),
                Err(e) => {
                    debug!("Natural-language fallback disabled: {}", e);
                    Box::new(Disabled)
                }
            }
        };
        Self {
            ctx,
            dry_run: false,
            executor: Executor::new(SystemCommand::from_config(&config.executor)),
            fallback,
            policy: SuggestionPolicy::default(),
        }
    }

    #[cfg(test)]
    pub fn with_fallback(mut self, fallback: Box<dyn Suggest>) -> Self {
        self.fallback = fallback;
        self
    }

    /// `confirm` is asked before a fallback suggestion is run.
    pub fn process<F>(&mut self, text: &str, confirm: F) -> Result<Option<String>>
    where
        F: FnMut(&str) -> Result<bool>,
    {
        Ok(self.run_line(text, confirm)?.message())
    }

    pub fn run_line<F>(&mut self, text: &str, mut confirm: F) -> Result<Outcome>
    where
        F: FnMut(&str) -> Result<bool>,
    {
        if text.trim().is_empty() {
            return Ok(Outcome::Empty);
        }

        let Some(tree) = parse_line(text) else {
            return self.follow_suggestion(text, &mut confirm);
        };
        Ok(self.run_tree(&tree))
    }

    fn follow_suggestion<F>(&mut self, text: &str, confirm: &mut F) -> Result<Outcome>
    where
        F: FnMut(&str) -> Result<bool>,
    {
        let suggestion = match self.fallback.suggest(text, &self.policy) {
            Ok(Some(s)) => s,
            Ok(None) => return Ok(Outcome::NotUnderstood),
            Err(e) => {
                warn!("Fallback error: {}", e);
                return Ok(Outcome::NotUnderstood);
            }
        };

        if !confirm(&suggestion)? {
            return Ok(Outcome::Declined);
        }

        // The suggestion gets no special trust, but it is only followed once.
        match parse_line(&suggestion) {
            Some(tree) => Ok(self.run_tree(&tree)),
            None => Ok(Outcome::NotUnderstood),
        }
    }

    fn run_tree(&mut self, tree: &ast::CommandNode) -> Outcome {
        if let Err(reason) = validator::validate(Some(tree), &self.ctx) {
            return Outcome::Rejected(reason);
        }
        if self.dry_run {
            return Outcome::DryRun(tree.argv());
        }
        match self.executor.execute(tree, &mut self.ctx) {
            Ok(()) => {
                let output = self.executor.last_output();
                if output.is_empty() {
                    Outcome::Output(SUCCESS_MESSAGE.to_string())
                } else {
                    Outcome::Output(output.to_string())
                }
            }
            Err(e) => {
                debug!("stderr: {}", self.executor.last_error());
                Outcome::Failed(e)
            }
        }
    }
}

pub fn parse_line(text: &str) -> Option<ast::CommandNode> {
    let (tokens, mode) = if lexer::is_literal_command(text) {
        (lexer::literal_tokens(text), Mode::Literal)
    } else {
        (lexer::tokenize(text), Mode::Natural)
    };
    debug!("{:?} tokens: {:?}", mode, tokens);
    parser::parse(&tokens, mode)
}
