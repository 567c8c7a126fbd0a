use crate::error::ExecError;
use crate::terminal::ast::{CommandName, CommandNode, Program};
use crate::terminal::commands::cd::CdCommand;
use crate::terminal::commands::system::SystemCommand;
use crate::terminal::commands::Executable;
use crate::terminal::context::SessionContext;
use log::info;

/// Runs command trees and keeps what the last one printed.
pub struct Executor {
    system: SystemCommand,
    last_output: String,
    last_error: String,
}

impl Executor {
    pub fn new(system: SystemCommand) -> Self {
        Self { system, last_output: String::new(), last_error: String::new() }
    }

    pub fn execute(&mut self, tree: &CommandNode, ctx: &mut SessionContext) -> Result<(), ExecError> {
        let argv = tree.argv();
        info!("Executing: {:?} in {}", argv, ctx.cwd.display());

        let result = match &tree.name {
            CommandName::Known(Program::Cd) => CdCommand.execute(&argv, ctx),
            _ => self.system.execute(&argv, ctx),
        };

        match result {
            Ok(captured) => {
                self.last_output = captured.stdout;
                self.last_error = captured.stderr;
                Ok(())
            }
            Err(e) => {
                match &e {
                    ExecError::ExitStatus { stdout, stderr, .. } => {
                        self.last_output = stdout.clone();
                        self.last_error = stderr.clone();
                    }
                    other => {
                        self.last_output.clear();
                        self.last_error = other.to_string();
                    }
                }
                Err(e)
            }
        }
    }

    pub fn last_output(&self) -> &str {
        &self.last_output
    }

    pub fn last_error(&self) -> &str {
        &self.last_error
    }
}
