pub mod cd;
pub mod system;

use crate::error::ExecError;
use crate::terminal::context::SessionContext;

/// Text captured from a command that exited successfully.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Captured {
    pub stdout: String,
    pub stderr: String,
}

pub trait Executable {
    fn execute(&self, args: &[String], ctx: &mut SessionContext) -> Result<Captured, ExecError>;
}
