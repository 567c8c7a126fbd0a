// Cd command

use crate::error::ExecError;
use crate::terminal::commands::{Captured, Executable};
use crate::terminal::context::SessionContext;
use log::info;
use std::fs;

/// Runs in-process: a child `cd` could never move the session.
pub struct CdCommand;

impl Executable for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut SessionContext) -> Result<Captured, ExecError> {
        // args[0] is "cd". args[1] is path; none means back to the sandbox root.
        let (shown, new_path) = match args.get(1) {
            Some(p) => (p.as_str(), ctx.resolve_path(p)),
            None => (".", ctx.root.clone()),
        };

        if !new_path.is_dir() {
            return Err(ExecError::Builtin(format!("cd: no such file or directory: {}", shown)));
        }
        let canon = fs::canonicalize(&new_path)
            .map_err(|e| ExecError::Builtin(format!("cd: {}: {}", shown, e)))?;
        if !ctx.is_inside(&canon) {
            return Err(ExecError::Builtin(format!("cd: {} is outside allowed directory", shown)));
        }

        info!("Changing directory to {}", canon.display());
        ctx.cwd = canon;
        Ok(Captured::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cd_moves_and_returns() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let mut ctx = SessionContext::new(dir.path()).unwrap();

        CdCommand.execute(&argv(&["cd", "sub"]), &mut ctx).unwrap();
        assert_eq!(ctx.cwd, ctx.root.join("sub"));

        CdCommand.execute(&argv(&["cd"]), &mut ctx).unwrap();
        assert_eq!(ctx.cwd, ctx.root);
    }

    #[test]
    fn test_cd_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = SessionContext::new(dir.path()).unwrap();
        let err = CdCommand.execute(&argv(&["cd", "nowhere"]), &mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "cd: no such file or directory: nowhere");
        assert_eq!(ctx.cwd, ctx.root);
    }
}
