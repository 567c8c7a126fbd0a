use crate::error::Rejection;
use crate::terminal::ast::{CommandName, CommandNode, Program};
use crate::terminal::context::SessionContext;
use log::warn;

const FORK_BOMB: &str = ":(){:|:&};:";

/// Arguments refused for every command.
const DENIED_EVERYWHERE: &[&str] = &["sudo", FORK_BOMB];

fn is_allowed(program: Program) -> bool {
    match program {
        Program::Ls
        | Program::Cd
        | Program::Mkdir
        | Program::Rm
        | Program::Pwd
        | Program::Echo
        | Program::Cat
        | Program::Cp
        | Program::Mv
        | Program::Touch => true,
        Program::Rmdir => false,
    }
}

fn dangerous_args(program: Program) -> &'static [&'static str] {
    match program {
        Program::Rm => &["-rf", "rf", "-r", "f"],
        _ => &[],
    }
}

pub fn validate(tree: Option<&CommandNode>, ctx: &SessionContext) -> Result<(), Rejection> {
    let result = check(tree, ctx);
    if let Err(reason) = &result {
        warn!("Rejected {:?}: {}", tree.map(CommandNode::argv), reason);
    }
    result
}

fn check(tree: Option<&CommandNode>, ctx: &SessionContext) -> Result<(), Rejection> {
    let tree = tree.ok_or(Rejection::InvalidCommand)?;

    let program = match &tree.name {
        CommandName::Known(p) if is_allowed(*p) => *p,
        other => return Err(Rejection::CommandNotAllowed(other.as_str().to_lowercase())),
    };

    let denied = dangerous_args(program);
    let mut offending: Vec<String> = Vec::new();
    for arg in tree.args() {
        let lower = arg.to_lowercase();
        let hit = denied.contains(&lower.as_str()) || DENIED_EVERYWHERE.contains(&lower.as_str());
        if hit && !offending.contains(&lower) {
            offending.push(lower);
        }
    }
    if !offending.is_empty() {
        return Err(Rejection::UnsafeArguments(offending));
    }

    if tree.args().any(|a| a.contains("..") || a.contains('~')) {
        return Err(Rejection::PathTraversal);
    }

    for arg in tree.args() {
        let resolved = ctx.canonical_path(arg);
        if !ctx.is_inside(&resolved) {
            return Err(Rejection::OutsideSandbox);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sandbox() -> (tempfile::TempDir, SessionContext) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = SessionContext::new(dir.path()).unwrap();
        (dir, ctx)
    }

    fn tree(name: &str, args: &[&str]) -> CommandNode {
        CommandNode::with_args(name, args.iter().copied())
    }

    #[test]
    fn test_missing_tree() {
        let (_dir, ctx) = sandbox();
        assert_eq!(validate(None, &ctx), Err(Rejection::InvalidCommand));
    }

    #[test]
    fn test_command_not_allowed() {
        let (_dir, ctx) = sandbox();
        for args in [&[][..], &["http://example.com"][..], &["-O", "x"][..]] {
            assert_eq!(
                validate(Some(&tree("wget", args)), &ctx),
                Err(Rejection::CommandNotAllowed("wget".to_string()))
            );
        }
        assert_eq!(
            validate(Some(&tree("rmdir", &["x"])), &ctx),
            Err(Rejection::CommandNotAllowed("rmdir".to_string()))
        );
    }

    #[test]
    fn test_rm_dangerous_flags() {
        let (_dir, ctx) = sandbox();
        let res = validate(Some(&tree("rm", &["notes.txt", "-RF", "other"])), &ctx);
        assert_eq!(res, Err(Rejection::UnsafeArguments(vec!["-rf".to_string()])));

        let res = validate(Some(&tree("rm", &["-r", "f"])), &ctx);
        assert_eq!(res, Err(Rejection::UnsafeArguments(vec!["-r".to_string(), "f".to_string()])));
    }

    #[test]
    fn test_denied_for_every_command() {
        let (_dir, ctx) = sandbox();
        assert_eq!(
            validate(Some(&tree("echo", &["sudo"])), &ctx),
            Err(Rejection::UnsafeArguments(vec!["sudo".to_string()]))
        );
        // -rf is only dangerous for rm.
        assert_eq!(validate(Some(&tree("ls", &["-rf"])), &ctx), Ok(()));
    }

    #[test]
    fn test_traversal_checked_before_sandbox() {
        let (_dir, ctx) = sandbox();
        assert_eq!(validate(Some(&tree("cat", &["../secret"])), &ctx), Err(Rejection::PathTraversal));
        assert_eq!(validate(Some(&tree("ls", &["~/etc"])), &ctx), Err(Rejection::PathTraversal));
        // An earlier out-of-sandbox argument does not mask a later traversal.
        assert_eq!(
            validate(Some(&tree("cat", &["/etc/passwd", "../secret"])), &ctx),
            Err(Rejection::PathTraversal)
        );
    }

    #[test]
    fn test_outside_sandbox() {
        let (_dir, ctx) = sandbox();
        assert_eq!(validate(Some(&tree("cat", &["/etc/passwd"])), &ctx), Err(Rejection::OutsideSandbox));
    }

    #[test]
    fn test_inside_sandbox_accepted() {
        let (dir, ctx) = sandbox();
        fs::create_dir(dir.path().join("src")).unwrap();
        let abs = ctx.root.join("src").to_string_lossy().into_owned();
        assert_eq!(validate(Some(&tree("ls", &["-l", "src", &abs])), &ctx), Ok(()));
        assert_eq!(validate(Some(&tree("mkdir", &["new_dir"])), &ctx), Ok(()));
        assert_eq!(validate(Some(&tree("pwd", &[])), &ctx), Ok(()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_rejected() {
        let (dir, ctx) = sandbox();
        std::os::unix::fs::symlink("/etc", dir.path().join("link")).unwrap();
        assert_eq!(validate(Some(&tree("ls", &["link"])), &ctx), Err(Rejection::OutsideSandbox));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_below_missing_dirs() {
        let (dir, ctx) = sandbox();
        let outside = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();
        assert_eq!(
            validate(Some(&tree("mkdir", &["-p", "link/x/y"])), &ctx),
            Err(Rejection::OutsideSandbox)
        );

        std::os::unix::fs::symlink(outside.path().join("gone"), dir.path().join("dangling")).unwrap();
        assert_eq!(validate(Some(&tree("touch", &["dangling"])), &ctx), Err(Rejection::OutsideSandbox));
    }
}
