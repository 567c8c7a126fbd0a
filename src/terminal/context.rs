use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const MAX_LINK_HOPS: usize = 40;

/// Per-session state: the sandbox root fixed at startup and the directory commands run in.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub root: PathBuf,
    pub cwd: PathBuf,
}

impl SessionContext {
    pub fn new(root: &Path) -> io::Result<Self> {
        let root = fs::canonicalize(root)?;
        Ok(Self { cwd: root.clone(), root })
    }

    pub fn from_current_dir() -> io::Result<Self> {
        Self::new(&std::env::current_dir()?)
    }

    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.cwd.join(p)
        }
    }

    /// Resolves symlinks where possible. A missing target keeps its missing
    /// components on top of the longest existing ancestor, canonicalized.
    pub fn canonical_path(&self, path: &str) -> PathBuf {
        canonicalize_lenient(&self.resolve_path(path), MAX_LINK_HOPS)
    }

    pub fn is_inside(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }
}

// Dangling symlinks are followed to where they would create their target.
fn canonicalize_lenient(path: &Path, hops: usize) -> PathBuf {
    let mut existing = path;
    let mut missing: Vec<&OsStr> = Vec::new();
    loop {
        if let Ok(canon) = fs::canonicalize(existing) {
            return rejoin(canon, &missing);
        }
        if hops > 0 && fs::symlink_metadata(existing).is_ok_and(|m| m.file_type().is_symlink()) {
            if let Ok(target) = fs::read_link(existing) {
                let target = match existing.parent() {
                    Some(parent) => parent.join(target),
                    None => target,
                };
                return rejoin(canonicalize_lenient(&target, hops - 1), &missing);
            }
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

fn rejoin(base: PathBuf, missing: &[&OsStr]) -> PathBuf {
    missing.iter().rev().fold(base, |acc, part| acc.join(part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = SessionContext::new(dir.path()).unwrap();
        assert_eq!(ctx.resolve_path("a/b"), ctx.root.join("a/b"));
        assert_eq!(ctx.resolve_path("/etc"), PathBuf::from("/etc"));
    }

    #[test]
    fn test_missing_file_keeps_canonical_parent() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = SessionContext::new(dir.path()).unwrap();
        assert_eq!(ctx.canonical_path("not_there.txt"), ctx.root.join("not_there.txt"));
        assert_eq!(ctx.canonical_path("a/b/c"), ctx.root.join("a/b/c"));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_dirs_below_symlink_follow_the_link() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let ctx = SessionContext::new(dir.path()).unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

        let target = fs::canonicalize(outside.path()).unwrap();
        assert_eq!(ctx.canonical_path("link/x/y"), target.join("x/y"));
        assert!(!ctx.is_inside(&ctx.canonical_path("link/x/y")));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_resolves_to_target() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let ctx = SessionContext::new(dir.path()).unwrap();
        std::os::unix::fs::symlink(outside.path().join("gone"), dir.path().join("dangling")).unwrap();

        let target = fs::canonicalize(outside.path()).unwrap();
        assert_eq!(ctx.canonical_path("dangling"), target.join("gone"));
    }

    #[test]
    fn test_containment_is_per_component() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = SessionContext::new(dir.path()).unwrap();
        let sibling = PathBuf::from(format!("{}2", ctx.root.display()));
        assert!(ctx.is_inside(&ctx.root));
        assert!(ctx.is_inside(&ctx.root.join("x")));
        assert!(!ctx.is_inside(&sibling));
    }
}
