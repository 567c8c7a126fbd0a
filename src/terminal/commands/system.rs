// System command
use crate::config::ExecutorConfig;
use crate::error::ExecError;
use crate::terminal::commands::{Captured, Executable};
use crate::terminal::context::SessionContext;
use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use wait_timeout::ChildExt;

#[derive(Debug, Clone)]
pub enum ProgramLookup {
    /// Only these directories are searched.
    Trusted(Vec<PathBuf>),
    /// Whatever `PATH` the terminal was started with.
    HostPath,
}

#[derive(Debug, Clone)]
pub struct SystemCommand {
    pub lookup: ProgramLookup,
    pub timeout: Option<Duration>,
}

impl SystemCommand {
    pub fn from_config(config: &ExecutorConfig) -> Self {
        let lookup = if config.inherit_path {
            ProgramLookup::HostPath
        } else {
            ProgramLookup::Trusted(config.search_path.clone())
        };
        Self {
            lookup,
            timeout: config.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
        }
    }

    fn resolve(&self, program: &str, cwd: &Path) -> Result<PathBuf, ExecError> {
        let found = match &self.lookup {
            ProgramLookup::HostPath => which::which_in(program, env::var_os("PATH"), cwd),
            ProgramLookup::Trusted(dirs) => {
                let joined = env::join_paths(dirs).map_err(|e| ExecError::Spawn {
                    program: program.to_string(),
                    source: io::Error::new(io::ErrorKind::InvalidInput, e),
                })?;
                which::which_in(program, Some(joined), cwd)
            }
        };
        found.map_err(|_| ExecError::NotFound(program.to_string()))
    }
}

fn drain<R: Read + Send + 'static>(source: Option<R>) -> Option<JoinHandle<String>> {
    source.map(|mut reader| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).ok();
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

impl Executable for SystemCommand {
    fn execute(&self, args: &[String], ctx: &mut SessionContext) -> Result<Captured, ExecError> {
        let Some((program, cmd_args)) = args.split_first() else {
            return Ok(Captured::default());
        };
        let binary = self.resolve(program, &ctx.cwd)?;
        let spawn_err = |source: io::Error| ExecError::Spawn { program: program.clone(), source };

        let mut child = Command::new(&binary)
            .args(cmd_args)
            .current_dir(&ctx.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        // Both pipes are drained on their own threads so a chatty child cannot block on a full pipe.
        let stdout_thread = drain(child.stdout.take());
        let stderr_thread = drain(child.stderr.take());

        let status = match self.timeout {
            Some(limit) => match child.wait_timeout(limit).map_err(spawn_err)? {
                Some(status) => status,
                None => {
                    child.kill().ok();
                    child.wait().ok();
                    // A surviving grandchild may still hold the pipes, so the readers are left detached.
                    return Err(ExecError::TimedOut { program: program.clone(), after: limit });
                }
            },
            None => child.wait().map_err(spawn_err)?,
        };

        let stdout = collect(stdout_thread);
        let stderr = collect(stderr_thread);

        if status.success() {
            Ok(Captured { stdout, stderr })
        } else {
            Err(ExecError::ExitStatus { code: status.code(), stdout, stderr })
        }
    }
}
