use std::io;
use std::time::Duration;
use thiserror::Error;

/// Why the validator refused to run a command tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("invalid command")]
    InvalidCommand,
    #[error("command '{0}' is not allowed")]
    CommandNotAllowed(String),
    #[error("unsafe arguments detected: {}", .0.join(", "))]
    UnsafeArguments(Vec<String>),
    #[error("path traversal not allowed")]
    PathTraversal,
    #[error("path is outside allowed directory")]
    OutsideSandbox,
}

/// Failures while running a validated command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("command not found: {0}")]
    NotFound(String),
    #[error("failed to execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{}", exit_message(.code, .stderr))]
    ExitStatus {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    #[error("'{program}' timed out after {}s", .after.as_secs())]
    TimedOut { program: String, after: Duration },
    #[error("{0}")]
    Builtin(String),
}

fn exit_message(code: &Option<i32>, stderr: &str) -> String {
    let trimmed = stderr.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    match code {
        Some(c) => format!("exited with status {}", c),
        None => "terminated by signal".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("no API key found in ${0}")]
    MissingApiKey(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("suggestion API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_status_prefers_stderr() {
        let err = ExecError::ExitStatus {
            code: Some(2),
            stdout: String::new(),
            stderr: "ls: nope\n".to_string(),
        };
        assert_eq!(err.to_string(), "ls: nope");

        let err = ExecError::ExitStatus { code: Some(1), stdout: String::new(), stderr: String::new() };
        assert_eq!(err.to_string(), "exited with status 1");
    }

    #[test]
    fn unsafe_arguments_lists_offenders() {
        let r = Rejection::UnsafeArguments(vec!["-rf".to_string(), "sudo".to_string()]);
        assert_eq!(r.to_string(), "unsafe arguments detected: -rf, sudo");
    }
}
