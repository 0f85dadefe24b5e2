use std::fmt;
use std::iter;
use std::path::Path;
use std::process::Command;

use anyhow::Context;
use wrk_driver_core::prelude::WrkResult;

/// Program that wraps the tool to enforce the time limit.
pub const TIMEOUT_PROGRAM: &str = "timeout";

/// Program used to run the tool on a remote host.
pub const SSH_PROGRAM: &str = "ssh";

/// The program to execute for a run, either on this machine or on a remote host through `ssh`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    remote_host: Option<String>,
    program: String,
}

impl Executable {
    fn new(program: impl Into<String>) -> Self {
        Self {
            remote_host: None,
            program: program.into(),
        }
    }

    fn over_ssh(remote_host: &str, program: impl Into<String>) -> Self {
        Self {
            remote_host: Some(remote_host.to_string()),
            program: program.into(),
        }
    }

    /// The program started on this machine.
    pub fn program(&self) -> &str {
        match self.remote_host {
            Some(_) => SSH_PROGRAM,
            None => &self.program,
        }
    }

    pub fn remote_host(&self) -> Option<&str> {
        self.remote_host.as_deref()
    }

    /// The full command line for a run, starting with [Executable::program].
    ///
    /// For remote runs the remote program and its arguments are shell-quoted into a single
    /// argument to `ssh`, so the remote shell sees exactly the arguments given here.
    pub fn command_line(&self, arguments: &[String]) -> WrkResult<Vec<String>> {
        let Some(remote_host) = &self.remote_host else {
            return Ok(iter::once(self.program.clone())
                .chain(arguments.iter().cloned())
                .collect());
        };

        let remote_command = shlex::try_join(
            iter::once(self.program.as_str()).chain(arguments.iter().map(String::as_str)),
        )
        .with_context(|| format!("Failed to quote command for '{remote_host}'"))?;

        Ok(vec![
            SSH_PROGRAM.to_string(),
            remote_host.clone(),
            remote_command,
        ])
    }

    /// A [Command] for [Executable::command_line].
    pub fn command(&self, arguments: &[String]) -> WrkResult<Command> {
        let command_line = self.command_line(arguments)?;
        let mut command = Command::new(&command_line[0]);
        command.args(&command_line[1..]);
        Ok(command)
    }
}

impl fmt::Display for Executable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.remote_host {
            Some(remote_host) => write!(f, "{SSH_PROGRAM} {remote_host} {}", self.program),
            None => write!(f, "{}", self.program),
        }
    }
}

/// Decide what to execute for a run.
///
/// Unless the time limit is disabled the tool is started through [TIMEOUT_PROGRAM]. The tool logs
/// from its signal handlers, which are not signal safe, so relying on its own `-d` to stop it can
/// hang the process. The wrapper kills it instead. This holds for local and remote runs.
pub fn resolve_executable(
    remote_host: Option<&str>,
    no_time_limit: bool,
    wrk: &Path,
) -> Executable {
    let wrk = wrk.display().to_string();
    match (remote_host, no_time_limit) {
        (None, false) => Executable::new(TIMEOUT_PROGRAM),
        (None, true) => Executable::new(wrk),
        (Some(host), false) => Executable::over_ssh(host, TIMEOUT_PROGRAM),
        (Some(host), true) => Executable::over_ssh(host, wrk),
    }
}
