use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

use wrk_driver_core::prelude::WrkResult;

use crate::executable::Executable;

/// An external process that [crate::driver::RunDriver] knows how to run.
pub trait Process {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Work that has to be finished before the process can start, such as staging input files.
    fn prepare(&mut self) -> WrkResult<()> {
        Ok(())
    }

    /// The program to execute.
    fn resolved_executable(&self) -> Executable;

    /// The arguments that follow [Process::resolved_executable].
    fn resolved_arguments(&self) -> WrkResult<Vec<String>>;

    /// File that the process's stdout and stderr are captured into.
    fn log_file(&self) -> &Path;

    /// CPU list to pin the process to.
    fn cpu_range(&self) -> Option<&str> {
        None
    }

    /// How long the process is expected to run for, if known.
    fn planned_runtime(&self) -> Option<Duration> {
        None
    }
}

/// The result of running a [Process] to completion.
///
/// A non-zero exit, including a kill by the `timeout` wrapper, is reported here rather than as an
/// error. Deciding what that means is up to the caller.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub status: ExitStatus,
    pub elapsed: Duration,
    pub log_file: PathBuf,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Not set if the process was terminated by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        self.status.code()
    }
}
