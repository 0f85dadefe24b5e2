use std::cmp::min;
use std::fs::File;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::Context;
use itertools::Itertools;
use wrk_driver_core::prelude::WrkResult;

use crate::process::{Process, RunOutcome};
use crate::progress::planned_runtime_bar;

/// How often a running process is checked for exit while the progress bar is shown.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Runs a [Process] to completion, capturing its output into its log file.
///
/// Runs are synchronous: [RunDriver::run] returns once the process has exited, at which point the
/// log file is complete and can be parsed.
#[derive(Debug, Clone, Default)]
pub struct RunDriver {
    show_progress: bool,
}

impl RunDriver {
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }

    /// Prepare, start and wait for the process.
    ///
    /// Errors are only returned when the process could not be run at all. An unsuccessful exit
    /// is reported through [RunOutcome].
    pub fn run<P: Process>(&self, process: &mut P) -> WrkResult<RunOutcome> {
        process
            .prepare()
            .with_context(|| format!("Failed to prepare {}", process.name()))?;

        let executable = process.resolved_executable();
        let arguments = process.resolved_arguments()?;
        let log_file = process.log_file().to_path_buf();

        let command_line = executable.command_line(&arguments)?;
        let mut command = match process.cpu_range() {
            Some(cpu_range) => {
                let mut command = Command::new("taskset");
                command.arg("--cpu-list").arg(cpu_range).args(&command_line);
                command
            }
            None => executable.command(&arguments)?,
        };

        let log = File::create(&log_file)
            .with_context(|| format!("Failed to open log file '{}'", log_file.display()))?;
        command
            .stdin(Stdio::null())
            .stdout(log.try_clone().context("Failed to clone log file handle")?)
            .stderr(log);

        log::info!(
            "Running {}: {}",
            process.name(),
            command_line.iter().join(" ")
        );
        log::debug!("Capturing output of {} in {}", process.name(), log_file.display());

        let progress = match process.planned_runtime() {
            Some(planned_runtime) if self.show_progress => {
                Some((planned_runtime_bar(planned_runtime)?, planned_runtime))
            }
            _ => None,
        };

        let started = Instant::now();
        let mut child = command
            .spawn()
            .with_context(|| format!("Failed to start '{executable}'"))?;
        log::debug!("Running {} with PID: {pid}", process.name(), pid = child.id());

        let status = match progress {
            Some((pb, planned_runtime)) => {
                let status = loop {
                    if let Some(status) = child
                        .try_wait()
                        .with_context(|| format!("Failed to wait for '{executable}'"))?
                    {
                        break status;
                    }
                    pb.set_position(min(
                        started.elapsed().as_secs(),
                        planned_runtime.as_secs(),
                    ));
                    std::thread::sleep(POLL_INTERVAL);
                };
                pb.finish_and_clear();
                status
            }
            None => child
                .wait()
                .with_context(|| format!("Failed to wait for '{executable}'"))?,
        };
        let elapsed = started.elapsed();

        if status.success() {
            log::info!("{} finished in {:.2}s", process.name(), elapsed.as_secs_f64());
        } else {
            log::warn!(
                "{} exited unsuccessfully after {:.2}s: {status}",
                process.name(),
                elapsed.as_secs_f64()
            );
        }

        Ok(RunOutcome {
            status,
            elapsed,
            log_file,
        })
    }
}
