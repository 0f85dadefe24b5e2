use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use wrk_driver_core::prelude::{ContractViolation, RequestMode, WrkResult};

use crate::arguments::{build_arguments, ArgumentContext};
use crate::executable::{resolve_executable, Executable};
use crate::log_naming::LogNaming;
use crate::options::RunOptions;
use crate::process::Process;
use crate::staging::{stage_urls, target_host, StagedUrls};
use crate::target::Target;

/// Default duration of a [RequestMode::WarmupMulti] run.
pub const DEFAULT_TIME: Duration = Duration::from_secs(60);

/// Default request script.
pub const DEFAULT_SCRIPT: &str = "scripts/multi-request-txt.lua";

/// A single run of the tool in one [RequestMode].
///
/// The log file is created with the run and belongs to it. Every run has its own log and URL list
/// files, so separate runs can execute at the same time.
#[derive(Debug)]
pub struct Wrk {
    name: String,
    options: RunOptions,
    target: Target,
    mode: RequestMode,
    time: Duration,
    script: String,
    log_file: PathBuf,
    staged: Option<StagedUrls>,
}

impl Wrk {
    pub fn new(
        options: &RunOptions,
        target: Target,
        mode: RequestMode,
        naming: &LogNaming,
    ) -> WrkResult<Self> {
        let (_, log_file) = tempfile::Builder::new()
            .prefix(naming.prefix(mode))
            .tempfile_in(&options.temp_dir)
            .and_then(|file| file.keep().map_err(|e| e.error))
            .with_context(|| {
                format!(
                    "Failed to create log file in '{}'",
                    options.temp_dir.display()
                )
            })?;

        Ok(Self {
            name: format!("wrk {mode}"),
            options: options.clone(),
            target,
            mode,
            time: DEFAULT_TIME,
            script: DEFAULT_SCRIPT.to_string(),
            log_file,
            staged: None,
        })
    }

    /// Set the duration of a [RequestMode::WarmupMulti] run.
    pub fn with_time(mut self, time: Duration) -> Self {
        self.time = time;
        self
    }

    /// Set the request script.
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    pub fn mode(&self) -> RequestMode {
        self.mode
    }

    /// The file capturing the tool's output. Only parse it once the run has finished.
    pub fn log_file_path(&self) -> &Path {
        &self.log_file
    }

    /// The staged URL list, once [Process::prepare] has run.
    pub fn staged_urls(&self) -> Option<&StagedUrls> {
        self.staged.as_ref()
    }
}

impl Process for Wrk {
    fn name(&self) -> &str {
        &self.name
    }

    fn prepare(&mut self) -> WrkResult<()> {
        self.staged = Some(stage_urls(&self.options, &self.target)?);
        Ok(())
    }

    fn resolved_executable(&self) -> Executable {
        resolve_executable(
            self.options.remote_wrk.as_deref(),
            self.options.no_time_limit,
            &self.options.wrk,
        )
    }

    fn resolved_arguments(&self) -> WrkResult<Vec<String>> {
        let staged = self.staged.as_ref().ok_or_else(|| {
            ContractViolation::new("Tried to get wrk arguments before staging the URL list")
        })?;
        let host = target_host(&self.options);

        Ok(build_arguments(
            self.mode,
            &self.options,
            &ArgumentContext {
                script: &self.script,
                time: self.time,
                host: &host,
                urls_file: staged.tool_path(),
            },
        ))
    }

    fn log_file(&self) -> &Path {
        &self.log_file
    }

    fn cpu_range(&self) -> Option<&str> {
        self.options.cpu_range()
    }

    fn planned_runtime(&self) -> Option<Duration> {
        match self.mode {
            RequestMode::Warmup => None,
            RequestMode::WarmupMulti => Some(self.time),
            RequestMode::Benchmark if self.options.no_time_limit => None,
            RequestMode::Benchmark => Some(self.options.wrk_duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::staging::remote_path;

    fn options(temp: &TempDir) -> RunOptions {
        RunOptions {
            temp_dir: temp.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_should_create_log_file_with_mode_prefix() {
        let temp = TempDir::new().unwrap();
        let naming = LogNaming::default();

        let benchmark = Wrk::new(
            &options(&temp),
            Target::new("urls.txt"),
            RequestMode::Benchmark,
            &naming,
        )
        .unwrap();
        let warmup = Wrk::new(
            &options(&temp),
            Target::new("urls.txt"),
            RequestMode::Warmup,
            &naming,
        )
        .unwrap();

        assert!(benchmark.log_file_path().exists());
        assert!(benchmark.log_file_path().starts_with(temp.path()));
        let name = |wrk: &Wrk| {
            wrk.log_file_path()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .to_string()
        };
        assert!(name(&benchmark).starts_with("wrk"));
        assert!(!name(&benchmark).starts_with("wrk_warmup"));
        assert!(name(&warmup).starts_with("wrk_warmup"));
        assert_ne!(benchmark.log_file_path(), warmup.log_file_path());
    }

    #[test]
    fn test_should_not_resolve_arguments_before_staging() {
        let temp = TempDir::new().unwrap();
        let wrk = Wrk::new(
            &options(&temp),
            Target::new("urls.txt"),
            RequestMode::Benchmark,
            &LogNaming::default(),
        )
        .unwrap();

        let err = wrk.resolved_arguments().unwrap_err();
        assert!(err.is::<ContractViolation>());
    }

    #[test]
    fn test_should_resolve_arguments_with_staged_urls() {
        let temp = TempDir::new().unwrap();
        let urls_file = temp.path().join("urls.txt");
        std::fs::write(&urls_file, "http://__HTTP_HOST__:__HTTP_PORT__/\n").unwrap();

        let mut wrk = Wrk::new(
            &RunOptions {
                no_time_limit: true,
                client_threads: 8,
                ..options(&temp)
            },
            Target::new(&urls_file),
            RequestMode::Benchmark,
            &LogNaming::default(),
        )
        .unwrap()
        .with_script("scripts/single.lua");
        wrk.prepare().unwrap();

        let staged = wrk.staged_urls().unwrap().local_path().display().to_string();
        assert_eq!(
            wrk.resolved_arguments().unwrap(),
            [
                "-c",
                "8",
                "-t",
                "8",
                "-s",
                "scripts/single.lua",
                "http://localhost:8090",
                "--",
                staged.as_str(),
            ]
        );
    }

    #[test]
    fn test_should_resolve_remote_urls_path_for_remote_run() {
        let temp = TempDir::new().unwrap();
        let options = RunOptions {
            remote_wrk: Some("loadgen-1".to_string()),
            wrk_tmp_dir: PathBuf::from("/home/bench/tmp"),
            ..options(&temp)
        };
        let mut wrk = Wrk::new(
            &options,
            Target::new("urls.txt"),
            RequestMode::Benchmark,
            &LogNaming::default(),
        )
        .unwrap();
        let local = temp.path().join("urlsAbC123");
        let remote = remote_path(&options.wrk_tmp_dir, &local).unwrap();
        wrk.staged = Some(StagedUrls::new(local, Some(remote)));

        let arguments = wrk.resolved_arguments().unwrap();

        assert_eq!(wrk.resolved_executable().to_string(), "ssh loadgen-1 timeout");
        assert_eq!(
            arguments.last().map(String::as_str),
            Some("/home/bench/tmp/urlsAbC123")
        );
        assert!(!arguments
            .iter()
            .any(|arg| arg.starts_with(&temp.path().display().to_string())));
    }

    #[test]
    fn test_should_plan_runtime_per_mode() {
        let temp = TempDir::new().unwrap();
        let wrk = |mode, no_time_limit| {
            Wrk::new(
                &RunOptions {
                    no_time_limit,
                    wrk_duration: Duration::from_secs(30),
                    ..options(&temp)
                },
                Target::new("urls.txt"),
                mode,
                &LogNaming::default(),
            )
            .unwrap()
            .with_time(Duration::from_secs(20))
        };

        assert_eq!(wrk(RequestMode::Warmup, false).planned_runtime(), None);
        assert_eq!(
            wrk(RequestMode::WarmupMulti, false).planned_runtime(),
            Some(Duration::from_secs(20))
        );
        assert_eq!(
            wrk(RequestMode::Benchmark, false).planned_runtime(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(wrk(RequestMode::Benchmark, true).planned_runtime(), None);
    }
}
