use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use wrk_driver_core::prelude::{RequestMode, WrkResult};

use crate::log_naming::LogNaming;
use crate::options::RunOptions;
use crate::target::Target;
use crate::wrk::DEFAULT_SCRIPT;
use crate::wrk_binary::wrk_path;

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
pub struct WrkDriverCli {
    /// File of request URLs to send load at.
    ///
    /// `__HTTP_HOST__` and `__HTTP_PORT__` in the file are replaced before the tool reads it.
    #[arg(long)]
    pub urls_file: PathBuf,

    /// Path to the wrk binary.
    ///
    /// For local runs this defaults to `WRK_PATH`, or `wrk` from the user's `PATH`. For remote
    /// runs it is the path on the remote host and defaults to `wrk`.
    #[arg(long)]
    pub wrk: Option<PathBuf>,

    /// Run wrk on this host through `ssh` instead of locally.
    #[arg(long, env = "WRK_REMOTE_HOST")]
    pub remote_host: Option<String>,

    /// Directory on the remote host to copy the URL list into.
    #[arg(long, default_value = "/tmp")]
    pub remote_dir: PathBuf,

    /// The phases to run, in order. Separate multiple phases with a comma.
    #[arg(long, value_delimiter = ',', default_values_t = RequestMode::ALL.to_vec())]
    pub phases: Vec<RequestMode>,

    /// Connections and threads for the multi warmup and the benchmark.
    #[arg(long, default_value_t = 200)]
    pub client_threads: u32,

    /// The number of seconds to run the benchmark for.
    #[arg(long, default_value_t = 60)]
    pub duration: u64,

    /// The number of seconds to run the multi warmup for.
    #[arg(long, default_value_t = 60)]
    pub warmup_multi_duration: u64,

    /// Kill wrk after this many seconds.
    ///
    /// wrk is not trusted to stop itself at the end of its duration, so this should be a little
    /// longer than the longest phase.
    #[arg(long, default_value_t = 90)]
    pub timeout: u64,

    /// Run without the `timeout` wrapper and without a benchmark duration.
    #[arg(long, default_value = "false")]
    pub no_time_limit: bool,

    /// Number of requests sent by the single warmup.
    #[arg(long, default_value_t = 300)]
    pub warmup_requests: u32,

    /// Connections and threads for the single warmup.
    #[arg(long, default_value_t = 50)]
    pub warmup_concurrency: u32,

    /// Pin wrk to the CPUs in `--helper-processors` with `taskset`.
    #[arg(long, default_value = "false", requires = "helper_processors")]
    pub cpu_bind: bool,

    /// CPU list for `--cpu-bind`, in `taskset` format, e.g. `0-3,8`.
    #[arg(long)]
    pub helper_processors: Option<String>,

    /// Port of the server under test.
    #[arg(long, default_value_t = 8090)]
    pub http_port: u16,

    /// The lua request script passed to wrk.
    #[arg(long, default_value = DEFAULT_SCRIPT)]
    pub script: String,

    /// Directory for the log and URL list files.
    #[arg(long, env = "WRK_TMP_DIR", default_value_os_t = std::env::temp_dir())]
    pub temp_dir: PathBuf,

    /// Log file prefix for the single warmup.
    #[arg(long, default_value = "wrk_warmup")]
    pub warmup_log_prefix: String,

    /// Log file prefix for the multi warmup.
    #[arg(long, default_value = "wrk_warmup")]
    pub warmup_multi_log_prefix: String,

    /// Log file prefix for the benchmark.
    #[arg(long, default_value = "wrk")]
    pub benchmark_log_prefix: String,

    /// Append the benchmark stats to this file, one JSON object per line.
    #[arg(long, env = "WRK_SUMMARY_PATH")]
    pub summary_file: Option<PathBuf>,

    /// Do not show a progress bar on the CLI.
    ///
    /// This is recommended for CI/CD environments where the progress bar isn't being looked at by anyone and is just adding noise to the logs.
    #[arg(long, default_value = "false")]
    pub no_progress: bool,
}

impl WrkDriverCli {
    pub fn run_options(&self) -> WrkResult<RunOptions> {
        let wrk = match (&self.wrk, &self.remote_host) {
            (Some(wrk), _) => wrk.clone(),
            (None, Some(_)) => PathBuf::from("wrk"),
            (None, None) => wrk_path()?,
        };

        Ok(RunOptions {
            wrk,
            remote_wrk: self.remote_host.clone(),
            wrk_tmp_dir: self.remote_dir.clone(),
            client_threads: self.client_threads,
            wrk_duration: Duration::from_secs(self.duration),
            wrk_timeout: Duration::from_secs(self.timeout),
            no_time_limit: self.no_time_limit,
            cpu_bind: self.cpu_bind,
            helper_processors: self.helper_processors.clone(),
            warmup_requests: self.warmup_requests,
            warmup_concurrency: self.warmup_concurrency,
            http_port: self.http_port,
            temp_dir: self.temp_dir.clone(),
        })
    }

    pub fn target(&self) -> Target {
        Target::new(&self.urls_file)
    }

    pub fn log_naming(&self) -> LogNaming {
        LogNaming {
            warmup: self.warmup_log_prefix.clone(),
            warmup_multi: self.warmup_multi_log_prefix.clone(),
            benchmark: self.benchmark_log_prefix.clone(),
        }
    }

    pub fn warmup_multi_time(&self) -> Duration {
        Duration::from_secs(self.warmup_multi_duration)
    }
}
