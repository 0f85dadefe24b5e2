use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a run of the tool.
///
/// Built once by the caller and only read while a run is in progress.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Path to the tool binary. For remote runs this is the path on the remote host.
    pub wrk: PathBuf,
    /// Host to run the tool on through `ssh`. Runs locally when not set.
    pub remote_wrk: Option<String>,
    /// Working directory on the remote host that the URL list is copied into.
    pub wrk_tmp_dir: PathBuf,
    /// Concurrency for the multi warmup and the benchmark.
    pub client_threads: u32,
    /// How long the benchmark runs for.
    pub wrk_duration: Duration,
    /// Hard limit enforced by the `timeout` wrapper.
    pub wrk_timeout: Duration,
    /// Run without the `timeout` wrapper and without a benchmark duration.
    pub no_time_limit: bool,
    /// Pin the tool to [RunOptions::helper_processors].
    pub cpu_bind: bool,
    /// CPU list handed to `taskset` when [RunOptions::cpu_bind] is set, e.g. `0-3`.
    pub helper_processors: Option<String>,
    /// Number of requests sent by the single warmup.
    pub warmup_requests: u32,
    /// Connections and threads used by the single warmup.
    pub warmup_concurrency: u32,
    /// Port substituted into the URL list and the target host.
    pub http_port: u16,
    /// Local directory for the log and staged URL files.
    pub temp_dir: PathBuf,
}

impl RunOptions {
    pub fn is_remote(&self) -> bool {
        self.remote_wrk.is_some()
    }

    /// The CPU list to bind the tool to, if binding is enabled.
    pub fn cpu_range(&self) -> Option<&str> {
        if self.cpu_bind {
            self.helper_processors.as_deref()
        } else {
            None
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            wrk: PathBuf::from("wrk"),
            remote_wrk: None,
            wrk_tmp_dir: PathBuf::from("/tmp"),
            client_threads: 200,
            wrk_duration: Duration::from_secs(60),
            wrk_timeout: Duration::from_secs(90),
            no_time_limit: false,
            cpu_bind: false,
            helper_processors: None,
            warmup_requests: 300,
            warmup_concurrency: 50,
            http_port: 8090,
            temp_dir: std::env::temp_dir(),
        }
    }
}
