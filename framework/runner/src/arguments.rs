use std::path::Path;
use std::time::Duration;

use wrk_driver_core::prelude::RequestMode;

use crate::options::RunOptions;

/// Signal sent by the `timeout` wrapper. 9 is `SIGKILL`, which the tool cannot handle.
pub const KILL_SIGNAL: &str = "--signal=9";

/// Per-run inputs to [build_arguments] that don't come from [RunOptions].
#[derive(Debug, Clone, Copy)]
pub struct ArgumentContext<'a> {
    /// The lua request script passed with `-s`.
    pub script: &'a str,
    /// Duration of a [RequestMode::WarmupMulti] run.
    pub time: Duration,
    /// The host URL that requests are sent to, e.g. `http://localhost:8090`.
    pub host: &'a str,
    /// The URL list as seen by the tool. For remote runs this must be the remote path.
    pub urls_file: &'a Path,
}

fn seconds(duration: Duration) -> String {
    duration.as_secs().to_string()
}

/// Build the command line arguments for a run, to follow the resolved executable.
///
/// When the time limit is enabled the arguments start with those of the `timeout` wrapper,
/// ending with the tool path so the wrapper knows what to execute.
pub fn build_arguments(
    mode: RequestMode,
    options: &RunOptions,
    context: &ArgumentContext<'_>,
) -> Vec<String> {
    let mut arguments = Vec::new();
    if !options.no_time_limit {
        arguments.extend([
            KILL_SIGNAL.to_string(),
            seconds(options.wrk_timeout),
            options.wrk.display().to_string(),
        ]);
    }

    match mode {
        RequestMode::Warmup => {
            let concurrency = options.warmup_concurrency.to_string();
            arguments.extend([
                "-c".to_string(),
                concurrency.clone(),
                "-t".to_string(),
                concurrency,
                "-r".to_string(),
                options.warmup_requests.to_string(),
                "-s".to_string(),
                context.script.to_string(),
            ]);
        }
        RequestMode::WarmupMulti => {
            arguments.extend([
                "-c".to_string(),
                options.client_threads.to_string(),
                "-d".to_string(),
                seconds(context.time),
                "-s".to_string(),
                context.script.to_string(),
            ]);
        }
        RequestMode::Benchmark => {
            let client_threads = options.client_threads.to_string();
            arguments.extend([
                "-c".to_string(),
                client_threads.clone(),
                "-t".to_string(),
                client_threads,
                "-s".to_string(),
                context.script.to_string(),
            ]);
            if !options.no_time_limit {
                arguments.extend(["-d".to_string(), seconds(options.wrk_duration)]);
            }
        }
    }

    arguments.extend([
        context.host.to_string(),
        "--".to_string(),
        context.urls_file.display().to_string(),
    ]);

    arguments
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    fn options(no_time_limit: bool) -> RunOptions {
        RunOptions {
            wrk: PathBuf::from("/opt/wrk/wrk"),
            client_threads: 200,
            wrk_duration: Duration::from_secs(30),
            wrk_timeout: Duration::from_secs(45),
            no_time_limit,
            warmup_requests: 300,
            warmup_concurrency: 10,
            ..Default::default()
        }
    }

    fn build(mode: RequestMode, options: &RunOptions) -> Vec<String> {
        build_arguments(
            mode,
            options,
            &ArgumentContext {
                script: "scripts/multi-request-txt.lua",
                time: Duration::from_secs(60),
                host: "http://localhost:8090",
                urls_file: Path::new("/tmp/urlsAbC123"),
            },
        )
    }

    #[test]
    fn test_should_build_warmup_arguments() {
        assert_eq!(
            build(RequestMode::Warmup, &options(false)),
            [
                "--signal=9",
                "45",
                "/opt/wrk/wrk",
                "-c",
                "10",
                "-t",
                "10",
                "-r",
                "300",
                "-s",
                "scripts/multi-request-txt.lua",
                "http://localhost:8090",
                "--",
                "/tmp/urlsAbC123",
            ]
        );
    }

    #[test]
    fn test_should_build_warmup_multi_arguments() {
        assert_eq!(
            build(RequestMode::WarmupMulti, &options(true)),
            [
                "-c",
                "200",
                "-d",
                "60",
                "-s",
                "scripts/multi-request-txt.lua",
                "http://localhost:8090",
                "--",
                "/tmp/urlsAbC123",
            ]
        );
    }

    #[test]
    fn test_should_build_benchmark_arguments() {
        assert_eq!(
            build(RequestMode::Benchmark, &options(false)),
            [
                "--signal=9",
                "45",
                "/opt/wrk/wrk",
                "-c",
                "200",
                "-t",
                "200",
                "-s",
                "scripts/multi-request-txt.lua",
                "-d",
                "30",
                "http://localhost:8090",
                "--",
                "/tmp/urlsAbC123",
            ]
        );
    }

    #[test]
    fn test_should_only_prefix_timeout_arguments_with_time_limit() {
        for mode in RequestMode::ALL {
            let limited = build(mode, &options(false));
            assert_eq!(limited[0], KILL_SIGNAL);

            let unlimited = build(mode, &options(true));
            assert!(!unlimited.iter().any(|arg| arg == KILL_SIGNAL));
            assert_eq!(unlimited[0], "-c");
        }
    }

    #[test]
    fn test_should_set_duration_per_mode() {
        let has_duration = |args: Vec<String>| args.iter().any(|arg| arg == "-d");

        assert!(!has_duration(build(RequestMode::Warmup, &options(false))));
        assert!(!has_duration(build(RequestMode::Warmup, &options(true))));
        assert!(has_duration(build(RequestMode::WarmupMulti, &options(false))));
        assert!(has_duration(build(RequestMode::WarmupMulti, &options(true))));
        assert!(has_duration(build(RequestMode::Benchmark, &options(false))));
        assert!(!has_duration(build(RequestMode::Benchmark, &options(true))));
    }
}
