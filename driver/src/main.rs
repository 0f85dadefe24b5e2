#[macro_use]
extern crate log;

use anyhow::Context;
use chrono::Utc;
use wrk_driver_runner::prelude::{init, RequestMode, RunDriver, Wrk};
use wrk_driver_stats::prelude::{append_stats_record, collect_stats, StatsRecord};

const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    let cli = init();
    info!("{CRATE_NAME} {CRATE_VERSION}");

    let options = cli.run_options()?;
    let target = cli.target();
    let naming = cli.log_naming();
    let driver = RunDriver::new(!cli.no_progress);

    match &options.remote_wrk {
        Some(host) => info!("Running {} on {host}", options.wrk.display()),
        None => info!("Running {}", options.wrk.display()),
    }
    info!("Using URL list: {}", target.urls_file().display());

    let mut benchmark = None;
    for &mode in &cli.phases {
        let mut wrk = Wrk::new(&options, target.clone(), mode, &naming)?
            .with_time(cli.warmup_multi_time())
            .with_script(cli.script.as_str());

        let started_at = Utc::now().timestamp();
        let outcome = driver.run(&mut wrk)?;
        debug!("Output of {mode} is in {}", outcome.log_file.display());

        if mode == RequestMode::Benchmark {
            benchmark = Some((wrk, outcome, started_at));
        }
    }

    let Some((wrk, outcome, started_at)) = benchmark else {
        info!("No benchmark phase selected, not collecting stats");
        return Ok(());
    };

    // A killed or failed run may still have printed a full report, so let the stats decide.
    let stats = collect_stats(wrk.log_file_path()).with_context(|| {
        format!(
            "Failed to collect benchmark stats (wrk exited with {})",
            outcome.status
        )
    })?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    if let Some(summary_file) = &cli.summary_file {
        let record = StatsRecord::new(
            nanoid::nanoid!(),
            wrk.mode(),
            started_at,
            outcome.exit_code(),
            stats,
        );
        append_stats_record(&record, summary_file).with_context(|| {
            format!("Failed to append stats to '{}'", summary_file.display())
        })?;
        info!("Appended stats for run {} to {}", record.run_id, summary_file.display());
    }

    Ok(())
}
