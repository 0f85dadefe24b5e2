use std::io::{BufRead, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use wrk_driver_core::prelude::RequestMode;

use crate::normalize::NormalizedStats;

/// Stats of one run of the tool, as stored in a summary file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsRecord {
    /// Unique id of the run, chosen by the driver.
    pub run_id: String,
    /// The request mode that was run, e.g. `benchmark`.
    pub mode: String,
    /// The time the run started.
    ///
    /// This is a Unix timestamp in seconds.
    pub started_at: i64,
    /// Exit code of the tool, or of the wrapper that ran it.
    ///
    /// Not set if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stats: NormalizedStats,
}

impl StatsRecord {
    pub fn new(
        run_id: String,
        mode: RequestMode,
        started_at: i64,
        exit_code: Option<i32>,
        stats: NormalizedStats,
    ) -> Self {
        Self {
            run_id,
            mode: mode.to_string(),
            started_at,
            exit_code,
            stats,
        }
    }
}

/// Append the record to a file
///
/// The record will be serialized to JSON and output as a single line followed by a newline. The
/// recommended file extension is `.jsonl`.
pub fn append_stats_record(record: &StatsRecord, path: &Path) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    store_stats_record(record, &mut file)?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Serialize the record to a writer
pub fn store_stats_record<W: Write>(record: &StatsRecord, writer: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer(writer, record)?;
    Ok(())
}

/// Load records from a reader, one JSON object per line.
///
/// This is the format produced by [append_stats_record]. Blank lines are ignored.
pub fn load_stats_records<R: Read>(reader: R) -> anyhow::Result<Vec<StatsRecord>> {
    let reader = std::io::BufReader::new(reader);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}
