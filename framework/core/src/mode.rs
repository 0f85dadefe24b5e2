use std::{fmt, str::FromStr};

use crate::contract::ContractViolation;

/// The load phase that a single run of the tool belongs to.
///
/// The mode decides the shape of the tool's command line. There are no other phases, so every
/// `match` on this type is exhaustive and an unmodelled mode is caught at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMode {
    /// Low concurrency run bounded by a fixed request count.
    Warmup,
    /// Full concurrency run bounded by a duration.
    WarmupMulti,
    /// The timed, measured run whose stats are reported.
    Benchmark,
}

impl RequestMode {
    /// Every mode, in the order a harness runs them.
    pub const ALL: [RequestMode; 3] = [
        RequestMode::Warmup,
        RequestMode::WarmupMulti,
        RequestMode::Benchmark,
    ];
}

impl FromStr for RequestMode {
    type Err = ContractViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warmup" => Ok(RequestMode::Warmup),
            "warmup-multi" => Ok(RequestMode::WarmupMulti),
            "benchmark" => Ok(RequestMode::Benchmark),
            other => Err(ContractViolation::new(format!(
                "Unexpected request mode: {other}"
            ))),
        }
    }
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestMode::Warmup => write!(f, "warmup"),
            RequestMode::WarmupMulti => write!(f, "warmup-multi"),
            RequestMode::Benchmark => write!(f, "benchmark"),
        }
    }
}
