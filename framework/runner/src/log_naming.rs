use wrk_driver_core::prelude::RequestMode;

/// Prefixes for the log file names of each request mode.
///
/// By default only the benchmark gets its own prefix and both warmups share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogNaming {
    pub warmup: String,
    pub warmup_multi: String,
    pub benchmark: String,
}

impl Default for LogNaming {
    fn default() -> Self {
        Self {
            warmup: "wrk_warmup".to_string(),
            warmup_multi: "wrk_warmup".to_string(),
            benchmark: "wrk".to_string(),
        }
    }
}

impl LogNaming {
    pub fn prefix(&self, mode: RequestMode) -> &str {
        match mode {
            RequestMode::Warmup => &self.warmup,
            RequestMode::WarmupMulti => &self.warmup_multi,
            RequestMode::Benchmark => &self.benchmark,
        }
    }
}
