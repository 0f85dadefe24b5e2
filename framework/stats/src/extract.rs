use std::collections::BTreeMap;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use crate::number::Number;

/// Stats pulled out of a log, keyed by the trimmed label the tool printed.
pub type RawStats = BTreeMap<String, Number>;

/// A `label: number` line. The label is letters, digits and spaces.
static STAT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9A-Za-z ]+)\s*:\s*([0-9.]+)").expect("stat line pattern is a valid regex")
});

/// Extract every `label: number` pair from free-form log text.
///
/// The tool's output is informational text with metric lines mixed in, so lines that do not look
/// like a metric are skipped rather than treated as errors. When a label appears more than once,
/// the last line wins.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`, so output redrawn with carriage returns still counts
/// line by line.
///
/// No assumption is made about which labels exist. Picking the required ones is left to
/// [crate::prelude::normalize].
pub fn extract_keys_and_values(text: &str) -> RawStats {
    let mut result = RawStats::new();
    for line in text.split(['\r', '\n']) {
        let line = line.trim();
        let Some(captures) = STAT_LINE.captures(line) else {
            continue;
        };

        let key = captures[1].trim();
        let literal = captures[2]
            .trim()
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect::<String>();

        match Number::parse_literal(&literal) {
            Some(value) => {
                result.insert(key.to_string(), value);
            }
            None => {
                log::trace!("Skipping unparseable value '{literal}' for '{key}'");
            }
        }
    }

    log::debug!(
        "Extracted {} stats: [{}]",
        result.len(),
        result.keys().join(", ")
    );

    result
}
