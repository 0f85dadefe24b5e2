//! Turns the free-form report printed by wrk into a stable set of metrics.
//!
//! Extraction is generic: [prelude::extract_keys_and_values] keeps every `label: number` line it
//! finds. Normalization is where the schema lives: [prelude::normalize] picks the required labels
//! and coerces them into [prelude::NormalizedStats].

mod extract;
mod normalize;
mod number;
mod record;

pub mod prelude {
    pub use crate::extract::{extract_keys_and_values, RawStats};
    pub use crate::normalize::{collect_stats, normalize, NormalizedStats, StatsError, COMBINED};
    pub use crate::number::Number;
    pub use crate::record::{
        append_stats_record, load_stats_records, store_stats_record, StatsRecord,
    };
}
