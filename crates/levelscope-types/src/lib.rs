pub mod parse;
pub mod record;
pub mod settings;

pub use parse::{TIMESTAMP_COLUMNS, TIMESTAMP_FORMAT, parse_numeric, parse_timestamp};
pub use record::{AttemptRecord, CleanedRecord, CleanedTable, DerivedMetrics, OptionalColumns};
pub use settings::{BASE_MOVEMENT_SPEED, MetricSettings, REACTION_LATENCY_CLAMP_S};
