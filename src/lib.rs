//! Ranks severe weather event types in the NOAA storm database by their impact on
//! population health and the economy.
//!
//! A run loads the raw export, keeps events that began in or after a cutoff year,
//! converts damage magnitudes to dollars, sums every metric per event-type label and
//! keeps the labels above the 75th percentile of each metric. The result is written
//! as one bar chart per metric plus a Markdown narrative.

mod aggregate;
mod cleaning;
mod config;
mod error;
mod loader;
mod pipeline;
mod render;
mod storm_report;
mod threshold;
mod types;
mod utils;

pub use aggregate::summarize_by_event_type;
pub use cleaning::{parse_begin_date, project_and_parse_dates, StormFrameExt};
pub use config::*;
pub use error::StormError;
pub use pipeline::{analyze, Analysis, StageCounts, UnmatchedSuffixes};
pub use render::charts::write_bar_chart;
pub use render::narrative::narrative;
pub use render::{render_report, ReportArtifacts, NARRATIVE_FILE};
pub use storm_report::StormReport;
pub use threshold::{
    quantile_linear, threshold_metric, Quartiles, RankedEvent, ThresholdResult, DEFAULT_QUANTILE,
};

pub use loader::data_loader::{Compression, StormDataLoader};
pub use loader::error::LoadError;
pub use loader::event_types::{builtin_event_types, load_event_types, parse_event_types};

pub use types::columns;
pub use types::event_type::{EventType, EventTypeTable, CANONICAL_EVENT_TYPE_COUNT};
pub use types::magnitude::{multiplier_for, DamageKind, MAGNITUDE_MULTIPLIERS};
pub use types::metric::{Metric, MetricUnit};
