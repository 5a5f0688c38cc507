//! The in-memory part of the report: clean, filter, normalise, aggregate, threshold.

use crate::aggregate::summarize_by_event_type;
use crate::cleaning::{project_and_parse_dates, StormFrameExt};
use crate::error::StormError;
use crate::threshold::{threshold_metric, ThresholdResult};
use crate::types::columns::BGN_DATE;
use crate::types::magnitude::DamageKind;
use crate::types::metric::Metric;
use log::{info, warn};
use polars::prelude::*;

/// Row counts after each pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCounts {
    /// Records in the raw export.
    pub raw_rows: usize,
    /// Records with a parseable begin date.
    pub dated_rows: usize,
    /// Records on or after the cutoff year.
    pub filtered_rows: usize,
    /// Distinct event-type labels among the filtered records.
    pub event_type_labels: usize,
}

/// Non-empty damage suffixes that silently fell back to a multiplier of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnmatchedSuffixes {
    pub property: usize,
    pub crop: usize,
}

impl UnmatchedSuffixes {
    pub fn count(cleaned: &DataFrame) -> PolarsResult<Self> {
        Ok(Self {
            property: DamageKind::Property.count_unmatched_suffixes(cleaned)?,
            crop: DamageKind::Crop.count_unmatched_suffixes(cleaned)?,
        })
    }

    pub fn total(&self) -> usize {
        self.property + self.crop
    }
}

/// Everything the renderer needs from one run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub cutoff_year: i32,
    pub quantile: f64,
    pub stages: StageCounts,
    pub unmatched_suffixes: UnmatchedSuffixes,
    /// One row per event-type label, see [`summarize_by_event_type`].
    pub summary: DataFrame,
    /// One entry per [`Metric::ALL`], in that order.
    pub thresholds: Vec<ThresholdResult>,
}

impl Analysis {
    pub fn threshold(&self, metric: Metric) -> Option<&ThresholdResult> {
        self.thresholds.iter().find(|t| t.metric == metric)
    }
}

/// Runs the analysis over a raw storm export.
///
/// # Arguments
///
/// * `raw` - The export as loaded, with at least the eight report columns.
/// * `cutoff_year` - First year kept by the date filter.
/// * `quantile` - Retention level in `[0, 1]` applied per metric.
///
/// # Errors
///
/// Returns [`StormError::InvalidQuantile`] for a level outside `[0, 1]` and
/// [`StormError::PolarsError`] if any frame operation fails (e.g. a missing column).
pub fn analyze(raw: &DataFrame, cutoff_year: i32, quantile: f64) -> Result<Analysis, StormError> {
    if !(0.0..=1.0).contains(&quantile) {
        return Err(StormError::InvalidQuantile(quantile));
    }

    let projected = project_and_parse_dates(raw)?;
    let dated_rows = projected.height() - projected.column(BGN_DATE)?.null_count();

    let cleaned = projected
        .lazy()
        .with_report_types()
        .filter_from_year(cutoff_year)
        .with_damage_totals()?
        .collect()?;
    info!(
        "{} of {} storm records fall in {} or later",
        cleaned.height(),
        raw.height(),
        cutoff_year
    );

    let unmatched_suffixes = UnmatchedSuffixes::count(&cleaned)?;
    if unmatched_suffixes.total() > 0 {
        warn!(
            "Unrecognised damage suffixes treated as multiplier 1: {} property, {} crop",
            unmatched_suffixes.property, unmatched_suffixes.crop
        );
    }

    let filtered_rows = cleaned.height();
    let summary = summarize_by_event_type(cleaned.lazy()).collect()?;
    info!("Summarised {} event-type labels", summary.height());

    let thresholds = Metric::ALL
        .iter()
        .map(|metric| threshold_metric(&summary, *metric, quantile))
        .collect::<PolarsResult<Vec<_>>>()?;

    Ok(Analysis {
        cutoff_year,
        quantile,
        stages: StageCounts {
            raw_rows: raw.height(),
            dated_rows,
            filtered_rows,
            event_type_labels: summary.height(),
        },
        unmatched_suffixes,
        summary,
        thresholds,
    })
}
