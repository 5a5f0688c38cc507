//! Quartile thresholds over the per-event-type summary.
//!
//! For each metric the population is the set of event types with a strictly positive
//! value. Quantiles use linear interpolation between order statistics: for `n` sorted
//! values and level `p`, `h = (n - 1) * p` and the result is
//! `x[floor(h)] + (h - floor(h)) * (x[ceil(h)] - x[floor(h)])`.

use crate::types::columns::EVTYPE;
use crate::types::metric::Metric;
use log::debug;
use ordered_float::OrderedFloat;
use polars::prelude::*;

/// The default retention level: keep event types above the 75th percentile.
pub const DEFAULT_QUANTILE: f64 = 0.75;

/// Computes the `p`-quantile of an ascending-sorted slice by linear interpolation.
///
/// Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use stormdata::quantile_linear;
///
/// let injuries = [1.0, 2.0, 3.0, 4.0, 100.0];
/// assert_eq!(quantile_linear(&injuries, 0.75), Some(4.0));
/// assert_eq!(quantile_linear(&injuries, 0.5), Some(3.0));
/// assert_eq!(quantile_linear(&[], 0.75), None);
/// ```
pub fn quantile_linear(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (h.ceil() as usize).min(sorted.len() - 1);
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// The 0/25/50/75/100th percentile boundaries of a metric's positive population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Quartiles {
    /// Computes the quartile boundaries of an ascending-sorted slice.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        Some(Self {
            min: quantile_linear(sorted, 0.0)?,
            q25: quantile_linear(sorted, 0.25)?,
            median: quantile_linear(sorted, 0.5)?,
            q75: quantile_linear(sorted, 0.75)?,
            max: quantile_linear(sorted, 1.0)?,
        })
    }

    pub fn as_array(&self) -> [f64; 5] {
        [self.min, self.q25, self.median, self.q75, self.max]
    }
}

/// One retained event type with its metric value.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEvent {
    pub label: String,
    pub value: f64,
}

/// Outcome of thresholding one metric.
#[derive(Debug, Clone)]
pub struct ThresholdResult {
    pub metric: Metric,
    /// Quantile level used as the retention cut-off.
    pub level: f64,
    /// Number of event types with a strictly positive value.
    pub positive_count: usize,
    /// `None` when no event type has a positive value.
    pub quartiles: Option<Quartiles>,
    /// The `level`-quantile of the positive population; retained values exceed it.
    pub cutoff: Option<f64>,
    /// `EVTYPE` plus the metric column, sorted descending by value.
    pub retained: DataFrame,
}

impl ThresholdResult {
    /// The retained event types in descending order of value.
    pub fn ranked(&self) -> PolarsResult<Vec<RankedEvent>> {
        let labels = self.retained.column(EVTYPE)?.str()?;
        let values = self.retained.column(self.metric.column())?.f64()?;
        Ok(labels
            .into_iter()
            .zip(values.into_iter())
            .filter_map(|(label, value)| match (label, value) {
                (Some(label), Some(value)) => Some(RankedEvent {
                    label: label.to_string(),
                    value,
                }),
                _ => None,
            })
            .collect())
    }

    pub fn retained_count(&self) -> usize {
        self.retained.height()
    }
}

/// Keeps the event types whose `metric` value strictly exceeds the `level`-quantile of
/// the strictly positive values.
///
/// Each call computes its own population, so thresholding an already-retained subset
/// again generally shrinks it further.
///
/// # Errors
///
/// Returns a [`PolarsError`] if `summary` lacks `EVTYPE` or the metric column, or the
/// metric column is not `f64`.
pub fn threshold_metric(
    summary: &DataFrame,
    metric: Metric,
    level: f64,
) -> PolarsResult<ThresholdResult> {
    let column = metric.column();

    let positive = summary
        .clone()
        .lazy()
        .select([col(EVTYPE), col(column)])
        .filter(col(column).gt(lit(0.0)))
        .collect()?;

    let mut values: Vec<f64> = positive.column(column)?.f64()?.into_iter().flatten().collect();
    values.sort_by_key(|v| OrderedFloat(*v));

    let quartiles = Quartiles::from_sorted(&values);
    let cutoff = quantile_linear(&values, level);

    let retained = match cutoff {
        Some(cutoff) => positive
            .lazy()
            .filter(col(column).gt(lit(cutoff)))
            .sort(
                [column],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_maintain_order(true),
            )
            .collect()?,
        None => positive,
    };

    debug!(
        "{}: {} positive event types, cut-off {:?}, {} retained",
        metric,
        values.len(),
        cutoff,
        retained.height()
    );

    Ok(ThresholdResult {
        metric,
        level,
        positive_count: values.len(),
        quartiles,
        cutoff,
        retained,
    })
}
