//! Per-event-type aggregation of the cleaned storm rows.

use crate::types::columns::{
    ECONOMICIMPACT, EVTYPE, FATALITIES, INJURIES, POPULATIONIMPACT, TOTALCROPDMG, TOTALPROPDMG,
};
use polars::prelude::*;

/// Groups the cleaned rows by event-type label and sums fatalities, injuries, crop and
/// property damage, then derives `ECONOMICIMPACT` (crop + property) and
/// `POPULATIONIMPACT` (fatalities + injuries).
///
/// Labels are grouped verbatim: `TSTM WIND` and `THUNDERSTORM WIND` stay separate
/// groups. The result is sorted by label so repeated runs produce identical frames.
///
/// The input must carry `EVTYPE`, `FATALITIES`, `INJURIES`, `TOTALCROPDMG` and
/// `TOTALPROPDMG`. Because only those sums are read, a previous summary is itself a valid
/// input, which is how partial summaries are combined.
pub fn summarize_by_event_type(cleaned: LazyFrame) -> LazyFrame {
    cleaned
        .group_by([col(EVTYPE)])
        .agg([
            col(FATALITIES).sum(),
            col(INJURIES).sum(),
            col(TOTALCROPDMG).sum(),
            col(TOTALPROPDMG).sum(),
        ])
        .with_columns([
            (col(TOTALCROPDMG) + col(TOTALPROPDMG)).alias(ECONOMICIMPACT),
            (col(FATALITIES) + col(INJURIES)).alias(POPULATIONIMPACT),
        ])
        .sort([EVTYPE], SortMultipleOptions::default())
}
