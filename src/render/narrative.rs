use crate::pipeline::Analysis;
use crate::threshold::ThresholdResult;
use crate::types::event_type::EventTypeTable;
use polars::prelude::PolarsResult;
use std::fmt::Write;

/// Renders the Markdown narrative for one run.
///
/// The text walks through the row counts at each stage, then one section per metric
/// with the quartile boundaries of its positive population and the retained event
/// types. Retained labels that spell one of the canonical NWS event types are shown
/// with their designator code.
pub fn narrative(analysis: &Analysis, event_types: &EventTypeTable) -> PolarsResult<String> {
    let mut out = String::new();
    let stages = &analysis.stages;

    // Writing to a String cannot fail.
    let _ = writeln!(out, "# Severe weather events in the United States\n");
    let _ = writeln!(
        out,
        "Event types are ranked by their total health and economic impact in the NOAA \
         storm database, counting events that began in {} or later.\n",
        analysis.cutoff_year
    );

    let _ = writeln!(out, "## Data processing\n");
    let _ = writeln!(out, "| Stage | Records |");
    let _ = writeln!(out, "|---|---:|");
    let _ = writeln!(out, "| Raw records | {} |", stages.raw_rows);
    let _ = writeln!(out, "| With a valid begin date | {} |", stages.dated_rows);
    let _ = writeln!(
        out,
        "| Began in {} or later | {} |",
        analysis.cutoff_year, stages.filtered_rows
    );
    let _ = writeln!(out, "| Distinct event-type labels | {} |\n", stages.event_type_labels);

    let unmatched = &analysis.unmatched_suffixes;
    if unmatched.total() > 0 {
        let _ = writeln!(
            out,
            "{} property and {} crop damage values carry an unrecognised magnitude suffix \
             and were counted at face value.\n",
            unmatched.property, unmatched.crop
        );
    }

    let _ = writeln!(
        out,
        "Event-type labels are used as recorded. Variant spellings such as `TSTM WIND` \
         and `THUNDERSTORM WIND` are counted separately. Retained labels that exactly \
         match one of the {} canonical NWS event types are shown with their designator code.\n",
        event_types.len()
    );

    for result in &analysis.thresholds {
        metric_section(&mut out, result, event_types)?;
    }

    Ok(out)
}

fn metric_section(
    out: &mut String,
    result: &ThresholdResult,
    event_types: &EventTypeTable,
) -> PolarsResult<()> {
    let metric = result.metric;
    let _ = writeln!(out, "## {}\n", metric.title());

    let Some(quartiles) = result.quartiles else {
        let _ = writeln!(out, "No event type has a positive {}.\n", metric.title().to_lowercase());
        return Ok(());
    };

    let _ = writeln!(
        out,
        "{} event types have a positive {}. Quartile boundaries:\n",
        result.positive_count,
        metric.title().to_lowercase()
    );
    let _ = writeln!(out, "| Min | 25% | Median | 75% | Max |");
    let _ = writeln!(out, "|---:|---:|---:|---:|---:|");
    let cells: Vec<String> = quartiles
        .as_array()
        .iter()
        .map(|v| metric.format_value(*v))
        .collect();
    let _ = writeln!(out, "| {} |\n", cells.join(" | "));

    let ranked = result.ranked()?;
    if let Some(cutoff) = result.cutoff {
        let _ = writeln!(
            out,
            "{} event types exceed the {}th percentile ({}):\n",
            ranked.len(),
            percent(result.level),
            metric.format_value(cutoff)
        );
    }
    if ranked.is_empty() {
        let _ = writeln!(out, "None.\n");
        return Ok(());
    }

    let _ = writeln!(out, "| Rank | Event type | {} | NWS type |", metric.title());
    let _ = writeln!(out, "|---:|---|---:|---|");
    for (rank, event) in ranked.iter().enumerate() {
        let canonical = match event_types.lookup(&event.label) {
            Some(entry) => format!("{} ({})", entry.name, entry.code),
            None => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            rank + 1,
            event.label,
            metric.format_value(event.value),
            canonical
        );
    }
    let _ = writeln!(out);
    Ok(())
}

fn percent(level: f64) -> String {
    let pct = level * 100.0;
    if pct.fract() == 0.0 {
        format!("{}", pct as i64)
    } else {
        format!("{:.1}", pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{StageCounts, UnmatchedSuffixes};
    use crate::threshold::threshold_metric;
    use crate::types::columns::{EVTYPE, FATALITIES};
    use crate::types::event_type::EventType;
    use crate::types::metric::Metric;
    use polars::prelude::*;

    fn table() -> EventTypeTable {
        EventTypeTable::new(vec![
            EventType {
                name: "Tornado".to_string(),
                code: "C".to_string(),
            },
            EventType {
                name: "Flood".to_string(),
                code: "C".to_string(),
            },
        ])
    }

    fn analysis(values: &[f64]) -> PolarsResult<Analysis> {
        let labels = ["TORNADO", "TSTM WIND", "FLOOD", "HEAT", "LIGHTNING"];
        let summary = df!(
            EVTYPE => &labels[..values.len()],
            FATALITIES => values
        )?;
        let fatalities = threshold_metric(&summary, Metric::Fatalities, 0.75)?;
        Ok(Analysis {
            cutoff_year: 2007,
            quantile: 0.75,
            stages: StageCounts {
                raw_rows: 902_297,
                dated_rows: 902_297,
                filtered_rows: 550_000,
                event_type_labels: 5,
            },
            unmatched_suffixes: UnmatchedSuffixes {
                property: 3,
                crop: 0,
            },
            summary,
            thresholds: vec![fatalities],
        })
    }

    #[test]
    fn test_stage_counts_are_reported() -> PolarsResult<()> {
        let text = narrative(&analysis(&[100.0, 1.0, 2.0, 3.0, 4.0])?, &table())?;
        assert!(text.contains("| Raw records | 902297 |"));
        assert!(text.contains("| Began in 2007 or later | 550000 |"));
        assert!(text.contains("3 property and 0 crop damage values"));
        Ok(())
    }

    #[test]
    fn test_retained_events_link_canonical_types() -> PolarsResult<()> {
        let text = narrative(&analysis(&[100.0, 1.0, 2.0, 3.0, 4.0])?, &table())?;
        assert!(text.contains("## Fatalities"));
        assert!(text.contains("| 1 | 2 | 3 | 4 | 100 |"));
        assert!(text.contains("1 event types exceed the 75th percentile (4):"));
        assert!(text.contains("| 1 | TORNADO | 100 | Tornado (C) |"));
        Ok(())
    }

    #[test]
    fn test_unmatched_label_has_no_canonical_type() -> PolarsResult<()> {
        let text = narrative(&analysis(&[1.0, 100.0, 2.0, 3.0, 4.0])?, &table())?;
        assert!(text.contains("| 1 | TSTM WIND | 100 | - |"));
        Ok(())
    }

    #[test]
    fn test_empty_population_is_stated() -> PolarsResult<()> {
        let text = narrative(&analysis(&[0.0, 0.0])?, &table())?;
        assert!(text.contains("No event type has a positive fatalities."));
        Ok(())
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(percent(0.75), "75");
        assert_eq!(percent(0.905), "90.5");
    }
}
