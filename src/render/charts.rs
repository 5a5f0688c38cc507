use crate::error::StormError;
use crate::threshold::ThresholdResult;
use crate::types::columns::EVTYPE;
use crate::types::metric::MetricUnit;
use log::{debug, info};
use plotlars::{Axis, BarPlot, Orientation, Plot, Rgb, Text};
use std::path::{Path, PathBuf};

const BAR_COLOR: Rgb = Rgb(69, 157, 230);
const LABEL_ANGLE: f64 = -45.0;

/// Path of the chart written for `result` inside `out_dir`.
pub fn chart_path(out_dir: &Path, result: &ThresholdResult) -> PathBuf {
    out_dir.join(format!("{}.html", result.metric.file_stem()))
}

/// Writes one bar chart of the retained event types, tallest bar first.
///
/// Returns `None` without touching the filesystem when nothing was retained.
pub fn write_bar_chart(
    out_dir: &Path,
    result: &ThresholdResult,
) -> Result<Option<PathBuf>, StormError> {
    if result.retained_count() == 0 {
        info!("No {} above the cut-off, skipping chart", result.metric);
        return Ok(None);
    }

    let path = chart_path(out_dir, result);
    let y_title = match result.metric.unit() {
        MetricUnit::People => "People",
        MetricUnit::Dollars => "US dollars",
    };

    BarPlot::builder()
        .data(&result.retained)
        .labels(EVTYPE)
        .values(result.metric.column())
        .orientation(Orientation::Vertical)
        .colors(vec![BAR_COLOR])
        .plot_title(Text::from(result.metric.title()).size(18))
        .x_title("Event type")
        .y_title(y_title)
        .x_axis(&Axis::new().tick_angle(LABEL_ANGLE))
        .build()
        .write_html(path.to_string_lossy().to_string());

    if !path.is_file() {
        return Err(StormError::ReportWrite(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "chart was not written"),
        ));
    }
    debug!("Wrote {} chart to {:?}", result.metric, path);
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::threshold_metric;
    use crate::types::columns::INJURIES;
    use crate::types::metric::Metric;
    use polars::prelude::*;
    use tempfile::TempDir;

    fn injuries(values: &[f64]) -> PolarsResult<ThresholdResult> {
        let labels: Vec<String> = (0..values.len()).map(|i| format!("TYPE {}", i)).collect();
        let summary = df!(
            EVTYPE => labels,
            INJURIES => values
        )?;
        threshold_metric(&summary, Metric::Injuries, 0.75)
    }

    #[test]
    fn test_chart_path_uses_metric_stem() -> PolarsResult<()> {
        let result = injuries(&[1.0])?;
        assert_eq!(
            chart_path(Path::new("out"), &result),
            PathBuf::from("out").join(format!("{}.html", Metric::Injuries.file_stem()))
        );
        Ok(())
    }

    #[test]
    fn test_writes_html_for_retained_events() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let result = injuries(&[1.0, 2.0, 3.0, 4.0, 100.0])?;
        let written = write_bar_chart(dir.path(), &result)?.expect("one event retained");
        let html = std::fs::read_to_string(&written)?;
        assert!(html.contains("TYPE 4"));
        Ok(())
    }

    #[test]
    fn test_empty_result_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let result = injuries(&[0.0, 0.0])?;
        assert!(write_bar_chart(dir.path(), &result)?.is_none());
        assert!(!chart_path(dir.path(), &result).exists());
        Ok(())
    }
}
