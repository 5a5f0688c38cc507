//! Run configuration for the storm report. Every field defaults to the constants the
//! report was originally written against.

use crate::error::StormError;
use crate::threshold::DEFAULT_QUANTILE;
use bon::Builder;
use std::path::PathBuf;

/// First year kept by the date filter.
pub const DEFAULT_CUTOFF_YEAR: i32 = 2007;
pub const DEFAULT_DATA_FILE: &str = "StormData.csv.bz2";
pub const DEFAULT_OUTPUT_DIR: &str = "report";
/// Public mirror of the NOAA storm database export used by the report.
pub const DEFAULT_DATA_URL: &str =
    "https://d396qusza40orc.cloudfront.net/repdata%2Fdata%2FStormData.csv.bz2";

/// Settings for one report run.
///
/// # Examples
///
/// ```
/// use stormdata::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .data_path("data/StormData.csv.bz2")
///     .cutoff_year(2010)
///     .build();
/// assert_eq!(config.cutoff_year, 2010);
/// assert_eq!(config.quantile, 0.75);
/// assert!(config.download_url.is_none());
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ReportConfig {
    /// Storm data export; `.bz2` and `.gz` are decompressed on the fly.
    #[builder(into, default = PathBuf::from(DEFAULT_DATA_FILE))]
    pub data_path: PathBuf,
    /// Event-type lookup file. `None` uses the bundled NWS table.
    #[builder(into)]
    pub event_types_path: Option<PathBuf>,
    /// Directory receiving the charts and `report.md`.
    #[builder(into, default = PathBuf::from(DEFAULT_OUTPUT_DIR))]
    pub output_dir: PathBuf,
    #[builder(default = DEFAULT_CUTOFF_YEAR)]
    pub cutoff_year: i32,
    /// Quantile level an event type must exceed to be retained, in `[0, 1]`.
    #[builder(default = DEFAULT_QUANTILE)]
    pub quantile: f64,
    /// Where to fetch the data file from if `data_path` does not exist.
    #[builder(into)]
    pub download_url: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig::builder().build()
    }
}

impl ReportConfig {
    /// Checks the settings that cannot be enforced by types alone.
    pub fn validate(&self) -> Result<(), StormError> {
        if !(0.0..=1.0).contains(&self.quantile) {
            return Err(StormError::InvalidQuantile(self.quantile));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_report_constants() {
        let config = ReportConfig::default();
        assert_eq!(config.cutoff_year, 2007);
        assert_eq!(config.quantile, 0.75);
        assert_eq!(config.data_path, PathBuf::from("StormData.csv.bz2"));
        assert_eq!(config.output_dir, PathBuf::from("report"));
        assert!(config.event_types_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quantile_out_of_range_is_rejected() {
        for quantile in [-0.1, 1.5, f64::NAN] {
            let config = ReportConfig::builder().quantile(quantile).build();
            assert!(
                matches!(config.validate(), Err(StormError::InvalidQuantile(_))),
                "quantile {} should be rejected",
                quantile
            );
        }
    }

    #[test]
    fn test_optional_fields_accept_maybe_setters() {
        let config = ReportConfig::builder()
            .maybe_event_types_path(Some("lookup.txt"))
            .maybe_download_url(None::<String>)
            .build();
        assert_eq!(config.event_types_path, Some(PathBuf::from("lookup.txt")));
        assert!(config.download_url.is_none());
    }
}
