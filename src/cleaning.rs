//! Projection, date parsing, the year filter and damage normalisation.

use crate::types::columns::{
    BGN_DATE, CROPDMG, CROPDMGEXP, FATALITIES, INJURIES, PROPDMG, PROPDMGEXP, REPORT_COLUMNS,
};
use crate::types::magnitude::{DamageKind, DEFAULT_MULTIPLIER};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::warn;
use polars::prelude::*;

/// Days between 0001-01-01 and 1970-01-01, the epoch of Polars' `Date` type.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const BEGIN_DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";
const BEGIN_DATE_FORMAT: &str = "%m/%d/%Y";

/// Parses a storm begin date such as `4/18/1950 0:00:00`.
///
/// The time part is accepted but discarded; a bare `4/18/1950` also parses.
/// Anything else yields `None`.
///
/// # Examples
///
/// ```
/// use stormdata::parse_begin_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_begin_date("4/18/1950 0:00:00"),
///     NaiveDate::from_ymd_opt(1950, 4, 18)
/// );
/// assert_eq!(parse_begin_date("not a date"), None);
/// ```
pub fn parse_begin_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, BEGIN_DATETIME_FORMAT)
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(trimmed, BEGIN_DATE_FORMAT))
        .ok()
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Projects the raw export to the eight report columns and replaces `BGN_DATE` with a
/// parsed `Date` column.
///
/// Unparseable dates become null; they are counted and logged but not rejected here.
pub fn project_and_parse_dates(raw: &DataFrame) -> PolarsResult<DataFrame> {
    let mut projected = raw.select(REPORT_COLUMNS)?;

    let raw_dates = projected.column(BGN_DATE)?.cast(&DataType::String)?;
    let mut unparseable = 0usize;
    let days: Vec<Option<i32>> = raw_dates
        .str()?
        .into_iter()
        .map(|value| {
            let parsed = value.and_then(parse_begin_date);
            if parsed.is_none() {
                unparseable += 1;
            }
            parsed.map(days_since_epoch)
        })
        .collect();

    if unparseable > 0 {
        warn!(
            "{} of {} storm records have a missing or unparseable {}",
            unparseable,
            projected.height(),
            BGN_DATE
        );
    }

    let dates = Series::new(PlSmallStr::from_static(BGN_DATE), days).cast(&DataType::Date)?;
    projected.with_column(dates)?;
    Ok(projected)
}

pub trait StormFrameExt {
    /// Casts the count and magnitude columns to `f64` and the suffix columns to text.
    ///
    /// Casting is non-strict: values that do not parse as numbers become null and
    /// drop out of every sum.
    fn with_report_types(self) -> LazyFrame;

    /// Keeps rows whose begin date falls in `cutoff_year` or later.
    ///
    /// Rows with a null date never satisfy the comparison and are dropped.
    fn filter_from_year(self, cutoff_year: i32) -> LazyFrame;

    /// Left-joins the multiplier table once per damage kind and adds `TOTALPROPDMG` and
    /// `TOTALCROPDMG` (magnitude × multiplier).
    ///
    /// Suffixes missing from the table, including null suffixes, get a multiplier of 1.
    ///
    /// # Errors
    ///
    /// Returns a [`PolarsError`] if the static multiplier tables cannot be built.
    fn with_damage_totals(self) -> PolarsResult<LazyFrame>;
}

impl StormFrameExt for LazyFrame {
    fn with_report_types(self) -> LazyFrame {
        self.with_columns([
            col(FATALITIES).cast(DataType::Float64),
            col(INJURIES).cast(DataType::Float64),
            col(PROPDMG).cast(DataType::Float64),
            col(CROPDMG).cast(DataType::Float64),
            col(PROPDMGEXP).cast(DataType::String),
            col(CROPDMGEXP).cast(DataType::String),
        ])
    }

    fn filter_from_year(self, cutoff_year: i32) -> LazyFrame {
        self.filter(col(BGN_DATE).dt().year().gt_eq(lit(cutoff_year)))
    }

    fn with_damage_totals(self) -> PolarsResult<LazyFrame> {
        let mut frame = self;
        for kind in DamageKind::ALL {
            let multipliers = kind.multiplier_frame()?.lazy();
            frame = frame
                .left_join(
                    multipliers,
                    col(kind.suffix_column()),
                    col(kind.suffix_column()),
                )
                .with_column(
                    col(kind.multiplier_column())
                        .fill_null(lit(DEFAULT_MULTIPLIER)),
                )
                .with_column(
                    (col(kind.magnitude_column()) * col(kind.multiplier_column()))
                        .alias(kind.total_column()),
                );
        }
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::columns::{CROPMULT, EVTYPE, TOTALCROPDMG, TOTALPROPDMG};

    fn raw_frame() -> PolarsResult<DataFrame> {
        df!(
            "STATE__" => ["1.00", "1.00", "2.00", "2.00", "3.00"],
            EVTYPE => ["TORNADO", "FLOOD", "FLOOD", "HAIL", "HAIL"],
            BGN_DATE => [
                "4/18/1950 0:00:00",
                "1/3/2008 0:00:00",
                "12/31/2006 0:00:00",
                "1/1/2007 0:00:00",
                "garbage",
            ],
            FATALITIES => ["0.00", "1.00", "0.00", "0.00", "3.00"],
            INJURIES => ["15.00", "0.00", "2.00", "1.00", "0.00"],
            PROPDMG => ["25.00", "2.50", "1.00", "10.00", "1.00"],
            PROPDMGEXP => [Some("K"), Some("M"), Some("B"), Some("X"), None],
            CROPDMG => ["0.00", "5.00", "0.00", "10.00", "0.00"],
            CROPDMGEXP => [None, Some("K"), None, Some("X"), None]
        )
    }

    #[test]
    fn test_parse_begin_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2011, 6, 9);
        assert_eq!(parse_begin_date("6/9/2011 0:00:00"), expected);
        assert_eq!(parse_begin_date("06/09/2011 00:00:00"), expected);
        assert_eq!(parse_begin_date("6/9/2011"), expected);
        assert_eq!(parse_begin_date(""), None);
        assert_eq!(parse_begin_date("2011-06-09"), None);
    }

    #[test]
    fn test_days_since_epoch() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(days_since_epoch(epoch), 0);
        let later = NaiveDate::from_ymd_opt(1970, 2, 1).unwrap();
        assert_eq!(days_since_epoch(later), 31);
    }

    #[test]
    fn test_project_and_parse_dates() -> PolarsResult<()> {
        let projected = project_and_parse_dates(&raw_frame()?)?;

        assert_eq!(projected.get_column_names_str(), REPORT_COLUMNS.to_vec());
        assert_eq!(projected.column(BGN_DATE)?.dtype(), &DataType::Date);
        assert_eq!(projected.column(BGN_DATE)?.null_count(), 1);
        Ok(())
    }

    #[test]
    fn test_filter_keeps_cutoff_year_and_later() -> PolarsResult<()> {
        let filtered = project_and_parse_dates(&raw_frame()?)?
            .lazy()
            .filter_from_year(2007)
            .select([col(BGN_DATE).dt().year().alias("year"), col(EVTYPE)])
            .collect()?;

        // 1950, 2006 and the unparseable date are dropped.
        assert_eq!(filtered.height(), 2);
        let years = filtered.column("year")?.i32()?;
        assert!(years.into_iter().all(|y| matches!(y, Some(y) if y >= 2007)));
        Ok(())
    }

    #[test]
    fn test_damage_totals() -> PolarsResult<()> {
        let cleaned = project_and_parse_dates(&raw_frame()?)?
            .lazy()
            .with_row_index("row", None)
            .with_report_types()
            .with_damage_totals()?
            .sort(["row"], SortMultipleOptions::default())
            .collect()?;
        assert_eq!(cleaned.height(), 5, "left joins must not drop or duplicate rows");

        let prop: Vec<Option<f64>> = cleaned.column(TOTALPROPDMG)?.f64()?.into_iter().collect();
        let crop: Vec<Option<f64>> = cleaned.column(TOTALCROPDMG)?.f64()?.into_iter().collect();
        assert_eq!(
            prop,
            vec![
                Some(25_000.0), // 25 K
                Some(2.5e6),    // 2.5 M
                Some(1e9),      // 1 B
                Some(10.0),     // unknown suffix X
                Some(1.0),      // null suffix
            ]
        );
        assert_eq!(
            crop,
            vec![Some(0.0), Some(5_000.0), Some(0.0), Some(10.0), Some(0.0)]
        );

        let multipliers = cleaned.column(CROPMULT)?;
        assert_eq!(multipliers.null_count(), 0, "unmatched suffixes are filled");
        Ok(())
    }

    #[test]
    fn test_unparseable_numbers_become_null() -> PolarsResult<()> {
        let frame = df!(
            EVTYPE => ["FLOOD"],
            BGN_DATE => ["1/1/2010 0:00:00"],
            FATALITIES => ["n/a"],
            INJURIES => ["2"],
            PROPDMG => ["1.5"],
            PROPDMGEXP => ["K"],
            CROPDMG => [""],
            CROPDMGEXP => ["M"]
        )?;
        let cleaned = project_and_parse_dates(&frame)?
            .lazy()
            .with_report_types()
            .with_damage_totals()?
            .collect()?;

        assert_eq!(cleaned.column(FATALITIES)?.null_count(), 1);
        assert_eq!(cleaned.column(INJURIES)?.f64()?.get(0), Some(2.0));
        assert_eq!(cleaned.column(TOTALPROPDMG)?.f64()?.get(0), Some(1_500.0));
        assert_eq!(cleaned.column(TOTALCROPDMG)?.f64()?.get(0), None);
        Ok(())
    }
}
