//! Defines the `Metric` enum: the per-event-type summary columns the report
//! thresholds and charts.

use crate::types::columns::{
    ECONOMICIMPACT, FATALITIES, INJURIES, POPULATIONIMPACT, TOTALCROPDMG, TOTALPROPDMG,
};
use std::fmt;

/// A summed or derived column of the per-event-type summary.
///
/// Every metric is thresholded independently, so the set of event types retained for
/// one metric says nothing about the set retained for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Summed `FATALITIES`.
    Fatalities,
    /// Summed `INJURIES`.
    Injuries,
    /// Summed crop damage in dollars (`TOTALCROPDMG`).
    CropDamage,
    /// Summed property damage in dollars (`TOTALPROPDMG`).
    PropertyDamage,
    /// Crop plus property damage.
    EconomicImpact,
    /// Fatalities plus injuries.
    PopulationImpact,
}

/// What a metric counts, used for axis labels and number formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    People,
    Dollars,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Fatalities,
        Metric::Injuries,
        Metric::CropDamage,
        Metric::PropertyDamage,
        Metric::EconomicImpact,
        Metric::PopulationImpact,
    ];

    /// The summary column holding this metric.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Fatalities => FATALITIES,
            Metric::Injuries => INJURIES,
            Metric::CropDamage => TOTALCROPDMG,
            Metric::PropertyDamage => TOTALPROPDMG,
            Metric::EconomicImpact => ECONOMICIMPACT,
            Metric::PopulationImpact => POPULATIONIMPACT,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::Fatalities => "Fatalities",
            Metric::Injuries => "Injuries",
            Metric::CropDamage => "Crop damage",
            Metric::PropertyDamage => "Property damage",
            Metric::EconomicImpact => "Economic impact",
            Metric::PopulationImpact => "Population impact",
        }
    }

    pub fn unit(&self) -> MetricUnit {
        match self {
            Metric::Fatalities | Metric::Injuries | Metric::PopulationImpact => MetricUnit::People,
            Metric::CropDamage | Metric::PropertyDamage | Metric::EconomicImpact => {
                MetricUnit::Dollars
            }
        }
    }

    /// File stem used for this metric's chart, e.g. `property_damage`.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Metric::Fatalities => "fatalities",
            Metric::Injuries => "injuries",
            Metric::CropDamage => "crop_damage",
            Metric::PropertyDamage => "property_damage",
            Metric::EconomicImpact => "economic_impact",
            Metric::PopulationImpact => "population_impact",
        }
    }

    /// Formats a value of this metric for the narrative report.
    ///
    /// # Examples
    ///
    /// ```
    /// use stormdata::Metric;
    ///
    /// assert_eq!(Metric::Injuries.format_value(1234.0), "1,234");
    /// assert_eq!(Metric::CropDamage.format_value(2_005_000.0), "$2,005,000");
    /// ```
    pub fn format_value(&self, value: f64) -> String {
        let grouped = group_thousands(value.round() as i64);
        match self.unit() {
            MetricUnit::People => grouped,
            MetricUnit::Dollars => format!("${}", grouped),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricUnit::People => write!(f, "people"),
            MetricUnit::Dollars => write!(f, "USD"),
        }
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_distinct() {
        let mut columns: Vec<&str> = Metric::ALL.iter().map(Metric::column).collect();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), Metric::ALL.len());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
    }

    #[test]
    fn test_format_value_units() {
        assert_eq!(Metric::Fatalities.format_value(15.0), "15");
        assert_eq!(Metric::EconomicImpact.format_value(1.5e9), "$1,500,000,000");
        assert_eq!(Metric::PopulationImpact.unit(), MetricUnit::People);
    }
}
