//! Damage magnitude suffixes and the multipliers they stand for.
//!
//! The storm export stores damage as a magnitude plus a one-character suffix
//! (`PROPDMG` = 25, `PROPDMGEXP` = "K" means $25,000). Only four suffixes are
//! recognised; anything else, including a missing suffix, counts as a multiplier of 1.

use crate::types::columns::{
    CROPDMG, CROPDMGEXP, CROPMULT, PROPDMG, PROPDMGEXP, PROPMULT, TOTALCROPDMG, TOTALPROPDMG,
};
use polars::prelude::*;

/// Suffix → multiplier lookup, matched on the literal suffix string (case-sensitive).
pub const MAGNITUDE_MULTIPLIERS: [(&str, f64); 4] =
    [("0", 1.0), ("B", 1e9), ("K", 1e3), ("M", 1e6)];

/// Multiplier used for any suffix missing from [`MAGNITUDE_MULTIPLIERS`].
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Resolves a magnitude suffix to its multiplier.
///
/// Unknown and missing suffixes silently resolve to [`DEFAULT_MULTIPLIER`].
///
/// # Examples
///
/// ```
/// use stormdata::multiplier_for;
///
/// assert_eq!(multiplier_for(Some("K")), 1e3);
/// assert_eq!(multiplier_for(Some("B")), 1e9);
/// assert_eq!(multiplier_for(Some("k")), 1.0); // lowercase is not recognised
/// assert_eq!(multiplier_for(None), 1.0);
/// ```
pub fn multiplier_for(suffix: Option<&str>) -> f64 {
    suffix
        .and_then(|s| {
            MAGNITUDE_MULTIPLIERS
                .iter()
                .find(|(known, _)| *known == s)
                .map(|(_, multiplier)| *multiplier)
        })
        .unwrap_or(DEFAULT_MULTIPLIER)
}

/// Returns true if the suffix is one of the recognised magnitude suffixes.
pub fn is_known_suffix(suffix: &str) -> bool {
    MAGNITUDE_MULTIPLIERS.iter().any(|(known, _)| *known == suffix)
}

/// The two kinds of damage recorded per event, each with its own suffix column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageKind {
    Property,
    Crop,
}

impl DamageKind {
    pub const ALL: [DamageKind; 2] = [DamageKind::Property, DamageKind::Crop];

    pub fn magnitude_column(&self) -> &'static str {
        match self {
            DamageKind::Property => PROPDMG,
            DamageKind::Crop => CROPDMG,
        }
    }

    pub fn suffix_column(&self) -> &'static str {
        match self {
            DamageKind::Property => PROPDMGEXP,
            DamageKind::Crop => CROPDMGEXP,
        }
    }

    pub fn multiplier_column(&self) -> &'static str {
        match self {
            DamageKind::Property => PROPMULT,
            DamageKind::Crop => CROPMULT,
        }
    }

    pub fn total_column(&self) -> &'static str {
        match self {
            DamageKind::Property => TOTALPROPDMG,
            DamageKind::Crop => TOTALCROPDMG,
        }
    }

    /// Builds the 4-row multiplier table for this damage kind, keyed on its suffix column
    /// so it can be left-joined straight onto the storm rows.
    pub fn multiplier_frame(&self) -> PolarsResult<DataFrame> {
        let suffixes: Vec<&str> = MAGNITUDE_MULTIPLIERS.iter().map(|(s, _)| *s).collect();
        let multipliers: Vec<f64> = MAGNITUDE_MULTIPLIERS.iter().map(|(_, m)| *m).collect();
        df!(
            self.suffix_column() => suffixes,
            self.multiplier_column() => multipliers
        )
    }

    /// Counts non-empty suffixes in `df` that fall back to the default multiplier.
    pub fn count_unmatched_suffixes(&self, df: &DataFrame) -> PolarsResult<usize> {
        let suffixes = df.column(self.suffix_column())?.str()?;
        Ok(suffixes
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty() && !is_known_suffix(s))
            .count())
    }
}

impl std::fmt::Display for DamageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DamageKind::Property => write!(f, "property"),
            DamageKind::Crop => write!(f, "crop"),
        }
    }
}
