//! Column names of the NOAA storm data export, plus the derived columns the
//! report adds along the way.

// Raw export columns used by the report
pub const EVTYPE: &str = "EVTYPE"; // Event-type label, free text
pub const BGN_DATE: &str = "BGN_DATE"; // Begin date, "M/D/YYYY H:MM:SS"
pub const FATALITIES: &str = "FATALITIES";
pub const INJURIES: &str = "INJURIES";
pub const PROPDMG: &str = "PROPDMG"; // Property damage magnitude
pub const PROPDMGEXP: &str = "PROPDMGEXP"; // Property damage suffix
pub const CROPDMG: &str = "CROPDMG"; // Crop damage magnitude
pub const CROPDMGEXP: &str = "CROPDMGEXP"; // Crop damage suffix

// Joined multipliers
pub const PROPMULT: &str = "PROPMULT";
pub const CROPMULT: &str = "CROPMULT";

// Derived per-row totals
pub const TOTALPROPDMG: &str = "TOTALPROPDMG";
pub const TOTALCROPDMG: &str = "TOTALCROPDMG";

// Derived per-event-type metrics
pub const ECONOMICIMPACT: &str = "ECONOMICIMPACT";
pub const POPULATIONIMPACT: &str = "POPULATIONIMPACT";

/// The eight columns the report projects the raw export down to, in output order.
pub const REPORT_COLUMNS: [&str; 8] = [
    EVTYPE, BGN_DATE, FATALITIES, INJURIES, PROPDMG, PROPDMGEXP, CROPDMG, CROPDMGEXP,
];
