//! Canonical NWS event types (Directive 10-1605) and their designator codes.

use std::collections::HashMap;

/// Number of canonical event types in the NWS reference table.
pub const CANONICAL_EVENT_TYPE_COUNT: usize = 48;

/// One entry of the canonical event-type table, e.g. `Flash Flood` / `C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventType {
    /// Canonical event-type name as published by the NWS.
    pub name: String,
    /// Designator code: `C` (county), `Z` (zone) or `M` (marine).
    pub code: String,
}

/// Read-only lookup over the canonical event types.
///
/// Storm-data labels are upper-case free text, so lookups are case-insensitive.
/// No alias resolution happens here: `TSTM WIND` does not match `Thunderstorm Wind`.
#[derive(Debug, Clone, Default)]
pub struct EventTypeTable {
    entries: Vec<EventType>,
    by_name: HashMap<String, usize>,
}

impl EventTypeTable {
    pub fn new(entries: Vec<EventType>) -> Self {
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name.to_uppercase(), i))
            .collect();
        Self { entries, by_name }
    }

    pub fn entries(&self) -> &[EventType] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the canonical entry whose name equals `label`, ignoring case and
    /// surrounding whitespace.
    pub fn lookup(&self, label: &str) -> Option<&EventType> {
        self.by_name
            .get(&label.trim().to_uppercase())
            .map(|&i| &self.entries[i])
    }
}
