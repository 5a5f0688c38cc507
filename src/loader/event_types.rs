use crate::loader::error::LoadError;
use crate::types::event_type::{EventType, EventTypeTable, CANONICAL_EVENT_TYPE_COUNT};
use log::{info, warn};
use std::path::Path;

/// Width of the designator code at the end of every lookup line.
const CODE_WIDTH: usize = 2;

const BUILTIN_EVENT_TYPES: &str = include_str!("../../data/event_types.txt");
const BUILTIN_SOURCE: &str = "<builtin event types>";

/// Reads a newline-delimited event-type lookup from disk.
///
/// Each non-blank line is `<event name><2-char code>` with no delimiter; see
/// [`parse_event_types`] for the splitting rules.
pub async fn load_event_types(path: &Path) -> Result<EventTypeTable, LoadError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::LookupRead(path.to_path_buf(), e))?;
    let table = parse_event_types(&text, path)?;
    info!(
        "Loaded {} canonical event types from {:?}",
        table.len(),
        path
    );
    Ok(table)
}

/// The 48 NWS event types bundled with the crate.
pub fn builtin_event_types() -> Result<EventTypeTable, LoadError> {
    parse_event_types(BUILTIN_EVENT_TYPES, Path::new(BUILTIN_SOURCE))
}

/// Splits each line into a name and a trailing code by fixed offset from the end.
///
/// The offset counts characters, not bytes. The code is the last two characters with
/// whitespace trimmed (so `"Flood C"` yields code `C`), and the name is everything before
/// it with trailing whitespace trimmed. Blank lines are skipped. A table whose size differs
/// from [`CANONICAL_EVENT_TYPE_COUNT`] is accepted but logged.
pub fn parse_event_types(text: &str, source: &Path) -> Result<EventTypeTable, LoadError> {
    let mut entries = Vec::with_capacity(CANONICAL_EVENT_TYPE_COUNT);

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_end_matches(&['\r', '\n'][..]);
        if line.trim().is_empty() {
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        if chars.len() <= CODE_WIDTH {
            return Err(LoadError::LookupLine {
                path: source.to_path_buf(),
                line: idx + 1,
                content: line.to_string(),
            });
        }
        let split_at = chars.len() - CODE_WIDTH;
        let name: String = chars[..split_at].iter().collect();
        let code: String = chars[split_at..].iter().collect();

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(LoadError::LookupLine {
                path: source.to_path_buf(),
                line: idx + 1,
                content: line.to_string(),
            });
        }
        entries.push(EventType {
            name,
            code: code.trim().to_string(),
        });
    }

    if entries.len() != CANONICAL_EVENT_TYPE_COUNT {
        warn!(
            "Event type lookup {:?} has {} entries, expected {}",
            source,
            entries.len(),
            CANONICAL_EVENT_TYPE_COUNT
        );
    }

    Ok(EventTypeTable::new(entries))
}
