pub mod columns;
pub mod event_type;
pub mod magnitude;
pub mod metric;
