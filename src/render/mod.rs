pub mod charts;
pub mod narrative;

use crate::error::StormError;
use crate::pipeline::Analysis;
use crate::types::event_type::EventTypeTable;
use crate::utils::ensure_dir_exists;
use log::info;
use std::path::{Path, PathBuf};

pub const NARRATIVE_FILE: &str = "report.md";

/// Files written by [`render_report`].
#[derive(Debug, Clone, Default)]
pub struct ReportArtifacts {
    /// One chart per metric with at least one retained event type.
    pub charts: Vec<PathBuf>,
    pub narrative: PathBuf,
}

/// Writes the bar charts and the Markdown narrative for `analysis` into `out_dir`.
pub fn render_report(
    analysis: &Analysis,
    event_types: &EventTypeTable,
    out_dir: &Path,
) -> Result<ReportArtifacts, StormError> {
    ensure_dir_exists(out_dir)
        .map_err(|e| StormError::OutputDirCreation(out_dir.to_path_buf(), e))?;

    let mut written = Vec::new();
    for result in &analysis.thresholds {
        if let Some(path) = charts::write_bar_chart(out_dir, result)? {
            written.push(path);
        }
    }

    let text = narrative::narrative(analysis, event_types)?;
    let narrative_path = out_dir.join(NARRATIVE_FILE);
    std::fs::write(&narrative_path, text)
        .map_err(|e| StormError::ReportWrite(narrative_path.clone(), e))?;

    info!(
        "Wrote {} charts and {:?} to {:?}",
        written.len(),
        narrative_path,
        out_dir
    );
    Ok(ReportArtifacts {
        charts: written,
        narrative: narrative_path,
    })
}
