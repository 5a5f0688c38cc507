//! The entry point that runs a complete report: fetch, load, analyse, render.

use crate::config::ReportConfig;
use crate::error::StormError;
use crate::loader::data_loader::StormDataLoader;
use crate::loader::event_types::{builtin_event_types, load_event_types};
use crate::pipeline::{analyze, Analysis};
use crate::render::{render_report, ReportArtifacts};
use crate::types::event_type::EventTypeTable;
use log::info;
use polars::prelude::DataFrame;

/// Runs the storm impact report described by a [`ReportConfig`].
///
/// # Examples
///
/// ```rust,no_run
/// # use stormdata::{ReportConfig, StormError, StormReport};
/// # async fn run() -> Result<(), StormError> {
/// let config = ReportConfig::builder()
///     .data_path("StormData.csv.bz2")
///     .output_dir("report")
///     .build();
/// let artifacts = StormReport::new(config)?.run().await?;
/// println!("Narrative written to {:?}", artifacts.narrative);
/// # Ok(())
/// # }
/// ```
pub struct StormReport {
    loader: StormDataLoader,
    config: ReportConfig,
}

impl StormReport {
    /// Creates a report runner, rejecting invalid settings up front.
    ///
    /// # Errors
    ///
    /// Returns [`StormError::InvalidQuantile`] if the configured quantile is outside `[0, 1]`.
    pub fn new(config: ReportConfig) -> Result<Self, StormError> {
        config.validate()?;
        Ok(Self {
            loader: StormDataLoader::new(),
            config,
        })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Loads the raw storm export, downloading it first if a URL is configured and the
    /// file is missing.
    pub async fn load_storm_data(&self) -> Result<DataFrame, StormError> {
        if let Some(url) = &self.config.download_url {
            self.loader.ensure_local(&self.config.data_path, url).await?;
        }
        Ok(self.loader.load_storm_data(&self.config.data_path).await?)
    }

    /// Loads the configured event-type lookup, or the bundled NWS table.
    pub async fn load_event_types(&self) -> Result<EventTypeTable, StormError> {
        let table = match &self.config.event_types_path {
            Some(path) => load_event_types(path).await?,
            None => builtin_event_types()?,
        };
        Ok(table)
    }

    /// Loads the data and runs the analysis without writing anything.
    pub async fn analyze(&self) -> Result<(Analysis, EventTypeTable), StormError> {
        let raw = self.load_storm_data().await?;
        let event_types = self.load_event_types().await?;
        let analysis = analyze(&raw, self.config.cutoff_year, self.config.quantile)?;
        Ok((analysis, event_types))
    }

    /// Runs the whole report and writes its charts and narrative to the output directory.
    pub async fn run(&self) -> Result<ReportArtifacts, StormError> {
        let (analysis, event_types) = self.analyze().await?;
        let artifacts = render_report(&analysis, &event_types, &self.config.output_dir)?;
        info!(
            "Storm report complete: {} of {} metrics charted",
            artifacts.charts.len(),
            analysis.thresholds.len()
        );
        Ok(artifacts)
    }
}
