//! Main processing engine.
//!
//! Opens the Kepler dataset, parses it with the configured reader options,
//! selects habitable planets and projects them for display. The file
//! handle is owned here and released as soon as parsing finishes,
//! whether it succeeded or not.

use crate::config::KeplerConfig;
use crate::error::{KeplerError, Result};
use crate::filter::PlanetFilter;
use crate::header::parse;
use crate::models::{ParsedRow, ProcessingResult, ProcessingStats};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs::File;
use tokio::io::BufReader;
use tracing::{debug, info};

/// Processor for a single Kepler table
#[derive(Debug)]
pub struct PlanetProcessor {
    dataset_path: PathBuf,
    config: KeplerConfig,
}

impl PlanetProcessor {
    /// Create a new processor, checking that the dataset exists
    pub fn new(dataset_path: PathBuf) -> Result<Self> {
        if !dataset_path.is_file() {
            return Err(KeplerError::DatasetNotFound { path: dataset_path });
        }

        Ok(Self {
            dataset_path,
            config: KeplerConfig::default(),
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: KeplerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn config(&self) -> &KeplerConfig {
        &self.config
    }

    /// Main processing entry point
    pub async fn process(&self) -> Result<ProcessingResult> {
        let start_time = Instant::now();
        self.config.validate()?;

        info!("Reading dataset {}", self.dataset_path.display());
        let rows = {
            let file = File::open(&self.dataset_path).await?;
            parse(BufReader::new(file), &self.config.reader).await?
        };
        let rows_read = rows.len();
        debug!("Parsed {} data rows", rows_read);

        let filter = PlanetFilter::new(self.config.criteria.clone());
        let planets = filter.apply(rows.into_iter().filter_map(ParsedRow::into_record));

        let stats = ProcessingStats {
            rows_read,
            planets_found: planets.len(),
            dataset_path: self.dataset_path.clone(),
            processing_time_ms: start_time.elapsed().as_millis(),
        };
        info!(
            "Found {} habitable planets among {} rows in {}ms",
            stats.planets_found, stats.rows_read, stats.processing_time_ms
        );

        Ok(ProcessingResult { planets, stats })
    }
}
