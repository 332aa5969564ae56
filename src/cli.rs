//! Command-line interface components.

use crate::config::{HabitabilityCriteria, KeplerConfig, ReaderOptions};
use crate::constants::{
    CONFIRMED_DISPOSITION, DATASET_COMMENT, DEFAULT_DATASET_FILE, DEFAULT_DELIMITER,
};
use crate::models::ProcessingResult;
use clap::Parser;
use colored::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kepler")]
#[command(about = "List potentially habitable planets from the NASA Kepler exoplanet table")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the Kepler CSV export (defaults to ./kepler_exoplanets_nasa.csv)
    #[arg(value_name = "DATASET_PATH")]
    pub dataset_path: Option<PathBuf>,

    /// Field delimiter
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Lines starting with this character are ignored
    #[arg(long, default_value_t = DATASET_COMMENT, conflicts_with = "no_comment")]
    pub comment: char,

    /// Treat every line as data, including lines starting with '#'
    #[arg(long)]
    pub no_comment: bool,

    /// Tolerate stray quotes instead of failing
    #[arg(long)]
    pub lazy_quotes: bool,

    /// Ignore whitespace at the start of each field
    #[arg(long)]
    pub trim_leading_space: bool,

    /// Required value of koi_disposition
    #[arg(long, default_value = CONFIRMED_DISPOSITION)]
    pub disposition: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn get_dataset_path(&self) -> PathBuf {
        self.dataset_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(".").join(DEFAULT_DATASET_FILE))
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the processing configuration from the flags
    pub fn to_config(&self) -> KeplerConfig {
        let mut reader = ReaderOptions::for_dataset().with_comma(self.delimiter);
        reader = if self.no_comment {
            reader.without_comment()
        } else {
            reader.with_comment(self.comment)
        };
        if self.lazy_quotes {
            reader = reader.with_lazy_quotes();
        }
        if self.trim_leading_space {
            reader = reader.with_trim_leading_space();
        }

        let criteria = HabitabilityCriteria::default().with_disposition(self.disposition.clone());

        KeplerConfig::default()
            .with_reader(reader)
            .with_criteria(criteria)
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kepler_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!("Logging initialized at level: {}", log_level);
}

/// Print each planet followed by the summary line
pub fn print_results(result: &ProcessingResult) {
    for planet in &result.planets {
        println!("{}", planet);
    }

    println!(
        "{} {}",
        result.stats.planets_found.to_string().bright_green().bold(),
        "habitable planets found!".bright_white()
    );
    println!(
        "  {} {} rows in {}ms",
        "Scanned".bright_cyan(),
        result.stats.rows_read,
        result.stats.processing_time_ms
    );
}
