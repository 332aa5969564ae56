//! Application constants for the Kepler processor
//!
//! Column names of the NASA Kepler Objects of Interest table and the
//! default values used when the CLI does not override them.

// =============================================================================
// Reader Defaults
// =============================================================================

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Comment prefix used by the NASA exoplanet archive exports
pub const DATASET_COMMENT: char = '#';

/// Quote character; not configurable
pub const QUOTE: char = '"';

/// Characters that can never be used as delimiter or comment prefix
pub const RESERVED_CHARS: &[char] = &['\r', '\n', QUOTE];

/// Dataset file name looked up when no path is given
pub const DEFAULT_DATASET_FILE: &str = "kepler_exoplanets_nasa.csv";

// =============================================================================
// Kepler Objects of Interest Columns
// =============================================================================

pub const COL_KEPLER_NAME: &str = "kepler_name";
pub const COL_DISPOSITION: &str = "koi_disposition";
pub const COL_PLANET_RADIUS: &str = "koi_prad";
pub const COL_STELLAR_RADIUS: &str = "koi_srad";
pub const COL_STELLAR_MASS: &str = "koi_smass";
pub const COL_PLANET_COUNT: &str = "koi_count";
pub const COL_STELLAR_TEMP: &str = "koi_steff";

/// Columns kept in each planet summary, in display order
pub const SUMMARY_COLUMNS: &[&str] = &[
    COL_KEPLER_NAME,
    COL_PLANET_RADIUS,
    COL_STELLAR_MASS,
    COL_STELLAR_RADIUS,
    COL_PLANET_COUNT,
    COL_STELLAR_TEMP,
];

// =============================================================================
// Habitability Thresholds (exclusive bounds)
// =============================================================================

pub const CONFIRMED_DISPOSITION: &str = "CONFIRMED";

/// Planetary radius in Earth radii
pub const PLANET_RADIUS_BOUNDS: (f64, f64) = (0.5, 1.5);

/// Stellar radius in solar radii
pub const STELLAR_RADIUS_BOUNDS: (f64, f64) = (0.99, 1.01);

/// Stellar mass in solar masses
pub const STELLAR_MASS_BOUNDS: (f64, f64) = (0.78, 1.04);
