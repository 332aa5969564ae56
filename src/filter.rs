//! Habitable-planet selection and column projection.
//!
//! A record is kept when its disposition matches exactly and every
//! configured numeric column lies strictly inside its bounds. Kept records
//! are projected onto the summary column list.

use crate::config::HabitabilityCriteria;
use crate::models::{FieldValue, PlanetSummary, Record};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct PlanetFilter {
    criteria: HabitabilityCriteria,
}

impl Default for PlanetFilter {
    fn default() -> Self {
        Self::new(HabitabilityCriteria::default())
    }
}

impl PlanetFilter {
    pub fn new(criteria: HabitabilityCriteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &HabitabilityCriteria {
        &self.criteria
    }

    pub fn is_habitable(&self, record: &Record) -> bool {
        let disposition = record.get_str(&self.criteria.disposition_column);
        if disposition != Some(self.criteria.disposition.as_str()) {
            return false;
        }

        self.criteria
            .ranges
            .iter()
            .all(|(column, bounds)| bounds.contains(numeric(record, column)))
    }

    /// Keep only the summary columns present in `record`, in summary order
    pub fn summarize(&self, record: &Record) -> PlanetSummary {
        let columns = self
            .criteria
            .summary_columns
            .iter()
            .filter_map(|column| {
                record
                    .get(column)
                    .map(|value| (column.clone(), value.clone()))
            })
            .collect();

        PlanetSummary { columns }
    }

    pub fn apply<I>(&self, records: I) -> Vec<PlanetSummary>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut examined = 0;
        let planets: Vec<PlanetSummary> = records
            .into_iter()
            .inspect(|_| examined += 1)
            .filter(|record| self.is_habitable(record))
            .map(|record| self.summarize(&record))
            .collect();

        debug!(
            "{} of {} records passed the habitability criteria",
            planets.len(),
            examined
        );
        planets
    }
}

/// Loose numeric value of a column; a missing column is NaN
fn numeric(record: &Record, column: &str) -> f64 {
    match record.get(column) {
        Some(value) => {
            let number = value.to_f64();
            if number.is_nan() {
                if let FieldValue::Text(text) = value {
                    warn!("Column '{}' is not numeric: {:?}", column, text);
                }
            }
            number
        }
        None => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bounds;
    use crate::constants::{COL_PLANET_RADIUS, SUMMARY_COLUMNS};

    fn planet(disposition: &str, prad: &str, srad: &str, smass: &str) -> Record {
        [
            ("kepler_name", "Kepler-452 b"),
            ("koi_disposition", disposition),
            ("koi_prad", prad),
            ("koi_srad", srad),
            ("koi_smass", smass),
            ("koi_count", "1"),
            ("koi_steff", "5757"),
            ("koi_period", "384.8"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_earth_like_planet_passes() {
        let filter = PlanetFilter::default();
        assert!(filter.is_habitable(&planet("CONFIRMED", "1.09", "1.0", "1.03")));
    }

    #[test]
    fn test_disposition_must_match_exactly() {
        let filter = PlanetFilter::default();
        assert!(!filter.is_habitable(&planet("CANDIDATE", "1.09", "1.0", "1.03")));
        assert!(!filter.is_habitable(&planet("confirmed", "1.09", "1.0", "1.03")));
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let filter = PlanetFilter::default();
        assert!(!filter.is_habitable(&planet("CONFIRMED", "1.5", "1.0", "1.0")));
        assert!(!filter.is_habitable(&planet("CONFIRMED", "1.0", "0.99", "1.0")));
        assert!(!filter.is_habitable(&planet("CONFIRMED", "1.0", "1.0", "0.78")));
    }

    #[test]
    fn test_blank_and_garbage_values_fail() {
        let filter = PlanetFilter::default();
        // blank reads as zero, which is below every lower bound
        assert!(!filter.is_habitable(&planet("CONFIRMED", "", "1.0", "1.0")));
        assert!(!filter.is_habitable(&planet("CONFIRMED", "abc", "1.0", "1.0")));
    }

    #[test]
    fn test_missing_column_fails() {
        let filter = PlanetFilter::default();
        let record: Record = [("koi_disposition", "CONFIRMED")].into_iter().collect();
        assert!(!filter.is_habitable(&record));
    }

    #[test]
    fn test_converted_numbers_are_used() {
        let filter = PlanetFilter::default();
        let mut record = planet("CONFIRMED", "x", "1.0", "1.0");
        record.insert("koi_prad", 1.2);
        assert!(filter.is_habitable(&record));
    }

    #[test]
    fn test_custom_bounds() {
        let criteria =
            HabitabilityCriteria::default().with_range(COL_PLANET_RADIUS, Bounds::new(1.5, 3.0));
        let filter = PlanetFilter::new(criteria);
        assert!(filter.is_habitable(&planet("CONFIRMED", "2.0", "1.0", "1.0")));
        assert!(!filter.is_habitable(&planet("CONFIRMED", "1.0", "1.0", "1.0")));
    }

    #[test]
    fn test_summary_projects_in_order() {
        let filter = PlanetFilter::default();
        let summary = filter.summarize(&planet("CONFIRMED", "1.09", "1.0", "1.03"));

        let names: Vec<&str> = summary.columns.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, SUMMARY_COLUMNS);
        assert_eq!(summary.get("koi_period"), None);
        assert_eq!(summary.get("koi_prad"), Some(&FieldValue::from("1.09")));
    }

    #[test]
    fn test_summary_omits_absent_columns() {
        let filter = PlanetFilter::default();
        let record: Record = [("kepler_name", "Kepler-22 b"), ("koi_prad", "2.1")]
            .into_iter()
            .collect();

        let summary = filter.summarize(&record);
        assert_eq!(summary.columns.len(), 2);
        assert_eq!(summary.name(), Some("Kepler-22 b"));
    }

    #[test]
    fn test_apply_filters_and_projects() {
        let filter = PlanetFilter::default();
        let planets = filter.apply(vec![
            planet("CONFIRMED", "1.09", "1.0", "1.03"),
            planet("FALSE POSITIVE", "1.09", "1.0", "1.03"),
            planet("CONFIRMED", "2.4", "1.0", "1.03"),
        ]);

        assert_eq!(planets.len(), 1);
        assert_eq!(planets[0].name(), Some("Kepler-452 b"));
    }
}
