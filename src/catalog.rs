//! Overload Option Catalog
//!
//! Static table of the value granted by every overload option type at each
//! discrete stage. Stage 0 is "no effect" and always tabulates 0.0.
//!
//! Lookups are total: an unknown option type or an out-of-range stage reads
//! as 0.0, the same as an empty line.
//!
//! One option type is designated (the advantage-code damage line). It earns a
//! higher CP multiplier per stage than every other type, and the classifier
//! gives it a class-based baseline tier.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// CP coefficient per stage of the designated option type
pub const DESIGNATED_CP_MULTIPLIER: f64 = 0.00828;

/// CP coefficient per stage of every other option type
pub const STANDARD_CP_MULTIPLIER: f64 = 0.0069;

/// On-disk layout of `overload_catalog.json`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogFile {
    pub designated_option: String,
    pub options: FxHashMap<String, Vec<f64>>,
}

/// Validated, immutable option catalog
#[derive(Debug, Clone)]
pub struct OptionCatalog {
    stages: FxHashMap<String, Vec<f64>>,
    designated: String,
}

impl OptionCatalog {
    /// Build a catalog, checking every table
    ///
    /// Each table must be non-empty, finite, start at 0.0 and never decrease.
    pub fn new(
        stages: FxHashMap<String, Vec<f64>>,
        designated: impl Into<String>,
    ) -> Result<Self, DataError> {
        let designated = designated.into();

        for (option, values) in &stages {
            validate_table(option, values)?;
        }

        if !stages.contains_key(&designated) {
            return Err(DataError::UnknownDesignatedOption(designated));
        }

        Ok(Self { stages, designated })
    }

    pub fn from_file(file: CatalogFile) -> Result<Self, DataError> {
        Self::new(file.options, file.designated_option)
    }

    /// Value granted by `option_type` at `stage` (0.0 when unknown)
    pub fn value_at(&self, option_type: &str, stage: usize) -> f64 {
        self.stages
            .get(option_type)
            .and_then(|values| values.get(stage))
            .copied()
            .unwrap_or(0.0)
    }

    /// Value at the highest stage (0.0 when unknown)
    pub fn max_value(&self, option_type: &str) -> f64 {
        self.stages
            .get(option_type)
            .and_then(|values| values.last())
            .copied()
            .unwrap_or(0.0)
    }

    /// Full stage table for `option_type`
    pub fn stages(&self, option_type: &str) -> Option<&[f64]> {
        self.stages.get(option_type).map(Vec::as_slice)
    }

    pub fn contains(&self, option_type: &str) -> bool {
        self.stages.contains_key(option_type)
    }

    /// Number of tabulated stages, including stage 0
    pub fn stage_count(&self, option_type: &str) -> usize {
        self.stages.get(option_type).map_or(0, Vec::len)
    }

    /// Highest valid stage index for `option_type`
    pub fn max_stage(&self, option_type: &str) -> usize {
        self.stage_count(option_type).saturating_sub(1)
    }

    /// Known option types, sorted
    pub fn option_types(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.stages.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn designated(&self) -> &str {
        &self.designated
    }

    pub fn is_designated(&self, option_type: &str) -> bool {
        option_type == self.designated
    }

    /// CP coefficient contributed by each stage of `option_type`
    pub fn cp_multiplier(&self, option_type: &str) -> f64 {
        if self.is_designated(option_type) {
            DESIGNATED_CP_MULTIPLIER
        } else {
            STANDARD_CP_MULTIPLIER
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

fn validate_table(option: &str, values: &[f64]) -> Result<(), DataError> {
    let Some(&base) = values.first() else {
        return Err(DataError::EmptyTable {
            option: option.to_string(),
        });
    };

    if base != 0.0 {
        return Err(DataError::NonZeroBase {
            option: option.to_string(),
            value: base,
        });
    }

    if let Some((stage, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(DataError::NonFiniteValue {
            option: option.to_string(),
            stage,
            value,
        });
    }

    for (stage, pair) in values.windows(2).enumerate() {
        if !(pair[1] >= pair[0]) {
            return Err(DataError::NonMonotonic {
                option: option.to_string(),
                stage: stage + 1,
                previous: pair[0],
                value: pair[1],
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_catalog() -> OptionCatalog {
        let mut stages = FxHashMap::default();
        stages.insert("attack_increase".to_string(), vec![0.0, 4.77, 5.70, 6.62]);
        stages.insert("advantage_code_damage_increase".to_string(), vec![0.0, 9.54, 11.40]);
        OptionCatalog::new(stages, "advantage_code_damage_increase").unwrap()
    }

    #[test]
    fn test_value_lookup() {
        let catalog = small_catalog();
        assert_relative_eq!(catalog.value_at("attack_increase", 2), 5.70, epsilon = 1e-9);
        assert_eq!(catalog.value_at("attack_increase", 0), 0.0);
        assert_relative_eq!(catalog.max_value("attack_increase"), 6.62, epsilon = 1e-9);
        assert_eq!(catalog.max_stage("attack_increase"), 3);
    }

    #[test]
    fn test_unknown_and_out_of_range_read_zero() {
        let catalog = small_catalog();
        assert_eq!(catalog.value_at("attack_increase", 4), 0.0);
        assert_eq!(catalog.value_at("speed_increase", 1), 0.0);
        assert_eq!(catalog.max_value("speed_increase"), 0.0);
        assert_eq!(catalog.stage_count("speed_increase"), 0);
    }

    #[test]
    fn test_designated_multiplier() {
        let catalog = small_catalog();
        assert!(catalog.is_designated("advantage_code_damage_increase"));
        assert_eq!(catalog.cp_multiplier("advantage_code_damage_increase"), DESIGNATED_CP_MULTIPLIER);
        assert_eq!(catalog.cp_multiplier("attack_increase"), STANDARD_CP_MULTIPLIER);
        assert_eq!(catalog.cp_multiplier("unknown"), STANDARD_CP_MULTIPLIER);
    }

    #[test]
    fn test_option_types_sorted() {
        let catalog = small_catalog();
        assert_eq!(
            catalog.option_types(),
            vec!["advantage_code_damage_increase", "attack_increase"]
        );
    }

    #[test]
    fn test_validation_rejects_bad_tables() {
        let mut stages = FxHashMap::default();
        stages.insert("a".to_string(), vec![]);
        assert!(matches!(
            OptionCatalog::new(stages, "a"),
            Err(DataError::EmptyTable { .. })
        ));

        let mut stages = FxHashMap::default();
        stages.insert("a".to_string(), vec![1.0, 2.0]);
        assert!(matches!(
            OptionCatalog::new(stages, "a"),
            Err(DataError::NonZeroBase { .. })
        ));

        let mut stages = FxHashMap::default();
        stages.insert("a".to_string(), vec![0.0, 3.0, 2.0]);
        assert_eq!(
            OptionCatalog::new(stages, "a").unwrap_err(),
            DataError::NonMonotonic {
                option: "a".to_string(),
                stage: 2,
                previous: 3.0,
                value: 2.0
            }
        );

        let mut stages = FxHashMap::default();
        stages.insert("a".to_string(), vec![0.0, 1.0, f64::INFINITY]);
        assert!(matches!(
            OptionCatalog::new(stages, "a"),
            Err(DataError::NonFiniteValue { stage: 2, .. })
        ));

        let mut stages = FxHashMap::default();
        stages.insert("a".to_string(), vec![0.0, 1.0]);
        assert_eq!(
            OptionCatalog::new(stages, "b").unwrap_err(),
            DataError::UnknownDesignatedOption("b".to_string())
        );
    }
}
