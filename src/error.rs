//! Validation errors for game-constant tables.
//!
//! Scoring never fails; only building a `GameData` snapshot from tables can.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("option '{option}' has an empty stage table")]
    EmptyTable { option: String },

    #[error("option '{option}' stage 0 must be 0.0, found {value}")]
    NonZeroBase { option: String, value: f64 },

    #[error("option '{option}' stage {stage} is not a finite number ({value})")]
    NonFiniteValue {
        option: String,
        stage: usize,
        value: f64,
    },

    #[error("option '{option}' decreases at stage {stage} ({previous} -> {value})")]
    NonMonotonic {
        option: String,
        stage: usize,
        previous: f64,
        value: f64,
    },

    #[error("designated option '{0}' is not in the catalog")]
    UnknownDesignatedOption(String),

    #[error("weapon '{weapon}' references unknown option '{option}'")]
    UnknownWeaponOption { weapon: String, option: String },
}
