//! Metric modules for build scoring
//!
//! Each coefficient family of the power formula lives in its own module.
//! Every family reports a fractional addition to the 1.3 baseline
//! coefficient; the scorer turns them into CP with [`cp_contribution`].

pub mod m1_base_stats;
pub mod m2_skills;
pub mod m3_cube;
pub mod m4_collection;
pub mod m5_overload;

// Re-export metric functions
pub use m1_base_stats::{calculate_m1, M1Result};
pub use m2_skills::{calculate_m2, M2Result};
pub use m3_cube::{calculate_m3, M3Result};
pub use m4_collection::{calculate_m4, collection_value, M4Result};
pub use m5_overload::{calculate_m5, M5Result, MAX_COMPLETENESS_POINTS};

/// Coefficient every build starts from
pub const BASE_COEFFICIENT: f64 = 1.3;

/// CP granted by one coefficient term
pub fn cp_contribution(base_sum: f64, coeff: f64) -> f64 {
    base_sum * coeff / 100.0
}
