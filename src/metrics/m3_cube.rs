//! METRIC 3: CUBE COEFFICIENT
//!
//! cube_coeff = 0.0092·cube_level, levels 0-15.

use crate::types::{BuildInput, MAX_UPGRADE_LEVEL};

pub const CUBE_WEIGHT: f64 = 0.0092;

/// Result of M3 calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct M3Result {
    pub coeff: f64,
    /// cube_level / 15 × 100
    pub pct: f64,
}

/// Calculate M3: Cube Coefficient
pub fn calculate_m3(build: &BuildInput) -> M3Result {
    let level = f64::from(build.cube_level.min(MAX_UPGRADE_LEVEL));

    M3Result {
        coeff: CUBE_WEIGHT * level,
        pct: level / f64::from(MAX_UPGRADE_LEVEL) * 100.0,
    }
}
