//! METRIC 2: SKILL COEFFICIENT
//!
//! skill_coeff = 0.01·skill1 + 0.01·skill2 + 0.02·burst
//!
//! The display percentage is the plain level sum over 30 and does not follow
//! the coefficient weighting.

use crate::types::{BuildInput, MAX_SKILL_LEVEL};

pub const SKILL_WEIGHT: f64 = 0.01;
pub const BURST_WEIGHT: f64 = 0.02;

/// Result of M2 calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct M2Result {
    /// Fractional addition to the power coefficient
    pub coeff: f64,
    /// (skill1 + skill2 + burst) / 30 × 100
    pub pct: f64,
}

/// Calculate M2: Skill Coefficient
pub fn calculate_m2(build: &BuildInput) -> M2Result {
    let s1 = f64::from(build.skill1.min(MAX_SKILL_LEVEL));
    let s2 = f64::from(build.skill2.min(MAX_SKILL_LEVEL));
    let burst = f64::from(build.burst.min(MAX_SKILL_LEVEL));

    let coeff = SKILL_WEIGHT * s1 + SKILL_WEIGHT * s2 + BURST_WEIGHT * burst;
    let pct = (s1 + s2 + burst) / (3.0 * f64::from(MAX_SKILL_LEVEL)) * 100.0;

    M2Result { coeff, pct }
}
