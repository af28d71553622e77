//! METRIC 1: BASE STAT SUM
//!
//! Fixed linear combination of HP, ATK and DEF. Every coefficient term of the
//! power formula is a percentage of this sum.
//!
//! base_sum = 0.7·hp + 19.35·atk + 70.0·def

use crate::types::BuildInput;
use crate::utils::sanitize_stat;

pub const HP_WEIGHT: f64 = 0.7;
pub const ATK_WEIGHT: f64 = 19.35;
pub const DEF_WEIGHT: f64 = 70.0;

/// Result of M1 calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct M1Result {
    /// Sanitized stats actually used
    pub hp: f64,
    pub atk: f64,
    pub def: f64,
    /// Weighted stat sum
    pub base_sum: f64,
}

/// Calculate M1: Base Stat Sum
///
/// Negative or non-finite stats count as 0.
pub fn calculate_m1(build: &BuildInput) -> M1Result {
    let hp = sanitize_stat(build.hp);
    let atk = sanitize_stat(build.atk);
    let def = sanitize_stat(build.def);

    if hp != build.hp || atk != build.atk || def != build.def {
        tracing::warn!(
            "Coerced base stats (hp={}, atk={}, def={}) to non-negative values",
            build.hp, build.atk, build.def
        );
    }

    M1Result {
        hp,
        atk,
        def,
        base_sum: HP_WEIGHT * hp + ATK_WEIGHT * atk + DEF_WEIGHT * def,
    }
}
