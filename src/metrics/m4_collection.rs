//! METRIC 4: COLLECTION COEFFICIENT
//!
//! collection_coeff = 0.0069·collection_value, where the value depends on the
//! collection item grade:
//!
//! | Grade | Value                    | Max   |
//! |-------|--------------------------|-------|
//! | None  | 0                        | -     |
//! | R     | skill1 + 6.33            | 21.33 |
//! | SR    | skill1 + skill2 + 10.66  | 40.66 |
//! | SSR   | skill1 + skill2 + 15.00  | 45.00 |
//!
//! Skills here are the collection item's own skill levels (0-15).

use crate::types::{BuildInput, CollectionGrade, MAX_UPGRADE_LEVEL};
use crate::utils::share_pct;

pub const COLLECTION_WEIGHT: f64 = 0.0069;

const R_BASE: f64 = 6.33;
const SR_BASE: f64 = 10.66;
const SSR_BASE: f64 = 15.00;

/// Result of M4 calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct M4Result {
    pub value: f64,
    pub max_value: f64,
    pub coeff: f64,
    /// value / max × 100, always 0 for grade None
    pub pct: f64,
}

/// (value, max) for a grade and its two skill levels
pub fn collection_value(grade: CollectionGrade, skill1: u8, skill2: u8) -> (f64, f64) {
    let s1 = f64::from(skill1.min(MAX_UPGRADE_LEVEL));
    let s2 = f64::from(skill2.min(MAX_UPGRADE_LEVEL));
    let cap = f64::from(MAX_UPGRADE_LEVEL);

    match grade {
        CollectionGrade::None => (0.0, 0.0),
        CollectionGrade::R => (s1 + R_BASE, cap + R_BASE),
        CollectionGrade::SR => (s1 + s2 + SR_BASE, 2.0 * cap + SR_BASE),
        CollectionGrade::SSR => (s1 + s2 + SSR_BASE, 2.0 * cap + SSR_BASE),
    }
}

/// Calculate M4: Collection Coefficient
pub fn calculate_m4(build: &BuildInput) -> M4Result {
    let (value, max_value) = collection_value(
        build.collection_grade,
        build.collection_skill1,
        build.collection_skill2,
    );

    M4Result {
        value,
        max_value,
        coeff: COLLECTION_WEIGHT * value,
        pct: share_pct(value, max_value),
    }
}
