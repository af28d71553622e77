//! Grade Formatter
//!
//! Maps an aggregated option type's (tier, percentage) pair to a grade band
//! and a display tag.
//!
//! # Grade bands
//! - pct >= 95 → SSS
//! - pct >= 85 → SS
//! - pct >= 70 → S
//! - pct >= 50 → A
//! - otherwise → B
//!
//! Tier `Invalid` always grades `F (invalid)` whatever the percentage.

use crate::types::{GradeTag, Tier};

pub const INVALID_LABEL: &str = "F (invalid)";

/// Grade band label plus display tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub label: &'static str,
    pub tag: GradeTag,
}

/// Convert a percentage to its band label (ignores tier)
pub fn band_label(pct: f64) -> &'static str {
    if pct >= 95.0 {
        "SSS"
    } else if pct >= 85.0 {
        "SS"
    } else if pct >= 70.0 {
        "S"
    } else if pct >= 50.0 {
        "A"
    } else {
        "B"
    }
}

/// Grade an aggregated option type
pub fn grade(tier: Tier, pct: f64) -> Grade {
    match tier {
        Tier::Invalid => Grade {
            label: INVALID_LABEL,
            tag: GradeTag::Invalid,
        },
        Tier::Best => Grade {
            label: band_label(pct),
            tag: GradeTag::Primary,
        },
        Tier::Good => Grade {
            label: band_label(pct),
            tag: GradeTag::Valid,
        },
        Tier::Neutral => Grade {
            label: band_label(pct),
            tag: GradeTag::Neutral,
        },
    }
}
