//! Utility modules for build scoring
//!
//! Contains shared functionality used across the scoring components:
//! - Normalization: lenient numeric coercion and name normalization
//! - Grade: grade bands and display tags for aggregated option types

pub mod normalization;
pub mod grade;

// Re-export commonly used items
pub use normalization::{normalize_value, normalize_name, sanitize_stat, clamp_level, share_pct};
pub use grade::{grade, band_label, Grade};
