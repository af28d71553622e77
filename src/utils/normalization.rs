//! Normalization Utilities
//!
//! Turns loosely-typed values coming from build records and captured game
//! screens into the clean numbers the scoring metrics expect.
//!
//! Nothing in here fails: unparsable input becomes 0 (or `None` where the
//! caller needs to tell "absent" apart from "zero").

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a displayed number such as `"12.19%"`, `"+3"` or `"1,234,567"`.
///
/// Returns `None` for empty or unparsable text and for non-finite results.
pub fn normalize_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '%' | '+' | ',') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Clamp a base stat into the non-negative finite range
pub fn sanitize_stat(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Truncate a raw level to an integer in `0..=max`
pub fn clamp_level(value: f64, max: u8) -> u8 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.trunc().min(f64::from(max)) as u8
}

/// `part / whole` as a percentage, 0 when `whole` is not positive
pub fn share_pct(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Normalize a character name for registry lookups.
///
/// 1. Drop parenthesised qualifiers (`"Red Hood (Treasure)"` -> `"Red Hood"`)
/// 2. Drop whitespace and punctuation
/// 3. Lowercase
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth = 0usize;

    for c in name.chars() {
        match c {
            '(' | '（' => depth += 1,
            ')' | '）' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            _ if c.is_alphanumeric() => out.extend(c.to_lowercase()),
            _ => {}
        }
    }

    out
}

/// Coerce any JSON value to a number (0 when it cannot be read as one)
fn value_to_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => normalize_value(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Lenient serde adapters for build records.
///
/// Records arrive from a database layer that stores whatever the UI typed,
/// so every numeric field accepts numbers, numeric strings and `null`.
pub mod lenient {
    use super::*;
    use crate::types::{Line, LINES_PER_PART, NO_OPTION};

    /// Base stat: non-negative finite `f64`
    pub fn stat<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(sanitize_stat(value_to_f64(&value)))
    }

    /// Skill / burst level: `0..=10`
    pub fn skill_level<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(clamp_level(value_to_f64(&value), crate::types::MAX_SKILL_LEVEL))
    }

    /// Cube or collection skill level: `0..=15`
    pub fn upgrade_level<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(clamp_level(value_to_f64(&value), crate::types::MAX_UPGRADE_LEVEL))
    }

    /// Overload stage; range-checked later against the catalog entry
    pub fn stage<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(clamp_level(value_to_f64(&value), u8::MAX))
    }

    /// Option key; `null`, numbers and blank text read as the empty option
    pub fn option_type<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_str().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => NO_OPTION.to_string(),
        })
    }

    /// Lines of one part: any array length, padded with empty lines and
    /// cut after the third. Entries that are not line objects read as empty.
    pub fn part_lines<'de, D>(deserializer: D) -> Result<[Line; LINES_PER_PART], D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let mut lines: [Line; LINES_PER_PART] = Default::default();

        let Value::Array(entries) = value else {
            return Ok(lines);
        };
        if entries.len() > LINES_PER_PART {
            tracing::warn!("Ignoring {} extra overload lines", entries.len() - LINES_PER_PART);
        }

        for (slot, entry) in entries.into_iter().take(LINES_PER_PART).enumerate() {
            lines[slot] = serde_json::from_value(entry).unwrap_or_default();
        }
        Ok(lines)
    }
}
