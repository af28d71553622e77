//! METRIC 5: OVERLOAD LINES
//!
//! Scores the 12 overload lines (4 parts × 3 lines) three ways:
//!   1. **CP coefficient**: every equipped line adds `stage × multiplier`
//!      (0.00828 for the designated advantage-code type, 0.0069 otherwise)
//!   2. **Completeness**: each line scores `value / max × 100 × tier weight`;
//!      the sum is taken against the fixed 12 × 100 maximum so builds stay
//!      comparable whatever they equip
//!   3. **Aggregation**: lines grouped by option type, summed and graded
//!
//! A line is equipped when its option type is in the catalog and its stage is
//! above 0. Stages beyond the catalog table are clamped to its last stage.
//!
//! Tiers are resolved once per distinct option type and reused for every
//! line of that type.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::cp_contribution;
use crate::catalog::OptionCatalog;
use crate::classifier::PriorityClassifier;
use crate::types::{AggregatedLine, CharacterProfile, Line, Loadout, Tier, NO_OPTION, TOTAL_LINES};
use crate::utils::{grade, share_pct};

/// Completeness points available across a full loadout
pub const MAX_COMPLETENESS_POINTS: f64 = TOTAL_LINES as f64 * 100.0;

/// Result of M5 calculation
#[derive(Debug, Clone, PartialEq)]
pub struct M5Result {
    /// Summed overload coefficient
    pub coeff: f64,
    /// Weighted line score / (12 × 100) × 100, within 0-100
    pub completeness_pct: f64,
    /// Lines that counted as equipped
    pub equipped_lines: usize,
    /// One entry per option type, first-seen order
    pub aggregated: Vec<AggregatedLine>,
}

/// Running totals for one option type
#[derive(Debug)]
struct TypeTotals<'b> {
    option_type: &'b str,
    tier: Tier,
    line_count: usize,
    value_sum: f64,
    max_sum: f64,
    cp_sum: f64,
}

/// Effective stage of a line, `None` when the line has no effect
fn equipped_stage(catalog: &OptionCatalog, line: &Line) -> Option<usize> {
    if line.stage == 0 || line.option_type == NO_OPTION {
        return None;
    }

    if !catalog.contains(&line.option_type) {
        tracing::warn!(
            "Ignoring unknown option type '{}' (stage {})",
            line.option_type, line.stage
        );
        return None;
    }

    let max_stage = catalog.max_stage(&line.option_type);
    let stage = usize::from(line.stage);
    if stage > max_stage {
        tracing::warn!(
            "Clamping '{}' stage {} to {}",
            line.option_type, stage, max_stage
        );
    }

    Some(stage.min(max_stage)).filter(|s| *s > 0)
}

/// Calculate M5: Overload Lines
pub fn calculate_m5<'b>(
    loadout: &'b Loadout,
    profile: Option<&CharacterProfile>,
    catalog: &OptionCatalog,
    classifier: &PriorityClassifier<'_>,
    base_sum: f64,
) -> M5Result {
    let mut tiers: FxHashMap<&'b str, Tier> = FxHashMap::default();
    let mut totals: SmallVec<[TypeTotals<'b>; TOTAL_LINES]> = SmallVec::new();

    let mut coeff = 0.0;
    let mut points = 0.0;
    let mut equipped_lines = 0;

    for (_part, _slot, line) in loadout.lines() {
        let Some(stage) = equipped_stage(catalog, line) else {
            continue;
        };
        let option_type = line.option_type.as_str();

        let tier = *tiers
            .entry(option_type)
            .or_insert_with(|| classifier.classify(profile, option_type));

        // CP
        let line_coeff = stage as f64 * catalog.cp_multiplier(option_type);
        coeff += line_coeff;

        // Completeness
        let value = catalog.value_at(option_type, stage);
        let max = catalog.max_value(option_type);
        points += share_pct(value, max) * tier.weight();
        equipped_lines += 1;

        // Aggregation
        let entry = match totals.iter().position(|t| t.option_type == option_type) {
            Some(idx) => &mut totals[idx],
            None => {
                totals.push(TypeTotals {
                    option_type,
                    tier,
                    line_count: 0,
                    value_sum: 0.0,
                    max_sum: 0.0,
                    cp_sum: 0.0,
                });
                let last = totals.len() - 1;
                &mut totals[last]
            }
        };
        entry.line_count += 1;
        entry.value_sum += value;
        entry.max_sum += max;
        entry.cp_sum += cp_contribution(base_sum, line_coeff);
    }

    let completeness_pct = (points / MAX_COMPLETENESS_POINTS * 100.0).clamp(0.0, 100.0);

    let aggregated = totals
        .into_iter()
        .map(|t| {
            let pct = share_pct(t.value_sum, t.max_sum);
            let graded = grade(t.tier, pct);
            AggregatedLine {
                option_type: t.option_type.to_string(),
                line_count: t.line_count,
                value_sum: t.value_sum,
                max_sum: t.max_sum,
                pct,
                cp_sum: t.cp_sum,
                tier: t.tier,
                grade_label: graded.label.to_string(),
                tag: graded.tag,
            }
        })
        .collect();

    M5Result {
        coeff,
        completeness_pct,
        equipped_lines,
        aggregated,
    }
}
