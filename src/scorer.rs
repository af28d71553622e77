//! Build Scorer - Main coordinator for scoring character builds
//!
//! Combines the five metric families into one power number:
//!
//! power = round(base_sum × (1.3 + skill + cube + collection + overload) / 100)
//!
//! Also reports every term's CP contribution, the display percentages, the
//! loadout completeness and the per-type overload breakdown.
//! Includes both single-build and parallel (Rayon) batch scoring.

use rayon::prelude::*;
use std::sync::Arc;

use crate::classifier::{Classification, PriorityClassifier};
use crate::data::GameData;
use crate::metrics::*;
use crate::quantizer::{self, Observed};
use crate::types::{BuildInput, CharacterProfile, ScoreDetail, ScoreResult, Tier};

/// One entry of a batch scoring request
#[derive(Debug, Clone, Copy)]
pub struct ScoreJob<'a> {
    pub build: &'a BuildInput,
    pub profile: Option<&'a CharacterProfile>,
}

impl<'a> ScoreJob<'a> {
    pub fn new(build: &'a BuildInput, profile: Option<&'a CharacterProfile>) -> Self {
        Self { build, profile }
    }
}

/// Main build scorer, bound to one immutable game-data snapshot
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    data: Arc<GameData>,
}

impl ScoringEngine {
    pub fn new(data: Arc<GameData>) -> Self {
        Self { data }
    }

    /// Engine over the tables compiled into the crate
    pub fn embedded() -> anyhow::Result<Self> {
        Ok(Self::new(Arc::new(GameData::embedded()?)))
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    fn classifier(&self) -> PriorityClassifier<'_> {
        PriorityClassifier::new(&self.data.catalog, &self.data.weapons)
    }

    /// Score a build, with or without a curated profile
    pub fn score(&self, build: &BuildInput, profile: Option<&CharacterProfile>) -> ScoreResult {
        let classifier = self.classifier();

        let m1 = calculate_m1(build);
        let m2 = calculate_m2(build);
        let m3 = calculate_m3(build);
        let m4 = calculate_m4(build);
        let m5 = calculate_m5(
            &build.loadout,
            profile,
            &self.data.catalog,
            &classifier,
            m1.base_sum,
        );

        let total_coeff = BASE_COEFFICIENT + m2.coeff + m3.coeff + m4.coeff + m5.coeff;
        let power = cp_contribution(m1.base_sum, total_coeff).round() as u64;

        tracing::debug!(
            "Scored build: power={}, completeness={:.2}%, equipped lines={}",
            power,
            m5.completeness_pct,
            m5.equipped_lines
        );

        ScoreResult {
            power,
            completeness_pct: m5.completeness_pct,
            detail: ScoreDetail {
                base_cp: cp_contribution(m1.base_sum, BASE_COEFFICIENT),
                skill_cp: cp_contribution(m1.base_sum, m2.coeff),
                skill_pct: m2.pct,
                cube_cp: cp_contribution(m1.base_sum, m3.coeff),
                cube_pct: m3.pct,
                collection_cp: cp_contribution(m1.base_sum, m4.coeff),
                collection_pct: m4.pct,
                overload_cp: cp_contribution(m1.base_sum, m5.coeff),
                overload_completeness_pct: m5.completeness_pct,
                overload_aggregated: m5.aggregated,
            },
        }
    }

    /// Score a build against the preset profile registered for `character`
    pub fn score_named(&self, build: &BuildInput, character: &str) -> ScoreResult {
        let profile = self.data.profile(character);
        if profile.is_none() {
            tracing::debug!("No preset profile for '{}' - scoring with defaults", character);
        }
        self.score(build, profile)
    }

    /// Score many builds in parallel; results follow input order
    pub fn score_batch(&self, jobs: &[ScoreJob<'_>]) -> Vec<ScoreResult> {
        jobs.par_iter()
            .map(|job| self.score(job.build, job.profile))
            .collect()
    }

    /// Nearest catalog stage to a captured reading
    pub fn nearest_stage<'o>(&self, option_type: &str, observed: impl Into<Observed<'o>>) -> usize {
        quantizer::nearest_stage(&self.data.catalog, option_type, observed)
    }

    /// Tier of an option type for a character
    pub fn classify(&self, profile: Option<&CharacterProfile>, option_type: &str) -> Tier {
        self.classifier().classify(profile, option_type)
    }

    /// Tier plus the rule that decided it
    pub fn explain(&self, profile: Option<&CharacterProfile>, option_type: &str) -> Classification {
        self.classifier().explain(profile, option_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::TierSource;
    use crate::types::{CollectionGrade, GradeTag, Part};
    use approx::assert_relative_eq;

    fn engine() -> ScoringEngine {
        ScoringEngine::embedded().unwrap()
    }

    fn reference_build() -> BuildInput {
        BuildInput::with_stats(1_000_000.0, 50_000.0, 10_000.0).skills(10, 10, 10)
    }

    #[test]
    fn test_power_without_overload() {
        let result = engine().score(&reference_build(), None);
        // base_sum 2,367,500 × (1.3 + 0.4) / 100
        assert!((result.power as i64 - 40_248).abs() <= 1);
        assert_relative_eq!(result.detail.skill_pct, 100.0, epsilon = 1e-9);
        assert_eq!(result.detail.overload_cp, 0.0);
        assert_eq!(result.completeness_pct, 0.0);
        assert!(result.detail.overload_aggregated.is_empty());
    }

    #[test]
    fn test_cp_terms_sum_to_power() {
        let build = reference_build()
            .cube(7)
            .collection(CollectionGrade::SR, 5, 3)
            .line(Part::Helmet, 0, "attack_increase", 10)
            .line(Part::Gloves, 2, "advantage_code_damage_increase", 4);
        let result = engine().score(&build, None);
        let d = &result.detail;
        let sum = d.base_cp + d.skill_cp + d.cube_cp + d.collection_cp + d.overload_cp;
        assert!((sum - result.power as f64).abs() <= 0.5 + 1e-6);
        assert_relative_eq!(d.cube_pct, 7.0 / 15.0 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(d.collection_pct, 18.66 / 40.66 * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_overload_completeness_mirrors_top_level() {
        let build = reference_build().line(Part::Armor, 1, "attack_increase", 15);
        let result = engine().score_named(&build, "Red Hood");
        assert_eq!(result.completeness_pct, result.detail.overload_completeness_pct);
        // best tier, full value: 100 / 1200
        assert_relative_eq!(result.completeness_pct, 100.0 / 12.0, epsilon = 1e-9);
        let entry = &result.detail.overload_aggregated[0];
        assert_eq!(entry.tag, GradeTag::Primary);
        assert_eq!(entry.grade_label, "SSS");
    }

    #[test]
    fn test_score_named_falls_back_to_defaults() {
        let build = reference_build().line(Part::Boots, 0, "defense_increase", 15);
        let engine = engine();
        assert_eq!(engine.score_named(&build, "Unlisted"), engine.score(&build, None));
        // Red Hood lists defense as invalid
        let red_hood = engine.score_named(&build, "Red Hood (Treasure)");
        assert_eq!(red_hood.detail.overload_aggregated[0].grade_label, "F (invalid)");
    }

    #[test]
    fn test_batch_matches_sequential() {
        let engine = engine();
        let profile = engine.data().profile("Modernia").cloned();
        let builds: Vec<BuildInput> = (0..32u8)
            .map(|i| {
                reference_build()
                    .cube(i % 16)
                    .line(Part::Helmet, 0, "max_ammo_increase", i % 16)
            })
            .collect();
        let jobs: Vec<ScoreJob<'_>> = builds
            .iter()
            .enumerate()
            .map(|(i, b)| ScoreJob::new(b, if i % 2 == 0 { profile.as_ref() } else { None }))
            .collect();

        let batch = engine.score_batch(&jobs);
        let sequential: Vec<ScoreResult> =
            jobs.iter().map(|j| engine.score(j.build, j.profile)).collect();
        assert_eq!(batch, sequential);
    }

    #[test]
    fn test_entry_points_delegate() {
        let engine = engine();
        assert_eq!(engine.nearest_stage("attack_increase", "12.19%"), 9);
        assert_eq!(engine.nearest_stage("attack_increase", 17.77), 15);
        assert_eq!(engine.classify(None, "attack_increase"), Tier::Good);
        assert_eq!(engine.classify(None, "defense_increase"), Tier::Neutral);
        assert_eq!(
            engine.explain(None, "advantage_code_damage_increase").source,
            TierSource::DesignatedBaseline
        );
    }
}
