//! Captured build ingestion
//!
//! Converts a record produced by an external screen extractor into a
//! `BuildInput`. Overload options arrive as displayed percentages and are
//! snapped to catalog stages with the quantizer.
//!
//! Field names are accepted in both snake_case and the extractor's camelCase.

use serde::{Deserialize, Serialize};

use crate::catalog::OptionCatalog;
use crate::quantizer::nearest_stage;
use crate::types::{BuildInput, CollectionGrade, Line, Part, LINES_PER_PART};
use crate::utils::normalization::lenient;

/// Skill level assumed when a capture has no skill tab
const DEFAULT_SKILL_LEVEL: u8 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapturedMeta {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapturedStats {
    #[serde(deserialize_with = "lenient::stat")]
    pub hp: f64,
    #[serde(deserialize_with = "lenient::stat")]
    pub atk: f64,
    #[serde(deserialize_with = "lenient::stat")]
    pub def: f64,
    /// Power shown in game; kept for comparison only
    #[serde(alias = "combatPower", deserialize_with = "lenient::stat")]
    pub combat_power: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapturedSkills {
    #[serde(default, deserialize_with = "lenient::skill_level")]
    pub skill1: u8,
    #[serde(default, deserialize_with = "lenient::skill_level")]
    pub skill2: u8,
    #[serde(default, deserialize_with = "lenient::skill_level")]
    pub burst: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapturedCube {
    #[serde(default, deserialize_with = "lenient::upgrade_level")]
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedCollection {
    #[serde(default)]
    pub rarity: CollectionGrade,
    #[serde(default, alias = "skillLv1", deserialize_with = "lenient::upgrade_level")]
    pub skill_lv1: u8,
    #[serde(default, alias = "skillLv2", deserialize_with = "lenient::upgrade_level")]
    pub skill_lv2: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedOption {
    #[serde(default)]
    pub name: String,
    /// Displayed value, e.g. `"12.19%"`
    #[serde(default)]
    pub value: String,
    /// 1-based line slot when the extractor knows it
    #[serde(default)]
    pub slot: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedEquipment {
    /// 1 helmet, 2 armor, 3 gloves, 4 boots
    #[serde(default, alias = "partIndex")]
    pub part_index: u8,
    #[serde(default)]
    pub options: Vec<CapturedOption>,
}

/// One build as captured from the game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapturedBuild {
    pub meta: CapturedMeta,
    pub stats: CapturedStats,
    pub skills: Option<CapturedSkills>,
    pub cube: Option<CapturedCube>,
    pub collection: Option<CapturedCollection>,
    pub equipment: Vec<CapturedEquipment>,
}

/// Catalog key for a captured option name (`"Attack Increase"` -> `"attack_increase"`)
fn option_key(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            _ => c.to_ascii_lowercase(),
        })
        .collect()
}

impl CapturedBuild {
    /// Name used for preset profile lookup
    pub fn character_name(&self) -> &str {
        &self.meta.name
    }

    /// Build record with every captured option snapped to a catalog stage
    pub fn to_build_input(&self, catalog: &OptionCatalog) -> BuildInput {
        let skills = self.skills.unwrap_or(CapturedSkills {
            skill1: DEFAULT_SKILL_LEVEL,
            skill2: DEFAULT_SKILL_LEVEL,
            burst: DEFAULT_SKILL_LEVEL,
        });
        let (grade, coll1, coll2) = self
            .collection
            .as_ref()
            .map(|c| (c.rarity, c.skill_lv1, c.skill_lv2))
            .unwrap_or((CollectionGrade::None, 0, 0));

        let mut build = BuildInput::with_stats(self.stats.hp, self.stats.atk, self.stats.def)
            .skills(skills.skill1, skills.skill2, skills.burst)
            .cube(self.cube.map_or(0, |c| c.level))
            .collection(grade, coll1, coll2);

        for item in &self.equipment {
            let Some(part) = Part::from_index(item.part_index) else {
                tracing::warn!("Ignoring captured equipment with part index {}", item.part_index);
                continue;
            };

            for (position, option) in item.options.iter().enumerate() {
                let slot = match option.slot {
                    Some(s) if (1..=LINES_PER_PART as u8).contains(&s) => usize::from(s),
                    _ => position + 1,
                };
                if slot > LINES_PER_PART {
                    continue;
                }

                build.loadout.set(part, slot - 1, captured_line(catalog, option));
            }
        }

        build
    }
}

fn captured_line(catalog: &OptionCatalog, option: &CapturedOption) -> Line {
    let key = option_key(&option.name);
    if !catalog.contains(&key) {
        tracing::warn!("Unknown captured option '{}' - treating as empty", option.name);
        return Line::empty();
    }

    let stage = nearest_stage(catalog, &key, option.value.as_str());
    Line::new(key, u8::try_from(stage).unwrap_or(u8::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;

    fn catalog() -> OptionCatalog {
        GameData::embedded().unwrap().catalog
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let captured: CapturedBuild =
            serde_json::from_str(r#"{"meta": {"name": "Alice"}, "stats": {"hp": "1,000"}}"#).unwrap();
        let build = captured.to_build_input(&catalog());

        assert_eq!(captured.character_name(), "Alice");
        assert_eq!(build.hp, 1000.0);
        assert_eq!((build.skill1, build.skill2, build.burst), (1, 1, 1));
        assert_eq!(build.cube_level, 0);
        assert_eq!(build.collection_grade, CollectionGrade::None);
        assert!(build.loadout.lines().all(|(_, _, l)| l.is_empty()));
    }

    #[test]
    fn test_options_map_to_parts_and_slots() {
        let json = r#"{
            "meta": {"name": "Red Hood"},
            "stats": {"hp": 1000, "atk": 100, "def": 10, "combatPower": 5000},
            "equipment": [
                {"partIndex": 2, "options": [
                    {"name": "attack_increase", "value": "12.19%"},
                    {"name": "Max Ammo Increase", "value": "51.10%", "slot": 3}
                ]},
                {"part_index": 7, "options": [{"name": "attack_increase", "value": "4.77%"}]}
            ]
        }"#;
        let captured: CapturedBuild = serde_json::from_str(json).unwrap();
        let build = captured.to_build_input(&catalog());

        assert_eq!(captured.stats.combat_power, 5000.0);
        assert_eq!(build.loadout.armor[0], Line::new("attack_increase", 9));
        assert_eq!(build.loadout.armor[1], Line::empty());
        assert_eq!(build.loadout.armor[2], Line::new("max_ammo_increase", 9));
        assert_eq!(build.loadout.lines().filter(|(_, _, l)| !l.is_empty()).count(), 2);
    }

    #[test]
    fn test_unknown_and_extra_options_are_dropped() {
        let json = r#"{
            "equipment": [{"part_index": 1, "options": [
                {"name": "speed_increase", "value": "10%"},
                {"name": "defense_increase", "value": "garbage"},
                {"name": "attack_increase", "value": "4.80%", "slot": 9},
                {"name": "attack_increase", "value": "17.77%"}
            ]}]
        }"#;
        let captured: CapturedBuild = serde_json::from_str(json).unwrap();
        let build = captured.to_build_input(&catalog());

        assert_eq!(build.loadout.helmet[0], Line::empty());
        // unparsable value quantizes to stage 0
        assert_eq!(build.loadout.helmet[1], Line::new("defense_increase", 0));
        assert_eq!(build.loadout.helmet[2], Line::new("attack_increase", 1));
    }

    #[test]
    fn test_equipment_without_part_index_is_skipped() {
        let json = r#"{
            "equipment": [
                {"options": [{"name": "attack_increase", "value": "17.77%"}]},
                {"partIndex": 4, "options": [{"name": "attack_increase", "value": "4.77%"}]}
            ]
        }"#;
        let captured: CapturedBuild = serde_json::from_str(json).unwrap();
        assert_eq!(captured.equipment[0].part_index, 0);

        let build = captured.to_build_input(&catalog());
        assert_eq!(build.loadout.boots[0], Line::new("attack_increase", 1));
        assert_eq!(build.loadout.lines().filter(|(_, _, l)| !l.is_empty()).count(), 1);
    }

    #[test]
    fn test_collection_capture() {
        let json = r#"{"collection": {"rarity": "SR", "skillLv1": 5, "skillLv2": "3"}, "cube": {"level": 9}}"#;
        let captured: CapturedBuild = serde_json::from_str(json).unwrap();
        let build = captured.to_build_input(&catalog());
        assert_eq!(build.collection_grade, CollectionGrade::SR);
        assert_eq!((build.collection_skill1, build.collection_skill2), (5, 3));
        assert_eq!(build.cube_level, 9);
    }
}
