//! Loading game data from disk and swapping snapshots at runtime.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use build_scorer_rust::data::{CATALOG_FILE, PRESET_PROFILES_FILE, WEAPON_DEFAULTS_FILE};
use build_scorer_rust::{BuildInput, CapturedBuild, DataError, GameData, Part, ScorerHandle, Tier};

const CATALOG: &str = r#"{
    "designated_option": "advantage_code_damage_increase",
    "options": {
        "attack_increase": [0.0, 10.0, 20.0],
        "advantage_code_damage_increase": [0.0, 15.0, 30.0]
    }
}"#;

const WEAPONS: &str = r#"{"Unknown": {"attack_increase": 1.0}}"#;

const PRESETS: &str = r#"[
    {"name": "Tester", "class": "방어형", "weapon_type": "소총 (AR)", "invalid_options": ["attack"]}
]"#;

fn write_tables(dir: &Path, catalog: &str) {
    fs::write(dir.join(CATALOG_FILE), catalog).unwrap();
    fs::write(dir.join(WEAPON_DEFAULTS_FILE), WEAPONS).unwrap();
    fs::write(dir.join(PRESET_PROFILES_FILE), PRESETS).unwrap();
}

#[test]
fn test_load_dir_reads_all_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path(), CATALOG);

    let data = GameData::load_dir(dir.path()).unwrap();
    assert_eq!(data.catalog.option_types(), vec!["advantage_code_damage_increase", "attack_increase"]);
    assert_eq!(data.catalog.max_stage("attack_increase"), 2);

    let profile = data.profile("tester").unwrap();
    assert_eq!(profile.class, build_scorer_rust::CharacterClass::Defender);
    assert_eq!(profile.weapon_type, build_scorer_rust::WeaponType::AR);
}

#[test]
fn test_invalid_table_is_rejected_with_context() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(
        dir.path(),
        r#"{"designated_option": "attack_increase", "options": {"attack_increase": [0.0, 5.0, 4.0]}}"#,
    );

    let err = GameData::load_dir(dir.path()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DataError>(),
        Some(DataError::NonMonotonic { stage: 2, .. })
    ));
}

#[test]
fn test_reload_swaps_for_new_engines_only() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path(), CATALOG);

    let handle = ScorerHandle::new(GameData::embedded().unwrap());
    let old_engine = handle.engine();
    let old_snapshot = handle.snapshot();

    handle.reload_from_dir(dir.path()).unwrap();
    let new_engine = handle.engine();

    assert!(!Arc::ptr_eq(&old_snapshot, &handle.snapshot()));
    assert_eq!(old_engine.data().catalog.len(), 9);
    assert_eq!(new_engine.data().catalog.len(), 2);

    // Tester lists attack as invalid only in the reloaded presets
    let build = BuildInput::with_stats(1000.0, 100.0, 10.0).line(Part::Boots, 2, "attack_increase", 2);
    let scored = new_engine.score_named(&build, "Tester");
    assert_eq!(scored.detail.overload_aggregated[0].tier, Tier::Invalid);
    assert!(old_engine.data().profile("Tester").is_none());
}

#[test]
fn test_failed_reload_keeps_serving() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path(), "{ not json");

    let handle = ScorerHandle::new(GameData::embedded().unwrap());
    let before = handle.snapshot();
    assert!(handle.reload_from_dir(dir.path()).is_err());
    assert!(Arc::ptr_eq(&before, &handle.snapshot()));
}

#[test]
fn test_captured_build_scores_end_to_end() {
    let handle = ScorerHandle::new(GameData::embedded().unwrap());
    let engine = handle.engine();

    let json = r#"{
        "meta": {"name": "Red Hood (Treasure)"},
        "stats": {"hp": "1,000,000", "atk": "50,000", "def": "10,000"},
        "skills": {"skill1": 10, "skill2": 10, "burst": 10},
        "equipment": [
            {"partIndex": 1, "options": [
                {"name": "attack_increase", "value": "17.77%"},
                {"name": "advantage_code_damage_increase", "value": "35.54%"},
                {"name": "hit_rate_increase", "value": "4.77%"}
            ]}
        ]
    }"#;
    let captured: CapturedBuild = serde_json::from_str(json).unwrap();
    let build = captured.to_build_input(&engine.data().catalog);
    let result = engine.score_named(&build, captured.character_name());

    let tiers: Vec<Tier> = result.detail.overload_aggregated.iter().map(|a| a.tier).collect();
    assert_eq!(tiers, vec![Tier::Best, Tier::Best, Tier::Invalid]);
    // two best lines at max value: 200 / 1200
    approx::assert_relative_eq!(result.completeness_pct, 200.0 / 12.0, epsilon = 1e-9);
}
