//! Game Data Loading and Management
//!
//! Bundles the three game-constant tables the engine reads into one
//! immutable snapshot:
//! - `overload_catalog.json`: stage values per option type
//! - `weapon_defaults.json`: per-weapon option efficiency
//! - `preset_profiles.json`: curated character priority profiles
//!
//! The same files are compiled into the crate as the default snapshot.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;

use crate::catalog::{CatalogFile, OptionCatalog};
use crate::classifier::WeaponDefaults;
use crate::error::DataError;
use crate::types::{CharacterProfile, WeaponType};
use crate::utils::normalize_name;

pub const CATALOG_FILE: &str = "overload_catalog.json";
pub const WEAPON_DEFAULTS_FILE: &str = "weapon_defaults.json";
pub const PRESET_PROFILES_FILE: &str = "preset_profiles.json";

/// Directory override for the game-constant tables
pub const DATA_DIR_ENV: &str = "BUILD_SCORER_DATA_DIR";

const EMBEDDED_CATALOG: &str = include_str!("../data/overload_catalog.json");
const EMBEDDED_WEAPON_DEFAULTS: &str = include_str!("../data/weapon_defaults.json");
const EMBEDDED_PRESET_PROFILES: &str = include_str!("../data/preset_profiles.json");

/// Curated profiles keyed by normalized character name
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    by_name: FxHashMap<String, CharacterProfile>,
}

impl ProfileRegistry {
    pub fn new(profiles: impl IntoIterator<Item = CharacterProfile>) -> Self {
        let mut by_name = FxHashMap::default();
        for profile in profiles {
            let key = normalize_name(&profile.name);
            if by_name.insert(key, profile).is_some() {
                tracing::warn!("Duplicate preset profile name; keeping the later entry");
            }
        }
        Self { by_name }
    }

    /// Look up a profile; `"Red Hood (Treasure)"` finds `"Red Hood"`
    pub fn get(&self, name: &str) -> Option<&CharacterProfile> {
        self.by_name.get(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Immutable snapshot of all game-constant tables
#[derive(Debug, Clone)]
pub struct GameData {
    pub catalog: OptionCatalog,
    pub weapons: WeaponDefaults,
    pub presets: ProfileRegistry,
}

impl GameData {
    /// Snapshot from the tables compiled into the crate
    pub fn embedded() -> Result<Self> {
        Self::from_json(
            EMBEDDED_CATALOG,
            EMBEDDED_WEAPON_DEFAULTS,
            EMBEDDED_PRESET_PROFILES,
        )
        .context("Embedded game data is invalid")
    }

    /// Load all tables from a directory
    pub fn load_dir(dir: &Path) -> Result<Self> {
        tracing::info!("Loading game data from {:?}", dir);

        let catalog = read_table(&dir.join(CATALOG_FILE))?;
        let weapons = read_table(&dir.join(WEAPON_DEFAULTS_FILE))?;
        let presets = read_table(&dir.join(PRESET_PROFILES_FILE))?;

        Self::from_json(&catalog, &weapons, &presets)
            .with_context(|| format!("Invalid game data in {:?}", dir))
    }

    /// Load from `BUILD_SCORER_DATA_DIR`, or the embedded tables when unset
    pub fn from_env() -> Result<Self> {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::load_dir(Path::new(&dir)),
            _ => {
                tracing::info!("{} not set - using embedded game data", DATA_DIR_ENV);
                Self::embedded()
            }
        }
    }

    /// Parse and validate the three tables
    pub fn from_json(catalog_json: &str, weapons_json: &str, presets_json: &str) -> Result<Self> {
        let catalog_file: CatalogFile =
            serde_json::from_str(catalog_json).context("Failed to parse overload catalog JSON")?;
        let catalog = OptionCatalog::from_file(catalog_file)?;

        let raw_weapons: FxHashMap<String, FxHashMap<String, f64>> =
            serde_json::from_str(weapons_json).context("Failed to parse weapon defaults JSON")?;
        let weapons = build_weapon_defaults(raw_weapons, &catalog)?;

        let profiles: Vec<CharacterProfile> =
            serde_json::from_str(presets_json).context("Failed to parse preset profiles JSON")?;
        let presets = ProfileRegistry::new(profiles);

        tracing::info!(
            "Game data ready: {} option types, {} preset profiles",
            catalog.len(),
            presets.len()
        );

        Ok(Self {
            catalog,
            weapons,
            presets,
        })
    }

    /// Preset profile for a character name
    pub fn profile(&self, name: &str) -> Option<&CharacterProfile> {
        self.presets.get(name)
    }
}

fn read_table(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read game data file: {:?}", path))
}

fn build_weapon_defaults(
    raw: FxHashMap<String, FxHashMap<String, f64>>,
    catalog: &OptionCatalog,
) -> Result<WeaponDefaults, DataError> {
    let mut tables = FxHashMap::default();

    for (weapon_name, table) in raw {
        let weapon = WeaponType::parse(&weapon_name);
        if weapon == WeaponType::Unknown && !weapon_name.eq_ignore_ascii_case("unknown") {
            tracing::warn!("Skipping weapon defaults for unrecognized weapon '{}'", weapon_name);
            continue;
        }

        if let Some(option) = table.keys().find(|opt| !catalog.contains(opt)) {
            return Err(DataError::UnknownWeaponOption {
                weapon: weapon_name.clone(),
                option: option.clone(),
            });
        }

        tables.insert(weapon, table);
    }

    Ok(WeaponDefaults::new(tables))
}
