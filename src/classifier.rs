//! Priority Classifier
//!
//! Decides how much a character wants a given overload option type.
//!
//! **Resolution cascade** (first match wins):
//!   1. Core term listed in the profile's invalid set → `Invalid`
//!   2. Core term listed in the profile's best set → `Best`
//!   3. Core term listed in the profile's good set → `Good`
//!   4. Designated advantage-code option → `Best` for offense classes, else `Good`
//!   5. Weapon-default table marks the option baseline-relevant → `Good`
//!   6. Otherwise → `Neutral`
//!
//! Option types missing from the catalog are `Invalid` before the cascade
//! runs. Characters without a curated profile still classify through rules
//! 4-6 using the `Unknown` weapon table.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

use crate::catalog::OptionCatalog;
use crate::types::{CharacterProfile, Tier, WeaponType};

/// Weapon efficiency at or above which an option is baseline-relevant
pub const BASELINE_EFFICIENCY: f64 = 1.0;

/// Reduce an option key or profile entry to its core term.
///
/// `"attack_increase"` → `"attack"`, `"Max Ammo"` → `"ammo"`,
/// `"advantage_code_damage_increase"` → `"advantage_code"`.
pub fn core_term(option_type: &str) -> String {
    let lowered: String = option_type
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            _ => c.to_ascii_lowercase(),
        })
        .collect();

    let mut term = lowered.as_str();
    term = term.strip_suffix("_increase").unwrap_or(term);
    term = term.strip_suffix("_damage").unwrap_or(term);
    term = term.strip_prefix("max_").unwrap_or(term);
    term = term.strip_suffix("_count").unwrap_or(term);
    term.to_string()
}

// ============================================================================
// Weapon defaults
// ============================================================================

/// Per-weapon option efficiency (0.0 useless, 0.5 situational, 1.0 baseline)
#[derive(Debug, Clone, Default)]
pub struct WeaponDefaults {
    tables: FxHashMap<WeaponType, FxHashMap<String, f64>>,
}

impl WeaponDefaults {
    pub fn new(tables: FxHashMap<WeaponType, FxHashMap<String, f64>>) -> Self {
        Self { tables }
    }

    /// Table for `weapon`, falling back to the `Unknown` table
    fn table(&self, weapon: WeaponType) -> Option<&FxHashMap<String, f64>> {
        self.tables
            .get(&weapon)
            .or_else(|| self.tables.get(&WeaponType::Unknown))
    }

    pub fn efficiency(&self, weapon: WeaponType, option_type: &str) -> Option<f64> {
        self.table(weapon)
            .and_then(|table| table.get(option_type))
            .copied()
    }

    pub fn is_baseline(&self, weapon: WeaponType, option_type: &str) -> bool {
        self.efficiency(weapon, option_type)
            .is_some_and(|eff| eff >= BASELINE_EFFICIENCY)
    }

    /// Every (weapon, option type) pair in the table
    pub fn entries(&self) -> impl Iterator<Item = (WeaponType, &str)> + '_ {
        self.tables
            .iter()
            .flat_map(|(weapon, table)| table.keys().map(move |opt| (*weapon, opt.as_str())))
    }
}

// ============================================================================
// Cascade
// ============================================================================

/// Which cascade step produced a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierSource {
    UnknownOption,
    ProfileInvalid,
    ProfileBest,
    ProfileGood,
    DesignatedBaseline,
    WeaponBaseline,
    Fallback,
}

/// Tier plus the rule that decided it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    pub source: TierSource,
}

/// One classification request
struct Subject<'p> {
    profile: Option<&'p CharacterProfile>,
    option_type: &'p str,
    core: String,
}

type Rule = fn(&PriorityClassifier<'_>, &Subject<'_>) -> Option<Classification>;

/// Evaluated top to bottom
const CASCADE: [Rule; 6] = [
    profile_invalid,
    profile_best,
    profile_good,
    designated_baseline,
    weapon_baseline,
    fallback,
];

fn listed(entries: &BTreeSet<String>, core: &str) -> bool {
    entries.iter().any(|entry| core_term(entry) == core)
}

fn hit(tier: Tier, source: TierSource) -> Option<Classification> {
    Some(Classification { tier, source })
}

fn profile_invalid(_: &PriorityClassifier<'_>, s: &Subject<'_>) -> Option<Classification> {
    let profile = s.profile?;
    listed(&profile.invalid_options, &s.core)
        .then_some(Classification { tier: Tier::Invalid, source: TierSource::ProfileInvalid })
}

fn profile_best(_: &PriorityClassifier<'_>, s: &Subject<'_>) -> Option<Classification> {
    let profile = s.profile?;
    listed(&profile.best_options, &s.core)
        .then_some(Classification { tier: Tier::Best, source: TierSource::ProfileBest })
}

fn profile_good(_: &PriorityClassifier<'_>, s: &Subject<'_>) -> Option<Classification> {
    let profile = s.profile?;
    listed(&profile.good_options, &s.core)
        .then_some(Classification { tier: Tier::Good, source: TierSource::ProfileGood })
}

// TODO: confirm with game-balance owners whether the class-based rule for the
// advantage-code line is intended or should move into curated profiles.
fn designated_baseline(c: &PriorityClassifier<'_>, s: &Subject<'_>) -> Option<Classification> {
    if s.core != c.designated_core {
        return None;
    }
    let offense = s.profile.is_some_and(|p| p.class.is_offense());
    let tier = if offense { Tier::Best } else { Tier::Good };
    hit(tier, TierSource::DesignatedBaseline)
}

fn weapon_baseline(c: &PriorityClassifier<'_>, s: &Subject<'_>) -> Option<Classification> {
    let weapon = s.profile.map_or(WeaponType::Unknown, |p| p.weapon_type);
    c.weapons
        .is_baseline(weapon, s.option_type)
        .then_some(Classification { tier: Tier::Good, source: TierSource::WeaponBaseline })
}

fn fallback(_: &PriorityClassifier<'_>, _: &Subject<'_>) -> Option<Classification> {
    hit(Tier::Neutral, TierSource::Fallback)
}

/// Classifier bound to one catalog and weapon-default table
pub struct PriorityClassifier<'a> {
    catalog: &'a OptionCatalog,
    weapons: &'a WeaponDefaults,
    designated_core: String,
}

impl<'a> PriorityClassifier<'a> {
    pub fn new(catalog: &'a OptionCatalog, weapons: &'a WeaponDefaults) -> Self {
        Self {
            catalog,
            weapons,
            designated_core: core_term(catalog.designated()),
        }
    }

    /// Tier of `option_type` for the character described by `profile`
    pub fn classify(&self, profile: Option<&CharacterProfile>, option_type: &str) -> Tier {
        self.explain(profile, option_type).tier
    }

    /// Tier plus the cascade step that produced it
    pub fn explain(&self, profile: Option<&CharacterProfile>, option_type: &str) -> Classification {
        if !self.catalog.contains(option_type) {
            return Classification {
                tier: Tier::Invalid,
                source: TierSource::UnknownOption,
            };
        }

        let subject = Subject {
            profile,
            option_type,
            core: core_term(option_type),
        };

        CASCADE
            .iter()
            .find_map(|rule| rule(self, &subject))
            .unwrap_or(Classification {
                tier: Tier::Neutral,
                source: TierSource::Fallback,
            })
    }
}
