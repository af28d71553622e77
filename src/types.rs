//! Value objects shared by every scoring component.
//!
//! `BuildInput` and `CharacterProfile` are owned by the caller and only
//! borrowed for the duration of one scoring call. `ScoreResult` is the
//! engine's single output.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

use crate::utils::normalization::lenient;

/// Highest skill / burst level
pub const MAX_SKILL_LEVEL: u8 = 10;

/// Highest cube level and collection skill level
pub const MAX_UPGRADE_LEVEL: u8 = 15;

/// Option lines per equipment part
pub const LINES_PER_PART: usize = 3;

/// Overload lines in a full loadout (4 parts × 3 lines)
pub const TOTAL_LINES: usize = 12;

/// Option-type key of an empty line
pub const NO_OPTION: &str = "none";

// ============================================================================
// Loadout
// ============================================================================

/// Equipment part carrying three overload lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Part {
    Helmet,
    Armor,
    Gloves,
    Boots,
}

impl Part {
    /// Traversal order used for scoring and aggregation
    pub const ALL: [Part; 4] = [Part::Helmet, Part::Armor, Part::Gloves, Part::Boots];

    /// Part from the 1-based index used by captured game data
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Part::Helmet),
            2 => Some(Part::Armor),
            3 => Some(Part::Gloves),
            4 => Some(Part::Boots),
            _ => None,
        }
    }
}

/// One overload line: an option type and its stage.
///
/// `stage = 0` means "no effect" whatever the option type is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    #[serde(default = "no_option", deserialize_with = "lenient::option_type")]
    pub option_type: String,
    #[serde(default, deserialize_with = "lenient::stage")]
    pub stage: u8,
}

fn no_option() -> String {
    NO_OPTION.to_string()
}

impl Line {
    pub fn new(option_type: impl Into<String>, stage: u8) -> Self {
        Self {
            option_type: option_type.into(),
            stage,
        }
    }

    /// Line with no option equipped
    pub fn empty() -> Self {
        Self::new(NO_OPTION, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.stage == 0 || self.option_type == NO_OPTION
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::empty()
    }
}

/// Overload lines of all four parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    #[serde(deserialize_with = "lenient::part_lines")]
    pub helmet: [Line; LINES_PER_PART],
    #[serde(deserialize_with = "lenient::part_lines")]
    pub armor: [Line; LINES_PER_PART],
    #[serde(deserialize_with = "lenient::part_lines")]
    pub gloves: [Line; LINES_PER_PART],
    #[serde(deserialize_with = "lenient::part_lines")]
    pub boots: [Line; LINES_PER_PART],
}

impl Loadout {
    pub fn part(&self, part: Part) -> &[Line; LINES_PER_PART] {
        match part {
            Part::Helmet => &self.helmet,
            Part::Armor => &self.armor,
            Part::Gloves => &self.gloves,
            Part::Boots => &self.boots,
        }
    }

    pub fn part_mut(&mut self, part: Part) -> &mut [Line; LINES_PER_PART] {
        match part {
            Part::Helmet => &mut self.helmet,
            Part::Armor => &mut self.armor,
            Part::Gloves => &mut self.gloves,
            Part::Boots => &mut self.boots,
        }
    }

    /// Replace the line in `slot` (0-based); out-of-range slots are ignored
    pub fn set(&mut self, part: Part, slot: usize, line: Line) {
        if let Some(target) = self.part_mut(part).get_mut(slot) {
            *target = line;
        }
    }

    /// All 12 lines, helmet → boots, line 1 → 3
    pub fn lines(&self) -> impl Iterator<Item = (Part, usize, &Line)> + '_ {
        Part::ALL.into_iter().flat_map(move |part| {
            self.part(part)
                .iter()
                .enumerate()
                .map(move |(slot, line)| (part, slot, line))
        })
    }
}

// ============================================================================
// Build input
// ============================================================================

/// Collection item grade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value")]
pub enum CollectionGrade {
    #[default]
    None,
    R,
    SR,
    SSR,
}

/// Non-string grades (`null`, numbers) read as `None`
impl From<Value> for CollectionGrade {
    fn from(raw: Value) -> Self {
        raw.as_str().map(CollectionGrade::parse).unwrap_or_default()
    }
}

impl CollectionGrade {
    /// Unknown grades read as `None`
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "R" => CollectionGrade::R,
            "SR" => CollectionGrade::SR,
            "SSR" => CollectionGrade::SSR,
            _ => CollectionGrade::None,
        }
    }
}

/// Character build record supplied by the database layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildInput {
    #[serde(deserialize_with = "lenient::stat")]
    pub hp: f64,
    #[serde(deserialize_with = "lenient::stat")]
    pub atk: f64,
    #[serde(deserialize_with = "lenient::stat")]
    pub def: f64,

    #[serde(deserialize_with = "lenient::skill_level")]
    pub skill1: u8,
    #[serde(deserialize_with = "lenient::skill_level")]
    pub skill2: u8,
    #[serde(deserialize_with = "lenient::skill_level")]
    pub burst: u8,

    #[serde(deserialize_with = "lenient::upgrade_level")]
    pub cube_level: u8,

    pub collection_grade: CollectionGrade,
    #[serde(deserialize_with = "lenient::upgrade_level")]
    pub collection_skill1: u8,
    #[serde(deserialize_with = "lenient::upgrade_level")]
    pub collection_skill2: u8,

    pub loadout: Loadout,
}

impl BuildInput {
    /// Build with the given base stats and everything else at zero
    pub fn with_stats(hp: f64, atk: f64, def: f64) -> Self {
        Self {
            hp,
            atk,
            def,
            ..Self::default()
        }
    }

    pub fn skills(mut self, skill1: u8, skill2: u8, burst: u8) -> Self {
        self.skill1 = skill1;
        self.skill2 = skill2;
        self.burst = burst;
        self
    }

    pub fn cube(mut self, level: u8) -> Self {
        self.cube_level = level;
        self
    }

    pub fn collection(mut self, grade: CollectionGrade, skill1: u8, skill2: u8) -> Self {
        self.collection_grade = grade;
        self.collection_skill1 = skill1;
        self.collection_skill2 = skill2;
        self
    }

    pub fn line(mut self, part: Part, slot: usize, option_type: &str, stage: u8) -> Self {
        self.loadout.set(part, slot, Line::new(option_type, stage));
        self
    }
}

// ============================================================================
// Character profile
// ============================================================================

/// Combat class of a character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value")]
pub enum CharacterClass {
    Attacker,
    Defender,
    Supporter,
    #[default]
    Unknown,
}

impl From<Value> for CharacterClass {
    fn from(raw: Value) -> Self {
        raw.as_str().map(CharacterClass::parse).unwrap_or_default()
    }
}

impl CharacterClass {
    /// Accepts English names and the localized class labels
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lowered = raw.to_lowercase();
        if lowered.contains("attacker") || raw.contains("화력형") {
            CharacterClass::Attacker
        } else if lowered.contains("defender") || raw.contains("방어형") {
            CharacterClass::Defender
        } else if lowered.contains("supporter") || raw.contains("지원형") {
            CharacterClass::Supporter
        } else {
            CharacterClass::Unknown
        }
    }

    /// Offense classes get the designated option as a top-tier stat
    pub fn is_offense(self) -> bool {
        self == CharacterClass::Attacker
    }
}

/// Weapon category; keys the weapon-default option table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value")]
pub enum WeaponType {
    AR,
    SR,
    SG,
    SMG,
    RL,
    MG,
    #[default]
    Unknown,
}

impl From<Value> for WeaponType {
    fn from(raw: Value) -> Self {
        raw.as_str().map(WeaponType::parse).unwrap_or_default()
    }
}

impl WeaponType {
    pub const ALL: [WeaponType; 7] = [
        WeaponType::AR,
        WeaponType::SR,
        WeaponType::SG,
        WeaponType::SMG,
        WeaponType::RL,
        WeaponType::MG,
        WeaponType::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WeaponType::AR => "AR",
            WeaponType::SR => "SR",
            WeaponType::SG => "SG",
            WeaponType::SMG => "SMG",
            WeaponType::RL => "RL",
            WeaponType::MG => "MG",
            WeaponType::Unknown => "Unknown",
        }
    }

    /// Parse `"AR"`, `"Assault Rifle"` or `"소총 (AR)"`.
    ///
    /// A code in parentheses wins over the rest of the text.
    pub fn parse(raw: &str) -> Self {
        let code = match (raw.find('('), raw.rfind(')')) {
            (Some(open), Some(close)) if open < close => &raw[open + 1..close],
            _ => raw,
        };

        match code.trim().to_ascii_uppercase().as_str() {
            "AR" | "ASSAULT RIFLE" => WeaponType::AR,
            "SR" | "SNIPER RIFLE" => WeaponType::SR,
            "SG" | "SHOTGUN" => WeaponType::SG,
            "SMG" | "SUBMACHINE GUN" => WeaponType::SMG,
            "RL" | "ROCKET LAUNCHER" | "LAUNCHER" => WeaponType::RL,
            "MG" | "MACHINE GUN" | "MINIGUN" => WeaponType::MG,
            _ => WeaponType::Unknown,
        }
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Curated per-character option priorities
///
/// Entries may be written as core terms (`"attack"`) or full option keys
/// (`"attack_increase"`); both resolve to the same core term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterProfile {
    pub name: String,
    pub class: CharacterClass,
    pub weapon_type: WeaponType,
    pub best_options: BTreeSet<String>,
    pub good_options: BTreeSet<String>,
    pub invalid_options: BTreeSet<String>,
}

impl CharacterProfile {
    pub fn new(name: impl Into<String>, class: CharacterClass, weapon_type: WeaponType) -> Self {
        Self {
            name: name.into(),
            class,
            weapon_type,
            ..Self::default()
        }
    }

    pub fn best<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.best_options.extend(options.into_iter().map(Into::into));
        self
    }

    pub fn good<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.good_options.extend(options.into_iter().map(Into::into));
        self
    }

    pub fn invalid<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invalid_options.extend(options.into_iter().map(Into::into));
        self
    }
}

// ============================================================================
// Classification and grading
// ============================================================================

/// Priority tier of an option type for one character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tier {
    Invalid = 0,
    Best = 1,
    Good = 2,
    Neutral = 3,
}

impl Tier {
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Completeness weight of a line in this tier
    pub fn weight(self) -> f64 {
        match self {
            Tier::Best => 1.0,
            Tier::Good => 0.7,
            Tier::Neutral => 0.3,
            Tier::Invalid => 0.0,
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.level()
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Tier::Invalid),
            1 => Ok(Tier::Best),
            2 => Ok(Tier::Good),
            3 => Ok(Tier::Neutral),
            other => Err(format!("tier level out of range: {}", other)),
        }
    }
}

/// Display tag attached to a grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeTag {
    Primary,
    Valid,
    Neutral,
    Invalid,
}

// ============================================================================
// Results
// ============================================================================

/// Per option type summary of the equipped overload lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedLine {
    pub option_type: String,
    pub line_count: usize,
    pub value_sum: f64,
    pub max_sum: f64,
    /// value_sum / max_sum × 100
    pub pct: f64,
    pub cp_sum: f64,
    pub tier: Tier,
    pub grade_label: String,
    pub tag: GradeTag,
}

/// CP contribution of every coefficient term plus display percentages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub base_cp: f64,
    pub skill_cp: f64,
    pub skill_pct: f64,
    pub cube_cp: f64,
    pub cube_pct: f64,
    pub collection_cp: f64,
    pub collection_pct: f64,
    pub overload_cp: f64,
    pub overload_completeness_pct: f64,
    pub overload_aggregated: Vec<AggregatedLine>,
}

/// Output of one scoring call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub power: u64,
    /// 0-100, against the fixed 12 × 100 point maximum
    pub completeness_pct: f64,
    pub detail: ScoreDetail,
}
