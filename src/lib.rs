//! Build Scorer Rust Implementation
//!
//! Combat-power and loadout-completeness scoring for character builds.
//!
//! Module layout:
//! - `types`: build records, profiles and score results
//! - `catalog`: overload option stage tables
//! - `quantizer`: captured percentage -> catalog stage
//! - `classifier`: per-character option priority tiers
//! - `metrics/`: one module per coefficient family (M1-M5)
//! - `scorer`: main coordinator, single and batch scoring
//! - `data`: game-constant snapshot (embedded or loaded from disk)
//! - `snapshot`: hot-reloadable snapshot handle
//! - `ingest`: captured build records -> `BuildInput`
//! - `utils/`: normalization and grade formatting

pub mod utils;
pub mod types;
pub mod error;
pub mod catalog;
pub mod quantizer;
pub mod classifier;
pub mod metrics;
pub mod scorer;
pub mod data;
pub mod snapshot;
pub mod ingest;

// Re-export commonly used types
pub use catalog::OptionCatalog;
pub use classifier::{core_term, Classification, PriorityClassifier, TierSource, WeaponDefaults};
pub use data::{GameData, ProfileRegistry};
pub use error::DataError;
pub use ingest::CapturedBuild;
pub use quantizer::{nearest_stage, Observed};
pub use scorer::{ScoreJob, ScoringEngine};
pub use snapshot::ScorerHandle;
pub use types::*;
pub use utils::{grade, normalize_name, normalize_value, Grade};
