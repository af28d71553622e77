//! Hot-reloadable game data.
//!
//! A `ScorerHandle` owns the current `Arc<GameData>`. Reloads build and
//! validate a whole new snapshot first and only then swap the pointer, so a
//! failed reload leaves the previous snapshot in place. Engines handed out
//! earlier keep scoring against the snapshot they were created with.

use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

use crate::data::GameData;
use crate::scorer::ScoringEngine;

#[derive(Debug)]
pub struct ScorerHandle {
    current: RwLock<Arc<GameData>>,
}

impl ScorerHandle {
    pub fn new(data: GameData) -> Self {
        Self {
            current: RwLock::new(Arc::new(data)),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<GameData> {
        self.current.read().clone()
    }

    /// Engine bound to the current snapshot
    pub fn engine(&self) -> ScoringEngine {
        ScoringEngine::new(self.snapshot())
    }

    /// Swap in an already-built snapshot
    pub fn publish(&self, data: GameData) {
        let next = Arc::new(data);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        tracing::info!(
            "Published new game data snapshot ({} engines still on the previous one)",
            Arc::strong_count(&previous) - 1
        );
    }

    /// Load a snapshot from `dir` and publish it; on error nothing changes
    pub fn reload_from_dir(&self, dir: &Path) -> anyhow::Result<()> {
        let data = GameData::load_dir(dir)?;
        self.publish(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BuildInput, Part};

    const CATALOG: &str =
        r#"{"designated_option": "attack_increase", "options": {"attack_increase": [0.0, 50.0]}}"#;

    #[test]
    fn test_engine_keeps_its_snapshot() {
        let handle = ScorerHandle::new(GameData::embedded().unwrap());
        let before = handle.engine();

        handle.publish(GameData::from_json(CATALOG, "{}", "[]").unwrap());
        let after = handle.engine();

        assert_eq!(before.data().catalog.len(), 9);
        assert_eq!(after.data().catalog.len(), 1);
        assert_eq!(handle.snapshot().catalog.max_value("attack_increase"), 50.0);

        let build = BuildInput::with_stats(1000.0, 100.0, 10.0)
            .line(Part::Helmet, 0, "attack_increase", 1);
        assert!(before.score(&build, None).completeness_pct < after.score(&build, None).completeness_pct);
    }

    #[test]
    fn test_failed_reload_keeps_previous_snapshot() {
        let handle = ScorerHandle::new(GameData::embedded().unwrap());
        let before = handle.snapshot();

        assert!(handle.reload_from_dir(Path::new("/nonexistent/build_scorer")).is_err());
        assert!(Arc::ptr_eq(&before, &handle.snapshot()));
    }
}
