use std::sync::Arc;

use safra_recon::Snapshot;

use crate::error::SourceError;
use crate::source::SnapshotSource;

/// Holds the last loaded snapshot until explicitly invalidated.
///
/// Each load is tagged with the generation that was current when it ran.
/// [`invalidate`](Self::invalidate) bumps the generation, so the next
/// [`get_or_load`](Self::get_or_load) goes back to the source.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    generation: u64,
    slot: Option<(u64, Arc<Snapshot>)>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True if a snapshot for the current generation is held.
    pub fn is_fresh(&self) -> bool {
        matches!(self.slot, Some((g, _)) if g == self.generation)
    }

    /// Return the cached snapshot, loading it from `source` if stale.
    ///
    /// A failed load leaves the cache empty.
    pub fn get_or_load(&mut self, source: &dyn SnapshotSource) -> Result<Arc<Snapshot>, SourceError> {
        if let Some((generation, snapshot)) = &self.slot {
            if *generation == self.generation {
                return Ok(Arc::clone(snapshot));
            }
        }

        log::debug!("loading snapshot (generation {}) from {}", self.generation, source.describe());
        match source.load() {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.slot = Some((self.generation, Arc::clone(&snapshot)));
                Ok(snapshot)
            }
            Err(e) => {
                self.slot = None;
                Err(e)
            }
        }
    }

    /// Drop the cached snapshot.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.slot = None;
    }
}
