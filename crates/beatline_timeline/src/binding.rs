// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared binding to the working beatmap.

use crate::beatmap::WorkingBeatmap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Receives the new beatmap whenever the bound one is swapped
pub trait BeatmapObserver {
    /// Called once per swap, before any frame uses the new beatmap
    fn beatmap_changed(&mut self, beatmap: &WorkingBeatmap);
}

#[derive(Debug)]
struct BindingState {
    value: Arc<WorkingBeatmap>,
    generation: u64,
}

/// Cloneable handle to the current working beatmap
///
/// Every clone sees the same value. Each [`set`](Self::set) bumps a
/// generation counter which observers compare against the last one they
/// handled.
#[derive(Debug, Clone)]
pub struct BeatmapBinding {
    inner: Arc<RwLock<BindingState>>,
}

impl BeatmapBinding {
    /// Bind an initial beatmap
    pub fn new(value: WorkingBeatmap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BindingState {
                value: Arc::new(value),
                generation: 0,
            })),
        }
    }

    /// Current beatmap
    pub fn value(&self) -> Arc<WorkingBeatmap> {
        self.inner.read().value.clone()
    }

    /// Swap the current beatmap
    pub fn set(&self, value: WorkingBeatmap) {
        let mut inner = self.inner.write();
        inner.value = Arc::new(value);
        inner.generation += 1;
        tracing::debug!("Beatmap changed (generation {})", inner.generation);
    }

    /// Generation of the current value
    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Current beatmap together with its generation
    pub fn snapshot(&self) -> (Arc<WorkingBeatmap>, u64) {
        let inner = self.inner.read();
        (inner.value.clone(), inner.generation)
    }

    /// The current beatmap if it changed after `seen`, updating `seen`
    pub fn changed_since(&self, seen: &mut u64) -> Option<Arc<WorkingBeatmap>> {
        let inner = self.inner.read();
        if inner.generation == *seen {
            return None;
        }
        *seen = inner.generation;
        Some(inner.value.clone())
    }
}

impl Default for BeatmapBinding {
    fn default() -> Self {
        Self::new(WorkingBeatmap::dummy())
    }
}
