// SPDX-License-Identifier: MPL-2.0
//! Bounded cache of live view instances, keyed by logical position.
//!
//! The cache is the exclusive owner of every handle it creates. A handle
//! is always disposed through [`ViewCache::release`] before its entry is
//! dropped; dropping an undisposed handle would leak decode/playback
//! state. Releasing an absent or already-released position is a no-op.
//!
//! At most the currently visible position and its immediate left/right
//! neighbors hold live instances; [`ViewCache::retain_neighborhood`]
//! enforces that bound after every navigation step.

use crate::application::port::{MediaView, PlaybackSurface, ViewFactory};
use crate::domain::media::MediaItem;
use std::collections::HashMap;

/// How many positions to keep alive on each side of the current one.
pub const NEIGHBOR_RADIUS: usize = 1;

/// Bounded map from logical position to a live view instance.
#[derive(Default)]
pub struct ViewCache {
    views: HashMap<usize, Box<dyn MediaView>>,
}

impl ViewCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    /// Realizes the view for `position`, constructing it from `item` when
    /// no instance exists yet. Reuse never re-applies `autoplay`.
    pub fn acquire(
        &mut self,
        position: usize,
        item: &MediaItem,
        factory: &dyn ViewFactory,
        autoplay: bool,
    ) {
        self.views
            .entry(position)
            .or_insert_with(|| factory.create(item, autoplay));
    }

    /// Tells the view at `position` to suspend active playback. No-op when
    /// the position was never realized.
    pub fn pause(&mut self, position: usize) {
        if let Some(view) = self.views.get_mut(&position) {
            view.pause();
        }
    }

    /// Disposes and removes the view at `position`.
    ///
    /// Idempotent: releasing an absent position leaves the cache unchanged.
    pub fn release(&mut self, position: usize) {
        if let Some(mut view) = self.views.remove(&position) {
            view.dispose();
        }
    }

    /// Full teardown: disposes every cached view. Used when the host
    /// surface itself is being torn down.
    pub fn release_all(&mut self) {
        // Drain first so one dispose cannot leave earlier entries behind.
        let mut drained: Vec<Box<dyn MediaView>> = self.views.drain().map(|(_, v)| v).collect();
        for view in &mut drained {
            view.dispose();
        }
    }

    /// Releases every view outside `{current - 1, current, current + 1}`.
    pub fn retain_neighborhood(&mut self, current: usize) {
        let low = current.saturating_sub(NEIGHBOR_RADIUS);
        let high = current.saturating_add(NEIGHBOR_RADIUS);
        let out_of_window: Vec<usize> = self
            .views
            .keys()
            .copied()
            .filter(|p| *p < low || *p > high)
            .collect();
        for position in out_of_window {
            self.release(position);
        }
    }

    /// Playback surface of the view at `position`, if one is live and
    /// playing.
    #[must_use]
    pub fn playback_surface(&self, position: usize) -> Option<PlaybackSurface> {
        self.views
            .get(&position)
            .and_then(|view| view.playback_surface())
    }

    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        self.views.contains_key(&position)
    }

    /// Number of live view instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Sorted positions that currently hold a live instance.
    #[must_use]
    pub fn live_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self.views.keys().copied().collect();
        positions.sort_unstable();
        positions
    }
}

impl std::fmt::Debug for ViewCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewCache")
            .field("live_positions", &self.live_positions())
            .finish()
    }
}
