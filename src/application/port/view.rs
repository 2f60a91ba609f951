// SPDX-License-Identifier: MPL-2.0
//! Media view factory and handle ports.
//!
//! A [`MediaView`] is the opaque, stateful per-item instance that owns
//! decode/playback resources for one visible (or neighboring) media item.
//! The view cache is its exclusive owner: no other component may keep a
//! handle reference past its release.

use crate::domain::media::MediaItem;

/// Opaque token for an in-progress playback surface (e.g. the widget a
/// host embeds playback controls into). Meaningful only to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackSurface(u64);

impl PlaybackSurface {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A live, disposable view/playback instance for one media item.
pub trait MediaView {
    /// Suspends any active playback. May be called on an already-paused
    /// view.
    fn pause(&mut self);

    /// Releases all resources the view owns.
    ///
    /// Must be idempotent and best-effort: disposing twice is a no-op, and
    /// a dispose must never panic out of cache bookkeeping.
    fn dispose(&mut self);

    /// Surface of an in-progress playback, if one exists.
    fn playback_surface(&self) -> Option<PlaybackSurface>;
}

/// Port for constructing view instances.
pub trait ViewFactory {
    /// Creates a view for `item`. When `autoplay` is set the view starts
    /// playback immediately upon realization.
    fn create(&self, item: &MediaItem, autoplay: bool) -> Box<dyn MediaView>;
}
