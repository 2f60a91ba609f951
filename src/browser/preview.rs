// SPDX-License-Identifier: MPL-2.0
//! Reactive preview state for presentation collaborators.
//!
//! After every attach, activation, or position change the browser publishes
//! a [`PreviewState`] snapshot on a watch channel: the sibling thumbnail
//! rail around the current item, the active index within that rail, an
//! optional caption, and the playback surface of the current item. The
//! rail is a bounded window over the result set; the full set is never
//! materialized.
//!
//! Rail entries are served from a capacity-bounded LRU cache so paging
//! back and forth does not re-derive descriptors from provider rows.

use crate::application::port::PlaybackSurface;
use crate::browser::adapter::BackingSource;
use crate::domain::media::{MediaItem, MediaKind, MediaUri, OwnerProfile, ThumbnailDescriptor};
use chrono::{DateTime, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;
use tokio::sync::watch;

/// Default number of cached rail thumbnails.
pub const DEFAULT_THUMBNAIL_CACHE_ENTRIES: usize = 64;

/// Minimum thumbnail cache capacity.
pub const MIN_THUMBNAIL_CACHE_ENTRIES: usize = 16;

/// Maximum thumbnail cache capacity.
pub const MAX_THUMBNAIL_CACHE_ENTRIES: usize = 512;

/// Snapshot of everything the preview chrome needs to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    /// Thumbnail rail: a window of sibling items around the current one.
    pub thumbnails: Vec<ThumbnailDescriptor>,
    /// Index of the current item within `thumbnails`.
    pub active_index: usize,
    /// Caption supplied at attach time, if any.
    pub caption: Option<String>,
    /// Playback surface of the current item, when playback is in progress.
    pub playback_surface: Option<PlaybackSurface>,
}

impl PreviewState {
    /// Whether there is nothing for the details chrome to show.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.thumbnails.is_empty() && self.caption.is_none() && self.playback_surface.is_none()
    }
}

/// Publishing side of the preview-state stream.
#[derive(Debug)]
pub struct PreviewPublisher {
    tx: watch::Sender<PreviewState>,
}

impl PreviewPublisher {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(PreviewState::default());
        Self { tx }
    }

    /// Replaces the current snapshot. Receivers observe only the latest
    /// value.
    pub fn publish(&self, state: PreviewState) {
        self.tx.send_replace(state);
    }

    /// Opens a new receiver on the stream.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.tx.subscribe()
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn latest(&self) -> PreviewState {
        self.tx.borrow().clone()
    }
}

impl Default for PreviewPublisher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hit/miss statistics for the thumbnail cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThumbnailCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
}

/// LRU cache of rail thumbnail descriptors keyed by logical position.
///
/// Cleared whenever the backing source changes identity; positions are
/// only stable within one attached source.
pub struct ThumbnailCache {
    cache: LruCache<usize, (MediaUri, MediaKind)>,
    stats: ThumbnailCacheStats,
}

impl ThumbnailCache {
    /// Creates a cache with the given capacity, clamped to the supported
    /// range.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity =
            capacity.clamp(MIN_THUMBNAIL_CACHE_ENTRIES, MAX_THUMBNAIL_CACHE_ENTRIES);
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or_else(|| NonZeroUsize::new(MIN_THUMBNAIL_CACHE_ENTRIES).expect("non-zero"));
        Self {
            cache: LruCache::new(capacity),
            stats: ThumbnailCacheStats::default(),
        }
    }

    /// Descriptor for `position`, derived from the backing source on a
    /// miss.
    pub fn descriptor_at(
        &mut self,
        backing: &BackingSource,
        position: usize,
    ) -> Option<ThumbnailDescriptor> {
        if let Some((uri, kind)) = self.cache.get(&position) {
            self.stats.hits += 1;
            return Some(ThumbnailDescriptor {
                position,
                uri: uri.clone(),
                kind: *kind,
            });
        }
        self.stats.misses += 1;

        let descriptor = backing.thumbnail_at(position)?;
        self.cache
            .put(position, (descriptor.uri.clone(), descriptor.kind));
        self.stats.insertions += 1;
        Some(descriptor)
    }

    /// Drops every cached entry (new source attached).
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> ThumbnailCacheStats {
        self.stats
    }
}

impl std::fmt::Debug for ThumbnailCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailCache")
            .field("len", &self.cache.len())
            .field("stats", &self.stats)
            .finish()
    }
}

/// Builds the rail window around `current` and the active index within it.
///
/// Positions whose rows cannot yield a thumbnail are skipped. When the
/// current position itself is skipped the active index points at the
/// nearest remaining entry at or before it; for a non-empty rail the index
/// is always in bounds.
#[must_use]
pub fn build_rail(
    backing: &BackingSource,
    current: usize,
    radius: usize,
    cache: &mut ThumbnailCache,
) -> (Vec<ThumbnailDescriptor>, usize) {
    let count = backing.count();
    if count == 0 || current >= count {
        return (Vec::new(), 0);
    }

    let low = current.saturating_sub(radius);
    let high = (current + radius).min(count - 1);

    let mut rail = Vec::with_capacity(high - low + 1);
    let mut active_index = 0;
    for position in low..=high {
        if let Some(descriptor) = cache.descriptor_at(backing, position) {
            if position <= current {
                active_index = rail.len();
            }
            rail.push(descriptor);
        }
    }
    (rail, active_index)
}

/// Title-bar text for the current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleText {
    /// "You" for outgoing items, otherwise the owner's display name.
    pub title: String,
    /// Relative time span, or "Draft" for unsent items.
    pub subtitle: String,
}

/// Derives the title-bar text shown while `item` is visible.
#[must_use]
pub fn title_for(item: &MediaItem, owner: Option<&OwnerProfile>, now: DateTime<Utc>) -> TitleText {
    let title = if item.is_outgoing() {
        "You".to_string()
    } else if let Some(owner) = owner {
        owner.display_name().to_string()
    } else {
        String::new()
    };

    let subtitle = if item.is_draft() {
        "Draft".to_string()
    } else {
        relative_span(item.timestamp_ms(), now)
    };

    TitleText { title, subtitle }
}

/// Formats an epoch-millisecond timestamp relative to `now`.
#[must_use]
pub fn relative_span(timestamp_ms: i64, now: DateTime<Utc>) -> String {
    let Some(then) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms) else {
        return String::new();
    };
    let elapsed = now.signed_duration_since(then);

    if elapsed.num_minutes() < 1 {
        "Now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{} min ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{} h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{} d ago", elapsed.num_days())
    } else {
        then.format("%b %-d, %Y").to_string()
    }
}
