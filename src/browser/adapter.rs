// SPDX-License-Identifier: MPL-2.0
//! Backing source: single ephemeral item vs. live queried collection.
//!
//! Both variants share one contract (count, item-at, thumbnail-at) so the
//! rest of the browser never branches on the mode. Collection mode carries
//! an activation gate: until the provider reports the result set ready the
//! adapter counts zero, keeping a not-yet-ready browse distinguishable
//! from a genuinely empty one and preventing premature "no results"
//! rendering.

use crate::application::port::{MediaSource, OwnerDirectory};
use crate::application::query::position;
use crate::browser::record;
use crate::domain::media::{MediaItem, MediaKind, MediaRow, MediaUri, ThumbnailDescriptor};
use crate::error::{Error, Result};
use std::sync::Arc;

/// The collection (or single item) a browsing session pages through.
pub enum BackingSource {
    /// One ephemeral item supplied directly; nothing is persisted.
    Single {
        /// The only item; position 0 is the only valid position.
        item: MediaItem,
    },
    /// An ordered result set of rows, each convertible to a media item.
    Collection {
        source: Arc<dyn MediaSource>,
        directory: Arc<dyn OwnerDirectory>,
        active: bool,
    },
}

impl BackingSource {
    /// Builds a single-item source for ephemeral media.
    #[must_use]
    pub fn single(uri: MediaUri, content_type: impl Into<String>) -> Self {
        Self::Single {
            item: MediaItem::ephemeral(uri, content_type),
        }
    }

    /// Builds a collection source. It stays inactive (count 0) until
    /// [`activate`] is called.
    ///
    /// [`activate`]: BackingSource::activate
    #[must_use]
    pub fn collection(source: Arc<dyn MediaSource>, directory: Arc<dyn OwnerDirectory>) -> Self {
        Self::Collection {
            source,
            directory,
            active: false,
        }
    }

    /// Opens the activation gate once the provider reports the result set
    /// ready. No-op for single-item sources (always active).
    pub fn activate(&mut self) {
        if let Self::Collection { active, .. } = self {
            *active = true;
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Single { .. } => true,
            Self::Collection { active, .. } => *active,
        }
    }

    /// Number of browsable positions. Zero while a collection is inactive.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Collection { source, active, .. } => {
                if *active {
                    source.count()
                } else {
                    0
                }
            }
        }
    }

    /// Direction flag of the underlying result set. A single item has no
    /// ordering to speak of.
    #[must_use]
    pub fn left_is_recent(&self) -> bool {
        match self {
            Self::Single { .. } => false,
            Self::Collection { source, .. } => source.left_is_recent(),
        }
    }

    /// Materializes the media item at a logical position.
    ///
    /// Single mode always yields the same item; collection mode resolves
    /// the row through the position index and materializes it.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::MalformedRecord`] / [`Error::UnsupportedMediaKind`]
    /// from materialization, and reports a missing in-range row as a
    /// malformed record.
    ///
    /// # Panics
    ///
    /// Panics if `position >= count()`.
    pub fn media_item_at(&self, position: usize) -> Result<MediaItem> {
        let count = self.count();
        assert!(
            position < count,
            "position {position} out of bounds for count {count}"
        );
        match self {
            Self::Single { item } => Ok(item.clone()),
            Self::Collection { directory, .. } => {
                let row = self.row_at_position(position).ok_or_else(|| {
                    Error::MalformedRecord(format!(
                        "provider returned no row for position {position}"
                    ))
                })?;
                record::materialize(&row, directory.as_ref())
            }
        }
    }

    /// Raw row at a logical position, for callers that only need
    /// lightweight fields (rail thumbnails).
    #[must_use]
    pub fn row_at_position(&self, logical: usize) -> Option<MediaRow> {
        match self {
            Self::Single { .. } => None,
            Self::Collection { source, active, .. } => {
                if !*active || logical >= source.count() {
                    return None;
                }
                let row = position::row_index(logical, source.count(), source.left_is_recent());
                source.row_at(row)
            }
        }
    }

    /// Thumbnail descriptor for a logical position, if one can be derived.
    ///
    /// Single-item mode has no sibling rail and always yields `None`.
    #[must_use]
    pub fn thumbnail_at(&self, position: usize) -> Option<ThumbnailDescriptor> {
        let row = self.row_at_position(position)?;
        let uri = row.thumbnail_uri.or(row.data_uri)?;
        let kind = MediaKind::from_content_type(&row.content_type)?;
        Some(ThumbnailDescriptor {
            position,
            uri,
            kind,
        })
    }

    /// Directory reference for collection mode.
    #[must_use]
    pub fn directory(&self) -> Option<&Arc<dyn OwnerDirectory>> {
        match self {
            Self::Single { .. } => None,
            Self::Collection { directory, .. } => Some(directory),
        }
    }
}

impl std::fmt::Debug for BackingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single { item } => f.debug_struct("Single").field("item", item).finish(),
            Self::Collection { active, .. } => f
                .debug_struct("Collection")
                .field("active", active)
                .field("count", &self.count())
                .finish(),
        }
    }
}
