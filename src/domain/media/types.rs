// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.
//! A [`MediaItem`] is the immutable value materialized from one backing
//! result-set row; a [`MediaRow`] is the raw row as supplied by the
//! result-set provider.

/// Represents the two media kinds the browser can page through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Static image (JPEG, PNG, WebP, etc.)
    Image,
    /// Video or other temporal media (MP4, etc.)
    Video,
}

impl MediaKind {
    /// Classifies a MIME-like content type string.
    ///
    /// Returns `None` for anything that is neither image- nor video-like;
    /// such content is unsupported and fatal to a browsing session.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        if content_type.starts_with("image/") {
            Some(MediaKind::Image)
        } else if content_type.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// Identity of the entity (sender) that owns a media item.
///
/// This is a reference resolved through the owner directory, never an owned
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Identity of a persisted attachment record.
///
/// Absent for ephemeral media that was never written to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttachmentId(u64);

impl AttachmentId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Location of decodable media bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaUri(String);

impl MediaUri {
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MediaUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The display name a directory lookup resolves an [`OwnerId`] to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerProfile {
    id: OwnerId,
    display_name: String,
}

impl OwnerProfile {
    #[must_use]
    pub fn new(id: OwnerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> OwnerId {
        self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// One row of the backing result set, as handed over by the provider.
///
/// Rows are read-only from the browser's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRow {
    /// Identity of the sending entity.
    pub owner: OwnerId,
    /// Persisted attachment record, if any.
    pub attachment: Option<AttachmentId>,
    /// Location of the decodable bytes. A row without one is malformed.
    pub data_uri: Option<MediaUri>,
    /// MIME-like content type string.
    pub content_type: String,
    /// Epoch milliseconds; values `<= 0` mean unsent/draft.
    pub timestamp_ms: i64,
    /// Whether the item was sent by the local user.
    pub outgoing: bool,
    /// Lightweight preview location for the rail, if the provider has one.
    pub thumbnail_uri: Option<MediaUri>,
}

/// An immutable media item materialized from one backing row (or supplied
/// directly in single-item mode).
///
/// Created on demand whenever a position is resolved, never mutated, and
/// discarded together with its view instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    owner: Option<OwnerId>,
    attachment: Option<AttachmentId>,
    uri: MediaUri,
    content_type: String,
    timestamp_ms: i64,
    outgoing: bool,
}

impl MediaItem {
    #[must_use]
    pub fn new(
        owner: Option<OwnerId>,
        attachment: Option<AttachmentId>,
        uri: MediaUri,
        content_type: impl Into<String>,
        timestamp_ms: i64,
        outgoing: bool,
    ) -> Self {
        Self {
            owner,
            attachment,
            uri,
            content_type: content_type.into(),
            timestamp_ms,
            outgoing,
        }
    }

    /// Builds the single ephemeral item used when no persisted collection
    /// backs the browser. It has no owner, no attachment, and a draft
    /// timestamp.
    #[must_use]
    pub fn ephemeral(uri: MediaUri, content_type: impl Into<String>) -> Self {
        Self::new(None, None, uri, content_type, -1, true)
    }

    #[must_use]
    pub fn owner(&self) -> Option<OwnerId> {
        self.owner
    }

    #[must_use]
    pub fn attachment(&self) -> Option<AttachmentId> {
        self.attachment
    }

    #[must_use]
    pub fn uri(&self) -> &MediaUri {
        &self.uri
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Epoch milliseconds; `<= 0` means unsent/draft.
    #[must_use]
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    #[must_use]
    pub fn is_outgoing(&self) -> bool {
        self.outgoing
    }

    /// Whether the item has never been sent.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.timestamp_ms <= 0
    }

    /// Classifies the item's content type.
    #[must_use]
    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::from_content_type(&self.content_type)
    }
}

/// Lightweight descriptor for one entry of the sibling thumbnail rail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailDescriptor {
    /// Logical browsing position the thumbnail stands for.
    pub position: usize,
    /// Preview location (falls back to the item's data uri).
    pub uri: MediaUri,
    /// Kind of the underlying media.
    pub kind: MediaKind,
}
