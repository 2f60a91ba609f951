// SPDX-License-Identifier: MPL-2.0
//! Materializes backing rows into immutable media items.

use crate::application::port::OwnerDirectory;
use crate::domain::media::{MediaItem, MediaKind, MediaRow};
use crate::error::{Error, Result};

/// Converts one result-set row into a [`MediaItem`].
///
/// The owning entity is resolved through a synchronous directory lookup;
/// an unknown owner yields an item without one (the row itself stays
/// valid).
///
/// # Errors
///
/// - [`Error::MalformedRecord`] when the row has no data location. A row
///   without one is a contract violation by the upstream provider, not a
///   recoverable condition, so no placeholder is ever fabricated.
/// - [`Error::UnsupportedMediaKind`] when the content type is neither
///   image- nor video-like.
pub fn materialize(row: &MediaRow, directory: &dyn OwnerDirectory) -> Result<MediaItem> {
    let uri = row
        .data_uri
        .clone()
        .ok_or_else(|| Error::MalformedRecord("row has no data location".to_string()))?;

    if MediaKind::from_content_type(&row.content_type).is_none() {
        return Err(Error::UnsupportedMediaKind(row.content_type.clone()));
    }

    let owner = directory.lookup(row.owner).map(|profile| profile.id());

    Ok(MediaItem::new(
        owner,
        row.attachment,
        uri,
        row.content_type.clone(),
        row.timestamp_ms,
        row.outgoing,
    ))
}
