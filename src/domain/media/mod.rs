// SPDX-License-Identifier: MPL-2.0
//! Media domain types.

mod types;

pub use types::{
    AttachmentId, MediaItem, MediaKind, MediaRow, MediaUri, OwnerId, OwnerProfile,
    ThumbnailDescriptor,
};
