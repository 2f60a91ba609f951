// SPDX-License-Identifier: MPL-2.0
//! Ports to the browser's external collaborators.
//!
//! The browser core never produces result sets, resolves identities, or
//! renders media itself. Those concerns live behind the traits defined
//! here, implemented by the host:
//!
//! - [`MediaSource`]: the ordered, random-access result set.
//! - [`OwnerDirectory`]: identity lookup plus change subscriptions.
//! - [`ViewFactory`] / [`MediaView`]: per-item view/playback instances.

pub mod directory;
pub mod source;
pub mod view;

pub use directory::{ChangeCallback, OwnerDirectory, SubscriptionId};
pub use source::MediaSource;
pub use view::{MediaView, PlaybackSurface, ViewFactory};
