// SPDX-License-Identifier: MPL-2.0
//! Owning-entity directory port.
//!
//! Lookup is synchronous and side-effect free (the directory may cache
//! internally). Change notifications use an explicit subscribe/unsubscribe
//! pair; the browser core holds at most one live subscription at a time and
//! owns its lifetime.

use crate::domain::media::{OwnerId, OwnerProfile};

/// Callback invoked on every change to a subscribed owner's profile.
pub type ChangeCallback = Box<dyn Fn(&OwnerProfile)>;

/// Token identifying one live change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Port for resolving and observing owning entities.
pub trait OwnerDirectory {
    /// Resolves an owner identity to its current profile, if known.
    fn lookup(&self, owner: OwnerId) -> Option<OwnerProfile>;

    /// Registers `on_change` to run on every change to `owner`'s profile.
    ///
    /// The returned token stays valid until passed to [`unsubscribe`].
    ///
    /// [`unsubscribe`]: OwnerDirectory::unsubscribe
    fn subscribe(&self, owner: OwnerId, on_change: ChangeCallback) -> SubscriptionId;

    /// Cancels a subscription. Unknown or already-cancelled tokens are a
    /// no-op.
    fn unsubscribe(&self, subscription: SubscriptionId);
}
