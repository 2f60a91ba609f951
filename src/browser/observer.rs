// SPDX-License-Identifier: MPL-2.0
//! Reactive tracking of the currently visible item's owning entity.
//!
//! At most one directory subscription is live at a time. Switching targets
//! unsubscribes the old owner strictly before subscribing the new one, so
//! two back-to-back position changes can never leak a subscription.
//!
//! Owner resolution may complete asynchronously; a completion whose target
//! position is no longer current is counted and discarded without side
//! effects.

use crate::application::port::{ChangeCallback, OwnerDirectory, SubscriptionId};
use crate::domain::media::OwnerId;
use std::sync::Arc;

struct LiveSubscription {
    subscription: SubscriptionId,
    position: usize,
    owner: OwnerId,
}

/// Follows the owner of the current position so dependent UI (title bar)
/// stays current as that entity's data changes.
pub struct ActiveItemObserver {
    directory: Arc<dyn OwnerDirectory>,
    live: Option<LiveSubscription>,
    stale_discards: u64,
}

impl ActiveItemObserver {
    #[must_use]
    pub fn new(directory: Arc<dyn OwnerDirectory>) -> Self {
        Self {
            directory,
            live: None,
            stale_discards: 0,
        }
    }

    /// Subscribes to `owner`'s changes on behalf of `position`.
    ///
    /// Any previous subscription is cancelled first; the ordering is part
    /// of the contract, not an implementation detail.
    pub fn watch(&mut self, position: usize, owner: OwnerId, on_change: ChangeCallback) {
        self.clear();
        let subscription = self.directory.subscribe(owner, on_change);
        self.live = Some(LiveSubscription {
            subscription,
            position,
            owner,
        });
    }

    /// Cancels the live subscription, if any.
    pub fn clear(&mut self) {
        if let Some(live) = self.live.take() {
            self.directory.unsubscribe(live.subscription);
        }
    }

    /// Commits an asynchronous owner resolution.
    ///
    /// The subscription is established only when `position` still equals
    /// the live `current_position`; a superseded completion is discarded
    /// with no observable effect beyond the stale counter.
    pub fn apply_resolution(
        &mut self,
        position: usize,
        owner: OwnerId,
        current_position: usize,
        on_change: ChangeCallback,
    ) -> bool {
        if position != current_position {
            self.stale_discards += 1;
            return false;
        }
        self.watch(position, owner, on_change);
        true
    }

    /// Owner of the live subscription, if one exists.
    #[must_use]
    pub fn watched_owner(&self) -> Option<OwnerId> {
        self.live.as_ref().map(|l| l.owner)
    }

    /// Position the live subscription was established for.
    #[must_use]
    pub fn watched_position(&self) -> Option<usize> {
        self.live.as_ref().map(|l| l.position)
    }

    #[must_use]
    pub fn has_subscription(&self) -> bool {
        self.live.is_some()
    }

    /// Number of asynchronous completions discarded as stale.
    #[must_use]
    pub fn stale_discards(&self) -> u64 {
        self.stale_discards
    }
}

impl std::fmt::Debug for ActiveItemObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveItemObserver")
            .field("watched_owner", &self.watched_owner())
            .field("watched_position", &self.watched_position())
            .field("stale_discards", &self.stale_discards)
            .finish()
    }
}
