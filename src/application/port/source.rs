// SPDX-License-Identifier: MPL-2.0
//! Result-set provider port.
//!
//! The backing result set is produced elsewhere (it arrives already
//! ordered) and is read-only from the browser's perspective. Random access
//! is pure and re-entrant: there is no shared cursor to advance, so
//! concurrent callers can never observe each other's position.

use crate::domain::media::MediaRow;

/// Port for the ordered result set backing a collection browse.
///
/// `row_at` is indexed in the provider's native row order; translating a
/// logical browsing position into a native row index is the job of
/// [`crate::application::query::position`], never of implementations.
pub trait MediaSource {
    /// Stable number of rows in the result set.
    fn count(&self) -> usize;

    /// Whether position 0 corresponds to the most recent row rather than
    /// the oldest.
    fn left_is_recent(&self) -> bool;

    /// Returns the row at a native index, or `None` when the index is out
    /// of range.
    ///
    /// Must be re-entrant and side-effect free; a `None` for an in-range
    /// index is a provider contract violation surfaced by the caller as a
    /// malformed record.
    fn row_at(&self, row_index: usize) -> Option<MediaRow>;
}
