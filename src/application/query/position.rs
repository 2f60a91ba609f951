// SPDX-License-Identifier: MPL-2.0
//! Position index: logical browsing position <-> native row order.
//!
//! This module is the single source of truth for direction semantics.
//! Every component that needs to read a row at a logical position goes
//! through [`row_index`]; duplicating the arithmetic elsewhere is a defect.
//!
//! A logical position counts from the leftmost item as displayed. When
//! `left_is_recent` is set, position 0 is the most recent backing row;
//! otherwise it is the oldest. The mapping is pure and total for the
//! current count and makes no assumption about how the count got there.

/// Maps a logical browsing position to the native row index.
///
/// `count == 0` admits no valid positions; callers bound-check before
/// calling.
///
/// # Panics
///
/// Panics if `position >= count`.
#[must_use]
pub fn row_index(position: usize, count: usize, left_is_recent: bool) -> usize {
    assert!(
        position < count,
        "position {position} out of bounds for count {count}"
    );
    if left_is_recent {
        position
    } else {
        count - 1 - position
    }
}

/// Maps a native row index back to its logical browsing position.
///
/// This is the involution of [`row_index`]: the arithmetic is identical in
/// both directions. Used when the provider reports a starting row and the
/// browser needs the logical position to open at.
///
/// # Panics
///
/// Panics if `row >= count`.
#[must_use]
pub fn position_of_row(row: usize, count: usize, left_is_recent: bool) -> usize {
    row_index(row, count, left_is_recent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_is_recent_maps_identity() {
        for count in 1..20 {
            for p in 0..count {
                assert_eq!(row_index(p, count, true), p);
            }
        }
    }

    #[test]
    fn left_is_oldest_reverses_order() {
        for count in 1..20 {
            for p in 0..count {
                assert_eq!(row_index(p, count, false), count - 1 - p);
            }
        }
    }

    #[test]
    fn most_recent_item_shown_first() {
        // count=5, leftmost is most recent in display but the flag is off,
        // so position 0 resolves to the newest (last) row.
        assert_eq!(row_index(0, 5, false), 4);
        assert_eq!(row_index(4, 5, false), 0);
    }

    #[test]
    fn position_of_row_is_an_involution() {
        for count in 1..20 {
            for left_is_recent in [true, false] {
                for p in 0..count {
                    let row = row_index(p, count, left_is_recent);
                    assert_eq!(position_of_row(row, count, left_is_recent), p);
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_position_panics() {
        let _ = row_index(3, 3, true);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn empty_count_admits_no_positions() {
        let _ = row_index(0, 0, false);
    }
}
