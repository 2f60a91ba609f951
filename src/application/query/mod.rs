// SPDX-License-Identifier: MPL-2.0
//! Query services over the backing result set.

pub mod position;

pub use position::{position_of_row, row_index};
