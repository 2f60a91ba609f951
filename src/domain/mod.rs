// SPDX-License-Identifier: MPL-2.0
//! Domain layer: pure data types with no presentation dependencies.

pub mod media;
