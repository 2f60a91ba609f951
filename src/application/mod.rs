// SPDX-License-Identifier: MPL-2.0
//! Application layer: collaborator ports and query services.

pub mod port;
pub mod query;
