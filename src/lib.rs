// SPDX-License-Identifier: MPL-2.0
//! `media_rail` is the paginated media browser core used to page through the
//! image and video attachments of a conversation.
//!
//! The backing result set can be large and is never materialized in full:
//! logical browsing positions are mapped to result-set rows on demand, and
//! heavyweight per-item view instances are kept alive only for a bounded
//! neighborhood around the currently visible item. Navigation position and
//! autoplay intent survive suspend/resume cycles of the host screen.
//!
//! Rendering, permission handling, and result-set production live outside
//! this crate; they are reached through the traits in [`application::port`].

#![doc(html_root_url = "https://docs.rs/media_rail/0.1.0")]

pub mod application;
pub mod browser;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
