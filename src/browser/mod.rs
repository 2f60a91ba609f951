// SPDX-License-Identifier: MPL-2.0
//! The paginated media browser core.
//!
//! Data flow: the position index resolves a logical position to a backing
//! row; [`record`] materializes the row into a `MediaItem`; [`cache`]
//! realizes or reuses the view instance for that position; [`controller`]
//! governs which position is current and what happens to its neighbors;
//! [`observer`] follows the owning entity of the visible item; [`preview`]
//! publishes the reactive state consumed by presentation collaborators.

pub mod adapter;
pub mod cache;
pub mod controller;
pub mod observer;
pub mod preview;
pub mod record;

pub use adapter::BackingSource;
pub use cache::ViewCache;
pub use controller::{BrowserState, Effect, NavigationController, ScreenEvent};
pub use observer::ActiveItemObserver;
pub use preview::{PreviewPublisher, PreviewState};
