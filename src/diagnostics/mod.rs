// SPDX-License-Identifier: MPL-2.0
//! Structured event log for browsing sessions.
//!
//! The browser records what it does (attach, select, release, suspend,
//! stale discards) into a bounded ring buffer of serializable events. The
//! host can export the log when investigating playback leaks or navigation
//! glitches; nothing here writes to disk or the network by itself.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default event log capacity.
pub const DEFAULT_LOG_CAPACITY: usize = 256;

/// Minimum event log capacity.
pub const MIN_LOG_CAPACITY: usize = 16;

/// Maximum event log capacity.
pub const MAX_LOG_CAPACITY: usize = 4096;

/// One observable step of a browsing session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BrowserEvent {
    /// A backing source was attached.
    Attached {
        /// `"single"` or `"collection"`.
        mode: String,
        position: usize,
    },
    /// The collection's activation gate opened.
    Activated { count: usize },
    /// The current position changed.
    PositionSelected { position: usize },
    /// A view instance was constructed.
    HandleRealized { position: usize, autoplay: bool },
    /// A view instance was told to pause.
    HandlePaused { position: usize },
    /// A view instance was disposed and dropped.
    HandleReleased { position: usize },
    /// A row refused to materialize; no handle exists at that position.
    RecordRejected { position: usize, reason: String },
    /// The host screen was hidden; all handles were torn down.
    Suspended { restart_position: usize },
    /// A suspended session re-attached at its restart position.
    Resumed { position: usize },
    /// The source identity changed; all browsing state was cleared.
    SourceReset,
    /// An asynchronous owner resolution arrived after its position was
    /// superseded.
    StaleCompletionDiscarded { position: usize },
    /// The session was abandoned because the content type is unsupported.
    SessionAbandoned { content_type: String },
}

/// A browser event with its capture time (epoch milliseconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimestampedEvent {
    pub at_ms: i64,
    #[serde(flatten)]
    pub event: BrowserEvent,
}

/// A circular buffer that evicts the oldest entry at capacity.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    /// Creates a buffer with the given capacity (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes an element, evicting the oldest when full.
    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    /// Iterates in chronological order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// Bounded, in-memory log of browser events.
#[derive(Debug, Clone)]
pub struct EventLog {
    buffer: CircularBuffer<TimestampedEvent>,
}

impl EventLog {
    /// Creates a log with `capacity` clamped to the supported range.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: CircularBuffer::with_capacity(
                capacity.clamp(MIN_LOG_CAPACITY, MAX_LOG_CAPACITY),
            ),
        }
    }

    /// Records an event, stamped with the current wall-clock time.
    pub fn record(&mut self, event: BrowserEvent) {
        self.buffer.push(TimestampedEvent {
            at_ms: Utc::now().timestamp_millis(),
            event,
        });
    }

    /// Iterates events oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TimestampedEvent> {
        self.buffer.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
