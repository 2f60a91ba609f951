// SPDX-License-Identifier: MPL-2.0
//! Navigation state machine for the media browser.
//!
//! Three states, driven by a closed set of host-reported events:
//! - **Inactive**: no backing source attached.
//! - **Active**: a source is attached and `current_position` is valid.
//! - **Suspended**: the host screen is hidden; the position to resume at
//!   is captured and every view instance has been torn down.
//!
//! All transitions run on one logical control thread. A position change is
//! a single atomic sequence: pause the previous handle, unsubscribe the
//! previous owner, acquire the new handle, subscribe the new owner, trim
//! the neighborhood, publish preview state.

use crate::application::port::{ChangeCallback, ViewFactory};
use crate::browser::adapter::BackingSource;
use crate::browser::cache::ViewCache;
use crate::browser::observer::ActiveItemObserver;
use crate::browser::preview::{self, PreviewPublisher, PreviewState, ThumbnailCache, TitleText};
use crate::config::Config;
use crate::diagnostics::{BrowserEvent, EventLog};
use crate::domain::media::{MediaItem, OwnerId, OwnerProfile};
use crate::error::Error;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;

/// Lifecycle state of a browsing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserState {
    /// No backing source attached.
    Inactive,
    /// Source attached, current position valid.
    Active,
    /// Host screen hidden; restart position captured, handles released.
    Suspended,
}

/// Host-reported events driving the state machine.
#[derive(Debug)]
pub enum ScreenEvent {
    /// The result set (or single item) is ready to browse.
    SourceReady {
        backing: BackingSource,
        /// Logical position to open at, ignored when a restart position
        /// survives from a suspend.
        start_position: usize,
        caption: Option<String>,
    },
    /// The host pager moved to a new logical position.
    PositionChanged(usize),
    /// The host screen became visible. The host follows up with
    /// `SourceReady` once its loader finishes.
    Shown,
    /// The host screen was hidden or paused.
    Hidden,
    /// The screen is being reused for a different target entirely.
    NewTarget,
    /// An asynchronous owner resolution completed.
    OwnerResolved { position: usize, owner: OwnerId },
}

/// What the host must do after an event was handled.
#[derive(Debug)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Move the pager to this logical position.
    PositionSettled(usize),
    /// The session cannot continue; the host must abandon the screen.
    Abandon(Error),
}

/// Tracks the current browsing position, the suspend/resume restart
/// position, and the one-shot autoplay position; owns the view cache and
/// the active-item subscription.
pub struct NavigationController {
    factory: Arc<dyn ViewFactory>,
    state: BrowserState,
    backing: Option<BackingSource>,
    cache: ViewCache,
    observer: Option<ActiveItemObserver>,
    current_position: usize,
    restart_position: Option<usize>,
    autoplay_position: Option<usize>,
    caption: Option<String>,
    publisher: PreviewPublisher,
    thumbnails: ThumbnailCache,
    rail_radius: usize,
    log: EventLog,
    owner_change: Arc<dyn Fn(&OwnerProfile)>,
}

impl NavigationController {
    #[must_use]
    pub fn new(factory: Arc<dyn ViewFactory>, config: &Config) -> Self {
        Self {
            factory,
            state: BrowserState::Inactive,
            backing: None,
            cache: ViewCache::new(),
            observer: None,
            current_position: 0,
            restart_position: None,
            autoplay_position: None,
            caption: None,
            publisher: PreviewPublisher::new(),
            thumbnails: ThumbnailCache::new(config.effective_thumbnail_cache_entries()),
            rail_radius: config.effective_rail_radius(),
            log: EventLog::new(config.effective_event_log_capacity()),
            owner_change: Arc::new(|_| {}),
        }
    }

    /// Registers the callback run when the watched owner's profile
    /// changes (used upstream to refresh the title bar).
    pub fn set_owner_change_listener(&mut self, listener: impl Fn(&OwnerProfile) + 'static) {
        self.owner_change = Arc::new(listener);
    }

    /// Dispatches one host event through the state machine.
    pub fn handle(&mut self, event: ScreenEvent) -> Effect {
        match event {
            ScreenEvent::SourceReady {
                backing,
                start_position,
                caption,
            } => self.attach(backing, start_position, caption),
            ScreenEvent::PositionChanged(position) => {
                self.select_position(position);
                Effect::None
            }
            ScreenEvent::Shown => Effect::None,
            ScreenEvent::Hidden => {
                self.suspend();
                Effect::None
            }
            ScreenEvent::NewTarget => {
                self.reset_for_new_source();
                Effect::None
            }
            ScreenEvent::OwnerResolved { position, owner } => {
                self.owner_resolved(position, owner);
                Effect::None
            }
        }
    }

    /// Attaches a backing source and activates it.
    ///
    /// A restart position surviving a suspend overrides `start_position`.
    /// The selection side effects run even when the resulting position is
    /// 0, where hosts typically do not report a position change.
    pub fn attach(
        &mut self,
        mut backing: BackingSource,
        start_position: usize,
        caption: Option<String>,
    ) -> Effect {
        let fresh = self.state == BrowserState::Inactive;

        // A new source arriving while Active replaces the current one. No
        // handle or subscription may outlive the source it was built from,
        // so tear the old session down before installing the new backing.
        if self.state == BrowserState::Active {
            for position in self.cache.live_positions() {
                self.log.record(BrowserEvent::HandleReleased { position });
            }
            self.cache.release_all();
            if let Some(observer) = self.observer.as_mut() {
                observer.clear();
            }
            self.thumbnails.clear();
        }

        backing.activate();

        let count = backing.count();
        let mode = match backing {
            BackingSource::Single { .. } => "single",
            BackingSource::Collection { .. } => "collection",
        };

        let position = match self.restart_position.take() {
            Some(restart) => restart,
            None => start_position,
        };
        let position = if count == 0 { 0 } else { position.min(count - 1) };

        // Unsupported content is fatal to the whole session, checked before
        // any view instance exists.
        if count > 0 {
            if let Some(content_type) = unsupported_kind_at(&backing, position) {
                self.log.record(BrowserEvent::SessionAbandoned {
                    content_type: content_type.clone(),
                });
                self.reset_for_new_source();
                return Effect::Abandon(Error::UnsupportedMediaKind(content_type));
            }
        }

        if fresh {
            self.thumbnails.clear();
            // Armed with the clamped position: an out-of-range start must
            // not leave the one-shot dangling forever.
            self.autoplay_position = Some(position);
        }

        self.observer = backing
            .directory()
            .map(|directory| ActiveItemObserver::new(Arc::clone(directory)));
        self.backing = Some(backing);
        self.caption = caption;
        self.state = BrowserState::Active;
        if fresh {
            self.log.record(BrowserEvent::Attached {
                mode: mode.to_string(),
                position,
            });
        } else {
            self.log.record(BrowserEvent::Resumed { position });
        }
        self.log.record(BrowserEvent::Activated { count });

        if count == 0 {
            self.current_position = 0;
            self.publish_preview();
            return Effect::None;
        }

        self.select_internal(position, None);
        Effect::PositionSettled(position)
    }

    /// Moves the current position. Ignored while not Active or when the
    /// position is out of bounds.
    pub fn select_position(&mut self, position: usize) {
        if self.state != BrowserState::Active {
            return;
        }
        let count = self.backing.as_ref().map_or(0, BackingSource::count);
        if position >= count {
            return;
        }
        let previous = (position != self.current_position).then_some(self.current_position);
        self.select_internal(position, previous);
    }

    /// Captures the restart position and tears down every view instance.
    pub fn suspend(&mut self) {
        if self.state != BrowserState::Active {
            return;
        }
        self.restart_position = Some(self.current_position);
        self.log.record(BrowserEvent::Suspended {
            restart_position: self.current_position,
        });

        for position in self.cache.live_positions() {
            self.log.record(BrowserEvent::HandleReleased { position });
        }
        self.cache.release_all();

        if let Some(observer) = self.observer.as_mut() {
            observer.clear();
        }
        self.state = BrowserState::Suspended;
    }

    /// Clears all browsing state because the source identity changed.
    pub fn reset_for_new_source(&mut self) {
        for position in self.cache.live_positions() {
            self.log.record(BrowserEvent::HandleReleased { position });
        }
        self.cache.release_all();
        if let Some(mut observer) = self.observer.take() {
            observer.clear();
        }
        self.backing = None;
        self.caption = None;
        self.current_position = 0;
        self.restart_position = None;
        self.autoplay_position = None;
        self.thumbnails.clear();
        self.state = BrowserState::Inactive;
        self.log.record(BrowserEvent::SourceReset);
        self.publisher.publish(PreviewState::default());
    }

    /// Commits or discards an asynchronous owner resolution.
    fn owner_resolved(&mut self, position: usize, owner: OwnerId) {
        if self.state != BrowserState::Active {
            return;
        }
        let Some(observer) = self.observer.as_mut() else {
            return;
        };
        let callback = change_callback(&self.owner_change);
        if observer.apply_resolution(position, owner, self.current_position, callback) {
            self.publish_preview();
        } else {
            self.log
                .record(BrowserEvent::StaleCompletionDiscarded { position });
        }
    }

    fn select_internal(&mut self, position: usize, previous: Option<usize>) {
        if let Some(previous) = previous {
            if self.cache.contains(previous) {
                self.cache.pause(previous);
                self.log
                    .record(BrowserEvent::HandlePaused { position: previous });
            }
        }

        // Unsubscribe the old owner strictly before subscribing the new one.
        if let Some(observer) = self.observer.as_mut() {
            observer.clear();
        }

        self.current_position = position;
        self.log
            .record(BrowserEvent::PositionSelected { position });

        let current_item = self.realize(position, true);
        if position > 0 {
            self.realize(position - 1, false);
        }
        self.realize(position + 1, false);

        let released = {
            let before = self.cache.live_positions();
            self.cache.retain_neighborhood(position);
            let after = self.cache.live_positions();
            before.into_iter().filter(|p| !after.contains(p)).collect::<Vec<_>>()
        };
        for released_position in released {
            self.log.record(BrowserEvent::HandleReleased {
                position: released_position,
            });
        }

        if let Some(owner) = current_item.as_ref().and_then(MediaItem::owner) {
            if let Some(observer) = self.observer.as_mut() {
                observer.watch(position, owner, change_callback(&self.owner_change));
            }
        }

        self.publish_preview();
    }

    /// Realizes the view at `position` if the row materializes. Returns the
    /// item for the caller's subscription bookkeeping.
    fn realize(&mut self, position: usize, is_current: bool) -> Option<MediaItem> {
        let backing = self.backing.as_ref()?;
        if position >= backing.count() {
            return None;
        }
        match backing.media_item_at(position) {
            Ok(item) => {
                if !self.cache.contains(position) {
                    let autoplay = self.autoplay_position == Some(position);
                    if autoplay {
                        self.autoplay_position = None;
                    }
                    self.cache
                        .acquire(position, &item, self.factory.as_ref(), autoplay);
                    self.log
                        .record(BrowserEvent::HandleRealized { position, autoplay });
                }
                Some(item)
            }
            Err(err) => {
                // Only the attach-time kind check is session-fatal. Once
                // browsing, malformed rows and unsupported kinds alike
                // leave the position without a handle; no placeholder is
                // fabricated.
                if is_current {
                    self.log.record(BrowserEvent::RecordRejected {
                        position,
                        reason: err.to_string(),
                    });
                }
                None
            }
        }
    }

    fn publish_preview(&mut self) {
        let Some(backing) = self.backing.as_ref() else {
            self.publisher.publish(PreviewState::default());
            return;
        };
        let (thumbnails, active_index) = preview::build_rail(
            backing,
            self.current_position,
            self.rail_radius,
            &mut self.thumbnails,
        );
        self.publisher.publish(PreviewState {
            thumbnails,
            active_index,
            caption: self.caption.clone(),
            playback_surface: self.cache.playback_surface(self.current_position),
        });
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> BrowserState {
        self.state
    }

    #[must_use]
    pub fn current_position(&self) -> usize {
        self.current_position
    }

    /// Position a future attach resumes at, captured at the last suspend.
    #[must_use]
    pub fn restart_position(&self) -> Option<usize> {
        self.restart_position
    }

    /// One-shot autoplay target, if not yet consumed.
    #[must_use]
    pub fn autoplay_position(&self) -> Option<usize> {
        self.autoplay_position
    }

    /// Number of browsable positions (0 while inactive or not yet ready).
    #[must_use]
    pub fn count(&self) -> usize {
        self.backing.as_ref().map_or(0, BackingSource::count)
    }

    /// The media item at the current position, if one materializes.
    #[must_use]
    pub fn current_item(&self) -> Option<MediaItem> {
        if self.state != BrowserState::Active {
            return None;
        }
        let backing = self.backing.as_ref()?;
        if backing.count() == 0 {
            return None;
        }
        backing.media_item_at(self.current_position).ok()
    }

    /// Title-bar text for the current item.
    #[must_use]
    pub fn title_for_current(&self) -> Option<TitleText> {
        let item = self.current_item()?;
        let owner = item.owner().and_then(|owner| {
            self.backing
                .as_ref()
                .and_then(BackingSource::directory)
                .and_then(|directory| directory.lookup(owner))
        });
        Some(preview::title_for(&item, owner.as_ref(), Utc::now()))
    }

    /// Positions that currently hold a live view instance, sorted.
    #[must_use]
    pub fn live_positions(&self) -> Vec<usize> {
        self.cache.live_positions()
    }

    /// Opens a receiver on the preview-state stream.
    #[must_use]
    pub fn preview_updates(&self) -> watch::Receiver<PreviewState> {
        self.publisher.subscribe()
    }

    /// The most recently published preview snapshot.
    #[must_use]
    pub fn latest_preview(&self) -> PreviewState {
        self.publisher.latest()
    }

    /// Diagnostic event log for this session.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.log
    }

    /// Stale owner resolutions discarded so far.
    #[must_use]
    pub fn stale_discards(&self) -> u64 {
        self.observer
            .as_ref()
            .map_or(0, ActiveItemObserver::stale_discards)
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("state", &self.state)
            .field("current_position", &self.current_position)
            .field("restart_position", &self.restart_position)
            .field("autoplay_position", &self.autoplay_position)
            .field("live_positions", &self.cache.live_positions())
            .finish()
    }
}

fn change_callback(listener: &Arc<dyn Fn(&OwnerProfile)>) -> ChangeCallback {
    let listener = Arc::clone(listener);
    Box::new(move |profile| listener(profile))
}

/// Returns the offending content type when the item at `position` is
/// neither image- nor video-like.
fn unsupported_kind_at(backing: &BackingSource, position: usize) -> Option<String> {
    match backing.media_item_at(position) {
        Ok(item) => item
            .kind()
            .is_none()
            .then(|| item.content_type().to_string()),
        Err(Error::UnsupportedMediaKind(content_type)) => Some(content_type),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{
        MediaSource, MediaView, OwnerDirectory, PlaybackSurface, SubscriptionId,
    };
    use crate::domain::media::{MediaRow, MediaUri};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct VecSource {
        rows: Vec<MediaRow>,
        left_is_recent: bool,
    }

    impl MediaSource for VecSource {
        fn count(&self) -> usize {
            self.rows.len()
        }

        fn left_is_recent(&self) -> bool {
            self.left_is_recent
        }

        fn row_at(&self, row_index: usize) -> Option<MediaRow> {
            self.rows.get(row_index).cloned()
        }
    }

    #[derive(Default)]
    struct RecordingDirectory {
        subscribed: RefCell<Vec<OwnerId>>,
        live: RefCell<std::collections::HashMap<u64, OwnerId>>,
        next_id: RefCell<u64>,
    }

    impl RecordingDirectory {
        fn live_owners(&self) -> Vec<OwnerId> {
            let mut owners: Vec<OwnerId> = self.live.borrow().values().copied().collect();
            owners.sort_by_key(|o| o.value());
            owners
        }
    }

    impl OwnerDirectory for RecordingDirectory {
        fn lookup(&self, owner: OwnerId) -> Option<OwnerProfile> {
            Some(OwnerProfile::new(owner, format!("owner-{}", owner.value())))
        }

        fn subscribe(&self, owner: OwnerId, _on_change: ChangeCallback) -> SubscriptionId {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            self.subscribed.borrow_mut().push(owner);
            self.live.borrow_mut().insert(*next, owner);
            SubscriptionId::new(*next)
        }

        fn unsubscribe(&self, subscription: SubscriptionId) {
            self.live.borrow_mut().remove(&subscription.value());
        }
    }

    #[derive(Debug, Default)]
    struct Probe {
        pauses: u32,
        disposals: u32,
    }

    struct TestView {
        probe: Rc<RefCell<Probe>>,
        surface: Option<PlaybackSurface>,
    }

    impl MediaView for TestView {
        fn pause(&mut self) {
            self.probe.borrow_mut().pauses += 1;
        }

        fn dispose(&mut self) {
            self.probe.borrow_mut().disposals += 1;
        }

        fn playback_surface(&self) -> Option<PlaybackSurface> {
            self.surface
        }
    }

    struct Created {
        uri: String,
        autoplay: bool,
        probe: Rc<RefCell<Probe>>,
    }

    #[derive(Default)]
    struct TestFactory {
        created: RefCell<Vec<Created>>,
    }

    impl TestFactory {
        fn creations_for(&self, uri: &str) -> Vec<(bool, Rc<RefCell<Probe>>)> {
            self.created
                .borrow()
                .iter()
                .filter(|c| c.uri == uri)
                .map(|c| (c.autoplay, Rc::clone(&c.probe)))
                .collect()
        }
    }

    impl ViewFactory for TestFactory {
        fn create(&self, item: &MediaItem, autoplay: bool) -> Box<dyn MediaView> {
            let probe = Rc::new(RefCell::new(Probe::default()));
            let surface = item
                .content_type()
                .starts_with("video/")
                .then(|| PlaybackSurface::new(self.created.borrow().len() as u64 + 1));
            self.created.borrow_mut().push(Created {
                uri: item.uri().as_str().to_string(),
                autoplay,
                probe: Rc::clone(&probe),
            });
            Box::new(TestView { probe, surface })
        }
    }

    fn rows(n: usize, content_type: &str) -> Vec<MediaRow> {
        (0..n)
            .map(|i| MediaRow {
                owner: OwnerId::new(i as u64 + 1),
                attachment: None,
                data_uri: Some(MediaUri::new(format!("m://{i}"))),
                content_type: content_type.to_string(),
                timestamp_ms: 1_000 + i as i64,
                outgoing: false,
                thumbnail_uri: None,
            })
            .collect()
    }

    struct Fixture {
        factory: Arc<TestFactory>,
        directory: Arc<RecordingDirectory>,
        controller: NavigationController,
    }

    impl Fixture {
        fn new() -> Self {
            let factory = Arc::new(TestFactory::default());
            let directory = Arc::new(RecordingDirectory::default());
            let controller =
                NavigationController::new(Arc::clone(&factory) as _, &Config::default());
            Self {
                factory,
                directory,
                controller,
            }
        }

        fn collection(&self, rows: Vec<MediaRow>) -> BackingSource {
            BackingSource::collection(
                Arc::new(VecSource {
                    rows,
                    left_is_recent: true,
                }),
                Arc::clone(&self.directory) as _,
            )
        }

        fn attach(&mut self, rows: Vec<MediaRow>, start_position: usize) -> Effect {
            let backing = self.collection(rows);
            self.controller.handle(ScreenEvent::SourceReady {
                backing,
                start_position,
                caption: None,
            })
        }
    }

    #[test]
    fn attach_settles_and_realizes_the_neighborhood() {
        let mut fx = Fixture::new();

        let effect = fx.attach(rows(5, "image/png"), 2);

        assert!(matches!(effect, Effect::PositionSettled(2)));
        assert_eq!(fx.controller.state(), BrowserState::Active);
        assert_eq!(fx.controller.count(), 5);
        assert_eq!(fx.controller.current_position(), 2);
        assert_eq!(fx.controller.live_positions(), vec![1, 2, 3]);
    }

    #[test]
    fn autoplay_applies_once_at_the_start_position() {
        let mut fx = Fixture::new();
        fx.attach(rows(6, "video/mp4"), 1);

        assert_eq!(fx.controller.autoplay_position(), None);
        assert_eq!(fx.factory.creations_for("m://1")[0].0, true);
        assert_eq!(fx.factory.creations_for("m://0")[0].0, false);
        assert_eq!(fx.factory.creations_for("m://2")[0].0, false);

        // Leave and come back; the rebuilt handle must not auto-start.
        fx.controller.handle(ScreenEvent::PositionChanged(3));
        fx.controller.handle(ScreenEvent::PositionChanged(5));
        fx.controller.handle(ScreenEvent::PositionChanged(1));

        let creations = fx.factory.creations_for("m://1");
        assert_eq!(creations.len(), 2);
        assert_eq!(creations[1].0, false);
    }

    #[test]
    fn selection_pauses_previous_and_trims_the_window() {
        let mut fx = Fixture::new();
        fx.attach(rows(6, "video/mp4"), 0);

        fx.controller.handle(ScreenEvent::PositionChanged(1));
        fx.controller.handle(ScreenEvent::PositionChanged(2));

        assert_eq!(fx.controller.live_positions(), vec![1, 2, 3]);

        let pos0 = &fx.factory.creations_for("m://0")[0].1;
        assert_eq!(pos0.borrow().pauses, 1);
        assert_eq!(pos0.borrow().disposals, 1);
        let pos1 = &fx.factory.creations_for("m://1")[0].1;
        assert_eq!(pos1.borrow().pauses, 1);
        assert_eq!(pos1.borrow().disposals, 0);
    }

    #[test]
    fn re_attaching_a_new_source_replaces_handles_and_subscription() {
        let mut fx = Fixture::new();
        fx.attach(rows(4, "image/png"), 0);

        // Second source arrives with no Hidden/NewTarget in between.
        let replacement: Vec<MediaRow> = (0..4)
            .map(|i| MediaRow {
                owner: OwnerId::new(40 + i as u64),
                attachment: None,
                data_uri: Some(MediaUri::new(format!("n://{i}"))),
                content_type: "image/png".to_string(),
                timestamp_ms: 2_000,
                outgoing: false,
                thumbnail_uri: None,
            })
            .collect();
        fx.attach(replacement, 0);

        // Exactly one subscription survives, targeting the new owner.
        assert_eq!(fx.directory.live_owners(), vec![OwnerId::new(40)]);
        // The current handle comes from the new source, not a stale reuse.
        assert_eq!(fx.factory.creations_for("n://0").len(), 1);
        for uri in ["m://0", "m://1"] {
            for (_, probe) in fx.factory.creations_for(uri) {
                assert_eq!(probe.borrow().disposals, 1);
            }
        }
        assert_eq!(fx.controller.live_positions(), vec![0, 1]);
    }

    #[test]
    fn out_of_range_start_clamps_and_still_consumes_autoplay() {
        let mut fx = Fixture::new();

        let effect = fx.attach(rows(3, "video/mp4"), 99);

        assert!(matches!(effect, Effect::PositionSettled(2)));
        assert_eq!(fx.controller.autoplay_position(), None);
        assert_eq!(fx.factory.creations_for("m://2")[0].0, true);
    }

    #[test]
    fn out_of_bounds_selection_is_ignored() {
        let mut fx = Fixture::new();
        fx.attach(rows(3, "image/png"), 1);

        fx.controller.handle(ScreenEvent::PositionChanged(9));

        assert_eq!(fx.controller.current_position(), 1);
        assert_eq!(fx.controller.live_positions(), vec![0, 1, 2]);
    }

    #[test]
    fn suspend_captures_restart_position_and_tears_down() {
        let mut fx = Fixture::new();
        fx.attach(rows(5, "image/png"), 3);

        fx.controller.handle(ScreenEvent::Hidden);

        assert_eq!(fx.controller.state(), BrowserState::Suspended);
        assert_eq!(fx.controller.restart_position(), Some(3));
        assert!(fx.controller.live_positions().is_empty());
        assert!(fx.directory.live_owners().is_empty());
        for created in fx.factory.created.borrow().iter() {
            assert_eq!(created.probe.borrow().disposals, 1);
        }
    }

    #[test]
    fn resume_prefers_restart_position_over_start() {
        let mut fx = Fixture::new();
        fx.attach(rows(5, "video/mp4"), 3);
        fx.controller.handle(ScreenEvent::Hidden);

        let effect = fx.attach(rows(5, "video/mp4"), 0);

        assert!(matches!(effect, Effect::PositionSettled(3)));
        assert_eq!(fx.controller.restart_position(), None);
        assert!(fx
            .controller
            .events()
            .iter()
            .any(|e| e.event == BrowserEvent::Resumed { position: 3 }));
        // Resuming is not a fresh open; nothing auto-starts.
        let creations = fx.factory.creations_for("m://3");
        assert_eq!(creations.len(), 2);
        assert_eq!(creations[1].0, false);
    }

    #[test]
    fn new_target_clears_all_browsing_state() {
        let mut fx = Fixture::new();
        fx.attach(rows(5, "image/png"), 2);

        fx.controller.handle(ScreenEvent::NewTarget);

        assert_eq!(fx.controller.state(), BrowserState::Inactive);
        assert_eq!(fx.controller.count(), 0);
        assert_eq!(fx.controller.restart_position(), None);
        assert!(fx.controller.live_positions().is_empty());
        assert!(fx.controller.latest_preview().is_blank());
        assert!(fx
            .controller
            .events()
            .iter()
            .any(|e| e.event == BrowserEvent::SourceReset));
    }

    #[test]
    fn owner_subscription_follows_the_current_position() {
        let mut fx = Fixture::new();
        fx.attach(rows(4, "image/png"), 0);
        assert_eq!(fx.directory.live_owners(), vec![OwnerId::new(1)]);

        fx.controller.handle(ScreenEvent::PositionChanged(2));

        assert_eq!(fx.directory.live_owners(), vec![OwnerId::new(3)]);
        assert_eq!(fx.directory.subscribed.borrow().len(), 2);
    }

    #[test]
    fn stale_owner_resolution_is_discarded() {
        let mut fx = Fixture::new();
        fx.attach(rows(4, "image/png"), 0);
        fx.controller.handle(ScreenEvent::PositionChanged(2));

        fx.controller.handle(ScreenEvent::OwnerResolved {
            position: 0,
            owner: OwnerId::new(1),
        });

        assert_eq!(fx.controller.stale_discards(), 1);
        assert_eq!(fx.directory.live_owners(), vec![OwnerId::new(3)]);
        assert!(fx
            .controller
            .events()
            .iter()
            .any(|e| e.event == BrowserEvent::StaleCompletionDiscarded { position: 0 }));
    }

    #[test]
    fn current_owner_resolution_is_applied() {
        let mut fx = Fixture::new();
        fx.attach(rows(4, "image/png"), 0);
        fx.controller.handle(ScreenEvent::PositionChanged(2));

        fx.controller.handle(ScreenEvent::OwnerResolved {
            position: 2,
            owner: OwnerId::new(7),
        });

        assert_eq!(fx.controller.stale_discards(), 0);
        assert_eq!(fx.directory.live_owners(), vec![OwnerId::new(7)]);
    }

    #[test]
    fn unsupported_content_abandons_the_session() {
        let mut fx = Fixture::new();

        let effect = fx.attach(rows(3, "application/pdf"), 0);

        assert!(matches!(
            effect,
            Effect::Abandon(Error::UnsupportedMediaKind(_))
        ));
        assert_eq!(fx.controller.state(), BrowserState::Inactive);
        assert!(fx.factory.created.borrow().is_empty());
        assert!(fx.controller.events().iter().any(|e| matches!(
            e.event,
            BrowserEvent::SessionAbandoned { .. }
        )));
    }

    #[test]
    fn malformed_row_leaves_its_position_without_a_handle() {
        let mut fx = Fixture::new();
        let mut row_set = rows(3, "image/png");
        row_set[1].data_uri = None;
        fx.attach(row_set, 1);

        assert_eq!(fx.controller.state(), BrowserState::Active);
        assert_eq!(fx.controller.live_positions(), vec![0, 2]);
        assert!(fx.controller.current_item().is_none());
        assert!(fx.controller.events().iter().any(|e| matches!(
            e.event,
            BrowserEvent::RecordRejected { position: 1, .. }
        )));
    }

    #[test]
    fn empty_collection_activates_without_selecting() {
        let mut fx = Fixture::new();

        let effect = fx.attach(Vec::new(), 0);

        assert!(matches!(effect, Effect::None));
        assert_eq!(fx.controller.state(), BrowserState::Active);
        assert_eq!(fx.controller.count(), 0);
        assert!(fx.controller.live_positions().is_empty());
    }

    #[test]
    fn single_item_mode_realizes_one_handle_and_no_subscription() {
        let mut fx = Fixture::new();
        let backing = BackingSource::single(MediaUri::new("m://solo"), "video/mp4");

        let effect = fx.controller.handle(ScreenEvent::SourceReady {
            backing,
            start_position: 0,
            caption: None,
        });

        assert!(matches!(effect, Effect::PositionSettled(0)));
        assert_eq!(fx.controller.live_positions(), vec![0]);
        assert_eq!(fx.factory.creations_for("m://solo")[0].0, true);
        assert!(fx.directory.live_owners().is_empty());

        let text = fx.controller.title_for_current().expect("title");
        assert_eq!(text.title, "You");
        assert_eq!(text.subtitle, "Draft");
    }

    #[test]
    fn preview_reflects_rail_caption_and_surface() {
        let mut fx = Fixture::new();
        let backing = fx.collection(rows(9, "video/mp4"));
        fx.controller.handle(ScreenEvent::SourceReady {
            backing,
            start_position: 4,
            caption: Some("a caption".to_string()),
        });

        let preview = fx.controller.latest_preview();
        let positions: Vec<usize> = preview.thumbnails.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(preview.active_index, 3);
        assert_eq!(preview.caption.as_deref(), Some("a caption"));
        assert!(preview.playback_surface.is_some());
    }

    #[test]
    fn preview_receiver_sees_position_changes() {
        let mut fx = Fixture::new();
        fx.attach(rows(9, "image/png"), 0);
        let rx = fx.controller.preview_updates();

        fx.controller.handle(ScreenEvent::PositionChanged(5));

        let preview = rx.borrow().clone();
        assert_eq!(preview.thumbnails[preview.active_index].position, 5);
    }

    #[test]
    fn title_uses_directory_profile_for_incoming_items() {
        let mut fx = Fixture::new();
        fx.attach(rows(3, "image/png"), 2);

        let text = fx.controller.title_for_current().expect("title");
        assert_eq!(text.title, "owner-3");
    }

    #[test]
    fn owner_change_listener_receives_profile_updates() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut fx = Fixture::new();
        fx.controller.set_owner_change_listener(move |profile| {
            sink.borrow_mut().push(profile.display_name().to_string());
        });
        fx.attach(rows(3, "image/png"), 0);

        // Simulate the directory pushing a change through the live callback.
        if let Some(profile) = fx.directory.lookup(OwnerId::new(1)) {
            (fx.controller.owner_change)(&profile);
        }

        assert_eq!(seen.borrow().as_slice(), ["owner-1"]);
    }
}
