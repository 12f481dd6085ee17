// SPDX-License-Identifier: MPL-2.0
//! Viewer session orchestrator.
//!
//! A session is created by [`State::open`] with a homogeneous media sequence
//! and a starting index, and lives until [`State::close`] (or until it is
//! dropped). It routes input to the sub-components, applies the rules that
//! span several of them, and reports [`Effect`]s back to the host.
//!
//! Per-item state is rebuilt on every index change: engagement counters come
//! from the new item's published counts and a video source is re-attached.
//! Navigation chrome and the mute flag survive index changes.

use super::subcomponents::{engagement, feedback, gesture, navigation, playback, scrub};
use super::{pane, video_controls};
use crate::config::ViewerSettings;
use crate::domain::media::{Capability, ItemRef, MediaItem, MediaKind, MediaSequence};
use crate::domain::video::{format_time, PlaybackStatus};
use crate::error::{Error, MediaError, Result, VideoError};
use crate::media::artwork;
use crate::video_player::{ElementEvent, LoadToken, MediaElement};
use iced::event::{self, Event};
use iced::widget::image;
use iced::{keyboard, mouse, task, touch, window, Element, Subscription, Task};

pub use feedback::Glyph;

/// Why a session was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The close button was pressed.
    Button,
    /// Escape was pressed.
    Escape,
    /// The backdrop around the media was clicked.
    Backdrop,
}

/// Keyboard shortcuts understood by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// `ArrowLeft`: rewind for video, previous item for photos.
    Previous,
    /// `ArrowRight`: forward for video, next item for photos.
    Next,
    /// `Escape`.
    Close,
    /// `Space`, video only.
    TogglePlayback,
    /// `M`, video only.
    ToggleMute,
}

impl KeyCommand {
    #[must_use]
    pub fn from_key(key: &keyboard::Key) -> Option<Self> {
        use keyboard::key::Named;

        match key.as_ref() {
            keyboard::Key::Named(Named::ArrowLeft) => Some(Self::Previous),
            keyboard::Key::Named(Named::ArrowRight) => Some(Self::Next),
            keyboard::Key::Named(Named::Escape) => Some(Self::Close),
            keyboard::Key::Named(Named::Space) => Some(Self::TogglePlayback),
            keyboard::Key::Character("m" | "M") => Some(Self::ToggleMute),
            _ => None,
        }
    }

    /// Returns true if hosts must swallow the key once the viewer handled
    /// it, so that Space does not also scroll the page behind the viewer.
    #[must_use]
    pub fn suppresses_default(self) -> bool {
        matches!(self, Self::TogglePlayback)
    }
}

/// Window-wide pointer input received while a scrub drag is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragInput {
    /// Mouse or finger moved to window coordinate `x`.
    Moved { x: f32 },
    /// Mouse button released, finger lifted, or touch lost.
    Released,
}

/// Messages handled by a viewer session.
#[derive(Debug, Clone)]
pub enum Message {
    /// Jump to an item.
    GoTo(usize),
    /// Next-item intent (seeks forward for video).
    Advance,
    /// Previous-item intent (seeks backward for video).
    Retreat,
    Key(KeyCommand),
    /// Press on the video surface, `x` relative to its left edge.
    SurfaceTap { x: f32, width: f32 },
    Scrub(scrub::Message),
    Drag(DragInput),
    Playback(playback::Message),
    VideoControls(video_controls::Message),
    FeedbackExpired(u64),
    ToggleLike,
    Share,
    Close(CloseReason),
    ArtworkLoaded {
        index: usize,
        result: std::result::Result<Vec<u8>, Error>,
    },
}

impl Message {
    /// Wraps a media element signal for the source identified by `token`.
    #[must_use]
    pub fn element(token: LoadToken, event: ElementEvent) -> Self {
        Self::Playback(playback::Message::Element { token, event })
    }
}

/// Side effects the host should perform after handling a viewer message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The session closed. Produced exactly once per session.
    Closed(CloseReason),
    /// The current item changed.
    IndexChanged { index: usize },
    /// The user asked to share an item.
    ShareRequested { item_id: u64, url: String },
}

/// A viewer session.
#[derive(Debug)]
pub struct State {
    media: MediaSequence,
    settings: ViewerSettings,
    navigation: navigation::State,
    engagement: engagement::State,
    playback: playback::State,
    feedback: feedback::State,
    scrub: scrub::State,
    artwork: Option<image::Handle>,
    artwork_task: Option<task::Handle>,
    closed: bool,
}

impl State {
    /// Opens a session over `media`, starting at `initial_index`.
    ///
    /// For a playable clip the source is attached right away and, when
    /// autoplay is enabled, a play request is part of the returned task.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::IndexOutOfBounds`] if `initial_index` does not
    /// address an item.
    pub fn open(
        media: MediaSequence,
        initial_index: usize,
        settings: ViewerSettings,
        element: Box<dyn MediaElement>,
    ) -> Result<(Self, Task<Message>)> {
        let Some(item) = media.get(initial_index) else {
            return Err(MediaError::IndexOutOfBounds {
                index: initial_index,
                len: media.len(),
            }
            .into());
        };

        let engagement = engagement::State::for_item(item);
        let navigation = navigation::State::new(initial_index, media.len());

        let mut state = Self {
            settings,
            navigation,
            engagement,
            playback: playback::State::new(element, settings.seek_step, settings.start_muted),
            feedback: feedback::State::new(settings.feedback),
            scrub: scrub::State::default(),
            artwork: None,
            artwork_task: None,
            closed: false,
            media,
        };

        tracing::info!(
            kind = %state.media.kind(),
            len = state.media.len(),
            index = initial_index,
            "opened viewer session"
        );

        let playback_task = state.attach_current();
        let artwork_task = state.fetch_artwork();
        Ok((state, Task::batch([playback_task, artwork_task])))
    }

    /// Opens a session from loosely typed catalog items.
    ///
    /// # Errors
    ///
    /// Returns a [`MediaError`] for an empty or mixed list, or an
    /// out-of-bounds starting index.
    pub fn open_items(
        items: Vec<MediaItem>,
        initial_index: usize,
        kind: MediaKind,
        settings: ViewerSettings,
        element: Box<dyn MediaElement>,
    ) -> Result<(Self, Task<Message>)> {
        let media = MediaSequence::from_items(items, kind)?;
        Self::open(media, initial_index, settings, element)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.closed {
            return Subscription::none();
        }

        let keyboard = event::listen_with(keyboard_listener);
        let drag = if self.scrub.is_dragging() {
            event::listen_with(drag_listener)
        } else {
            Subscription::none()
        };

        Subscription::batch([keyboard, drag])
    }

    /// Handle a session message.
    ///
    /// # Panics
    ///
    /// Panics on [`Message::GoTo`] with an index outside the sequence.
    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        if self.closed {
            tracing::trace!(?message, "ignoring message for closed viewer session");
            return (Effect::None, Task::none());
        }

        match message {
            Message::GoTo(index) => self.navigate(navigation::Message::GoTo(index)),
            Message::Advance => self.advance(),
            Message::Retreat => self.retreat(),
            Message::Key(command) => self.handle_key(command),
            Message::SurfaceTap { x, width } => self.handle_surface_tap(x, width),
            Message::Scrub(msg) => self.handle_scrub(msg),
            Message::Drag(DragInput::Moved { x }) => match self.scrub.active_bar() {
                Some(bar) => self.handle_scrub(scrub::Message::Move { x, bar }),
                None => (Effect::None, Task::none()),
            },
            Message::Drag(DragInput::Released) => self.handle_scrub(scrub::Message::End),
            Message::Playback(msg) => {
                let effect = self.playback.handle(msg);
                (Effect::None, self.playback_task(effect))
            }
            Message::VideoControls(msg) => self.handle_video_controls(msg),
            Message::FeedbackExpired(generation) => {
                self.feedback.handle(feedback::Message::Expired(generation));
                (Effect::None, Task::none())
            }
            Message::ToggleLike => {
                self.engagement.handle(engagement::Message::ToggleLike);
                (Effect::None, Task::none())
            }
            Message::Share => match self.engagement.handle(engagement::Message::Share) {
                engagement::Effect::ShareRequested { item_id, url } => {
                    (Effect::ShareRequested { item_id, url }, Task::none())
                }
                _ => (Effect::None, Task::none()),
            },
            Message::Close(reason) => (self.close(reason), Task::none()),
            Message::ArtworkLoaded { index, result } => {
                self.handle_artwork(index, result);
                (Effect::None, Task::none())
            }
        }
    }

    /// Closes the session, tearing down the media source, the feedback timer,
    /// any drag listeners and pending artwork downloads.
    ///
    /// Returns [`Effect::Closed`] the first time and [`Effect::None`] after.
    pub fn close(&mut self, reason: CloseReason) -> Effect {
        if self.closed {
            return Effect::None;
        }
        self.teardown();
        self.closed = true;
        tracing::info!(?reason, index = self.navigation.current(), "closed viewer session");
        Effect::Closed(reason)
    }

    fn teardown(&mut self) {
        self.scrub.handle(scrub::Message::End);
        self.feedback.handle(feedback::Message::Clear);
        self.playback.handle(playback::Message::Detach);
        if let Some(handle) = self.artwork_task.take() {
            handle.abort();
        }
    }

    fn advance(&mut self) -> (Effect, Task<Message>) {
        match self.capability() {
            Capability::Static => self.navigate(navigation::Message::Advance),
            Capability::Playable => self.playback_command(playback::Message::Forward),
            Capability::Embedded => (Effect::None, Task::none()),
        }
    }

    fn retreat(&mut self) -> (Effect, Task<Message>) {
        match self.capability() {
            Capability::Static => self.navigate(navigation::Message::Retreat),
            Capability::Playable => self.playback_command(playback::Message::Rewind),
            Capability::Embedded => (Effect::None, Task::none()),
        }
    }

    fn handle_key(&mut self, command: KeyCommand) -> (Effect, Task<Message>) {
        match command {
            KeyCommand::Previous => self.retreat(),
            KeyCommand::Next => self.advance(),
            KeyCommand::Close => (self.close(CloseReason::Escape), Task::none()),
            KeyCommand::TogglePlayback => {
                self.playback_command(playback::Message::TogglePlayPause)
            }
            KeyCommand::ToggleMute => self.playback_command(playback::Message::ToggleMute),
        }
    }

    fn handle_surface_tap(&mut self, x: f32, width: f32) -> (Effect, Task<Message>) {
        if self.scrub.is_dragging() {
            return (Effect::None, Task::none());
        }
        match gesture::classify_tap(x, width) {
            Some(gesture::TapZone::Rewind) => self.playback_command(playback::Message::Rewind),
            Some(gesture::TapZone::TogglePlayback) => {
                self.playback_command(playback::Message::TogglePlayPause)
            }
            Some(gesture::TapZone::Forward) => self.playback_command(playback::Message::Forward),
            None => (Effect::None, Task::none()),
        }
    }

    fn handle_scrub(&mut self, msg: scrub::Message) -> (Effect, Task<Message>) {
        if !self.capability().is_playable() {
            return (Effect::None, Task::none());
        }
        match self.scrub.handle(msg) {
            scrub::Effect::Seek(fraction) => {
                self.playback_command(playback::Message::SeekToFraction(fraction))
            }
            scrub::Effect::None | scrub::Effect::Released => (Effect::None, Task::none()),
        }
    }

    fn handle_video_controls(&mut self, msg: video_controls::Message) -> (Effect, Task<Message>) {
        match msg {
            video_controls::Message::TogglePlayback => {
                self.playback_command(playback::Message::TogglePlayPause)
            }
            video_controls::Message::ToggleMute => {
                self.playback_command(playback::Message::ToggleMute)
            }
            video_controls::Message::Rewind => self.playback_command(playback::Message::Rewind),
            video_controls::Message::Forward => self.playback_command(playback::Message::Forward),
        }
    }

    /// Forwards a user command to playback and flashes the matching glyph.
    fn playback_command(&mut self, msg: playback::Message) -> (Effect, Task<Message>) {
        if !self.capability().is_playable() {
            return (Effect::None, Task::none());
        }

        let requested = match msg {
            playback::Message::Rewind => Some(Glyph::Rewind),
            playback::Message::Forward => Some(Glyph::Forward),
            _ => None,
        };

        let effect = self.playback.handle(msg);
        let glyph = match &effect {
            playback::Effect::PlayRequested(_) => Some(Glyph::Play),
            playback::Effect::PauseRequested => Some(Glyph::Pause),
            playback::Effect::Sought { .. } => requested,
            playback::Effect::None | playback::Effect::StateChanged => None,
        };

        let playback_task = self.playback_task(effect);
        let feedback_task = glyph.map_or_else(Task::none, |glyph| self.show_feedback(glyph));
        (Effect::None, Task::batch([playback_task, feedback_task]))
    }

    fn playback_task(&mut self, effect: playback::Effect) -> Task<Message> {
        match effect {
            playback::Effect::PlayRequested(pending) => {
                let token = pending.token;
                Task::perform(pending.outcome, move |outcome| {
                    Message::Playback(playback::Message::PlaySettled { token, outcome })
                })
            }
            playback::Effect::PauseRequested
            | playback::Effect::Sought { .. }
            | playback::Effect::StateChanged
            | playback::Effect::None => Task::none(),
        }
    }

    fn show_feedback(&mut self, glyph: Glyph) -> Task<Message> {
        match self.feedback.handle(feedback::Message::Show(glyph)) {
            feedback::Effect::ScheduleExpiry { generation, after } => {
                let (task, handle) = Task::perform(
                    async move { tokio::time::sleep(after).await },
                    move |()| Message::FeedbackExpired(generation),
                )
                .abortable();
                self.feedback.arm(handle);
                task
            }
            feedback::Effect::None | feedback::Effect::Cleared => Task::none(),
        }
    }

    fn navigate(&mut self, msg: navigation::Message) -> (Effect, Task<Message>) {
        match self.navigation.handle(msg) {
            navigation::Effect::IndexChanged { from, to } => {
                tracing::debug!(from, to, "viewer index changed");
                let task = self.on_index_changed();
                (Effect::IndexChanged { index: to }, task)
            }
            navigation::Effect::None => (Effect::None, Task::none()),
        }
    }

    /// Rebuilds the per-item slice for the new current item.
    fn on_index_changed(&mut self) -> Task<Message> {
        self.engagement = engagement::State::for_item(self.current_item());
        self.feedback.handle(feedback::Message::Clear);
        self.scrub.handle(scrub::Message::End);

        let playback_task = self.attach_current();
        let artwork_task = self.fetch_artwork();
        Task::batch([playback_task, artwork_task])
    }

    /// Attaches the current clip's source, superseding any previous load.
    fn attach_current(&mut self) -> Task<Message> {
        let item = self.current_item();
        let url = match (item, item.capability()) {
            (ItemRef::Video(clip), Capability::Playable) => clip.media_url.clone(),
            _ => {
                if self.playback.source().is_some() {
                    self.playback.handle(playback::Message::Detach);
                }
                return Task::none();
            }
        };

        let effect = self.playback.handle(playback::Message::Attach {
            url,
            autoplay: self.settings.autoplay,
        });
        self.playback_task(effect)
    }

    fn fetch_artwork(&mut self) -> Task<Message> {
        if let Some(handle) = self.artwork_task.take() {
            handle.abort();
        }

        let index = self.navigation.current();
        let url = self.current_item().artwork_url().to_string();
        let (task, handle) = Task::perform(artwork::fetch(url), move |result| {
            Message::ArtworkLoaded { index, result }
        })
        .abortable();
        self.artwork_task = Some(handle);
        task
    }

    fn handle_artwork(&mut self, index: usize, result: std::result::Result<Vec<u8>, Error>) {
        if index != self.navigation.current() {
            tracing::trace!(index, current = self.navigation.current(), "dropping stale artwork");
            return;
        }
        self.artwork_task = None;
        match result {
            Ok(bytes) => self.artwork = Some(image::Handle::from_bytes(bytes)),
            Err(error) => {
                tracing::warn!(
                    index,
                    url = self.current_item().artwork_url(),
                    %error,
                    "failed to load artwork, keeping previous"
                );
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        pane::view(pane::ViewModel::from_session(self))
    }

    // ---------------------------------------------------------------------
    // Session accessors
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn media(&self) -> &MediaSequence {
        &self.media
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.media.kind()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.navigation.current()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.navigation.len()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.navigation.has_previous()
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.navigation.has_next()
    }

    /// The "`index+1` / `total`" counter.
    #[must_use]
    pub fn counter_label(&self) -> String {
        self.navigation.counter_label()
    }

    #[must_use]
    pub fn current_item(&self) -> ItemRef<'_> {
        match self.media.get(self.navigation.current()) {
            Some(item) => item,
            // Navigation only holds indices below the sequence length.
            None => unreachable!("navigation index out of bounds"),
        }
    }

    #[must_use]
    pub fn capability(&self) -> Capability {
        self.current_item().capability()
    }

    #[must_use]
    pub fn is_liked(&self) -> bool {
        self.engagement.is_liked()
    }

    #[must_use]
    pub fn like_count(&self) -> u32 {
        self.engagement.like_count()
    }

    #[must_use]
    pub fn share_count(&self) -> u32 {
        self.engagement.share_count()
    }

    #[must_use]
    pub fn playback_status(&self) -> PlaybackStatus {
        self.playback.status()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback.status().is_playing()
    }

    #[must_use]
    pub fn is_buffering(&self) -> bool {
        self.playback.status().is_buffering()
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.playback.is_muted()
    }

    /// Why the current clip cannot be played, once it failed.
    #[must_use]
    pub fn playback_failure(&self) -> Option<&VideoError> {
        self.playback.failure()
    }

    /// Returns true while the "tap to play" affordance must be shown.
    #[must_use]
    pub fn awaits_gesture(&self) -> bool {
        self.playback.status().awaits_gesture()
    }

    #[must_use]
    pub fn progress_fraction(&self) -> f32 {
        self.playback.clock().progress_fraction()
    }

    #[must_use]
    pub fn current_time_secs(&self) -> f64 {
        self.playback.clock().current_secs()
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.playback.clock().duration_secs()
    }

    #[must_use]
    pub fn current_time_label(&self) -> String {
        format_time(self.current_time_secs())
    }

    /// Total time, or the clip's published duration label until the element
    /// reports metadata.
    #[must_use]
    pub fn total_time_label(&self) -> String {
        let clock = self.playback.clock();
        match self.current_item() {
            ItemRef::Video(clip) if !clock.has_duration() => clip.duration_label.clone(),
            _ => format_time(clock.duration_secs()),
        }
    }

    #[must_use]
    pub fn feedback_glyph(&self) -> Option<Glyph> {
        self.feedback.glyph()
    }

    /// Returns true strictly between a press on the progress bar and its
    /// release.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.scrub.is_dragging()
    }

    /// Number of window-wide drag listeners currently attached.
    #[must_use]
    pub fn attached_global_listeners(&self) -> usize {
        self.scrub.registry().attached()
    }

    /// Returns true while a feedback expiry timer is running.
    #[must_use]
    pub fn has_pending_timer(&self) -> bool {
        self.feedback.is_armed()
    }

    /// Token hosts attach to element events for the current source.
    #[must_use]
    pub fn current_load_token(&self) -> LoadToken {
        self.playback.load_token()
    }

    #[must_use]
    pub fn artwork(&self) -> Option<&image::Handle> {
        self.artwork.as_ref()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for State {
    fn drop(&mut self) {
        if !self.closed {
            self.teardown();
        }
    }
}

fn keyboard_listener(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            KeyCommand::from_key(&key).map(Message::Key)
        }
        _ => None,
    }
}

fn drag_listener(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    let input = match event {
        Event::Mouse(mouse::Event::CursorMoved { position })
        | Event::Touch(touch::Event::FingerMoved { position, .. }) => {
            DragInput::Moved { x: position.x }
        }
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left) | mouse::Event::CursorLeft)
        | Event::Touch(touch::Event::FingerLifted { .. } | touch::Event::FingerLost { .. }) => {
            DragInput::Released
        }
        _ => return None,
    };
    Some(Message::Drag(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{Photo, VideoClip};
    use crate::video_player::{Command, CommandLog, PlayOutcome, ScriptedElement};
    use iced::Rectangle;

    fn photos(n: u64) -> MediaSequence {
        MediaSequence::Photos(
            (0..n)
                .map(|id| Photo {
                    id,
                    url: format!("https://cdn.example.com/p{id}.jpg"),
                    like_count: 10 + id as u32,
                    event_name: None,
                })
                .collect(),
        )
    }

    fn clips(n: u64) -> MediaSequence {
        MediaSequence::Videos(
            (0..n)
                .map(|id| VideoClip {
                    id,
                    thumbnail_url: format!("https://cdn.example.com/t{id}.jpg"),
                    duration_label: "1:00".to_string(),
                    view_count: 100,
                    like_count: Some(5),
                    media_url: format!("https://cdn.example.com/v{id}.mp4"),
                    event_name: Some("Night Market".to_string()),
                })
                .collect(),
        )
    }

    fn open(media: MediaSequence, index: usize) -> (State, CommandLog) {
        let (element, log) = ScriptedElement::new();
        let (state, _task) = State::open(media, index, ViewerSettings::default(), Box::new(element))
            .expect("valid session");
        (state, log)
    }

    /// Handles a message and keeps only the effect; tasks are not run here.
    fn send(state: &mut State, message: Message) -> Effect {
        state.handle_message(message).0
    }

    fn with_duration(state: &mut State, duration_secs: f64) {
        let token = state.current_load_token();
        send(state, Message::element(
            token,
            ElementEvent::LoadedMetadata { duration_secs },
        ));
    }

    #[test]
    fn open_rejects_out_of_bounds_index() {
        let (element, _log) = ScriptedElement::new();
        let result = State::open(photos(3), 3, ViewerSettings::default(), Box::new(element));
        assert!(matches!(
            result,
            Err(Error::Media(MediaError::IndexOutOfBounds { index: 3, len: 3 }))
        ));
    }

    #[test]
    fn open_items_rejects_mixed_sequences() {
        let items = vec![
            MediaItem::Photo(Photo {
                id: 1,
                url: "https://cdn.example.com/p1.jpg".to_string(),
                like_count: 0,
                event_name: None,
            }),
            MediaItem::Video(VideoClip {
                id: 2,
                thumbnail_url: String::new(),
                duration_label: "0:10".to_string(),
                view_count: 0,
                like_count: None,
                media_url: "https://cdn.example.com/v2.mp4".to_string(),
                event_name: None,
            }),
        ];
        let (element, _log) = ScriptedElement::new();
        let result = State::open_items(
            items,
            0,
            MediaKind::Photo,
            ViewerSettings::default(),
            Box::new(element),
        );
        assert!(matches!(
            result,
            Err(Error::Media(MediaError::MixedSequence { index: 1, .. }))
        ));
    }

    #[test]
    fn opening_a_clip_attaches_its_source() {
        let (state, log) = open(clips(3), 1);
        assert_eq!(
            log.commands().first(),
            Some(&Command::Load("https://cdn.example.com/v1.mp4".to_string()))
        );
        assert_eq!(state.playback_status(), PlaybackStatus::Loading);
        assert_eq!(state.counter_label(), "2 / 3");
    }

    #[test]
    fn opening_a_photo_does_not_touch_the_element() {
        let (state, log) = open(photos(2), 0);
        assert!(log.commands().is_empty());
        assert_eq!(state.playback_status(), PlaybackStatus::Idle);
    }

    #[test]
    fn key_mapping_covers_contract() {
        use keyboard::key::Named;

        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Named(Named::ArrowLeft)),
            Some(KeyCommand::Previous)
        );
        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Named(Named::Space)),
            Some(KeyCommand::TogglePlayback)
        );
        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Character("m".into())),
            Some(KeyCommand::ToggleMute)
        );
        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Named(Named::Enter)),
            None
        );
        assert!(KeyCommand::TogglePlayback.suppresses_default());
        assert!(!KeyCommand::Close.suppresses_default());
    }

    #[test]
    fn space_is_ignored_for_photos() {
        let (mut state, log) = open(photos(2), 0);
        send(&mut state, Message::Key(KeyCommand::TogglePlayback));
        assert!(log.commands().is_empty());
        assert_eq!(state.feedback_glyph(), None);
    }

    #[test]
    fn toggle_shows_pause_glyph_while_autoplaying() {
        let (mut state, log) = open(clips(1), 0);
        send(&mut state, Message::Key(KeyCommand::TogglePlayback));
        assert_eq!(log.last(), Some(Command::Pause));
        assert_eq!(state.feedback_glyph(), Some(Glyph::Pause));
        assert!(state.has_pending_timer());
    }

    #[test]
    fn surface_taps_are_routed_by_zone() {
        let (mut state, log) = open(clips(1), 0);
        with_duration(&mut state, 60.0);
        log.clear();

        send(&mut state, Message::SurfaceTap { x: 280.0, width: 300.0 });
        assert_eq!(state.feedback_glyph(), Some(Glyph::Forward));
        assert_eq!(log.last(), Some(Command::Seek(10.0)));

        send(&mut state, Message::SurfaceTap { x: 10.0, width: 300.0 });
        assert_eq!(state.feedback_glyph(), Some(Glyph::Rewind));
        assert_eq!(log.last(), Some(Command::Seek(0.0)));
    }

    #[test]
    fn surface_taps_are_ignored_while_scrubbing() {
        let (mut state, log) = open(clips(1), 0);
        with_duration(&mut state, 60.0);
        let bar = Rectangle {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 4.0,
        };
        send(&mut state, Message::Scrub(scrub::Message::Start { x: 50.0, bar }));
        log.clear();

        send(&mut state, Message::SurfaceTap { x: 280.0, width: 300.0 });
        assert!(log.commands().is_empty());
    }

    #[test]
    fn window_wide_drag_uses_active_bar() {
        let (mut state, log) = open(clips(1), 0);
        with_duration(&mut state, 100.0);
        let bar = Rectangle {
            x: 50.0,
            y: 0.0,
            width: 200.0,
            height: 4.0,
        };

        send(&mut state, Message::Scrub(scrub::Message::Start { x: 150.0, bar }));
        assert_eq!(log.last(), Some(Command::Seek(50.0)));
        assert_eq!(state.attached_global_listeners(), 1);

        send(&mut state, Message::Drag(DragInput::Moved { x: 1_000.0 }));
        assert_eq!(log.last(), Some(Command::Seek(100.0)));

        send(&mut state, Message::Drag(DragInput::Released));
        assert!(!state.is_dragging());
        assert_eq!(state.attached_global_listeners(), 0);
    }

    #[test]
    fn embedded_clips_are_read_only() {
        let media = MediaSequence::Videos(vec![VideoClip {
            id: 9,
            thumbnail_url: "https://cdn.example.com/t9.jpg".to_string(),
            duration_label: "3:12".to_string(),
            view_count: 5,
            like_count: None,
            media_url: "https://www.youtube.com/watch?v=abc".to_string(),
            event_name: None,
        }]);
        let (mut state, log) = open(media, 0);

        send(&mut state, Message::Key(KeyCommand::TogglePlayback));
        send(&mut state, Message::Key(KeyCommand::Next));
        send(&mut state, Message::SurfaceTap { x: 150.0, width: 300.0 });

        assert!(log.commands().is_empty());
        assert_eq!(state.capability(), Capability::Embedded);
        assert_eq!(state.total_time_label(), "3:12");

        send(&mut state, Message::ToggleLike);
        assert_eq!(state.like_count(), 1);
    }

    #[test]
    fn go_to_reattaches_and_resets_engagement() {
        let (mut state, log) = open(clips(3), 0);
        send(&mut state, Message::ToggleLike);
        assert_eq!(state.like_count(), 6);

        let (effect, _task) = state.handle_message(Message::GoTo(2));
        assert_eq!(effect, Effect::IndexChanged { index: 2 });
        assert!(!state.is_liked());
        assert_eq!(state.like_count(), 5);
        assert_eq!(
            log.count(|c| matches!(c, Command::Load(url) if url.ends_with("v2.mp4"))),
            1
        );
    }

    #[test]
    fn share_is_reported_to_host() {
        let (mut state, _log) = open(photos(2), 1);
        let (effect, _task) = state.handle_message(Message::Share);
        assert_eq!(
            effect,
            Effect::ShareRequested {
                item_id: 1,
                url: "https://cdn.example.com/p1.jpg".to_string()
            }
        );
        assert_eq!(state.share_count(), 1);
    }

    #[test]
    fn stale_artwork_is_dropped() {
        let (mut state, _log) = open(photos(3), 0);
        send(&mut state, Message::Advance);
        send(&mut state, Message::ArtworkLoaded {
            index: 0,
            result: Ok(vec![1, 2, 3]),
        });
        assert!(state.artwork().is_none());

        send(&mut state, Message::ArtworkLoaded {
            index: 1,
            result: Ok(vec![1, 2, 3]),
        });
        assert!(state.artwork().is_some());
    }

    #[test]
    fn failed_artwork_keeps_previous() {
        let (mut state, _log) = open(photos(2), 0);
        send(&mut state, Message::ArtworkLoaded {
            index: 0,
            result: Ok(vec![1, 2, 3]),
        });
        send(&mut state, Message::Advance);
        send(&mut state, Message::ArtworkLoaded {
            index: 1,
            result: Err(Error::Fetch("HTTP status 404".to_string())),
        });
        assert!(state.artwork().is_some());
    }

    #[test]
    fn close_is_reported_once_and_silences_session() {
        let (mut state, log) = open(clips(2), 0);
        let (first, _) = state.handle_message(Message::Key(KeyCommand::Close));
        let (second, _) = state.handle_message(Message::Close(CloseReason::Button));

        assert_eq!(first, Effect::Closed(CloseReason::Escape));
        assert_eq!(second, Effect::None);
        assert!(state.is_closed());
        assert_eq!(log.last(), Some(Command::Unload));

        log.clear();
        send(&mut state, Message::Key(KeyCommand::TogglePlayback));
        assert!(log.commands().is_empty());
    }

    #[test]
    fn late_play_outcome_does_not_revive_a_failed_clip() {
        for outcome in [
            PlayOutcome::Rejected("NotSupportedError".to_string()),
            PlayOutcome::Resolved,
        ] {
            let (mut state, _log) = open(clips(1), 0);
            let token = state.current_load_token();
            send(
                &mut state,
                Message::element(
                    token,
                    ElementEvent::Failed(VideoError::from_message("network error")),
                ),
            );
            let effect = send(
                &mut state,
                Message::Playback(playback::Message::PlaySettled { token, outcome }),
            );

            assert_eq!(effect, Effect::None);
            assert_eq!(state.playback_status(), PlaybackStatus::Unavailable);
            assert!(!state.awaits_gesture());

            let model = pane::ViewModel::from_session(&state);
            assert!(!model.shows_playback_controls());
            assert!(!model.shows_tap_to_play());
            assert_eq!(model.failure, Some("Check your connection"));
        }
    }

    #[test]
    fn drop_without_close_unloads() {
        let (state, log) = open(clips(1), 0);
        drop(state);
        assert_eq!(log.count(|c| *c == Command::Unload), 1);
    }
}
