// SPDX-License-Identifier: MPL-2.0
//! Demo host for the media viewer.
//!
//! The `App` opens a single viewer session over a catalog, drives its media
//! element with a simulated clock, and exits once the viewer reports that
//! it closed. Share requests are only logged since there is no share sheet.

pub mod catalog;
mod subscription;

use crate::config::{self, defaults::SIMULATED_TICK_MS};
use crate::domain::media::{MediaItem, MediaKind};
use crate::error::Result;
use crate::ui::viewer::component;
use crate::video_player::{SimulatedClock, SimulatedElement};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Runtime flags parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Media type of the session; inferred from the catalog when absent.
    pub kind: Option<MediaKind>,
    /// Starting position in the catalog.
    pub index: usize,
    /// Settings file to use instead of the default location.
    pub config_path: Option<PathBuf>,
    /// Catalog file; the built-in sample is used when absent.
    pub media_file: Option<PathBuf>,
    /// Refuse the first play request of each clip, as browsers do without
    /// a user gesture.
    pub block_autoplay: bool,
}

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(component::Message),
    Tick(Instant),
}

/// Root application state.
pub struct App {
    viewer: component::State,
    clock: SimulatedClock,
    last_tick: Option<Instant>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("index", &self.viewer.current_index())
            .field("closed", &self.viewer.is_closed())
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_WIDTH: f32 = 960.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 720.0;
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 400.0;

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Launches the iced event loop with an already opened session.
pub fn run(app: App, startup: Task<Message>) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot, but the session can only be handed
    // over once.
    let boot_state = RefCell::new(Some((app, startup)));
    let boot = move || {
        boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once")
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Resolves configuration and catalog from `flags` and opens the
    /// viewer session.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings or catalog file cannot be read, or
    /// if the catalog and index do not form a valid session.
    pub fn new(flags: Flags) -> Result<(Self, Task<Message>)> {
        let config = match &flags.config_path {
            Some(path) => config::load_from_path(path)?,
            None => config::load()?,
        };
        let settings = config.viewer_settings();

        let items = match &flags.media_file {
            Some(path) => catalog::load_file(path)?,
            None => catalog::sample(flags.kind.unwrap_or(MediaKind::Photo)),
        };
        let kind = flags
            .kind
            .or_else(|| items.first().map(MediaItem::kind))
            .unwrap_or(MediaKind::Photo);

        let (element, clock) =
            SimulatedElement::new(catalog::clip_durations(&items), flags.block_autoplay);
        let (viewer, task) = component::State::open_items(
            items,
            flags.index,
            kind,
            settings,
            Box::new(element),
        )?;

        let app = Self {
            viewer,
            clock,
            last_tick: None,
        };
        Ok((app, task.map(Message::Viewer)))
    }

    fn title(&self) -> String {
        format!("IcedReel · {}", self.viewer.counter_label())
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Viewer(msg) => self.handle_viewer_message(msg),
            Message::Tick(now) => self.handle_tick(now),
        }
    }

    fn handle_viewer_message(&mut self, message: component::Message) -> Task<Message> {
        let (effect, task) = self.viewer.handle_message(message);
        let task = task.map(Message::Viewer);

        match effect {
            component::Effect::Closed(reason) => {
                tracing::info!(?reason, "viewer closed, exiting");
                Task::batch([task, iced::exit()])
            }
            component::Effect::ShareRequested { item_id, url } => {
                tracing::info!(item_id, %url, "share requested");
                task
            }
            component::Effect::IndexChanged { index } => {
                tracing::debug!(index, "host notified of index change");
                task
            }
            component::Effect::None => task,
        }
    }

    /// Advances the simulated element and forwards the signals it produced,
    /// tagged with the token of the source currently attached.
    fn handle_tick(&mut self, now: Instant) -> Task<Message> {
        let elapsed = self.last_tick.map_or(
            Duration::from_millis(SIMULATED_TICK_MS),
            |last| now.saturating_duration_since(last),
        );
        self.last_tick = Some(now);

        let token = self.viewer.current_load_token();
        let events = self.clock.advance(elapsed);
        let tasks: Vec<_> = events
            .into_iter()
            .map(|event| self.handle_viewer_message(component::Message::element(token, event)))
            .collect();
        Task::batch(tasks)
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_viewer_subscription(&self.viewer),
            subscription::create_tick_subscription(&self.viewer),
        ])
    }

    fn view(&self) -> Element<'_, Message> {
        self.viewer.view().map(Message::Viewer)
    }
}
