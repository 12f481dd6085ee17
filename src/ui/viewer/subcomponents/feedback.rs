// SPDX-License-Identifier: MPL-2.0
//! Transient feedback glyph shown after rewind, forward, play and pause.
//!
//! Last action wins: showing a glyph replaces the current one and restarts
//! its timer. Each show gets a new generation; an expiry carrying an older
//! generation belongs to a superseded timer and is ignored.

use crate::domain::video::FeedbackDuration;
use iced::task;
use std::fmt;
use std::time::Duration;

/// Glyph flashed over the video surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Rewind,
    Forward,
    Play,
    Pause,
}

/// Feedback sub-component state.
pub struct State {
    glyph: Option<Glyph>,
    generation: u64,
    lifetime: FeedbackDuration,
    /// Abort handle of the running expiry timer.
    timer: Option<task::Handle>,
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("glyph", &self.glyph)
            .field("generation", &self.generation)
            .field("lifetime", &self.lifetime)
            .field("timer_armed", &self.timer.is_some())
            .finish()
    }
}

/// Messages for the feedback sub-component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Show a glyph, replacing any visible one.
    Show(Glyph),
    /// The timer of the given generation fired.
    Expired(u64),
    /// Hide the glyph and cancel its timer.
    Clear,
}

/// Effects produced by feedback changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// No effect.
    None,
    /// A timer must be started; it reports `Expired(generation)` after `after`.
    ScheduleExpiry { generation: u64, after: Duration },
    /// The glyph was hidden.
    Cleared,
}

impl State {
    #[must_use]
    pub fn new(lifetime: FeedbackDuration) -> Self {
        Self {
            glyph: None,
            generation: 0,
            lifetime,
            timer: None,
        }
    }

    /// Handle a feedback message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Show(glyph) => {
                self.cancel_timer();
                self.generation = self.generation.wrapping_add(1);
                self.glyph = Some(glyph);
                Effect::ScheduleExpiry {
                    generation: self.generation,
                    after: self.lifetime.as_duration(),
                }
            }
            Message::Expired(generation) => {
                if generation != self.generation || self.glyph.is_none() {
                    tracing::trace!(generation, current = self.generation, "ignoring stale feedback timer");
                    return Effect::None;
                }
                self.timer = None;
                self.glyph = None;
                Effect::Cleared
            }
            Message::Clear => {
                self.cancel_timer();
                // An expiry already queued must not match anymore.
                self.generation = self.generation.wrapping_add(1);
                if self.glyph.take().is_some() {
                    Effect::Cleared
                } else {
                    Effect::None
                }
            }
        }
    }

    /// Stores the abort handle of the timer started for the current generation.
    pub fn arm(&mut self, handle: task::Handle) {
        self.cancel_timer();
        self.timer = Some(handle);
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
            tracing::trace!(generation = self.generation, "cancelled feedback timer");
        }
    }

    #[must_use]
    pub fn glyph(&self) -> Option<Glyph> {
        self.glyph
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true while an expiry timer is running.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }
}

impl Drop for State {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
