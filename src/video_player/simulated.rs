// SPDX-License-Identifier: MPL-2.0
//! In-process stand-in for a platform player.
//!
//! The demo host has no video decoder, so it drives the viewer with a
//! simulated element: a clock that advances while "playing" and reports the
//! same signals a real player would. The element handed to the viewer and the
//! [`SimulatedClock`] kept by the host share one state.

use super::element::{ElementEvent, MediaElement, PlayOutcome};
use futures_util::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Duration used for sources without a known length.
pub const DEFAULT_SIMULATED_DURATION_SECS: f64 = 30.0;

#[derive(Debug, Default)]
struct SimState {
    url: Option<String>,
    duration_secs: f64,
    position_secs: f64,
    playing: bool,
    muted: bool,
    /// Set until the first play request after a load when autoplay is blocked.
    autoplay_blocked: bool,
    pending: Vec<ElementEvent>,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<SimState>,
    durations: HashMap<String, f64>,
    block_autoplay: bool,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The element half, owned by the viewer session.
#[derive(Debug)]
pub struct SimulatedElement {
    shared: Arc<Shared>,
}

/// The host half, used to advance time and collect events.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    shared: Arc<Shared>,
}

impl SimulatedElement {
    /// Creates a linked element/clock pair.
    ///
    /// `durations` maps source URLs to their length in seconds. When
    /// `block_autoplay` is set, the first play request after each load is
    /// refused the way browsers refuse autoplay without a user gesture.
    #[must_use]
    pub fn new(durations: HashMap<String, f64>, block_autoplay: bool) -> (Self, SimulatedClock) {
        let shared = Arc::new(Shared {
            state: Mutex::new(SimState::default()),
            durations,
            block_autoplay,
        });
        (
            Self {
                shared: Arc::clone(&shared),
            },
            SimulatedClock { shared },
        )
    }
}

impl MediaElement for SimulatedElement {
    fn load(&mut self, url: &str) {
        let duration_secs = self
            .shared
            .durations
            .get(url)
            .copied()
            .unwrap_or(DEFAULT_SIMULATED_DURATION_SECS);
        let block_autoplay = self.shared.block_autoplay;

        let mut state = self.shared.lock();
        let muted = state.muted;
        *state = SimState {
            url: Some(url.to_string()),
            duration_secs,
            muted,
            autoplay_blocked: block_autoplay,
            pending: vec![
                ElementEvent::LoadedMetadata { duration_secs },
                ElementEvent::CanPlay,
            ],
            ..SimState::default()
        };
    }

    fn play(&mut self) -> BoxFuture<'static, PlayOutcome> {
        let mut state = self.shared.lock();
        let outcome = if state.url.is_none() {
            PlayOutcome::Rejected("no source attached".to_string())
        } else if state.autoplay_blocked {
            state.autoplay_blocked = false;
            PlayOutcome::Rejected("autoplay requires a user gesture".to_string())
        } else {
            if state.position_secs >= state.duration_secs {
                state.position_secs = 0.0;
            }
            state.playing = true;
            state.pending.push(ElementEvent::Playing);
            PlayOutcome::Resolved
        };
        futures_util::future::ready(outcome).boxed()
    }

    fn pause(&mut self) {
        let mut state = self.shared.lock();
        if state.playing {
            state.playing = false;
            state.pending.push(ElementEvent::Paused);
        }
    }

    fn seek(&mut self, position_secs: f64) {
        let mut state = self.shared.lock();
        state.position_secs = position_secs.clamp(0.0, state.duration_secs);
        let report = ElementEvent::TimeUpdate {
            current_secs: state.position_secs,
            duration_secs: state.duration_secs,
        };
        state.pending.push(report);
    }

    fn set_muted(&mut self, muted: bool) {
        self.shared.lock().muted = muted;
    }

    fn unload(&mut self) {
        let mut state = self.shared.lock();
        let muted = state.muted;
        *state = SimState {
            muted,
            ..SimState::default()
        };
    }
}

impl SimulatedClock {
    /// Advances the simulated clock and drains the events produced since the
    /// last call.
    pub fn advance(&self, elapsed: Duration) -> Vec<ElementEvent> {
        let mut state = self.shared.lock();
        if state.url.is_none() {
            return Vec::new();
        }

        if state.playing {
            state.position_secs =
                (state.position_secs + elapsed.as_secs_f64()).min(state.duration_secs);
            let report = ElementEvent::TimeUpdate {
                current_secs: state.position_secs,
                duration_secs: state.duration_secs,
            };
            state.pending.push(report);

            if state.position_secs >= state.duration_secs {
                state.playing = false;
                state.pending.push(ElementEvent::Ended);
            }
        }

        std::mem::take(&mut state.pending)
    }

    /// Returns true if the element is muted.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.shared.lock().muted
    }
}
