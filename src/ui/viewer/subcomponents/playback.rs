// SPDX-License-Identifier: MPL-2.0
//! Playback sub-component driving a [`MediaElement`].
//!
//! The element is the source of truth: commands are requests and the
//! [`PlaybackStatus`] only moves when an outcome or an element event comes
//! back. Every attach takes a fresh [`LoadToken`]; outcomes and events tagged
//! with an older token belong to a superseded source and are dropped.
//!
//! Between a request and its confirmation the requested intent is the
//! effective state, so rapid toggles alternate instead of repeating the same
//! request.

use crate::domain::video::{PlaybackClock, PlaybackStatus, SeekStep};
use crate::error::VideoError;
use crate::video_player::{ElementEvent, LoadToken, MediaElement, PlayOutcome};
use futures_util::future::BoxFuture;
use std::fmt;

/// Request issued to the element and not yet confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Play,
    Pause,
}

/// Playback sub-component state.
pub struct State {
    element: Box<dyn MediaElement>,
    token: LoadToken,
    source: Option<String>,
    status: PlaybackStatus,
    clock: PlaybackClock,
    muted: bool,
    pending: Option<Intent>,
    seek_step: SeekStep,
    failure: Option<VideoError>,
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("token", &self.token)
            .field("source", &self.source)
            .field("status", &self.status)
            .field("clock", &self.clock)
            .field("muted", &self.muted)
            .field("pending", &self.pending)
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

/// Messages for the playback sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Attach a new source, superseding the current one.
    Attach { url: String, autoplay: bool },
    /// Detach the current source.
    Detach,
    /// A play request settled.
    PlaySettled {
        token: LoadToken,
        outcome: PlayOutcome,
    },
    /// The element reported a signal.
    Element {
        token: LoadToken,
        event: ElementEvent,
    },
    TogglePlayPause,
    Rewind,
    Forward,
    /// Absolute seek expressed as a fraction of the duration.
    SeekToFraction(f32),
    ToggleMute,
}

/// A play request in flight. The orchestrator turns it into a task and
/// reports the outcome back with [`Message::PlaySettled`].
pub struct PendingPlay {
    pub token: LoadToken,
    pub outcome: BoxFuture<'static, PlayOutcome>,
}

impl fmt::Debug for PendingPlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingPlay")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

/// Effects produced by playback changes.
#[derive(Debug)]
pub enum Effect {
    /// No effect.
    None,
    /// Play was requested; its outcome must be awaited.
    PlayRequested(PendingPlay),
    /// Pause was requested.
    PauseRequested,
    /// The clock was moved to a new position.
    Sought { position_secs: f64 },
    /// Status, clock or mute flag changed.
    StateChanged,
}

impl State {
    #[must_use]
    pub fn new(element: Box<dyn MediaElement>, seek_step: SeekStep, muted: bool) -> Self {
        Self {
            element,
            token: LoadToken::default(),
            source: None,
            status: PlaybackStatus::Idle,
            clock: PlaybackClock::default(),
            muted,
            pending: None,
            seek_step,
            failure: None,
        }
    }

    /// Handle a playback message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Attach { url, autoplay } => self.attach(url, autoplay),
            Message::Detach => {
                self.detach();
                Effect::StateChanged
            }
            Message::PlaySettled { token, outcome } => {
                if token != self.token {
                    tracing::trace!(%token, current = %self.token, "dropping stale play outcome");
                    return Effect::None;
                }
                self.settle(outcome)
            }
            Message::Element { token, event } => {
                if token != self.token {
                    tracing::trace!(%token, current = %self.token, ?event, "dropping stale element event");
                    return Effect::None;
                }
                self.apply_event(event)
            }
            Message::TogglePlayPause => self.toggle(),
            Message::Rewind => self.seek_by(-self.seek_step.value()),
            Message::Forward => self.seek_by(self.seek_step.value()),
            Message::SeekToFraction(fraction) => {
                if !self.status.accepts_commands() {
                    return Effect::None;
                }
                match self.clock.fraction_target(fraction) {
                    Some(target) => self.seek_to(target),
                    None => Effect::None,
                }
            }
            Message::ToggleMute => {
                self.muted = !self.muted;
                self.element.set_muted(self.muted);
                Effect::StateChanged
            }
        }
    }

    fn attach(&mut self, url: String, autoplay: bool) -> Effect {
        self.token = self.token.next();
        self.clock = PlaybackClock::default();
        self.pending = None;
        self.failure = None;
        self.status = PlaybackStatus::Loading;

        tracing::debug!(token = %self.token, %url, autoplay, "attaching video source");
        self.element.load(&url);
        self.element.set_muted(self.muted);
        self.source = Some(url);

        if autoplay {
            self.request_play()
        } else {
            Effect::StateChanged
        }
    }

    fn detach(&mut self) {
        if self.source.take().is_some() {
            self.element.unload();
            tracing::trace!(token = %self.token, "detached video source");
        }
        // Reports already in flight for the old source must not match.
        self.token = self.token.next();
        self.clock = PlaybackClock::default();
        self.pending = None;
        self.failure = None;
        self.status = PlaybackStatus::Idle;
    }

    fn request_play(&mut self) -> Effect {
        self.pending = Some(Intent::Play);
        Effect::PlayRequested(PendingPlay {
            token: self.token,
            outcome: self.element.play(),
        })
    }

    fn request_pause(&mut self) -> Effect {
        self.pending = Some(Intent::Pause);
        self.element.pause();
        Effect::PauseRequested
    }

    /// Whether the user currently perceives the clip as playing.
    fn effectively_playing(&self) -> bool {
        match self.pending {
            Some(Intent::Play) => true,
            Some(Intent::Pause) => false,
            None => self.status.is_playing(),
        }
    }

    fn toggle(&mut self) -> Effect {
        if !self.status.accepts_commands() {
            return Effect::None;
        }
        if self.effectively_playing() {
            self.request_pause()
        } else {
            self.request_play()
        }
    }

    fn settle(&mut self, outcome: PlayOutcome) -> Effect {
        // A failed source stays failed whatever its pending play reports.
        if self.status == PlaybackStatus::Unavailable {
            self.pending = None;
            tracing::trace!(token = %self.token, ?outcome, "ignoring play outcome for failed source");
            return Effect::None;
        }
        match outcome {
            PlayOutcome::Resolved => {
                if self.pending == Some(Intent::Pause) {
                    // A pause was requested after this play; its signal decides.
                    return Effect::None;
                }
                self.pending = None;
                if !self.status.is_playing() {
                    self.status = PlaybackStatus::Playing;
                }
                tracing::debug!(token = %self.token, "play request resolved");
            }
            PlayOutcome::Rejected(reason) => {
                let user_paused = self.pending == Some(Intent::Pause);
                self.pending = None;
                self.status = PlaybackStatus::Paused {
                    awaiting_gesture: !user_paused,
                };
                tracing::debug!(token = %self.token, %reason, "play request rejected");
            }
        }
        Effect::StateChanged
    }

    fn apply_event(&mut self, event: ElementEvent) -> Effect {
        if self.status == PlaybackStatus::Unavailable {
            return Effect::None;
        }

        match event {
            ElementEvent::LoadedMetadata { duration_secs } => {
                self.clock.set_duration(duration_secs);
                self.settle_without_autoplay();
            }
            ElementEvent::TimeUpdate {
                current_secs,
                duration_secs,
            } => self.clock.update(current_secs, duration_secs),
            ElementEvent::Playing => {
                if self.pending == Some(Intent::Pause) {
                    return Effect::None;
                }
                self.pending = None;
                self.status = PlaybackStatus::Playing;
            }
            ElementEvent::Waiting => {
                if self.status == PlaybackStatus::Playing {
                    self.status = PlaybackStatus::Buffering;
                }
            }
            ElementEvent::CanPlay => {
                if self.status == PlaybackStatus::Buffering {
                    self.status = PlaybackStatus::Playing;
                } else {
                    self.settle_without_autoplay();
                }
            }
            ElementEvent::Paused => {
                if self.pending == Some(Intent::Play) {
                    return Effect::None;
                }
                self.pending = None;
                if !self.status.is_paused() {
                    self.status = PlaybackStatus::Paused {
                        awaiting_gesture: false,
                    };
                }
            }
            ElementEvent::Ended => {
                self.clock.set_current(self.clock.duration_secs());
                self.pending = None;
                self.status = PlaybackStatus::Paused {
                    awaiting_gesture: false,
                };
            }
            ElementEvent::Failed(error) => {
                tracing::warn!(
                    token = %self.token,
                    source = self.source.as_deref().unwrap_or_default(),
                    %error,
                    "video source failed, falling back to thumbnail"
                );
                self.pending = None;
                self.failure = Some(error);
                self.status = PlaybackStatus::Unavailable;
            }
        }
        Effect::StateChanged
    }

    /// A source that loaded without a play request settles on the
    /// "tap to play" affordance.
    fn settle_without_autoplay(&mut self) {
        if self.status == PlaybackStatus::Loading && self.pending.is_none() {
            self.status = PlaybackStatus::Paused {
                awaiting_gesture: true,
            };
        }
    }

    fn seek_by(&mut self, delta_secs: f64) -> Effect {
        if !self.status.accepts_commands() {
            return Effect::None;
        }
        match self.clock.offset_target(delta_secs) {
            Some(target) => self.seek_to(target),
            None => Effect::None,
        }
    }

    fn seek_to(&mut self, target_secs: f64) -> Effect {
        self.element.seek(target_secs);
        self.clock.set_current(target_secs);
        Effect::Sought {
            position_secs: self.clock.current_secs(),
        }
    }

    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    #[must_use]
    pub fn clock(&self) -> PlaybackClock {
        self.clock
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Token of the currently attached source. Hosts tag element events
    /// with it.
    #[must_use]
    pub fn load_token(&self) -> LoadToken {
        self.token
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns true while a play request awaits confirmation.
    #[must_use]
    pub fn play_pending(&self) -> bool {
        self.pending == Some(Intent::Play)
    }

    /// Why the current source became unavailable.
    #[must_use]
    pub fn failure(&self) -> Option<&VideoError> {
        self.failure.as_ref()
    }
}

impl Drop for State {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use crate::video_player::{Command, CommandLog, ScriptedElement};
    use futures_util::FutureExt;

    const URL: &str = "https://cdn.example.com/clip.mp4";

    fn state_with(element: ScriptedElement) -> State {
        State::new(Box::new(element), SeekStep::default(), false)
    }

    fn scripted() -> (State, CommandLog) {
        let (element, log) = ScriptedElement::new();
        (state_with(element), log)
    }

    /// Resolves a play request the way the orchestrator's task would.
    fn settle(state: &mut State, effect: Effect) -> Effect {
        match effect {
            Effect::PlayRequested(pending) => {
                let outcome = pending
                    .outcome
                    .now_or_never()
                    .expect("scripted outcomes are ready");
                state.handle(Message::PlaySettled {
                    token: pending.token,
                    outcome,
                })
            }
            other => panic!("expected a play request, got {other:?}"),
        }
    }

    fn event(state: &mut State, event: ElementEvent) -> Effect {
        let token = state.load_token();
        state.handle(Message::Element { token, event })
    }

    fn attach_playing(state: &mut State, duration_secs: f64) {
        let effect = state.handle(Message::Attach {
            url: URL.to_string(),
            autoplay: true,
        });
        settle(state, effect);
        event(state, ElementEvent::LoadedMetadata { duration_secs });
    }

    #[test]
    fn attach_with_autoplay_loads_and_requests_play() {
        let (mut state, log) = scripted();
        let effect = state.handle(Message::Attach {
            url: URL.to_string(),
            autoplay: true,
        });

        assert!(matches!(effect, Effect::PlayRequested(_)));
        assert_eq!(state.status(), PlaybackStatus::Loading);
        assert_eq!(
            log.commands(),
            vec![
                Command::Load(URL.to_string()),
                Command::SetMuted(false),
                Command::Play
            ]
        );
    }

    #[test]
    fn resolved_autoplay_moves_to_playing() {
        let (mut state, _log) = scripted();
        attach_playing(&mut state, 60.0);
        assert_eq!(state.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn rejected_autoplay_shows_affordance() {
        let (element, _log) =
            ScriptedElement::with_default_outcome(PlayOutcome::Rejected("NotAllowedError".into()));
        let mut state = state_with(element);
        let effect = state.handle(Message::Attach {
            url: URL.to_string(),
            autoplay: true,
        });
        settle(&mut state, effect);

        assert_eq!(
            state.status(),
            PlaybackStatus::Paused {
                awaiting_gesture: true
            }
        );
    }

    #[test]
    fn gesture_after_rejection_plays() {
        let (element, _log) = ScriptedElement::new();
        let element = element.then(PlayOutcome::Rejected("NotAllowedError".into()));
        let mut state = state_with(element);
        let effect = state.handle(Message::Attach {
            url: URL.to_string(),
            autoplay: true,
        });
        settle(&mut state, effect);

        let effect = state.handle(Message::TogglePlayPause);
        settle(&mut state, effect);
        assert_eq!(state.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn disabled_autoplay_settles_on_affordance() {
        let (mut state, log) = scripted();
        let effect = state.handle(Message::Attach {
            url: URL.to_string(),
            autoplay: false,
        });
        assert!(matches!(effect, Effect::StateChanged));
        event(&mut state, ElementEvent::LoadedMetadata { duration_secs: 5.0 });

        assert!(state.status().awaits_gesture());
        assert_eq!(log.count(|c| *c == Command::Play), 0);
    }

    #[test]
    fn waiting_and_can_play_toggle_buffering() {
        let (mut state, _log) = scripted();
        attach_playing(&mut state, 60.0);

        event(&mut state, ElementEvent::Waiting);
        assert_eq!(state.status(), PlaybackStatus::Buffering);
        assert!(state.status().is_playing());

        event(&mut state, ElementEvent::CanPlay);
        assert_eq!(state.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn toggle_requests_pause_and_waits_for_signal() {
        let (mut state, log) = scripted();
        attach_playing(&mut state, 60.0);

        let effect = state.handle(Message::TogglePlayPause);
        assert!(matches!(effect, Effect::PauseRequested));
        assert_eq!(log.last(), Some(Command::Pause));
        assert_eq!(state.status(), PlaybackStatus::Playing);

        event(&mut state, ElementEvent::Paused);
        assert_eq!(
            state.status(),
            PlaybackStatus::Paused {
                awaiting_gesture: false
            }
        );
    }

    #[test]
    fn rapid_toggles_alternate_requests() {
        let (mut state, log) = scripted();
        attach_playing(&mut state, 60.0);
        log.clear();

        assert!(matches!(
            state.handle(Message::TogglePlayPause),
            Effect::PauseRequested
        ));
        assert!(matches!(
            state.handle(Message::TogglePlayPause),
            Effect::PlayRequested(_)
        ));
        assert!(matches!(
            state.handle(Message::TogglePlayPause),
            Effect::PauseRequested
        ));
        assert_eq!(
            log.commands(),
            vec![Command::Pause, Command::Play, Command::Pause]
        );
    }

    #[test]
    fn late_playing_signal_does_not_override_pause_request() {
        let (mut state, _log) = scripted();
        let effect = state.handle(Message::Attach {
            url: URL.to_string(),
            autoplay: true,
        });
        let _ = state.handle(Message::TogglePlayPause);
        event(&mut state, ElementEvent::Playing);
        assert_ne!(state.status(), PlaybackStatus::Playing);

        // The autoplay outcome arrives after the pause request.
        let _ = settle(&mut state, effect);
        event(&mut state, ElementEvent::Paused);
        assert_eq!(
            state.status(),
            PlaybackStatus::Paused {
                awaiting_gesture: false
            }
        );
    }

    #[test]
    fn stale_events_are_dropped() {
        let (mut state, _log) = scripted();
        attach_playing(&mut state, 60.0);
        let old = state.load_token();

        let _ = state.handle(Message::Attach {
            url: "https://cdn.example.com/next.mp4".to_string(),
            autoplay: true,
        });
        let effect = state.handle(Message::Element {
            token: old,
            event: ElementEvent::Failed(VideoError::Aborted),
        });

        assert!(matches!(effect, Effect::None));
        assert_eq!(state.status(), PlaybackStatus::Loading);
    }

    #[test]
    fn stale_play_outcome_is_dropped() {
        let (mut state, _log) = scripted();
        let first = state.handle(Message::Attach {
            url: URL.to_string(),
            autoplay: true,
        });
        let _second = state.handle(Message::Attach {
            url: "https://cdn.example.com/next.mp4".to_string(),
            autoplay: true,
        });

        let effect = settle(&mut state, first);
        assert!(matches!(effect, Effect::None));
        assert_eq!(state.status(), PlaybackStatus::Loading);
    }

    #[test]
    fn rewind_and_forward_clamp_at_boundaries() {
        let (mut state, log) = scripted();
        attach_playing(&mut state, 25.0);

        let effect = state.handle(Message::Rewind);
        assert!(matches!(effect, Effect::Sought { position_secs } if position_secs == 0.0));
        assert_abs_diff_eq!(state.clock().current_secs(), 0.0);

        event(
            &mut state,
            ElementEvent::TimeUpdate {
                current_secs: 25.0,
                duration_secs: 25.0,
            },
        );
        let effect = state.handle(Message::Forward);
        assert!(matches!(effect, Effect::Sought { position_secs } if position_secs == 25.0));
        assert_eq!(log.last(), Some(Command::Seek(25.0)));
    }

    #[test]
    fn forward_moves_by_seek_step() {
        let (mut state, _log) = scripted();
        attach_playing(&mut state, 60.0);
        event(
            &mut state,
            ElementEvent::TimeUpdate {
                current_secs: 12.0,
                duration_secs: 60.0,
            },
        );

        let _ = state.handle(Message::Forward);
        assert_abs_diff_eq!(state.clock().current_secs(), 22.0);
        let _ = state.handle(Message::Rewind);
        let _ = state.handle(Message::Rewind);
        assert_abs_diff_eq!(state.clock().current_secs(), 2.0);
    }

    #[test]
    fn seeks_are_noops_before_metadata() {
        let (mut state, log) = scripted();
        let _ = state.handle(Message::Attach {
            url: URL.to_string(),
            autoplay: false,
        });

        assert!(matches!(state.handle(Message::Forward), Effect::None));
        assert!(matches!(
            state.handle(Message::SeekToFraction(0.5)),
            Effect::None
        ));
        assert_eq!(log.count(|c| matches!(c, Command::Seek(_))), 0);
    }

    #[test]
    fn seek_to_fraction_scales_duration() {
        let (mut state, _log) = scripted();
        attach_playing(&mut state, 80.0);
        let effect = state.handle(Message::SeekToFraction(0.25));
        assert!(matches!(effect, Effect::Sought { position_secs } if position_secs == 20.0));
        assert_abs_diff_eq!(state.clock().progress_fraction(), 0.25);
    }

    #[test]
    fn failure_degrades_to_unavailable() {
        let (mut state, log) = scripted();
        attach_playing(&mut state, 60.0);
        event(
            &mut state,
            ElementEvent::Failed(VideoError::from_message("network timeout")),
        );

        assert_eq!(state.status(), PlaybackStatus::Unavailable);
        assert!(matches!(state.failure(), Some(VideoError::Network(_))));
        log.clear();
        assert!(matches!(state.handle(Message::TogglePlayPause), Effect::None));
        assert!(matches!(state.handle(Message::Forward), Effect::None));
        assert!(log.commands().is_empty());
    }

    /// Attaches with autoplay and fails the source before the play request
    /// settles, returning the play token still in flight.
    fn fail_before_play_settles(state: &mut State) -> LoadToken {
        let effect = state.handle(Message::Attach {
            url: URL.to_string(),
            autoplay: true,
        });
        let token = match effect {
            Effect::PlayRequested(pending) => pending.token,
            other => panic!("expected a play request, got {other:?}"),
        };
        event(
            state,
            ElementEvent::Failed(VideoError::from_message("network error")),
        );
        token
    }

    #[test]
    fn rejected_play_after_failure_keeps_source_unavailable() {
        let (mut state, _log) = scripted();
        let token = fail_before_play_settles(&mut state);

        let effect = state.handle(Message::PlaySettled {
            token,
            outcome: PlayOutcome::Rejected("NotSupportedError".to_string()),
        });

        assert!(matches!(effect, Effect::None));
        assert_eq!(state.status(), PlaybackStatus::Unavailable);
        assert!(!state.play_pending());
        assert!(matches!(state.failure(), Some(VideoError::Network(_))));
    }

    #[test]
    fn resolved_play_after_failure_keeps_source_unavailable() {
        let (mut state, _log) = scripted();
        let token = fail_before_play_settles(&mut state);

        let effect = state.handle(Message::PlaySettled {
            token,
            outcome: PlayOutcome::Resolved,
        });

        assert!(matches!(effect, Effect::None));
        assert_eq!(state.status(), PlaybackStatus::Unavailable);
        assert!(!state.status().is_playing());
    }

    #[test]
    fn ended_pauses_at_duration() {
        let (mut state, _log) = scripted();
        attach_playing(&mut state, 30.0);
        event(&mut state, ElementEvent::Ended);

        assert_eq!(
            state.status(),
            PlaybackStatus::Paused {
                awaiting_gesture: false
            }
        );
        assert_abs_diff_eq!(state.clock().progress_fraction(), 1.0);
    }

    #[test]
    fn mute_is_independent_and_reapplied_on_attach() {
        let (mut state, log) = scripted();
        attach_playing(&mut state, 30.0);

        let _ = state.handle(Message::ToggleMute);
        assert!(state.is_muted());
        assert_eq!(state.status(), PlaybackStatus::Playing);
        assert_eq!(log.last(), Some(Command::SetMuted(true)));

        let _ = state.handle(Message::Attach {
            url: "https://cdn.example.com/next.mp4".to_string(),
            autoplay: false,
        });
        assert_eq!(log.last(), Some(Command::SetMuted(true)));
    }

    #[test]
    fn nan_duration_reports_zero_progress() {
        let (mut state, _log) = scripted();
        attach_playing(&mut state, f64::NAN);
        event(
            &mut state,
            ElementEvent::TimeUpdate {
                current_secs: 3.0,
                duration_secs: f64::NAN,
            },
        );
        assert_abs_diff_eq!(state.clock().progress_fraction(), 0.0);
        assert!(!state.clock().has_duration());
    }

    #[test]
    fn drop_unloads_attached_source() {
        let (mut state, log) = scripted();
        attach_playing(&mut state, 30.0);
        drop(state);
        assert_eq!(log.last(), Some(Command::Unload));
    }

    #[test]
    fn detach_then_drop_unloads_once() {
        let (mut state, log) = scripted();
        attach_playing(&mut state, 30.0);
        let _ = state.handle(Message::Detach);
        drop(state);
        assert_eq!(log.count(|c| *c == Command::Unload), 1);
    }
}
