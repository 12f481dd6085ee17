// SPDX-License-Identifier: MPL-2.0
//! Video playback state machine.
//!
//! This module defines the playback states a clip moves through while it is
//! shown in the viewer. Transitions are driven by element signals; commands
//! issued by the viewer are requests and never change the state on their own.

/// Represents the current playback state of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// No source attached.
    #[default]
    Idle,
    /// A source was attached and has not started playing yet.
    Loading,
    /// The clock is advancing.
    Playing,
    /// Paused. `awaiting_gesture` is set when the platform refused to start
    /// playback on its own and a "tap to play" affordance must stay visible.
    Paused { awaiting_gesture: bool },
    /// Playing intent, but the element is starved of data.
    Buffering,
    /// The source failed to load; only the thumbnail is shown.
    Unavailable,
}

impl PlaybackStatus {
    /// Returns true if the clip is playing or waiting for data to keep playing.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing | Self::Buffering)
    }

    /// Returns true if the clip is paused.
    #[must_use]
    pub fn is_paused(self) -> bool {
        matches!(self, Self::Paused { .. })
    }

    /// Returns true if the element is starved of data.
    #[must_use]
    pub fn is_buffering(self) -> bool {
        matches!(self, Self::Buffering)
    }

    /// Returns true if the "tap to play" affordance should be shown.
    #[must_use]
    pub fn awaits_gesture(self) -> bool {
        matches!(
            self,
            Self::Paused {
                awaiting_gesture: true
            }
        )
    }

    /// Returns true if playback controls can act on the clip.
    #[must_use]
    pub fn accepts_commands(self) -> bool {
        !matches!(self, Self::Idle | Self::Unavailable)
    }
}
