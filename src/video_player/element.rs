// SPDX-License-Identifier: MPL-2.0
//! The media element port.
//!
//! The viewer never decodes video itself. It drives a platform player through
//! [`MediaElement`] and learns what actually happened from [`ElementEvent`]s
//! reported back by the host. Commands are requests: only events move the
//! playback state machine.

use crate::error::VideoError;
use futures_util::future::BoxFuture;
use std::fmt;

/// Identifies one attached source.
///
/// Every `load` gets a fresh token. Events and play outcomes carry the token
/// of the load that produced them so that late reports for a superseded
/// source can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LoadToken(u64);

impl LoadToken {
    /// Returns the token of the next load.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of a play request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The platform started playback.
    Resolved,
    /// The platform refused, e.g. autoplay without a user gesture.
    Rejected(String),
}

/// Signals reported by the platform player.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementEvent {
    /// Duration became known.
    LoadedMetadata { duration_secs: f64 },
    /// Periodic clock report.
    TimeUpdate {
        current_secs: f64,
        duration_secs: f64,
    },
    /// Playback started or resumed.
    Playing,
    /// Playback stalled waiting for data.
    Waiting,
    /// Enough data is available to play.
    CanPlay,
    /// Playback paused.
    Paused,
    /// The clock reached the end of the clip.
    Ended,
    /// The source could not be loaded or decoded.
    Failed(VideoError),
}

/// A platform player the viewer can drive.
///
/// Implementations must not block: `play` returns immediately with a future
/// that settles once the platform accepted or refused the request.
pub trait MediaElement: Send {
    /// Attaches a new source, replacing any previous one.
    fn load(&mut self, url: &str);

    /// Requests playback.
    fn play(&mut self) -> BoxFuture<'static, PlayOutcome>;

    /// Requests a pause.
    fn pause(&mut self);

    /// Moves the playback clock to `position_secs`.
    fn seek(&mut self, position_secs: f64);

    fn set_muted(&mut self, muted: bool);

    /// Detaches the current source and releases platform resources.
    fn unload(&mut self);
}
