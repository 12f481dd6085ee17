// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for tunable playback values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// SeekStep
// =============================================================================

/// Seek step bounds (1 to 60 seconds).
pub mod seek_step_bounds {
    /// Minimum seek step in seconds.
    pub const MIN: f64 = 1.0;
    /// Maximum seek step in seconds.
    pub const MAX: f64 = 60.0;
    /// Default seek step in seconds, used by rewind/forward.
    pub const DEFAULT: f64 = 10.0;
}

/// Distance in seconds covered by one rewind or forward action.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1.0–60.0 seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekStep(f64);

impl SeekStep {
    /// Creates a new seek step, clamping to valid range.
    /// Non-finite input falls back to the default.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(seek_step_bounds::MIN, seek_step_bounds::MAX))
        } else {
            Self::default()
        }
    }

    /// Returns the value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the step as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl Default for SeekStep {
    fn default() -> Self {
        Self(seek_step_bounds::DEFAULT)
    }
}

// =============================================================================
// FeedbackDuration
// =============================================================================

/// Feedback glyph lifetime bounds (in milliseconds).
pub mod feedback_bounds {
    /// Shortest glyph lifetime.
    pub const MIN_MS: u64 = 100;
    /// Longest glyph lifetime.
    pub const MAX_MS: u64 = 5_000;
    /// Default glyph lifetime.
    pub const DEFAULT_MS: u64 = 500;
}

/// How long a rewind/forward/play/pause glyph stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackDuration(Duration);

impl FeedbackDuration {
    /// Creates a new glyph lifetime from milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(
            ms.clamp(feedback_bounds::MIN_MS, feedback_bounds::MAX_MS),
        ))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl Default for FeedbackDuration {
    fn default() -> Self {
        Self(Duration::from_millis(feedback_bounds::DEFAULT_MS))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_step_clamps_to_valid_range() {
        assert!((SeekStep::new(0.0).value() - seek_step_bounds::MIN).abs() < 0.001);
        assert!((SeekStep::new(100.0).value() - seek_step_bounds::MAX).abs() < 0.001);
        assert!((SeekStep::new(5.0).value() - 5.0).abs() < 0.001);
    }

    #[test]
    fn seek_step_default_is_ten_seconds() {
        assert!((SeekStep::default().value() - 10.0).abs() < 0.001);
    }

    #[test]
    fn seek_step_rejects_nan() {
        assert_eq!(SeekStep::new(f64::NAN), SeekStep::default());
    }

    #[test]
    fn seek_step_as_duration() {
        let step = SeekStep::new(2.5);
        assert_eq!(step.as_duration(), Duration::from_secs_f64(2.5));
    }

    #[test]
    fn feedback_duration_clamps() {
        assert_eq!(
            FeedbackDuration::from_millis(1).as_duration(),
            Duration::from_millis(feedback_bounds::MIN_MS)
        );
        assert_eq!(
            FeedbackDuration::from_millis(60_000).as_duration(),
            Duration::from_millis(feedback_bounds::MAX_MS)
        );
    }

    #[test]
    fn feedback_duration_default_is_half_a_second() {
        assert_eq!(
            FeedbackDuration::default().as_duration(),
            Duration::from_millis(500)
        );
    }
}
