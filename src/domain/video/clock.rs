// SPDX-License-Identifier: MPL-2.0
//! Playback clock derived from the media element's time reports.

/// Current position and duration of the attached clip, in seconds.
///
/// Values reported by the platform are sanitized: non-finite or negative
/// numbers become `0`. A duration of `0` means "not known yet", in which case
/// every seek request is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackClock {
    current_secs: f64,
    duration_secs: f64,
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl PlaybackClock {
    #[must_use]
    pub fn new(current_secs: f64, duration_secs: f64) -> Self {
        let mut clock = Self::default();
        clock.set_duration(duration_secs);
        clock.set_current(current_secs);
        clock
    }

    #[must_use]
    pub fn current_secs(&self) -> f64 {
        self.current_secs
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Returns true once the platform has reported a usable duration.
    #[must_use]
    pub fn has_duration(&self) -> bool {
        self.duration_secs > 0.0
    }

    pub fn set_duration(&mut self, duration_secs: f64) {
        self.duration_secs = sanitize(duration_secs);
    }

    pub fn set_current(&mut self, current_secs: f64) {
        let current = sanitize(current_secs);
        self.current_secs = if self.has_duration() {
            current.min(self.duration_secs)
        } else {
            current
        };
    }

    /// Applies a `timeupdate` report.
    pub fn update(&mut self, current_secs: f64, duration_secs: f64) {
        if duration_secs.is_finite() && duration_secs > 0.0 {
            self.set_duration(duration_secs);
        }
        self.set_current(current_secs);
    }

    /// Fraction of the clip already played, in `[0, 1]`.
    #[must_use]
    pub fn progress_fraction(&self) -> f32 {
        if !self.has_duration() {
            return 0.0;
        }
        ((self.current_secs / self.duration_secs) as f32).clamp(0.0, 1.0)
    }

    /// Clamps a seek target into `[0, duration]`.
    ///
    /// Returns `None` while the duration is unknown.
    #[must_use]
    pub fn clamp_target(&self, target_secs: f64) -> Option<f64> {
        if !self.has_duration() || target_secs.is_nan() {
            return None;
        }
        Some(target_secs.clamp(0.0, self.duration_secs))
    }

    /// Target for a relative seek of `delta_secs` from the current position.
    #[must_use]
    pub fn offset_target(&self, delta_secs: f64) -> Option<f64> {
        self.clamp_target(self.current_secs + delta_secs)
    }

    /// Target for an absolute seek expressed as a fraction of the duration.
    #[must_use]
    pub fn fraction_target(&self, fraction: f32) -> Option<f64> {
        self.clamp_target(f64::from(fraction.clamp(0.0, 1.0)) * self.duration_secs)
    }
}

/// Formats a position for display: `m:ss`, or `h:mm:ss` from one hour.
/// Unknown values (NaN, infinite, negative) format as `0:00`.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
