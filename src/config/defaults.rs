// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for the viewer settings.
//!
//! Range bounds for the numeric settings live next to their newtypes in
//! [`crate::domain::video`]; this module re-exports them so that the whole
//! configuration surface can be read in one place.

pub use crate::domain::video::newtypes::{feedback_bounds, seek_step_bounds};

// ==========================================================================
// Seek Defaults
// ==========================================================================

/// Default rewind/forward distance in seconds.
pub const DEFAULT_SEEK_STEP_SECS: f64 = seek_step_bounds::DEFAULT;

// ==========================================================================
// Feedback Defaults
// ==========================================================================

/// Default lifetime of the rewind/forward/play/pause glyph in milliseconds.
pub const DEFAULT_FEEDBACK_DURATION_MS: u64 = feedback_bounds::DEFAULT_MS;

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Videos start playing as soon as they are attached.
pub const DEFAULT_AUTOPLAY: bool = true;

/// Sound is on when the viewer opens.
pub const DEFAULT_START_MUTED: bool = false;

// ==========================================================================
// Demo Host Defaults
// ==========================================================================

/// Interval at which the demo host advances its simulated player clock.
pub const SIMULATED_TICK_MS: u64 = 250;
