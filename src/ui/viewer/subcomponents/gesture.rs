// SPDX-License-Identifier: MPL-2.0
//! Tap-zone routing for the video surface.
//!
//! The surface is split into three half-open thirds:
//! `[0, w/3)` rewinds, `[w/3, 2w/3)` toggles playback, `[2w/3, w]` forwards.

/// Action bound to a region of the video surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapZone {
    Rewind,
    TogglePlayback,
    Forward,
}

/// Classifies a tap at `x` on a surface `width` wide.
///
/// Taps outside the surface are clamped onto its edges. Returns `None` for
/// degenerate surfaces (zero, negative or non-finite width) and NaN positions.
#[must_use]
pub fn classify_tap(x: f32, width: f32) -> Option<TapZone> {
    if !width.is_finite() || width <= 0.0 || x.is_nan() {
        return None;
    }

    let x = x.clamp(0.0, width);
    let zone = if x < width / 3.0 {
        TapZone::Rewind
    } else if x < width * 2.0 / 3.0 {
        TapZone::TogglePlayback
    } else {
        TapZone::Forward
    };
    Some(zone)
}
