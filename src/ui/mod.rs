// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! This module follows the Elm-style "state down, messages up" pattern.
//!
//! - [`viewer`] - The media viewer session and its sub-components
//! - [`styles`] - Centralized styling (buttons, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod styles;
pub mod viewer;
