// SPDX-License-Identifier: MPL-2.0
//! Nested TEA sub-components for the viewer.
//!
//! Each sub-component has its own State, Message, Effect, and handle() method.
//! The main component.rs orchestrates these sub-components.
//!
//! ## Architecture
//!
//! ```text
//! component.rs (orchestrator)
//!     ├── navigation  - Current index, no wraparound
//!     ├── playback    - Media element state machine (video only)
//!     ├── gesture     - Tap-zone classification
//!     ├── scrub       - Progress-bar drag lifecycle
//!     ├── feedback    - Transient glyph and its timer
//!     └── engagement  - Like/share counters for the current item
//! ```

pub mod engagement;
pub mod feedback;
pub mod gesture;
pub mod navigation;
pub mod playback;
pub mod scrub;
