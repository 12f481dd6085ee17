// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains the catalog types a viewer session operates on,
//! independent of any presentation or infrastructure concerns.

pub mod source;
pub mod types;

// Re-export commonly used types
pub use source::{EmbedProvider, VideoSource};
pub use types::{Capability, ItemRef, MediaItem, MediaKind, MediaSequence, Photo, VideoClip};
