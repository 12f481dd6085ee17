// SPDX-License-Identifier: MPL-2.0
//! Domain layer - core viewer types and rules.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Apart from `serde` derives on catalog types it has no dependencies on
//! external crates, which keeps it testable without a UI runtime.
//!
//! # Modules
//!
//! - [`media`]: Catalog types ([`MediaSequence`](media::MediaSequence),
//!   [`VideoSource`](media::VideoSource), [`Capability`](media::Capability))
//! - [`video`]: Playback types ([`PlaybackStatus`](video::PlaybackStatus),
//!   [`PlaybackClock`](video::PlaybackClock), [`SeekStep`](video::SeekStep))

pub mod media;
pub mod video;
