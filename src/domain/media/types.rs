// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent the catalog data host surfaces hand to the viewer.
//! Field names follow the camelCase wire format used by event catalogs.

use super::source::VideoSource;
use crate::error::MediaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of media a viewer session operates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still photos.
    Photo,
    /// Video clips.
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "photo" | "photos" => Ok(MediaKind::Photo),
            "video" | "videos" => Ok(MediaKind::Video),
            other => Err(format!("unknown media type '{other}'")),
        }
    }
}

/// A still photo taken at an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: u64,
    pub url: String,
    pub like_count: u32,
    #[serde(default)]
    pub event_name: Option<String>,
}

/// A short video clip taken at an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoClip {
    pub id: u64,
    pub thumbnail_url: String,
    /// Human readable duration published with the clip (e.g. "1:24").
    pub duration_label: String,
    pub view_count: u64,
    #[serde(default)]
    pub like_count: Option<u32>,
    pub media_url: String,
    #[serde(default)]
    pub event_name: Option<String>,
}

impl VideoClip {
    /// Classifies the clip's media URL.
    #[must_use]
    pub fn source(&self) -> VideoSource {
        VideoSource::classify(&self.media_url)
    }
}

/// What a viewer can do with an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Static display only (photos).
    Static,
    /// Has play, pause, seek and mute.
    Playable,
    /// Rendered by a third-party player; read-only for the viewer.
    Embedded,
}

impl Capability {
    /// Returns true if seek/play/mute commands apply.
    #[must_use]
    pub fn is_playable(self) -> bool {
        matches!(self, Self::Playable)
    }
}

/// A single catalog item, tagged by its `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaItem {
    Photo(Photo),
    Video(VideoClip),
}

impl MediaItem {
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaItem::Photo(_) => MediaKind::Photo,
            MediaItem::Video(_) => MediaKind::Video,
        }
    }
}

/// Borrowed view of the item at a position in a [`MediaSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRef<'a> {
    Photo(&'a Photo),
    Video(&'a VideoClip),
}

impl<'a> ItemRef<'a> {
    #[must_use]
    pub fn id(self) -> u64 {
        match self {
            ItemRef::Photo(photo) => photo.id,
            ItemRef::Video(clip) => clip.id,
        }
    }

    /// Like count published with the item; clips without one start at zero.
    #[must_use]
    pub fn base_like_count(self) -> u32 {
        match self {
            ItemRef::Photo(photo) => photo.like_count,
            ItemRef::Video(clip) => clip.like_count.unwrap_or(0),
        }
    }

    #[must_use]
    pub fn event_name(self) -> Option<&'a str> {
        match self {
            ItemRef::Photo(photo) => photo.event_name.as_deref(),
            ItemRef::Video(clip) => clip.event_name.as_deref(),
        }
    }

    /// URL of the still image shown for the item (the photo itself, or the
    /// clip's thumbnail).
    #[must_use]
    pub fn artwork_url(self) -> &'a str {
        match self {
            ItemRef::Photo(photo) => &photo.url,
            ItemRef::Video(clip) => &clip.thumbnail_url,
        }
    }

    /// URL handed to the host when the item is shared.
    #[must_use]
    pub fn share_url(self) -> &'a str {
        match self {
            ItemRef::Photo(photo) => &photo.url,
            ItemRef::Video(clip) => &clip.media_url,
        }
    }

    #[must_use]
    pub fn capability(self) -> Capability {
        match self {
            ItemRef::Photo(_) => Capability::Static,
            ItemRef::Video(clip) => match clip.source() {
                VideoSource::Progressive(_) => Capability::Playable,
                VideoSource::Embedded { .. } => Capability::Embedded,
            },
        }
    }
}

/// An ordered, finite and homogeneous list of media items.
///
/// A viewer session never mixes photos and clips; this type makes that a
/// structural fact rather than a runtime check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSequence {
    Photos(Vec<Photo>),
    Videos(Vec<VideoClip>),
}

impl MediaSequence {
    /// Builds a sequence of `kind` from loosely typed catalog items.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::EmptySequence`] for an empty list and
    /// [`MediaError::MixedSequence`] for the first item of another kind.
    pub fn from_items(items: Vec<MediaItem>, kind: MediaKind) -> Result<Self, MediaError> {
        if items.is_empty() {
            return Err(MediaError::EmptySequence);
        }

        match kind {
            MediaKind::Photo => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    MediaItem::Photo(photo) => Ok(photo),
                    MediaItem::Video(_) => Err(MediaError::MixedSequence {
                        expected: kind,
                        index,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(MediaSequence::Photos),
            MediaKind::Video => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    MediaItem::Video(clip) => Ok(clip),
                    MediaItem::Photo(_) => Err(MediaError::MixedSequence {
                        expected: kind,
                        index,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(MediaSequence::Videos),
        }
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaSequence::Photos(_) => MediaKind::Photo,
            MediaSequence::Videos(_) => MediaKind::Video,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            MediaSequence::Photos(photos) => photos.len(),
            MediaSequence::Videos(clips) => clips.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the item at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ItemRef<'_>> {
        match self {
            MediaSequence::Photos(photos) => photos.get(index).map(ItemRef::Photo),
            MediaSequence::Videos(clips) => clips.get(index).map(ItemRef::Video),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: u64) -> Photo {
        Photo {
            id,
            url: format!("https://cdn.example.com/p{id}.jpg"),
            like_count: 10,
            event_name: None,
        }
    }

    fn clip(id: u64, media_url: &str) -> VideoClip {
        VideoClip {
            id,
            thumbnail_url: format!("https://cdn.example.com/v{id}.jpg"),
            duration_label: "0:30".to_string(),
            view_count: 100,
            like_count: None,
            media_url: media_url.to_string(),
            event_name: Some("Night Market".to_string()),
        }
    }

    #[test]
    fn media_kind_parses_case_insensitively() {
        assert_eq!("Photo".parse::<MediaKind>(), Ok(MediaKind::Photo));
        assert_eq!("video".parse::<MediaKind>(), Ok(MediaKind::Video));
        assert!("gif".parse::<MediaKind>().is_err());
    }

    #[test]
    fn from_items_rejects_empty_list() {
        let result = MediaSequence::from_items(Vec::new(), MediaKind::Photo);
        assert_eq!(result, Err(MediaError::EmptySequence));
    }

    #[test]
    fn from_items_rejects_mixed_list() {
        let items = vec![
            MediaItem::Photo(photo(1)),
            MediaItem::Video(clip(2, "https://cdn.example.com/v2.mp4")),
        ];
        let result = MediaSequence::from_items(items, MediaKind::Photo);
        assert_eq!(
            result,
            Err(MediaError::MixedSequence {
                expected: MediaKind::Photo,
                index: 1
            })
        );
    }

    #[test]
    fn from_items_builds_homogeneous_sequence() {
        let items = vec![MediaItem::Photo(photo(1)), MediaItem::Photo(photo(2))];
        let sequence = MediaSequence::from_items(items, MediaKind::Photo).unwrap();
        assert_eq!(sequence.kind(), MediaKind::Photo);
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.get(1).map(ItemRef::id), Some(2));
        assert!(sequence.get(2).is_none());
    }

    #[test]
    fn clip_without_like_count_starts_at_zero() {
        let clip = clip(3, "https://cdn.example.com/v3.mp4");
        assert_eq!(ItemRef::Video(&clip).base_like_count(), 0);
    }

    #[test]
    fn capability_follows_source_kind() {
        let photo = photo(1);
        let progressive = clip(2, "https://cdn.example.com/v2.mp4");
        let embedded = clip(3, "https://www.youtube.com/embed/abc123");

        assert_eq!(ItemRef::Photo(&photo).capability(), Capability::Static);
        assert_eq!(
            ItemRef::Video(&progressive).capability(),
            Capability::Playable
        );
        assert_eq!(ItemRef::Video(&embedded).capability(), Capability::Embedded);
    }

    #[test]
    fn artwork_url_uses_thumbnail_for_clips() {
        let clip = clip(4, "https://cdn.example.com/v4.mp4");
        assert_eq!(
            ItemRef::Video(&clip).artwork_url(),
            "https://cdn.example.com/v4.jpg"
        );
    }

    #[test]
    fn media_item_deserializes_from_tagged_toml() {
        let toml_text = r#"
            type = "video"
            id = 7
            thumbnailUrl = "https://cdn.example.com/v7.jpg"
            durationLabel = "1:05"
            viewCount = 12
            mediaUrl = "https://cdn.example.com/v7.mp4"
        "#;
        let item: MediaItem = toml::from_str(toml_text).unwrap();
        match item {
            MediaItem::Video(clip) => {
                assert_eq!(clip.id, 7);
                assert_eq!(clip.like_count, None);
                assert_eq!(clip.event_name, None);
            }
            MediaItem::Photo(_) => panic!("expected a video clip"),
        }
    }
}
