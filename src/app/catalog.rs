// SPDX-License-Identifier: MPL-2.0
//! Media catalogs for the demo host.
//!
//! A catalog file is TOML with one `[[items]]` table per item, tagged by
//! `type`:
//!
//! ```toml
//! [[items]]
//! type = "video"
//! id = 7
//! thumbnailUrl = "https://cdn.example.com/t7.jpg"
//! durationLabel = "1:24"
//! viewCount = 1200
//! mediaUrl = "https://cdn.example.com/v7.mp4"
//! ```

use crate::domain::media::{MediaItem, MediaKind, Photo, VideoClip};
use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<MediaItem>,
}

/// Reads the items of a catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub fn load_file(path: &Path) -> Result<Vec<MediaItem>> {
    let content = fs::read_to_string(path)?;
    let catalog: CatalogFile = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), items = catalog.items.len(), "loaded catalog");
    Ok(catalog.items)
}

/// Built-in catalog used when no file is given.
#[must_use]
pub fn sample(kind: MediaKind) -> Vec<MediaItem> {
    match kind {
        MediaKind::Photo => [
            (1011, 128, "Harbour Lights"),
            (1015, 342, "Harbour Lights"),
            (1025, 57, "Night Market"),
            (1039, 903, "Summit Run"),
        ]
        .into_iter()
        .map(|(id, like_count, event)| {
            MediaItem::Photo(Photo {
                id,
                url: format!("https://picsum.photos/id/{id}/1600/1067"),
                like_count,
                event_name: Some(event.to_string()),
            })
        })
        .collect(),
        MediaKind::Video => [
            (1, "BigBuckBunny", "9:56", 48_210, Some(512)),
            (2, "ElephantsDream", "10:53", 12_044, None),
            (3, "ForBiggerBlazes", "0:15", 3_980, Some(41)),
        ]
        .into_iter()
        .map(|(id, name, duration, views, likes)| {
            MediaItem::Video(VideoClip {
                id,
                thumbnail_url: format!(
                    "https://storage.googleapis.com/gtv-videos-bucket/sample/images/{name}.jpg"
                ),
                duration_label: duration.to_string(),
                view_count: views,
                like_count: likes,
                media_url: format!(
                    "https://storage.googleapis.com/gtv-videos-bucket/sample/{name}.mp4"
                ),
                event_name: Some("Open Movie Night".to_string()),
            })
        })
        .chain(std::iter::once(MediaItem::Video(VideoClip {
            id: 4,
            thumbnail_url: "https://i.ytimg.com/vi/aqz-KE-bpKQ/hqdefault.jpg".to_string(),
            duration_label: "10:34".to_string(),
            view_count: 1_204,
            like_count: None,
            media_url: "https://www.youtube.com/watch?v=aqz-KE-bpKQ".to_string(),
            event_name: Some("Open Movie Night".to_string()),
        })))
        .collect(),
    }
}

/// Parses a published duration label (`m:ss` or `h:mm:ss`) into seconds.
#[must_use]
pub fn parse_duration_label(label: &str) -> Option<f64> {
    let parts = label
        .trim()
        .split(':')
        .map(|part| part.parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;

    let secs = match parts.as_slice() {
        [s] => *s,
        [m, s] if *s < 60 => m * 60 + s,
        [h, m, s] if *m < 60 && *s < 60 => h * 3600 + m * 60 + s,
        _ => return None,
    };
    Some(f64::from(secs))
}

/// Source lengths for the simulated element, keyed by media URL.
#[must_use]
pub fn clip_durations(items: &[MediaItem]) -> HashMap<String, f64> {
    items
        .iter()
        .filter_map(|item| match item {
            MediaItem::Video(clip) => parse_duration_label(&clip.duration_label)
                .map(|secs| (clip.media_url.clone(), secs)),
            MediaItem::Photo(_) => None,
        })
        .collect()
}
