// SPDX-License-Identifier: MPL-2.0
//! Classification of clip URLs into progressive and embedded sources.

use reqwest::Url;
use std::fmt;

/// Third-party players whose sources are rendered read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedProvider {
    YouTube,
    Vimeo,
}

impl EmbedProvider {
    fn from_host(host: &str) -> Option<Self> {
        match host {
            "youtube.com" | "www.youtube.com" | "m.youtube.com" | "youtu.be" => {
                Some(Self::YouTube)
            }
            "vimeo.com" | "player.vimeo.com" => Some(Self::Vimeo),
            _ => None,
        }
    }
}

impl fmt::Display for EmbedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedProvider::YouTube => write!(f, "YouTube"),
            EmbedProvider::Vimeo => write!(f, "Vimeo"),
        }
    }
}

/// Where a clip's media comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Plain URL-addressed video the viewer drives itself.
    Progressive(String),
    /// A third-party player; navigation and seek controls are disabled.
    Embedded { provider: EmbedProvider, url: String },
}

impl VideoSource {
    /// Classifies a media URL by its host.
    #[must_use]
    pub fn classify(url: &str) -> Self {
        match host_of(url).and_then(|host| EmbedProvider::from_host(&host)) {
            Some(provider) => Self::Embedded {
                provider,
                url: url.to_string(),
            },
            None => Self::Progressive(url.to_string()),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Progressive(url) | Self::Embedded { url, .. } => url,
        }
    }

    #[must_use]
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded { .. })
    }
}

/// Extracts the lowercase host of an absolute URL, without port or userinfo.
fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(str::to_ascii_lowercase)
}
