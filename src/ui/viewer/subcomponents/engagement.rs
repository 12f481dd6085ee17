// SPDX-License-Identifier: MPL-2.0
//! Like and share counters for the current item.
//!
//! Counts are optimistic and session-local: nothing is sent anywhere and a
//! fresh slice is built from the item's published counts on every index
//! change.

use crate::domain::media::ItemRef;

/// Engagement state of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    item_id: u64,
    share_url: String,
    base_like_count: u32,
    liked: bool,
    share_count: u32,
}

/// Messages for the engagement sub-component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    ToggleLike,
    Share,
}

/// Effects produced by engagement changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// No effect.
    None,
    LikeChanged { liked: bool, like_count: u32 },
    /// The host should open its share sheet for `url`.
    ShareRequested { item_id: u64, url: String },
}

impl State {
    /// Builds a fresh engagement slice from the item's published counts.
    #[must_use]
    pub fn for_item(item: ItemRef<'_>) -> Self {
        Self {
            item_id: item.id(),
            share_url: item.share_url().to_string(),
            base_like_count: item.base_like_count(),
            liked: false,
            share_count: 0,
        }
    }

    /// Handle an engagement message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::ToggleLike => {
                self.liked = !self.liked;
                Effect::LikeChanged {
                    liked: self.liked,
                    like_count: self.like_count(),
                }
            }
            Message::Share => {
                self.share_count = self.share_count.saturating_add(1);
                Effect::ShareRequested {
                    item_id: self.item_id,
                    url: self.share_url.clone(),
                }
            }
        }
    }

    #[must_use]
    pub fn item_id(&self) -> u64 {
        self.item_id
    }

    #[must_use]
    pub fn is_liked(&self) -> bool {
        self.liked
    }

    /// Published count plus the local like, if any.
    #[must_use]
    pub fn like_count(&self) -> u32 {
        self.base_like_count.saturating_add(u32::from(self.liked))
    }

    #[must_use]
    pub fn share_count(&self) -> u32 {
        self.share_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{Photo, VideoClip};

    fn photo(like_count: u32) -> Photo {
        Photo {
            id: 7,
            url: "https://cdn.example.com/p7.jpg".to_string(),
            like_count,
            event_name: Some("Summer Fest".to_string()),
        }
    }

    #[test]
    fn toggle_twice_restores_exact_count() {
        let photo = photo(41);
        let mut state = State::for_item(ItemRef::Photo(&photo));

        assert_eq!(
            state.handle(Message::ToggleLike),
            Effect::LikeChanged {
                liked: true,
                like_count: 42
            }
        );
        state.handle(Message::ToggleLike);
        assert_eq!(state.like_count(), 41);
        assert!(!state.is_liked());
    }

    #[test]
    fn like_saturates_at_max() {
        let photo = photo(u32::MAX);
        let mut state = State::for_item(ItemRef::Photo(&photo));
        state.handle(Message::ToggleLike);
        state.handle(Message::ToggleLike);
        assert_eq!(state.like_count(), u32::MAX);
    }

    #[test]
    fn clip_without_like_count_starts_at_zero() {
        let clip = VideoClip {
            id: 3,
            thumbnail_url: "https://cdn.example.com/t3.jpg".to_string(),
            duration_label: "0:45".to_string(),
            view_count: 1_200,
            like_count: None,
            media_url: "https://cdn.example.com/v3.mp4".to_string(),
            event_name: None,
        };
        let state = State::for_item(ItemRef::Video(&clip));
        assert_eq!(state.like_count(), 0);
    }

    #[test]
    fn share_counts_and_requests_host_sheet() {
        let photo = photo(0);
        let mut state = State::for_item(ItemRef::Photo(&photo));
        let effect = state.handle(Message::Share);

        assert_eq!(
            effect,
            Effect::ShareRequested {
                item_id: 7,
                url: "https://cdn.example.com/p7.jpg".to_string()
            }
        );
        state.handle(Message::Share);
        assert_eq!(state.share_count(), 2);
    }
}
