// SPDX-License-Identifier: MPL-2.0
//! Viewer pane that renders the current item over a dimmed backdrop, with
//! the position counter, engagement buttons and, for playable clips, the
//! tap surface, progress bar and playback controls.

use super::component::{CloseReason, Glyph, Message, State};
use super::surfaces::{ProgressBar, TapSurface};
use super::video_controls;
use crate::domain::media::{Capability, ItemRef, VideoSource};
use crate::domain::video::PlaybackStatus;
use crate::error::VideoError;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    button, canvas, image, mouse_area, opaque, Column, Container, Row, Space, Stack, Text,
};
use iced::{ContentFit, Element, Length};

/// Everything the pane needs from a session, resolved up front.
pub struct ViewModel<'a> {
    pub item: ItemRef<'a>,
    pub capability: Capability,
    pub current_index: usize,
    pub total_count: usize,
    pub counter_label: String,
    pub has_previous: bool,
    pub has_next: bool,
    pub artwork: Option<&'a image::Handle>,
    pub liked: bool,
    pub like_count: u32,
    pub share_count: u32,
    pub status: PlaybackStatus,
    pub failure: Option<&'static str>,
    pub progress: f32,
    pub dragging: bool,
    pub glyph: Option<Glyph>,
    pub controls: video_controls::PlaybackState,
}

impl<'a> ViewModel<'a> {
    #[must_use]
    pub fn from_session(session: &'a State) -> Self {
        Self {
            item: session.current_item(),
            capability: session.capability(),
            current_index: session.current_index(),
            total_count: session.len(),
            counter_label: session.counter_label(),
            has_previous: session.has_previous(),
            has_next: session.has_next(),
            artwork: session.artwork(),
            liked: session.is_liked(),
            like_count: session.like_count(),
            share_count: session.share_count(),
            status: session.playback_status(),
            failure: session.playback_failure().map(VideoError::summary),
            progress: session.progress_fraction(),
            dragging: session.is_dragging(),
            glyph: session.feedback_glyph(),
            controls: video_controls::PlaybackState {
                is_playing: session.is_playing(),
                muted: session.is_muted(),
                current_label: session.current_time_label(),
                total_label: session.total_time_label(),
            },
        }
    }

    /// Whether the progress bar and playback controls are shown. A failed
    /// source keeps its thumbnail but loses them.
    #[must_use]
    pub fn shows_playback_controls(&self) -> bool {
        self.capability.is_playable() && self.status != PlaybackStatus::Unavailable
    }

    #[must_use]
    pub fn shows_tap_to_play(&self) -> bool {
        self.capability.is_playable() && self.status.awaits_gesture()
    }
}

fn glyph_label(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Rewind => "⟲ 10",
        Glyph::Forward => "10 ⟳",
        Glyph::Play => "▶",
        Glyph::Pause => "❚❚",
    }
}

fn badge<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(content)
        .padding(spacing::SM)
        .style(styles::overlay::indicator(radius::MD))
        .into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn overlay_button<'a>(label: String, message: Message) -> button::Button<'a, Message> {
    button(Text::new(label).size(typography::BODY))
        .padding(spacing::XS)
        .on_press(message)
        .style(styles::button::overlay(
            palette::WHITE,
            opacity::OVERLAY_MEDIUM,
            opacity::OVERLAY_HOVER,
        ))
}

fn header<'a>(model: &ViewModel<'a>) -> Element<'a, Message> {
    let counter = badge(Text::new(model.counter_label.clone()).size(typography::CAPTION));

    let mut row = Row::new()
        .spacing(spacing::SM)
        .padding(spacing::MD)
        .align_y(Vertical::Center)
        .push(counter);

    if let Some(event_name) = model.item.event_name() {
        row = row.push(Text::new(event_name.to_string()).size(typography::TITLE_MD));
    }

    row.push(Space::new().width(Length::Fill))
        .push(overlay_button("✕".to_string(), Message::Close(CloseReason::Button)))
        .into()
}

fn media_layer<'a>(model: &ViewModel<'a>) -> Element<'a, Message> {
    let artwork: Element<'a, Message> = match model.artwork {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => centered(Text::new("Loading…").size(typography::BODY)),
    };

    let mut stack = Stack::new().push(opaque(artwork));

    match model.capability {
        Capability::Static => {
            if model.has_previous {
                stack = stack.push(
                    Container::new(overlay_button("◀".to_string(), Message::Retreat))
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .padding(spacing::MD)
                        .align_x(Horizontal::Left)
                        .align_y(Vertical::Center),
                );
            }
            if model.has_next {
                stack = stack.push(
                    Container::new(overlay_button("▶".to_string(), Message::Advance))
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .padding(spacing::MD)
                        .align_x(Horizontal::Right)
                        .align_y(Vertical::Center),
                );
            }
        }
        Capability::Playable => {
            if model.status != PlaybackStatus::Unavailable {
                stack = stack.push(
                    canvas(TapSurface)
                        .width(Length::Fill)
                        .height(Length::Fill),
                );
            }
            stack = push_playback_overlays(stack, model);
        }
        Capability::Embedded => {
            if let ItemRef::Video(clip) = model.item {
                if let VideoSource::Embedded { provider, .. } = clip.source() {
                    stack = stack.push(centered(badge(
                        Text::new(format!("Plays on {provider}")).size(typography::BODY),
                    )));
                }
            }
        }
    }

    stack.width(Length::Fill).height(Length::Fill).into()
}

fn push_playback_overlays<'a>(
    mut stack: Stack<'a, Message>,
    model: &ViewModel<'a>,
) -> Stack<'a, Message> {
    match model.status {
        PlaybackStatus::Unavailable => {
            let label = match model.failure {
                Some(reason) => format!("Video unavailable. {reason}"),
                None => "Video unavailable".to_string(),
            };
            stack = stack.push(centered(badge(Text::new(label).size(typography::BODY))));
        }
        PlaybackStatus::Buffering | PlaybackStatus::Loading => {
            stack = stack.push(centered(badge(Text::new("Buffering…").size(typography::BODY))));
        }
        _ if model.shows_tap_to_play() => {
            let affordance = button(Text::new("▶  Tap to play").size(typography::TITLE_MD))
                .padding(spacing::MD)
                .on_press(Message::VideoControls(
                    video_controls::Message::TogglePlayback,
                ))
                .style(styles::button::overlay(
                    palette::WHITE,
                    opacity::OVERLAY_STRONG,
                    opacity::OVERLAY_HOVER,
                ));
            stack = stack.push(centered(affordance));
        }
        _ => {}
    }

    if let Some(glyph) = model.glyph {
        stack = stack.push(centered(
            Container::new(Text::new(glyph_label(glyph)).size(sizing::ICON_LG))
                .width(Length::Fixed(sizing::FEEDBACK_BADGE))
                .height(Length::Fixed(sizing::FEEDBACK_BADGE))
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center)
                .style(styles::overlay::indicator(radius::FULL)),
        ));
    }

    stack
}

fn playback_bar<'a>(model: &ViewModel<'a>) -> Element<'a, Message> {
    let progress = canvas(ProgressBar {
        progress: model.progress,
        dragging: model.dragging,
    })
    .width(Length::Fill)
    .height(Length::Fixed(sizing::TIMELINE_HIT));

    let controls = video_controls::view(&model.controls).map(Message::VideoControls);

    Column::new()
        .push(Container::new(progress).padding([0.0, spacing::MD]))
        .push(controls)
        .into()
}

fn footer<'a>(model: &ViewModel<'a>) -> Element<'a, Message> {
    let like_label = if model.liked {
        format!("♥ {}", model.like_count)
    } else {
        format!("♡ {}", model.like_count)
    };
    let like = overlay_button(like_label, Message::ToggleLike);
    let like: Element<'a, Message> = if model.liked {
        like.style(styles::button::selected).into()
    } else {
        like.into()
    };

    let share = overlay_button(format!("Share · {}", model.share_count), Message::Share);

    let mut row = Row::new()
        .spacing(spacing::SM)
        .padding(spacing::MD)
        .align_y(Vertical::Center)
        .push(like)
        .push(share);

    if let ItemRef::Video(clip) = model.item {
        row = row.push(Text::new(format!("{} views", clip.view_count)).size(typography::CAPTION));
    }

    row = row.push(Space::new().width(Length::Fill));

    if model.total_count > 1 {
        let dots = (0..model.total_count).fold(Row::new().spacing(spacing::XXS), |dots, index| {
            let current = index == model.current_index;
            dots.push(
                button(Space::new())
                    .width(Length::Fixed(sizing::PAGE_DOT))
                    .height(Length::Fixed(sizing::PAGE_DOT))
                    .padding(0)
                    .on_press(Message::GoTo(index))
                    .style(styles::button::page_dot(current)),
            )
        });
        row = row.push(dots);
    }

    row.into()
}

pub fn view(model: ViewModel<'_>) -> Element<'_, Message> {
    let mut content = Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(header(&model))
        .push(
            Container::new(media_layer(&model))
                .width(Length::Fill)
                .height(Length::Fill)
                .padding([0.0, spacing::LG]),
        );

    if model.shows_playback_controls() {
        content = content.push(playback_bar(&model));
    }

    content = content.push(footer(&model));

    // Clicks that reach the backdrop (outside every control) close the viewer.
    let backdrop = mouse_area(
        Container::new(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::overlay::backdrop),
    )
    .on_press(Message::Close(CloseReason::Backdrop));

    Stack::new()
        .push(backdrop)
        .push(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerSettings;
    use crate::domain::media::{MediaSequence, Photo, VideoClip};
    use crate::video_player::ScriptedElement;

    fn session(media: MediaSequence) -> State {
        let (element, _log) = ScriptedElement::new();
        let (state, _task) = State::open(media, 0, ViewerSettings::default(), Box::new(element))
            .expect("valid session");
        state
    }

    #[test]
    fn photo_model_reflects_session() {
        let state = session(MediaSequence::Photos(vec![Photo {
            id: 4,
            url: "https://cdn.example.com/p4.jpg".to_string(),
            like_count: 7,
            event_name: Some("Harbour Lights".to_string()),
        }]));
        let model = ViewModel::from_session(&state);

        assert_eq!(model.counter_label, "1 / 1");
        assert_eq!(model.capability, Capability::Static);
        assert_eq!(model.like_count, 7);
        assert!(!model.has_next);
        let _element = view(model);
    }

    #[test]
    fn clip_model_uses_published_duration_until_metadata() {
        let state = session(MediaSequence::Videos(vec![VideoClip {
            id: 1,
            thumbnail_url: "https://cdn.example.com/t1.jpg".to_string(),
            duration_label: "2:05".to_string(),
            view_count: 12,
            like_count: None,
            media_url: "https://cdn.example.com/v1.mp4".to_string(),
            event_name: None,
        }]));
        let model = ViewModel::from_session(&state);

        assert_eq!(model.controls.total_label, "2:05");
        assert_eq!(model.status, PlaybackStatus::Loading);
        let _element = view(model);
    }
}
