// SPDX-License-Identifier: MPL-2.0
//! Video playback controls UI.
//!
//! Provides a toolbar with rewind, play/pause, forward, time display and
//! mute toggle. The progress bar is a separate canvas composed by the pane.

use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, row, text, tooltip, Row, Space, Text};
use iced::{Element, Length};

/// Messages emitted by video control widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Toggle play/pause state.
    TogglePlayback,
    /// Toggle mute state.
    ToggleMute,
    /// Jump back by the seek step.
    Rewind,
    /// Jump forward by the seek step.
    Forward,
}

/// Playback state needed to render the controls.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    /// Is the clip playing (or buffering while playing)?
    pub is_playing: bool,
    /// Is audio muted?
    pub muted: bool,
    /// Formatted current position.
    pub current_label: String,
    /// Formatted total duration.
    pub total_label: String,
}

fn control_button<'a>(label: &'a str, message: Message) -> button::Button<'a, Message> {
    button(text(label).size(sizing::ICON_SM))
        .on_press(message)
        .padding(spacing::XS)
        .width(Length::Shrink)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
}

fn with_tooltip<'a>(content: impl Into<Element<'a, Message>>, tip: &'a str) -> Element<'a, Message> {
    tooltip(content, Text::new(tip), tooltip::Position::Top)
        .gap(4)
        .into()
}

/// Renders the video controls toolbar.
///
/// Returns a Row with:
/// - Rewind, Play/Pause and Forward buttons
/// - Time display (current/total)
/// - Mute button
pub fn view<'a>(state: &PlaybackState) -> Element<'a, Message> {
    let (play_pause_label, play_pause_tooltip) = if state.is_playing {
        ("❚❚", "Pause (Space)")
    } else {
        ("▶", "Play (Space)")
    };

    let rewind = with_tooltip(control_button("⟲", Message::Rewind), "Rewind (←)");
    let play_pause = with_tooltip(
        control_button(play_pause_label, Message::TogglePlayback),
        play_pause_tooltip,
    );
    let forward = with_tooltip(control_button("⟳", Message::Forward), "Forward (→)");

    let time_display = text(format!("{} / {}", state.current_label, state.total_label))
        .size(typography::CAPTION);

    let (mute_label, mute_tooltip) = if state.muted {
        ("🔇", "Unmute (M)")
    } else {
        ("🔊", "Mute (M)")
    };
    let mute_button = control_button(mute_label, Message::ToggleMute);
    // Highlight the button while muted.
    let mute_button: Element<'a, Message> = if state.muted {
        mute_button.style(styles::button::selected).into()
    } else {
        mute_button.into()
    };
    let mute = with_tooltip(mute_button, mute_tooltip);

    let controls: Row<'a, Message> = row![
        rewind,
        play_pause,
        forward,
        time_display,
        Space::new().width(Length::Fill),
        mute,
    ]
    .spacing(spacing::XS)
    .padding(spacing::XS)
    .align_y(iced::Alignment::Center);

    container(controls)
        .width(Length::Fill)
        .padding(spacing::XXS)
        .style(styles::overlay::controls_container)
        .into()
}
