// SPDX-License-Identifier: MPL-2.0
//! Canvas programs for the interactive video surfaces.
//!
//! Both surfaces only react to presses inside their own bounds. Moves and
//! releases during a scrub are picked up by the session's window-wide drag
//! subscription, so leaving the bar does not end the drag.

use super::component::Message;
use super::subcomponents::scrub;
use crate::ui::design_tokens::{opacity, palette, sizing};
use iced::widget::canvas::{self, Frame, Geometry};
use iced::widget::Action;
use iced::{mouse, touch, Color, Event, Point, Rectangle, Renderer, Size, Theme};

/// Returns the press position if `event` is a primary press inside `bounds`.
fn press_position(event: &Event, bounds: Rectangle, cursor: mouse::Cursor) -> Option<Point> {
    match event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            cursor.position().filter(|position| bounds.contains(*position))
        }
        Event::Touch(touch::Event::FingerPressed { position, .. }) => {
            Some(*position).filter(|position| bounds.contains(*position))
        }
        _ => None,
    }
}

/// Transparent layer over the video split into rewind / toggle / forward
/// thirds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TapSurface;

impl canvas::Program<Message> for TapSurface {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        let position = press_position(event, bounds, cursor)?;
        Some(
            Action::publish(Message::SurfaceTap {
                x: position.x - bounds.x,
                width: bounds.width,
            })
            .and_capture(),
        )
    }

    fn draw(
        &self,
        _state: &Self::State,
        _renderer: &Renderer,
        _theme: &Theme,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        Vec::new()
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Scrubbable progress bar.
#[derive(Debug, Clone, Copy)]
pub struct ProgressBar {
    /// Played fraction in `[0, 1]`.
    pub progress: f32,
    /// Whether a scrub drag is active, drawn with a thicker track.
    pub dragging: bool,
}

impl canvas::Program<Message> for ProgressBar {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        let position = press_position(event, bounds, cursor)?;
        Some(
            Action::publish(Message::Scrub(scrub::Message::Start {
                x: position.x,
                bar: bounds,
            }))
            .and_capture(),
        )
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let track_height = if self.dragging {
            sizing::TIMELINE_TRACK * 1.5
        } else {
            sizing::TIMELINE_TRACK
        };
        let top = (bounds.height - track_height) / 2.0;
        let played = bounds.width * self.progress.clamp(0.0, 1.0);

        frame.fill_rectangle(
            Point::new(0.0, top),
            Size::new(bounds.width, track_height),
            Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::WHITE
            },
        );
        frame.fill_rectangle(
            Point::new(0.0, top),
            Size::new(played, track_height),
            palette::PRIMARY_500,
        );

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}
