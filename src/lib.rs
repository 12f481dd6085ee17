// SPDX-License-Identifier: MPL-2.0
//! `iced_reel` is a full-screen photo and video viewer for event media,
//! built with the Iced GUI framework.
//!
//! A viewer session is opened over a homogeneous list of photos or clips
//! ([`ui::viewer::component::State::open`]) and handles navigation, playback
//! through a [`video_player::MediaElement`], tap and scrub gestures, and
//! like/share engagement until it is closed.

#![doc(html_root_url = "https://docs.rs/iced_reel/0.1.0")]

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod media;
pub mod ui;
pub mod video_player;

#[cfg(test)]
pub mod test_utils;
