// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the demo host.

use super::Message;
use crate::config::defaults::SIMULATED_TICK_MS;
use crate::ui::viewer::component;
use iced::{time, Subscription};
use std::time::Duration;

/// Creates the periodic tick that drives the simulated media element.
///
/// No tick is produced once the session is closed.
pub fn create_tick_subscription(viewer: &component::State) -> Subscription<Message> {
    if viewer.is_closed() {
        Subscription::none()
    } else {
        time::every(Duration::from_millis(SIMULATED_TICK_MS)).map(Message::Tick)
    }
}

/// Keyboard and drag listeners owned by the viewer session.
pub fn create_viewer_subscription(viewer: &component::State) -> Subscription<Message> {
    viewer.subscription().map(Message::Viewer)
}
