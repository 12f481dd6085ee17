// SPDX-License-Identifier: MPL-2.0
//! Progress-bar scrubbing with a scoped drag lifecycle.
//!
//! A drag session exists strictly between a press on the bar and the matching
//! release. While it exists it holds a [`ListenerGuard`]: the orchestrator
//! keeps a window-wide pointer subscription alive for as long as the guard
//! lives, so the drag keeps tracking when the pointer leaves the bar. Ending
//! the drag, or dropping the session for any other reason, drops the guard.

use iced::Rectangle;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts the window-wide listeners currently attached.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry(Arc<AtomicUsize>);

impl ListenerRegistry {
    /// Attaches a listener; it stays attached until the guard is dropped.
    #[must_use]
    pub fn attach(&self) -> ListenerGuard {
        let attached = self.0.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::trace!(attached, "attached global drag listeners");
        ListenerGuard {
            registry: Arc::clone(&self.0),
        }
    }

    /// Number of listeners currently attached.
    #[must_use]
    pub fn attached(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}

/// Keeps a global listener attached while alive.
#[derive(Debug)]
pub struct ListenerGuard {
    registry: Arc<AtomicUsize>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let attached = self.registry.fetch_sub(1, Ordering::AcqRel) - 1;
        tracing::trace!(attached, "detached global drag listeners");
    }
}

/// An active drag on the progress bar.
#[derive(Debug)]
struct DragSession {
    bar: Rectangle,
    _listeners: ListenerGuard,
}

/// Scrub sub-component state.
#[derive(Debug, Default)]
pub struct State {
    registry: ListenerRegistry,
    session: Option<DragSession>,
}

/// Messages for the scrub sub-component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// Press on the bar at window coordinate `x`.
    Start { x: f32, bar: Rectangle },
    /// Pointer moved to window coordinate `x`.
    Move { x: f32, bar: Rectangle },
    /// Pointer released, lost, or the drag was cancelled.
    End,
}

/// Effects produced by scrubbing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// No effect.
    None,
    /// Seek to this fraction of the clip.
    Seek(f32),
    /// The drag ended.
    Released,
}

/// Converts a window `x` into a fraction of `bar`, clamping positions outside
/// the bar onto its ends. Degenerate bars yield `None`.
#[must_use]
pub fn fraction_on_bar(x: f32, bar: Rectangle) -> Option<f32> {
    if !bar.width.is_finite() || bar.width <= 0.0 || x.is_nan() {
        return None;
    }
    let offset = (x - bar.x).clamp(0.0, bar.width);
    Some(offset / bar.width)
}

impl State {
    #[must_use]
    pub fn new(registry: ListenerRegistry) -> Self {
        Self {
            registry,
            session: None,
        }
    }

    /// Handle a scrub message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Start { x, bar } => {
                if self.session.is_none() {
                    self.session = Some(DragSession {
                        bar,
                        _listeners: self.registry.attach(),
                    });
                }
                self.seek(x, bar)
            }
            Message::Move { x, bar } => {
                if self.session.is_none() {
                    return Effect::None;
                }
                self.seek(x, bar)
            }
            Message::End => {
                if self.session.take().is_some() {
                    Effect::Released
                } else {
                    Effect::None
                }
            }
        }
    }

    fn seek(&mut self, x: f32, bar: Rectangle) -> Effect {
        if let Some(session) = self.session.as_mut() {
            session.bar = bar;
        }
        fraction_on_bar(x, bar).map_or(Effect::None, Effect::Seek)
    }

    /// Returns true strictly between press and release.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Bounds of the bar being dragged, used to map window-wide moves.
    #[must_use]
    pub fn active_bar(&self) -> Option<Rectangle> {
        self.session.as_ref().map(|session| session.bar)
    }

    #[must_use]
    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }
}
