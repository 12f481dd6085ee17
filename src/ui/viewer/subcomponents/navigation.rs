// SPDX-License-Identifier: MPL-2.0
//! Navigation sub-component: the current position in the media sequence.
//!
//! Navigation never wraps: advancing on the last item or retreating on the
//! first one is a no-op.

/// Navigation sub-component state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    current: usize,
    len: usize,
}

/// Messages for the navigation sub-component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Jump to an index.
    GoTo(usize),
    /// Move to the next item.
    Advance,
    /// Move to the previous item.
    Retreat,
}

/// Effects produced by navigation changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// No effect.
    None,
    /// The current index changed; per-item state must be rebuilt.
    IndexChanged { from: usize, to: usize },
}

impl State {
    /// Creates navigation over `len` items starting at `initial`.
    ///
    /// # Panics
    ///
    /// Panics if `initial` is not a valid index for `len` items. Callers
    /// validate the host's input before building a session.
    #[must_use]
    pub fn new(initial: usize, len: usize) -> Self {
        assert!(
            initial < len,
            "navigation index {initial} out of bounds for {len} items"
        );
        Self {
            current: initial,
            len,
        }
    }

    /// Handle a navigation message.
    ///
    /// # Panics
    ///
    /// Panics on `GoTo` with an index outside the sequence: hosts only jump
    /// to indices they were given, so this is a contract violation.
    pub fn handle(&mut self, msg: Message) -> Effect {
        let target = match msg {
            Message::GoTo(index) => {
                assert!(
                    index < self.len,
                    "navigation index {index} out of bounds for {} items",
                    self.len
                );
                index
            }
            Message::Advance => {
                if self.current + 1 < self.len {
                    self.current + 1
                } else {
                    self.current
                }
            }
            Message::Retreat => self.current.saturating_sub(1),
        };

        if target == self.current {
            return Effect::None;
        }

        let from = self.current;
        self.current = target;
        Effect::IndexChanged { from, to: target }
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.len
    }

    /// The "`index+1` / `total`" counter shown in the viewer chrome.
    #[must_use]
    pub fn counter_label(&self) -> String {
        format!("{} / {}", self.current + 1, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_forward() {
        let mut state = State::new(0, 3);
        let effect = state.handle(Message::Advance);
        assert_eq!(effect, Effect::IndexChanged { from: 0, to: 1 });
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn advance_at_last_item_is_noop() {
        let mut state = State::new(2, 3);
        let effect = state.handle(Message::Advance);
        assert_eq!(effect, Effect::None);
        assert_eq!(state.current(), 2);
    }

    #[test]
    fn retreat_at_first_item_is_noop() {
        let mut state = State::new(0, 3);
        let effect = state.handle(Message::Retreat);
        assert_eq!(effect, Effect::None);
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn go_to_same_index_is_noop() {
        let mut state = State::new(1, 3);
        assert_eq!(state.handle(Message::GoTo(1)), Effect::None);
    }

    #[test]
    fn go_to_jumps() {
        let mut state = State::new(0, 5);
        assert_eq!(
            state.handle(Message::GoTo(4)),
            Effect::IndexChanged { from: 0, to: 4 }
        );
        assert!(!state.has_next());
        assert!(state.has_previous());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn go_to_out_of_bounds_panics() {
        let mut state = State::new(0, 3);
        state.handle(Message::GoTo(3));
    }

    #[test]
    fn counter_reflects_current_index() {
        let mut state = State::new(0, 4);
        assert_eq!(state.counter_label(), "1 / 4");
        state.handle(Message::Advance);
        assert_eq!(state.counter_label(), "2 / 4");
    }

    #[test]
    fn single_item_sequence_never_moves() {
        let mut state = State::new(0, 1);
        assert_eq!(state.handle(Message::Advance), Effect::None);
        assert_eq!(state.handle(Message::Retreat), Effect::None);
        assert!(!state.has_next());
        assert!(!state.has_previous());
    }
}
