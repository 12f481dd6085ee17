// SPDX-License-Identifier: MPL-2.0
//! A media element that records commands and answers play requests from a
//! script. Used by tests and benches to drive the viewer without a platform
//! player.

use super::element::{MediaElement, PlayOutcome};
use futures_util::future::{BoxFuture, FutureExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// A command issued to the element.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    SetMuted(bool),
    Unload,
}

/// Shared, inspectable record of the commands an element received.
#[derive(Debug, Clone, Default)]
pub struct CommandLog(Arc<Mutex<Vec<Command>>>);

impl CommandLog {
    fn push(&self, command: Command) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command);
    }

    /// Returns a copy of every command received so far.
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent command, if any.
    #[must_use]
    pub fn last(&self) -> Option<Command> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Counts commands matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&Command) -> bool) -> usize {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|command| predicate(command))
            .count()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// Scripted element. Play requests are answered from a queue of outcomes,
/// falling back to a default outcome once the queue is empty.
#[derive(Debug)]
pub struct ScriptedElement {
    log: CommandLog,
    outcomes: VecDeque<PlayOutcome>,
    default_outcome: PlayOutcome,
}

impl ScriptedElement {
    /// Creates an element whose play requests all resolve.
    #[must_use]
    pub fn new() -> (Self, CommandLog) {
        Self::with_default_outcome(PlayOutcome::Resolved)
    }

    /// Creates an element answering every unscripted play request with `outcome`.
    #[must_use]
    pub fn with_default_outcome(outcome: PlayOutcome) -> (Self, CommandLog) {
        let log = CommandLog::default();
        let element = Self {
            log: log.clone(),
            outcomes: VecDeque::new(),
            default_outcome: outcome,
        };
        (element, log)
    }

    /// Queues the outcome of the next play request.
    #[must_use]
    pub fn then(mut self, outcome: PlayOutcome) -> Self {
        self.outcomes.push_back(outcome);
        self
    }
}

impl MediaElement for ScriptedElement {
    fn load(&mut self, url: &str) {
        self.log.push(Command::Load(url.to_string()));
    }

    fn play(&mut self) -> BoxFuture<'static, PlayOutcome> {
        self.log.push(Command::Play);
        let outcome = self
            .outcomes
            .pop_front()
            .unwrap_or_else(|| self.default_outcome.clone());
        futures_util::future::ready(outcome).boxed()
    }

    fn pause(&mut self) {
        self.log.push(Command::Pause);
    }

    fn seek(&mut self, position_secs: f64) {
        self.log.push(Command::Seek(position_secs));
    }

    fn set_muted(&mut self, muted: bool) {
        self.log.push(Command::SetMuted(muted));
    }

    fn unload(&mut self) {
        self.log.push(Command::Unload);
    }
}
