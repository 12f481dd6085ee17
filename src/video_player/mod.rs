// SPDX-License-Identifier: MPL-2.0
//! Media element port for IcedReel.
//!
//! The viewer drives clips through the [`MediaElement`] trait and reads the
//! platform's answers from [`ElementEvent`]s. Decoding is the platform's job;
//! this module only defines the seam and ships two implementations:
//!
//! - [`ScriptedElement`]: records commands, answers play requests from a script
//! - [`SimulatedElement`]: a clock that advances while playing, for the demo host

mod element;
pub mod scripted;
pub mod simulated;

pub use element::{ElementEvent, LoadToken, MediaElement, PlayOutcome};
pub use scripted::{Command, CommandLog, ScriptedElement};
pub use simulated::{SimulatedClock, SimulatedElement};
