// SPDX-License-Identifier: MPL-2.0
//! Full-screen media viewer: session orchestration and rendering.

pub mod component;
pub mod pane;
pub mod subcomponents;
pub mod surfaces;
pub mod video_controls;
