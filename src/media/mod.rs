// SPDX-License-Identifier: MPL-2.0
//! Media retrieval for the viewer.

pub mod artwork;
