// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color contrast grid logic shared by every host of the contrast grid.
//!
//! The crate holds everything with real behavior: resolving user-typed colors,
//! luminance and contrast math, building the contrast matrix, the state reducer,
//! and the query-string encoding used to share a grid. Hosts plug in a
//! [`color::ColorResolver`] and a [`store::Persistence`] port and render the plain
//! data handed back to them.

pub mod coalesce;
pub mod color;
pub mod config;
pub mod contrast;
pub mod matrix;
pub mod query;
pub mod state;
pub mod store;
