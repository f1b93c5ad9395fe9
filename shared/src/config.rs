// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::Duration;
use serde::Deserialize;

/// The flag of Seychelles, shown when nobody has picked any colors yet.
pub const SEYCHELLES_FLAG_COLORS: [&str; 5] = ["blue", "yellow", "red", "white", "green"];

/// History writes are never held back longer than this, whatever the configuration says.
const MAX_COALESCE_MS: u64 = 60_000;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
	/// Minimum time between two history entries, in milliseconds
	pub history_coalesce_ms: u64,
	/// Colors for a first visit
	pub default_palette: Vec<String>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			history_coalesce_ms: 1000,
			default_palette: SEYCHELLES_FLAG_COLORS.iter().map(|color| color.to_string()).collect(),
		}
	}
}

impl Config {
	pub fn coalesce_window(&self) -> Duration {
		Duration::milliseconds(self.history_coalesce_ms.min(MAX_COALESCE_MS) as i64)
	}
}
