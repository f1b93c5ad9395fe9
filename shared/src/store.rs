// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::Config;
use crate::query::{decode, encode, DecodedQuery, SharedState};
use crate::state::{reduce, Action, AppState};

/// Where the shareable state lives between sessions.
///
/// `save` is called synchronously after each persisting transition and must not block; implementations defer and
/// coalesce the actual write as they see fit.
pub trait Persistence {
	fn load(&self) -> DecodedQuery;
	fn save(&mut self, state: &AppState);
}

/// Persistence kept in memory, recording every query string it's asked to write.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
	initial_query: String,
	saved: Vec<String>,
}

impl MemoryPersistence {
	pub fn new(initial_query: impl Into<String>) -> Self {
		Self {
			initial_query: initial_query.into(),
			saved: Vec::new(),
		}
	}

	pub fn saved(&self) -> &[String] {
		&self.saved
	}

	pub fn last_saved(&self) -> Option<&str> {
		self.saved.last().map(String::as_str)
	}
}

impl Persistence for MemoryPersistence {
	fn load(&self) -> DecodedQuery {
		decode(&self.initial_query)
	}

	fn save(&mut self, state: &AppState) {
		self.saved.push(encode(&SharedState::from(state)));
	}
}

/// Holds the current state and runs actions through the reducer, handing persisting changes to the port.
pub struct Store<P> {
	state: AppState,
	persistence: P,
}

impl<P: Persistence> Store<P> {
	/// Seeds the state from the persistence port, using the configured palette for anything missing.
	pub fn open(persistence: P, config: &Config) -> Self {
		let decoded = persistence.load();
		if decoded.restored {
			log::debug!("Restoring state from a previous session");
		}
		let state = AppState::restore(decoded, &config.default_palette);
		Self { state, persistence }
	}

	pub fn state(&self) -> &AppState {
		&self.state
	}

	pub fn persistence(&self) -> &P {
		&self.persistence
	}

	pub fn dispatch(&mut self, action: Action) -> &AppState {
		let persists = action.persists();
		let next = reduce(&self.state, action);
		let changed = next != self.state;
		self.state = next;

		if persists && changed {
			self.persistence.save(&self.state);
		}
		&self.state
	}
}
