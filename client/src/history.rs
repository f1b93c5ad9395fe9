// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::ClientError;
use chrono::Utc;
use contrast_grid_shared::coalesce::{Coalescer, Submission};
use contrast_grid_shared::config::Config;
use contrast_grid_shared::query::{decode, merge, DecodedQuery, SharedState};
use contrast_grid_shared::state::AppState;
use contrast_grid_shared::store::Persistence;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;

fn current_location() -> Result<(String, String), ClientError> {
	let location = web_sys::window().ok_or(ClientError::MissingWindow)?.location();
	Ok((location.pathname()?, location.search()?))
}

/// Pushes a history entry for the shared state without navigating.
fn push_state(shared: &SharedState) -> Result<(), ClientError> {
	let window = web_sys::window().ok_or(ClientError::MissingWindow)?;
	let (path, search) = current_location()?;
	let new_url = format!("{}?{}", path, merge(&search, shared));
	window.history()?.push_state_with_url(&JsValue::NULL, "", Some(&new_url))?;
	Ok(())
}

fn write_or_log(shared: &SharedState) {
	match push_state(shared) {
		Ok(()) => log::debug!("Wrote {} colors to the page URL", shared.colors.len()),
		Err(error) => log::error!("Failed to update the page URL: {}", error),
	}
}

/// Persists state in the page URL's query string, one history entry per coalescing window.
pub struct HistoryPersistence {
	coalescer: Rc<RefCell<Coalescer<SharedState>>>,
}

impl HistoryPersistence {
	pub fn new(config: &Config) -> Self {
		let coalescer = Coalescer::new(config.coalesce_window());
		Self {
			coalescer: Rc::new(RefCell::new(coalescer)),
		}
	}
}

impl Persistence for HistoryPersistence {
	fn load(&self) -> DecodedQuery {
		match current_location() {
			Ok((_, search)) => decode(&search),
			Err(error) => {
				log::warn!("Couldn't read the page URL, starting fresh: {}", error);
				DecodedQuery::default()
			}
		}
	}

	fn save(&mut self, state: &AppState) {
		let submission = self.coalescer.borrow_mut().submit(SharedState::from(state), Utc::now());
		match submission {
			// Written once the current event has finished being handled
			Submission::Immediate(shared) => {
				Timeout::new(0, move || write_or_log(&shared)).forget();
			}
			Submission::Deferred(delay) => {
				let coalescer = Rc::clone(&self.coalescer);
				let delay_ms = u32::try_from(delay.num_milliseconds().max(0)).unwrap_or(u32::MAX);
				Timeout::new(delay_ms, move || {
					let flushed = coalescer.borrow_mut().flush(Utc::now());
					if let Some(shared) = flushed {
						write_or_log(&shared);
					}
				})
				.forget();
			}
			Submission::Superseded | Submission::Unchanged => (),
		}
	}
}
