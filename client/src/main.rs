// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use contrast_grid_shared::store::Store;
use sycamore::prelude::*;

mod app;
mod canvas;
mod config;
mod error;
mod history;
use app::App;
use canvas::CanvasColorResolver;
use config::load_config;
use error::render_error_message;
use history::HistoryPersistence;

fn main() {
	console_error_panic_hook::set_once();
	wasm_logger::init(wasm_logger::Config::default());

	let config = load_config();
	let resolver = match CanvasColorResolver::new() {
		Ok(resolver) => resolver,
		Err(error) => {
			render_error_message("Unable to load: colors can't be resolved in this browser", error);
			return;
		}
	};
	let store = Store::open(HistoryPersistence::new(&config), &config);
	log::debug!("Starting with {} colors", store.state().colors.len());

	sycamore::render(|ctx| {
		view! {
			ctx,
			App(store=store, resolver=resolver)
		}
	});
}
