// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use contrast_grid_shared::config::Config;

/// Element holding the optional JSON configuration document
const CONFIG_ELEMENT_ID: &str = "contrast-grid-config";

/// Loads the configuration embedded in the page, falling back to defaults.
pub fn load_config() -> Config {
	let config_text = web_sys::window()
		.and_then(|window| window.document())
		.and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
		.and_then(|element| element.text_content());
	let Some(config_text) = config_text else {
		return Config::default();
	};

	match serde_json::from_str(&config_text) {
		Ok(config) => config,
		Err(error) => {
			log::warn!("Ignoring malformed page configuration: {}", error);
			Config::default()
		}
	}
}
