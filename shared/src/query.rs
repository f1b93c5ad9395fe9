// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Encoding of the shareable part of the state into a URL query string.
//!
//! Three parameters are owned here:
//!
//! - `colors`: the color list joined by `|`
//! - `titles`: `color:::title` pairs joined by `|`, only for colors with a title
//! - `🌈`: present whenever the state came from a previous session. Its value is `✓` normally and empty when
//!   grayscale is on.
//!
//! Any other parameters in the query are left alone.

use crate::state::AppState;
use std::collections::BTreeMap;

pub const COLORS_PARAMETER: &str = "colors";
pub const TITLES_PARAMETER: &str = "titles";
pub const RESTORED_PARAMETER: &str = "🌈";

const RESTORED_COLOR_VALUE: &str = "✓";
const LIST_SEPARATOR: char = '|';
const TITLE_SEPARATOR: &str = ":::";
const ESCAPED_HASH: &str = "%23";

/// The parts of the state a shared link carries.
#[derive(Clone, Debug, PartialEq)]
pub struct SharedState {
	pub colors: Vec<String>,
	pub titles: BTreeMap<String, String>,
	pub grayscale: bool,
}

impl From<&AppState> for SharedState {
	fn from(state: &AppState) -> Self {
		Self {
			colors: state.colors.clone(),
			titles: state.titles.clone(),
			grayscale: state.grayscale,
		}
	}
}

/// What could be recovered from a query string. Missing or unusable fields are `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecodedQuery {
	pub colors: Option<Vec<String>>,
	pub titles: Option<BTreeMap<String, String>>,
	pub grayscale: bool,
	/// Whether the query was written by a previous session rather than being a first visit
	pub restored: bool,
}

fn is_owned_parameter(name: &str) -> bool {
	matches!(name, COLORS_PARAMETER | TITLES_PARAMETER | RESTORED_PARAMETER)
}

fn unescape_hashes(text: &str) -> String {
	text.replace(ESCAPED_HASH, "#")
}

fn encode_titles(titles: &BTreeMap<String, String>) -> String {
	let pairs: Vec<String> = titles
		.iter()
		.filter(|(_, title)| !title.is_empty())
		.map(|(color, title)| format!("{}{}{}", color, TITLE_SEPARATOR, title))
		.collect();
	pairs.join(&LIST_SEPARATOR.to_string())
}

/// An empty list only means something when a previous session wrote it: the single blank entry left after
/// removing every color.
fn decode_colors(value: &str, restored: bool) -> Option<Vec<String>> {
	if value.is_empty() {
		return restored.then(|| vec![String::new()]);
	}
	Some(unescape_hashes(value).split(LIST_SEPARATOR).map(String::from).collect())
}

fn decode_titles(value: &str) -> BTreeMap<String, String> {
	let mut titles = BTreeMap::new();
	for entry in value.split(LIST_SEPARATOR) {
		let Some((color, title)) = entry.split_once(TITLE_SEPARATOR) else {
			log::debug!("Skipping title entry without a separator: {:?}", entry);
			continue;
		};
		if title.is_empty() {
			continue;
		}
		titles.insert(unescape_hashes(color), title.to_string());
	}
	titles
}

/// Encodes the shared state as a query string (without the leading `?`).
pub fn encode(shared: &SharedState) -> String {
	merge("", shared)
}

/// Writes the shared state into an existing query string, replacing the parameters owned here and keeping the
/// rest in their original order.
pub fn merge(existing: &str, shared: &SharedState) -> String {
	let existing = existing.strip_prefix('?').unwrap_or(existing);

	let mut serializer = form_urlencoded::Serializer::new(String::new());
	for (name, value) in form_urlencoded::parse(existing.as_bytes()) {
		if !is_owned_parameter(&name) {
			serializer.append_pair(&name, &value);
		}
	}

	let restored_value = if shared.grayscale { "" } else { RESTORED_COLOR_VALUE };
	serializer.append_pair(RESTORED_PARAMETER, restored_value);
	serializer.append_pair(COLORS_PARAMETER, &shared.colors.join(&LIST_SEPARATOR.to_string()));
	let titles = encode_titles(&shared.titles);
	if !titles.is_empty() {
		serializer.append_pair(TITLES_PARAMETER, &titles);
	}

	serializer.finish()
}

/// Decodes a query string (with or without the leading `?`). Never fails; each field falls back on its own.
pub fn decode(query: &str) -> DecodedQuery {
	let query = query.strip_prefix('?').unwrap_or(query);
	let mut decoded = DecodedQuery::default();
	let mut colors_value = None;
	let mut seen_titles = false;

	for (name, value) in form_urlencoded::parse(query.as_bytes()) {
		match name.as_ref() {
			COLORS_PARAMETER if colors_value.is_none() => colors_value = Some(value),
			TITLES_PARAMETER if !seen_titles => {
				seen_titles = true;
				decoded.titles = Some(decode_titles(&value));
			}
			RESTORED_PARAMETER if !decoded.restored => {
				decoded.restored = true;
				decoded.grayscale = value.is_empty();
			}
			_ => (),
		}
	}

	decoded.colors = colors_value.and_then(|value| decode_colors(&value, decoded.restored));
	decoded
}
