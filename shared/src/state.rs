// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::query::DecodedQuery;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// How each contrast cell is drawn.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Comparison {
	/// A tile split diagonally between the two colors
	#[default]
	Swatch,
	/// One color as text-style highlights over the other as background
	Type,
}

impl Comparison {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Swatch => "swatch",
			Self::Type => "type",
		}
	}
}

#[derive(Debug, Eq, PartialEq)]
pub struct ComparisonParseError(pub String);

impl fmt::Display for ComparisonParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown comparison mode: {}", self.0)
	}
}

impl Error for ComparisonParseError {}

impl FromStr for Comparison {
	type Err = ComparisonParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"swatch" => Ok(Self::Swatch),
			"type" => Ok(Self::Type),
			other => Err(ComparisonParseError(other.to_string())),
		}
	}
}

/// The threshold below which contrast cells are flagged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MinimumContrast {
	#[default]
	NotSet,
	Invalid,
	Ratio(f64),
}

impl MinimumContrast {
	/// Interprets threshold text typed by the user. Blank text unsets the threshold; text that isn't a finite number
	/// becomes [`MinimumContrast::Invalid`].
	pub fn from_input(text: &str) -> Self {
		let text = text.trim();
		if text.is_empty() {
			return Self::NotSet;
		}
		match text.parse::<f64>() {
			Ok(ratio) if ratio.is_finite() => Self::Ratio(ratio),
			_ => Self::Invalid,
		}
	}

	/// Whether a raw (unrounded) ratio falls at or below the threshold.
	pub fn flags(&self, ratio: f64) -> bool {
		match self {
			Self::Ratio(minimum) => ratio <= *minimum,
			Self::NotSet | Self::Invalid => false,
		}
	}
}

/// One immutable snapshot of everything the grid shows.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
	/// Never empty; an empty string is a placeholder entry.
	pub colors: Vec<String>,
	/// Comments for colors, keyed by color text. Only non-empty comments are kept.
	pub titles: BTreeMap<String, String>,
	pub grayscale: bool,
	pub comparison: Comparison,
	pub minimum_contrast: MinimumContrast,
	pub bulk_edit_value: String,
}

impl AppState {
	/// Builds the starting state from whatever a shared link carried, falling back to the palette.
	pub fn restore(decoded: DecodedQuery, default_palette: &[String]) -> Self {
		let colors = match decoded.colors {
			Some(colors) if !colors.is_empty() => colors,
			_ if default_palette.is_empty() => vec![String::new()],
			_ => default_palette.to_vec(),
		};
		let bulk_edit_value = colors.join("\n");

		Self {
			colors,
			titles: decoded.titles.unwrap_or_default(),
			grayscale: decoded.grayscale,
			comparison: Comparison::default(),
			minimum_contrast: MinimumContrast::default(),
			bulk_edit_value,
		}
	}

	/// The label for a color: its title when it has one, else the color text itself.
	pub fn title_for<'a>(&'a self, color: &'a str) -> &'a str {
		self.titles.get(color).map(String::as_str).unwrap_or(color)
	}
}

/// A replacement for one of the simple settings fields.
#[derive(Clone, Debug, PartialEq)]
pub enum Update {
	MinimumContrast(MinimumContrast),
	Comparison(Comparison),
	Grayscale(bool),
	BulkEditValue(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
	/// Puts a new blank entry at the front of the list
	AddColor,
	RemoveColor(usize),
	EditColor { index: usize, value: String },
	/// Copies the current colors into the bulk edit text
	BulkEditExistingColors,
	/// Replaces the colors and titles with what's in the bulk edit text
	BulkAddColors,
	Update(Update),
}

impl Action {
	/// Whether applying this action changes anything the shareable link carries.
	pub fn persists(&self) -> bool {
		match self {
			Self::AddColor | Self::RemoveColor(_) | Self::EditColor { .. } | Self::BulkAddColors => true,
			Self::Update(Update::Grayscale(_)) => true,
			Self::BulkEditExistingColors | Self::Update(_) => false,
		}
	}
}

/// Splits a bulk edit line into its color and its ` #comment`, if any.
///
/// The comment starts at the first `#` preceded by whitespace, so `#fff #base` is the color `#fff` with the
/// comment `base`.
pub fn parse_bulk_line(line: &str) -> Option<(String, Option<String>)> {
	let line = line.trim();
	let mut previous_is_space = false;
	let mut split = None;
	for (position, character) in line.char_indices() {
		if character == '#' && previous_is_space {
			split = Some(position);
			break;
		}
		previous_is_space = character.is_whitespace();
	}

	let (color, comment) = match split {
		Some(position) => (&line[..position], Some(&line[position + 1..])),
		None => (line, None),
	};

	let color = color.trim();
	if color.is_empty() {
		return None;
	}
	let comment = comment.map(str::trim).filter(|comment| !comment.is_empty());
	Some((color.to_string(), comment.map(String::from)))
}

/// Applies an action, producing the next snapshot. The previous snapshot is left untouched.
pub fn reduce(state: &AppState, action: Action) -> AppState {
	log::debug!("Applying {:?}", action);

	match action {
		Action::AddColor => {
			let mut colors = Vec::with_capacity(state.colors.len() + 1);
			colors.push(String::new());
			colors.extend(state.colors.iter().cloned());
			AppState { colors, ..state.clone() }
		}
		Action::RemoveColor(index) => {
			let colors = if state.colors.len() > 1 {
				state
					.colors
					.iter()
					.enumerate()
					.filter(|(color_index, _)| *color_index != index)
					.map(|(_, color)| color.clone())
					.collect()
			} else {
				vec![String::new()]
			};
			AppState { colors, ..state.clone() }
		}
		Action::EditColor { index, value } => {
			if index >= state.colors.len() {
				log::warn!("Ignoring edit of color {} in a list of {}", index, state.colors.len());
				return state.clone();
			}
			let mut colors = state.colors.clone();
			colors[index] = value;
			AppState { colors, ..state.clone() }
		}
		Action::BulkEditExistingColors => AppState {
			bulk_edit_value: state.colors.join("\n"),
			..state.clone()
		},
		Action::BulkAddColors => {
			let mut colors = Vec::new();
			let mut titles = BTreeMap::new();
			for (color, comment) in state.bulk_edit_value.lines().filter_map(parse_bulk_line) {
				if let Some(comment) = comment {
					titles.insert(color.clone(), comment);
				}
				colors.push(color);
			}
			if colors.is_empty() {
				colors.push(String::new());
			}

			AppState {
				colors,
				titles,
				bulk_edit_value: state.bulk_edit_value.trim().to_string(),
				..state.clone()
			}
		}
		Action::Update(update) => {
			let mut next = state.clone();
			match update {
				Update::MinimumContrast(minimum_contrast) => next.minimum_contrast = minimum_contrast,
				Update::Comparison(comparison) => next.comparison = comparison,
				Update::Grayscale(grayscale) => next.grayscale = grayscale,
				Update::BulkEditValue(bulk_edit_value) => next.bulk_edit_value = bulk_edit_value,
			}
			next
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state_with(colors: &[&str]) -> AppState {
		AppState {
			colors: colors.iter().map(|color| color.to_string()).collect(),
			titles: BTreeMap::new(),
			grayscale: false,
			comparison: Comparison::Swatch,
			minimum_contrast: MinimumContrast::NotSet,
			bulk_edit_value: String::new(),
		}
	}

	#[test]
	fn add_color_prepends_blank() {
		let state = state_with(&["red", "blue"]);
		let next = reduce(&state, Action::AddColor);
		assert_eq!(next.colors, vec!["", "red", "blue"]);
		assert_eq!(state.colors, vec!["red", "blue"]);
	}

	#[test]
	fn remove_color_drops_the_index() {
		let state = state_with(&["red", "blue", "red"]);
		let next = reduce(&state, Action::RemoveColor(2));
		assert_eq!(next.colors, vec!["red", "blue"]);
		let unchanged = reduce(&state, Action::RemoveColor(7));
		assert_eq!(unchanged.colors, state.colors);
	}

	#[test]
	fn removing_the_last_color_leaves_a_placeholder() {
		let state = state_with(&["red"]);
		let next = reduce(&state, Action::RemoveColor(0));
		assert_eq!(next.colors, vec![""]);
		let again = reduce(&next, Action::RemoveColor(0));
		assert_eq!(again.colors, vec![""]);
	}

	#[test]
	fn edit_color_replaces_only_that_entry() {
		let mut state = state_with(&["#000", "", "#fff"]);
		state.titles.insert(String::from("#000"), String::from("ink"));
		state.minimum_contrast = MinimumContrast::Ratio(3.0);
		let next = reduce(
			&state,
			Action::EditColor {
				index: 1,
				value: String::from("#ff00ff"),
			},
		);
		assert_eq!(next.colors, vec!["#000", "#ff00ff", "#fff"]);
		assert_eq!(next.titles, state.titles);
		assert_eq!(next.minimum_contrast, state.minimum_contrast);
		assert_eq!(next.bulk_edit_value, state.bulk_edit_value);
	}

	#[test]
	fn edit_color_accepts_invalid_text() {
		let state = state_with(&["red"]);
		let next = reduce(
			&state,
			Action::EditColor {
				index: 0,
				value: String::from("definitely not a color"),
			},
		);
		assert_eq!(next.colors, vec!["definitely not a color"]);
	}

	#[test]
	fn edit_color_out_of_range_is_ignored() {
		let state = state_with(&["red"]);
		let next = reduce(
			&state,
			Action::EditColor {
				index: 3,
				value: String::from("blue"),
			},
		);
		assert_eq!(next, state);
	}

	#[test]
	fn bulk_edit_existing_copies_colors() {
		let state = state_with(&["red", "", "#abc"]);
		let next = reduce(&state, Action::BulkEditExistingColors);
		assert_eq!(next.bulk_edit_value, "red\n\n#abc");
		assert_eq!(next.colors, state.colors);
	}

	#[test]
	fn bulk_add_parses_colors_and_comments() {
		let mut state = state_with(&["green"]);
		state.bulk_edit_value = String::from("red\nblue #primary\n\n  ");
		let next = reduce(&state, Action::BulkAddColors);
		assert_eq!(next.colors, vec!["red", "blue"]);
		assert_eq!(next.titles.len(), 1);
		assert_eq!(next.titles.get("blue").map(String::as_str), Some("primary"));
		assert_eq!(next.bulk_edit_value, "red\nblue #primary");
	}

	#[test]
	fn bulk_add_keeps_duplicates_in_order() {
		let mut state = state_with(&[""]);
		state.bulk_edit_value = String::from("#fff #paper\n  #000\n#fff\nred #\n");
		let next = reduce(&state, Action::BulkAddColors);
		assert_eq!(next.colors, vec!["#fff", "#000", "#fff", "red"]);
		assert_eq!(next.titles.get("#fff").map(String::as_str), Some("paper"));
		assert!(!next.titles.contains_key("red"));
	}

	#[test]
	fn bulk_add_with_nothing_usable_leaves_a_placeholder() {
		let mut state = state_with(&["red", "blue"]);
		state.titles.insert(String::from("red"), String::from("alarm"));
		state.bulk_edit_value = String::from("\n   \n\t\n");
		let next = reduce(&state, Action::BulkAddColors);
		assert_eq!(next.colors, vec![""]);
		assert!(next.titles.is_empty());
	}

	#[test]
	fn bulk_lines_split_on_whitespace_then_hash() {
		assert_eq!(parse_bulk_line("#fff"), Some((String::from("#fff"), None)));
		assert_eq!(
			parse_bulk_line("  #fff\t#base tone "),
			Some((String::from("#fff"), Some(String::from("base tone"))))
		);
		assert_eq!(
			parse_bulk_line("rgb(1, 2, 3) #a # b"),
			Some((String::from("rgb(1, 2, 3)"), Some(String::from("a # b"))))
		);
		assert_eq!(parse_bulk_line("   "), None);
		assert_eq!(parse_bulk_line(" #note"), Some((String::from("#note"), None)));
	}

	#[test]
	fn updates_replace_one_field() {
		let state = state_with(&["red"]);
		let next = reduce(&state, Action::Update(Update::Comparison(Comparison::Type)));
		assert_eq!(next.comparison, Comparison::Type);
		let next = reduce(&next, Action::Update(Update::Grayscale(true)));
		assert!(next.grayscale);
		let next = reduce(&next, Action::Update(Update::MinimumContrast(MinimumContrast::Ratio(4.5))));
		assert_eq!(next.minimum_contrast, MinimumContrast::Ratio(4.5));
		let next = reduce(&next, Action::Update(Update::BulkEditValue(String::from("a\nb"))));
		assert_eq!(next.bulk_edit_value, "a\nb");
		assert_eq!(next.colors, state.colors);
	}

	#[test]
	fn threshold_flags_at_or_below() {
		let minimum = MinimumContrast::Ratio(4.5);
		assert!(minimum.flags(4.0));
		assert!(minimum.flags(4.5));
		assert!(!minimum.flags(4.6));
		assert!(!MinimumContrast::NotSet.flags(1.0));
		assert!(!MinimumContrast::Invalid.flags(1.0));
	}

	#[test]
	fn threshold_input_parsing() {
		assert_eq!(MinimumContrast::from_input(""), MinimumContrast::NotSet);
		assert_eq!(MinimumContrast::from_input("  "), MinimumContrast::NotSet);
		assert_eq!(MinimumContrast::from_input("4.5"), MinimumContrast::Ratio(4.5));
		assert_eq!(MinimumContrast::from_input(" 7 "), MinimumContrast::Ratio(7.0));
		assert_eq!(MinimumContrast::from_input("4.5:1"), MinimumContrast::Invalid);
		assert_eq!(MinimumContrast::from_input("NaN"), MinimumContrast::Invalid);
	}

	#[test]
	fn comparison_names() {
		assert_eq!("type".parse::<Comparison>(), Ok(Comparison::Type));
		assert_eq!(Comparison::Swatch.as_str().parse::<Comparison>(), Ok(Comparison::Swatch));
		assert!("grid".parse::<Comparison>().is_err());
	}

	#[test]
	fn persisting_actions() {
		assert!(Action::AddColor.persists());
		assert!(Action::BulkAddColors.persists());
		assert!(Action::Update(Update::Grayscale(true)).persists());
		assert!(!Action::BulkEditExistingColors.persists());
		assert!(!Action::Update(Update::BulkEditValue(String::new())).persists());
	}

	#[test]
	fn restore_falls_back_to_palette() {
		let palette = vec![String::from("blue"), String::from("yellow")];
		let state = AppState::restore(DecodedQuery::default(), &palette);
		assert_eq!(state.colors, palette);
		assert_eq!(state.bulk_edit_value, "blue\nyellow");
		assert!(state.titles.is_empty());
		assert!(!state.grayscale);

		let restored = AppState::restore(
			DecodedQuery {
				colors: Some(vec![String::from("#000")]),
				titles: None,
				grayscale: true,
				restored: true,
			},
			&palette,
		);
		assert_eq!(restored.colors, vec!["#000"]);
		assert!(restored.grayscale);
	}

	#[test]
	fn titles_label_colors() {
		let mut state = state_with(&["red"]);
		state.titles.insert(String::from("red"), String::from("alarm"));
		assert_eq!(state.title_for("red"), "alarm");
		assert_eq!(state.title_for("blue"), "blue");
	}
}
