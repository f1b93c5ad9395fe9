// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::color::{validate, ColorResolver, HexColor};
use crate::contrast::{contrast_of, contrast_ratio, format_percentage, format_ratio, is_light, relative_luminance};
use crate::state::{AppState, Comparison, MinimumContrast};
use std::collections::BTreeMap;

/// Color text shorter than this is never compared; it's most likely still being typed.
const MIN_COLOR_LENGTH: usize = 3;

/// Luminance above which the luminance readout is drawn in black.
const READOUT_LUMINANCE: f64 = 0.5;

/// Which sides of a swatch get a border so light colors don't vanish into the page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BorderAccent {
	LightRow,
	LightColumn,
	LightBoth,
}

impl BorderAccent {
	fn for_sides(row_is_light: bool, column_is_light: bool) -> Option<Self> {
		match (row_is_light, column_is_light) {
			(true, true) => Some(Self::LightBoth),
			(true, false) => Some(Self::LightRow),
			(false, true) => Some(Self::LightColumn),
			(false, false) => None,
		}
	}

	pub fn class_name(&self) -> &'static str {
		match self {
			Self::LightRow => "light-row",
			Self::LightColumn => "light-column",
			Self::LightBoth => "light-both",
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadoutColor {
	Black,
	White,
}

impl ReadoutColor {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Black => "black",
			Self::White => "white",
		}
	}
}

fn ratio_label(ratio: f64) -> String {
	format!("{}:1", format_ratio(ratio))
}

fn pair_label(first: &str, second: &str) -> String {
	format!("({}, {})", second, first)
}

/// A tile split diagonally between the row color and the column color.
#[derive(Clone, Debug, PartialEq)]
pub struct SwatchCell {
	pub first: String,
	pub second: String,
	pub ratio: f64,
	pub below_threshold: bool,
	pub accent: Option<BorderAccent>,
}

impl SwatchCell {
	pub fn ratio_label(&self) -> String {
		ratio_label(self.ratio)
	}

	pub fn pair_label(&self) -> String {
		pair_label(&self.first, &self.second)
	}
}

/// A block in the column color with the row color as an inset highlight and readouts against black and white.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeCell {
	pub foreground: String,
	pub background: String,
	pub ratio: f64,
	pub black_ratio: f64,
	pub white_ratio: f64,
	/// Relative luminance of the background
	pub luminance: f64,
	pub below_threshold: bool,
	pub tooltip: String,
}

impl TypeCell {
	pub fn ratio_label(&self) -> String {
		ratio_label(self.ratio)
	}

	pub fn black_ratio_label(&self) -> String {
		ratio_label(self.black_ratio)
	}

	pub fn white_ratio_label(&self) -> String {
		ratio_label(self.white_ratio)
	}

	pub fn luminance_label(&self) -> String {
		format_percentage(self.luminance)
	}

	pub fn readout_color(&self) -> ReadoutColor {
		if self.luminance > READOUT_LUMINANCE {
			ReadoutColor::Black
		} else {
			ReadoutColor::White
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
	/// Nothing to compare; render an empty placeholder
	Placeholder,
	Swatch(SwatchCell),
	Type(TypeCell),
}

/// Every ordered `(row, column)` pair for a list of `count` colors, row by row.
pub fn pairs(count: usize) -> impl Iterator<Item = (usize, usize)> {
	(0..count).flat_map(move |row| (0..count).map(move |column| (row, column)))
}

/// The contrast grid for one state snapshot. Each color is validated once up front; cells are computed on demand.
pub struct ContrastMatrix<'a> {
	colors: &'a [String],
	validated: Vec<Option<HexColor>>,
	titles: &'a BTreeMap<String, String>,
	comparison: Comparison,
	minimum_contrast: MinimumContrast,
}

impl<'a> ContrastMatrix<'a> {
	pub fn new<R: ColorResolver + ?Sized>(state: &'a AppState, resolver: &R) -> Self {
		let validated = state
			.colors
			.iter()
			.map(|color| {
				if color.trim().chars().count() < MIN_COLOR_LENGTH {
					None
				} else {
					validate(color, resolver)
				}
			})
			.collect();

		Self {
			colors: &state.colors,
			validated,
			titles: &state.titles,
			comparison: state.comparison,
			minimum_contrast: state.minimum_contrast,
		}
	}

	/// Number of colors along each side.
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	pub fn cell(&self, row: usize, column: usize) -> Cell {
		let (Some(first), Some(second)) = (self.colors.get(row), self.colors.get(column)) else {
			return Cell::Placeholder;
		};
		if first == second {
			return Cell::Placeholder;
		}
		let (Some(first_color), Some(second_color)) = (self.validated[row], self.validated[column]) else {
			return Cell::Placeholder;
		};

		let first = first.trim().to_string();
		let second = second.trim().to_string();
		let ratio = contrast_of(&[first_color.rgb(), second_color.rgb()]);
		let below_threshold = self.minimum_contrast.flags(ratio);

		match self.comparison {
			Comparison::Swatch => Cell::Swatch(SwatchCell {
				accent: BorderAccent::for_sides(is_light(first_color.rgb()), is_light(second_color.rgb())),
				first,
				second,
				ratio,
				below_threshold,
			}),
			Comparison::Type => {
				let tooltip = self
					.titles
					.get(&second)
					.cloned()
					.unwrap_or_else(|| pair_label(&first, &second));
				Cell::Type(TypeCell {
					black_ratio: contrast_ratio(second_color.rgb(), HexColor::BLACK.rgb()),
					white_ratio: contrast_ratio(second_color.rgb(), HexColor::WHITE.rgb()),
					luminance: relative_luminance(second_color.rgb()),
					foreground: first,
					background: second,
					ratio,
					below_threshold,
					tooltip,
				})
			}
		}
	}

	/// All cells in row order, computed lazily.
	pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Cell)> + '_ {
		pairs(self.len()).map(move |(row, column)| ((row, column), self.cell(row, column)))
	}

	pub fn rows(&self) -> impl Iterator<Item = Vec<Cell>> + '_ {
		(0..self.len()).map(move |row| (0..self.len()).map(|column| self.cell(row, column)).collect())
	}
}
