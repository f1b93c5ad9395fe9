// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rgb::RGB8;

/// Colors at or above this relative luminance get a border accent so they stay visible on light backgrounds.
pub const LIGHT_LUMINANCE: f64 = 0.5;

const SIGNIFICANT_DIGITS: i32 = 3;
const MAX_FRACTION_DIGITS: i32 = 3;

/// Relative luminance of an sRGB color given by channel, in `[0, 1]`.
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
	relative_luminance(RGB8::new(r, g, b))
}

pub fn relative_luminance(color: RGB8) -> f64 {
	::contrast::luminance::<_, f64>(color)
}

/// WCAG contrast ratio between two colors. Order doesn't matter; the result is in `[1, 21]`.
pub fn contrast_ratio(first: RGB8, second: RGB8) -> f64 {
	::contrast::contrast::<_, f64>(first, second)
}

/// Contrast ratio over a list of colors. Only a pair has a ratio; every other length is degenerate and gives 0.
pub fn contrast_of(colors: &[RGB8]) -> f64 {
	match colors {
		[first, second] => contrast_ratio(*first, *second),
		_ => 0.0,
	}
}

/// Whether a color is light enough to need a border accent.
pub fn is_light(color: RGB8) -> bool {
	relative_luminance(color) >= LIGHT_LUMINANCE
}

/// Formats a number with at most three significant digits and three fraction digits, dropping trailing zeros.
pub fn format_ratio(value: f64) -> String {
	if !value.is_finite() {
		return value.to_string();
	}
	if value == 0.0 {
		return String::from("0");
	}

	let integer_digits = value.abs().log10().floor() as i32 + 1;
	let fraction_digits = (SIGNIFICANT_DIGITS - integer_digits).clamp(0, MAX_FRACTION_DIGITS) as usize;
	let text = format!("{:.*}", fraction_digits, value);
	if text.contains('.') {
		text.trim_end_matches('0').trim_end_matches('.').to_string()
	} else {
		text
	}
}

/// Formats a `[0, 1]` fraction as a percentage, e.g. `0.2126` as `21.3%`.
pub fn format_percentage(value: f64) -> String {
	format!("{}%", format_ratio(value * 100.0))
}
