// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rgb::RGB8;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Inputs that are allowed to resolve to black. Anything else that comes out black is treated as a typo.
const BLACK_LITERALS: [&str; 3] = ["black", "#000", "#000000"];

#[derive(Debug, Eq, PartialEq)]
pub enum HexParseError {
	InvalidLength,
	InvalidDigit(char),
}

impl fmt::Display for HexParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidLength => write!(f, "color value is an invalid length"),
			Self::InvalidDigit(digit) => write!(f, "color value contains a non-hex digit: {:?}", digit),
		}
	}
}

impl Error for HexParseError {}

/// A color in its canonical `#rrggbb` form.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HexColor(RGB8);

impl HexColor {
	pub const BLACK: HexColor = HexColor(RGB8::new(0, 0, 0));
	pub const WHITE: HexColor = HexColor(RGB8::new(255, 255, 255));

	pub fn new(color: RGB8) -> Self {
		Self(color)
	}

	pub fn rgb(&self) -> RGB8 {
		self.0
	}
}

impl From<RGB8> for HexColor {
	fn from(color: RGB8) -> Self {
		Self(color)
	}
}

/// Parses `#rrggbb` or `#rgb`, with the leading `#` optional.
impl FromStr for HexColor {
	type Err = HexParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let digits = s.strip_prefix('#').unwrap_or(s);

		let mut nibbles: Vec<u8> = Vec::with_capacity(6);
		for digit in digits.chars() {
			let value = digit.to_digit(16).ok_or(HexParseError::InvalidDigit(digit))?;
			nibbles.push(value as u8);
		}

		let color = match nibbles.as_slice() {
			[r, g, b] => RGB8::new(r * 17, g * 17, b * 17),
			[r1, r2, g1, g2, b1, b2] => RGB8::new(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2),
			_ => return Err(HexParseError::InvalidLength),
		};
		Ok(Self(color))
	}
}

impl fmt::Display for HexColor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.0.r, self.0.g, self.0.b)
	}
}

/// Resolves arbitrary CSS color text to an RGB value.
///
/// Implementations may be strict (returning `None` for anything they can't parse) or lenient in the way a
/// browser canvas is, where unparseable input leaves the fill black. [`validate`] handles both.
pub trait ColorResolver {
	fn resolve(&self, input: &str) -> Option<RGB8>;
}

impl<R: ColorResolver + ?Sized> ColorResolver for &R {
	fn resolve(&self, input: &str) -> Option<RGB8> {
		(**self).resolve(input)
	}
}

/// Resolves colors with CSS Color Module parsing rules: hex, named colors, `rgb()`, `hsl()` and `hwb()`.
/// Alpha is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct CssColorResolver;

impl ColorResolver for CssColorResolver {
	fn resolve(&self, input: &str) -> Option<RGB8> {
		let input = input.trim();
		if input.starts_with('#') {
			if let Ok(color) = input.parse::<HexColor>() {
				return Some(color.rgb());
			}
		} else if input.bytes().all(|b| b.is_ascii_hexdigit()) {
			// CSS requires the #; only pasted text gets it added
			return None;
		}

		let color = csscolorparser::parse(input).ok()?;
		let [r, g, b, _] = color.to_rgba8();
		Some(RGB8::new(r, g, b))
	}
}

fn is_black_literal(input: &str) -> bool {
	BLACK_LITERALS.iter().any(|literal| literal.eq_ignore_ascii_case(input))
}

/// Validates user-typed color text, returning its canonical hex form.
///
/// Never fails loudly: empty, malformed, or suspicious input yields `None`. Input that resolves to black without
/// actually naming black is rejected, since lenient resolvers coerce typos to black.
pub fn validate<R: ColorResolver + ?Sized>(input: &str, resolver: &R) -> Option<HexColor> {
	let input = input.trim();
	if input.is_empty() {
		return None;
	}

	let color = HexColor(resolver.resolve(input)?);
	if color == HexColor::BLACK && !is_black_literal(input) {
		log::trace!("Rejecting color {:?}: it resolved to black without naming black", input);
		return None;
	}
	Some(color)
}

/// Adds the missing `#` to bare 3- or 6-digit hex codes. Used for pasted text.
pub fn normalize_hex(raw: &str) -> String {
	let lowered = raw.to_ascii_lowercase();
	if raw.starts_with('#') || lowered.starts_with("rgb") || lowered.starts_with("hsl") {
		return raw.to_string();
	}

	if matches!(raw.len(), 3 | 6) && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
		format!("#{}", raw)
	} else {
		raw.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Mimics a canvas fill: anything unknown paints black.
	struct CanvasLikeResolver;

	impl ColorResolver for CanvasLikeResolver {
		fn resolve(&self, input: &str) -> Option<RGB8> {
			Some(CssColorResolver.resolve(input).unwrap_or(RGB8::new(0, 0, 0)))
		}
	}

	/// Knows only a handful of names and maps "gray" to black, like a broken engine would.
	struct GrayIsBlackResolver;

	impl ColorResolver for GrayIsBlackResolver {
		fn resolve(&self, input: &str) -> Option<RGB8> {
			match input {
				"gray" | "black" | "#000" => Some(RGB8::new(0, 0, 0)),
				_ => None,
			}
		}
	}

	#[test]
	fn parses_six_digit_hex() {
		let color: HexColor = "#1e293b".parse().unwrap();
		assert_eq!(color.rgb(), RGB8::new(0x1e, 0x29, 0x3b));
		assert_eq!("FFaa00".parse::<HexColor>().unwrap().rgb(), RGB8::new(255, 170, 0));
	}

	#[test]
	fn parses_three_digit_hex_by_doubling() {
		let color: HexColor = "#f80".parse().unwrap();
		assert_eq!(color.rgb(), RGB8::new(0xff, 0x88, 0x00));
	}

	#[test]
	fn rejects_bad_hex() {
		assert_eq!("#ff00".parse::<HexColor>(), Err(HexParseError::InvalidLength));
		assert_eq!("".parse::<HexColor>(), Err(HexParseError::InvalidLength));
		assert_eq!("#gg0000".parse::<HexColor>(), Err(HexParseError::InvalidDigit('g')));
		assert_eq!("#+f+f+f".parse::<HexColor>(), Err(HexParseError::InvalidDigit('+')));
	}

	#[test]
	fn displays_canonical_form() {
		assert_eq!(HexColor::new(RGB8::new(255, 0, 171)).to_string(), "#ff00ab");
		assert_eq!("#FFF".parse::<HexColor>().unwrap().to_string(), "#ffffff");
	}

	#[test]
	fn black_spellings_agree() {
		let named = validate("black", &CssColorResolver);
		let short = validate("#000", &CssColorResolver);
		assert_eq!(named, Some(HexColor::BLACK));
		assert_eq!(named, short);
		assert_eq!(validate("#000000", &CssColorResolver), Some(HexColor::BLACK));
		assert_eq!(validate("  BLACK ", &CssColorResolver), Some(HexColor::BLACK));
	}

	#[test]
	fn implicit_black_is_rejected() {
		assert_eq!(validate("gray", &GrayIsBlackResolver), None);
		assert_eq!(validate("black", &GrayIsBlackResolver), Some(HexColor::BLACK));
		assert_eq!(validate("rgb(0, 0, 0)", &CssColorResolver), None);
		assert_eq!(validate("blakc", &CanvasLikeResolver), None);
	}

	#[test]
	fn resolves_css_syntaxes() {
		assert_eq!(validate("gray", &CssColorResolver), Some(HexColor::new(RGB8::new(128, 128, 128))));
		assert_eq!(validate("rgb(255, 0, 0)", &CssColorResolver), Some(HexColor::new(RGB8::new(255, 0, 0))));
		assert_eq!(validate("hsl(0, 0%, 100%)", &CssColorResolver), Some(HexColor::WHITE));
	}

	#[test]
	fn bare_hex_needs_its_hash() {
		assert_eq!(validate("bad", &CssColorResolver), None);
		assert_eq!(validate("ff0000", &CssColorResolver), None);
		assert_eq!(validate("123", &CssColorResolver), None);
		assert_eq!(validate("cafe", &CssColorResolver), None);
		assert_eq!(validate("#ff0000", &CssColorResolver), Some(HexColor::new(RGB8::new(255, 0, 0))));
		assert_eq!(validate(&normalize_hex("bad"), &CssColorResolver), Some(HexColor::new(RGB8::new(0xbb, 0xaa, 0xdd))));
	}

	#[test]
	fn hex_with_alpha_still_resolves() {
		assert_eq!(validate("#ff000080", &CssColorResolver), Some(HexColor::new(RGB8::new(255, 0, 0))));
		assert_eq!(validate("#f008", &CssColorResolver), Some(HexColor::new(RGB8::new(255, 0, 0))));
	}

	#[test]
	fn malformed_input_is_invalid_not_an_error() {
		assert_eq!(validate("", &CssColorResolver), None);
		assert_eq!(validate("   ", &CssColorResolver), None);
		assert_eq!(validate("not a color", &CssColorResolver), None);
		assert_eq!(validate("#12", &CssColorResolver), None);
		assert_eq!(validate("🌈", &CanvasLikeResolver), None);
	}

	#[test]
	fn normalizes_bare_hex() {
		assert_eq!(normalize_hex("ff00ff"), "#ff00ff");
		assert_eq!(normalize_hex("abc"), "#abc");
		assert_eq!(normalize_hex("#abc"), "#abc");
		assert_eq!(normalize_hex("rgb(1, 2, 3)"), "rgb(1, 2, 3)");
		assert_eq!(normalize_hex("HSL(1, 2%, 3%)"), "HSL(1, 2%, 3%)");
		assert_eq!(normalize_hex("red"), "red");
		assert_eq!(normalize_hex("abcd"), "abcd");
		assert_eq!(normalize_hex("bad"), "#bad");
	}
}
