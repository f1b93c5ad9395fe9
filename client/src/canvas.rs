// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::ClientError;
use contrast_grid_shared::color::ColorResolver;
use rgb::RGB8;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const RESET_FILL: &str = "#000000";

/// Resolves colors with the browser's own CSS parser by painting a single canvas pixel and reading it back.
///
/// The canvas ignores fill styles it can't parse, so unknown input reads back as black.
pub struct CanvasColorResolver {
	context: CanvasRenderingContext2d,
}

impl CanvasColorResolver {
	pub fn new() -> Result<Self, ClientError> {
		let document = web_sys::window()
			.ok_or(ClientError::MissingWindow)?
			.document()
			.ok_or(ClientError::MissingDocument)?;
		let canvas: HtmlCanvasElement = document.create_element("canvas")?.unchecked_into();
		canvas.set_width(1);
		canvas.set_height(1);

		let context: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(ClientError::MissingCanvasContext)?
			.unchecked_into();
		Ok(Self { context })
	}

	fn paint(&self, input: &str) -> Result<RGB8, ClientError> {
		self.context.clear_rect(0.0, 0.0, 1.0, 1.0);
		self.context.set_fill_style(&JsValue::from_str(RESET_FILL));
		self.context.set_fill_style(&JsValue::from_str(input));
		self.context.fill_rect(0.0, 0.0, 1.0, 1.0);

		let pixel = self.context.get_image_data(0.0, 0.0, 1.0, 1.0)?.data();
		match pixel.0.as_slice() {
			[r, g, b, ..] => Ok(RGB8::new(*r, *g, *b)),
			_ => Err(ClientError::MissingCanvasContext),
		}
	}
}

impl ColorResolver for CanvasColorResolver {
	fn resolve(&self, input: &str) -> Option<RGB8> {
		match self.paint(input) {
			Ok(color) => Some(color),
			Err(error) => {
				log::warn!("Couldn't resolve color {:?} on the canvas: {}", input, error);
				None
			}
		}
	}
}
