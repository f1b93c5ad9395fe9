// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use sycamore::prelude::*;
use wasm_bindgen::JsValue;

/// Failures reaching the parts of the browser the grid depends on.
#[derive(Debug)]
pub enum ClientError {
	MissingWindow,
	MissingDocument,
	MissingCanvasContext,
	Js(String),
}

impl From<JsValue> for ClientError {
	fn from(value: JsValue) -> Self {
		let description = value.as_string().unwrap_or_else(|| format!("{:?}", value));
		Self::Js(description)
	}
}

impl fmt::Display for ClientError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::MissingWindow => write!(f, "The browser window isn't available"),
			Self::MissingDocument => write!(f, "The page document isn't available"),
			Self::MissingCanvasContext => write!(f, "A 2D canvas context couldn't be created"),
			Self::Js(description) => write!(f, "The browser reported an error: {}", description),
		}
	}
}

impl std::error::Error for ClientError {}

pub fn render_error_message(message: &'static str, error: impl fmt::Display) {
	let error_display = error.to_string();
	sycamore::render(|ctx| {
		view! {
			ctx,
			div(id="app_error") {
				(message)
				br {}
				(error_display)
			}
		}
	});
}
