// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::canvas::CanvasColorResolver;
use crate::history::HistoryPersistence;
use contrast_grid_shared::color::normalize_hex;
use contrast_grid_shared::matrix::{Cell, ContrastMatrix};
use contrast_grid_shared::state::{Action, Comparison, MinimumContrast, Update};
use contrast_grid_shared::store::Store;
use std::cell::RefCell;
use sycamore::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, Event as WebEvent, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

const BELOW_THRESHOLD_CLASS: &str = "below-contrast-threshold";

/// Gets the current value of whichever form control fired the event.
fn target_value(event: &WebEvent) -> String {
	let Some(target) = event.target() else {
		return String::new();
	};
	if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
		input.value()
	} else if let Some(text_area) = target.dyn_ref::<HtmlTextAreaElement>() {
		text_area.value()
	} else if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
		select.value()
	} else {
		String::new()
	}
}

fn target_checked(event: &WebEvent) -> bool {
	event
		.target()
		.and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
		.map(|input| input.checked())
		.unwrap_or(false)
}

fn header_swatch<'a, G: Html>(
	ctx: Scope<'a>,
	color: &str,
	title: &str,
	index: usize,
	dispatch: impl Fn(Action) + Copy + 'a,
) -> View<G> {
	let style = format!("background-color: {}", color);
	let title = title.to_string();
	let remove_handler = move |_event: WebEvent| dispatch(Action::RemoveColor(index));
	view! {
		ctx,
		div(class="swatch removable", title=title, style=style, on:click=remove_handler)
	}
}

fn cell_view<G: Html>(ctx: Scope<'_>, cell: &Cell) -> View<G> {
	match cell {
		Cell::Placeholder => view! { ctx, div(class="placeholder") },
		Cell::Swatch(swatch) => {
			let mut class = String::from("swatch");
			if swatch.below_threshold {
				class.push(' ');
				class.push_str(BELOW_THRESHOLD_CLASS);
			}
			if let Some(accent) = swatch.accent {
				class.push(' ');
				class.push_str(accent.class_name());
			}
			let style = format!(
				"background: linear-gradient(45deg, {} 50%, {} 50%)",
				swatch.first, swatch.second
			);
			let title = swatch.pair_label();
			let ratio = swatch.ratio_label();
			view! {
				ctx,
				div(class="contrast-display") {
					div(class=class, title=title, style=style)
					div { (ratio) }
				}
			}
		}
		Cell::Type(type_cell) => {
			let class = if type_cell.below_threshold {
				format!("type-swatch {}", BELOW_THRESHOLD_CLASS)
			} else {
				String::from("type-swatch")
			};
			let style = format!(
				"background-color: {}; box-shadow: inset 8px -8px {}",
				type_cell.background, type_cell.foreground
			);
			let tooltip = type_cell.tooltip.clone();
			let foreground_title = format!("contrast ratio with {}", type_cell.foreground);
			let foreground_style = format!("color: {}", type_cell.foreground);
			let luminance_title = format!("{} luminance", type_cell.background);
			let readout_style = format!("color: {}", type_cell.readout_color().as_str());
			let ratio = type_cell.ratio_label();
			let black_ratio = type_cell.black_ratio_label();
			let luminance = type_cell.luminance_label();
			let white_ratio = type_cell.white_ratio_label();
			view! {
				ctx,
				div(class=class, title=tooltip, style=style) {
					div(class="ratio", title=foreground_title, style=foreground_style) { (ratio) }
					div(class="ratio", title="contrast ratio with black", style="color: black") { (black_ratio) }
					div(class="ratio", title=luminance_title, style=readout_style) { (luminance) }
					div(class="ratio", title="contrast ratio with white", style="color: white") { (white_ratio) }
				}
			}
		}
	}
}

#[derive(Prop)]
pub struct AppProps {
	store: Store<HistoryPersistence>,
	resolver: CanvasColorResolver,
}

#[component]
pub fn App<'a, G: Html>(ctx: Scope<'a>, props: AppProps) -> View<G> {
	let store = create_ref(ctx, RefCell::new(props.store));
	let resolver = create_ref(ctx, props.resolver);
	let state = create_signal(ctx, store.borrow().state().clone());

	let dispatch = move |action: Action| {
		let next = store.borrow_mut().dispatch(action).clone();
		state.set(next);
	};

	let indices = create_memo(ctx, || (0..state.get().colors.len()).collect::<Vec<usize>>());

	let add_color_handler = move |_event: WebEvent| dispatch(Action::AddColor);
	let threshold_handler = move |event: WebEvent| {
		let minimum_contrast = MinimumContrast::from_input(&target_value(&event));
		dispatch(Action::Update(Update::MinimumContrast(minimum_contrast)));
	};
	let comparison_handler = move |event: WebEvent| match target_value(&event).parse::<Comparison>() {
		Ok(comparison) => dispatch(Action::Update(Update::Comparison(comparison))),
		Err(error) => log::warn!("Ignoring comparison change: {}", error),
	};
	let grayscale_handler = move |event: WebEvent| dispatch(Action::Update(Update::Grayscale(target_checked(&event))));
	let bulk_text_handler = move |event: WebEvent| dispatch(Action::Update(Update::BulkEditValue(target_value(&event))));
	let bulk_edit_existing_handler = move |_event: WebEvent| dispatch(Action::BulkEditExistingColors);
	let bulk_add_handler = move |_event: WebEvent| dispatch(Action::BulkAddColors);

	let grid = move || {
		let state = state.get();
		let matrix = ContrastMatrix::new(&state, resolver);
		let show_headers = state.comparison == Comparison::Swatch;

		let mut views: Vec<View<G>> = Vec::new();
		if show_headers {
			views.push(view! { ctx, div(class="placeholder") });
			for (index, color) in state.colors.iter().enumerate() {
				views.push(header_swatch(ctx, color, state.title_for(color), index, dispatch));
			}
		}
		for (row, cells) in matrix.rows().enumerate() {
			if show_headers {
				let color = &state.colors[row];
				views.push(header_swatch(ctx, color, state.title_for(color), row, dispatch));
			}
			views.extend(cells.iter().map(|cell| cell_view(ctx, cell)));
		}
		View::new_fragment(views)
	};

	view! {
		ctx,
		div(class="controls") {
			button(type="button", on:click=add_color_handler) { "Add color" }
			label {
				"Minimum contrast "
				input(placeholder="4.5", on:input=threshold_handler)
			}
			select(on:change=comparison_handler) {
				option(value="swatch") { "Swatch" }
				option(value="type") { "Type" }
			}
			label {
				input(type="checkbox", prop:checked=state.get().grayscale, on:change=grayscale_handler)
				" Grayscale"
			}
		}
		div(class="color-entries") {
			Keyed(
				iterable=indices,
				key=|index| *index,
				view=move |ctx, index| {
					let color = create_memo(ctx, move || state.get().colors.get(index).cloned().unwrap_or_default());
					let swatch_title = create_memo(ctx, move || state.get().title_for(&color.get()).to_string());

					let edit_handler = move |event: WebEvent| {
						dispatch(Action::EditColor {
							index,
							value: target_value(&event),
						});
					};
					// Pasted hex codes often come without their leading #
					let paste_handler = move |event: WebEvent| {
						let pasted = event
							.dyn_ref::<ClipboardEvent>()
							.and_then(|clipboard_event| clipboard_event.clipboard_data())
							.and_then(|data| data.get_data("text").ok());
						let Some(pasted) = pasted else {
							return;
						};
						event.prevent_default();
						dispatch(Action::EditColor {
							index,
							value: normalize_hex(pasted.trim()),
						});
					};
					let remove_handler = move |_event: WebEvent| dispatch(Action::RemoveColor(index));

					view! {
						ctx,
						div(class="color-entry") {
							div(
								class="swatch removable",
								title=swatch_title.get(),
								style=format!("background-color: {}", color.get()),
								on:click=remove_handler
							)
							input(
								spellcheck="false",
								placeholder="#000000",
								prop:value=(*color.get()).clone(),
								on:input=edit_handler,
								on:paste=paste_handler
							)
						}
					}
				}
			)
		}
		div(
			class=if state.get().grayscale { "colors grayscale" } else { "colors" },
			style=format!(
				"grid-template-columns: repeat({}, max-content)",
				match state.get().comparison {
					Comparison::Swatch => state.get().colors.len() + 1,
					Comparison::Type => state.get().colors.len(),
				}
			)
		) {
			(grid())
		}
		div(class="bulk-edit") {
			textarea(spellcheck="false", prop:value=state.get().bulk_edit_value.clone(), on:input=bulk_text_handler)
			button(type="button", on:click=bulk_edit_existing_handler) { "Edit existing colors" }
			button(type="button", on:click=bulk_add_handler) { "Replace colors" }
		}
	}
}
