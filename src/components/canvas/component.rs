use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, DragEvent, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::adapter::{DragPayload, drop_position};
use super::render;
use super::state::{CanvasIntent, CanvasState};
use crate::components::context::{ArchitectureStore, use_editor, use_store};
use crate::graph::NodeChange;

fn apply_intents(store: ArchitectureStore, intents: Vec<CanvasIntent>) {
	if intents.is_empty() {
		return;
	}
	store.update(|g| {
		for intent in intents {
			match intent {
				CanvasIntent::Select(id) => g.select_node(id),
				CanvasIntent::Move {
					id,
					position,
					dragging,
				} => g.apply_node_changes(vec![NodeChange::Position {
					id,
					position,
					dragging,
				}]),
				CanvasIntent::Connect(connection) => g.connect(connection),
			}
		}
	});
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0))
}

/// Pan/zoom canvas showing the shared architecture store.
///
/// Nodes are added by dropping palette entries, moved by dragging and
/// connected by dragging from their right or bottom handle onto another node.
#[component]
pub fn ArchitectureCanvas() -> impl IntoView {
	let store = use_store();
	let ui = use_editor();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));
	let (state_init, animate_init, resize_cb_init, alive_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), alive.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("2d canvas context unavailable");
				return;
			}
		};
		*state_init.borrow_mut() = Some(CanvasState::new(w, h));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, resize_inner) =
			(state_init.clone(), animate_init.clone(), resize_cb_init.clone());
		let alive_anim = alive_init.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			if !alive_anim.load(Ordering::Relaxed) {
				if let Some(cb) = resize_inner.borrow_mut().take() {
					let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				debug!("canvas unmounted, stopping render loop");
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				store.with_untracked(|g| render::render(s, g, &ctx));
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	on_cleanup(move || alive.store(false, Ordering::Relaxed));

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		let intents = match *state_md.borrow_mut() {
			Some(ref mut s) => store.with_untracked(|g| s.mouse_down(g, x, y)),
			None => return,
		};
		apply_intents(store, intents);
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		let intents = match *state_mm.borrow_mut() {
			Some(ref mut s) => store.with_untracked(|g| s.mouse_move(g, x, y)),
			None => return,
		};
		apply_intents(store, intents);
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		let intents = match *state_mu.borrow_mut() {
			Some(ref mut s) => store.with_untracked(|g| s.mouse_up(g, x, y)),
			None => return,
		};
		apply_intents(store, intents);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let intents = match *state_ml.borrow_mut() {
			Some(ref mut s) => s.cancel(),
			None => return,
		};
		apply_intents(store, intents);
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		let hit = match *state_dc.borrow() {
			Some(ref s) => store.with_untracked(|g| s.node_at_position(g, x, y).map(|n| n.id.clone())),
			None => None,
		};
		if let Some(id) = hit {
			store.update(|g| g.select_node(Some(id)));
			ui.config_open.set(true);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y());
		}
	};

	let on_dragover = move |ev: DragEvent| {
		ev.prevent_default();
		if let Some(dt) = ev.data_transfer() {
			dt.set_drop_effect("move");
		}
	};

	let state_dr = state.clone();
	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		let (Some(dt), Some(canvas)) = (ev.data_transfer(), canvas_ref.get_untracked()) else {
			return;
		};
		let Some(payload) = DragPayload::read(|key| dt.get_data(key).ok()) else {
			debug!("ignoring drop without a node type");
			return;
		};
		let rect = canvas.get_bounding_client_rect();
		let position = match *state_dr.borrow() {
			Some(ref s) => drop_position(
				(ev.client_x() as f64, ev.client_y() as f64),
				(rect.left(), rect.top()),
				&s.transform,
			),
			None => return,
		};
		let node = payload.into_node(position, js_sys::Date::now());
		store.update(|g| g.add_node(node));
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="architecture-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			on:dragover=on_dragover
			on:drop=on_drop
			style="display: block; cursor: default;"
		/>
	}
}
