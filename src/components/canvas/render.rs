use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, HANDLE_RADIUS, Handle};
use crate::catalog::category_color;
use crate::graph::{Edge, GRID, GraphStore, NODE_HEIGHT, NODE_WIDTH, Node};

const CORNER: f64 = 8.0;
const EDGE_COLOR: &str = "#b1b1b7";
const SELECTED_COLOR: &str = "#1a73e8";

pub fn render(state: &CanvasState, store: &GraphStore, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#f8f9fa");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_grid(state, ctx);
	draw_edges(state, store, ctx);
	draw_nodes(state, store, ctx);
	draw_draft(state, store, ctx);
	ctx.restore();
}

fn draw_grid(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	if k < 0.4 {
		return;
	}
	let (x0, y0) = state.screen_to_graph(0.0, 0.0);
	let (x1, y1) = state.screen_to_graph(state.width, state.height);
	let r = 1.0 / k;
	ctx.set_fill_style_str("#dadce0");
	let mut x = (x0 / GRID).floor() * GRID;
	while x <= x1 {
		let mut y = (y0 / GRID).floor() * GRID;
		while y <= y1 {
			ctx.fill_rect(x - r / 2.0, y - r / 2.0, r, r);
			y += GRID;
		}
		x += GRID;
	}
}

/// Orthogonal path between two anchors, bending halfway along the main axis.
fn smoothstep_points(from: (f64, f64), from_h: Handle, to: (f64, f64)) -> [(f64, f64); 4] {
	match from_h {
		Handle::Bottom | Handle::Top => {
			let mid_y = (from.1 + to.1) / 2.0;
			[from, (from.0, mid_y), (to.0, mid_y), to]
		}
		Handle::Left | Handle::Right => {
			let mid_x = (from.0 + to.0) / 2.0;
			[from, (mid_x, from.1), (mid_x, to.1), to]
		}
	}
}

fn edge_anchors(store: &GraphStore, edge: &Edge) -> Option<((f64, f64), Handle, (f64, f64), Handle)> {
	let source = store.node(&edge.source)?;
	let target = store.node(&edge.target)?;
	let sh = Handle::from_id(edge.source_handle.as_deref()).unwrap_or(Handle::Right);
	let th = Handle::from_id(edge.target_handle.as_deref()).unwrap_or(sh.opposite());
	Some((sh.anchor(source), sh, th.anchor(target), th))
}

fn draw_edges(state: &CanvasState, store: &GraphStore, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap, arrow) = (5.0, 5.0, 8.0);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	for edge in store.edges() {
		let Some((from, from_h, to, to_h)) = edge_anchors(store, edge) else {
			continue;
		};
		let touches_selection = store.selected_id().is_some_and(|id| edge.touches(id));
		let color = if edge.selected || touches_selection {
			SELECTED_COLOR
		} else {
			EDGE_COLOR
		};

		ctx.set_stroke_style_str(color);
		ctx.set_line_width(1.5_f64.max(1.0 / k));
		if edge.animated {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		let points = smoothstep_points(from, from_h, to);
		ctx.begin_path();
		ctx.move_to(points[0].0, points[0].1);
		for (x, y) in &points[1..] {
			ctx.line_to(*x, *y);
		}
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		// arrowhead points into the target handle
		let (ux, uy) = match to_h {
			Handle::Left => (1.0, 0.0),
			Handle::Right => (-1.0, 0.0),
			Handle::Top => (0.0, 1.0),
			Handle::Bottom => (0.0, -1.0),
		};
		let (back_x, back_y) = (to.0 - ux * arrow, to.1 - uy * arrow);
		let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);
		ctx.set_fill_style_str(color);
		ctx.begin_path();
		ctx.move_to(to.0, to.1);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_nodes(state: &CanvasState, store: &GraphStore, ctx: &CanvasRenderingContext2d) {
	for node in store.nodes() {
		let selected = store.selected_id() == Some(node.id.as_str());
		let hovered = state.hover.as_deref() == Some(node.id.as_str());
		draw_node(ctx, node, selected, hovered);
	}
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &Node, selected: bool, hovered: bool) {
	let (x, y) = (node.position.x, node.position.y);
	let color = category_color(&node.data.category);

	if node.dragging {
		ctx.set_global_alpha(0.85);
	}
	rounded_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, CORNER);
	ctx.set_fill_style_str("#ffffff");
	ctx.fill();
	ctx.set_stroke_style_str(if selected { SELECTED_COLOR } else { "#dadce0" });
	ctx.set_line_width(if selected { 2.0 } else { 1.0 });
	ctx.stroke();

	// category stripe
	ctx.save();
	rounded_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, CORNER);
	ctx.clip();
	ctx.set_fill_style_str(color);
	ctx.fill_rect(x, y, 6.0, NODE_HEIGHT);
	ctx.restore();

	ctx.set_fill_style_str("#202124");
	ctx.set_font("600 13px sans-serif");
	let _ = ctx.fill_text_with_max_width(&node.data.label, x + 16.0, y + 26.0, NODE_WIDTH - 40.0);
	ctx.set_fill_style_str("#5f6368");
	ctx.set_font("11px sans-serif");
	let _ = ctx.fill_text(&node.data.category, x + 16.0, y + 44.0);

	ctx.begin_path();
	let _ = ctx.arc(x + NODE_WIDTH - 14.0, y + 14.0, 4.0, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(if node.data.configured { "#34a853" } else { "#fbbc04" });
	ctx.fill();

	if selected || hovered {
		for handle in [Handle::Top, Handle::Left, Handle::Right, Handle::Bottom] {
			let (hx, hy) = handle.anchor(node);
			ctx.begin_path();
			let _ = ctx.arc(hx, hy, HANDLE_RADIUS / 2.0, 0.0, 2.0 * PI);
			ctx.set_fill_style_str("#ffffff");
			ctx.fill();
			ctx.set_stroke_style_str(color);
			ctx.set_line_width(1.5);
			ctx.stroke();
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_draft(state: &CanvasState, store: &GraphStore, ctx: &CanvasRenderingContext2d) {
	let Some(draft) = &state.connect else {
		return;
	};
	let Some(source) = store.node(&draft.source) else {
		return;
	};
	let from = draft.handle.anchor(source);
	let points = smoothstep_points(from, draft.handle, draft.cursor);
	ctx.set_stroke_style_str(SELECTED_COLOR);
	ctx.set_line_width(1.5);
	ctx.begin_path();
	ctx.move_to(points[0].0, points[0].1);
	for (x, y) in &points[1..] {
		ctx.line_to(*x, *y);
	}
	ctx.stroke();
}
