use crate::graph::{Node, Position, snap_to_grid};

use super::state::ViewTransform;

/// Transfer key carrying the catalog id of a dragged palette entry.
pub const DRAG_TYPE: &str = "application/gcpnode-type";
/// Transfer key carrying the display label.
pub const DRAG_LABEL: &str = "application/gcpnode-label";
/// Transfer key carrying the category.
pub const DRAG_CATEGORY: &str = "application/gcpnode-category";

/// Offset from pointer to node top-left so the box lands centred.
pub const DROP_OFFSET: (f64, f64) = (90.0, 30.0);

/// What a palette drag carries to the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragPayload {
	/// Catalog id, used as icon key and id prefix.
	pub node_type: String,
	/// Display label.
	pub label: String,
	/// Category name.
	pub category: String,
}

impl DragPayload {
	/// Writes the three fields through `set(key, value)`.
	pub fn write(&self, mut set: impl FnMut(&str, &str)) {
		set(DRAG_TYPE, &self.node_type);
		set(DRAG_LABEL, &self.label);
		set(DRAG_CATEGORY, &self.category);
	}

	/// Reads the fields back through `get(key)`. A drop without a node type
	/// (e.g. a file dragged in from the desktop) yields `None`.
	pub fn read(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
		let node_type = get(DRAG_TYPE).filter(|t| !t.is_empty())?;
		Some(Self {
			node_type,
			label: get(DRAG_LABEL).unwrap_or_default(),
			category: get(DRAG_CATEGORY).unwrap_or_default(),
		})
	}

	/// Unconfigured node for this payload dropped at `position`, with id
	/// `{type}-{now_ms}`.
	pub fn into_node(self, position: Position, now_ms: f64) -> Node {
		let id = format!("{}-{}", self.node_type, now_ms as u64);
		Node::new(id, position, self.label, self.category, self.node_type)
	}
}

/// Where a drop at client coordinates lands, given the canvas' top-left
/// corner on screen and the current pan/zoom.
pub fn drop_position(client: (f64, f64), canvas_origin: (f64, f64), view: &ViewTransform) -> Position {
	let (wx, wy) = view.screen_to_graph(client.0 - canvas_origin.0, client.1 - canvas_origin.1);
	Position::new(snap_to_grid(wx - DROP_OFFSET.0), snap_to_grid(wy - DROP_OFFSET.1))
}

/// Keyboard shortcuts the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
	/// Remove the selected node.
	DeleteSelected,
	/// Show/hide the chat popup.
	ToggleChat,
}

/// Maps a `keydown` to an editor action.
pub fn key_action(key: &str, ctrl: bool, has_selection: bool) -> Option<KeyAction> {
	match key {
		"Delete" if has_selection => Some(KeyAction::DeleteSelected),
		"l" | "L" if ctrl => Some(KeyAction::ToggleChat),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	#[test]
	fn payload_round_trips_through_transfer_keys() {
		let payload = DragPayload {
			node_type: "cloud-sql".into(),
			label: "Cloud SQL".into(),
			category: "database".into(),
		};
		let mut transfer = HashMap::new();
		payload.write(|k, v| {
			transfer.insert(k.to_string(), v.to_string());
		});
		assert_eq!(transfer["application/gcpnode-type"], "cloud-sql");
		let read = DragPayload::read(|k| transfer.get(k).cloned());
		assert_eq!(read, Some(payload));
	}

	#[test]
	fn foreign_drop_is_ignored() {
		assert_eq!(DragPayload::read(|_| None), None);
		assert_eq!(DragPayload::read(|_| Some(String::new())), None);
	}

	#[test]
	fn dropped_node_starts_unconfigured() {
		let payload = DragPayload {
			node_type: "vpc".into(),
			label: "VPC".into(),
			category: "networking".into(),
		};
		let node = payload.into_node(Position::new(20.0, 40.0), 1_700_000_000_123.0);
		assert_eq!(node.id, "vpc-1700000000123");
		assert_eq!(node.kind, "gcpNode");
		assert_eq!(node.data.icon, "vpc");
		assert!(!node.data.configured);
		assert!(node.data.config.is_empty());
	}

	#[test]
	fn drop_subtracts_bounds_and_centre_offset() {
		let view = ViewTransform::identity();
		let pos = drop_position((400.0, 300.0), (100.0, 50.0), &view);
		// 400-100-90 = 210 -> 220 on the grid; 300-50-30 = 220
		assert_eq!(pos, Position::new(220.0, 220.0));
	}

	#[test]
	fn drop_respects_zoom_and_pan() {
		let view = ViewTransform {
			x: 100.0,
			y: 0.0,
			k: 2.0,
		};
		let pos = drop_position((500.0, 200.0), (0.0, 0.0), &view);
		// world = ((500-100)/2, 200/2) = (200, 100)
		assert_eq!(pos, Position::new(snap_to_grid(110.0), snap_to_grid(70.0)));
	}

	#[test]
	fn delete_needs_a_selection() {
		assert_eq!(key_action("Delete", false, true), Some(KeyAction::DeleteSelected));
		assert_eq!(key_action("Delete", false, false), None);
		assert_eq!(key_action("Backspace", false, true), None);
		assert_eq!(key_action("l", true, false), Some(KeyAction::ToggleChat));
		assert_eq!(key_action("l", false, false), None);
	}
}
