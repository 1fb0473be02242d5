use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Renderer node type for every architecture node.
pub const NODE_TYPE: &str = "gcpNode";
/// Edge style assigned by [`GraphStore::connect`](super::GraphStore::connect).
pub const EDGE_TYPE: &str = "smoothstep";

/// Width of a rendered node box.
pub const NODE_WIDTH: f64 = 180.0;
/// Height of a rendered node box.
pub const NODE_HEIGHT: f64 = 60.0;
/// Snap grid spacing of the canvas.
pub const GRID: f64 = 20.0;

/// Rounds a coordinate to the nearest grid line.
pub fn snap_to_grid(v: f64) -> f64 {
	(v / GRID).round() * GRID
}

/// Identifier of a node within a diagram.
pub type NodeId = String;

/// Per-node configuration values keyed by field name.
pub type NodeConfig = BTreeMap<String, String>;

/// Canvas coordinates in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	/// Horizontal offset.
	pub x: f64,
	/// Vertical offset.
	pub y: f64,
}

impl Position {
	/// Shorthand constructor.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Size the renderer measured for a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
	/// Width in world units.
	pub width: f64,
	/// Height in world units.
	pub height: f64,
}

/// Payload of an architecture node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
	/// Display label.
	pub label: String,
	/// Catalog category name.
	pub category: String,
	/// Catalog key of the component type.
	pub icon: String,
	/// Set once the config has been saved.
	#[serde(default)]
	pub configured: bool,
	/// Saved configuration values.
	#[serde(default)]
	pub config: NodeConfig,
	/// Keys this app does not interpret, kept for round-tripping.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A component placed on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Unique id within the diagram.
	pub id: NodeId,
	/// Renderer node type, always [`NODE_TYPE`] for nodes built here.
	#[serde(rename = "type", default = "default_node_type")]
	pub kind: String,
	/// Top-left corner in world space.
	#[serde(default)]
	pub position: Position,
	/// Display and configuration payload.
	pub data: NodeData,
	/// Renderer selection flag.
	#[serde(default, skip_serializing_if = "is_false")]
	pub selected: bool,
	/// Renderer drag flag.
	#[serde(default, skip_serializing_if = "is_false")]
	pub dragging: bool,
	/// Last size reported by the renderer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub measured: Option<Dimensions>,
}

impl Node {
	/// Builds an unconfigured node with an empty config.
	pub fn new(
		id: impl Into<NodeId>,
		position: Position,
		label: impl Into<String>,
		category: impl Into<String>,
		icon: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			kind: NODE_TYPE.into(),
			position,
			data: NodeData {
				label: label.into(),
				category: category.into(),
				icon: icon.into(),
				configured: false,
				config: NodeConfig::new(),
				extra: Map::new(),
			},
			selected: false,
			dragging: false,
			measured: None,
		}
	}
}

/// A directed link between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	/// Unique id within the diagram.
	pub id: String,
	/// Id of the source node.
	pub source: NodeId,
	/// Id of the target node.
	pub target: NodeId,
	/// Handle on the source node, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_handle: Option<String>,
	/// Handle on the target node, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub target_handle: Option<String>,
	/// Renderer edge style.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Whether the edge is drawn with a moving dash.
	#[serde(default)]
	pub animated: bool,
	/// Renderer selection flag.
	#[serde(default, skip_serializing_if = "is_false")]
	pub selected: bool,
}

impl Edge {
	/// True if either endpoint is `id`.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}
}

/// A proposed `source -> target` link, as emitted by the canvas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
	/// Source node id.
	pub source: NodeId,
	/// Target node id.
	pub target: NodeId,
	/// Handle on the source node.
	#[serde(default)]
	pub source_handle: Option<String>,
	/// Handle on the target node.
	#[serde(default)]
	pub target_handle: Option<String>,
}

impl Connection {
	/// Connection between two nodes without explicit handles.
	pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			source_handle: None,
			target_handle: None,
		}
	}

	/// Sets both handles.
	pub fn with_handles(mut self, source: &str, target: &str) -> Self {
		self.source_handle = Some(source.into());
		self.target_handle = Some(target.into());
		self
	}
}

/// Opaque monitoring policy returned alongside a generated graph.
pub type MonitoringPolicy = Value;

fn default_node_type() -> String {
	NODE_TYPE.into()
}

fn is_false(v: &bool) -> bool {
	!*v
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_json_uses_renderer_field_names() {
		let node = Node::new("vpc-1", Position::new(10.0, 20.0), "VPC", "networking", "vpc");
		let json = serde_json::to_value(&node).unwrap();
		assert_eq!(json["type"], "gcpNode");
		assert_eq!(json["data"]["configured"], false);
		assert!(json.get("selected").is_none());
		assert!(json.get("measured").is_none());
	}

	#[test]
	fn unknown_data_keys_survive() {
		let raw = r#"{"id":"a","type":"gcpNode","position":{"x":0,"y":0},
			"data":{"label":"A","category":"compute","icon":"cloud-run","tier":"gold"}}"#;
		let node: Node = serde_json::from_str(raw).unwrap();
		assert_eq!(node.data.extra["tier"], "gold");
		assert!(!node.data.configured);
		let back = serde_json::to_value(&node).unwrap();
		assert_eq!(back["data"]["tier"], "gold");
	}

	#[test]
	fn edge_handles_are_camel_case() {
		let raw = r#"{"id":"e","source":"a","target":"b","sourceHandle":"right",
			"targetHandle":"left","type":"smoothstep","animated":true}"#;
		let edge: Edge = serde_json::from_str(raw).unwrap();
		assert_eq!(edge.source_handle.as_deref(), Some("right"));
		assert_eq!(edge.kind.as_deref(), Some(EDGE_TYPE));
		assert!(edge.touches("b"));
	}
}
