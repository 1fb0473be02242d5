use log::debug;

use super::changes::{EdgeChange, NodeChange, apply_edge_changes, apply_node_changes};
use super::types::{Connection, EDGE_TYPE, Edge, MonitoringPolicy, Node, NodeConfig, NodeId};

/// Canonical diagram state: nodes, edges, the selected node and the
/// monitoring side channel.
///
/// Every operation is infallible. Unknown ids and empty selections make the
/// call a no-op.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	selected: Option<NodeId>,
	monitoring: Vec<MonitoringPolicy>,
}

impl GraphStore {
	/// Empty diagram.
	pub fn new() -> Self {
		Self::default()
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Monitoring policies attached by the last generation.
	pub fn monitoring(&self) -> &[MonitoringPolicy] {
		&self.monitoring
	}

	/// Id of the selected node, if any.
	pub fn selected_id(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// The selected node, if it still exists.
	pub fn selected_node(&self) -> Option<&Node> {
		let id = self.selected.as_deref()?;
		self.node(id)
	}

	/// Looks a node up by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// True when there are no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Folds renderer deltas into the node list.
	pub fn apply_node_changes(&mut self, changes: Vec<NodeChange>) {
		apply_node_changes(changes, &mut self.nodes);
	}

	/// Folds renderer deltas into the edge list.
	pub fn apply_edge_changes(&mut self, changes: Vec<EdgeChange>) {
		apply_edge_changes(changes, &mut self.edges);
	}

	/// Appends an animated `smoothstep` edge for `connection`.
	///
	/// Catalog connection rules are not consulted. A connection with an empty
	/// endpoint, or one that duplicates an existing edge, is dropped.
	pub fn connect(&mut self, connection: Connection) {
		if connection.source.is_empty() || connection.target.is_empty() {
			return;
		}
		let exists = self.edges.iter().any(|e| {
			e.source == connection.source
				&& e.target == connection.target
				&& e.source_handle == connection.source_handle
				&& e.target_handle == connection.target_handle
		});
		if exists {
			debug!("connection {} -> {} already present", connection.source, connection.target);
			return;
		}

		let id = edge_id(&connection);
		debug!("connect {id}");
		self.edges.push(Edge {
			id,
			source: connection.source,
			target: connection.target,
			source_handle: connection.source_handle,
			target_handle: connection.target_handle,
			kind: Some(EDGE_TYPE.into()),
			animated: true,
			selected: false,
		});
	}

	/// Appends `node`. The caller picks a collision-resistant id.
	pub fn add_node(&mut self, node: Node) {
		debug!("add node {}", node.id);
		self.nodes.push(node);
	}

	/// Sets or clears the transient selection.
	pub fn select_node(&mut self, id: Option<NodeId>) {
		self.selected = id;
	}

	/// Replaces the config of `node_id` and marks it configured.
	pub fn update_node_config(&mut self, node_id: &str, config: NodeConfig) {
		let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) else {
			return;
		};
		node.data.config = config;
		node.data.configured = true;
		debug!("configured {node_id}");
	}

	/// Removes the selected node together with every edge touching it.
	pub fn delete_selected_node(&mut self) {
		let Some(id) = self.selected.take() else {
			return;
		};
		self.nodes.retain(|n| n.id != id);
		self.edges.retain(|e| !e.touches(&id));
		debug!("deleted {id}");
	}

	/// Empties nodes, edges and the selection.
	pub fn clear_canvas(&mut self) {
		self.nodes.clear();
		self.edges.clear();
		self.selected = None;
	}

	/// Replaces the whole diagram. Edge endpoints are trusted as given.
	pub fn load_architecture(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
		debug!("load {} nodes, {} edges", nodes.len(), edges.len());
		self.nodes = nodes;
		self.edges = edges;
		self.selected = None;
	}

	/// Stores the monitoring policies of the last generation.
	pub fn set_monitoring(&mut self, policies: Vec<MonitoringPolicy>) {
		self.monitoring = policies;
	}
}

fn edge_id(c: &Connection) -> String {
	format!(
		"xy-edge__{}{}-{}{}",
		c.source,
		c.source_handle.as_deref().unwrap_or_default(),
		c.target,
		c.target_handle.as_deref().unwrap_or_default(),
	)
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use serde_json::json;

	use super::*;
	use crate::graph::types::Position;

	fn node(id: &str) -> Node {
		Node::new(id, Position::default(), id.to_uppercase(), "compute", "compute-engine")
	}

	fn store_with(ids: &[&str]) -> GraphStore {
		let mut store = GraphStore::new();
		for id in ids {
			store.add_node(node(id));
		}
		store
	}

	#[test]
	fn add_node_keeps_every_distinct_id() {
		let ids: Vec<String> = (0..25).map(|i| format!("cloud-run-{i}")).collect();
		let mut store = GraphStore::new();
		for id in &ids {
			store.add_node(node(id));
		}
		assert_eq!(store.nodes().len(), ids.len());
		let unique: HashSet<_> = store.nodes().iter().map(|n| &n.id).collect();
		assert_eq!(unique.len(), ids.len());
	}

	#[test]
	fn connect_appends_one_animated_smoothstep_edge() {
		let mut store = store_with(&["a", "b"]);
		store.connect(Connection::new("a", "b"));
		assert_eq!(store.edges().len(), 1);
		let edge = &store.edges()[0];
		assert_eq!((edge.source.as_str(), edge.target.as_str()), ("a", "b"));
		assert_eq!(edge.kind.as_deref(), Some("smoothstep"));
		assert!(edge.animated);
		assert_eq!(edge.id, "xy-edge__a-b");
	}

	#[test]
	fn connect_ignores_catalog_rules() {
		// bigquery never lists pub-sub as a target; the store does not care
		let mut store = GraphStore::new();
		store.add_node(Node::new("bq", Position::default(), "BigQuery", "database", "bigquery"));
		store.add_node(Node::new("ps", Position::default(), "Pub/Sub", "messaging", "pub-sub"));
		store.connect(Connection::new("bq", "ps"));
		assert_eq!(store.edges().len(), 1);
	}

	#[test]
	fn connect_drops_duplicates_and_empty_endpoints() {
		let mut store = store_with(&["a", "b"]);
		store.connect(Connection::new("a", "b").with_handles("right", "left"));
		store.connect(Connection::new("a", "b").with_handles("right", "left"));
		store.connect(Connection::new("", "b"));
		assert_eq!(store.edges().len(), 1);
		assert_eq!(store.edges()[0].id, "xy-edge__aright-bleft");
	}

	#[test]
	fn delete_selected_cascades_to_edges() {
		let mut store = store_with(&["a", "b", "c"]);
		store.connect(Connection::new("a", "b"));
		store.connect(Connection::new("b", "c"));
		store.connect(Connection::new("a", "c"));
		store.select_node(Some("b".into()));
		store.delete_selected_node();

		assert!(store.node("b").is_none());
		assert!(store.edges().iter().all(|e| !e.touches("b")));
		assert_eq!(store.edges().len(), 1);
		assert_eq!(store.selected_id(), None);
	}

	#[test]
	fn delete_without_selection_is_noop() {
		let mut store = store_with(&["a"]);
		let before = store.clone();
		store.delete_selected_node();
		assert_eq!(store, before);
	}

	#[test]
	fn update_config_marks_configured() {
		let mut store = store_with(&["a"]);
		let cfg = NodeConfig::from([("name".to_string(), "web".to_string())]);
		store.update_node_config("a", cfg.clone());
		let data = &store.node("a").unwrap().data;
		assert!(data.configured);
		assert_eq!(data.config, cfg);
	}

	#[test]
	fn update_config_on_unknown_id_changes_nothing() {
		let mut store = store_with(&["a", "b"]);
		let before = store.nodes().to_vec();
		store.update_node_config("missing", NodeConfig::new());
		assert_eq!(store.nodes(), before.as_slice());
	}

	#[test]
	fn saving_an_empty_config_still_counts() {
		let mut store = store_with(&["a"]);
		store.update_node_config("a", NodeConfig::new());
		assert!(store.node("a").unwrap().data.configured);
	}

	#[test]
	fn clear_resets_everything_but_monitoring() {
		let mut store = store_with(&["a", "b"]);
		store.connect(Connection::new("a", "b"));
		store.select_node(Some("a".into()));
		store.set_monitoring(vec![json!({"metric_name": "cpu"})]);
		store.clear_canvas();
		assert!(store.nodes().is_empty());
		assert!(store.edges().is_empty());
		assert!(store.selected_node().is_none());
		assert_eq!(store.monitoring().len(), 1);
	}

	#[test]
	fn load_replaces_rather_than_merges() {
		let mut store = store_with(&["a", "b"]);
		store.connect(Connection::new("a", "b"));
		store.select_node(Some("a".into()));

		let nodes = vec![node("x")];
		let edges = vec![Edge {
			id: "dangling".into(),
			source: "x".into(),
			target: "nowhere".into(),
			source_handle: None,
			target_handle: None,
			kind: None,
			animated: false,
			selected: false,
		}];
		store.load_architecture(nodes.clone(), edges.clone());
		assert_eq!(store.nodes(), nodes.as_slice());
		assert_eq!(store.edges(), edges.as_slice());
		assert_eq!(store.selected_id(), None);
	}

	#[test]
	fn selection_of_deleted_node_reads_as_none() {
		let mut store = store_with(&["a"]);
		store.select_node(Some("a".into()));
		store.apply_node_changes(vec![NodeChange::Remove { id: "a".into() }]);
		assert!(store.selected_node().is_none());
	}
}
