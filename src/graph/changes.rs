use super::types::{Dimensions, Edge, Node, NodeId, Position};

/// A delta the canvas emits for the node list.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeChange {
	/// Append a node.
	Add(Node),
	/// Drop a node by id. Touching edges are not removed.
	Remove {
		/// Node to drop.
		id: NodeId,
	},
	/// Swap a node for a new value with the same id.
	Replace(Node),
	/// Move a node and/or toggle its drag flag.
	Position {
		/// Node being moved.
		id: NodeId,
		/// New position, if it changed.
		position: Option<Position>,
		/// Whether a drag is in progress.
		dragging: bool,
	},
	/// Record the rendered size of a node.
	Dimensions {
		/// Node being measured.
		id: NodeId,
		/// Measured size.
		dimensions: Dimensions,
	},
	/// Toggle a node's selection flag.
	Select {
		/// Node being (de)selected.
		id: NodeId,
		/// New flag value.
		selected: bool,
	},
}

/// A delta the canvas emits for the edge list.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeChange {
	/// Append an edge.
	Add(Edge),
	/// Drop an edge by id.
	Remove {
		/// Edge to drop.
		id: String,
	},
	/// Swap an edge for a new value with the same id.
	Replace(Edge),
	/// Toggle an edge's selection flag.
	Select {
		/// Edge being (de)selected.
		id: String,
		/// New flag value.
		selected: bool,
	},
}

/// Folds `changes` into `nodes`. Surviving nodes keep their relative order.
pub fn apply_node_changes(changes: Vec<NodeChange>, nodes: &mut Vec<Node>) {
	for change in changes {
		match change {
			NodeChange::Add(node) => nodes.push(node),
			NodeChange::Remove { id } => nodes.retain(|n| n.id != id),
			NodeChange::Replace(node) => {
				if let Some(slot) = nodes.iter_mut().find(|n| n.id == node.id) {
					*slot = node;
				}
			}
			NodeChange::Position {
				id,
				position,
				dragging,
			} => {
				if let Some(n) = nodes.iter_mut().find(|n| n.id == id) {
					if let Some(p) = position {
						n.position = p;
					}
					n.dragging = dragging;
				}
			}
			NodeChange::Dimensions { id, dimensions } => {
				if let Some(n) = nodes.iter_mut().find(|n| n.id == id) {
					n.measured = Some(dimensions);
				}
			}
			NodeChange::Select { id, selected } => {
				if let Some(n) = nodes.iter_mut().find(|n| n.id == id) {
					n.selected = selected;
				}
			}
		}
	}
}

/// Folds `changes` into `edges`. Surviving edges keep their relative order.
pub fn apply_edge_changes(changes: Vec<EdgeChange>, edges: &mut Vec<Edge>) {
	for change in changes {
		match change {
			EdgeChange::Add(edge) => edges.push(edge),
			EdgeChange::Remove { id } => edges.retain(|e| e.id != id),
			EdgeChange::Replace(edge) => {
				if let Some(slot) = edges.iter_mut().find(|e| e.id == edge.id) {
					*slot = edge;
				}
			}
			EdgeChange::Select { id, selected } => {
				if let Some(e) = edges.iter_mut().find(|e| e.id == id) {
					e.selected = selected;
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str) -> Node {
		Node::new(id, Position::default(), id, "compute", "cloud-run")
	}

	fn edge(id: &str) -> Edge {
		Edge {
			id: id.into(),
			source: "a".into(),
			target: "b".into(),
			source_handle: None,
			target_handle: None,
			kind: None,
			animated: false,
			selected: false,
		}
	}

	#[test]
	fn add_appends_after_existing_nodes() {
		let mut nodes = vec![node("a"), node("b")];
		apply_node_changes(vec![NodeChange::Add(node("c"))], &mut nodes);
		let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "b", "c"]);
	}

	#[test]
	fn dimensions_record_measured_size() {
		let mut nodes = vec![node("a"), node("b")];
		let size = Dimensions {
			width: 180.0,
			height: 64.0,
		};
		apply_node_changes(
			vec![NodeChange::Dimensions {
				id: "b".into(),
				dimensions: size,
			}],
			&mut nodes,
		);
		assert_eq!(nodes[0].measured, None);
		assert_eq!(nodes[1].measured, Some(size));
		assert_eq!(nodes[1].position, Position::default());
	}

	#[test]
	fn remove_keeps_order_of_the_rest() {
		let mut nodes = vec![node("a"), node("b"), node("c")];
		apply_node_changes(vec![NodeChange::Remove { id: "b".into() }], &mut nodes);
		let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "c"]);
	}

	#[test]
	fn position_without_coordinates_only_touches_drag_flag() {
		let mut nodes = vec![node("a")];
		apply_node_changes(
			vec![NodeChange::Position {
				id: "a".into(),
				position: Some(Position::new(40.0, 60.0)),
				dragging: true,
			}],
			&mut nodes,
		);
		apply_node_changes(
			vec![NodeChange::Position {
				id: "a".into(),
				position: None,
				dragging: false,
			}],
			&mut nodes,
		);
		assert_eq!(nodes[0].position, Position::new(40.0, 60.0));
		assert!(!nodes[0].dragging);
	}

	#[test]
	fn changes_for_unknown_ids_are_ignored() {
		let mut nodes = vec![node("a")];
		let before = nodes.clone();
		apply_node_changes(
			vec![
				NodeChange::Select {
					id: "zz".into(),
					selected: true,
				},
				NodeChange::Replace(node("zz")),
			],
			&mut nodes,
		);
		assert_eq!(nodes, before);
	}

	#[test]
	fn edge_select_and_remove() {
		let mut edges = vec![edge("e1"), edge("e2")];
		apply_edge_changes(
			vec![
				EdgeChange::Select {
					id: "e2".into(),
					selected: true,
				},
				EdgeChange::Remove { id: "e1".into() },
			],
			&mut edges,
		);
		assert_eq!(edges.len(), 1);
		assert!(edges[0].selected);
	}

	#[test]
	fn edge_add_and_replace_keep_order() {
		let mut edges = vec![edge("e1")];
		let mut moved = edge("e1");
		moved.target = "c".into();
		moved.animated = true;
		apply_edge_changes(
			vec![EdgeChange::Add(edge("e2")), EdgeChange::Replace(moved.clone())],
			&mut edges,
		);
		assert_eq!(edges.len(), 2);
		assert_eq!(edges[0], moved);
		assert_eq!(edges[1].id, "e2");

		let before = edges.clone();
		apply_edge_changes(vec![EdgeChange::Replace(edge("ghost"))], &mut edges);
		assert_eq!(edges, before);
	}
}
