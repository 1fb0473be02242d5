use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{Dimensions, Edge, NODE_HEIGHT, NODE_WIDTH, Node, Position, snap_to_grid};

const TICKS: usize = 300;
const DT: f32 = 0.016;
const MARGIN: f64 = 40.0;
/// Simulation units are tuned for dots; boxes need more room.
const SPREAD: f64 = 2.5;

/// Re-positions `nodes` with a force-directed pass over `edges`.
///
/// Ids, data and order are untouched. The result is translated so the
/// top-left node sits at a small margin and snapped to the canvas grid.
pub fn auto_layout(nodes: &mut [Node], edges: &[Edge]) {
	if nodes.is_empty() {
		return;
	}
	let mut graph: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});

	let mut id_to_idx = HashMap::new();
	for (i, node) in nodes.iter().enumerate() {
		let angle = (i as f64) * 2.0 * PI / nodes.len() as f64;
		let idx = graph.add_node(NodeData {
			x: (100.0 * angle.cos()) as f32,
			y: (100.0 * angle.sin()) as f32,
			mass: 10.0,
			is_anchor: false,
			user_data: i,
		});
		id_to_idx.insert(node.id.as_str(), idx);
	}
	for edge in edges {
		if let (Some(&src), Some(&tgt)) = (
			id_to_idx.get(edge.source.as_str()),
			id_to_idx.get(edge.target.as_str()),
		) {
			if src != tgt {
				graph.add_edge(src, tgt, EdgeData::default());
			}
		}
	}

	for _ in 0..TICKS {
		graph.update(DT);
	}

	let mut centres = vec![(0.0, 0.0); nodes.len()];
	graph.visit_nodes(|node| {
		centres[node.data.user_data] = (node.x() as f64 * SPREAD, node.y() as f64 * SPREAD);
	});

	let min_x = centres.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
	let min_y = centres.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
	for (node, (cx, cy)) in nodes.iter_mut().zip(centres) {
		// centres are shifted so the smallest box starts at MARGIN
		let x = cx - min_x + MARGIN;
		let y = cy - min_y + MARGIN;
		node.position = Position::new(snap_to_grid(x), snap_to_grid(y));
		node.measured.get_or_insert(Dimensions {
			width: NODE_WIDTH,
			height: NODE_HEIGHT,
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::types::Connection;
	use crate::graph::GraphStore;

	#[test]
	fn layout_keeps_ids_and_separates_linked_nodes() {
		let mut store = GraphStore::new();
		for id in ["vpc", "subnet", "vm"] {
			store.add_node(Node::new(id, Position::default(), id, "networking", id));
		}
		store.connect(Connection::new("vpc", "subnet"));
		store.connect(Connection::new("subnet", "vm"));

		let mut nodes = store.nodes().to_vec();
		auto_layout(&mut nodes, store.edges());

		let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["vpc", "subnet", "vm"]);
		assert!(nodes.iter().all(|n| n.position.x.is_finite() && n.position.y.is_finite()));
		assert!(nodes.iter().all(|n| n.position.x >= 0.0 && n.position.y >= 0.0));
		assert_ne!(nodes[0].position, nodes[1].position);
	}

	#[test]
	fn empty_input_is_fine() {
		let mut nodes: Vec<Node> = Vec::new();
		auto_layout(&mut nodes, &[]);
		assert!(nodes.is_empty());
	}
}
