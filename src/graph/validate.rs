use super::store::GraphStore;

/// Outcome of checking a diagram before deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
	/// No nodes on the canvas.
	Empty,
	/// Some nodes were never configured.
	Incomplete {
		/// Number of unconfigured nodes.
		unconfigured: usize,
	},
	/// Every node has a saved config.
	Ready,
}

impl Validation {
	/// Checks `store`. Unconfigured nodes are reported, never rejected.
	pub fn of(store: &GraphStore) -> Self {
		let unconfigured = store.nodes().iter().filter(|n| !n.data.configured).count();
		if unconfigured > 0 {
			Self::Incomplete { unconfigured }
		} else if store.is_empty() {
			Self::Empty
		} else {
			Self::Ready
		}
	}

	/// Whether the deploy step may be offered.
	pub fn is_ready(self) -> bool {
		self == Self::Ready
	}

	/// One-line notification text.
	pub fn message(self) -> String {
		match self {
			Self::Empty => "Canvas is empty. Add some nodes to start designing".into(),
			Self::Incomplete { unconfigured } => {
				format!("{unconfigured} node(s) not configured")
			}
			Self::Ready => "Architecture validated: all nodes are configured".into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Node, NodeConfig, Position};

	#[test]
	fn counts_unconfigured_nodes() {
		let mut store = GraphStore::new();
		assert_eq!(Validation::of(&store), Validation::Empty);

		for id in ["a", "b", "c"] {
			store.add_node(Node::new(id, Position::default(), id, "compute", "cloud-run"));
		}
		store.update_node_config("b", NodeConfig::new());
		let v = Validation::of(&store);
		assert_eq!(v, Validation::Incomplete { unconfigured: 2 });
		assert_eq!(v.message(), "2 node(s) not configured");
		assert!(!v.is_ready());

		store.update_node_config("a", NodeConfig::new());
		store.update_node_config("c", NodeConfig::new());
		assert!(Validation::of(&store).is_ready());
	}
}
