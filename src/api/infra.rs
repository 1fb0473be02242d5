use super::types::{InfraResource, InfraSpec};
use crate::catalog::Cloud;
use crate::graph::GraphStore;

impl InfraSpec {
	/// Derives the resource list for Terraform generation from the diagram.
	///
	/// Each node becomes one resource, in canvas order. Edges become
	/// `connects_to` lists on their source resource; edges whose target is
	/// not on the canvas are skipped.
	pub fn from_graph(
		store: &GraphStore,
		provider: Cloud,
		project_name: &str,
		region: &str,
	) -> Self {
		let resources = store
			.nodes()
			.iter()
			.map(|node| {
				let name = node
					.data
					.config
					.get("name")
					.filter(|n| !n.trim().is_empty())
					.cloned()
					.unwrap_or_else(|| node.data.label.clone());
				let connects_to = store
					.edges()
					.iter()
					.filter(|e| e.source == node.id && store.node(&e.target).is_some())
					.map(|e| e.target.clone())
					.collect();
				InfraResource {
					id: node.id.clone(),
					kind: node.data.icon.clone(),
					name,
					category: node.data.category.clone(),
					config: node.data.config.clone(),
					connects_to,
				}
			})
			.collect();

		Self {
			provider,
			project_name: project_name.trim().into(),
			region: region.into(),
			resources,
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::graph::{Connection, Node, NodeConfig, Position};

	#[test]
	fn resources_follow_nodes_and_edges() {
		let mut store = GraphStore::new();
		store.add_node(Node::new("lb-1", Position::default(), "Load Balancer", "networking", "load-balancer"));
		store.add_node(Node::new("run-1", Position::default(), "Cloud Run", "compute", "cloud-run"));
		store.connect(Connection::new("lb-1", "run-1"));
		store.update_node_config(
			"run-1",
			NodeConfig::from([("name".to_string(), "api".to_string())]),
		);

		let spec = InfraSpec::from_graph(&store, Cloud::Gcp, " shop ", "us-central1");
		assert_eq!(spec.project_name, "shop");
		assert_eq!(spec.resources.len(), 2);
		assert_eq!(spec.resources[0].name, "Load Balancer");
		assert_eq!(spec.resources[0].connects_to, ["run-1"]);
		assert_eq!(spec.resources[1].name, "api");
		assert!(spec.resources[1].connects_to.is_empty());

		let body = serde_json::to_value(&spec).unwrap();
		assert_eq!(body["provider"], "gcp");
		assert_eq!(body["resources"][1]["type"], "cloud-run");
		assert_eq!(body["resources"][1]["config"], json!({"name": "api"}));
	}
}
