//! Saving and loading diagrams as JSON.
//!
//! The same document shape is used for `localStorage` and for file
//! export/import: `{ "nodes": [...], "edges": [...], "monitoring"?: [...] }`.

mod browser;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::graph::{Edge, GraphStore, MonitoringPolicy, Node};

pub use browser::{download_json, load_saved, read_file_text, save_to_storage};

/// A diagram as written to disk or storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureFile {
	/// Nodes in canvas order.
	pub nodes: Vec<Node>,
	/// Edges in canvas order.
	pub edges: Vec<Edge>,
	/// Monitoring policies, when any are attached.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub monitoring: Option<Vec<MonitoringPolicy>>,
}

impl ArchitectureFile {
	/// Snapshot of the current diagram.
	pub fn from_store(store: &GraphStore) -> Self {
		let monitoring = (!store.monitoring().is_empty()).then(|| store.monitoring().to_vec());
		Self {
			nodes: store.nodes().to_vec(),
			edges: store.edges().to_vec(),
			monitoring,
		}
	}

	/// Pretty-printed JSON.
	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string_pretty(self)
	}

	/// Parses an imported document. Both `nodes` and `edges` must be arrays.
	pub fn parse(text: &str) -> Result<Self, ImportError> {
		let value: Value = serde_json::from_str(text).map_err(ImportError::InvalidJson)?;
		let Some(obj) = value.as_object() else {
			return Err(ImportError::NotAnObject);
		};
		if !obj.get("nodes").is_some_and(Value::is_array) {
			return Err(ImportError::MissingArray("nodes"));
		}
		if !obj.get("edges").is_some_and(Value::is_array) {
			return Err(ImportError::MissingArray("edges"));
		}
		serde_json::from_value(value).map_err(ImportError::InvalidShape)
	}

	/// Replaces the store's diagram with this one.
	pub fn load_into(self, store: &mut GraphStore) {
		store.load_architecture(self.nodes, self.edges);
		if let Some(monitoring) = self.monitoring {
			store.set_monitoring(monitoring);
		}
	}
}

/// Why an imported file was rejected.
#[derive(Debug, Error)]
pub enum ImportError {
	/// Not parseable as JSON.
	#[error("failed to parse JSON file: {0}")]
	InvalidJson(#[source] serde_json::Error),
	/// Parsed, but the top level is not an object.
	#[error("invalid architecture file: expected a JSON object")]
	NotAnObject,
	/// A required top-level array is missing or not an array.
	#[error("invalid architecture file: `{0}` must be an array")]
	MissingArray(&'static str),
	/// An element of `nodes` or `edges` has the wrong shape.
	#[error("invalid architecture file: {0}")]
	InvalidShape(#[source] serde_json::Error),
}

/// Why reading or writing browser storage failed.
#[derive(Debug, Error)]
pub enum StorageError {
	/// No `window`/`localStorage`, e.g. storage disabled.
	#[error("local storage is unavailable")]
	Unavailable,
	/// The browser refused the write.
	#[error("could not write to local storage (quota exceeded?)")]
	Write,
	/// The stored document did not parse.
	#[error(transparent)]
	Corrupt(#[from] ImportError),
	/// Serialising the diagram failed.
	#[error("could not serialise architecture: {0}")]
	Encode(#[from] serde_json::Error),
}

/// Parses `text` and, only on success, loads it into `store`.
pub fn import_into(store: &mut GraphStore, text: &str) -> Result<(), ImportError> {
	ArchitectureFile::parse(text)?.load_into(store);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Connection, NodeConfig, Position};

	fn sample_store() -> GraphStore {
		let mut store = GraphStore::new();
		store.add_node(Node::new("vpc-1", Position::new(0.0, 0.0), "VPC", "networking", "vpc"));
		store.add_node(Node::new("vm-1", Position::new(260.0, 120.0), "Compute Engine", "compute", "compute-engine"));
		store.connect(Connection::new("vpc-1", "vm-1").with_handles("right", "left"));
		store.update_node_config(
			"vm-1",
			NodeConfig::from([("machineType".to_string(), "e2-medium".to_string())]),
		);
		store
	}

	#[test]
	fn missing_edges_is_rejected_and_store_untouched() {
		let mut store = sample_store();
		let before = store.clone();
		let err = import_into(&mut store, r#"{"nodes":[]}"#).unwrap_err();
		assert!(matches!(err, ImportError::MissingArray("edges")));
		assert_eq!(store, before);
	}

	#[test]
	fn non_array_nodes_is_rejected() {
		let err = ArchitectureFile::parse(r#"{"nodes":{},"edges":[]}"#).unwrap_err();
		assert!(matches!(err, ImportError::MissingArray("nodes")));
	}

	#[test]
	fn garbage_is_invalid_json() {
		let err = ArchitectureFile::parse("{nodes:").unwrap_err();
		assert!(matches!(err, ImportError::InvalidJson(_)));
		assert!(err.to_string().starts_with("failed to parse JSON file"));
	}

	#[test]
	fn malformed_node_is_rejected() {
		let err = ArchitectureFile::parse(r#"{"nodes":[{"id":"a"}],"edges":[]}"#).unwrap_err();
		assert!(matches!(err, ImportError::InvalidShape(_)));
	}

	#[test]
	fn minimal_import_loads_single_node() {
		let mut store = sample_store();
		let text = r#"{"nodes":[{"id":"a","type":"gcpNode","position":{"x":1,"y":2},
			"data":{"label":"A","category":"compute","icon":"cloud-run","configured":false,"config":{}}}],
			"edges":[]}"#;
		import_into(&mut store, text).unwrap();
		assert_eq!(store.nodes().len(), 1);
		assert_eq!(store.nodes()[0].id, "a");
		assert!(store.edges().is_empty());
	}

	#[test]
	fn export_then_import_is_identity() {
		let store = sample_store();
		let json = ArchitectureFile::from_store(&store).to_json().unwrap();
		let mut restored = GraphStore::new();
		import_into(&mut restored, &json).unwrap();
		assert_eq!(restored.nodes(), store.nodes());
		assert_eq!(restored.edges(), store.edges());
	}

	#[test]
	fn monitoring_is_written_only_when_present() {
		let mut store = sample_store();
		let json = ArchitectureFile::from_store(&store).to_json().unwrap();
		assert!(!json.contains("monitoring"));

		store.set_monitoring(vec![serde_json::json!({"metric_name": "cpu", "threshold": 0.8})]);
		let file = ArchitectureFile::from_store(&store);
		let mut restored = GraphStore::new();
		file.load_into(&mut restored);
		assert_eq!(restored.monitoring(), store.monitoring());
	}
}
