use std::collections::HashSet;

use cloud_canvas::graph::{Connection, GraphStore, Node, NodeConfig, Position};
use cloud_canvas::persist::{ArchitectureFile, ImportError, import_into};

fn node(id: &str, x: f64) -> Node {
	Node::new(id, Position::new(x, 0.0), id.to_uppercase(), "compute", "cloud-run")
}

fn diamond() -> GraphStore {
	let mut store = GraphStore::new();
	for (i, id) in ["a", "b", "c", "d"].into_iter().enumerate() {
		store.add_node(node(id, i as f64 * 200.0));
	}
	store.connect(Connection::new("a", "b"));
	store.connect(Connection::new("a", "c"));
	store.connect(Connection::new("b", "d"));
	store.connect(Connection::new("c", "d"));
	store
}

#[test]
fn add_node_keeps_every_distinct_id() {
	let mut store = GraphStore::new();
	for i in 0..25 {
		store.add_node(node(&format!("cloud-run-{}", 1_700_000_000_000u64 + i), 0.0));
	}
	assert_eq!(store.nodes().len(), 25);
	let ids: HashSet<_> = store.nodes().iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids.len(), 25);
}

#[test]
fn delete_cascades_to_touching_edges() {
	let mut store = diamond();
	store.select_node(Some("b".into()));
	store.delete_selected_node();
	assert!(store.node("b").is_none());
	assert!(store.edges().iter().all(|e| e.source != "b" && e.target != "b"));
	assert_eq!(store.edges().len(), 2);
	assert_eq!(store.selected_id(), None);
}

#[test]
fn config_on_unknown_id_is_ignored() {
	let mut store = diamond();
	let before = store.nodes().to_vec();
	store.update_node_config("ghost", NodeConfig::from([("name".into(), "x".into())]));
	assert_eq!(store.nodes(), before.as_slice());
}

#[test]
fn clear_empties_everything() {
	let mut store = diamond();
	store.select_node(Some("a".into()));
	store.clear_canvas();
	assert!(store.nodes().is_empty());
	assert!(store.edges().is_empty());
	assert_eq!(store.selected_id(), None);
}

#[test]
fn load_replaces_exactly() {
	let source = diamond();
	let mut store = GraphStore::new();
	store.add_node(node("stale", 0.0));
	store.select_node(Some("stale".into()));
	store.load_architecture(source.nodes().to_vec(), source.edges().to_vec());
	assert_eq!(store.nodes(), source.nodes());
	assert_eq!(store.edges(), source.edges());
	assert_eq!(store.selected_id(), None);
}

#[test]
fn export_import_preserves_order() {
	let mut source = diamond();
	source.update_node_config("c", NodeConfig::from([("region".into(), "europe-west1".into())]));
	let json = ArchitectureFile::from_store(&source).to_json().unwrap();

	let mut store = GraphStore::new();
	import_into(&mut store, &json).unwrap();
	assert_eq!(store.nodes(), source.nodes());
	assert_eq!(store.edges(), source.edges());
}

#[test]
fn import_requires_both_arrays() {
	let mut store = GraphStore::new();
	let one = r#"{"nodes":[{"id":"a","type":"gcpNode","position":{"x":0,"y":0},
		"data":{"label":"A","category":"compute","icon":"cloud-run","configured":false,"config":{}}}],
		"edges":[]}"#;
	import_into(&mut store, one).unwrap();
	assert_eq!(store.nodes().len(), 1);
	assert_eq!(store.nodes()[0].id, "a");

	let before = store.clone();
	let err = import_into(&mut store, r#"{"nodes":[]}"#).unwrap_err();
	assert!(matches!(err, ImportError::MissingArray("edges")));
	assert_eq!(store, before);
}

#[test]
fn connect_appends_one_animated_smoothstep_edge() {
	let mut store = GraphStore::new();
	store.add_node(node("a", 0.0));
	store.add_node(node("b", 200.0));
	store.connect(Connection::new("a", "b"));
	assert_eq!(store.edges().len(), 1);
	let edge = &store.edges()[0];
	assert_eq!((edge.source.as_str(), edge.target.as_str()), ("a", "b"));
	assert_eq!(edge.kind.as_deref(), Some("smoothstep"));
	assert!(edge.animated);
}
