//! Component types available for the palette, per cloud provider.
//!
//! Entries come from the bundled GCP table or from the backend's `/nodes`
//! endpoint. Connection hints on an entry are informational only; nothing in
//! the graph store checks them.

mod builtin;
mod fields;
mod types;

use std::collections::HashMap;

pub use fields::{ConfigField, config_fields};
pub use types::{CatalogEntry, Category, CategoryGroup, Cloud, Connections, category_color};

/// A flat list of entries with palette helpers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
	entries: Vec<CatalogEntry>,
}

impl Catalog {
	/// Wraps entries in the order received.
	pub fn new(entries: Vec<CatalogEntry>) -> Self {
		Self { entries }
	}

	/// The GCP table shipped with the app.
	pub fn builtin() -> Self {
		Self::new(builtin::gcp())
	}

	/// All entries.
	pub fn entries(&self) -> &[CatalogEntry] {
		&self.entries
	}

	/// True when there is nothing to show.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entry by id.
	pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
		self.entries.iter().find(|e| e.id == id)
	}

	/// Display label for `id`, falling back to the id itself.
	pub fn label_of<'a>(&'a self, id: &'a str) -> &'a str {
		self.get(id).map_or(id, |e| e.label.as_str())
	}

	/// Entries grouped by category in first-seen order, filtered by `search`
	/// against label and description. Groups with no match are left out.
	pub fn groups(&self, search: &str) -> Vec<CategoryGroup> {
		let needle = search.trim().to_lowercase();
		let mut groups: Vec<CategoryGroup> = Vec::new();
		for entry in &self.entries {
			let slot = match groups.iter().position(|g| g.category == entry.category) {
				Some(i) => i,
				None => {
					groups.push(CategoryGroup {
						category: entry.category,
						entries: Vec::new(),
					});
					groups.len() - 1
				}
			};
			if entry.matches(&needle) {
				groups[slot].entries.push(entry.clone());
			}
		}
		groups.retain(|g| !g.entries.is_empty());
		groups
	}
}

/// Fetched catalogs keyed by the provider filter they were requested with.
#[derive(Clone, Debug, Default)]
pub struct CatalogCache {
	by_cloud: HashMap<Option<Cloud>, Catalog>,
}

impl CatalogCache {
	/// Empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Cached catalog for `cloud`, if fetched before.
	pub fn get(&self, cloud: Option<Cloud>) -> Option<&Catalog> {
		self.by_cloud.get(&cloud)
	}

	/// Records a successful fetch.
	pub fn insert(&mut self, cloud: Option<Cloud>, catalog: Catalog) {
		self.by_cloud.insert(cloud, catalog);
	}
}

/// What the palette is currently showing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CatalogState {
	/// No provider chosen yet.
	#[default]
	Idle,
	/// Request in flight.
	Loading,
	/// Entries available.
	Loaded(Catalog),
	/// Request failed with a message.
	Failed(String),
}

impl CatalogState {
	/// The loaded catalog, if any.
	pub fn catalog(&self) -> Option<&Catalog> {
		match self {
			CatalogState::Loaded(c) => Some(c),
			_ => None,
		}
	}

	/// Message for the palette body when there are no groups to list.
	pub fn placeholder(&self, has_groups: bool) -> Option<&str> {
		match self {
			CatalogState::Idle => Some("Select a cloud provider to load nodes"),
			CatalogState::Loading => Some("Loading nodes..."),
			CatalogState::Failed(msg) => Some(msg),
			CatalogState::Loaded(_) if !has_groups => Some("No nodes found"),
			CatalogState::Loaded(_) => None,
		}
	}
}
