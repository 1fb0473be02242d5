use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Cloud provider a catalog entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cloud {
	/// Google Cloud Platform.
	Gcp,
	/// Amazon Web Services.
	Aws,
	/// Microsoft Azure.
	Azure,
}

impl Cloud {
	/// Every provider, in palette order.
	pub const ALL: [Cloud; 3] = [Cloud::Gcp, Cloud::Aws, Cloud::Azure];

	/// Query-string value.
	pub fn as_str(self) -> &'static str {
		match self {
			Cloud::Gcp => "gcp",
			Cloud::Aws => "aws",
			Cloud::Azure => "azure",
		}
	}

	/// Human readable provider name.
	pub fn label(self) -> &'static str {
		match self {
			Cloud::Gcp => "Google Cloud Platform",
			Cloud::Aws => "Amazon Web Services",
			Cloud::Azure => "Microsoft Azure",
		}
	}

	/// Parses the query-string value.
	pub fn parse(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|c| c.as_str() == s)
	}
}

impl fmt::Display for Cloud {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Palette grouping of catalog entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	/// VMs, containers, serverless.
	Compute,
	/// Networks, balancers, DNS.
	Networking,
	/// Object and block storage.
	Storage,
	/// Managed databases.
	Database,
	/// Queues and pub/sub.
	Messaging,
	/// Identity and secrets.
	Security,
	/// Warehousing and analytics.
	Analytics,
	/// Build and delivery tooling.
	Devops,
}

const COLORS: &[&str] = &[
	"#4285f4", "#9334e6", "#f9ab00", "#ea4335", "#34a853", "#e8710a", "#12b5cb", "#80868b",
];

impl Category {
	/// Parses the wire name (as stored in node data).
	pub fn parse(s: &str) -> Option<Self> {
		Some(match s {
			"compute" => Category::Compute,
			"networking" => Category::Networking,
			"storage" => Category::Storage,
			"database" => Category::Database,
			"messaging" => Category::Messaging,
			"security" => Category::Security,
			"analytics" => Category::Analytics,
			"devops" => Category::Devops,
			_ => return None,
		})
	}

	/// Wire name, as stored in node data.
	pub fn as_str(self) -> &'static str {
		match self {
			Category::Compute => "compute",
			Category::Networking => "networking",
			Category::Storage => "storage",
			Category::Database => "database",
			Category::Messaging => "messaging",
			Category::Security => "security",
			Category::Analytics => "analytics",
			Category::Devops => "devops",
		}
	}

	/// Heading shown above the group.
	pub fn label(self) -> &'static str {
		match self {
			Category::Compute => "Compute",
			Category::Networking => "Networking",
			Category::Storage => "Storage",
			Category::Database => "Databases",
			Category::Messaging => "Messaging",
			Category::Security => "Security",
			Category::Analytics => "Analytics",
			Category::Devops => "DevOps",
		}
	}

	/// Accent colour used on the canvas and in the palette.
	pub fn color(self) -> &'static str {
		COLORS[self as usize % COLORS.len()]
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Colour for a free-form category string; unknown names get a neutral grey.
pub fn category_color(category: &str) -> &'static str {
	Category::parse(category).map_or("#5f6368", Category::color)
}

/// Advisory connection hints for a component type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connections {
	/// Entry ids this type may point to.
	#[serde(default)]
	pub can_connect_to: Vec<String>,
	/// Entry ids that may point to this type.
	#[serde(default)]
	pub can_receive_from: Vec<String>,
}

/// One draggable component type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
	/// Stable id, also used as the node's icon key.
	pub id: String,
	/// Display label.
	pub label: String,
	/// Palette group.
	pub category: Category,
	/// Owning provider.
	pub cloud: Cloud,
	/// Icon name.
	pub icon: String,
	/// One-line description. A `null` from the backend reads as empty.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub description: String,
	/// Advisory connection hints.
	#[serde(default)]
	pub connections: Connections,
}

fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
	Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

impl CatalogEntry {
	/// Case-insensitive match against label or description.
	pub fn matches(&self, needle_lower: &str) -> bool {
		needle_lower.is_empty()
			|| self.label.to_lowercase().contains(needle_lower)
			|| self.description.to_lowercase().contains(needle_lower)
	}
}

/// Entries of one category, as shown in the palette.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryGroup {
	/// Group category.
	pub category: Category,
	/// Entries in catalog order.
	pub entries: Vec<CatalogEntry>,
}
