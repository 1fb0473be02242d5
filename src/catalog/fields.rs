/// An editable config key shown in the node panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigField {
	/// Key in the node's config map.
	pub key: &'static str,
	/// Input label.
	pub label: &'static str,
	/// Input placeholder.
	pub placeholder: &'static str,
}

const fn field(key: &'static str, label: &'static str, placeholder: &'static str) -> ConfigField {
	ConfigField {
		key,
		label,
		placeholder,
	}
}

const GENERIC: &[ConfigField] = &[field("name", "Name", "Enter name")];

const COMPUTE_ENGINE: &[ConfigField] = &[
	field("name", "Instance Name", "my-instance"),
	field("machineType", "Machine Type", "e2-medium"),
	field("zone", "Zone", "us-central1-a"),
];
const CLOUD_RUN: &[ConfigField] = &[
	field("name", "Service Name", "my-service"),
	field("image", "Container Image", "gcr.io/project/image"),
	field("region", "Region", "us-central1"),
];
const CLOUD_STORAGE: &[ConfigField] = &[
	field("name", "Bucket Name", "my-bucket"),
	field("location", "Location", "US"),
	field("storageClass", "Storage Class", "STANDARD"),
];
const CLOUD_SQL: &[ConfigField] = &[
	field("name", "Instance Name", "my-db-instance"),
	field("database", "Database Name", "mydb"),
	field("tier", "Tier", "db-f1-micro"),
];
const VPC: &[ConfigField] = &[
	field("name", "VPC Name", "my-vpc"),
	field("cidr", "IP Range", "10.0.0.0/16"),
];
const PUB_SUB: &[ConfigField] = &[
	field("topicName", "Topic Name", "my-topic"),
	field("subscription", "Subscription", "my-subscription"),
];

/// Fields offered for a component type; unknown types get a single `name`.
pub fn config_fields(entry_id: &str) -> &'static [ConfigField] {
	match entry_id {
		"compute-engine" => COMPUTE_ENGINE,
		"cloud-run" => CLOUD_RUN,
		"cloud-storage" => CLOUD_STORAGE,
		"cloud-sql" => CLOUD_SQL,
		"vpc" => VPC,
		"pub-sub" => PUB_SUB,
		_ => GENERIC,
	}
}
