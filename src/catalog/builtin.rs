use super::types::{CatalogEntry, Category, Cloud, Connections};

fn entry(
	id: &str,
	label: &str,
	category: Category,
	icon: &str,
	description: &str,
	connect_to: &[&str],
	receive_from: &[&str],
) -> CatalogEntry {
	let owned = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect();
	CatalogEntry {
		id: id.into(),
		label: label.into(),
		category,
		cloud: Cloud::Gcp,
		icon: icon.into(),
		description: description.into(),
		connections: Connections {
			can_connect_to: owned(connect_to),
			can_receive_from: owned(receive_from),
		},
	}
}

const SERVERLESS: &[&str] = &["compute-engine", "cloud-run", "app-engine", "gke-cluster"];

/// The GCP component table bundled with the app.
pub fn gcp() -> Vec<CatalogEntry> {
	use Category::*;
	vec![
		entry(
			"compute-engine",
			"Compute Engine",
			Compute,
			"Server",
			"Virtual machines on GCP",
			&["cloud-storage", "cloud-sql", "firestore", "pub-sub", "vpc"],
			&["load-balancer", "vpc", "cloud-nat"],
		),
		entry(
			"cloud-run",
			"Cloud Run",
			Compute,
			"Cloud",
			"Serverless container platform",
			&["cloud-storage", "cloud-sql", "firestore", "pub-sub", "secret-manager"],
			&["load-balancer", "pub-sub", "cloud-tasks"],
		),
		entry(
			"app-engine",
			"App Engine",
			Compute,
			"Layers",
			"Fully managed serverless platform",
			&["cloud-storage", "cloud-sql", "firestore", "pub-sub"],
			&["load-balancer"],
		),
		entry(
			"gke-cluster",
			"GKE Cluster",
			Compute,
			"Container",
			"Managed Kubernetes cluster",
			&["cloud-storage", "cloud-sql", "firestore", "pub-sub", "vpc"],
			&["load-balancer", "vpc"],
		),
		entry(
			"vpc",
			"VPC",
			Networking,
			"Network",
			"Virtual Private Cloud",
			&["subnet", "compute-engine", "gke-cluster"],
			&["cloud-nat", "load-balancer"],
		),
		entry(
			"subnet",
			"Subnet",
			Networking,
			"Workflow",
			"VPC subnet",
			&["compute-engine", "gke-cluster"],
			&["vpc"],
		),
		entry(
			"load-balancer",
			"Load Balancer",
			Networking,
			"Globe",
			"Cloud Load Balancer",
			SERVERLESS,
			&["cloud-dns"],
		),
		entry(
			"cloud-nat",
			"Cloud NAT",
			Networking,
			"Radio",
			"Network Address Translation",
			&["vpc"],
			&["compute-engine", "gke-cluster"],
		),
		entry(
			"cloud-dns",
			"Cloud DNS",
			Networking,
			"Globe",
			"DNS service",
			&["load-balancer"],
			&[],
		),
		entry(
			"cloud-storage",
			"Cloud Storage",
			Storage,
			"HardDrive",
			"Object storage bucket",
			&["bigquery"],
			SERVERLESS,
		),
		entry(
			"persistent-disk",
			"Persistent Disk",
			Storage,
			"HardDrive",
			"Block storage for VMs",
			&[],
			&["compute-engine", "gke-cluster"],
		),
		entry(
			"cloud-sql",
			"Cloud SQL",
			Database,
			"Database",
			"Managed MySQL/PostgreSQL",
			&[],
			SERVERLESS,
		),
		entry(
			"firestore",
			"Firestore",
			Database,
			"Database",
			"NoSQL document database",
			&[],
			SERVERLESS,
		),
		entry(
			"bigquery",
			"BigQuery",
			Database,
			"BarChart3",
			"Data warehouse & analytics",
			&[],
			&["cloud-storage"],
		),
		entry(
			"pub-sub",
			"Pub/Sub",
			Messaging,
			"MessageSquare",
			"Messaging and streaming",
			&["cloud-run", "compute-engine", "gke-cluster"],
			SERVERLESS,
		),
		entry(
			"cloud-tasks",
			"Cloud Tasks",
			Messaging,
			"FileText",
			"Task queue service",
			&["cloud-run", "app-engine"],
			&["compute-engine", "cloud-run", "app-engine"],
		),
		entry(
			"iam-role",
			"IAM Role",
			Security,
			"Shield",
			"Identity and Access Management",
			&["service-account"],
			&[],
		),
		entry(
			"service-account",
			"Service Account",
			Security,
			"Key",
			"Service identity",
			&["compute-engine", "cloud-run", "gke-cluster"],
			&["iam-role"],
		),
		entry(
			"secret-manager",
			"Secret Manager",
			Security,
			"Lock",
			"Secrets management",
			&[],
			SERVERLESS,
		),
	]
}
