use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;
use crate::catalog::Cloud;
use crate::graph::{Edge, MonitoringPolicy, Node, NodeConfig};

/// Canvas-ready graph produced from a prompt.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GeneratedGraph {
	/// Nodes to load.
	pub nodes: Vec<Node>,
	/// Edges to load.
	pub edges: Vec<Edge>,
}

/// Planner output attached to a generation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GenerationPlan {
	/// Monitoring policies for the generated resources.
	#[serde(default)]
	pub monitoring: Vec<MonitoringPolicy>,
}

/// Response of `POST /generate-graph`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GenerateGraphResponse {
	/// The graph, absent when the generator produced nothing loadable.
	#[serde(default)]
	pub graph: Option<GeneratedGraph>,
	/// Assistant summary of what was built.
	#[serde(default)]
	pub summary: Option<String>,
	/// Optional planner details.
	#[serde(default)]
	pub plan: Option<GenerationPlan>,
}

/// One resource of an infrastructure request, derived from a canvas node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InfraResource {
	/// Id of the originating node.
	pub id: String,
	/// Catalog id of the component type.
	#[serde(rename = "type")]
	pub kind: String,
	/// Resource name: the configured `name`, else the node label.
	pub name: String,
	/// Catalog category.
	pub category: String,
	/// Saved node config.
	pub config: NodeConfig,
	/// Ids of nodes this one has outgoing edges to.
	pub connects_to: Vec<String>,
}

/// Body of `infra_spec` for `POST /generate_terraform`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InfraSpec {
	/// Target provider.
	pub provider: Cloud,
	/// Prefix for generated resource names.
	pub project_name: String,
	/// Deployment region.
	pub region: String,
	/// Resources to generate.
	pub resources: Vec<InfraResource>,
}

#[derive(Serialize)]
pub(super) struct GenerateTerraformRequest<'a> {
	pub infra_spec: &'a InfraSpec,
}

/// Response of `POST /generate_terraform`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TerraformRun {
	/// Id of the generated run.
	pub run_id: String,
	/// Names of the generated files.
	#[serde(default)]
	pub files: Vec<String>,
}

/// Response of `GET /{run_id}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RunFiles {
	/// Run id echoed back.
	pub run_id: String,
	/// File name to file contents.
	#[serde(default)]
	pub files: BTreeMap<String, String>,
}

/// Lifecycle of a deployment run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
	/// Accepted, not started.
	Initializing,
	/// Terraform is executing.
	Running,
	/// Finished successfully.
	Completed,
	/// Finished with an error.
	Failed,
}

impl RunState {
	/// True once the run can no longer change.
	pub fn is_terminal(self) -> bool {
		matches!(self, RunState::Completed | RunState::Failed)
	}
}

impl fmt::Display for RunState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			RunState::Initializing => "initializing",
			RunState::Running => "running",
			RunState::Completed => "completed",
			RunState::Failed => "failed",
		})
	}
}

/// Response of `GET /runs/{run_id}/status`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RunStatus {
	/// Run id echoed back.
	pub run_id: String,
	/// Current state.
	pub status: RunState,
	/// Executor phase label, e.g. `terraform init`.
	#[serde(default)]
	pub phase: Option<String>,
	/// Unix timestamp of the last update.
	#[serde(default)]
	pub updated_at: Option<f64>,
	/// Failure reason.
	#[serde(default)]
	pub error: Option<String>,
	/// Terraform state, once available.
	#[serde(default)]
	pub tfstate: Option<Value>,
}

/// Response of `GET /runs/{run_id}/logs`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RunLogs {
	/// Run id echoed back.
	pub run_id: String,
	/// Whole log as one string.
	#[serde(default)]
	pub logs: String,
	/// Log split into lines.
	#[serde(default)]
	pub lines: Vec<String>,
}

/// What `POST /execute` should do with a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployAction {
	/// `terraform apply`.
	Apply,
	/// `terraform destroy`.
	Destroy,
}

/// Body of `POST /execute`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExecuteRequest {
	/// Run to execute.
	pub run_id: String,
	/// Apply or destroy.
	pub action: DeployAction,
	/// Target cloud project.
	pub project_id: String,
	/// Service-account key JSON, passed through verbatim.
	pub sa_key_json: String,
	/// Skip interactive approval.
	pub auto_approve: bool,
}

impl ExecuteRequest {
	/// Builds an auto-approved request, refusing a blank run id, project id or key.
	pub fn new(
		run_id: &str,
		action: DeployAction,
		project_id: &str,
		sa_key_json: impl Into<String>,
	) -> Result<Self, ApiError> {
		let run_id = run_id.trim();
		if run_id.is_empty() {
			return Err(ApiError::MissingField("run id"));
		}
		let project_id = project_id.trim();
		if project_id.is_empty() {
			return Err(ApiError::MissingField("project id"));
		}
		let sa_key_json = sa_key_json.into();
		if sa_key_json.trim().is_empty() {
			return Err(ApiError::MissingField("service account key"));
		}
		Ok(Self {
			run_id: run_id.into(),
			action,
			project_id: project_id.into(),
			sa_key_json,
			auto_approve: true,
		})
	}
}

/// Response of `POST /execute`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExecuteResponse {
	/// Backend acknowledgement, e.g. `started`.
	pub status: String,
}
