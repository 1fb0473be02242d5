use log::{info, warn};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
	ExecuteRequest, ExecuteResponse, GenerateGraphResponse, GenerateTerraformRequest, InfraSpec,
	RunFiles, RunLogs, RunStatus, TerraformRun,
};
use crate::catalog::{CatalogEntry, Cloud};

/// Typed wrapper over the generation/deployment backend.
///
/// Cheap to clone. Non-2xx answers become [`ApiError::Status`]; nothing is
/// retried.
#[derive(Clone, Debug)]
pub struct ApiClient {
	base: String,
	http: Client,
}

impl ApiClient {
	/// Client for the backend at `base_url`.
	pub fn new(base_url: impl Into<String>) -> Self {
		let base: String = base_url.into();
		Self {
			base: base.trim_end_matches('/').to_owned(),
			http: Client::new(),
		}
	}

	/// Base URL without trailing slash.
	pub fn base_url(&self) -> &str {
		&self.base
	}

	fn url(&self, path: &str) -> String {
		format!("{}/{}", self.base, path.trim_start_matches('/'))
	}

	fn nodes_url(&self, cloud: Option<Cloud>) -> String {
		match cloud {
			Some(c) => format!("{}?cloud={c}", self.url("nodes")),
			None => self.url("nodes"),
		}
	}

	/// `GET /nodes[?cloud=..]`
	pub async fn fetch_nodes(&self, cloud: Option<Cloud>) -> Result<Vec<CatalogEntry>, ApiError> {
		let url = self.nodes_url(cloud);
		info!("fetching catalog from {url}");
		send_json(self.http.get(url)).await
	}

	/// `POST /generate-graph` with the prompt as a multipart field.
	pub async fn generate_graph(&self, prompt: &str) -> Result<GenerateGraphResponse, ApiError> {
		let prompt = prompt.trim();
		if prompt.is_empty() {
			return Err(ApiError::MissingField("prompt"));
		}
		info!("generating graph ({} chars of prompt)", prompt.len());
		let form = Form::new().text("prompt", prompt.to_owned());
		send_json(self.http.post(self.url("generate-graph")).multipart(form)).await
	}

	/// `POST /generate_terraform`
	pub async fn generate_terraform(&self, spec: &InfraSpec) -> Result<TerraformRun, ApiError> {
		if spec.project_name.is_empty() {
			return Err(ApiError::MissingField("project name"));
		}
		info!("generating terraform for {} resources", spec.resources.len());
		let body = GenerateTerraformRequest { infra_spec: spec };
		send_json(self.http.post(self.url("generate_terraform")).json(&body)).await
	}

	/// `GET /{run_id}`
	pub async fn run_files(&self, run_id: &str) -> Result<RunFiles, ApiError> {
		send_json(self.http.get(self.url(run_id))).await
	}

	/// `GET /runs/{run_id}/status`
	pub async fn run_status(&self, run_id: &str) -> Result<RunStatus, ApiError> {
		send_json(self.http.get(self.url(&format!("runs/{run_id}/status")))).await
	}

	/// `GET /runs/{run_id}/logs`
	pub async fn run_logs(&self, run_id: &str) -> Result<RunLogs, ApiError> {
		send_json(self.http.get(self.url(&format!("runs/{run_id}/logs")))).await
	}

	/// `POST /execute`
	pub async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, ApiError> {
		info!("{:?} run {} in {}", request.action, request.run_id, request.project_id);
		send_json(self.http.post(self.url("execute")).json(request)).await
	}
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
	let response = request.header("accept", "application/json").send().await?;
	let status = response.status();
	if !status.is_success() {
		warn!("{} answered {status}", response.url());
		return Err(ApiError::Status(status.as_u16()));
	}
	let body = response.text().await?;
	decode_body(&body)
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
	serde_json::from_str(body).map_err(|err| {
		warn!("unexpected response body: {err}");
		ApiError::Decode(err)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::DeployAction;

	#[test]
	fn urls_are_joined_once() {
		let client = ApiClient::new("http://localhost:8000/");
		assert_eq!(client.base_url(), "http://localhost:8000");
		assert_eq!(client.url("/generate-graph"), "http://localhost:8000/generate-graph");
		assert_eq!(client.url("run-42"), "http://localhost:8000/run-42");
	}

	#[test]
	fn nodes_url_carries_provider_filter() {
		let client = ApiClient::new("http://api");
		assert_eq!(client.nodes_url(None), "http://api/nodes");
		assert_eq!(client.nodes_url(Some(Cloud::Azure)), "http://api/nodes?cloud=azure");
	}

	#[test]
	fn execute_body_matches_backend_contract() {
		let req = ExecuteRequest::new("run-1", DeployAction::Destroy, " proj ", "{}").unwrap();
		let body = serde_json::to_value(&req).unwrap();
		assert_eq!(body["action"], "destroy");
		assert_eq!(body["project_id"], "proj");
		assert_eq!(body["auto_approve"], true);
	}

	#[test]
	fn blank_project_is_refused_before_sending() {
		let err = ExecuteRequest::new("run-1", DeployAction::Apply, "   ", "{}").unwrap_err();
		assert!(err.is_client_side());
		assert_eq!(err.to_string(), "project id is required");
	}

	#[test]
	fn blank_service_account_key_is_refused_before_sending() {
		for key in ["", "  \n\t"] {
			let err = ExecuteRequest::new("run-1", DeployAction::Apply, "proj", key).unwrap_err();
			assert!(err.is_client_side());
			assert_eq!(err.to_string(), "service account key is required");
		}
	}

	#[test]
	fn malformed_body_is_a_decode_error() {
		let err = decode_body::<RunStatus>("<html>Bad Gateway</html>").unwrap_err();
		assert!(matches!(err, ApiError::Decode(_)));
		assert!(!err.is_client_side());
		assert!(err.to_string().starts_with("could not decode response"));

		let err = decode_body::<RunStatus>(r#"{"run_id":"r"}"#).unwrap_err();
		assert!(matches!(err, ApiError::Decode(_)));
	}

	#[test]
	fn status_payload_parses() {
		let raw = r#"{"run_id":"r","status":"running","phase":"terraform plan","updated_at":1700000000.5}"#;
		let status: crate::api::RunStatus = serde_json::from_str(raw).unwrap();
		assert_eq!(status.status, crate::api::RunState::Running);
		assert!(!status.status.is_terminal());
		assert_eq!(status.phase.as_deref(), Some("terraform plan"));
		assert!(status.error.is_none());
	}

	#[test]
	fn generation_without_graph_is_accepted() {
		let raw = r#"{"summary":"nothing to build"}"#;
		let resp: GenerateGraphResponse = serde_json::from_str(raw).unwrap();
		assert!(resp.graph.is_none());
		assert!(resp.plan.is_none());
	}
}
