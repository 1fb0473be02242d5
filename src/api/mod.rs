//! Client for the external generation and deployment backend.

mod client;
mod error;
mod infra;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
	DeployAction, ExecuteRequest, ExecuteResponse, GenerateGraphResponse, GeneratedGraph,
	GenerationPlan, InfraResource, InfraSpec, RunFiles, RunLogs, RunState, RunStatus, TerraformRun,
};
