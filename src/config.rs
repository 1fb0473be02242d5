//! Build-time application settings.

use std::time::Duration;

/// Backend used when `CLOUD_CANVAS_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// `localStorage` key for the saved diagram.
pub const STORAGE_KEY: &str = "gcp-architecture";
/// File name offered by JSON export.
pub const EXPORT_FILE_NAME: &str = "architecture.json";
/// Region used for generated infrastructure.
pub const DEFAULT_REGION: &str = "us-central1";

const DEFAULT_POLL_MS: u64 = 2000;

/// Settings shared by every view, provided through context.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// Backend base URL without a trailing slash.
	pub api_base_url: String,
	/// Interval between deployment status/log polls.
	pub poll_interval: Duration,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_URL.into(),
			poll_interval: Duration::from_millis(DEFAULT_POLL_MS),
		}
	}
}

impl AppConfig {
	/// Reads `CLOUD_CANVAS_API_URL` and `CLOUD_CANVAS_POLL_MS` as baked in at
	/// compile time.
	pub fn from_build_env() -> Self {
		Self::from_values(
			option_env!("CLOUD_CANVAS_API_URL"),
			option_env!("CLOUD_CANVAS_POLL_MS"),
		)
	}

	fn from_values(api_url: Option<&str>, poll_ms: Option<&str>) -> Self {
		let mut config = Self::default();
		if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
			config.api_base_url = url.trim_end_matches('/').to_owned();
		}
		if let Some(ms) = poll_ms.and_then(|v| v.trim().parse::<u64>().ok()) {
			// floor at 250ms
			config.poll_interval = Duration::from_millis(ms.max(250));
		}
		config
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_when_unset() {
		assert_eq!(AppConfig::from_values(None, None), AppConfig::default());
	}

	#[test]
	fn trims_trailing_slash_and_clamps_poll() {
		let config = AppConfig::from_values(Some("https://api.example.com/"), Some("10"));
		assert_eq!(config.api_base_url, "https://api.example.com");
		assert_eq!(config.poll_interval, Duration::from_millis(250));
	}

	#[test]
	fn ignores_garbage_poll_value() {
		let config = AppConfig::from_values(Some("  "), Some("soon"));
		assert_eq!(config, AppConfig::default());
	}
}
