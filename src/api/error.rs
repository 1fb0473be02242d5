use thiserror::Error;

/// Failure of a backend call.
#[derive(Debug, Error)]
pub enum ApiError {
	/// The request never produced a usable response.
	#[error("request failed: {0}")]
	Transport(#[from] reqwest::Error),
	/// The backend answered with a non-2xx status.
	#[error("API Error: {0}")]
	Status(u16),
	/// A 2xx answer whose body did not match the expected shape.
	#[error("could not decode response: {0}")]
	Decode(#[source] serde_json::Error),
	/// A required input was blank; nothing was sent.
	#[error("{0} is required")]
	MissingField(&'static str),
}

impl ApiError {
	/// True when the call was refused before reaching the network.
	pub fn is_client_side(&self) -> bool {
		matches!(self, ApiError::MissingField(_))
	}
}
