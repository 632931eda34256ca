use thiserror::Error;

/// Everything that can go wrong talking to the remote research services.
/// None of these are fatal: panels map them to a chat error message or to
/// demo data plus a banner.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
	/// The fetch itself failed (offline, DNS, CORS).
	#[error("network request failed: {0}")]
	Network(String),
	/// Non-2xx HTTP status.
	#[error("server returned HTTP {0}")]
	Status(u16),
	/// Body was not valid JSON.
	#[error("malformed JSON response: {0}")]
	Json(String),
	/// Well-formed JSON in none of the known shapes.
	#[error("response shape not recognized")]
	UnrecognizedShape,
}
