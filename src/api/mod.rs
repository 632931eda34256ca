//! HTTP client for the remote summarization/search and chat services.
//!
//! All calls are plain JSON POSTs with no auth and no retry; every failure
//! is mapped into [`ApiError`] and handled at the panel boundary.

mod error;
mod types;

pub use error::ApiError;
pub use types::{
	DocumentSummary, SearchResult, chat_error_message, extract_chat_reply, fallback_results,
	fallback_summary, normalize_search, normalize_summary,
};

use gloo_net::http::Request;
use serde::Serialize;
use serde_json::Value;

/// Base URL of the research backend.
pub const API_BASE: &str = "https://nasa-hackathon-backend-a-cube.onrender.com";

#[derive(Serialize)]
struct SearchRequest<'a> {
	text: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
	message: &'a str,
	#[serde(rename = "documentTitle")]
	document_title: &'a str,
}

async fn post_json(path: &str, body: &impl Serialize) -> Result<Value, ApiError> {
	let response = Request::post(&format!("{API_BASE}{path}"))
		.json(body)
		.map_err(|e| ApiError::Json(e.to_string()))?
		.send()
		.await
		.map_err(|e| ApiError::Network(e.to_string()))?;

	if !response.ok() {
		return Err(ApiError::Status(response.status()));
	}
	let text = response
		.text()
		.await
		.map_err(|e| ApiError::Network(e.to_string()))?;
	serde_json::from_str(&text).map_err(|e| ApiError::Json(e.to_string()))
}

/// POST the query to the search service and normalize whatever comes back.
pub async fn search(query: &str) -> Result<Vec<SearchResult>, ApiError> {
	let value = post_json("/search", &SearchRequest { text: query.trim() }).await?;
	normalize_search(&value)
}

/// Ask the research assistant about the open document.
pub async fn chat(message: &str, document_title: &str) -> Result<String, ApiError> {
	let value = post_json(
		"/ai-chat",
		&ChatRequest {
			message: message.trim(),
			document_title,
		},
	)
	.await?;
	extract_chat_reply(&value)
}

/// Fetch and normalize the summary document for a title.
pub async fn fetch_summary(title: &str) -> Result<DocumentSummary, ApiError> {
	let value = post_json("/search", &SearchRequest { text: title }).await?;
	normalize_summary(&value, title)
}
