//! Typed records for the remote services plus the normalization functions
//! turning their loosely-shaped JSON into them. The remote API answers in
//! several shapes depending on deployment; each normalizer probes the known
//! ones explicitly and reports anything else as `UnrecognizedShape` instead
//! of guessing.

use serde_json::Value;

use super::error::ApiError;
use crate::markdown;

/// One entry of the search dropdown.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
	pub id: String,
	pub title: String,
	pub topic: String,
	pub content: Option<String>,
	pub relevance: f64,
	pub summary: Option<String>,
	pub document_id: Option<String>,
}

/// Normalized summary document for the detail view.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentSummary {
	pub title: String,
	pub topic: String,
	pub summary: String,
	pub key_points: Vec<String>,
	pub authors: Vec<String>,
	pub published_date: String,
	pub methodology: String,
	pub confidence: f64,
	pub tags: Vec<String>,
}

impl DocumentSummary {
	/// Build a summary straight from a search result that already carries
	/// its text, skipping the summary fetch entirely.
	pub fn from_search_result(result: &SearchResult) -> Option<Self> {
		let summary = result.summary.clone().or_else(|| result.content.clone())?;
		Some(Self {
			title: result.title.clone(),
			topic: result.topic.clone(),
			summary,
			key_points: Vec::new(),
			authors: vec!["Research Team".into()],
			published_date: "2024-01-15".into(),
			methodology: "Advanced computational analysis".into(),
			confidence: result.relevance,
			tags: vec![result.topic.clone()],
		})
	}
}

/// First string value under any of the given keys.
fn str_field(item: &Value, keys: &[&str]) -> Option<String> {
	keys.iter()
		.filter_map(|key| item.get(*key))
		.find_map(|v| v.as_str().map(str::to_string))
}

/// First numeric value under any of the given keys.
fn num_field(item: &Value, keys: &[&str]) -> Option<f64> {
	keys.iter()
		.filter_map(|key| item.get(*key))
		.find_map(Value::as_f64)
}

/// First string-array value under any of the given keys.
fn list_field(item: &Value, keys: &[&str]) -> Option<Vec<String>> {
	keys.iter()
		.filter_map(|key| item.get(*key))
		.find_map(Value::as_array)
		.map(|items| {
			items
				.iter()
				.filter_map(|v| v.as_str().map(str::to_string))
				.collect()
		})
}

impl SearchResult {
	fn from_value(item: &Value, index: usize) -> Self {
		let id = item
			.get("id")
			.map(|v| match v {
				Value::String(s) => s.clone(),
				other => other.to_string(),
			})
			.unwrap_or_else(|| format!("result-{index}"));
		Self {
			document_id: str_field(item, &["documentId", "id"]),
			title: str_field(item, &["title", "name", "filename"])
				.unwrap_or_else(|| "Untitled Document".into()),
			topic: str_field(item, &["topic", "category", "type"])
				.unwrap_or_else(|| "General Research".into()),
			content: str_field(item, &["content", "description", "abstract"]),
			relevance: num_field(item, &["relevance", "score", "confidence"]).unwrap_or(0.5),
			summary: str_field(item, &["summary", "overview"]),
			id,
		}
	}
}

/// Normalize a search response: a bare array, a `results`/`documents`/`data`
/// wrapper, or a single result object. Results come back sorted by
/// relevance, best first.
pub fn normalize_search(value: &Value) -> Result<Vec<SearchResult>, ApiError> {
	let items: Vec<&Value> = if let Some(array) = value.as_array() {
		array.iter().collect()
	} else if let Some(array) = ["results", "documents", "data"]
		.iter()
		.filter_map(|key| value.get(*key))
		.find_map(Value::as_array)
	{
		array.iter().collect()
	} else if value.is_object() && str_field(value, &["title", "name", "filename"]).is_some() {
		vec![value]
	} else {
		return Err(ApiError::UnrecognizedShape);
	};

	let mut results: Vec<SearchResult> = items
		.iter()
		.enumerate()
		.map(|(index, item)| SearchResult::from_value(item, index))
		.collect();
	results.sort_by(|a, b| {
		b.relevance
			.partial_cmp(&a.relevance)
			.unwrap_or(std::cmp::Ordering::Equal)
	});
	Ok(results)
}

/// Extract the assistant's reply: a bare string, or the first present
/// string field of the known priority list.
pub fn extract_chat_reply(value: &Value) -> Result<String, ApiError> {
	if let Some(text) = value.as_str() {
		return Ok(text.to_string());
	}
	str_field(
		value,
		&[
			"response",
			"message",
			"answer",
			"text",
			"content",
			"reply",
			"output",
			"result",
			"ai_response",
		],
	)
	.ok_or(ApiError::UnrecognizedShape)
}

/// User-visible chat message for a failed assistant request.
pub fn chat_error_message(error: &ApiError) -> String {
	let detail = match error {
		ApiError::Network(_) => "Network connection failed. Please check your internet connection.",
		ApiError::Status(_) => "Server error occurred. Please try again later.",
		ApiError::Json(_) => "Invalid response format from server.",
		ApiError::UnrecognizedShape => "The assistant service sent an unexpected reply.",
	};
	format!(
		"I apologize, but I'm having trouble connecting to the research database right now. {detail}"
	)
}

/// Normalize a summary response for `requested_title`: first element of a
/// bare array or `results` wrapper, or a single object carrying a
/// `summary`/`content` field.
pub fn normalize_summary(value: &Value, requested_title: &str) -> Result<DocumentSummary, ApiError> {
	let item = if let Some(array) = value.as_array() {
		array.first().ok_or(ApiError::UnrecognizedShape)?
	} else if let Some(array) = value.get("results").and_then(Value::as_array) {
		array.first().ok_or(ApiError::UnrecognizedShape)?
	} else if value.get("summary").is_some() || value.get("content").is_some() {
		value
	} else {
		return Err(ApiError::UnrecognizedShape);
	};

	let topic = str_field(item, &["topic", "category"]).unwrap_or_else(|| "Cosmic Research".into());
	Ok(DocumentSummary {
		title: str_field(item, &["title"]).unwrap_or_else(|| requested_title.to_string()),
		summary: str_field(item, &["summary", "content", "description", "abstract"])
			.unwrap_or_else(|| format!("Detailed analysis of {requested_title}")),
		key_points: list_field(item, &["keyPoints", "keyFindings"]).unwrap_or_else(|| {
			vec![
				"Comprehensive data analysis".into(),
				"Advanced research methodology".into(),
				"Scientific validation".into(),
			]
		}),
		authors: list_field(item, &["authors"])
			.unwrap_or_else(|| vec!["NASA Research Team".into()]),
		published_date: str_field(item, &["publishedDate", "date"])
			.unwrap_or_else(|| "2024-01-15".into()),
		methodology: str_field(item, &["methodology"])
			.unwrap_or_else(|| "Multi-spectral analysis and computational modeling".into()),
		confidence: num_field(item, &["confidence", "relevance"]).unwrap_or(0.85),
		tags: list_field(item, &["tags"]).unwrap_or_else(|| vec![topic.clone()]),
		topic,
	})
}

/// Fixed demo entries shown when the search service is unreachable.
pub fn fallback_results(query: &str) -> Vec<SearchResult> {
	vec![
		SearchResult {
			id: "1".into(),
			title: format!("{query} - Research Analysis"),
			topic: "EXOPLANET DISCOVERY".into(),
			content: Some(format!(
				"Comprehensive research findings and data analysis related to {query}. \
				 This study explores new methodologies and provides significant insights."
			)),
			relevance: 0.92,
			summary: Some(format!(
				"Detailed analysis of {query} showing promising results in exoplanet research."
			)),
			document_id: None,
		},
		SearchResult {
			id: "2".into(),
			title: format!("{query} - Data Collection Report"),
			topic: "DARK MATTER".into(),
			content: Some(format!(
				"Statistical analysis and observational data collection for {query}. \
				 Includes methodology, results, and future research directions."
			)),
			relevance: 0.78,
			summary: Some(format!(
				"Observational data and statistical analysis of {query} phenomena."
			)),
			document_id: None,
		},
		SearchResult {
			id: "3".into(),
			title: format!("{query} - Mission Logs"),
			topic: "MARS ROVER LOGS".into(),
			content: Some(format!(
				"Field observations, terrain analysis, and sample collection data related \
				 to {query}. Mission logs from Sol 2500-3100."
			)),
			relevance: 0.85,
			summary: Some(format!("Mars rover mission logs and terrain analysis for {query}.")),
			document_id: None,
		},
	]
}

/// Canned summary document shown when the summary service is unreachable.
/// Sections are pulled out of the markdown outline so the fallback renders
/// through the same pipeline as a live response.
pub fn fallback_summary(title: &str) -> DocumentSummary {
	let source = format!(
		"# {title}\n\n\
		 ## Summary\n\
		 This comprehensive research paper provides detailed analysis and findings related \
		 to {title}. The study incorporates advanced methodologies and data analysis \
		 techniques to uncover significant insights in cosmic research.\n\n\
		 ## Key Findings\n\
		 - Advanced data analysis revealing new patterns\n\
		 - Innovative research methodologies applied\n\
		 - Significant correlations discovered in cosmic data\n\
		 - Enhanced understanding of spatial phenomena\n\n\
		 ## Research Team\n\
		 - Dr. Research Scientist\n\
		 - Prof. Data Analyst\n\
		 - Dr. Cosmic Explorer\n\n\
		 ## Methodology\n\
		 Combined computational analysis, machine learning algorithms, and statistical \
		 validation methods to ensure research accuracy and reliability.\n\n\
		 ## Tags\n\
		 - Cosmic Research\n\
		 - Data Analysis\n\
		 - Space Exploration\n\
		 - Scientific Study\n"
	);
	let outline = markdown::outline(&source);

	DocumentSummary {
		title: title.to_string(),
		topic: "COSMIC RESEARCH".into(),
		summary: outline
			.section("Summary")
			.map(str::to_string)
			.unwrap_or_else(|| format!("Detailed research analysis of {title}.")),
		key_points: outline.list_items("Key Findings"),
		authors: outline.list_items("Research Team"),
		published_date: "2024-01-15".into(),
		methodology: outline
			.section("Methodology")
			.map(str::to_string)
			.unwrap_or_else(|| "Advanced computational analysis".into()),
		confidence: 0.92,
		tags: outline.list_items("Tags"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn array_response_normalizes_each_entry() {
		let value = json!([{"title": "A", "topic": "B"}]);
		let results = normalize_search(&value).unwrap();
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].title, "A");
		assert_eq!(results[0].topic, "B");
		assert_eq!(results[0].relevance, 0.5);
		assert_eq!(results[0].id, "result-0");
	}

	#[test]
	fn wrapped_responses_are_unwrapped() {
		for key in ["results", "documents", "data"] {
			let value = json!({ key: [{"name": "Doc", "category": "Stars", "score": 0.9}] });
			let results = normalize_search(&value).unwrap();
			assert_eq!(results[0].title, "Doc");
			assert_eq!(results[0].topic, "Stars");
			assert_eq!(results[0].relevance, 0.9);
		}
	}

	#[test]
	fn single_object_response_becomes_one_result() {
		let value = json!({"title": "Solo", "id": 7});
		let results = normalize_search(&value).unwrap();
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].id, "7");
	}

	#[test]
	fn search_results_sort_by_relevance_descending() {
		let value = json!([
			{"title": "low", "relevance": 0.2},
			{"title": "high", "relevance": 0.9},
			{"title": "mid", "relevance": 0.5},
		]);
		let results = normalize_search(&value).unwrap();
		let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
		assert_eq!(titles, ["high", "mid", "low"]);
	}

	#[test]
	fn unknown_search_shape_is_a_typed_error() {
		let value = json!({"status": "ok", "count": 3});
		assert_eq!(normalize_search(&value), Err(ApiError::UnrecognizedShape));
	}

	#[test]
	fn chat_reply_honors_field_priority() {
		let value = json!({"message": "second", "response": "first"});
		assert_eq!(extract_chat_reply(&value).unwrap(), "first");
		assert_eq!(extract_chat_reply(&json!("plain")).unwrap(), "plain");
		assert_eq!(
			extract_chat_reply(&json!({"ai_response": "deep"})).unwrap(),
			"deep"
		);
		assert_eq!(
			extract_chat_reply(&json!({"code": 200})),
			Err(ApiError::UnrecognizedShape)
		);
	}

	#[test]
	fn chat_errors_mention_trouble_connecting() {
		for error in [
			ApiError::Network("offline".into()),
			ApiError::Status(500),
			ApiError::Json("eof".into()),
			ApiError::UnrecognizedShape,
		] {
			assert!(chat_error_message(&error).contains("trouble connecting"));
		}
	}

	#[test]
	fn summary_accepts_array_wrapper_and_single_object() {
		let array = json!([{"title": "T", "summary": "S", "confidence": 0.7}]);
		let summary = normalize_summary(&array, "fallback title").unwrap();
		assert_eq!(summary.title, "T");
		assert_eq!(summary.summary, "S");
		assert_eq!(summary.confidence, 0.7);

		let object = json!({"content": "body", "topic": "DARK MATTER"});
		let summary = normalize_summary(&object, "Requested").unwrap();
		assert_eq!(summary.title, "Requested");
		assert_eq!(summary.summary, "body");
		assert_eq!(summary.tags, vec!["DARK MATTER"]);
	}

	#[test]
	fn empty_or_unknown_summary_shapes_are_errors() {
		assert_eq!(
			normalize_summary(&json!([]), "x"),
			Err(ApiError::UnrecognizedShape)
		);
		assert_eq!(
			normalize_summary(&json!({"hits": 0}), "x"),
			Err(ApiError::UnrecognizedShape)
		);
	}

	#[test]
	fn search_result_with_text_skips_the_summary_fetch() {
		let mut result = fallback_results("quasars").remove(0);
		let summary = DocumentSummary::from_search_result(&result).unwrap();
		assert_eq!(summary.title, result.title);
		assert_eq!(summary.confidence, result.relevance);

		result.summary = None;
		result.content = None;
		assert!(DocumentSummary::from_search_result(&result).is_none());
	}

	#[test]
	fn fallback_results_are_nonempty_and_query_specific() {
		let results = fallback_results("pulsars");
		assert_eq!(results.len(), 3);
		assert!(results.iter().all(|r| r.title.contains("pulsars")));
	}

	#[test]
	fn fallback_summary_extracts_its_own_outline() {
		let summary = fallback_summary("Kepler-186f Analysis");
		assert_eq!(summary.title, "Kepler-186f Analysis");
		assert!(summary.summary.contains("Kepler-186f Analysis"));
		assert_eq!(summary.key_points.len(), 4);
		assert_eq!(summary.authors.len(), 3);
		assert_eq!(summary.tags.len(), 4);
	}
}
