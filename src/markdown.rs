//! Markdown rendering for remote summary text.
//!
//! The summaries come from a third-party service, so raw HTML embedded in
//! them is never passed through: every `Html` event is downgraded to text
//! and escaped on the way out. `outline` extracts the section structure
//! that summary documents follow (Summary, Key Findings, ...).

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

/// Render untrusted markdown to HTML with raw HTML neutralized.
pub fn to_html(source: &str) -> String {
	let parser = Parser::new_ext(source, Options::empty());
	let events = parser.map(|event| match event {
		Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
		other => other,
	});

	let mut out = String::new();
	html::push_html(&mut out, events);
	out
}

/// Heading-delimited view of a summary document.
#[derive(Clone, Debug, Default)]
pub struct Outline {
	sections: Vec<Section>,
}

#[derive(Clone, Debug, Default)]
struct Section {
	title: String,
	text: String,
	items: Vec<String>,
}

impl Outline {
	/// Prose of the named section, if present and non-empty.
	pub fn section(&self, title: &str) -> Option<&str> {
		self.sections
			.iter()
			.find(|s| s.title.eq_ignore_ascii_case(title))
			.map(|s| s.text.trim())
			.filter(|text| !text.is_empty())
	}

	/// List items of the named section; empty when absent.
	pub fn list_items(&self, title: &str) -> Vec<String> {
		self.sections
			.iter()
			.find(|s| s.title.eq_ignore_ascii_case(title))
			.map(|s| s.items.clone())
			.unwrap_or_default()
	}
}

/// Walk the event stream and bucket text and list items under the nearest
/// preceding heading.
pub fn outline(source: &str) -> Outline {
	let mut sections: Vec<Section> = Vec::new();
	let mut in_heading = false;
	let mut in_item = false;

	for event in Parser::new_ext(source, Options::empty()) {
		match event {
			Event::Start(Tag::Heading { .. }) => {
				in_heading = true;
				sections.push(Section::default());
			}
			Event::End(TagEnd::Heading(_)) => in_heading = false,
			Event::Start(Tag::Item) => {
				in_item = true;
				if let Some(section) = sections.last_mut() {
					section.items.push(String::new());
				}
			}
			Event::End(TagEnd::Item) => {
				in_item = false;
				if let Some(section) = sections.last_mut() {
					if let Some(item) = section.items.last_mut() {
						let trimmed = item.trim().to_string();
						*item = trimmed;
					}
					section.items.retain(|item| !item.is_empty());
				}
			}
			Event::Text(text) | Event::Code(text) => {
				let Some(section) = sections.last_mut() else {
					continue;
				};
				if in_heading {
					section.title.push_str(&text);
				} else if in_item {
					if let Some(item) = section.items.last_mut() {
						item.push_str(&text);
					}
				} else {
					section.text.push_str(&text);
				}
			}
			Event::SoftBreak | Event::HardBreak => {
				if let Some(section) = sections.last_mut() {
					if in_item {
						if let Some(item) = section.items.last_mut() {
							item.push(' ');
						}
					} else if !in_heading {
						section.text.push(' ');
					}
				}
			}
			Event::End(TagEnd::Paragraph) => {
				if let Some(section) = sections.last_mut() {
					section.text.push('\n');
				}
			}
			_ => {}
		}
	}

	Outline { sections }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn heading_renders_before_paragraph() {
		let out = to_html("# Title\n\nBody");
		let h1 = out.find("<h1").expect("no h1 emitted");
		let p = out.find("<p").expect("no p emitted");
		assert!(h1 < p);
	}

	#[test]
	fn raw_script_tags_are_never_emitted() {
		let out = to_html("hello <script>alert(1)</script> world");
		assert!(!out.contains("<script"));
		assert!(out.contains("&lt;script&gt;"));

		let block = to_html("<script>\nalert(1)\n</script>");
		assert!(!block.contains("<script"));
	}

	#[test]
	fn ordinary_markdown_still_renders() {
		let out = to_html("**bold** and [link](https://example.com) and `code`");
		assert!(out.contains("<strong>bold</strong>"));
		assert!(out.contains("<a href=\"https://example.com\">link</a>"));
		assert!(out.contains("<code>code</code>"));
	}

	#[test]
	fn outline_buckets_prose_and_lists_by_heading() {
		let doc = "# Paper\n\n## Summary\n\nFirst line\ncontinued.\n\n## Key Findings\n\n- one\n- two\n\n## Tags\n\n- space\n";
		let outline = outline(doc);
		assert_eq!(outline.section("Summary"), Some("First line continued."));
		assert_eq!(outline.list_items("Key Findings"), vec!["one", "two"]);
		assert_eq!(outline.list_items("Tags"), vec!["space"]);
		assert_eq!(outline.section("Missing"), None);
		assert!(outline.list_items("Missing").is_empty());
	}

	#[test]
	fn outline_matches_headings_case_insensitively() {
		let outline = outline("## SUMMARY\n\ntext\n");
		assert_eq!(outline.section("Summary"), Some("text"));
	}
}
