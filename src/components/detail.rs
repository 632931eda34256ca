//! Document detail view: summary fetch/normalization, safe markdown
//! rendering, the research chart and the assistant chat.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::api::{self, DocumentSummary, SearchResult};
use crate::components::chart::ResearchChart;
use crate::components::chat::ChatPanel;
use crate::markdown;

/// Full-page detail view for a clicked node or search result.
///
/// A search result that already carries summary text is used directly;
/// otherwise the title is sent to the summary service. Any failure swaps in
/// the canned fallback document and shows a demo-data banner.
#[component]
pub fn DocumentDetail(
	document: SearchResult,
	#[prop(into)] on_back: Callback<()>,
) -> impl IntoView {
	let title = document.title.clone();
	let summary: RwSignal<Option<DocumentSummary>> = RwSignal::new(None);
	let is_loading = RwSignal::new(true);
	let error: RwSignal<Option<String>> = RwSignal::new(None);

	{
		let document = document.clone();
		spawn_local(async move {
			if let Some(direct) = DocumentSummary::from_search_result(&document) {
				summary.set(Some(direct));
				is_loading.set(false);
				return;
			}
			match api::fetch_summary(&document.title).await {
				Ok(data) => summary.set(Some(data)),
				Err(e) => {
					warn!("summary fetch failed: {e}");
					error.set(Some(format!("{e}. Showing demo data.")));
					summary.set(Some(api::fallback_summary(&document.title)));
				}
			}
			is_loading.set(false);
		});
	}

	view! {
		<div class="detail-page">
			<button class="back-button" on:click=move |_| on_back.run(())>
				"← Back to Cosmic Explorer"
			</button>
			<Show when=move || is_loading.get()>
				<div class="detail-loading">
					<h3>"Loading Research Data"</h3>
					<p>{format!("Analyzing: {title}")}</p>
				</div>
			</Show>
			{move || {
				error.get().map(|message| {
					view! {
						<div class="detail-banner">
							<span class="detail-banner-label">"Demo data"</span>
							<span>{message}</span>
						</div>
					}
				})
			}}
			{move || {
				summary.get().map(|data| {
					view! {
						<div class="detail-body">
							<div class="detail-main">
								<h1 class="detail-title">{data.title.clone()}</h1>
								<div class="detail-meta">
									<span class="detail-topic">{data.topic.clone()}</span>
									<span>{format!("Published {}", data.published_date)}</span>
									<span>{format!("{}% confidence", (data.confidence * 100.0).round())}</span>
								</div>
								<div class="detail-tags">
									{data.tags
										.iter()
										.map(|tag| view! { <span class="detail-tag">{tag.clone()}</span> })
										.collect_view()}
								</div>
								<section
									class="detail-summary markdown-content"
									inner_html=markdown::to_html(&data.summary)
								/>
								{(!data.key_points.is_empty()).then(|| {
									view! {
										<section class="detail-section">
											<h2>"Key Findings"</h2>
											<ul>
												{data.key_points
													.iter()
													.map(|point| view! { <li>{point.clone()}</li> })
													.collect_view()}
											</ul>
										</section>
									}
								})}
								<section class="detail-section">
									<h2>"Methodology"</h2>
									<p>{data.methodology.clone()}</p>
								</section>
								<section class="detail-section">
									<h2>"Research Team"</h2>
									<p>{data.authors.join(", ")}</p>
								</section>
								<section class="detail-section">
									<ResearchChart />
								</section>
							</div>
							<ChatPanel document_title=data.title.clone() />
						</div>
					}
				})
			}}
		</div>
	}
}
