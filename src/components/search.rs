//! Centered search overlay: debounced queries against the search service,
//! a results dropdown, and demo results when the service is unreachable.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use web_sys::KeyboardEvent;

use crate::api::{self, SearchResult};

/// Debounce window between keystrokes and the outgoing request.
const DEBOUNCE_MS: u32 = 300;

async fn run_search(
	query: String,
	my_generation: u64,
	generation: RwSignal<u64>,
	results: RwSignal<Vec<SearchResult>>,
	error: RwSignal<Option<String>>,
	is_searching: RwSignal<bool>,
) {
	is_searching.set(true);
	let outcome = api::search(&query).await;
	// A newer query superseded this one while it was in flight.
	if generation.get_untracked() != my_generation {
		return;
	}
	match outcome {
		Ok(found) => {
			info!("search returned {} results", found.len());
			results.set(found);
			error.set(None);
		}
		Err(e) => {
			warn!("search failed: {e}");
			error.set(Some(
				"Failed to connect to search service. Showing demo results.".into(),
			));
			results.set(api::fallback_results(&query));
		}
	}
	is_searching.set(false);
}

/// Search panel overlaying the network canvas.
///
/// `on_open` fires when a result is chosen; `spread_request` relays the
/// chosen title to the canvas so a matching node spreads its constellation.
#[component]
pub fn SearchPanel(
	#[prop(into)] on_open: Callback<SearchResult>,
	spread_request: RwSignal<Option<String>>,
) -> impl IntoView {
	let input_ref = NodeRef::<leptos::html::Input>::new();
	let query = RwSignal::new(String::new());
	let results: RwSignal<Vec<SearchResult>> = RwSignal::new(Vec::new());
	let show_results = RwSignal::new(false);
	let is_searching = RwSignal::new(false);
	let error: RwSignal<Option<String>> = RwSignal::new(None);
	// Bumped on every keystroke; stale responses check it and drop out.
	let generation = RwSignal::new(0u64);

	let schedule_search = move |debounce: bool| {
		let text = query.get_untracked();
		generation.update(|g| *g += 1);
		let my_generation = generation.get_untracked();

		if text.trim().is_empty() {
			results.set(Vec::new());
			show_results.set(false);
			is_searching.set(false);
			return;
		}
		show_results.set(true);
		spawn_local(async move {
			if debounce {
				TimeoutFuture::new(DEBOUNCE_MS).await;
				if generation.get_untracked() != my_generation {
					return;
				}
			}
			run_search(text, my_generation, generation, results, error, is_searching).await;
		});
	};

	let on_input = move |ev| {
		query.set(event_target_value(&ev));
		error.set(None);
		schedule_search(true);
	};

	let on_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
		"Enter" => {
			if !query.get_untracked().trim().is_empty() {
				schedule_search(false);
			}
		}
		"Escape" => {
			show_results.set(false);
			if let Some(input) = input_ref.get_untracked() {
				let _ = input.blur();
			}
		}
		_ => {}
	};

	let on_focus = move |_| {
		if !query.get_untracked().trim().is_empty() && !results.get_untracked().is_empty() {
			show_results.set(true);
		}
	};

	// Delay hiding so a click on a result still lands.
	let on_blur = move |_| {
		spawn_local(async move {
			TimeoutFuture::new(200).await;
			show_results.set(false);
		});
	};

	let choose = move |result: SearchResult| {
		query.set(result.title.clone());
		show_results.set(false);
		spread_request.set(Some(result.title.clone()));
		on_open.run(result);
	};

	view! {
		<div class="search-overlay">
			<div class="search-card">
				<h1 class="search-title">"Cosmic Research Explorer"</h1>
				<p class="search-subtitle">"Discover interconnected research across the universe"</p>
				<div class="search-box">
					<input
						node_ref=input_ref
						type="text"
						class="search-input"
						placeholder="Search research papers, topics, and discoveries..."
						prop:value=query
						on:input=on_input
						on:keydown=on_keydown
						on:focus=on_focus
						on:blur=on_blur
					/>
					<Show when=move || {
						show_results.get()
							&& (is_searching.get() || error.get().is_some()
								|| !results.get().is_empty() || !query.get().trim().is_empty())
					}>
						<div class="search-results">
							<Show when=move || is_searching.get()>
								<div class="search-status">"Searching cosmic database..."</div>
							</Show>
							{move || {
								error.get().map(|message| {
									view! {
										<div class="search-error">
											<div class="search-error-label">"Note"</div>
											<div>{message}</div>
										</div>
									}
								})
							}}
							<For
								each=move || results.get()
								key=|result| result.id.clone()
								children=move |result| {
									let picked = result.clone();
									view! {
										<button
											class="search-result"
											on:mousedown=|ev| ev.prevent_default()
											on:click=move |_| choose(picked.clone())
										>
											<div class="search-result-title">{result.title.clone()}</div>
											<div class="search-result-meta">
												<span class="search-result-topic">{result.topic.clone()}</span>
												<span class="search-result-match">
													{format!("{}% match", (result.relevance * 100.0).round())}
												</span>
											</div>
											{result.content.clone().map(|content| {
												view! { <div class="search-result-content">{content}</div> }
											})}
										</button>
									}
								}
							/>
							<Show when=move || {
								results.get().is_empty() && !is_searching.get() && error.get().is_none()
							}>
								<div class="search-status">
									<div>"No results found"</div>
									<div class="search-hint">"Try different keywords"</div>
								</div>
							</Show>
						</div>
					</Show>
				</div>
			</div>
		</div>
	}
}
