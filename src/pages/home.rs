use leptos::prelude::*;

use crate::api::SearchResult;
use crate::components::detail::DocumentDetail;
use crate::components::navbar::Navbar;
use crate::components::network::{NetworkCanvas, NodeHit};
use crate::components::search::SearchPanel;

/// A clicked file node opens the detail view with nothing but its title;
/// the summary fetch fills in the rest.
fn result_from_node(hit: &NodeHit) -> SearchResult {
	SearchResult {
		id: hit.label.clone(),
		title: hit.label.clone(),
		topic: hit.topic.clone(),
		content: None,
		relevance: 1.0,
		summary: None,
		document_id: None,
	}
}

/// Explorer home page: the network canvas with the search overlay, swapping
/// to the document detail view when a file node or search result is chosen.
#[component]
pub fn Home() -> impl IntoView {
	let selected: RwSignal<Option<SearchResult>> = RwSignal::new(None);
	let spread_request: RwSignal<Option<String>> = RwSignal::new(None);

	let on_node_click = move |hit: NodeHit| {
		// Topic anchors only spread their constellation; file nodes open.
		if !hit.is_topic {
			selected.set(Some(result_from_node(&hit)));
		}
	};
	let on_open = move |result: SearchResult| selected.set(Some(result));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{move || match selected.get() {
				Some(document) => {
					view! {
						<DocumentDetail
							document=document
							on_back=move |_| selected.set(None)
						/>
					}
						.into_any()
				}
				None => {
					view! {
						<div class="explorer">
							<Navbar />
							<NetworkCanvas on_node_click=on_node_click spread_request=spread_request />
							<SearchPanel on_open=on_open spread_request=spread_request />
						</div>
					}
						.into_any()
				}
			}}
		</ErrorBoundary>
	}
}
