use leptos::prelude::*;

/// 404 fallback.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Lost in space"</h1>
			<p>"This page does not exist."</p>
			<a href="/">"Return to the explorer"</a>
		</div>
	}
}
