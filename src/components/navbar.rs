//! Top navigation band. The network layout reserves its height via the
//! safe-area top margin.

use leptos::prelude::*;

/// Brand bar pinned above the canvas.
#[component]
pub fn Navbar() -> impl IntoView {
	view! {
		<nav class="navbar">
			<a href="/" class="navbar-brand">
				<span class="navbar-mark">"✦"</span>
				<span class="navbar-title">"Cosmic Research Explorer"</span>
			</a>
			<div class="navbar-status">
				<span class="navbar-dot" />
				<span class="navbar-label">"API_FILES_DISPLAY"</span>
			</div>
		</nav>
	}
}
