//! Sidebar research-assistant chat for the open document.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use web_sys::KeyboardEvent;

use crate::api;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
	User,
	Bot,
}

#[derive(Clone, Debug, PartialEq)]
struct ChatMessage {
	role: Role,
	content: String,
}

/// Fixed right-hand chat panel. One request may be in flight at a time; the
/// input stays disabled until the reply (or its error message) arrives.
#[component]
pub fn ChatPanel(document_title: String) -> impl IntoView {
	let title = StoredValue::new(document_title.clone());
	let messages: RwSignal<Vec<ChatMessage>> = RwSignal::new(vec![ChatMessage {
		role: Role::Bot,
		content: format!(
			"Hello! I'm your research assistant for \"{document_title}\". I can help you \
			 analyze findings, understand methodologies, and explore key insights from \
			 this research paper. How can I assist you today?"
		),
	}]);
	let input = RwSignal::new(String::new());
	let busy = RwSignal::new(false);
	let list_ref = NodeRef::<leptos::html::Div>::new();

	// Keep the transcript scrolled to the newest message.
	Effect::new(move |_| {
		messages.track();
		if let Some(list) = list_ref.get() {
			list.set_scroll_top(list.scroll_height());
		}
	});

	let send = move || {
		let text = input.get_untracked().trim().to_string();
		if text.is_empty() || busy.get_untracked() {
			return;
		}
		messages.update(|m| {
			m.push(ChatMessage {
				role: Role::User,
				content: text.clone(),
			})
		});
		input.set(String::new());
		busy.set(true);

		spawn_local(async move {
			let reply = match api::chat(&text, &title.get_value()).await {
				Ok(reply) => reply,
				Err(e) => {
					warn!("chat request failed: {e}");
					api::chat_error_message(&e)
				}
			};
			messages.update(|m| {
				m.push(ChatMessage {
					role: Role::Bot,
					content: reply,
				})
			});
			busy.set(false);
		});
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" && !ev.shift_key() {
			ev.prevent_default();
			send();
		}
	};

	view! {
		<aside class="chat-panel">
			<header class="chat-header">
				<h3>"Research Assistant"</h3>
				<p class="chat-subtitle">{format!("AI analysis for {}", title.get_value())}</p>
			</header>
			<div class="chat-messages" node_ref=list_ref>
				<For
					each=move || messages.get().into_iter().enumerate()
					key=|(i, _)| *i
					children=|(_, message)| {
						let class = match message.role {
							Role::User => "chat-bubble chat-user",
							Role::Bot => "chat-bubble chat-bot",
						};
						let sender = match message.role {
							Role::User => "You",
							Role::Bot => "Research Assistant",
						};
						view! {
							<div class=class>
								<div class="chat-sender">{sender}</div>
								<div class="chat-content">{message.content}</div>
							</div>
						}
					}
				/>
				<Show when=move || busy.get()>
					<div class="chat-bubble chat-bot">
						<div class="chat-sender">"Research Assistant"</div>
						<div class="chat-content chat-thinking">"Analyzing research data..."</div>
					</div>
				</Show>
			</div>
			<footer class="chat-input-row">
				<input
					type="text"
					class="chat-input"
					placeholder="Ask about the research..."
					prop:value=input
					prop:disabled=move || busy.get()
					on:input=move |ev| input.set(event_target_value(&ev))
					on:keydown=on_keydown
				/>
				<button
					class="chat-send"
					prop:disabled=move || busy.get() || input.get().trim().is_empty()
					on:click=move |_| send()
				>
					"Send"
				</button>
			</footer>
		</aside>
	}
}
