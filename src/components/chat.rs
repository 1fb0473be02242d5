use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::{use_api, use_editor, use_store, use_toasts};
use crate::chat::{APOLOGY, Role, apply_generation};

/// Popup that turns a prompt into a diagram via the backend.
#[component]
pub fn ChatPopup() -> impl IntoView {
	let store = use_store();
	let ui = use_editor();
	let toasts = use_toasts();
	let api = use_api();
	let (input, set_input) = signal(String::new());
	let relayout = RwSignal::new(false);

	let submit = move || {
		let mut prompt = None;
		ui.chat.update(|log| prompt = log.submit(&input.get_untracked()));
		let Some(prompt) = prompt else {
			return;
		};
		set_input.set(String::new());
		let api = api.clone();
		spawn_local(async move {
			match api.generate_graph(&prompt).await {
				Ok(response) => {
					let relayout = relayout.get_untracked();
					let mut reply = String::new();
					store.update(|g| reply = apply_generation(g, response, relayout));
					ui.chat.update(|log| log.reply(reply));
				}
				Err(err) => {
					toasts.error(format!("Generation failed: {err}"));
					ui.chat.update(|log| log.reply(APOLOGY));
				}
			}
		});
	};

	view! {
		<div class="chat-popup" class:hidden=move || !ui.chat_open.get()>
			<header>
				<h2>"Architecture assistant"</h2>
				<button class="icon-button" on:click=move |_| ui.chat_open.set(false)>
					"×"
				</button>
			</header>
			<ul class="chat-messages">
				<For each=move || ui.chat.get().messages().to_vec() key=|m| m.id let:message>
					<li class={match message.role {
						Role::User => "chat-message user",
						Role::Assistant => "chat-message assistant",
					}}>{message.content}</li>
				</For>
				<Show when=move || ui.chat.with(|log| log.is_pending())>
					<li class="chat-message assistant pending">"Thinking..."</li>
				</Show>
			</ul>
			<form
				class="chat-input"
				on:submit=move |ev| {
					ev.prevent_default();
					submit();
				}
			>
				<textarea
					placeholder="Describe the architecture you want to build..."
					prop:value=input
					on:input=move |ev| set_input.set(event_target_value(&ev))
				/>
				<button
					type="submit"
					class="primary"
					disabled=move || ui.chat.with(|log| log.is_pending())
				>
					"Send"
				</button>
			</form>
			<label class="chat-option">
				<input
					type="checkbox"
					prop:checked=relayout
					on:change=move |ev| relayout.set(event_target_checked(&ev))
				/>
				"Auto-layout generated nodes"
			</label>
		</div>
	}
}
