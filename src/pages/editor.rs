use leptos::ev;
use leptos::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::components::canvas::{ArchitectureCanvas, KeyAction, key_action};
use crate::components::chat::ChatPopup;
use crate::components::config_panel::ConfigPanel;
use crate::components::context::{use_editor, use_store};
use crate::components::palette::Palette;
use crate::components::toolbar::Toolbar;

fn is_text_input(target: Option<web_sys::EventTarget>) -> bool {
	target
		.and_then(|t| t.dyn_into::<Element>().ok())
		.is_some_and(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
}

/// Diagram editor: palette, canvas, config panel and chat.
#[component]
pub fn Editor() -> impl IntoView {
	let store = use_store();
	let ui = use_editor();

	let handle = window_event_listener(ev::keydown, move |ev| {
		if is_text_input(ev.target()) {
			return;
		}
		let has_selection = store.with_untracked(|g| g.selected_id().is_some());
		match key_action(&ev.key(), ev.ctrl_key() || ev.meta_key(), has_selection) {
			Some(KeyAction::DeleteSelected) => {
				debug!("delete key");
				store.update(|g| g.delete_selected_node());
				ui.config_open.set(false);
			}
			Some(KeyAction::ToggleChat) => {
				ev.prevent_default();
				ui.chat_open.update(|open| *open = !*open);
			}
			None => {}
		}
	});
	on_cleanup(move || handle.remove());

	view! {
		<div class="editor">
			<Toolbar />
			<div class="editor-body">
				<Palette />
				<main class="canvas-host">
					<ArchitectureCanvas />
				</main>
				<ConfigPanel />
			</div>
			<ChatPopup />
		</div>
	}
}
