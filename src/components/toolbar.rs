use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use log::warn;
use web_sys::HtmlInputElement;

use super::context::{Toasts, use_editor, use_store, use_toasts};
use crate::config::EXPORT_FILE_NAME;
use crate::graph::{GraphStore, NodeChange, Validation, auto_layout};
use crate::persist::{self, ArchitectureFile};

/// Position changes that re-lay out every node of `store`.
fn relayout_changes(store: &GraphStore) -> Vec<NodeChange> {
	let mut nodes = store.nodes().to_vec();
	auto_layout(&mut nodes, store.edges());
	nodes
		.into_iter()
		.map(|n| NodeChange::Position {
			id: n.id,
			position: Some(n.position),
			dragging: false,
		})
		.collect()
}

fn export(store: &GraphStore, toasts: Toasts) {
	let json = match ArchitectureFile::from_store(store).to_json() {
		Ok(json) => json,
		Err(err) => return toasts.error(format!("Export failed: {err}")),
	};
	match persist::download_json(EXPORT_FILE_NAME, &json) {
		Ok(()) => toasts.success("Architecture exported"),
		Err(err) => {
			warn!("download failed: {err:?}");
			toasts.error("Export failed");
		}
	}
}

#[component]
pub fn Toolbar() -> impl IntoView {
	let store = use_store();
	let ui = use_editor();
	let toasts = use_toasts();
	let file_input = NodeRef::<leptos::html::Input>::new();

	let validation = Memo::new(move |_| store.with(Validation::of));

	let save = move |_| match store.with_untracked(persist::save_to_storage) {
		Ok(()) => toasts.success("Architecture saved"),
		Err(err) => toasts.error(format!("Save failed: {err}")),
	};

	let restore = move |_| match persist::load_saved() {
		Ok(Some(file)) => {
			store.update(|g| file.load_into(g));
			toasts.success("Saved architecture restored");
		}
		Ok(None) => toasts.info("No saved architecture found"),
		Err(err) => toasts.error(format!("Restore failed: {err}")),
	};

	let on_file = move |ev: leptos::ev::Event| {
		let input: HtmlInputElement = event_target(&ev);
		let Some(file) = input.files().and_then(|f| f.get(0)) else {
			return;
		};
		// allow re-importing the same file
		input.set_value("");
		spawn_local(async move {
			let text = match persist::read_file_text(file).await {
				Ok(text) => text,
				Err(err) => {
					warn!("reading import failed: {err:?}");
					return toasts.error("Could not read file");
				}
			};
			let mut result = Ok(());
			store.update(|g| result = persist::import_into(g, &text));
			match result {
				Ok(()) => toasts.success("Architecture imported"),
				Err(err) => toasts.error(err.to_string()),
			}
		});
	};

	let validate = move |_| {
		let v = validation.get_untracked();
		match v {
			Validation::Ready => toasts.success(v.message()),
			Validation::Empty => toasts.info(v.message()),
			Validation::Incomplete { .. } => toasts.error(v.message()),
		}
	};

	let layout = move |_| {
		let changes = store.with_untracked(relayout_changes);
		store.update(|g| g.apply_node_changes(changes));
	};

	view! {
		<nav class="toolbar">
			<span class="toolbar-title">"Cloud Canvas"</span>
			<button on:click=save>"Save"</button>
			<button on:click=restore>"Restore"</button>
			<button on:click=move |_| {
				if let Some(input) = file_input.get_untracked() {
					input.click();
				}
			}>"Import"</button>
			<input
				node_ref=file_input
				type="file"
				accept=".json,application/json"
				style="display: none;"
				on:change=on_file
			/>
			<button on:click=move |_| store.with_untracked(|g| export(g, toasts))>"Export"</button>
			<button on:click=layout>"Auto layout"</button>
			<button on:click=move |_| store.update(GraphStore::clear_canvas)>"Clear"</button>
			<button on:click=move |_| ui.chat_open.update(|open| *open = !*open)>"Generate"</button>
			<button on:click=validate>"Validate"</button>
			<Show when=move || validation.get().is_ready()>
				<A href="/deploy" attr:class="button primary">
					"Proceed to deploy"
				</A>
			</Show>
		</nav>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Connection, Node, Position};

	#[test]
	fn relayout_moves_every_node_onto_the_grid() {
		let mut store = GraphStore::new();
		for (i, id) in ["a", "b", "c"].into_iter().enumerate() {
			store.add_node(Node::new(id, Position::new(0.0, i as f64), id, "compute", "vpc"));
		}
		store.connect(Connection::new("a", "b"));
		let changes = relayout_changes(&store);
		assert_eq!(changes.len(), 3);
		store.apply_node_changes(changes);
		for node in store.nodes() {
			assert_eq!(node.position.x % 20.0, 0.0);
			assert_eq!(node.position.y % 20.0, 0.0);
		}
	}
}
