use leptos::prelude::*;

use super::context::{use_editor, use_store, use_toasts};
use crate::catalog::{Catalog, config_fields};
use crate::graph::{Node, NodeConfig};

fn hint_list(catalog: &Catalog, ids: &[String]) -> String {
	if ids.is_empty() {
		return "none".into();
	}
	ids.iter()
		.map(|id| catalog.label_of(id))
		.collect::<Vec<_>>()
		.join(", ")
}

/// Side panel editing the selected node's config.
#[component]
pub fn ConfigPanel() -> impl IntoView {
	let store = use_store();
	let ui = use_editor();

	// keyed on the id only, so moving the node does not reset the form
	let selected_id = Memo::new(move |_| store.with(|g| g.selected_id().map(str::to_owned)));

	move || {
		if !ui.config_open.get() {
			return None;
		}
		let id = selected_id.get()?;
		let node = store.with_untracked(|g| g.node(&id).cloned())?;
		Some(view! { <NodeForm node=node /> })
	}
}

#[component]
fn NodeForm(node: Node) -> impl IntoView {
	let store = use_store();
	let ui = use_editor();
	let toasts = use_toasts();

	let catalog = ui.lookup_catalog();
	let entry = catalog.get(&node.data.icon).cloned();
	let fields = config_fields(&node.data.icon);
	let draft = RwSignal::new(node.data.config.clone());
	let id = StoredValue::new(node.id.clone());

	let save = move |_| {
		let config: NodeConfig = draft.get_untracked();
		store.update(|g| g.update_node_config(&id.get_value(), config));
		toasts.success("Configuration saved");
	};
	let delete = move |_| {
		store.update(|g| g.delete_selected_node());
		ui.config_open.set(false);
	};

	let hints = entry.as_ref().map(|e| {
		let to = hint_list(&catalog, &e.connections.can_connect_to);
		let from = hint_list(&catalog, &e.connections.can_receive_from);
		view! {
			<p class="config-description">{e.description.clone()}</p>
			<dl class="config-hints">
				<dt>"Can connect to"</dt>
				<dd>{to}</dd>
				<dt>"Can receive from"</dt>
				<dd>{from}</dd>
			</dl>
		}
	});

	view! {
		<aside class="config-panel">
			<header>
				<h2>{node.data.label.clone()}</h2>
				<button class="icon-button" on:click=move |_| ui.config_open.set(false)>
					"×"
				</button>
			</header>
			{hints}
			<form on:submit=move |ev| {
				ev.prevent_default();
				save(());
			}>
				{fields
					.iter()
					.map(|field| {
						let key = field.key;
						view! {
							<label class="config-field">
								<span>{field.label}</span>
								<input
									type="text"
									placeholder=field.placeholder
									prop:value=move || {
										draft.with(|c| c.get(key).cloned().unwrap_or_default())
									}
									on:input=move |ev| {
										let value = event_target_value(&ev);
										draft.update(|c| {
											c.insert(key.to_owned(), value);
										});
									}
								/>
							</label>
						}
					})
					.collect_view()}
				<div class="config-actions">
					<button type="submit" class="primary">"Save"</button>
					<button type="button" class="danger" on:click=delete>"Delete"</button>
				</div>
			</form>
		</aside>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hints_resolve_labels() {
		let catalog = Catalog::builtin();
		assert_eq!(hint_list(&catalog, &[]), "none");
		assert_eq!(
			hint_list(&catalog, &["cloud-sql".into(), "unknown".into()]),
			"Cloud SQL, unknown"
		);
	}
}
