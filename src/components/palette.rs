use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info};
use web_sys::DragEvent;

use super::canvas::DragPayload;
use super::context::{use_api, use_editor};
use crate::catalog::{Catalog, CatalogEntry, CatalogState, Cloud};

/// Select value for the bundled GCP table, which needs no backend.
const BUNDLED: &str = "bundled";

fn on_drag_start(entry: &CatalogEntry, ev: DragEvent) {
	let Some(dt) = ev.data_transfer() else {
		return;
	};
	let payload = DragPayload {
		node_type: entry.id.clone(),
		label: entry.label.clone(),
		category: entry.category.to_string(),
	};
	payload.write(|key, value| {
		let _ = dt.set_data(key, value);
	});
	dt.set_effect_allowed("move");
}

/// Searchable list of component types, grouped by category and draggable
/// onto the canvas.
#[component]
pub fn Palette() -> impl IntoView {
	let ui = use_editor();
	let api = use_api();
	let (search, set_search) = signal(String::new());

	let load = move |value: String| {
		if value.is_empty() {
			ui.catalog.set(CatalogState::Idle);
			return;
		}
		if value == BUNDLED {
			ui.catalog.set(CatalogState::Loaded(Catalog::builtin()));
			return;
		}
		let cloud = Cloud::parse(&value);
		if let Some(cached) = ui.catalog_cache.with_value(|c| c.get(cloud).cloned()) {
			debug!("catalog for {value} served from cache");
			ui.catalog.set(CatalogState::Loaded(cached));
			return;
		}
		ui.catalog.set(CatalogState::Loading);
		let api = api.clone();
		spawn_local(async move {
			match api.fetch_nodes(cloud).await {
				Ok(entries) => {
					info!("loaded {} catalog entries for {value}", entries.len());
					let catalog = Catalog::new(entries);
					ui.catalog_cache.update_value(|c| c.insert(cloud, catalog.clone()));
					ui.catalog.set(CatalogState::Loaded(catalog));
				}
				Err(err) => ui.catalog.set(CatalogState::Failed(format!(
					"Failed to load nodes: {err}. Make sure the API server is running."
				))),
			}
		});
	};

	let groups = Memo::new(move |_| {
		let needle = search.get();
		ui.catalog
			.with(|s| s.catalog().map(|c| c.groups(&needle)))
			.unwrap_or_default()
	});

	view! {
		<aside class="palette">
			<h2>"Components"</h2>
			<select
				class="palette-provider"
				on:change=move |ev| load(event_target_value(&ev))
			>
				<option value="">"Select a cloud provider"</option>
				<option value=BUNDLED>"Google Cloud (bundled)"</option>
				{Cloud::ALL
					.iter()
					.map(|c| view! { <option value=c.as_str()>{c.label()}</option> })
					.collect_view()}
			</select>
			<input
				class="palette-search"
				type="text"
				placeholder="Search components..."
				prop:value=search
				on:input=move |ev| set_search.set(event_target_value(&ev))
			/>
			{move || {
				let has_groups = groups.with(|g| !g.is_empty());
				ui.catalog
					.with(|s| s.placeholder(has_groups).map(str::to_owned))
					.map(|text| view! { <p class="palette-empty">{text}</p> })
			}}
			<For each=move || groups.get() key=|g| g.category let:group>
				<section class="palette-group">
					<h3>{group.category.label()}</h3>
					<ul>
						{group
							.entries
							.into_iter()
							.map(|entry| {
								let color = entry.category.color();
								let title = entry.description.clone();
								let label = entry.label.clone();
								view! {
									<li
										class="palette-item"
										draggable="true"
										title=title
										style:border-left-color=color
										on:dragstart=move |ev| on_drag_start(&entry, ev)
									>
										{label}
									</li>
								}
							})
							.collect_view()}
					</ul>
				</section>
			</For>
		</aside>
	}
}
