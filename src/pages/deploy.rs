use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use log::{debug, info, warn};

use crate::api::{ApiClient, DeployAction, ExecuteRequest, InfraSpec, RunLogs, RunStatus};
use crate::catalog::Cloud;
use crate::components::context::{Toasts, use_api, use_config, use_store, use_toasts};
use crate::config::DEFAULT_REGION;

#[derive(Clone, Copy)]
struct RunView {
	run_id: RwSignal<Option<String>>,
	files: RwSignal<Vec<(String, String)>>,
	open_file: RwSignal<Option<String>>,
	status: RwSignal<Option<RunStatus>>,
	logs: RwSignal<Vec<String>>,
}

impl RunView {
	fn new(run_id: Option<String>) -> Self {
		Self {
			run_id: RwSignal::new(run_id),
			files: RwSignal::new(Vec::new()),
			open_file: RwSignal::new(None),
			status: RwSignal::new(None),
			logs: RwSignal::new(Vec::new()),
		}
	}

	fn load_files(self, api: ApiClient, toasts: Toasts) {
		let Some(run_id) = self.run_id.get_untracked() else {
			return;
		};
		spawn_local(async move {
			match api.run_files(&run_id).await {
				Ok(run) => {
					let files: Vec<_> = run.files.into_iter().collect();
					self.open_file.set(files.first().map(|(name, _)| name.clone()));
					self.files.set(files);
				}
				Err(err) => toasts.error(format!("Could not load run files: {err}")),
			}
		});
	}

	/// One poll: status and logs for the current run.
	fn refresh(self, api: ApiClient) {
		let Some(run_id) = self.run_id.get_untracked() else {
			return;
		};
		spawn_local(async move {
			match api.run_status(&run_id).await {
				Ok(status) => self.status.set(Some(status)),
				Err(err) => debug!("status poll for {run_id} failed: {err}"),
			}
			match api.run_logs(&run_id).await {
				Ok(RunLogs { lines, .. }) => self.logs.set(lines),
				Err(err) => debug!("log poll for {run_id} failed: {err}"),
			}
		});
	}
}

/// Terraform preview and deployment of the current diagram.
#[component]
pub fn Deploy() -> impl IntoView {
	let store = use_store();
	let toasts = use_toasts();
	let config = use_config();
	let api = use_api();
	let query = use_query_map();

	let run = RunView::new(query.with_untracked(|q| q.get("run")));
	let provider = RwSignal::new(Cloud::Gcp);
	let project_name = RwSignal::new(String::new());
	let region = RwSignal::new(DEFAULT_REGION.to_owned());
	let project_id = RwSignal::new(String::new());
	let sa_key = RwSignal::new(String::new());
	let auto_approve = RwSignal::new(true);
	let busy = RwSignal::new(false);

	run.load_files(api.clone(), toasts);

	let api_poll = api.clone();
	match set_interval_with_handle(move || run.refresh(api_poll.clone()), config.poll_interval) {
		Ok(handle) => on_cleanup(move || handle.clear()),
		Err(err) => warn!("could not start polling: {err:?}"),
	}

	let api_gen = api.clone();
	let generate = move |_| {
		let spec = store.with_untracked(|g| {
			InfraSpec::from_graph(
				g,
				provider.get_untracked(),
				project_name.get_untracked().trim(),
				region.get_untracked().trim(),
			)
		});
		if spec.resources.is_empty() {
			return toasts.info("Canvas is empty. Add some nodes to start designing");
		}
		let api = api_gen.clone();
		busy.set(true);
		spawn_local(async move {
			match api.generate_terraform(&spec).await {
				Ok(created) => {
					info!("run {} created with {} files", created.run_id, created.files.len());
					run.run_id.set(Some(created.run_id));
					run.load_files(api, toasts);
					toasts.success("Terraform generated");
				}
				Err(err) => toasts.error(format!("Terraform generation failed: {err}")),
			}
			busy.set(false);
		});
	};

	let execute = move |action: DeployAction| {
		let request = ExecuteRequest::new(
			&run.run_id.get_untracked().unwrap_or_default(),
			action,
			&project_id.get_untracked(),
			sa_key.get_untracked(),
		);
		let mut request = match request {
			Ok(request) => request,
			Err(err) => return toasts.error(err.to_string()),
		};
		request.auto_approve = auto_approve.get_untracked();
		let api = api.clone();
		busy.set(true);
		spawn_local(async move {
			match api.execute(&request).await {
				Ok(response) => toasts.info(format!("Deployment {}", response.status)),
				Err(err) => toasts.error(format!("Deployment failed: {err}")),
			}
			busy.set(false);
		});
	};
	let execute_destroy = execute.clone();

	let status_line = move || {
		run.status.with(|s| match s {
			None => "No deployment status yet".to_owned(),
			Some(s) => {
				let mut line = s.status.to_string();
				if let Some(phase) = &s.phase {
					line.push_str(&format!(" ({phase})"));
				}
				if let Some(error) = &s.error {
					line.push_str(&format!(": {error}"));
				}
				line
			}
		})
	};

	view! {
		<div class="deploy">
			<nav class="toolbar">
				<A href="/">"← Back to editor"</A>
				<span class="toolbar-title">"Deploy"</span>
			</nav>
			<section class="deploy-generate">
				<h2>"Generate Terraform"</h2>
				<label>
					"Provider"
					<select on:change=move |ev| {
						if let Some(cloud) = Cloud::parse(&event_target_value(&ev)) {
							provider.set(cloud);
						}
					}>
						{Cloud::ALL
							.iter()
							.map(|c| view! { <option value=c.as_str()>{c.label()}</option> })
							.collect_view()}
					</select>
				</label>
				<label>
					"Project name"
					<input
						type="text"
						placeholder="my-project"
						prop:value=project_name
						on:input=move |ev| project_name.set(event_target_value(&ev))
					/>
				</label>
				<label>
					"Region"
					<input
						type="text"
						prop:value=region
						on:input=move |ev| region.set(event_target_value(&ev))
					/>
				</label>
				<button class="primary" disabled=busy on:click=generate>"Generate"</button>
				<p class="run-id">
					{move || run.run_id.get().map(|id| format!("Run {id}")).unwrap_or_default()}
				</p>
			</section>
			<section class="deploy-files">
				<ul class="file-tabs">
					<For each=move || run.files.get() key=|(name, _)| name.clone() let:file>
						{
							let name = file.0.clone();
							let selected = name.clone();
							view! {
								<li
									class:active=move || run.open_file.with(|o| o.as_deref() == Some(selected.as_str()))
									on:click=move |_| run.open_file.set(Some(name.clone()))
								>
									{file.0}
								</li>
							}
						}
					</For>
				</ul>
				<pre class="file-contents">
					{move || {
						let open = run.open_file.get()?;
						run.files.with(|f| f.iter().find(|(n, _)| *n == open).map(|(_, c)| c.clone()))
					}}
				</pre>
			</section>
			<section class="deploy-execute">
				<h2>"Execute"</h2>
				<label>
					"Project ID"
					<input
						type="text"
						prop:value=project_id
						on:input=move |ev| project_id.set(event_target_value(&ev))
					/>
				</label>
				<label>
					"Service account key (JSON)"
					<textarea
						prop:value=sa_key
						on:input=move |ev| sa_key.set(event_target_value(&ev))
					/>
				</label>
				<label>
					<input
						type="checkbox"
						prop:checked=auto_approve
						on:change=move |ev| auto_approve.set(event_target_checked(&ev))
					/>
					"Auto-approve"
				</label>
				<button class="primary" disabled=busy on:click=move |_| execute(DeployAction::Apply)>
					"Apply"
				</button>
				<button class="danger" disabled=busy on:click=move |_| execute_destroy(DeployAction::Destroy)>
					"Destroy"
				</button>
			</section>
			<section class="deploy-status">
				<h2>"Status"</h2>
				<p>{status_line}</p>
				<pre class="run-logs">{move || run.logs.get().join("\n")}</pre>
			</section>
		</div>
	}
}
