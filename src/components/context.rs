//! State shared between views through Leptos context.

use std::time::Duration;

use leptos::prelude::*;
use log::error;

use crate::api::ApiClient;
use crate::catalog::{Catalog, CatalogCache, CatalogState};
use crate::chat::ChatLog;
use crate::config::AppConfig;
use crate::graph::GraphStore;

const TOAST_MS: u64 = 3500;

/// Reactive handle on the single [`GraphStore`] of the app.
#[derive(Clone, Copy)]
pub struct ArchitectureStore(RwSignal<GraphStore>);

impl ArchitectureStore {
	pub fn new() -> Self {
		Self(RwSignal::new(GraphStore::new()))
	}

	/// Tracked read.
	pub fn with<R>(&self, f: impl FnOnce(&GraphStore) -> R) -> R {
		self.0.with(f)
	}

	pub fn with_untracked<R>(&self, f: impl FnOnce(&GraphStore) -> R) -> R {
		self.0.with_untracked(f)
	}

	pub fn update(&self, f: impl FnOnce(&mut GraphStore)) {
		self.0.update(f);
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
	Success,
	Error,
	Info,
}

impl ToastKind {
	fn class(self) -> &'static str {
		match self {
			ToastKind::Success => "toast toast-success",
			ToastKind::Error => "toast toast-error",
			ToastKind::Info => "toast toast-info",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
	pub id: u64,
	pub kind: ToastKind,
	pub text: String,
}

/// Transient notifications, each dismissed after a few seconds.
#[derive(Clone, Copy)]
pub struct Toasts {
	list: RwSignal<Vec<Toast>>,
	next: StoredValue<u64>,
}

impl Toasts {
	fn new() -> Self {
		Self {
			list: RwSignal::new(Vec::new()),
			next: StoredValue::new(0),
		}
	}

	pub fn push(&self, kind: ToastKind, text: impl Into<String>) {
		let id = self.next.get_value();
		self.next.set_value(id + 1);
		let text = text.into();
		if kind == ToastKind::Error {
			error!("{text}");
		}
		self.list.update(|l| l.push(Toast { id, kind, text }));
		let list = self.list;
		set_timeout(
			move || list.update(|l| l.retain(|t| t.id != id)),
			Duration::from_millis(TOAST_MS),
		);
	}

	pub fn success(&self, text: impl Into<String>) {
		self.push(ToastKind::Success, text);
	}

	pub fn error(&self, text: impl Into<String>) {
		self.push(ToastKind::Error, text);
	}

	pub fn info(&self, text: impl Into<String>) {
		self.push(ToastKind::Info, text);
	}
}

/// Editor chrome state: panels, palette and chat.
#[derive(Clone, Copy)]
pub struct EditorUi {
	pub config_open: RwSignal<bool>,
	pub chat_open: RwSignal<bool>,
	pub chat: RwSignal<ChatLog>,
	pub catalog: RwSignal<CatalogState>,
	pub catalog_cache: StoredValue<CatalogCache>,
}

impl EditorUi {
	fn new() -> Self {
		Self {
			config_open: RwSignal::new(false),
			chat_open: RwSignal::new(false),
			chat: RwSignal::new(ChatLog::new()),
			catalog: RwSignal::new(CatalogState::Idle),
			catalog_cache: StoredValue::new(CatalogCache::new()),
		}
	}

	/// Catalog the config panel resolves entries against: the palette's, or
	/// the bundled table when none is loaded.
	pub fn lookup_catalog(&self) -> Catalog {
		self.catalog
			.with(|s| s.catalog().cloned())
			.unwrap_or_else(Catalog::builtin)
	}
}

/// Installs every shared value. Called once from the app root.
pub fn provide_app_context(config: AppConfig) {
	provide_context(config);
	provide_context(ArchitectureStore::new());
	provide_context(Toasts::new());
	provide_context(EditorUi::new());
}

pub fn use_store() -> ArchitectureStore {
	expect_context()
}

pub fn use_toasts() -> Toasts {
	expect_context()
}

pub fn use_editor() -> EditorUi {
	expect_context()
}

pub fn use_config() -> AppConfig {
	expect_context()
}

/// Client for the configured backend.
pub fn use_api() -> ApiClient {
	ApiClient::new(use_config().api_base_url)
}

#[component]
pub fn ToastStack() -> impl IntoView {
	let toasts = use_toasts();
	view! {
		<div class="toast-stack">
			<For each=move || toasts.list.get() key=|t| t.id let:toast>
				<div class=toast.kind.class()>{toast.text}</div>
			</For>
		</div>
	}
}
