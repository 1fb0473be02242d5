//! Leptos client-side app wiring and routes.
//!
//! The diagram model ([`graph`]), component catalog ([`catalog`]), backend
//! client ([`api`]) and persistence ([`persist`]) are plain Rust and usable
//! without a browser; the views live in private modules.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod api;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod graph;
pub mod persist;

// Modules
mod components;
mod pages;

use crate::components::context::{ToastStack, provide_app_context};
use crate::config::AppConfig;
use crate::pages::deploy::Deploy;
use crate::pages::editor::Editor;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// The app router: the editor at `/`, deployment at `/deploy`, and a 404.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = AppConfig::from_build_env();
	info!("using backend at {}", config.api_base_url);
	provide_app_context(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Cloud Canvas" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Editor />
				<Route path=path!("/deploy") view=Deploy />
			</Routes>
		</Router>
		<ToastStack />
	}
}
