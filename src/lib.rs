//! particle-backdrop: animated particle background for a portfolio site.
//!
//! This crate provides a WASM (Leptos CSR) particle background that bounces
//! points around a full-viewport canvas and links nearby ones with fading
//! lines, together with the small shell that owns the light/dark theme flag
//! it draws with.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod engine;
pub mod theme;

pub use components::nav_bar::NavBar;
pub use components::page_layout::PageLayout;
pub use components::pages::{HomePage, NotFound, SitePage};
pub use components::particle_background::ParticleBackground;
pub use config::{ParticleConfig, SiteConfig};
pub use theme::ThemeMode;

/// Id of the `<script type="application/json">` element holding [`SiteConfig`].
pub const SITE_CONFIG_ELEMENT_ID: &str = "site-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-backdrop: logging initialized");
}

/// Load site configuration from the script element with id="site-config".
/// Missing element means defaults; malformed JSON is logged and ignored.
fn load_site_config() -> Option<SiteConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(SITE_CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match SiteConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"particle-backdrop: loaded config for {:?} ({} pages)",
				config.title,
				config.pages.len()
			);
			Some(config)
		}
		Err(e) => {
			warn!("particle-backdrop: failed to parse site config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads the site config and theme, then renders the navigation bar and the
/// routed page over the particle background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_site_config().unwrap_or_default();
	let (theme, set_theme) = signal(theme::initial_mode(&theme::BrowserThemeStore));
	provide_context(theme);
	provide_context(config.particles.clone());
	provide_context(config.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text=config.title.clone() />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackground />
		<Router>
			<NavBar pages=config.pages.clone() theme=theme set_theme=set_theme />
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=HomePage />
				<Route path=path!("/:page") view=SitePage />
			</Routes>
		</Router>
	}
}
