//! Routed pages. Each one renders inside [`PageLayout`] with the site footer.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::page_layout::PageLayout;
use crate::config::SiteConfig;

fn site() -> SiteConfig {
	use_context::<SiteConfig>().unwrap_or_default()
}

fn footer(site: &SiteConfig) -> String {
	let year = js_sys::Date::new_0().get_full_year();
	site.footer(year)
}

/// Landing page at `/`.
#[component]
pub fn HomePage() -> impl IntoView {
	let site = site();
	let footer = footer(&site);

	view! {
		<PageLayout title=site.title subtitle=site.subtitle footer=footer>
			{site.about.map(|text| view! { <p class="page-about">{text}</p> })}
		</PageLayout>
	}
}

/// Page routed at `/:page`, looked up in [`SiteConfig::pages`].
#[component]
pub fn SitePage() -> impl IntoView {
	let params = use_params_map();
	let site = StoredValue::new(site());

	move || {
		let slug = params.with(|p| p.get("page")).unwrap_or_default();
		let found = site.with_value(|site| site.page(&slug).cloned().map(|page| (page, footer(site))));
		match found {
			Some((page, footer)) => view! {
				<PageLayout title=page.name subtitle=page.subtitle footer=footer>
					{page.about.map(|text| view! { <p class="page-about">{text}</p> })}
				</PageLayout>
			}
			.into_any(),
			None => view! { <NotFound /> }.into_any(),
		}
	}
}

/// Fallback for paths no page is routed at.
#[component]
pub fn NotFound() -> impl IntoView {
	let site = site();

	view! {
		<PageLayout title="Page not found" footer=footer(&site)>
			<p class="page-about">
				<a href="/">"Back home"</a>
			</p>
		</PageLayout>
	}
}
