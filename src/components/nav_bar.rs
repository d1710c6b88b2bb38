//! Floating navigation bar with the theme toggle and a mobile menu.
//!
//! The bar is the only writer of the theme flag: toggling flips the signal,
//! and an effect mirrors every change onto `<body>` and into storage. A
//! sliding indicator sits behind the active link and follows route changes
//! and window resizes. Must be rendered inside the router.

use leptos::ev;
use leptos::prelude::*;
use leptos_router::hooks::use_location;
use web_sys::{MouseEvent, ScrollBehavior, ScrollToOptions};

use crate::config::{HOME_PAGE, PageConfig, page_path};
use crate::theme::{self, BrowserThemeStore, ThemeMode};

/// `(label, path)` for every navigation entry, with Home prepended.
pub fn nav_items(pages: &[PageConfig]) -> Vec<(String, String)> {
	std::iter::once(HOME_PAGE.to_string())
		.chain(pages.iter().map(|p| p.name.clone()).filter(|name| name != HOME_PAGE))
		.map(|page| {
			let path = page_path(&page);
			(page, path)
		})
		.collect()
}

/// Whether `current` (a location pathname) is the page at `path`.
pub fn is_active(path: &str, current: &str) -> bool {
	let current = current.trim_end_matches('/');
	let path = path.trim_end_matches('/');
	current.eq_ignore_ascii_case(path)
}

/// Path of the entry in `items` that `current` points at, if any.
pub fn active_path<'a>(items: &'a [(String, String)], current: &str) -> Option<&'a str> {
	items
		.iter()
		.map(|(_, path)| path.as_str())
		.find(|path| is_active(path, current))
}

/// Position and size of a box, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	/// Distance from the left edge.
	pub left: f64,
	/// Distance from the top edge.
	pub top: f64,
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent.
	pub height: f64,
}

impl Rect {
	/// `self` expressed relative to `container`'s top-left corner.
	pub fn relative_to(self, container: Rect) -> Rect {
		Rect {
			left: self.left - container.left,
			top: self.top - container.top,
			..self
		}
	}

	fn of(element: &web_sys::Element) -> Rect {
		let r = element.get_bounding_client_rect();
		Rect {
			left: r.left(),
			top: r.top(),
			width: r.width(),
			height: r.height(),
		}
	}
}

/// Move the indicator behind the link for `path`, or hide it when no link
/// matches.
fn place_indicator(list: &web_sys::Element, indicator: &web_sys::HtmlElement, path: Option<&str>) {
	// Explicit path: the leptos prelude brings in an unrelated `style` method.
	let style = web_sys::HtmlElement::style(indicator);
	let link = path.and_then(|p| {
		list.query_selector(&format!("a.navbar-link[href=\"{p}\"]"))
			.ok()
			.flatten()
	});
	let Some(link) = link else {
		let _ = style.set_property("opacity", "0");
		return;
	};

	let b = Rect::of(&link).relative_to(Rect::of(list));
	let _ = style.set_property("width", &format!("{}px", b.width));
	let _ = style.set_property("height", &format!("{}px", b.height));
	let _ = style.set_property("left", &format!("{}px", b.left));
	let _ = style.set_property("top", &format!("{}px", b.top));
	let _ = style.set_property("opacity", "1");
}

fn scroll_to_top() {
	if let Some(window) = web_sys::window() {
		let options = ScrollToOptions::new();
		options.set_top(0.0);
		options.set_left(0.0);
		options.set_behavior(ScrollBehavior::Smooth);
		window.scroll_to_with_scroll_to_options(&options);
	}
}

/// Navigation bar.
///
/// `theme`/`set_theme` are the site-wide theme signal; the bar persists and
/// applies every change it makes.
#[component]
pub fn NavBar(
	pages: Vec<PageConfig>,
	theme: ReadSignal<ThemeMode>,
	set_theme: WriteSignal<ThemeMode>,
) -> impl IntoView {
	let (menu_open, set_menu_open) = signal(false);
	let location = use_location();
	let items = StoredValue::new(nav_items(&pages));
	let links_ref = NodeRef::<leptos::html::Ul>::new();
	let indicator_ref = NodeRef::<leptos::html::Li>::new();

	Effect::new(move |_| {
		let mode = theme.get();
		theme::apply_to_document(mode);
		theme::persist(&BrowserThemeStore, mode);
	});

	let update_indicator = move || {
		let (Some(list), Some(indicator)) = (links_ref.get_untracked(), indicator_ref.get_untracked())
		else {
			return;
		};
		let current = location.pathname.get_untracked();
		items.with_value(|items| place_indicator(&list, &indicator, active_path(items, &current)));
	};

	Effect::new(move |_| {
		location.pathname.track();
		if links_ref.get().is_some() {
			update_indicator();
		}
	});

	let resize = window_event_listener(ev::resize, move |_| update_indicator());
	on_cleanup(move || resize.remove());

	let links = items
		.get_value()
		.into_iter()
		.map(|(label, path)| {
			let link_path = path.clone();
			view! {
				<li class="navbar-item">
					<a
						href=path
						class="navbar-link"
						class:active=move || is_active(&link_path, &location.pathname.get())
						on:click=move |_| {
							set_menu_open.set(false);
							scroll_to_top();
						}
					>
						{label}
					</a>
				</li>
			}
		})
		.collect_view();

	let toggle_theme = move |_: MouseEvent| {
		set_theme.update(|mode| *mode = mode.toggle());
	};

	view! {
		<nav class="navbar">
			<div class="navbar-container">
				<button
					class=move || format!("theme-toggle {}", theme.get().as_str())
					on:click=toggle_theme
					aria-label=move || {
						if theme.get().is_dark() { "Switch to light mode" } else { "Switch to dark mode" }
					}
				>
					<span class="theme-icon sun-icon">"☀"</span>
					<span class="theme-icon moon-icon">"☾"</span>
				</button>

				<button
					class="menu-toggle"
					on:click=move |_| set_menu_open.update(|open| *open = !*open)
					aria-label=move || if menu_open.get() { "Close menu" } else { "Open menu" }
				>
					<span class="menu-bar" class:open=move || menu_open.get()></span>
					<span class="menu-bar" class:open=move || menu_open.get()></span>
					<span class="menu-bar" class:open=move || menu_open.get()></span>
				</button>

				<ul
					node_ref=links_ref
					class="navbar-links-container"
					class:open=move || menu_open.get()
				>
					<li node_ref=indicator_ref class="nav-indicator" aria-hidden="true"></li>
					{links}
				</ul>
			</div>
		</nav>
	}
}
