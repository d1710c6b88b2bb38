//! Shared page frame: heading, content and footer.

use leptos::prelude::*;

/// Wraps page content with a header and a footer line.
#[component]
pub fn PageLayout(
	#[prop(into)] title: String,
	#[prop(into, default = None)] subtitle: Option<String>,
	#[prop(into)] footer: String,
	children: Children,
) -> impl IntoView {
	view! {
		<section class="page-layout">
			<header class="page-header">
				<h1>{title}</h1>
				{subtitle.map(|s| view! { <p class="page-subtitle">{s}</p> })}
			</header>
			<main class="page-content">{children()}</main>
			<footer class="page-footer">
				<p>{footer}</p>
			</footer>
		</section>
	}
}
