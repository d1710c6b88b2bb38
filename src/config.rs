//! Site and particle configuration.
//!
//! Configuration is embedded in the page as JSON (see `load_site_config` in
//! the crate root). Every field is optional and falls back to the defaults
//! below.

use serde::Deserialize;

use crate::engine::particles::particle_count;

/// Tuning for the particle background.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
	/// Upper bound on each velocity component's spread, in pixels per frame.
	/// Components are drawn from `[-speed/2, speed/2)`.
	pub speed: f64,
	/// Most particles ever created, however wide the canvas.
	pub max_count: usize,
	/// Particles closer than this (in pixels) are linked by a line.
	pub distance_threshold: f64,
	/// Radius of each drawn particle in pixels.
	pub radius: f64,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			speed: 0.3,
			max_count: 150,
			distance_threshold: 150.0,
			radius: 2.0,
		}
	}
}

impl ParticleConfig {
	/// How many particles a canvas `width` pixels wide gets.
	pub fn particle_count(&self, width: f64) -> usize {
		particle_count(width, self.max_count)
	}
}

/// Label of the landing page, always routed at `/`.
pub const HOME_PAGE: &str = "Home";

/// URL path for a page label: `"Home"` is `/`, anything else `/<lowercase>`.
pub fn page_path(page: &str) -> String {
	if page == HOME_PAGE {
		"/".to_string()
	} else {
		format!("/{}", page.to_lowercase())
	}
}

/// One routed page besides Home.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
	/// Navigation label and heading; the route is [`page_path`] of it.
	pub name: String,
	/// Line under the heading.
	pub subtitle: Option<String>,
	/// Free text shown in the page body.
	pub about: Option<String>,
}

impl PageConfig {
	/// Page with just a name.
	pub fn named(name: &str) -> Self {
		Self {
			name: name.to_string(),
			..Self::default()
		}
	}

	/// Route this page is served at.
	pub fn path(&self) -> String {
		page_path(&self.name)
	}
}

/// Page-level content for the shell around the background.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
	/// Home page heading and document title.
	pub title: String,
	/// Line under the home page heading.
	pub subtitle: Option<String>,
	/// Free text shown on the home page.
	pub about: Option<String>,
	/// Name used in the footer copyright line.
	pub owner: String,
	/// Pages routed and linked from the navigation bar, after Home.
	pub pages: Vec<PageConfig>,
	/// Tuning for the background animation.
	pub particles: ParticleConfig,
}

impl Default for SiteConfig {
	fn default() -> Self {
		Self {
			title: "Welcome".to_string(),
			subtitle: None,
			about: None,
			owner: String::new(),
			pages: vec![PageConfig::named("Projects"), PageConfig::named("Experience")],
			particles: ParticleConfig::default(),
		}
	}
}

impl SiteConfig {
	/// Parse a config document; absent fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// The page routed at `/<slug>`, matched case-insensitively. Home is not
	/// in this list.
	pub fn page(&self, slug: &str) -> Option<&PageConfig> {
		let wanted = format!("/{}", slug.trim_matches('/'));
		self.pages
			.iter()
			.filter(|p| p.name != HOME_PAGE)
			.find(|p| p.path().eq_ignore_ascii_case(&wanted))
	}

	/// Footer line for the given year, e.g. `© 2025 Jane Doe. All rights reserved.`
	pub fn footer(&self, year: u32) -> String {
		if self.owner.is_empty() {
			format!("© {year}. All rights reserved.")
		} else {
			format!("© {year} {}. All rights reserved.", self.owner)
		}
	}
}
