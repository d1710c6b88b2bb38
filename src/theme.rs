//! Light/dark theme flag and its persistence.
//!
//! The flag is written by the navigation bar and read by everything that
//! draws. It is loaded once at startup: a stored choice wins, otherwise the
//! system `prefers-color-scheme` decides.

use log::{debug, warn};

/// Storage key the chosen theme is persisted under.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Body class toggled on while the light theme is active.
pub const LIGHT_BODY_CLASS: &str = "light";

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Which color scheme the site is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	/// Light ink on a dark page. Used when nothing else decides.
	#[default]
	Dark,
	/// Dark ink on a light page.
	Light,
}

impl ThemeMode {
	/// The other mode.
	pub fn toggle(self) -> Self {
		match self {
			ThemeMode::Dark => ThemeMode::Light,
			ThemeMode::Light => ThemeMode::Dark,
		}
	}

	/// Whether this is [`ThemeMode::Dark`].
	pub fn is_dark(self) -> bool {
		self == ThemeMode::Dark
	}

	/// Stored and class-name form: `"dark"` or `"light"`.
	pub fn as_str(self) -> &'static str {
		match self {
			ThemeMode::Dark => "dark",
			ThemeMode::Light => "light",
		}
	}

	/// Inverse of [`ThemeMode::as_str`]; anything else is `None`.
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim() {
			"dark" => Some(ThemeMode::Dark),
			"light" => Some(ThemeMode::Light),
			_ => None,
		}
	}

	/// Ink used for particles and their connecting lines: near-black on the
	/// light theme, near-white on the dark one.
	pub fn ink(self) -> Color {
		match self {
			ThemeMode::Dark => Color::rgb(255, 255, 255),
			ThemeMode::Light => Color::rgb(0, 0, 0),
		}
	}
}

/// Where the theme choice is remembered between visits.
pub trait ThemeStore {
	/// Raw stored value, if any.
	fn load(&self) -> Option<String>;
	/// Remember `value`; failures are not reported.
	fn save(&self, value: &str);
	/// Whether the system asks for a dark color scheme.
	fn prefers_dark(&self) -> bool;
}

/// Theme to start with: the stored choice, else the system preference.
///
/// A stored value that is neither `"dark"` nor `"light"` is ignored.
pub fn initial_mode(store: &impl ThemeStore) -> ThemeMode {
	if let Some(raw) = store.load() {
		match ThemeMode::parse(&raw) {
			Some(mode) => return mode,
			None => warn!("ignoring unknown stored theme {raw:?}"),
		}
	}
	if store.prefers_dark() {
		ThemeMode::Dark
	} else {
		ThemeMode::Light
	}
}

/// Remember `mode` for the next visit.
pub fn persist(store: &impl ThemeStore, mode: ThemeMode) {
	store.save(mode.as_str());
	debug!("theme persisted as {}", mode.as_str());
}

/// [`ThemeStore`] over `window.localStorage` and `matchMedia`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserThemeStore;

impl BrowserThemeStore {
	fn storage() -> Option<web_sys::Storage> {
		web_sys::window().and_then(|w| w.local_storage().ok().flatten())
	}
}

impl ThemeStore for BrowserThemeStore {
	fn load(&self) -> Option<String> {
		Self::storage().and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten())
	}

	fn save(&self, value: &str) {
		match Self::storage() {
			Some(s) => {
				if s.set_item(THEME_STORAGE_KEY, value).is_err() {
					warn!("could not persist theme");
				}
			}
			None => warn!("localStorage unavailable, theme not persisted"),
		}
	}

	fn prefers_dark(&self) -> bool {
		// Without a usable media query the site stays dark.
		web_sys::window()
			.and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten())
			.map(|q| q.matches())
			.unwrap_or(true)
	}
}

/// Reflect `mode` on `<body>`: the light theme adds [`LIGHT_BODY_CLASS`].
pub fn apply_to_document(mode: ThemeMode) {
	let Some(body) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.body())
	else {
		return;
	};
	let classes = body.class_list();
	let result = if mode.is_dark() {
		classes.remove_1(LIGHT_BODY_CLASS)
	} else {
		classes.add_1(LIGHT_BODY_CLASS)
	};
	if result.is_err() {
		warn!("could not update body class for {} theme", mode.as_str());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;

	struct MemoryStore {
		value: RefCell<Option<String>>,
		prefers_dark: bool,
	}

	impl MemoryStore {
		fn new(value: Option<&str>, prefers_dark: bool) -> Self {
			Self {
				value: RefCell::new(value.map(str::to_string)),
				prefers_dark,
			}
		}
	}

	impl ThemeStore for MemoryStore {
		fn load(&self) -> Option<String> {
			self.value.borrow().clone()
		}

		fn save(&self, value: &str) {
			*self.value.borrow_mut() = Some(value.to_string());
		}

		fn prefers_dark(&self) -> bool {
			self.prefers_dark
		}
	}

	#[test]
	fn test_stored_choice_wins_over_system() {
		assert_eq!(initial_mode(&MemoryStore::new(Some("light"), true)), ThemeMode::Light);
		assert_eq!(initial_mode(&MemoryStore::new(Some("dark"), false)), ThemeMode::Dark);
	}

	#[test]
	fn test_system_preference_without_stored_choice() {
		assert_eq!(initial_mode(&MemoryStore::new(None, true)), ThemeMode::Dark);
		assert_eq!(initial_mode(&MemoryStore::new(None, false)), ThemeMode::Light);
	}

	#[test]
	fn test_garbage_stored_value_falls_back() {
		assert_eq!(initial_mode(&MemoryStore::new(Some("sepia"), false)), ThemeMode::Light);
	}

	#[test]
	fn test_toggle_and_persist() {
		let store = MemoryStore::new(None, true);
		let mode = initial_mode(&store).toggle();
		persist(&store, mode);
		assert_eq!(store.load().as_deref(), Some("light"));
		assert_eq!(initial_mode(&store), ThemeMode::Light);
		assert_eq!(mode.toggle(), ThemeMode::Dark);
	}

	#[test]
	fn test_ink_contrasts_with_theme() {
		assert_eq!(ThemeMode::Light.ink().to_css(), "#000000");
		assert_eq!(ThemeMode::Dark.ink().to_css(), "#ffffff");
		assert_eq!(
			ThemeMode::Dark.ink().with_alpha(0.5).to_css(),
			"rgba(255, 255, 255, 0.5)"
		);
	}
}
