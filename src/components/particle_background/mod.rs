//! Animated particle background.
//!
//! A fixed-size set of particles drifts across a full-viewport canvas,
//! bouncing off its edges. Particles closer than a threshold are joined by a
//! line whose opacity fades with distance.
//!
//! # Example
//!
//! ```ignore
//! let (theme, _) = signal(ThemeMode::Dark);
//! provide_context(theme);
//! view! { <ParticleBackground /> }
//! ```

mod canvas;
mod component;

pub use canvas::{CanvasSurface, SurfaceError};
pub use component::ParticleBackground;
