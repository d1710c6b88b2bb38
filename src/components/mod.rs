//! View components for the site shell.

pub mod nav_bar;
pub mod page_layout;
pub mod pages;
pub mod particle_background;
