//! Interactive solar-system portfolio.
//!
//! Fifty project planets orbit an animated core. Clicking a planet flies
//! the camera to it and opens a panel describing the project; the camera
//! returns to the overview when the panel is closed.

pub mod app;
pub mod camera;
pub mod catalog;
pub mod color;
pub mod config;
pub mod drawing;
pub mod easing;
pub mod math;
pub mod orbit;
pub mod orbital_core;
mod overlay;
pub mod planets;
pub mod scene;
mod settings;
pub mod store;
pub mod time;

pub use app::App;
