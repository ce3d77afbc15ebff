//! Terminal movie browser for cinehaven.
//!
//! Uses `ratatui` + `crossterm` for rendering. Page data comes from the
//! [`cinehaven_store::Store`]; each page fetches when its route or page
//! number changes.

/// Application controller.
pub mod app;
/// Navigation bar state.
pub mod navbar;
/// Page view models.
pub mod pages;
/// In-app routes.
pub mod route;
mod runner;
mod ui;

pub use app::{App, FetchKey, Focus, View};
pub use route::Route;
pub use runner::{handle_key, run_browser};
