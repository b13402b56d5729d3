//! Superstore sales performance dashboard.
//!
//! The `data` module is the framework-free core (load → filter → aggregate →
//! export); `state`, `app` and `ui` put an egui front end on top of it.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod format;
pub mod state;
pub mod ui;
