//! Budget Grid UI
//!
//! Leptos single-page client for editing a hierarchical budget table.

pub mod api;
pub mod app;
pub mod components;
pub mod context;
pub mod models;
pub mod tree;

pub use app::App;
