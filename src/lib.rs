pub mod app;
pub mod config;
pub mod debounce;
pub mod error_handling;
pub mod fetcher;
pub mod github;
pub mod input;
pub mod interactive;
pub mod models;
pub mod ui;
pub mod view;

pub use models::*;
