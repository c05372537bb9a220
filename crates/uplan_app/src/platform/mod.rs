//! Terminal front-end for the u:plan client.
pub mod app;
pub mod config;
pub mod effects;
pub mod ui;
