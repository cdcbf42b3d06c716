pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod games;
pub mod logging;
pub mod terminal;
pub mod ui;
