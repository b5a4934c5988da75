mod app;
mod cli;
mod commands;
mod config;
mod effects;
mod files;
mod logging;
mod ui;

pub use app::run_app;
