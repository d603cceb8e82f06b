//! ID3 decision-tree learning with gain-ratio attribute selection.
/// Application directory resolution.
pub mod app_dirs;
/// TOML training configuration.
pub mod config;
/// Tracing subscriber setup.
pub mod logging;
/// Tree induction, persistence, and evaluation.
pub mod ml;
