// BuildSleuth - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library plus regex/serde/csv for pure transforms.
// Must NOT depend on: ui, platform, app, or touch the filesystem directly.

pub mod classify;
pub mod export;
pub mod model;
pub mod parser;
pub mod view;
