// BuildSleuth - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: standard library, directories, glob, walkdir; core value
// types (e.g. `SortColumn` for config validation).
// Must NOT depend on: app, ui.

pub mod config;
pub mod editor_log;
pub mod fs;
