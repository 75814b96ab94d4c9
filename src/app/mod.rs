// BuildSleuth - app/mod.rs
//
// Application layer: load orchestration and state management.
// Dependencies: core layer, platform layer.
// Must NOT depend on: ui.

pub mod report;
pub mod state;
