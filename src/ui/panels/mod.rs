// BuildSleuth - ui/panels/mod.rs

pub mod about;
pub mod report_table;
pub mod summary;
pub mod toolbar;
