// BuildSleuth - app/state.rs
//
// Application state management. Holds the most recent build report, the
// view (toggle, search, sort) over it, selection, and status text.
// Owned by the eframe::App implementation.

use crate::core::model::{BuildReport, SizeRecord};
use crate::core::view::{self, SortColumn, ViewState};
use crate::platform::fs;
use std::path::{Path, PathBuf};

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Most recent report. Replaced wholesale on every load, never merged.
    report: Option<BuildReport>,

    /// Toggle, search, and sort applied to the report.
    pub view: ViewState,

    /// Indices into `report.records` that pass `view`, in display order.
    visible: Vec<usize>,

    /// Record index (into `report.records`) of the selected row.
    pub selected: Option<usize>,

    /// Editor log to load (None until resolved).
    pub log_path: Option<PathBuf>,

    /// Other `Editor*.log` files next to `log_path`.
    pub available_logs: Vec<PathBuf>,

    /// Unity project root for the locate action.
    pub project_root: Option<PathBuf>,

    /// Directory for scratch copies.
    pub scratch_dir: PathBuf,

    /// Preferred starting folder for export save dialogs.
    pub export_dir: Option<PathBuf>,

    /// Whether a load is currently in progress.
    pub load_in_progress: bool,

    /// Set by panels to ask the app to start a load on the next frame.
    pub pending_load: bool,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config problems, failed locates).
    pub warnings: Vec<String>,

    pub show_summary: bool,
    pub show_about: bool,

    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,

    /// Body font size in points.
    pub font_size: f32,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state with no report loaded.
    pub fn new(scratch_dir: PathBuf, view: ViewState, debug_mode: bool) -> Self {
        Self {
            report: None,
            view,
            visible: Vec::new(),
            selected: None,
            log_path: None,
            available_logs: Vec::new(),
            project_root: None,
            scratch_dir,
            export_dir: None,
            load_in_progress: false,
            pending_load: false,
            status_message: "Ready. Run a player build in Unity, then press Reload.".to_string(),
            warnings: Vec::new(),
            show_summary: false,
            show_about: false,
            dark_mode: true,
            font_size: crate::util::constants::DEFAULT_FONT_SIZE,
            debug_mode,
        }
    }

    pub fn report(&self) -> Option<&BuildReport> {
        self.report.as_ref()
    }

    /// Install a freshly loaded report, discarding the previous one.
    pub fn replace_report(&mut self, report: BuildReport) {
        self.status_message = if !report.stats.section_found {
            "No build size report found in the log. Build a player first.".to_string()
        } else {
            format!(
                "Loaded {} assets from {} in {:.2}s",
                report.records.len(),
                report.source.display(),
                report.duration.as_secs_f64()
            )
        };
        self.report = Some(report);
        self.selected = None;
        self.apply_view();
    }

    /// Drop the current report.
    pub fn clear_report(&mut self) {
        self.report = None;
        self.visible.clear();
        self.selected = None;
    }

    /// Recompute visible rows from the report and view.
    pub fn apply_view(&mut self) {
        self.visible = match &self.report {
            Some(report) => view::visible_indices(&report.records, &self.view),
            None => Vec::new(),
        };

        // Clear selection if it is no longer visible
        if let Some(idx) = self.selected {
            if !self.visible.contains(&idx) {
                self.selected = None;
            }
        }
    }

    /// Show or hide internal assets. Re-filters the retained report; no reload.
    pub fn set_show_internal(&mut self, show: bool) {
        if self.view.show_internal != show {
            self.view.show_internal = show;
            self.apply_view();
        }
    }

    /// Header click on `column`.
    pub fn sort_by(&mut self, column: SortColumn) {
        self.view.toggle_sort(column);
        self.apply_view();
    }

    /// Visible record indices in display order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Visible records in display order.
    pub fn visible_records(&self) -> impl Iterator<Item = &SizeRecord> + '_ {
        let records = self.report.as_ref().map(|r| r.records.as_slice()).unwrap_or(&[]);
        self.visible.iter().filter_map(move |&i| records.get(i))
    }

    /// Total number of records in the report (visible or not).
    pub fn total_records(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.records.len())
    }

    pub fn record(&self, idx: usize) -> Option<&SizeRecord> {
        self.report.as_ref().and_then(|r| r.records.get(idx))
    }

    pub fn selected_record(&self) -> Option<&SizeRecord> {
        self.selected.and_then(|idx| self.record(idx))
    }

    /// Reveal the asset behind record `idx` in the system file manager.
    ///
    /// Selects the row and reports the outcome in the status bar.
    pub fn locate_record(&mut self, idx: usize) {
        let Some(record) = self.record(idx) else {
            return;
        };
        let name = record.name().to_string();
        let internal = record.is_internal();
        self.selected = Some(idx);

        if internal {
            self.status_message = format!("'{name}' is a built-in or package asset; nothing to locate.");
            return;
        }
        let Some(root) = self.project_root.clone() else {
            self.status_message =
                "Set a Unity project folder (Project \u{2192} Choose\u{2026}) to locate assets.".to_string();
            return;
        };

        match fs::resolve_asset_path(&root, &name) {
            Some(path) => match fs::reveal_in_file_manager(&path) {
                Ok(()) => self.status_message = format!("Revealed {}", path.display()),
                Err(e) => {
                    let msg = format!("Could not open file manager for {}: {e}", path.display());
                    self.warnings.push(msg.clone());
                    self.status_message = msg;
                }
            },
            None => {
                self.status_message =
                    format!("'{name}' was not found under {}", root.display());
            }
        }
    }

    /// Folder the export dialog opens in: the export directory when it
    /// exists, otherwise the folder holding the current log.
    pub fn export_start_dir(&self) -> Option<&Path> {
        self.export_dir
            .as_deref()
            .filter(|dir| dir.is_dir())
            .or_else(|| self.log_path.as_deref().and_then(Path::parent))
    }

    /// Combined size of the visible rows, in bytes.
    pub fn visible_bytes(&self) -> f64 {
        self.visible_records().map(SizeRecord::size_bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ParseStats;
    use crate::core::parser;
    use crate::util::constants;
    use chrono::Utc;
    use std::time::Duration;

    fn report(lines: &[&str]) -> BuildReport {
        let mut all = vec![constants::SECTION_MARKER];
        all.extend_from_slice(lines);
        let out = parser::parse_with_stats(all, None);
        BuildReport {
            source: PathBuf::from("Editor.log"),
            records: out.records,
            stats: out.stats,
            parsed_at: Utc::now(),
            duration: Duration::ZERO,
        }
    }

    fn state() -> AppState {
        AppState::new(PathBuf::from("scratch"), ViewState::default(), false)
    }

    #[test]
    fn test_toggle_refilters_without_reload() {
        let mut s = state();
        s.replace_report(report(&[
            " 2 mb 50% Assets/A.png",
            " 1 mb 25% Built-in Shader",
            " 1 mb 25% Packages/p/x.mat",
        ]));
        assert_eq!(s.visible_indices(), &[0]);
        s.set_show_internal(true);
        assert_eq!(s.visible_indices(), &[0, 1, 2]);
        assert_eq!(s.total_records(), 3);
    }

    #[test]
    fn test_replace_report_is_wholesale() {
        let mut s = state();
        s.view.show_internal = true;
        s.replace_report(report(&[" 2 mb 50% Assets/A.png", " 1 mb 25% Assets/B.png"]));
        s.selected = Some(1);
        s.replace_report(report(&[" 3 mb 75% Assets/C.png"]));
        assert_eq!(s.total_records(), 1);
        assert_eq!(s.visible_records().next().unwrap().name(), "Assets/C.png");
        assert_eq!(s.selected, None);
    }

    #[test]
    fn test_missing_section_sets_status() {
        let mut s = state();
        s.replace_report(BuildReport {
            source: PathBuf::from("Editor.log"),
            records: Vec::new(),
            stats: ParseStats::default(),
            parsed_at: Utc::now(),
            duration: Duration::ZERO,
        });
        assert!(s.status_message.contains("No build size report"));
        assert_eq!(s.visible_records().count(), 0);
    }

    #[test]
    fn test_selection_cleared_when_row_hidden() {
        let mut s = state();
        s.view.show_internal = true;
        s.replace_report(report(&[" 2 mb 50% Assets/A.png", " 1 mb 25% Built-in Shader"]));
        s.selected = Some(1);
        s.set_show_internal(false);
        assert_eq!(s.selected, None);
    }

    #[test]
    fn test_sort_by_size() {
        let mut s = state();
        s.replace_report(report(&[" 10 kb 1% Assets/Small.png", " 3 mb 90% Assets/Big.png"]));
        s.sort_by(SortColumn::Size);
        let names: Vec<&str> = s.visible_records().map(SizeRecord::name).collect();
        assert_eq!(names, vec!["Assets/Big.png", "Assets/Small.png"]);
    }

    #[test]
    fn test_export_start_dir_prefers_existing_export_dir() {
        let exports = tempfile::tempdir().unwrap();
        let mut s = state();
        s.log_path = Some(PathBuf::from("logs").join("Editor.log"));
        s.export_dir = Some(exports.path().to_path_buf());
        assert_eq!(s.export_start_dir(), Some(exports.path()));
    }

    #[test]
    fn test_export_start_dir_falls_back_to_log_folder() {
        let mut s = state();
        s.log_path = Some(PathBuf::from("logs").join("Editor.log"));
        s.export_dir = Some(PathBuf::from("/definitely/not/here"));
        assert_eq!(s.export_start_dir(), Some(Path::new("logs")));

        s.log_path = None;
        assert_eq!(s.export_start_dir(), None);
    }

    #[test]
    fn test_locate_internal_asset_does_nothing() {
        let mut s = state();
        s.view.show_internal = true;
        s.replace_report(report(&[" 1 mb 25% Built-in Shader"]));
        s.locate_record(0);
        assert!(s.status_message.contains("nothing to locate"));
        assert_eq!(s.selected, Some(0));
    }

    #[test]
    fn test_locate_without_project_root_asks_for_one() {
        let mut s = state();
        s.replace_report(report(&[" 1 mb 25% Assets/A.png"]));
        s.locate_record(0);
        assert!(s.status_message.contains("project folder"));
    }

    #[test]
    fn test_locate_missing_asset_reports_not_found() {
        let project = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(project.path().join("Assets")).unwrap();
        let mut s = state();
        s.project_root = Some(project.path().to_path_buf());
        s.replace_report(report(&[" 1 mb 25% Assets/Gone.png"]));
        s.locate_record(0);
        assert!(s.status_message.contains("was not found"));
    }
}
