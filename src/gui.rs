// BuildSleuth - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels and manages the load lifecycle.

use crate::app::report::{LoadManager, LoadProgress, LoadRequest};
use crate::app::state::AppState;
use crate::platform::editor_log;
use crate::ui;
use std::path::{Path, PathBuf};

/// Which file format a File → Export action writes.
#[derive(Debug, Clone, Copy)]
enum ExportKind {
    Csv,
    Json,
}

impl ExportKind {
    fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// The BuildSleuth application.
pub struct BuildSleuthApp {
    pub state: AppState,
    pub load_manager: LoadManager,
    /// Theme settings last pushed to egui; re-applied only when they change.
    applied_theme: Option<(bool, f32)>,
}

impl BuildSleuthApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            load_manager: LoadManager::new(),
            applied_theme: None,
        }
    }

    /// Drain messages from the background load thread.
    fn poll_load(&mut self, ctx: &egui::Context) {
        let messages = self.load_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            match msg {
                LoadProgress::Started { path } => {
                    self.state.status_message = format!("Reading {}...", path.display());
                    self.state.load_in_progress = true;
                }
                LoadProgress::Completed { report } => {
                    self.state.load_in_progress = false;
                    self.state.replace_report(report);
                }
                LoadProgress::Failed { error } => {
                    self.state.load_in_progress = false;
                    self.state.status_message = format!("Load failed: {error}");
                }
                LoadProgress::Cancelled => {
                    self.state.load_in_progress = false;
                    self.state.status_message = "Load cancelled.".to_string();
                }
            }
        }
        if had_messages || self.state.load_in_progress {
            ctx.request_repaint();
        }
    }

    /// Start a load if a panel asked for one.
    fn handle_pending_load(&mut self) {
        if !std::mem::take(&mut self.state.pending_load) {
            return;
        }
        let Some(log_path) = self.state.log_path.clone() else {
            self.state.status_message =
                "No editor log selected. Use File \u{2192} Open Log\u{2026}".to_string();
            return;
        };
        // The GUI always keeps the full record set; the internal-asset
        // toggle filters the retained report instead of reloading.
        self.load_manager.start_load(LoadRequest {
            log_path,
            scratch_dir: self.state.scratch_dir.clone(),
            project_assets_only: false,
        });
        self.state.load_in_progress = true;
    }

    /// Switch to a different log and reload.
    fn open_log(&mut self, path: PathBuf) {
        self.state.available_logs = path
            .parent()
            .map(editor_log::candidate_logs)
            .unwrap_or_default();
        self.state.log_path = Some(path);
        self.state.clear_report();
        self.state.pending_load = true;
    }

    /// Write the visible rows to `dest`.
    fn export_visible(&mut self, kind: ExportKind, dest: &Path) {
        let file = match std::fs::File::create(dest) {
            Ok(f) => f,
            Err(e) => {
                self.state.status_message = format!("Cannot create file: {e}");
                return;
            }
        };
        let records = self.state.visible_records();
        let result = match kind {
            ExportKind::Csv => crate::core::export::export_csv(records, file, dest),
            ExportKind::Json => crate::core::export::export_json(records, file, dest),
        };
        self.state.status_message = match result {
            Ok(n) => format!("Exported {n} assets to {}.", kind.label()),
            Err(e) => format!("{} export failed: {e}", kind.label()),
        };
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Reload").clicked() {
                        self.state.pending_load = true;
                        ui.close_menu();
                    }
                    if ui.button("Open Log\u{2026}").clicked() {
                        let mut dialog = rfd::FileDialog::new().add_filter("Log", &["log", "txt"]);
                        if let Some(dir) = self.state.log_path.as_deref().and_then(Path::parent) {
                            dialog = dialog.set_directory(dir);
                        }
                        if let Some(path) = dialog.pick_file() {
                            self.open_log(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    let has_rows = !self.state.visible_indices().is_empty();
                    ui.add_enabled_ui(has_rows, |ui| {
                        ui.menu_button("Export", |ui| {
                            for kind in [ExportKind::Csv, ExportKind::Json] {
                                if ui.button(format!("Export {}...", kind.label())).clicked() {
                                    let mut dialog = rfd::FileDialog::new()
                                        .add_filter(kind.label(), &[kind.extension()])
                                        .set_file_name(format!("build_sizes.{}", kind.extension()));
                                    if let Some(dir) = self.state.export_start_dir() {
                                        dialog = dialog.set_directory(dir);
                                    }
                                    if let Some(dest) = dialog.save_file() {
                                        self.export_visible(kind, &dest);
                                    }
                                    ui.close_menu();
                                }
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Project", |ui| {
                    if ui.button("Choose\u{2026}").clicked() {
                        if let Some(root) = rfd::FileDialog::new().pick_folder() {
                            self.state.status_message =
                                format!("Project folder set to {}", root.display());
                            self.state.project_root = Some(root);
                        }
                        ui.close_menu();
                    }
                    if let Some(root) = &self.state.project_root {
                        ui.label(egui::RichText::new(root.display().to_string()).small().weak());
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Build Summary").clicked() {
                        self.state.show_summary = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.checkbox(&mut self.state.dark_mode, "Dark mode");
                });
                ui.menu_button("Help", |ui| {
                    if ui.button(format!("About {}", crate::util::constants::APP_NAME)).clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                if self.state.load_in_progress && ui.small_button("Cancel").clicked() {
                    self.load_manager.cancel_load();
                    self.state.load_in_progress = false;
                    self.state.status_message = "Load cancelled.".to_string();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let total = self.state.total_records();
                    if total > 0 {
                        ui.label(format!(
                            "{}/{total} assets \u{00b7} {}",
                            self.state.visible_indices().len(),
                            crate::core::model::format_bytes(self.state.visible_bytes())
                        ));
                    }
                    if !self.state.warnings.is_empty() {
                        ui.colored_label(
                            ui::theme::WARNING_TEXT,
                            format!("\u{26a0} {}", self.state.warnings.len()),
                        )
                        .on_hover_text("See View \u{2192} Build Summary");
                    }
                });
            });
        });
    }
}

impl eframe::App for BuildSleuthApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let theme = (self.state.dark_mode, self.state.font_size);
        if self.applied_theme != Some(theme) {
            ui::theme::apply(ctx, theme.0, theme.1);
            self.applied_theme = Some(theme);
        }

        self.poll_load(ctx);
        self.handle_pending_load();

        self.render_menu_bar(ctx);
        self.render_status_bar(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(2.0);
            ui::panels::toolbar::render(ui, &mut self.state);
            ui.add_space(2.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::report_table::render(ui, &mut self.state);
        });

        ui::panels::summary::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.load_manager.cancel_load();
    }
}
