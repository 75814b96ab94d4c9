// BuildSleuth - ui/panels/toolbar.rs
//
// Toolbar above the report table: reload, log picker, internal-asset
// toggle, and name search.

use crate::app::state::AppState;

/// Render the toolbar row.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let reload = ui
            .add_enabled(!state.load_in_progress, egui::Button::new("\u{21bb} Reload"))
            .on_hover_text("Re-read the editor log (build the player in Unity first)");
        if reload.clicked() {
            state.pending_load = true;
        }

        if state.load_in_progress {
            ui.spinner();
        }

        ui.separator();

        // Log picker: only shown when more than one Editor*.log sits next to
        // the current log (e.g. Editor.log and Editor-prev.log).
        if state.available_logs.len() > 1 {
            let current = state
                .log_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "(none)".to_string());
            let mut chosen = None;
            egui::ComboBox::from_id_salt("log_picker")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for path in &state.available_logs {
                        let label = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.display().to_string());
                        let is_current = state.log_path.as_deref() == Some(path.as_path());
                        if ui.selectable_label(is_current, label).clicked() && !is_current {
                            chosen = Some(path.clone());
                        }
                    }
                });
            if let Some(path) = chosen {
                state.log_path = Some(path);
                state.pending_load = true;
            }
            ui.separator();
        }

        let mut show_internal = state.view.show_internal;
        if ui
            .checkbox(&mut show_internal, "Show internal files")
            .on_hover_text("Include built-in resources and package assets")
            .changed()
        {
            state.set_show_internal(show_internal);
        }

        ui.separator();

        ui.label("Search:");
        let search = ui.add(
            egui::TextEdit::singleline(&mut state.view.name_search)
                .hint_text("file name")
                .desired_width(220.0),
        );
        if search.changed() {
            state.apply_view();
        }
        if !state.view.name_search.is_empty() && ui.small_button("\u{2715}").clicked() {
            state.view.name_search.clear();
            state.apply_view();
        }
    });
}
