// BuildSleuth - ui/panels/summary.rs
//
// Build summary modal window.
// Shows totals for the loaded report, how the log was read, and any
// warnings collected since startup.

use crate::app::state::AppState;
use crate::core::model::format_bytes;
use crate::ui::theme;

/// Render the build summary dialog (if state.show_summary is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_summary {
        return;
    }

    let mut open = true;
    egui::Window::new("Build Summary")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(theme::SUMMARY_MIN_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(report) = state.report() {
                // -----------------------------------------------------------------
                // Sizes
                // -----------------------------------------------------------------
                ui.strong("Assets");
                let total = report.total_bytes();
                let internal = report.internal_bytes();
                egui::Grid::new("summary_assets")
                    .num_columns(2)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Assets listed:");
                        ui.label(report.records.len().to_string());
                        ui.end_row();

                        ui.label("Project assets:");
                        ui.label(
                            (report.records.len() - report.internal_count()).to_string(),
                        );
                        ui.end_row();

                        ui.label("Internal assets:");
                        ui.label(report.internal_count().to_string());
                        ui.end_row();

                        ui.label("Total size:");
                        ui.label(format_bytes(total));
                        ui.end_row();

                        ui.label("Internal size:");
                        let share = if total > 0.0 {
                            internal / total * 100.0
                        } else {
                            0.0
                        };
                        ui.label(format!("{} ({share:.1}%)", format_bytes(internal)));
                        ui.end_row();

                        ui.label("Shown in table:");
                        ui.label(format!(
                            "{} rows, {}",
                            state.visible_indices().len(),
                            format_bytes(state.visible_bytes())
                        ));
                        ui.end_row();
                    });

                // -----------------------------------------------------------------
                // Source log
                // -----------------------------------------------------------------
                ui.add_space(8.0);
                ui.separator();
                ui.strong("Editor log");
                egui::Grid::new("summary_log")
                    .num_columns(2)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("File:");
                        ui.label(report.source.display().to_string());
                        ui.end_row();

                        ui.label("Lines read:");
                        ui.label(report.stats.lines_read.to_string());
                        ui.end_row();

                        ui.label("Report section:");
                        let section = match (report.stats.section_found, report.stats.section_closed) {
                            (false, _) => "not found",
                            (true, false) => "found (unterminated)",
                            (true, true) => "found",
                        };
                        ui.label(section);
                        ui.end_row();

                        ui.label("Parsed at:");
                        ui.label(
                            report
                                .parsed_at
                                .with_timezone(&chrono::Local)
                                .format("%Y-%m-%d %H:%M:%S")
                                .to_string(),
                        );
                        ui.end_row();

                        ui.label("Duration:");
                        ui.label(format!("{:.2}s", report.duration.as_secs_f64()));
                        ui.end_row();
                    });
            } else {
                ui.label("No report loaded.");
            }

            // ---------------------------------------------------------------------
            // Warnings
            // ---------------------------------------------------------------------
            if !state.warnings.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.strong(format!("Warnings ({})", state.warnings.len()));
                egui::ScrollArea::vertical()
                    .id_salt("summary_warnings")
                    .max_height(160.0)
                    .show(ui, |ui| {
                        for warning in &state.warnings {
                            ui.colored_label(theme::WARNING_TEXT, warning);
                        }
                    });
            }
        });

    if !open {
        state.show_summary = false;
    }
}
