// BuildSleuth - ui/panels/report_table.rs
//
// Sortable asset-size table (central area).
//
// Uses egui's `ScrollArea::show_rows`, which renders only the rows in the
// viewport. Column widths follow the editor window layout: name takes half
// the width, size and percentage a quarter each (minus the Locate column).
//
// Header clicks, row selection, and Locate requests are collected while
// `state` is borrowed by the row loop and applied afterwards.

use crate::app::state::AppState;
use crate::core::view::SortColumn;
use crate::ui::theme;

/// Render the report table.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let rows = state.visible_indices().len();

    if rows == 0 {
        ui.centered_and_justified(|ui| {
            if state.total_records() == 0 {
                ui.label("No data to display.");
            } else {
                ui.label("No assets match the current filters.");
            }
        });
        return;
    }

    let row_height = theme::ROW_HEIGHT;
    let data_width = (ui.available_width() - theme::LOCATE_COLUMN_WIDTH).max(120.0);
    let name_w = data_width / 2.0;
    let size_w = data_width / 4.0;
    let pct_w = data_width / 4.0;

    let mut sort_request: Option<SortColumn> = None;
    let mut select_request: Option<usize> = None;
    let mut locate_request: Option<usize> = None;

    // ---- Header ----
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        let headers = [
            ("File Name", SortColumn::Name, name_w),
            ("Size", SortColumn::Size, size_w),
            ("Percentage", SortColumn::Percentage, pct_w),
        ];
        for (label, column, width) in headers {
            let text = if state.view.sort_column == column {
                format!("{label} {}", state.view.sort_direction.arrow())
            } else {
                label.to_string()
            };
            let clicked = ui
                .add_sized(
                    [width, row_height],
                    egui::Button::new(egui::RichText::new(text).strong()).frame(false),
                )
                .on_hover_text("Sort by this column")
                .clicked();
            if clicked {
                sort_request = Some(column);
            }
        }
        let log_order = ui
            .add_sized(
                [theme::LOCATE_COLUMN_WIDTH, row_height],
                egui::Button::new(egui::RichText::new("#").weak()).frame(false),
            )
            .on_hover_text("Restore log order");
        if log_order.clicked() {
            sort_request = Some(SortColumn::Source);
        }
    });
    ui.separator();

    // ---- Rows ----
    let dark = state.dark_mode;
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show_rows(ui, row_height, rows, |ui, row_range| {
            for display_idx in row_range {
                let Some(&idx) = state.visible_indices().get(display_idx) else {
                    continue;
                };
                let Some(record) = state.record(idx) else {
                    continue;
                };
                let is_selected = state.selected == Some(idx);
                let internal = record.is_internal();
                let text_colour = if internal {
                    theme::internal_text_colour(dark)
                } else {
                    theme::row_text_colour(dark)
                };

                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;

                    let name = egui::RichText::new(record.name())
                        .monospace()
                        .color(text_colour);
                    let name_resp = ui
                        .add_sized(
                            [name_w, row_height],
                            egui::SelectableLabel::new(is_selected, name),
                        )
                        .on_hover_text(record.name());
                    if name_resp.clicked() {
                        select_request = Some(idx);
                    }

                    ui.add_sized(
                        [size_w, row_height],
                        egui::Label::new(egui::RichText::new(record.size()).color(text_colour)),
                    );

                    // Share bar behind the percentage text.
                    let (pct_rect, _) = ui.allocate_exact_size(
                        egui::vec2(pct_w, row_height),
                        egui::Sense::hover(),
                    );
                    let share = (record.percentage_value() / 100.0).clamp(0.0, 1.0) as f32;
                    let bar = egui::Rect::from_min_size(
                        pct_rect.min,
                        egui::vec2(pct_rect.width() * share, pct_rect.height()),
                    );
                    ui.painter().rect_filled(bar, 0.0, theme::share_bar_colour(dark));
                    ui.painter().text(
                        pct_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        record.percentage(),
                        egui::TextStyle::Body.resolve(ui.style()),
                        text_colour,
                    );

                    let locate = ui
                        .add_enabled(
                            !internal,
                            egui::Button::new("Locate")
                                .small()
                                .min_size(egui::vec2(theme::LOCATE_COLUMN_WIDTH, row_height)),
                        )
                        .on_hover_text("Reveal this asset in the project folder")
                        .on_disabled_hover_text("Built-in and package assets are not in the project");
                    if locate.clicked() {
                        locate_request = Some(idx);
                    }
                });
            }
        });

    if let Some(column) = sort_request {
        state.sort_by(column);
    }
    if let Some(idx) = select_request {
        state.selected = if state.selected == Some(idx) {
            None
        } else {
            Some(idx)
        };
    }
    if let Some(idx) = locate_request {
        state.locate_record(idx);
    }
}
