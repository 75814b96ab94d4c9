// BuildSleuth - ui/theme.rs
//
// Colour scheme and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Text colour for internal (built-in / package) rows: muted so project
/// assets stand out.
pub fn internal_text_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(107, 114, 128) // Gray 500
    } else {
        Color32::from_rgb(156, 163, 175) // Gray 400
    }
}

/// Foreground for regular rows.
pub fn row_text_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(229, 231, 235) // Gray 200
    } else {
        Color32::from_rgb(17, 24, 39) // Gray 900
    }
}

/// Bar fill behind the percentage column, proportional to share of build.
pub fn share_bar_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgba_premultiplied(59, 130, 246, 40) // Blue 500
    } else {
        Color32::from_rgba_premultiplied(37, 99, 235, 30) // Blue 600
    }
}

/// Warning text (config problems, failed locates).
pub const WARNING_TEXT: Color32 = Color32::from_rgb(253, 186, 116); // Orange 300

/// Apply dark/light visuals and the configured body font size.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        for (text_style, font) in style.text_styles.iter_mut() {
            font.size = match text_style {
                egui::TextStyle::Heading => font_size + 6.0,
                egui::TextStyle::Small => font_size - 3.0,
                _ => font_size,
            };
        }
    });
}

/// Layout constants.
pub const ROW_HEIGHT: f32 = 20.0;
pub const LOCATE_COLUMN_WIDTH: f32 = 64.0;
pub const SUMMARY_MIN_WIDTH: f32 = 380.0;
