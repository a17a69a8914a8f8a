mod app;
mod components;
mod state;

pub use app::ChatApp;
pub use state::AppState;

use eframe::egui;

use crate::theme::{Color, ThemeContext};

pub(crate) fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Maps the active palette onto egui's visuals.
pub(crate) fn apply_theme(ctx: &egui::Context, theme: &ThemeContext) {
    let palette = theme.palette();
    let mut visuals = if theme.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    visuals.panel_fill = color32(palette.background);
    visuals.window_fill = color32(palette.card);
    visuals.faint_bg_color = color32(palette.card);
    visuals.extreme_bg_color = color32(palette.card_elevated);
    visuals.override_text_color = Some(color32(palette.text));
    visuals.hyperlink_color = color32(palette.secondary);
    visuals.selection.bg_fill = color32(palette.primary);
    visuals.error_fg_color = color32(palette.error);
    visuals.warn_fg_color = color32(palette.warning);

    ctx.set_visuals(visuals);
}
