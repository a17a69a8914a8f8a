use eframe::egui;

use crate::theme::{ThemeContext, ThemeKind};

/// Returns the newly picked theme, if any.
pub fn render(ui: &mut egui::Ui, theme: &ThemeContext) -> Option<ThemeKind> {
    let active = theme.active();
    let mut picked = None;

    egui::ComboBox::from_label("Theme")
        .selected_text(active.display_name())
        .show_ui(ui, |ui| {
            for kind in ThemeKind::ALL {
                let response = ui
                    .selectable_label(kind == active, kind.display_name())
                    .on_hover_text(kind.description());
                if response.clicked() && kind != active {
                    picked = Some(kind);
                }
            }
        });

    picked
}
