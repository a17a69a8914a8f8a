use eframe::egui;

use crate::common::DeliveryStatus;
use crate::ui::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &AppState) {
    ui.heading("Debug Info");
    ui.separator();

    let count = |status: DeliveryStatus| {
        state
            .messages
            .iter()
            .filter(|m| m.author.is_local() && m.status == status)
            .count()
    };
    ui.horizontal(|ui| {
        ui.label("Sent:");
        ui.label(count(DeliveryStatus::Sent).to_string());
        ui.label("Delivered:");
        ui.label(count(DeliveryStatus::Delivered).to_string());
        ui.label("Read:");
        ui.label(count(DeliveryStatus::Read).to_string());
    });
    ui.horizontal(|ui| {
        ui.label("Peer typing:");
        ui.label(if state.peer_typing { "yes" } else { "no" });
    });

    ui.separator();
    ui.label("Recent Events:");
    egui::ScrollArea::vertical()
        .max_height(200.0)
        .show(ui, |ui| {
            for event in state.debug_events.iter().rev().take(20) {
                let time_str = event.timestamp.format("%H:%M:%S");
                let color = match event.event_type {
                    "MESSAGE_APPENDED" => egui::Color32::GREEN,
                    "STATUS_CHANGED" => egui::Color32::LIGHT_BLUE,
                    "PEER_TYPING" => egui::Color32::YELLOW,
                    "CLOSED" => egui::Color32::RED,
                    _ => egui::Color32::GRAY,
                };

                ui.horizontal(|ui| {
                    ui.colored_label(color, format!("[{}]", time_str));
                    ui.label(&event.message);
                });
            }
        });
}
