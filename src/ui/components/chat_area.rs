use eframe::egui;

use crate::common::{DeliveryStatus, Message};
use crate::demo::Contact;
use crate::theme::Palette;
use crate::ui::color32;

const READ_TICK: egui::Color32 = egui::Color32::from_rgb(0x4F, 0xC3, 0xF7);

pub fn render_header(ui: &mut egui::Ui, contact: &Contact, peer_typing: bool, palette: &Palette) {
    ui.horizontal(|ui| {
        ui.heading(&contact.name);
        let (text, color) = if peer_typing {
            ("typing...", palette.success)
        } else if contact.online {
            ("Online", palette.success)
        } else {
            ("Offline", palette.text_secondary)
        };
        ui.colored_label(color32(color), text);
    });
}

pub fn render(ui: &mut egui::Ui, messages: &[Message], palette: &Palette) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in messages {
                render_bubble(ui, message, palette);
                ui.add_space(6.0);
            }
        });
}

fn render_bubble(ui: &mut egui::Ui, message: &Message, palette: &Palette) {
    let local = message.author.is_local();
    let layout = if local {
        egui::Layout::right_to_left(egui::Align::TOP)
    } else {
        egui::Layout::left_to_right(egui::Align::TOP)
    };
    let (fill, text_color) = if local {
        (color32(palette.primary), egui::Color32::WHITE)
    } else {
        (color32(palette.card_elevated), color32(palette.text))
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::new()
            .fill(fill)
            .corner_radius(12.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.8);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&message.text).color(text_color));
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(&message.created_at)
                                .small()
                                .color(text_color.gamma_multiply(0.7)),
                        );
                        if local {
                            render_ticks(ui, message.status, palette);
                        }
                    });
                });
            });
    });
}

fn render_ticks(ui: &mut egui::Ui, status: DeliveryStatus, palette: &Palette) {
    let (ticks, color) = match status {
        DeliveryStatus::Sent => ("✓", color32(palette.text_secondary)),
        DeliveryStatus::Delivered => ("✓✓", color32(palette.text_secondary)),
        DeliveryStatus::Read => ("✓✓", READ_TICK),
    };
    ui.label(egui::RichText::new(ticks).small().color(color));
}
