use eframe::egui;

use crate::common::ConversationId;
use crate::demo::Contact;
use crate::theme::Palette;
use crate::ui::color32;

/// Renders the chat list. Returns the conversation the user clicked.
pub fn render(
    ui: &mut egui::Ui,
    contacts: &[Contact],
    selected: Option<&ConversationId>,
    palette: &Palette,
) -> Option<ConversationId> {
    ui.heading("Chats");
    ui.separator();

    if contacts.is_empty() {
        ui.label("No conversations yet");
        return None;
    }

    let mut clicked = None;
    for contact in contacts {
        let is_selected = selected == Some(&contact.conversation);
        ui.horizontal(|ui| {
            let dot = if contact.online {
                palette.success
            } else {
                palette.text_secondary
            };
            ui.colored_label(color32(dot), "●");

            if ui.selectable_label(is_selected, &contact.name).clicked() && !is_selected {
                clicked = Some(contact.conversation.clone());
            }

            if contact.unread > 0 && !is_selected {
                ui.colored_label(color32(palette.primary), format!("({})", contact.unread));
            }
        });
        ui.label(
            egui::RichText::new(format!(
                "{} · {}",
                contact.last_message, contact.last_message_time
            ))
            .small()
            .color(color32(palette.text_secondary)),
        );
        ui.add_space(4.0);
    }

    clicked
}
