use eframe::egui;

/// Returns the text to send once the user confirms a non-blank message.
pub fn render(ui: &mut egui::Ui, input_text: &mut String) -> Option<String> {
    let can_send = !input_text.trim().is_empty();
    let mut send = false;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(input_text).hint_text("Type a message..."),
        );
        if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            response.request_focus();
        }
    });

    if send && can_send {
        let message = input_text.clone();
        input_text.clear();
        return Some(message);
    }

    None
}
