use eframe::egui;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::common::{ConversationId, SessionEvent};
use crate::config::AppConfig;
use crate::demo;
use crate::error::SessionError;
use crate::session::SessionRegistry;
use crate::theme::ThemeContext;

use super::components::{chat_area, debug_panel, input_bar, sidebar, theme_picker};
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    theme: ThemeContext,
    config_path: String,
    registry: SessionRegistry,
    event_receiver: mpsc::Receiver<SessionEvent>,
    runtime: Handle,
    show_debug: bool,
}

impl ChatApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        config_path: String,
        runtime: Handle,
    ) -> Self {
        let theme = ThemeContext::new(config.theme, config.system_dark);
        super::apply_theme(&cc.egui_ctx, &theme);

        let (registry, event_receiver) = SessionRegistry::new(config.simulation);
        Self {
            state: AppState::new(demo::contacts()),
            theme,
            config_path,
            registry,
            event_receiver,
            runtime,
            show_debug: false,
        }
    }

    /// Closes the session of the previous screen and opens `conversation`.
    fn open_conversation(&mut self, conversation: ConversationId) {
        if let Some(previous) = self.state.selected.take() {
            self.registry.close(&previous);
        }

        let history = demo::history(&conversation);
        {
            let _guard = self.runtime.enter();
            self.registry.open(conversation.clone(), history.clone());
        }
        self.state.select(conversation, history);
    }

    fn handle_session_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            if !self.registry.is_current(&event) {
                log::debug!("Dropping event from stale session {}", event.session);
                continue;
            }
            self.state.apply_event(event);
        }
    }

    fn send_message(&mut self, text: String) {
        let Some(conversation) = self.state.selected.as_ref() else {
            return;
        };
        let Some(session) = self.registry.get(conversation) else {
            log::warn!("No live session for conversation {conversation}");
            return;
        };

        match session.try_submit_message(&text) {
            Ok(()) => {}
            Err(SessionError::EmptyMessage) => {}
            Err(err) => log::warn!("Failed to submit message: {err}"),
        }
    }

    fn change_theme(&mut self, ctx: &egui::Context, kind: crate::theme::ThemeKind) {
        self.theme.set_theme(kind);
        super::apply_theme(ctx, &self.theme);
        crate::config::persist_theme(&self.config_path, kind);
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_session_events();
        let palette = self.theme.palette();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Session Chat");
                ui.separator();
                if let Some(kind) = theme_picker::render(ui, &self.theme) {
                    self.change_theme(ctx, kind);
                }
                ui.checkbox(&mut self.show_debug, "Debug");
            });
        });

        let mut clicked = None;
        egui::SidePanel::left("chat_list").show(ctx, |ui| {
            clicked = sidebar::render(
                ui,
                &self.state.contacts,
                self.state.selected.as_ref(),
                palette,
            );
        });
        if let Some(conversation) = clicked {
            self.open_conversation(conversation);
        }

        if self.show_debug {
            egui::SidePanel::right("debug_panel").show(ctx, |ui| {
                debug_panel::render(ui, &self.state);
            });
        }

        let mut outgoing = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(selected) = self.state.selected.as_ref() else {
                ui.centered_and_justified(|ui| {
                    ui.label("Pick a conversation");
                });
                return;
            };

            if let Some(contact) = demo::find_contact(&self.state.contacts, selected) {
                chat_area::render_header(ui, contact, self.state.peer_typing, palette);
            }
            ui.separator();

            egui::TopBottomPanel::bottom("input_bar").show_inside(ui, |ui| {
                outgoing = input_bar::render(ui, &mut self.state.input_text);
            });
            chat_area::render(ui, &self.state.messages, palette);
        });
        if let Some(text) = outgoing {
            self.send_message(text);
        }

        ctx.request_repaint();
    }
}
