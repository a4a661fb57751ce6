//! Message update handlers - thin dispatcher delegating to submodules

mod auth;
mod editor;
mod images;

use iced::Task;
use iced::time::Instant;

use super::{App, Message};

impl App {
    /// Handle messages by delegating to appropriate submodule handlers
    pub fn update(&mut self, message: Message) -> Task<Message> {
        if let Some(task) = self.handle_auth(&message) {
            return task;
        }
        if let Some(task) = self.handle_images(&message) {
            return task;
        }
        if let Some(task) = self.handle_editor(&message) {
            return task;
        }

        match message {
            Message::AnimationTick => {
                self.ui.tick_animations(Instant::now());
                Task::none()
            }
            Message::DismissNotification => {
                self.core.notifier.dismiss();
                Task::none()
            }
            Message::ToggleTheme => {
                let display = &mut self.core.settings.display;
                display.dark_mode = !display.dark_mode;
                if let Err(e) = self.core.settings.save() {
                    tracing::warn!("Failed to save settings: {}", e);
                }
                Task::none()
            }
            Message::WindowClosed => {
                tracing::info!("Main window closed, exiting");
                iced::exit()
            }
            _ => Task::none(),
        }
    }
}
