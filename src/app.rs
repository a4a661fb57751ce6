//! Main application module

mod message;
mod state;
mod update;
mod view;

use iced::{Task, Theme};

pub use message::Message;
pub use state::{
    App, CoreState, EditorId, EditorMode, EditorState, LibraryState, LoginState, Screen, UiState,
};

impl App {
    /// Create new application instance
    pub fn new() -> (Self, Task<Message>) {
        let settings = crate::features::Settings::load();

        let ui = UiState::new(&settings);
        let core = CoreState::new(settings);
        let library = LibraryState::default();

        let app = Self { core, library, ui };

        let (window_id, open_window) = iced::window::open(iced::window::Settings {
            size: iced::Size::new(1100.0, 760.0),
            min_size: Some(iced::Size::new(720.0, 520.0)),
            #[cfg(target_os = "linux")]
            platform_specific: iced::window::settings::PlatformSpecific {
                application_id: "craft-admin".to_string(),
                ..Default::default()
            },
            ..Default::default()
        });
        tracing::info!("Opening main window with id: {:?}", window_id);

        (app, open_window.discard())
    }

    /// Application theme for a specific window
    pub fn theme(&self, _window_id: iced::window::Id) -> Theme {
        if self.core.settings.display.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn title(&self, _window_id: iced::window::Id) -> String {
        match self.ui.screen {
            Screen::Login => "CraftCMS Admin - Log In".to_string(),
            Screen::Dashboard => "CraftCMS Admin".to_string(),
            Screen::Editor => format!("CraftCMS Admin - {}", self.ui.editor.title()),
        }
    }

    /// Subscriptions for animation frames and window close
    pub fn subscription(&self) -> iced::Subscription<Message> {
        let needs_frames = subscription_logic::needs_animation_subscription(
            self.core.notifier.is_active(),
            self.ui.has_active_animations(),
        );

        let animation_sub = if needs_frames {
            iced::window::frames().map(|_| Message::AnimationTick)
        } else {
            iced::Subscription::none()
        };

        let close_sub = iced::window::close_events().map(|_id| Message::WindowClosed);

        iced::Subscription::batch([animation_sub, close_sub])
    }
}

/// Subscription decision logic for testability
pub mod subscription_logic {
    /// Frames are needed while a toast is on screen or a dialog is fading
    pub fn needs_animation_subscription(notification_active: bool, dialog_animating: bool) -> bool {
        notification_active || dialog_animating
    }
}
