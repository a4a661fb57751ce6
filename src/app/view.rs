// src/app/view.rs
//! Application view rendering

use std::time::Instant;

use iced::widget::{Space, column, container, responsive, stack};
use iced::{Element, Fill};

use super::message::Message;
use super::{App, Screen};
use crate::ui::components::header::HEADER_HEIGHT;
use crate::ui::{components, pages, widgets};

/// Horizontal padding of the dashboard page
const PAGE_PADDING: f32 = 48.0;

impl App {
    /// Build the view for a specific window
    pub fn view(&self, _window_id: iced::window::Id) -> Element<'_, Message> {
        let main: Element<'_, Message> = match self.ui.screen {
            Screen::Login => pages::login::view(&self.ui.login),
            Screen::Dashboard | Screen::Editor => {
                let server = self
                    .core
                    .client
                    .as_ref()
                    .map(|client| client.base_url())
                    .unwrap_or(self.core.settings.server.base_url.as_str());

                let page: Element<'_, Message> = if self.ui.screen == Screen::Editor {
                    pages::editor::view(&self.ui.editor)
                } else {
                    responsive(move |size| {
                        pages::dashboard::view(&self.library, size.width - PAGE_PADDING)
                    })
                    .into()
                };

                column![
                    container(components::header::view(
                        server,
                        self.core.settings.display.dark_mode
                    ))
                    .height(HEADER_HEIGHT),
                    page,
                ]
                .into()
            }
        };

        stack![main, self.view_toast(), self.view_delete_dialog()]
            .width(Fill)
            .height(Fill)
            .into()
    }

    fn view_toast(&self) -> Element<'_, Message> {
        let Some(notification) = self.core.notifier.current() else {
            return Space::new().width(0).height(0).into();
        };

        // Fades take as long as the exit phase
        let transition = self.core.notifier.timings().exit;
        let opacity = notification.opacity(Instant::now(), transition);
        container(widgets::view_toast(
            &notification,
            opacity,
            Message::DismissNotification,
        ))
        .width(Fill)
        .padding(20)
        .center_x(Fill)
        .into()
    }

    fn view_delete_dialog(&self) -> Element<'_, Message> {
        let dialogs = &self.ui.dialogs;
        if dialogs.delete_pending.is_none() && !dialogs.delete_animation.is_visible() {
            return Space::new().width(0).height(0).into();
        }

        components::delete_image_dialog::view(
            &dialogs.delete_label,
            dialogs.delete_animation.progress(),
        )
    }
}
