// src/app/update/images.rs
//! Dashboard listing and delete dialog message handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::{App, EditorMode, Screen};
use crate::features::records;

const DELETE_SUCCEEDED: &str = "Image deleted successfully!";

impl App {
    /// Handle image list messages
    pub fn handle_images(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::RefreshDashboard => {
                let Some(client) = self.core.client.clone() else {
                    return Some(Task::none());
                };
                self.library.loading = true;
                Some(Task::perform(
                    async move {
                        client
                            .fetch_dashboard()
                            .await
                            .map(|html| records::parse_dashboard(&html))
                            .map_err(|e| e.to_string())
                    },
                    Message::DashboardLoaded,
                ))
            }

            Message::DashboardLoaded(result) => {
                self.library.loading = false;
                match result {
                    Ok(images) => {
                        tracing::info!("Dashboard lists {} images", images.len());
                        self.library.images = images.clone();
                        self.library.error = None;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load dashboard: {}", e);
                        self.library.error = Some(e.clone());
                        self.core.notifier.error(e.clone());
                    }
                }
                Some(Task::none())
            }

            Message::RequestDelete(slug) => {
                tracing::info!("Requesting delete for image: {}", slug);
                self.ui.dialogs.delete_pending = Some(slug.clone());
                self.ui.dialogs.delete_label = slug.clone();
                self.ui.dialogs.delete_animation.show();
                Some(Task::none())
            }

            Message::ConfirmDelete => {
                let Some(slug) = self.ui.dialogs.delete_pending.take() else {
                    return Some(Task::none());
                };
                self.ui.dialogs.delete_animation.hide();
                let Some(client) = self.core.client.clone() else {
                    return Some(Task::none());
                };

                tracing::info!("Confirming delete for image: {}", slug);
                Some(Task::perform(
                    async move {
                        let result = records::delete_image(&client, &slug).await;
                        (slug, result)
                    },
                    |(slug, result)| Message::DeleteFinished(slug, result),
                ))
            }

            Message::CancelDelete => {
                tracing::info!("Cancelled image deletion");
                self.ui.dialogs.delete_pending = None;
                self.ui.dialogs.delete_animation.hide();
                Some(Task::none())
            }

            Message::DeleteFinished(slug, result) => {
                match result {
                    Ok(()) => {
                        self.library.images.retain(|image| &image.slug != slug);
                        self.core.notifier.success(DELETE_SUCCEEDED);
                        let editing_deleted = matches!(
                            &self.ui.editor.mode,
                            EditorMode::Update { original_slug } if original_slug == slug
                        );
                        if self.ui.screen == Screen::Editor && editing_deleted {
                            return Some(Task::done(Message::ReturnToDashboard));
                        }
                    }
                    Err(e) => {
                        self.core.notifier.error(e.clone());
                    }
                }
                Some(Task::none())
            }

            _ => None,
        }
    }
}
