// src/app/update/editor.rs
//! Create/update form message handlers

use std::future::Future;
use std::time::Duration;

use iced::Task;
use tokio::sync::oneshot;

use crate::app::message::Message;
use crate::app::state::{App, EditorState, Screen};
use crate::features::notifier::Scheduler;
use crate::features::preview::{self, SelectedImage};
use crate::features::records;
use crate::features::submission::{Form, RawResponse, SubmissionCoordinator, Transport};

/// Pause on the "Success!" toast before leaving the editor
const RETURN_DELAY: Duration = Duration::from_millis(1000);

impl App {
    /// Handle editor-related messages
    pub fn handle_editor(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::OpenCreate => {
                self.ui.editor = EditorState::create();
                self.ui.screen = Screen::Editor;
                Some(Task::none())
            }

            Message::OpenEdit(slug) => {
                tracing::info!("Editing image: {}", slug);
                self.ui.editor = EditorState::update(slug);
                self.ui.screen = Screen::Editor;

                let Some(client) = self.core.client.clone() else {
                    return Some(Task::none());
                };
                let editor_id = self.ui.editor.id();
                let slug = slug.clone();
                Some(Task::perform(
                    async move { records::fetch_stored(&client, &slug).await },
                    move |result| Message::StoredImageLoaded(editor_id, result),
                ))
            }

            Message::StoredImageLoaded(editor_id, result) => {
                if self.ui.editor.id() != *editor_id {
                    tracing::debug!("Dropping stored values for a closed editor");
                    return Some(Task::none());
                }
                match result {
                    Ok(stored) => self.ui.editor.apply_stored(stored.clone()),
                    Err(e) => {
                        tracing::warn!("Failed to load stored image: {}", e);
                        self.core.notifier.error(e.clone());
                        self.ui.editor = EditorState::create();
                        self.ui.screen = Screen::Dashboard;
                    }
                }
                Some(Task::none())
            }

            Message::CloseEditor => {
                self.ui.screen = Screen::Dashboard;
                Some(Task::none())
            }

            Message::AltChanged(alt) => {
                self.ui.editor.set_alt(alt.clone());
                Some(Task::none())
            }

            Message::DescriptionChanged(description) => {
                self.ui.editor.description = description.clone();
                Some(Task::none())
            }

            Message::SlugChanged(slug) => {
                self.ui.editor.slug.edited(slug.clone());
                Some(Task::none())
            }

            Message::KeywordsChanged(keywords) => {
                self.ui.editor.keywords = keywords.clone();
                Some(Task::none())
            }

            Message::PickImage => Some(Task::perform(
                preview::pick_image_file(),
                Message::ImagePicked,
            )),

            Message::ImagePicked(path) => {
                let Some(path) = path.clone() else {
                    return Some(Task::none());
                };
                self.ui.editor.loading_image = true;
                Some(Task::perform(
                    async move {
                        SelectedImage::load(path)
                            .await
                            .map_err(|e| format!("{:#}", e))
                    },
                    Message::ImageLoaded,
                ))
            }

            Message::ImageLoaded(result) => {
                match result {
                    Ok(image) => {
                        tracing::info!(
                            "Selected {} ({})",
                            image.file_name,
                            preview::format_size(image.size_bytes())
                        );
                        self.ui.editor.set_image(image.clone());
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read image: {}", e);
                        self.ui.editor.loading_image = false;
                        self.core.notifier.error(e.clone());
                    }
                }
                Some(Task::none())
            }

            Message::ClearImage => {
                self.ui.editor.clear_image();
                Some(Task::none())
            }

            Message::SubmitEditor => {
                let Some(coordinator) = &self.core.coordinator else {
                    return Some(Task::none());
                };
                let Some(submission) = submit_editor(coordinator, &self.ui.editor) else {
                    return Some(Task::none());
                };
                Some(Task::perform(submission, std::convert::identity))
            }

            Message::SubmissionSettled => Some(Task::none()),

            Message::SubmissionSucceeded(editor_id) => {
                let editor_id = *editor_id;
                Some(Task::perform(
                    async {
                        tokio::time::sleep(RETURN_DELAY).await;
                    },
                    move |_| Message::ReturnFromEditor(editor_id),
                ))
            }

            Message::ReturnFromEditor(editor_id) => {
                if self.ui.is_editing_other_than(*editor_id) {
                    // A different form was opened meanwhile; leave it alone
                    return Some(Task::done(Message::RefreshDashboard));
                }
                Some(Task::done(Message::ReturnToDashboard))
            }

            Message::ReturnToDashboard => {
                self.ui.editor = EditorState::create();
                self.ui.screen = Screen::Dashboard;
                Some(Task::done(Message::RefreshDashboard))
            }

            _ => None,
        }
    }
}

/// Submit `editor`, resolving to the message that reports how it ended
///
/// `None` while the submit control is disabled, e.g. a submission is already
/// in flight or the stored values are still loading.
fn submit_editor<T: Transport, S: Scheduler>(
    coordinator: &SubmissionCoordinator<T, S>,
    editor: &EditorState,
) -> Option<impl Future<Output = Message> + Send + 'static> {
    if !editor.submit_control().is_enabled() {
        return None;
    }

    let editor_id = editor.id();
    let (tx, rx) = oneshot::channel();
    let pending = coordinator.submit(
        editor,
        Some(Box::new(move |response: RawResponse| {
            let _ = tx.send(response);
        })),
    );

    Some(async move {
        pending.await;
        // The sender is dropped unused unless the submission succeeded
        match rx.await {
            Ok(_) => Message::SubmissionSucceeded(editor_id),
            Err(_) => Message::SubmissionSettled,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notifier::{ManualScheduler, Notifier};
    use crate::features::records::StoredImage;
    use crate::features::submission::testing::FakeTransport;

    fn coordinator(
        transport: &FakeTransport,
    ) -> SubmissionCoordinator<FakeTransport, ManualScheduler> {
        SubmissionCoordinator::new(transport.clone(), Notifier::new(ManualScheduler::new()))
    }

    fn filled_create_form() -> EditorState {
        let mut editor = EditorState::create();
        editor.set_alt("Cat".to_string());
        editor
    }

    #[tokio::test]
    async fn test_success_reports_submitting_editor() {
        let transport = FakeTransport::new();
        transport.respond(200, Some("Image created successfully!"));
        let editor = filled_create_form();

        let submission = submit_editor(&coordinator(&transport), &editor).unwrap();
        assert!(!editor.submit_control().is_enabled());

        let message = submission.await;
        assert!(matches!(message, Message::SubmissionSucceeded(id) if id == editor.id()));
        assert!(editor.submit_control().is_enabled());
        assert_eq!(transport.requests()[0].url, "/admin/create");
    }

    #[tokio::test]
    async fn test_failure_settles_without_returning() {
        let transport = FakeTransport::new();
        transport.respond(422, Some("Name required"));
        let coordinator = coordinator(&transport);
        let editor = filled_create_form();

        let message = submit_editor(&coordinator, &editor).unwrap().await;

        assert!(matches!(message, Message::SubmissionSettled));
        assert_eq!(
            coordinator.notifier().current().unwrap().message,
            "Name required"
        );
        assert!(editor.submit_control().is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_control_ignores_submit() {
        let transport = FakeTransport::new();
        transport.respond(200, None).respond(200, None);
        let coordinator = coordinator(&transport);

        // Stored values not loaded yet
        let mut editor = EditorState::update("sunset");
        assert!(submit_editor(&coordinator, &editor).is_none());

        // Second click while the first submission is in flight
        editor.apply_stored(StoredImage::default());
        let first = submit_editor(&coordinator, &editor).unwrap();
        assert!(submit_editor(&coordinator, &editor).is_none());
        first.await;

        assert_eq!(transport.requests().len(), 1);
        assert_eq!(transport.requests()[0].url, "/admin/update/sunset");
    }
}
