// src/app/update/auth.rs
//! Login and logout message handlers

use iced::Task;

use crate::api::AdminClient;
use crate::app::message::Message;
use crate::app::state::{App, EditorState, Screen};
use crate::features::records;
use crate::features::submission::BusyGuard;

impl App {
    /// Handle session-related messages
    pub fn handle_auth(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::LoginServerChanged(url) => {
                self.ui.login.server_url = url.clone();
                Some(Task::none())
            }

            Message::LoginEmailChanged(email) => {
                self.ui.login.email = email.clone();
                Some(Task::none())
            }

            Message::LoginPasswordChanged(password) => {
                self.ui.login.password = password.clone();
                Some(Task::none())
            }

            Message::LoginSubmit => {
                let login = &self.ui.login;
                if !login.control.is_enabled() {
                    return Some(Task::none());
                }

                // Remember where and as whom we log in
                self.core.settings.server.base_url = login.server_url.trim().to_string();
                self.core.settings.account.email = Some(login.email.trim().to_string())
                    .filter(|email| !email.is_empty());
                if let Err(e) = self.core.settings.save() {
                    tracing::warn!("Failed to save settings: {}", e);
                }

                let server = &self.core.settings.server;
                let client =
                    match AdminClient::new(&server.normalized_base_url(), server.timeout()) {
                        Ok(client) => client,
                        Err(e) => {
                            tracing::error!("Cannot create client: {:#}", e);
                            self.core.notifier.error(format!("{:#}", e));
                            return Some(Task::none());
                        }
                    };

                tracing::info!("Logging in to {}", client.base_url());
                let guard = BusyGuard::acquire(&login.control, &login.busy, "Logging in...");
                let email = login.email.trim().to_string();
                let password = login.password.clone();

                Some(Task::perform(
                    async move {
                        let _guard = guard;
                        client
                            .login(&email, &password)
                            .await
                            .map(|_| client)
                            .map_err(|e| e.to_string())
                    },
                    Message::LoginFinished,
                ))
            }

            Message::LoginFinished(result) => match result {
                Ok(client) => {
                    self.core.begin_session(client.clone());
                    self.ui.login.password.clear();
                    self.ui.screen = Screen::Dashboard;
                    self.core.notifier.success("Login successful");
                    Some(Task::done(Message::RefreshDashboard))
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    self.core.notifier.error(e.clone());
                    Some(Task::none())
                }
            },

            Message::Logout => {
                let Some(client) = self.core.client.clone() else {
                    return Some(Task::none());
                };
                Some(Task::perform(
                    async move { records::logout(&client).await },
                    Message::LogoutFinished,
                ))
            }

            Message::LogoutFinished(result) => {
                match result {
                    Ok(()) => {
                        tracing::info!("Logged out");
                        self.core.end_session();
                        self.core.notifier.dismiss();
                        self.library = Default::default();
                        self.ui.editor = EditorState::create();
                        self.ui.dialogs.delete_pending = None;
                        self.ui.dialogs.delete_animation.hide();
                        self.ui.screen = Screen::Login;
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
