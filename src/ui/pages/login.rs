//! Login page

use iced::widget::{Space, button, column, container, text};
use iced::{Alignment, Element, Fill};

use crate::app::{LoginState, Message};
use crate::ui::{theme, widgets};

pub fn view(login: &LoginState) -> Element<'_, Message> {
    let busy = login.busy.is_busy();

    let title = text("CraftCMS Admin")
        .size(26)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        })
        .style(|theme| text::Style {
            color: Some(theme::text_primary(theme)),
        });

    let subtitle = text("Sign in to manage images")
        .size(14)
        .style(|theme| text::Style {
            color: Some(theme::text_secondary(theme)),
        });

    // Disabled while the login request is in flight
    let mut submit = button(
        container(text(login.control.label()).size(14))
            .width(Fill)
            .center_x(Fill),
    )
    .width(Fill)
    .padding([10, 24])
    .style(theme::primary_button);
    if login.control.is_enabled() {
        submit = submit.on_press(Message::LoginSubmit);
    }

    let form = column![
        title,
        Space::new().height(4),
        subtitle,
        Space::new().height(24),
        widgets::form_field(
            "Server",
            "http://localhost:8080",
            &login.server_url,
            Message::LoginServerChanged,
            false,
            busy,
        ),
        Space::new().height(14),
        widgets::form_field(
            "Email",
            "admin@example.com",
            &login.email,
            Message::LoginEmailChanged,
            false,
            busy,
        ),
        Space::new().height(14),
        widgets::form_field(
            "Password",
            "Password",
            &login.password,
            Message::LoginPasswordChanged,
            true,
            busy,
        ),
        Space::new().height(24),
        submit,
    ]
    .align_x(Alignment::Start)
    .width(360)
    .padding(32);

    container(container(form).style(theme::card))
        .width(Fill)
        .height(Fill)
        .center_x(Fill)
        .center_y(Fill)
        .style(theme::main_content)
        .into()
}
