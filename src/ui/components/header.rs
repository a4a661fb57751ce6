//! Top bar shown while logged in

use iced::widget::{Space, button, container, row, text};
use iced::{Alignment, Element, Fill};

use crate::app::Message;
use crate::ui::theme;

pub const HEADER_HEIGHT: f32 = 56.0;

pub fn view<'a>(server: &'a str, dark_mode: bool) -> Element<'a, Message> {
    let title = text("CraftCMS Admin")
        .size(18)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        })
        .style(|theme| text::Style {
            color: Some(theme::text_primary(theme)),
        });

    let server_label = text(server).size(12).style(|theme| text::Style {
        color: Some(theme::text_muted(theme)),
    });

    let theme_btn = button(text(if dark_mode { "Light" } else { "Dark" }).size(13))
        .padding([6, 14])
        .style(theme::text_button)
        .on_press(Message::ToggleTheme);

    let logout_btn = button(text("Log Out").size(13))
        .padding([6, 16])
        .style(theme::secondary_button)
        .on_press(Message::Logout);

    container(
        row![
            title,
            Space::new().width(12),
            server_label,
            Space::new().width(Fill),
            theme_btn,
            Space::new().width(8),
            logout_btn,
        ]
        .align_y(Alignment::Center)
        .padding([0, 20]),
    )
    .width(Fill)
    .height(HEADER_HEIGHT)
    .center_y(HEADER_HEIGHT)
    .style(theme::header_bar)
    .into()
}
