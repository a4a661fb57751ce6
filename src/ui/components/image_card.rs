//! Dashboard card for one image record

use iced::widget::{Space, button, column, container, row, text};
use iced::{Alignment, Element, Fill};

use crate::app::Message;
use crate::features::records::ImageRecord;
use crate::ui::theme;

pub const CARD_WIDTH: f32 = 220.0;

/// Card with the slug's initial, the slug and edit/delete actions
pub fn view(record: &ImageRecord) -> Element<'_, Message> {
    let initial = record
        .slug
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default();

    let picture = container(text(initial).size(40).style(|theme| text::Style {
        color: Some(theme::text_muted(theme)),
    }))
    .width(Fill)
    .height(120)
    .center_x(Fill)
    .center_y(120)
    .style(|theme| container::Style {
        background: Some(iced::Background::Color(theme::placeholder_bg(theme))),
        border: iced::Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    });

    let slug = text(record.slug.as_str()).size(14).style(|theme| text::Style {
        color: Some(theme::text_primary(theme)),
    });

    let edit_btn = button(text("Edit").size(13))
        .padding([6, 16])
        .style(theme::secondary_button)
        .on_press(Message::OpenEdit(record.slug.clone()));

    let delete_btn = button(text("Delete").size(13))
        .padding([6, 16])
        .style(theme::danger_button)
        .on_press(Message::RequestDelete(record.slug.clone()));

    container(
        column![
            picture,
            Space::new().height(10),
            slug,
            Space::new().height(10),
            row![edit_btn, Space::new().width(Fill), delete_btn].align_y(Alignment::Center),
        ]
        .padding(12),
    )
    .width(CARD_WIDTH)
    .style(theme::card)
    .into()
}
