//! Image preview pane

use iced::widget::{Space, column, container, image, text};
use iced::{Alignment, ContentFit, Element, Fill};

use crate::ui::theme;

/// Thumbnail of the selected file with a caption underneath
///
/// Without a handle a placeholder box is drawn instead.
pub fn image_preview<'a, Message: 'a>(
    handle: Option<&image::Handle>,
    caption: String,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone())
            .width(Fill)
            .height(220)
            .content_fit(ContentFit::Contain)
            .into(),
        None => container(text("No preview").size(13).style(|theme| text::Style {
            color: Some(theme::text_muted(theme)),
        }))
        .width(Fill)
        .height(220)
        .center_x(Fill)
        .center_y(220)
        .style(|theme| container::Style {
            background: Some(iced::Background::Color(theme::placeholder_bg(theme))),
            border: iced::Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into(),
    };

    column![
        picture,
        Space::new().height(8),
        text(caption).size(12).style(|theme| text::Style {
            color: Some(theme::text_muted(theme)),
        }),
    ]
    .align_x(Alignment::Center)
    .into()
}
