//! Delete image confirmation dialog component

use iced::mouse::Interaction;
use iced::widget::{Space, button, column, container, mouse_area, opaque, row, text};
use iced::{Alignment, Color, Element, Fill};

use crate::app::Message;
use crate::ui::theme;

pub const CONFIRM_PROMPT: &str = "Are you sure you want to delete this image?";

/// Build the delete confirmation dialog for `slug`
pub fn view(slug: &str, animation_progress: f32) -> Element<'_, Message> {
    if animation_progress < 0.01 {
        return Space::new().height(0).into();
    }

    let opacity = animation_progress;

    let title = text("Delete Image")
        .size(18)
        .style(move |theme| text::Style {
            color: Some(theme::with_alpha(theme::text_primary(theme), opacity)),
        })
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        });

    let prompt = text(CONFIRM_PROMPT)
        .size(14)
        .style(move |theme| text::Style {
            color: Some(theme::with_alpha(theme::text_secondary(theme), opacity)),
        });

    let slug_label = text(slug).size(13).style(move |theme| text::Style {
        color: Some(theme::with_alpha(theme::text_muted(theme), opacity)),
    });

    let delete_btn = button(text("Delete").size(14).color(Color::WHITE))
        .padding([10, 24])
        .style(theme::danger_button)
        .on_press(Message::ConfirmDelete);

    let cancel_btn = button(text("Cancel").size(14))
        .padding([10, 24])
        .style(theme::secondary_button)
        .on_press(Message::CancelDelete);

    let buttons = row![
        Space::new().width(Fill),
        cancel_btn,
        Space::new().width(12),
        delete_btn,
    ]
    .align_y(Alignment::Center);

    let dialog_content = column![
        title,
        Space::new().height(12),
        prompt,
        Space::new().height(4),
        slug_label,
        Space::new().height(24),
        buttons,
    ]
    .width(400)
    .padding(24);

    let dialog_box = container(dialog_content).style(move |theme| container::Style {
        background: Some(iced::Background::Color(theme::with_alpha(
            theme::surface_elevated(theme),
            opacity,
        ))),
        border: iced::Border {
            radius: 12.0.into(),
            width: 1.0,
            color: theme::with_alpha(theme::divider(theme), opacity),
        },
        ..Default::default()
    });

    let backdrop = container(dialog_box)
        .width(Fill)
        .height(Fill)
        .center_x(Fill)
        .center_y(Fill)
        .style(move |theme| container::Style {
            background: Some(iced::Background::Color(theme::overlay_backdrop(
                theme, opacity,
            ))),
            ..Default::default()
        });

    // Clicking the backdrop cancels
    let event_blocker = mouse_area(backdrop)
        .interaction(Interaction::Idle)
        .on_press(Message::CancelDelete);

    opaque(event_blocker).into()
}
