//! Toast notification widget
//!
//! Dark surface with a thin accent bar; opacity follows the notification's
//! lifecycle phase.

use iced::mouse::Interaction;
use iced::widget::{Space, container, mouse_area, row, text};
use iced::{Alignment, Color, Element, Padding};

use crate::features::notifier::{Notification, NotificationKind};
use crate::ui::theme;

/// Accent color for a notification kind
pub fn accent_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Success => theme::success(&iced::Theme::Dark),
        NotificationKind::Error => theme::danger(&iced::Theme::Dark),
    }
}

pub fn icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✓",
        NotificationKind::Error => "✗",
    }
}

/// Build a toast for `notification`; clicking it emits `on_dismiss`
pub fn view_toast<'a, Message: Clone + 'a>(
    notification: &Notification,
    opacity: f32,
    on_dismiss: Message,
) -> Element<'a, Message> {
    if opacity < 0.01 {
        return Space::new().width(0).height(0).into();
    }

    let accent = theme::with_alpha(accent_color(notification.kind), opacity);

    let accent_bar = container(Space::new().width(3).height(20)).style(move |_theme| {
        container::Style {
            background: Some(iced::Background::Color(accent)),
            border: iced::Border {
                radius: 2.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    });

    let icon_widget = text(icon(notification.kind)).size(14).color(accent);

    let message_widget = text(notification.message.clone())
        .size(13)
        .style(move |theme| text::Style {
            color: Some(theme::with_alpha(theme::text_primary(theme), opacity)),
        });

    let content = row![
        accent_bar,
        Space::new().width(12),
        icon_widget,
        Space::new().width(10),
        message_widget,
    ]
    .align_y(Alignment::Center)
    .padding(Padding::new(14.0).left(12.0).right(20.0));

    let toast = container(content).style(move |theme| container::Style {
        background: Some(iced::Background::Color(theme::with_alpha(
            theme::surface_elevated(theme),
            opacity,
        ))),
        border: iced::Border {
            radius: 8.0.into(),
            width: 1.0,
            color: theme::with_alpha(theme::border_color(theme), opacity),
        },
        shadow: iced::Shadow {
            color: theme::with_alpha(theme::shadow_color(theme), opacity),
            offset: iced::Vector::new(0.0, 4.0),
            blur_radius: 12.0,
        },
        ..Default::default()
    });

    mouse_area(toast)
        .interaction(Interaction::Pointer)
        .on_press(on_dismiss)
        .into()
}
