//! Labeled form inputs

use iced::widget::{Space, column, text, text_input};
use iced::{Element, Fill};

use crate::ui::theme;

/// Label above a single-line text input
///
/// A busy field is dimmed; it stays editable.
pub fn form_field<'a, Message: Clone + 'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
    secure: bool,
    busy: bool,
) -> Element<'a, Message> {
    let input = text_input(placeholder, value)
        .on_input(on_input)
        .secure(secure)
        .padding([8, 12])
        .width(Fill)
        .style(move |theme, status| theme::input(theme, status, busy));

    column![
        text(label).size(13).style(|theme| text::Style {
            color: Some(theme::text_secondary(theme)),
        }),
        Space::new().height(6),
        input,
    ]
    .into()
}
