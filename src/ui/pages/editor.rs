//! Create/update image page

use iced::widget::{Space, button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Fill};

use crate::app::{EditorMode, EditorState, Message};
use crate::features::preview::format_size;
use crate::features::submission::Form;
use crate::ui::{theme, widgets};

pub fn view(editor: &EditorState) -> Element<'_, Message> {
    let busy = editor.busy_hook().is_busy();
    let control = editor.submit_control();

    let heading = text(editor.title()).size(24).style(|theme| text::Style {
        color: Some(theme::text_primary(theme)),
    });

    let back_btn = button(text("← Back").size(13))
        .padding([6, 12])
        .style(theme::text_button)
        .on_press(Message::CloseEditor);

    let fields = column![
        widgets::form_field(
            "Alt text",
            "Describe the image",
            &editor.alt,
            Message::AltChanged,
            false,
            busy,
        ),
        Space::new().height(14),
        widgets::form_field(
            "Description",
            "Optional description",
            &editor.description,
            Message::DescriptionChanged,
            false,
            busy,
        ),
        Space::new().height(14),
        widgets::form_field(
            "Slug",
            "derived-from-alt-text",
            editor.slug.value(),
            Message::SlugChanged,
            false,
            busy,
        ),
        Space::new().height(14),
        widgets::form_field(
            "Keywords",
            "comma, separated, keywords",
            &editor.keywords,
            Message::KeywordsChanged,
            false,
            busy,
        ),
    ]
    .width(Fill);

    let image_panel = image_panel(editor);

    // No on_press while a submission is in flight
    let mut submit_btn = button(text(control.label()).size(14))
        .padding([10, 28])
        .style(theme::primary_button);
    if control.is_enabled() {
        submit_btn = submit_btn.on_press(Message::SubmitEditor);
    }

    let cancel_btn = button(text("Cancel").size(14))
        .padding([10, 24])
        .style(theme::secondary_button)
        .on_press(Message::CloseEditor);

    let mut actions = row![].align_y(Alignment::Center);
    if let EditorMode::Update { original_slug } = &editor.mode {
        actions = actions.push(
            button(text("Delete").size(14))
                .padding([10, 24])
                .style(theme::danger_button)
                .on_press(Message::RequestDelete(original_slug.clone())),
        );
    }
    let actions = actions
        .push(Space::new().width(Fill))
        .push(cancel_btn)
        .push(Space::new().width(12))
        .push(submit_btn);

    let form = column![
        row![fields, Space::new().width(24), image_panel].align_y(Alignment::Start),
        Space::new().height(28),
        actions,
    ]
    .padding(24);

    let mut title_row = row![back_btn, Space::new().width(8), heading].align_y(Alignment::Center);
    if editor.is_loading_stored() {
        title_row = title_row.push(Space::new().width(12)).push(
            text("Loading stored values...")
                .size(13)
                .style(|theme| text::Style {
                    color: Some(theme::text_muted(theme)),
                }),
        );
    }

    let content = column![
        title_row,
        Space::new().height(20),
        container(form).style(theme::card),
    ]
    .max_width(960);

    container(scrollable(content).style(theme::scrollable_style))
        .width(Fill)
        .height(Fill)
        .padding(24)
        .center_x(Fill)
        .style(theme::main_content)
        .into()
}

fn image_panel(editor: &EditorState) -> Element<'_, Message> {
    let caption = match (&editor.image, editor.loading_image) {
        (_, true) => "Reading file...".to_string(),
        (Some(image), false) => match image.preview {
            Some(info) => format!(
                "{} · {}×{} · {}",
                image.file_name,
                info.width,
                info.height,
                format_size(image.size_bytes())
            ),
            None => format!("{} · {}", image.file_name, format_size(image.size_bytes())),
        },
        (None, false) => match editor.mode {
            EditorMode::Create => "No file chosen".to_string(),
            EditorMode::Update { .. } => "Keeping the current image".to_string(),
        },
    };

    let choose_btn = button(text("Choose Image").size(13))
        .padding([8, 18])
        .style(theme::secondary_button)
        .on_press(Message::PickImage);

    let mut buttons = row![choose_btn].align_y(Alignment::Center);
    if editor.image.is_some() {
        buttons = buttons.push(Space::new().width(8)).push(
            button(text("Remove").size(13))
                .padding([8, 12])
                .style(theme::text_button)
                .on_press(Message::ClearImage),
        );
    }

    column![
        widgets::image_preview(editor.preview.as_ref(), caption),
        Space::new().height(12),
        buttons,
    ]
    .align_x(Alignment::Center)
    .width(300)
    .into()
}
