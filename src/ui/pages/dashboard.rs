//! Dashboard page: image grid with create and refresh actions

use iced::widget::{Space, button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Fill};

use crate::app::{LibraryState, Message};
use crate::ui::components::image_card::{self, CARD_WIDTH};
use crate::ui::theme;

const GRID_SPACING: f32 = 16.0;

/// `available_width` decides how many cards fit per row
pub fn view(library: &LibraryState, available_width: f32) -> Element<'_, Message> {
    let heading = text("Images").size(24).style(|theme| text::Style {
        color: Some(theme::text_primary(theme)),
    });

    let count = text(format!("{} total", library.images.len()))
        .size(13)
        .style(|theme| text::Style {
            color: Some(theme::text_muted(theme)),
        });

    let refresh_label = if library.loading {
        "Loading..."
    } else {
        "Refresh"
    };
    let mut refresh_btn = button(text(refresh_label).size(13))
        .padding([8, 18])
        .style(theme::secondary_button);
    if !library.loading {
        refresh_btn = refresh_btn.on_press(Message::RefreshDashboard);
    }

    let create_btn = button(text("New Image").size(13))
        .padding([8, 18])
        .style(theme::primary_button)
        .on_press(Message::OpenCreate);

    let toolbar = row![
        heading,
        Space::new().width(12),
        count,
        Space::new().width(Fill),
        refresh_btn,
        Space::new().width(8),
        create_btn,
    ]
    .align_y(Alignment::Center);

    let body: Element<'_, Message> = if library.images.is_empty() {
        let message = match (&library.error, library.loading) {
            (Some(error), _) => error.clone(),
            (None, true) => "Loading images...".to_string(),
            (None, false) => "No images yet. Create one to get started.".to_string(),
        };
        container(text(message).size(14).style(|theme| text::Style {
            color: Some(theme::text_secondary(theme)),
        }))
        .width(Fill)
        .height(Fill)
        .center_x(Fill)
        .center_y(Fill)
        .into()
    } else {
        let per_row = columns_for_width(available_width);
        let mut grid = column![].spacing(GRID_SPACING);
        for chunk in library.images.chunks(per_row) {
            let mut line = row![].spacing(GRID_SPACING);
            for record in chunk {
                line = line.push(image_card::view(record));
            }
            grid = grid.push(line);
        }
        scrollable(grid)
            .height(Fill)
            .style(theme::scrollable_style)
            .into()
    };

    container(column![toolbar, Space::new().height(20), body])
        .width(Fill)
        .height(Fill)
        .padding(24)
        .style(theme::main_content)
        .into()
}

/// Cards per grid row, at least one
pub fn columns_for_width(width: f32) -> usize {
    (((width + GRID_SPACING) / (CARD_WIDTH + GRID_SPACING)).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_for_width() {
        assert_eq!(columns_for_width(0.0), 1);
        assert_eq!(columns_for_width(CARD_WIDTH), 1);
        assert_eq!(columns_for_width(CARD_WIDTH * 2.0 + GRID_SPACING), 2);
        assert_eq!(columns_for_width(1052.0), 4);
    }
}
