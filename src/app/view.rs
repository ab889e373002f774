// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Exactly the top element of the view stack is rendered; everything
//! beneath it stays hidden until the stack pops back down. The settings
//! panel overlays whatever is active.

use super::{App, CatalogState, Message};
use crate::ui::{gallery, lightbox, settings, wall};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, Column, Container, Row, Text};
use iced::{Element, Length};

use crate::ui::state::ViewKind;

/// Static message shown when the catalog failed or produced nothing.
const NO_CONTENT: &str = "Couldn't load the manifest. Nothing to show yet.";

/// Renders the current application view based on the view stack.
pub(super) fn view(app: &App) -> Element<'_, Message> {
    if app.settings_open {
        return settings::view(&app.config).map(Message::Settings);
    }

    match app.views.active() {
        ViewKind::Wall => view_wall(app),
        ViewKind::Gallery => match app.gallery.as_ref() {
            Some(active) => gallery::view(gallery::ViewContext {
                gallery: active,
                images: &app.images,
                window: app.window_size,
            }),
            None => status_message("Nothing is open."),
        },
        ViewKind::Lightbox => match app.gallery.as_ref() {
            Some(active) => lightbox::view(lightbox::ViewContext {
                gallery: active,
                images: &app.images,
                loupe: &app.loupe,
                window: app.window_size,
            }),
            None => status_message("Nothing is open."),
        },
    }
}

fn view_wall(app: &App) -> Element<'_, Message> {
    let content: Element<'_, Message> = match &app.catalog {
        CatalogState::Loading => status_message("Loading the wall…"),
        CatalogState::Unavailable => status_message(NO_CONTENT),
        CatalogState::Ready(wall) => wall::view(wall::ViewContext {
            wall,
            store: &app.store,
            images: &app.images,
            config: &app.config,
            window: app.window_size,
        }),
    };

    let header = Row::new()
        .padding([6, 12])
        .align_y(Vertical::Center)
        .push(Text::new("Iced Wall").size(18))
        .push(iced::widget::Space::new().width(Length::Fill))
        .push(
            button(Text::new("⚙").size(16))
                .style(button::text)
                .on_press(Message::ToggleSettings),
        );

    Column::new()
        .push(header)
        .push(
            Container::new(content)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn status_message(text: &str) -> Element<'_, Message> {
    Container::new(Text::new(text).size(14))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}
