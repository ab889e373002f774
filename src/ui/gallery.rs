// SPDX-License-Identifier: MPL-2.0
//! Gallery view: one sub-tile per image of the open gallery.
//!
//! Sub-tiles render the derived thumbs URL; clicking one opens the lightbox
//! at that image's index. The original URLs are only ever loaded by the
//! lightbox itself.

use crate::app::Message;
use crate::thumbs::{gallery_thumb_url, ThumbCache};
use crate::ui::state::ActiveGallery;
use iced::alignment::Vertical;
use iced::widget::{mouse_area, Column, Container, Image, Row, Text};
use iced::{mouse, Background, Border, Color, Element, Length, Size, Theme};

const GRID_SPACING: f32 = 8.0;

/// Sub-tiles are square-ish; galleries are mostly photos.
const SUB_TILE_HEIGHT: f32 = 180.0;
const SUB_TILE_MIN_WIDTH: f32 = 180.0;

/// Context required to render the gallery view.
pub struct ViewContext<'a> {
    pub gallery: &'a ActiveGallery,
    pub images: &'a ThumbCache,
    pub window: Size,
}

/// Renders the open gallery as a grid of image sub-tiles.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let header = Row::new()
        .padding([8, 12])
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new(ctx.gallery.title()).size(20))
        .push(Text::new(format!("{} images", ctx.gallery.len())).size(13))
        .push(iced::widget::Space::new().width(Length::Fill))
        .push(Text::new("Esc closes").size(12));

    let columns = ((ctx.window.width / (SUB_TILE_MIN_WIDTH + GRID_SPACING)).floor() as usize).max(1);

    let mut grid = Column::new().spacing(GRID_SPACING);
    let mut row = Row::new().spacing(GRID_SPACING);
    let mut in_row = 0usize;

    for (index, url) in ctx.gallery.images().iter().enumerate() {
        row = row.push(sub_tile(index, url, ctx.images));
        in_row += 1;
        if in_row == columns {
            grid = grid.push(row);
            row = Row::new().spacing(GRID_SPACING);
            in_row = 0;
        }
    }
    if in_row > 0 {
        for _ in in_row..columns {
            row = row.push(
                Container::new(iced::widget::Space::new())
                    .width(Length::Fill)
                    .height(Length::Fixed(SUB_TILE_HEIGHT)),
            );
        }
        grid = grid.push(row);
    }

    Column::new()
        .push(header)
        .push(
            iced::widget::scrollable(
                Container::new(grid)
                    .padding(GRID_SPACING)
                    .width(Length::Fill),
            )
            .width(Length::Fill)
            .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn sub_tile<'a>(index: usize, url: &str, images: &'a ThumbCache) -> Element<'a, Message> {
    let thumb_url = gallery_thumb_url(url);
    let content: Element<'a, Message> = match images.peek(&thumb_url) {
        Some(fetched) => Image::new(fetched.handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(iced::ContentFit::Cover)
            .into(),
        None => Container::new(iced::widget::Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme: &Theme| placeholder_style())
            .into(),
    };

    let framed = Container::new(content)
        .width(Length::Fill)
        .height(Length::Fixed(SUB_TILE_HEIGHT))
        .clip(true)
        .style(|_theme: &Theme| frame_style());

    mouse_area(framed)
        .on_release(Message::OpenLightbox(index))
        .interaction(mouse::Interaction::Pointer)
        .into()
}

fn placeholder_style() -> iced::widget::container::Style {
    iced::widget::container::Style {
        background: Some(Background::Color(Color::from_rgb8(0x20, 0x20, 0x24))),
        ..Default::default()
    }
}

fn frame_style() -> iced::widget::container::Style {
    iced::widget::container::Style {
        background: Some(Background::Color(Color::from_rgb8(0x16, 0x16, 0x18))),
        border: Border {
            radius: 6.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
