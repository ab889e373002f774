// SPDX-License-Identifier: MPL-2.0
//! Lightbox view: the active gallery image, full-window, with loupe zoom.
//!
//! Unzoomed, the image letterboxes into the window. While the loupe is
//! engaged the image renders at its natural pixel size inside a
//! hidden-scrollbar viewport; the update loop drives the viewport offset
//! from the loupe's transform origin, which is what pans the magnified
//! view under the pointer.

use crate::app::Message;
use crate::thumbs::ThumbCache;
use crate::ui::state::{fit_size, ActiveGallery, Direction, LoupeZoom};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::scrollable::{Direction as ScrollDirection, Scrollbar};
use iced::widget::{mouse_area, Container, Id, Image, Scrollable, Stack, Text};
use iced::{mouse, Background, Color, Element, Length, Point, Size, Theme};

/// Widget id of the loupe viewport, target of the scroll-offset tasks.
const LOUPE_VIEWPORT: &str = "lightbox-loupe";

/// The loupe viewport's widget id.
#[must_use]
pub fn loupe_viewport_id() -> Id {
    Id::new(LOUPE_VIEWPORT)
}

/// Top-left corner of a `displayed`-sized image centered in `viewport`,
/// in window coordinates. The update loop uses this to translate global
/// cursor positions into image-relative ones.
#[must_use]
pub fn image_origin(displayed: Size, viewport: Size) -> Point {
    Point::new(
        (viewport.width - displayed.width) / 2.0,
        (viewport.height - displayed.height) / 2.0,
    )
}

/// Context required to render the lightbox.
pub struct ViewContext<'a> {
    pub gallery: &'a ActiveGallery,
    pub images: &'a ThumbCache,
    pub loupe: &'a LoupeZoom,
    pub window: Size,
}

/// Renders the lightbox for the gallery's current image.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let url = ctx.gallery.current_url();

    let surface: Element<'_, Message> = match ctx.images.peek(url) {
        Some(fetched) => {
            let natural = Size::new(fetched.width as f32, fetched.height as f32);
            if ctx.loupe.is_zooming() {
                // Natural-size image in a hidden-scrollbar viewport; the
                // offset is applied by the update loop via scroll tasks.
                Scrollable::new(
                    Image::new(fetched.handle.clone())
                        .width(Length::Fixed(natural.width))
                        .height(Length::Fixed(natural.height)),
                )
                .id(loupe_viewport_id())
                .width(Length::Fill)
                .height(Length::Fill)
                .direction(ScrollDirection::Both {
                    vertical: Scrollbar::hidden(),
                    horizontal: Scrollbar::hidden(),
                })
                .into()
            } else {
                let displayed = fit_size(natural, ctx.window);
                Container::new(
                    Image::new(fetched.handle.clone())
                        .width(Length::Fixed(displayed.width))
                        .height(Length::Fixed(displayed.height)),
                )
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center)
                .into()
            }
        }
        None => {
            let status = if ctx.images.is_failed(url) {
                "Couldn't load this image."
            } else {
                "Loading image…"
            };
            Container::new(Text::new(status).size(14))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center)
                .into()
        }
    };

    let backdrop = Container::new(surface)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme: &Theme| backdrop_style());

    let mut stack = Stack::new().push(backdrop);

    // Position indicator, floating top-center.
    stack = stack.push(
        Container::new(
            Container::new(Text::new(ctx.gallery.position_label()).size(13))
                .padding([4, 10])
                .style(|_theme: &Theme| overlay_chip_style()),
        )
        .width(Length::Fill)
        .padding(12)
        .align_x(Horizontal::Center),
    );

    // Navigation arrows, hidden while the loupe has the pointer.
    if !ctx.loupe.is_zooming() && ctx.gallery.len() > 1 {
        stack = stack.push(arrow_zone("◀", Horizontal::Left, Direction::Previous));
        stack = stack.push(arrow_zone("▶", Horizontal::Right, Direction::Next));
    }

    stack.width(Length::Fill).height(Length::Fill).into()
}

fn arrow_zone(
    glyph: &'static str,
    side: Horizontal,
    direction: Direction,
) -> Element<'static, Message> {
    let label = Container::new(Text::new(glyph).size(28))
        .padding([8, 12])
        .style(|_theme: &Theme| overlay_chip_style());

    let zone = Container::new(label)
        .height(Length::Fill)
        .padding(16)
        .align_y(Vertical::Center);

    // The zone captures the release so a click on an arrow never reaches
    // the loupe handling underneath.
    Container::new(
        mouse_area(zone)
            .on_press(Message::Navigate(direction))
            .interaction(mouse::Interaction::Pointer),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(side)
    .into()
}

fn backdrop_style() -> iced::widget::container::Style {
    iced::widget::container::Style {
        background: Some(Background::Color(Color::from_rgb8(0x0a, 0x0a, 0x0c))),
        text_color: Some(Color::WHITE),
        ..Default::default()
    }
}

fn overlay_chip_style() -> iced::widget::container::Style {
    iced::widget::container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.6))),
        text_color: Some(Color::WHITE),
        border: iced::Border {
            radius: 14.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
