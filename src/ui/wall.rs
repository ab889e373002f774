// SPDX-License-Identifier: MPL-2.0
//! Wall grid view: one tile per catalog item.
//!
//! Tiles are pure projections of their runtime state: thumbnail or player
//! surface, watch-state border, and the pressing mark during a dwell. All
//! pointer handling is forwarded to the update loop; nothing in here
//! mutates state.

use crate::app::{Message, TileMessage};
use crate::catalog::MediaItem;
use crate::config::Config;
use crate::thumbs::{tile_thumb_url, ThumbCache};
use crate::ui::state::{PlaybackMode, TileRuntime, WallController};
use crate::watch_state::{WatchState, WatchStateStore};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, container, mouse_area, Column, Container, Image, Row, Stack, Text};
use iced::{mouse, Background, Border, Color, Element, Length, Size, Theme};

/// Gap between tiles, matching the gap around the grid edge.
const GRID_SPACING: f32 = 8.0;

/// Wall tiles keep the video aspect ratio.
const TILE_ASPECT: f32 = 9.0 / 16.0;

/// Context required to render the wall.
pub struct ViewContext<'a> {
    pub wall: &'a WallController,
    pub store: &'a WatchStateStore,
    pub images: &'a ThumbCache,
    pub config: &'a Config,
    pub window: Size,
}

/// Renders the wall grid for a loaded catalog.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let min_tile = f32::from(ctx.config.min_tile_width());
    let columns = columns_for(ctx.window.width, min_tile);
    let tile_height = min_tile * TILE_ASPECT;
    let border_width = f32::from(ctx.config.border_width());

    let mut grid = Column::new().spacing(GRID_SPACING);
    let mut row = Row::new().spacing(GRID_SPACING);
    let mut in_row = 0usize;

    for (index, item) in ctx.wall.items().iter().enumerate() {
        // One runtime exists per item by construction.
        let Some(runtime) = ctx.wall.tile(index) else {
            continue;
        };
        let state = ctx.store.get(item.id());
        row = row.push(tile(
            index,
            item,
            runtime,
            state,
            ctx.images,
            border_width,
            tile_height,
        ));
        in_row += 1;
        if in_row == columns {
            grid = grid.push(row);
            row = Row::new().spacing(GRID_SPACING);
            in_row = 0;
        }
    }
    if in_row > 0 {
        // Pad the trailing row so its tiles keep the same width.
        for _ in in_row..columns {
            row = row.push(
                Container::new(iced::widget::Space::new())
                    .width(Length::Fill)
                    .height(Length::Fixed(tile_height)),
            );
        }
        grid = grid.push(row);
    }

    iced::widget::scrollable(
        Container::new(grid)
            .padding(GRID_SPACING)
            .width(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

/// How many tiles fit a row at the configured minimum tile width.
fn columns_for(window_width: f32, min_tile: f32) -> usize {
    ((window_width / (min_tile + GRID_SPACING)).floor() as usize).max(1)
}

fn tile<'a>(
    index: usize,
    item: &'a MediaItem,
    runtime: &'a TileRuntime,
    state: WatchState,
    images: &'a ThumbCache,
    border_width: f32,
    tile_height: f32,
) -> Element<'a, Message> {
    let surface: Element<'a, Message> = match runtime.mode() {
        PlaybackMode::Thumb => thumb_surface(item, runtime, images),
        PlaybackMode::Player => player_surface(index, item),
    };

    let framed = Container::new(surface)
        .width(Length::Fill)
        .height(Length::Fixed(tile_height))
        .clip(true)
        .style(move |_theme: &Theme| tile_frame(state, border_width));

    mouse_area(framed)
        .on_press(Message::Tile {
            index,
            event: TileMessage::PointerDown,
        })
        .on_release(Message::Tile {
            index,
            event: TileMessage::PointerUp,
        })
        .on_exit(Message::Tile {
            index,
            event: TileMessage::PointerCancel,
        })
        .on_right_press(Message::Tile {
            index,
            event: TileMessage::ContextMenu,
        })
        .interaction(mouse::Interaction::Pointer)
        .into()
}

fn thumb_surface<'a>(
    item: &'a MediaItem,
    runtime: &'a TileRuntime,
    images: &'a ThumbCache,
) -> Element<'a, Message> {
    let url = tile_thumb_url(item);
    let base: Element<'a, Message> = match images.peek(&url) {
        Some(fetched) => Image::new(fetched.handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(iced::ContentFit::Cover)
            .into(),
        None => Container::new(iced::widget::Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme: &Theme| surface_fill(Color::from_rgb8(0x20, 0x20, 0x24)))
            .into(),
    };

    let mut stack = Stack::new().push(base);

    match item {
        MediaItem::Video { .. } => {
            let glyph = Container::new(Text::new("▶").size(26))
                .padding(10)
                .style(|_theme: &Theme| badge_style());
            stack = stack.push(
                Container::new(glyph)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center),
            );
        }
        MediaItem::Gallery { title, images, .. } => {
            let caption = Text::new(format!("▤ {} ({})", title, images.len())).size(13);
            stack = stack.push(
                Container::new(
                    Container::new(caption)
                        .padding([4, 8])
                        .width(Length::Fill)
                        .style(|_theme: &Theme| caption_style()),
                )
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(Vertical::Bottom),
            );
        }
    }

    if runtime.gesture.is_pressing() {
        stack = stack.push(
            Container::new(iced::widget::Space::new())
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme: &Theme| surface_fill(Color::from_rgba(1.0, 1.0, 1.0, 0.25))),
        );
    }

    stack.width(Length::Fill).height(Length::Fill).into()
}

fn player_surface<'a>(index: usize, item: &'a MediaItem) -> Element<'a, Message> {
    let label = Column::new()
        .spacing(6)
        .align_x(Horizontal::Center)
        .push(Text::new("Playing").size(16))
        .push(Text::new(item.id()).size(12));

    let stop = button(Text::new("✕").size(14))
        .padding([2, 8])
        .style(button::secondary)
        .on_press(Message::Tile {
            index,
            event: TileMessage::ClosePlayer,
        });

    Stack::new()
        .push(
            Container::new(label)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center)
                .style(|_theme: &Theme| surface_fill(Color::from_rgb8(0x10, 0x10, 0x12))),
        )
        .push(
            Container::new(stop)
                .width(Length::Fill)
                .padding(6)
                .align_x(Horizontal::Right),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Watch-state border color: green for unseen, orange for partial, none
/// once seen.
fn state_border_color(state: WatchState) -> Color {
    match state {
        WatchState::Unseen => Color::from_rgb8(0x4c, 0xaf, 0x50),
        WatchState::Partial => Color::from_rgb8(0xff, 0x98, 0x00),
        WatchState::Seen => Color::TRANSPARENT,
    }
}

fn tile_frame(state: WatchState, border_width: f32) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgb8(0x16, 0x16, 0x18))),
        border: Border {
            color: state_border_color(state),
            width: border_width,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

fn surface_fill(color: Color) -> container::Style {
    container::Style {
        background: Some(Background::Color(color)),
        ..Default::default()
    }
}

fn badge_style() -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.55))),
        border: Border {
            radius: 24.0.into(),
            ..Default::default()
        },
        text_color: Some(Color::WHITE),
        ..Default::default()
    }
}

fn caption_style() -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.65))),
        text_color: Some(Color::WHITE),
        ..Default::default()
    }
}
