// SPDX-License-Identifier: MPL-2.0
//! Settings panel: tile sizing, border thickness, playback marking policy,
//! and the reset-all control for watch states.

use crate::config::{
    Config, MAX_BORDER_WIDTH_PX, MAX_TILE_WIDTH_PX, MIN_BORDER_WIDTH_PX, MIN_TILE_WIDTH_PX,
};
use crate::watch_state::PlayMark;
use iced::alignment::Horizontal;
use iced::widget::{button, slider, toggler, Column, Row, Text};
use iced::{Element, Length};

/// Messages for the settings panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// Minimum tile width slider moved.
    MinTileChanged(u16),
    /// Border thickness slider moved.
    BorderChanged(u16),
    /// Playback marking policy toggled: `true` ratchets to seen on play.
    MarkSeenOnPlayToggled(bool),
    /// Reset every persisted watch state back to unseen.
    ResetStates,
    /// Close the panel.
    Close,
}

/// Renders the settings panel for the current configuration.
pub fn view(config: &Config) -> Element<'static, Message> {
    let title = Text::new("Settings").size(30);

    let min_tile_row = labeled_slider(
        "Minimum tile width",
        format!("{}px", config.min_tile_width()),
        slider(
            f32::from(MIN_TILE_WIDTH_PX)..=f32::from(MAX_TILE_WIDTH_PX),
            f32::from(config.min_tile_width()),
            |value| Message::MinTileChanged(value as u16),
        ),
    );

    let border_row = labeled_slider(
        "Watch-state border",
        format!("{}px", config.border_width()),
        slider(
            f32::from(MIN_BORDER_WIDTH_PX)..=f32::from(MAX_BORDER_WIDTH_PX),
            f32::from(config.border_width()),
            |value| Message::BorderChanged(value as u16),
        ),
    );

    let policy_row = Row::new()
        .spacing(10)
        .push(Text::new("Mark seen on play"))
        .push(
            toggler(config.play_mark() == PlayMark::Seen)
                .on_toggle(Message::MarkSeenOnPlayToggled),
        );

    let reset = button(Text::new("Reset watch states"))
        .style(button::danger)
        .on_press(Message::ResetStates);

    let close = button(Text::new("Close"))
        .style(button::secondary)
        .on_press(Message::Close);

    Column::new()
        .push(title)
        .push(min_tile_row)
        .push(border_row)
        .push(policy_row)
        .push(reset)
        .push(close)
        .spacing(20)
        .padding(24)
        .width(Length::Fill)
        .align_x(Horizontal::Center)
        .into()
}

fn labeled_slider(
    label: &'static str,
    value_text: String,
    control: slider::Slider<'static, f32, Message>,
) -> Column<'static, Message> {
    Column::new()
        .spacing(6)
        .push(
            Row::new()
                .spacing(10)
                .push(Text::new(label))
                .push(Text::new(value_text)),
        )
        .push(control.width(Length::Fixed(280.0)))
}
