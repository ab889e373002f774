// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard routing lives here, at the subscription layer, so modal keys
//! are seen before any widget can swallow them: Escape always maps to
//! [`Message::Back`], and the arrow keys drive gallery navigation only
//! while the lightbox is the active view. Mouse events are routed globally
//! only for the lightbox, which is what lets a loupe drag keep panning
//! after the pointer leaves the image bounds.

use super::Message;
use crate::ui::state::{Direction, ViewKind};
use iced::{event, keyboard, mouse, time, window, Subscription};
use std::time::Duration;

/// Dwell deadlines are checked on this cadence while a press is in flight.
const DWELL_TICK: Duration = Duration::from_millis(50);

/// Creates the native-event subscription for the current active view.
pub fn create_event_subscription(active: ViewKind) -> Subscription<Message> {
    match active {
        ViewKind::Lightbox => event::listen_with(|event, status, _window| match event {
            event::Event::Window(window::Event::Resized(size)) => {
                Some(Message::WindowResized(size))
            }
            // Modal keys are routed regardless of capture status so no
            // focused widget can swallow them first.
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                ..
            }) => match named {
                keyboard::key::Named::Escape => Some(Message::Back),
                keyboard::key::Named::ArrowLeft => {
                    Some(Message::Navigate(Direction::Previous))
                }
                keyboard::key::Named::ArrowRight => Some(Message::Navigate(Direction::Next)),
                _ => None,
            },
            // Loupe interaction: presses engage only when no overlay
            // captured them; movement and release are tracked globally so
            // a drag that leaves the image keeps panning and always ends.
            event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                match status {
                    event::Status::Ignored => Some(Message::LightboxPressed),
                    event::Status::Captured => None,
                }
            }
            event::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                Some(Message::CursorMoved(position))
            }
            event::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                Some(Message::LightboxReleased)
            }
            _ => None,
        }),
        ViewKind::Wall | ViewKind::Gallery => {
            event::listen_with(|event, _status, _window| match event {
                event::Event::Window(window::Event::Resized(size)) => {
                    Some(Message::WindowResized(size))
                }
                event::Event::Keyboard(keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::Escape),
                    ..
                }) => Some(Message::Back),
                _ => None,
            })
        }
    }
}

/// Creates the periodic tick driving armed dwell deadlines. Runs only
/// while some tile has a press in flight.
pub fn create_tick_subscription(any_pressing: bool) -> Subscription<Message> {
    if any_pressing {
        time::every(DWELL_TICK).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
