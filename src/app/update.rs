// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Every state mutation happens synchronously inside one message turn.
//! That is what makes the wall-wide exclusivity rule race-free: "stop the
//! other players" and "start this one" can never interleave with anything.
//! The only deferred work is the dwell tick and the async image fetches,
//! both of which re-enter through messages.

use super::{App, CatalogState, Message, TileMessage};
use crate::config::{self, Config};
use crate::thumbs::{self, gallery_thumb_url, tile_thumb_url, ThumbCache};
use crate::ui::lightbox;
use crate::ui::settings;
use crate::ui::state::{
    fit_size, ActiveGallery, PrimaryOutcome, ReleaseOutcome, ViewKind, WallController,
};
use iced::{Point, Size, Task};
use std::time::Instant;

pub(super) fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::CatalogLoaded(Ok(items)) => {
            if items.is_empty() {
                app.catalog = CatalogState::Unavailable;
                return Task::none();
            }
            let urls: Vec<String> = items.iter().map(tile_thumb_url).collect();
            app.catalog = CatalogState::Ready(WallController::new(items));
            fetch_many(&mut app.images, urls)
        }
        Message::CatalogLoaded(Err(error)) => {
            eprintln!("Failed to load catalog: {}", error);
            app.catalog = CatalogState::Unavailable;
            Task::none()
        }
        Message::ImageFetched { url, result } => {
            match result {
                Ok(image) => app.images.insert(url, image),
                Err(error) => {
                    eprintln!("Failed to fetch {}: {}", url, error);
                    app.images.mark_failed(url);
                }
            }
            Task::none()
        }
        Message::Tile { index, event } => handle_tile(app, index, event),
        Message::Tick(now) => {
            if let CatalogState::Ready(wall) = &mut app.catalog {
                for fired in wall.tick(now) {
                    if let Some(item) = wall.item(fired) {
                        let id = item.id().to_string();
                        app.store.cycle(&id);
                    }
                }
            }
            Task::none()
        }
        Message::Back => {
            // The settings panel closes first; only then does Escape pop
            // the view stack. Popping on the bare wall is a no-op.
            if app.settings_open {
                app.settings_open = false;
                return Task::none();
            }
            if app.views.active() == ViewKind::Lightbox {
                app.loupe.reset();
            }
            app.views.pop();
            Task::none()
        }
        Message::OpenLightbox(index) => {
            if app.views.active() != ViewKind::Gallery {
                return Task::none();
            }
            let Some(gallery) = app.gallery.as_mut() else {
                return Task::none();
            };
            gallery.set_index(index);
            app.loupe.reset();
            let url = gallery.current_url().to_string();
            app.views.push(ViewKind::Lightbox);
            fetch_many(&mut app.images, vec![url])
        }
        Message::Navigate(direction) => {
            if app.views.active() != ViewKind::Lightbox {
                return Task::none();
            }
            let Some(gallery) = app.gallery.as_mut() else {
                return Task::none();
            };
            // Zoom never carries from one image to the next.
            app.loupe.reset();
            gallery.navigate(direction);
            let url = gallery.current_url().to_string();
            fetch_many(&mut app.images, vec![url])
        }
        Message::LightboxPressed => {
            let Some((natural, displayed, origin)) = lightbox_geometry(app) else {
                return Task::none();
            };
            let cursor = relative_to(app.cursor, origin);
            if cursor.x < 0.0
                || cursor.y < 0.0
                || cursor.x > displayed.width
                || cursor.y > displayed.height
            {
                // Press landed outside the image; the loupe only engages
                // over it.
                return Task::none();
            }
            if app.loupe.press(natural, displayed, cursor) {
                loupe_scroll_task(app)
            } else {
                Task::none()
            }
        }
        Message::CursorMoved(position) => {
            app.cursor = position;
            if !app.loupe.is_zooming() {
                return Task::none();
            }
            let Some((_, _, origin)) = lightbox_geometry(app) else {
                return Task::none();
            };
            app.loupe.pointer_moved(relative_to(position, origin));
            loupe_scroll_task(app)
        }
        Message::LightboxReleased => {
            app.loupe.release();
            Task::none()
        }
        Message::WindowResized(size) => {
            app.window_size = size;
            Task::none()
        }
        Message::ToggleSettings => {
            app.settings_open = !app.settings_open;
            Task::none()
        }
        Message::Settings(message) => handle_settings(app, message),
    }
}

/// Pointer events on a wall tile: gesture routing composed with the
/// playback controller. The gesture router decides which action class the
/// gesture is; the controllers below decide what the class does.
fn handle_tile(app: &mut App, index: usize, event: TileMessage) -> Task<Message> {
    let policy = app.config.play_mark();
    let CatalogState::Ready(wall) = &mut app.catalog else {
        return Task::none();
    };
    match event {
        TileMessage::PointerDown => {
            wall.pointer_down(index, Instant::now());
            Task::none()
        }
        TileMessage::PointerUp => {
            let mut opened: Option<ActiveGallery> = None;
            if wall.release(index) == ReleaseOutcome::PrimaryClick {
                if let Some(PrimaryOutcome::OpenGallery(item_index)) =
                    wall.primary_action(index, &mut app.store, policy)
                {
                    opened = wall.item(item_index).and_then(ActiveGallery::open);
                }
            }
            if let Some(active) = opened {
                let urls: Vec<String> = active
                    .images()
                    .iter()
                    .map(|url| gallery_thumb_url(url))
                    .collect();
                app.gallery = Some(active);
                app.loupe.reset();
                app.views.push(ViewKind::Gallery);
                return fetch_many(&mut app.images, urls);
            }
            Task::none()
        }
        TileMessage::PointerCancel => {
            wall.cancel(index);
            Task::none()
        }
        TileMessage::ContextMenu => {
            if wall.context_menu(index) {
                if let Some(item) = wall.item(index) {
                    let id = item.id().to_string();
                    app.store.cycle(&id);
                }
            }
            Task::none()
        }
        TileMessage::ClosePlayer => {
            wall.close_player(index);
            Task::none()
        }
    }
}

fn handle_settings(app: &mut App, message: settings::Message) -> Task<Message> {
    match message {
        settings::Message::MinTileChanged(value) => {
            app.config.min_tile_width_px = Some(value);
            persist_config(&app.config)
        }
        settings::Message::BorderChanged(value) => {
            app.config.border_width_px = Some(value);
            persist_config(&app.config)
        }
        settings::Message::MarkSeenOnPlayToggled(mark_seen) => {
            app.config.play_mark = Some(if mark_seen {
                crate::watch_state::PlayMark::Seen
            } else {
                crate::watch_state::PlayMark::Partial
            });
            persist_config(&app.config)
        }
        settings::Message::ResetStates => {
            app.store.reset_all();
            Task::none()
        }
        settings::Message::Close => {
            app.settings_open = false;
            Task::none()
        }
    }
}

/// Persists the current preferences to disk.
///
/// Guarded during tests to keep isolation: unit tests exercise the logic
/// by inspecting `App` state directly rather than the config file.
fn persist_config(config: &Config) -> Task<Message> {
    if cfg!(test) {
        return Task::none();
    }
    if let Err(error) = config::save(config) {
        eprintln!("Failed to save config: {:?}", error);
    }
    Task::none()
}

/// Spawns one fetch task per URL not already cached, pending, or failed.
fn fetch_many(images: &mut ThumbCache, urls: Vec<String>) -> Task<Message> {
    let tasks: Vec<Task<Message>> = urls
        .into_iter()
        .filter_map(|url| {
            if !images.begin_fetch(&url) {
                return None;
            }
            let fetch = thumbs::fetch_image(url.clone());
            Some(Task::perform(fetch, move |result| Message::ImageFetched {
                url: url.clone(),
                result,
            }))
        })
        .collect();
    Task::batch(tasks)
}

/// Geometry of the lightbox image as currently laid out: natural size,
/// fitted display size, and the display's top-left corner in window
/// coordinates. `None` while the image is not yet fetched.
fn lightbox_geometry(app: &App) -> Option<(Size, Size, Point)> {
    let gallery = app.gallery.as_ref()?;
    let fetched = app.images.peek(gallery.current_url())?;
    let natural = Size::new(fetched.width as f32, fetched.height as f32);
    let displayed = fit_size(natural, app.window_size);
    let origin = lightbox::image_origin(displayed, app.window_size);
    Some((natural, displayed, origin))
}

fn relative_to(cursor: Point, origin: Point) -> Point {
    Point::new(cursor.x - origin.x, cursor.y - origin.y)
}

/// Applies the loupe's current offset to the viewport widget.
fn loupe_scroll_task(app: &App) -> Task<Message> {
    match app.loupe.viewport_offset() {
        Some(offset) => {
            iced::widget::operation::scroll_to(lightbox::loupe_viewport_id(), offset)
        }
        None => Task::none(),
    }
}
