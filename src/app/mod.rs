// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the wall, gallery,
//! lightbox, and settings views.
//!
//! The `App` struct owns the stores and navigators and translates messages
//! into state transitions and side effects (config persistence, image
//! fetches, loupe scroll offsets). Policy decisions like what Escape does,
//! which view is visible, and when the dwell tick runs stay close to this
//! update loop so user-facing behavior is easy to audit.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message, TileMessage};

use crate::catalog::{CatalogSource, MediaItem};
use crate::config::{self, Config};
use crate::thumbs::ThumbCache;
use crate::ui::state::{ActiveGallery, LoupeZoom, ViewStack, WallController};
use crate::watch_state::WatchStateStore;
use iced::{window, Element, Point, Size, Subscription, Task, Theme};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 360;

/// Manifest file tried when no location is given on the command line.
const DEFAULT_MANIFEST: &str = "videos.json";

/// Lifecycle of the one-shot catalog load.
enum CatalogState {
    /// The fetch has not settled yet; rendering is suspended.
    Loading,
    /// The wall is built. Non-empty by construction: an empty catalog
    /// settles as `Unavailable`.
    Ready(WallController),
    /// The fetch failed or produced nothing; the wall shows its static
    /// "no content" message. Terminal; there is no retry.
    Unavailable,
}

/// Root Iced application state bridging the stores, the view stack, and
/// the per-view components.
pub struct App {
    catalog: CatalogState,
    store: WatchStateStore,
    config: Config,
    views: ViewStack,
    /// The most recently opened gallery. May be stale once the stack is
    /// back on the wall; the next open overwrites it.
    gallery: Option<ActiveGallery>,
    loupe: LoupeZoom,
    images: ThumbCache,
    settings_open: bool,
    window_size: Size,
    /// Last known cursor position in window coordinates, tracked while
    /// the lightbox is active.
    cursor: Point,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("active_view", &self.views.active())
            .field("settings_open", &self.settings_open)
            .finish()
    }
}

impl App {
    /// Builds the initial state and kicks off the single catalog fetch.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_default();
        let store = WatchStateStore::load();
        let source = flags
            .manifest
            .as_deref()
            .map(CatalogSource::from_arg)
            .unwrap_or_else(|| CatalogSource::from_arg(DEFAULT_MANIFEST));

        let app = Self {
            catalog: CatalogState::Loading,
            store,
            config,
            views: ViewStack::new(),
            gallery: None,
            loupe: LoupeZoom::new(),
            images: ThumbCache::default(),
            settings_open: false,
            window_size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
            cursor: Point::ORIGIN,
        };
        let load = Task::perform(crate::catalog::load(source), Message::CatalogLoaded);
        (app, load)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(self.views.active()),
            subscription::create_tick_subscription(self.any_pressing()),
        ])
    }

    pub fn title(&self) -> String {
        match &self.catalog {
            CatalogState::Ready(wall) => format!("Iced Wall ({} items)", wall.len()),
            _ => "Iced Wall".to_string(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Items of the loaded catalog, if any. Read-only view for tests and
    /// diagnostics.
    pub fn catalog_items(&self) -> Option<&[MediaItem]> {
        match &self.catalog {
            CatalogState::Ready(wall) => Some(wall.items()),
            _ => None,
        }
    }

    /// Whether any tile has an armed dwell deadline (gates the tick).
    fn any_pressing(&self) -> bool {
        match &self.catalog {
            CatalogState::Ready(wall) => wall.any_pressing(),
            _ => false,
        }
    }
}

/// Builds the window settings.
fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced requires Fn, not FnOnce).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}
