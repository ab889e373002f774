// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::catalog::MediaItem;
use crate::error::Error;
use crate::thumbs::FetchedImage;
use crate::ui::settings;
use crate::ui::state::Direction;
use iced::{Point, Size};
use std::time::Instant;

/// Pointer events on a single wall tile, forwarded with the tile index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileMessage {
    /// Primary button went down on the tile surface.
    PointerDown,
    /// Primary button released over the tile.
    PointerUp,
    /// Pointer left the tile or the press was cancelled.
    PointerCancel,
    /// Right-click on the tile (native context menu is suppressed by the
    /// toolkit; there is no menu to show).
    ContextMenu,
    /// The stop control inside the tile's player surface.
    ClosePlayer,
}

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    /// The one-shot catalog load settled.
    CatalogLoaded(Result<Vec<MediaItem>, Error>),
    /// An async image fetch settled.
    ImageFetched {
        url: String,
        result: Result<FetchedImage, Error>,
    },
    /// A pointer event on wall tile `index`.
    Tile { index: usize, event: TileMessage },
    /// Periodic tick driving armed dwell deadlines.
    Tick(Instant),
    /// Escape: close the settings panel if open, otherwise pop the view
    /// stack (no-op on the wall).
    Back,
    /// A gallery sub-tile was clicked; open the lightbox at that index.
    OpenLightbox(usize),
    /// Arrow-key or on-screen-arrow navigation in the lightbox.
    Navigate(Direction),
    /// Primary button pressed over the lightbox image.
    LightboxPressed,
    /// Primary button released anywhere while the loupe is engaged.
    LightboxReleased,
    /// Global cursor movement, routed only while the lightbox is active.
    CursorMoved(Point),
    /// The window was resized; the grid re-wraps on the next view pass.
    WindowResized(Size),
    /// Toggle the settings panel.
    ToggleSettings,
    /// Settings panel interaction.
    Settings(settings::Message),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Manifest location: a file path or an HTTP(S) URL. Defaults to
    /// `videos.json` in the working directory.
    pub manifest: Option<String>,
    /// Optional data directory override (watch-state file).
    /// Takes precedence over `ICED_WALL_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (settings.toml).
    /// Takes precedence over `ICED_WALL_CONFIG_DIR`.
    pub config_dir: Option<String>,
}
