// SPDX-License-Identifier: MPL-2.0
//! Pure interaction-state modules shared by the views.
//!
//! Everything in here is renderer-independent: the view layer reads these
//! states and redraws, it never mutates them directly.

pub mod gallery;
pub mod gesture;
pub mod loupe;
pub mod playback;
pub mod view_stack;

pub use gallery::{ActiveGallery, Direction};
pub use gesture::{GestureRouter, ReleaseOutcome, LONG_PRESS_DWELL};
pub use loupe::{fit_size, LoupeZoom};
pub use playback::{PlaybackMode, PrimaryOutcome, TileRuntime, WallController};
pub use view_stack::{ViewKind, ViewStack};
