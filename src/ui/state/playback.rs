// SPDX-License-Identifier: MPL-2.0
//! Per-tile playback state and the wall-wide exclusivity rule.
//!
//! Each catalog item gets one tile runtime: a gesture router plus a
//! playback mode. The wall controller owns all of them and is the only
//! place playback transitions happen, so "at most one tile plays" holds by
//! construction: stopping the others and starting the new player are one
//! synchronous step.

use crate::catalog::MediaItem;
use crate::ui::state::gesture::{GestureRouter, ReleaseOutcome};
use crate::watch_state::{PlayMark, WatchStateStore};
use std::time::Instant;

/// What a tile currently renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Thumbnail with a play affordance.
    #[default]
    Thumb,
    /// In-place playback surface with a stop control.
    Player,
}

/// Ephemeral per-tile state. Created with the wall, gone when the wall is
/// rebuilt; nothing in here is persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileRuntime {
    pub gesture: GestureRouter,
    mode: PlaybackMode,
}

impl TileRuntime {
    /// Current playback mode. Transitions go through [`WallController`].
    #[must_use]
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.mode == PlaybackMode::Player
    }
}

/// Result of a delivered primary action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryOutcome {
    /// A video tile switched to its player surface.
    Played,
    /// A gallery tile was activated; the caller opens the gallery view
    /// for the item at this index.
    OpenGallery(usize),
}

/// The wall: catalog items plus one tile runtime per item.
#[derive(Debug, Default)]
pub struct WallController {
    items: Vec<MediaItem>,
    tiles: Vec<TileRuntime>,
}

impl WallController {
    /// Builds a wall for a loaded catalog, one tile per item, all thumbs.
    #[must_use]
    pub fn new(items: Vec<MediaItem>) -> Self {
        let tiles = vec![TileRuntime::default(); items.len()];
        Self { items, tiles }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn tile(&self, index: usize) -> Option<&TileRuntime> {
        self.tiles.get(index)
    }

    /// Index of the tile currently in player mode, if any.
    #[must_use]
    pub fn playing(&self) -> Option<usize> {
        self.tiles.iter().position(TileRuntime::is_playing)
    }

    /// Whether any tile has an armed dwell deadline. Gates the tick
    /// subscription so the app only ticks while a press is in flight.
    #[must_use]
    pub fn any_pressing(&self) -> bool {
        self.tiles.iter().any(|tile| tile.gesture.is_armed())
    }

    /// Primary-button press on tile `index`.
    pub fn pointer_down(&mut self, index: usize, now: Instant) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.gesture.press(now);
        }
    }

    /// Pointer released over tile `index`. The caller delivers the primary
    /// action only for [`ReleaseOutcome::PrimaryClick`].
    pub fn release(&mut self, index: usize) -> ReleaseOutcome {
        match self.tiles.get_mut(index) {
            Some(tile) => tile.gesture.release(),
            None => ReleaseOutcome::Swallowed,
        }
    }

    /// Pointer left tile `index` or the press was cancelled.
    pub fn cancel(&mut self, index: usize) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.gesture.cancel();
        }
    }

    /// Right-click on tile `index`. Returns whether the secondary action
    /// should fire: always, for a valid index, independent of any dwell.
    pub fn context_menu(&mut self, index: usize) -> bool {
        match self.tiles.get_mut(index) {
            Some(tile) => tile.gesture.context_menu(),
            None => false,
        }
    }

    /// Advances all armed dwell deadlines; returns the indices whose
    /// long-press fired on this tick, in tile order. The caller cycles the
    /// watch state for each (at most one per press, guaranteed by the
    /// router).
    pub fn tick(&mut self, now: Instant) -> Vec<usize> {
        self.tiles
            .iter_mut()
            .enumerate()
            .filter_map(|(index, tile)| tile.gesture.tick(now).then_some(index))
            .collect()
    }

    /// Delivers the primary action to tile `index`.
    ///
    /// Video tiles in thumb mode: every other playing tile is forced back
    /// to its thumbnail, the item ratchets per the playback policy, and the
    /// tile switches to its player, all in one synchronous turn, so two tiles can
    /// never both end up playing. A raw click on a tile already in player
    /// mode does nothing; only its stop control leaves player mode.
    ///
    /// Gallery tiles: the item ratchets straight to `Seen` (galleries have
    /// no partial-from-playback semantics) and the caller opens the view.
    pub fn primary_action(
        &mut self,
        index: usize,
        store: &mut WatchStateStore,
        policy: PlayMark,
    ) -> Option<PrimaryOutcome> {
        let item = self.items.get(index)?;
        match item {
            MediaItem::Video { id } => {
                if self.tiles[index].is_playing() {
                    return None;
                }
                let id = id.clone();
                self.stop_all();
                store.mark_played(&id, policy);
                self.tiles[index].mode = PlaybackMode::Player;
                Some(PrimaryOutcome::Played)
            }
            MediaItem::Gallery { id, .. } => {
                let id = id.clone();
                store.mark_seen(&id);
                Some(PrimaryOutcome::OpenGallery(index))
            }
        }
    }

    /// Stop control on tile `index`: back to the thumbnail, discarding the
    /// playback surface.
    pub fn close_player(&mut self, index: usize) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.mode = PlaybackMode::Thumb;
        }
    }

    /// Forces every playing tile back to its thumbnail.
    pub fn stop_all(&mut self) {
        for tile in &mut self.tiles {
            tile.mode = PlaybackMode::Thumb;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watch_state::WatchState;
    use std::time::Duration;

    fn video(id: &str) -> MediaItem {
        MediaItem::Video { id: id.to_string() }
    }

    fn gallery(id: &str) -> MediaItem {
        MediaItem::Gallery {
            id: id.to_string(),
            title: id.to_string(),
            images: vec!["a.jpg".to_string()],
        }
    }

    fn wall(items: Vec<MediaItem>) -> (WallController, WatchStateStore) {
        (WallController::new(items), WatchStateStore::in_memory())
    }

    #[test]
    fn tiles_start_as_thumbs() {
        let (wall, _) = wall(vec![video("a123456789"), video("b123456789")]);
        assert_eq!(wall.playing(), None);
        assert_eq!(wall.tile(0).unwrap().mode(), PlaybackMode::Thumb);
    }

    #[test]
    fn primary_action_plays_and_ratchets() {
        let (mut wall, mut store) = wall(vec![video("a123456789")]);

        let outcome = wall.primary_action(0, &mut store, PlayMark::Seen);
        assert_eq!(outcome, Some(PrimaryOutcome::Played));
        assert_eq!(wall.playing(), Some(0));
        assert_eq!(store.get("a123456789"), WatchState::Seen);
    }

    #[test]
    fn at_most_one_tile_plays_at_a_time() {
        let (mut wall, mut store) =
            wall(vec![video("a123456789"), video("b123456789"), video("c123456789")]);

        wall.primary_action(0, &mut store, PlayMark::Seen);
        wall.primary_action(2, &mut store, PlayMark::Seen);

        assert_eq!(wall.tile(0).unwrap().mode(), PlaybackMode::Thumb);
        assert_eq!(wall.tile(2).unwrap().mode(), PlaybackMode::Player);
        assert_eq!(wall.playing(), Some(2));
    }

    #[test]
    fn exclusivity_holds_over_arbitrary_sequences() {
        let (mut wall, mut store) =
            wall(vec![video("a123456789"), video("b123456789"), video("c123456789")]);

        for &index in &[0usize, 1, 2, 1, 0, 2, 2, 0] {
            wall.primary_action(index, &mut store, PlayMark::Seen);
            let playing = (0..wall.len())
                .filter(|&i| wall.tile(i).unwrap().is_playing())
                .count();
            assert!(playing <= 1);
        }
    }

    #[test]
    fn raw_click_on_playing_tile_does_nothing() {
        let (mut wall, mut store) = wall(vec![video("a123456789")]);
        wall.primary_action(0, &mut store, PlayMark::Seen);

        assert_eq!(wall.primary_action(0, &mut store, PlayMark::Seen), None);
        assert_eq!(wall.playing(), Some(0));
    }

    #[test]
    fn close_control_returns_to_thumb_keeping_state() {
        let (mut wall, mut store) = wall(vec![video("a123456789")]);
        wall.primary_action(0, &mut store, PlayMark::Seen);

        wall.close_player(0);
        assert_eq!(wall.tile(0).unwrap().mode(), PlaybackMode::Thumb);
        assert_eq!(store.get("a123456789"), WatchState::Seen);
    }

    #[test]
    fn gallery_primary_action_opens_and_marks_seen() {
        let (mut wall, mut store) = wall(vec![gallery("g1")]);

        let outcome = wall.primary_action(0, &mut store, PlayMark::Partial);
        assert_eq!(outcome, Some(PrimaryOutcome::OpenGallery(0)));
        // Galleries ratchet straight to Seen regardless of the playback
        // policy; only the explicit cycle gesture produces Partial.
        assert_eq!(store.get("g1"), WatchState::Seen);
        assert_eq!(wall.playing(), None);
    }

    #[test]
    fn partial_policy_applies_to_video_playback() {
        let (mut wall, mut store) = wall(vec![video("a123456789")]);
        wall.primary_action(0, &mut store, PlayMark::Partial);
        assert_eq!(store.get("a123456789"), WatchState::Partial);
    }

    #[test]
    fn tick_reports_fired_tiles_for_cycling() {
        let (mut wall, _) = wall(vec![video("a123456789"), video("b123456789")]);
        let t0 = Instant::now();

        wall.pointer_down(1, t0);
        assert!(wall.any_pressing());
        assert!(wall.tick(t0 + Duration::from_millis(100)).is_empty());

        let fired = wall.tick(t0 + Duration::from_millis(500));
        assert_eq!(fired, vec![1]);
        assert!(!wall.any_pressing());
    }

    #[test]
    fn release_composes_with_gesture_router() {
        let (mut wall, mut store) = wall(vec![video("a123456789")]);
        let t0 = Instant::now();

        // Long-press: the release is swallowed, so no play happens.
        wall.pointer_down(0, t0);
        wall.tick(t0 + Duration::from_millis(500));
        assert_eq!(wall.release(0), ReleaseOutcome::Swallowed);
        assert_eq!(wall.playing(), None);

        // Short click: the release is the primary action trigger.
        wall.pointer_down(0, t0);
        assert_eq!(wall.release(0), ReleaseOutcome::PrimaryClick);
        wall.primary_action(0, &mut store, PlayMark::Seen);
        assert_eq!(wall.playing(), Some(0));
    }

    #[test]
    fn context_menu_fires_secondary_even_while_playing() {
        let (mut wall, mut store) = wall(vec![video("a123456789")]);
        wall.primary_action(0, &mut store, PlayMark::Seen);

        assert!(wall.context_menu(0));
        let next = store.cycle("a123456789");
        assert_eq!(next, WatchState::Unseen);
        // Playback mode is untouched by the secondary action.
        assert_eq!(wall.playing(), Some(0));
    }

    #[test]
    fn out_of_bounds_indices_are_ignored() {
        let (mut wall, mut store) = wall(vec![video("a123456789")]);
        wall.pointer_down(9, Instant::now());
        wall.cancel(9);
        assert_eq!(wall.release(9), ReleaseOutcome::Swallowed);
        assert_eq!(wall.primary_action(9, &mut store, PlayMark::Seen), None);
        wall.close_player(9);
    }
}
