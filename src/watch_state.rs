// SPDX-License-Identifier: MPL-2.0
//! Per-item watch state and its persisted store.
//!
//! Every catalog item has a three-value watch state keyed by its id. The
//! store is the only way to read or mutate that mapping; every mutation
//! writes through to disk synchronously, so a reload immediately after an
//! interaction never loses it.
//!
//! The on-disk format is a JSON object mapping id to a single-character
//! code (`"u"` / `"p"` / `"s"`). Malformed or missing files fall back to an
//! empty mapping (every item reads as `Unseen`) rather than failing load.

use crate::app::paths;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// State file name within the app data directory.
const STATE_FILE: &str = "watch_states.json";

/// Watch state of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchState {
    /// Never played or marked. The implicit state of any id absent from
    /// the store.
    #[default]
    Unseen,
    /// Explicitly marked as partially watched.
    Partial,
    /// Played, or explicitly marked as watched.
    Seen,
}

impl WatchState {
    /// The next state in the explicit three-way rotation:
    /// `Unseen → Partial → Seen → Unseen`.
    #[must_use]
    pub fn cycled(self) -> Self {
        match self {
            WatchState::Unseen => WatchState::Partial,
            WatchState::Partial => WatchState::Seen,
            WatchState::Seen => WatchState::Unseen,
        }
    }

    /// Single-character persistence code.
    fn code(self) -> &'static str {
        match self {
            WatchState::Unseen => "u",
            WatchState::Partial => "p",
            WatchState::Seen => "s",
        }
    }

    /// Parses a persistence code. Unknown codes read as `None` and are
    /// treated as absent entries.
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "u" => Some(WatchState::Unseen),
            "p" => Some(WatchState::Partial),
            "s" => Some(WatchState::Seen),
            _ => None,
        }
    }
}

/// What playback does to an item's watch state.
///
/// The wall historically shipped both behaviors; the policy is a user
/// setting with [`PlayMark::Seen`] as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMark {
    /// Playing ratchets the item straight to `Seen`.
    #[default]
    Seen,
    /// Playing bumps `Unseen` to `Partial` and leaves everything else,
    /// including `Seen`, untouched.
    Partial,
}

/// Persisted mapping from item id to watch state.
///
/// Construction is load-or-default; there is no way to observe or edit the
/// raw mapping from outside, so the ratchet and write-through invariants
/// cannot be bypassed.
#[derive(Debug)]
pub struct WatchStateStore {
    states: HashMap<String, WatchState>,
    /// Backing file. `None` keeps the store purely in memory (tests, or an
    /// unresolvable data directory).
    path: Option<PathBuf>,
}

impl WatchStateStore {
    /// Loads the store from the default data directory.
    pub fn load() -> Self {
        Self::load_from(paths::get_app_data_dir())
    }

    /// Loads the store from a custom base directory, falling back to an
    /// empty mapping when the file is missing or malformed.
    pub fn load_from(base_dir: Option<PathBuf>) -> Self {
        let path = base_dir.map(|dir| dir.join(STATE_FILE));
        let states = path
            .as_deref()
            .and_then(|p| fs::read_to_string(p).ok())
            .map(|body| parse_states(&body))
            .unwrap_or_default();
        Self { states, path }
    }

    /// An unpersisted store. Useful for tests and headless runs.
    pub fn in_memory() -> Self {
        Self {
            states: HashMap::new(),
            path: None,
        }
    }

    /// Returns the watch state for `id`. Absent ids are `Unseen`.
    pub fn get(&self, id: &str) -> WatchState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Rotates the state for `id` one step and persists the result.
    pub fn cycle(&mut self, id: &str) -> WatchState {
        let next = self.get(id).cycled();
        self.states.insert(id.to_string(), next);
        self.persist();
        next
    }

    /// Ratchets `id` to `Seen`. Idempotent: already-`Seen` items are left
    /// alone and no redundant write happens. This never sets a lesser state.
    pub fn mark_seen(&mut self, id: &str) {
        if self.get(id) == WatchState::Seen {
            return;
        }
        self.states.insert(id.to_string(), WatchState::Seen);
        self.persist();
    }

    /// Applies the configured playback marking policy for `id`.
    pub fn mark_played(&mut self, id: &str, policy: PlayMark) {
        match policy {
            PlayMark::Seen => self.mark_seen(id),
            PlayMark::Partial => {
                if self.get(id) == WatchState::Unseen {
                    self.states.insert(id.to_string(), WatchState::Partial);
                    self.persist();
                }
            }
        }
    }

    /// Clears every entry. All items revert to `Unseen` on the next `get`.
    pub fn reset_all(&mut self) {
        self.states.clear();
        self.persist();
    }

    /// Number of ids with an explicit entry.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the store has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Writes the mapping through to disk. Failures are logged and do not
    /// interrupt the interaction that caused the write.
    fn persist(&self) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        let codes: HashMap<&str, &str> = self
            .states
            .iter()
            .map(|(id, state)| (id.as_str(), state.code()))
            .collect();
        let body = match serde_json::to_string(&codes) {
            Ok(body) => body,
            Err(error) => {
                eprintln!("Failed to encode watch states: {}", error);
                return;
            }
        };
        if let Some(parent) = path.parent() {
            if let Err(error) = fs::create_dir_all(parent) {
                eprintln!("Failed to create data directory: {}", error);
                return;
            }
        }
        if let Err(error) = fs::write(path, body) {
            eprintln!("Failed to save watch states: {}", error);
        }
    }
}

/// Parses the persisted JSON mapping, tolerating malformed content.
fn parse_states(body: &str) -> HashMap<String, WatchState> {
    let Ok(raw) = serde_json::from_str::<HashMap<String, String>>(body) else {
        return HashMap::new();
    };
    raw.into_iter()
        .filter_map(|(id, code)| WatchState::from_code(&code).map(|state| (id, state)))
        .collect()
}
