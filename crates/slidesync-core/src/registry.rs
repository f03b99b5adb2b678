//! Room registry
//!
//! In-memory map from presentation id to room state: the last-known slide
//! position and the ordered list of viewer-mode connections. Pure data and
//! mutation rules — no I/O, no locking. The gateway owns the registry behind
//! a lock and calls in from its event handlers.
//!
//! Lifecycle: a room exists exactly while it has at least one viewer entry.
//! It is created lazily on the first viewer join and deleted when the last
//! entry is removed; no state survives deletion. The slide position is
//! advisory (last `slide-change` wins) and never authoritative over the
//! stored presentation.

use crate::viewer::Viewer;
use std::collections::HashMap;

/// Per-presentation room state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Last slide position broadcast by a presenter; advisory only
    current_slide_index: u32,
    /// Viewer entries in join order, duplicates preserved
    viewers: Vec<Viewer>,
}

impl Room {
    fn new() -> Self {
        Self {
            current_slide_index: 0,
            viewers: Vec::new(),
        }
    }

    /// Current slide position
    #[must_use]
    pub fn current_slide_index(&self) -> u32 {
        self.current_slide_index
    }

    /// Viewer entries in join order
    #[must_use]
    pub fn viewers(&self) -> &[Viewer] {
        &self.viewers
    }
}

/// Registry of all live rooms, keyed by presentation id.
///
/// Every operation is total: acting on an absent room is a no-op, not an
/// error, so disconnect handling stays idempotent.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
}

impl RoomRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    /// Create the room if absent, starting at slide 0 with no viewers.
    /// Idempotent: an existing room is left untouched.
    pub fn ensure_room(&mut self, presentation_id: &str) {
        self.rooms
            .entry(presentation_id.to_string())
            .or_insert_with(Room::new);
    }

    /// Append a viewer entry, creating the room if needed.
    ///
    /// Entries are appended unconditionally — the same user joining twice
    /// without disconnecting yields two entries. Returns a snapshot of the
    /// room's viewer list after the append, for presence broadcast.
    pub fn add_viewer(&mut self, presentation_id: &str, viewer: Viewer) -> Vec<Viewer> {
        let room = self
            .rooms
            .entry(presentation_id.to_string())
            .or_insert_with(Room::new);
        room.viewers.push(viewer);
        room.viewers.clone()
    }

    /// Remove every viewer entry with the given user id, then delete the
    /// room entirely if its viewer list became empty.
    ///
    /// Returns `None` when the room does not exist (already-removed viewers
    /// are a no-op), otherwise a snapshot of the remaining viewer list —
    /// possibly empty, in which case the room is gone from the registry by
    /// the time this returns.
    pub fn remove_viewer(&mut self, presentation_id: &str, user_id: &str) -> Option<Vec<Viewer>> {
        let room = self.rooms.get_mut(presentation_id)?;
        room.viewers.retain(|v| v.user_id != user_id);
        let remaining = room.viewers.clone();
        if remaining.is_empty() {
            self.rooms.remove(presentation_id);
        }
        Some(remaining)
    }

    /// Overwrite the room's slide position. Returns false (and does
    /// nothing) when the room does not exist.
    pub fn set_slide(&mut self, presentation_id: &str, index: u32) -> bool {
        match self.rooms.get_mut(presentation_id) {
            Some(room) => {
                room.current_slide_index = index;
                true
            }
            None => false,
        }
    }

    /// Current slide position of a room
    #[must_use]
    pub fn current_slide(&self, presentation_id: &str) -> Option<u32> {
        self.rooms.get(presentation_id).map(Room::current_slide_index)
    }

    /// Snapshot of a room's viewer list
    #[must_use]
    pub fn viewers(&self, presentation_id: &str) -> Option<Vec<Viewer>> {
        self.rooms.get(presentation_id).map(|r| r.viewers.clone())
    }

    /// Whether a room currently exists
    #[must_use]
    pub fn contains_room(&self, presentation_id: &str) -> bool {
        self.rooms.contains_key(presentation_id)
    }

    /// Number of live rooms
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Total viewer entries across all rooms
    #[must_use]
    pub fn viewer_count(&self) -> usize {
        self.rooms.values().map(|r| r.viewers.len()).sum()
    }
}
