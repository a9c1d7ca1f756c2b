use alloc::vec::Vec;
use core::cell::RefCell;

use serde::{Deserialize, Serialize};

use super::{PlayerAction, PlayerId, TableState};

/// A message on the table's broadcast channel.
///
/// Serialized as `{"event": "game_state" | "player_action", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "payload",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum Event {
    /// The host's full table state.
    GameState(TableState),
    /// An action proposed by a participant.
    PlayerAction {
        /// Who proposes the action.
        player_id: PlayerId,
        /// The proposed action.
        #[serde(flatten)]
        action: PlayerAction,
    },
}

/// Outbound side of the realtime channel.
///
/// Delivery is best effort; a follower that misses a snapshot catches up
/// from the next one.
pub trait Transport {
    /// Broadcasts `event` to every participant.
    fn publish(&self, event: &Event);
}

impl<T: Transport + ?Sized> Transport for &T {
    fn publish(&self, event: &Event) {
        (**self).publish(event);
    }
}

/// A transport that keeps published events in memory.
///
/// Useful for tests and for relaying events through a channel the caller
/// owns.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: RefCell<Vec<Event>>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    /// Takes every queued event, oldest first.
    pub fn drain(&self) -> Vec<Event> {
        self.events.take()
    }

    /// The most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<Event> {
        self.events.borrow().last().cloned()
    }

    /// Number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl Transport for EventQueue {
    fn publish(&self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }
}
