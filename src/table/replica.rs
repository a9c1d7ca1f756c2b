use crate::hand::Hand;

use super::{Event, Phase, PlayerAction, PlayerId, TableState};

/// A follower's read-only view of the table.
///
/// Every received snapshot replaces the view wholesale; nothing is merged.
/// Actions are only proposed here and take effect when the host accepts
/// them and broadcasts the next snapshot.
#[derive(Debug, Clone)]
pub struct Replica {
    id: PlayerId,
    state: Option<TableState>,
}

impl Replica {
    /// Creates a view that has not seen a snapshot yet.
    #[must_use]
    pub const fn new(id: PlayerId) -> Self {
        Self { id, state: None }
    }

    /// This participant's id.
    #[must_use]
    pub const fn id(&self) -> &PlayerId {
        &self.id
    }

    /// The latest snapshot.
    #[must_use]
    pub const fn state(&self) -> Option<&TableState> {
        self.state.as_ref()
    }

    /// Applies a channel event, returning whether the view changed.
    ///
    /// Action broadcasts are for the host and leave the view untouched.
    pub fn receive(&mut self, event: &Event) -> bool {
        match event {
            Event::GameState(state) => {
                self.state = Some(state.clone());
                true
            }
            Event::PlayerAction { .. } => false,
        }
    }

    /// Builds the event that proposes `action` to the host.
    #[must_use]
    pub fn propose(&self, action: PlayerAction) -> Event {
        Event::PlayerAction {
            player_id: self.id.clone(),
            action,
        }
    }

    /// Whether the latest snapshot gives this participant the turn.
    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.state.as_ref().is_some_and(|state| {
            state.phase == Phase::Playing && state.current_player_id.as_ref() == Some(&self.id)
        })
    }

    /// This participant's hands in the latest snapshot.
    #[must_use]
    pub fn my_hands(&self) -> &[Hand] {
        self.state
            .as_ref()
            .and_then(|state| state.player_hands(&self.id))
            .unwrap_or_default()
    }

    /// This participant's bankroll in the latest snapshot.
    #[must_use]
    pub fn bankroll(&self) -> Option<usize> {
        self.state.as_ref()?.bankroll(&self.id)
    }

    /// Whether this participant still has to bet this round.
    #[must_use]
    pub fn needs_bet(&self) -> bool {
        self.state.as_ref().is_some_and(|state| {
            state.phase == Phase::Betting && state.bet(&self.id) == Some(0)
        })
    }
}
