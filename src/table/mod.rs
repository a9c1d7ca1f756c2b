//! Host-authoritative multiplayer table.
//!
//! [`TableState`] is the complete round state and the wire snapshot: the
//! host mutates it one validated action at a time and broadcasts all of it
//! after every accepted change. Followers never merge; they replace their
//! copy with each snapshot they receive.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::Card;
use crate::error::HostError;
use crate::hand::{DealerHand, Hand};
use crate::options::GameOptions;
use crate::strategy::Action;

mod host;
mod replica;
mod transport;
mod turn;

pub use host::Host;
pub use replica::Replica;
pub use transport::{Event, EventQueue, Transport};

/// Most seats at one table.
pub const MAX_SEATS: usize = 7;

/// A participant's id, as used by the transport's presence records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Creates an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Round phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Seated players place bets.
    Betting,
    /// Players act in seat order.
    Playing,
    /// The dealer draws.
    Dealer,
    /// Hands are settled; the host may start the next round.
    Results,
}

/// An action proposed by a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PlayerAction {
    /// Take another card.
    Hit,
    /// Keep the current total.
    Stand,
    /// Double the wager and take one card.
    Double,
    /// Split a pair.
    Split,
    /// Give up half the wager.
    Surrender,
    /// Place this round's bet.
    Bet {
        /// Chips to wager.
        amount: usize,
    },
}

impl From<Action> for PlayerAction {
    fn from(action: Action) -> Self {
        match action {
            Action::Hit => Self::Hit,
            Action::Stand => Self::Stand,
            Action::Double => Self::Double,
            Action::Split => Self::Split,
            Action::Surrender => Self::Surrender,
        }
    }
}

/// The complete multiplayer round state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    /// Round phase.
    pub phase: Phase,
    /// Seated players in turn order.
    pub seats: Vec<PlayerId>,
    /// Chips each player holds outside the current wager.
    pub bankrolls: HashMap<PlayerId, usize>,
    /// Bet placed this round; 0 until the player bets.
    pub bets: HashMap<PlayerId, usize>,
    /// Each player's hands; index 0 is the dealt hand, later ones come from
    /// splits.
    pub hands: HashMap<PlayerId, Vec<Hand>>,
    /// The dealer's hand.
    pub dealer_hand: DealerHand,
    /// Undealt cards; the last element is dealt next.
    pub shoe: Vec<Card>,
    /// Cards dealt from `shoe` since it was last filled.
    #[serde(default)]
    pub cards_dealt: usize,
    /// The player whose turn it is.
    pub current_player_id: Option<PlayerId>,
    /// The hand each player is on.
    pub current_hand_index: HashMap<PlayerId, usize>,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new()
    }
}

impl TableState {
    /// An empty table in the betting phase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Betting,
            seats: Vec::new(),
            bankrolls: HashMap::new(),
            bets: HashMap::new(),
            hands: HashMap::new(),
            dealer_hand: DealerHand::new(),
            shoe: Vec::new(),
            cards_dealt: 0,
            current_player_id: None,
            current_hand_index: HashMap::new(),
        }
    }

    /// Seats a player with `bankroll` chips.
    ///
    /// A player seated mid-round joins the next deal.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is already seated or the table is full.
    pub fn seat(&mut self, player: PlayerId, bankroll: usize) -> Result<(), HostError> {
        if self.seats.contains(&player) {
            return Err(HostError::AlreadySeated);
        }
        if self.seats.len() >= MAX_SEATS {
            return Err(HostError::TableFull);
        }
        self.bankrolls.insert(player.clone(), bankroll);
        self.bets.insert(player.clone(), 0);
        self.seats.push(player);
        Ok(())
    }

    /// Removes a player, handing the turn on if it was theirs.
    ///
    /// Returns whether the player was seated.
    pub fn leave(&mut self, player: &PlayerId, options: &GameOptions) -> bool {
        let Some(seat) = self.seats.iter().position(|id| id == player) else {
            return false;
        };
        let had_turn = self.current_player_id.as_ref() == Some(player);

        self.seats.remove(seat);
        self.bankrolls.remove(player);
        self.bets.remove(player);
        self.hands.remove(player);
        self.current_hand_index.remove(player);

        if had_turn {
            self.current_player_id = None;
            if let Err(err) = self.pass_turn_from(seat, options) {
                log::debug!("dealer waiting for cards after {player} left: {err}");
            }
        }
        true
    }

    /// Loads a stack to deal from, first card dealt first.
    pub fn load_shoe(&mut self, draws: &[Card]) {
        self.shoe = draws.iter().rev().copied().collect();
        self.cards_dealt = 0;
    }

    /// Whether the next deal needs a fresh shoe.
    ///
    /// Every round is dealt from an untouched stack: true once any card has
    /// been drawn from this one, or when it cannot cover the deal.
    #[must_use]
    pub fn needs_fresh_shoe(&self) -> bool {
        self.cards_dealt > 0 || self.shoe.len() < (self.seats.len() + 1) * 2
    }

    /// Whether every seated player has a positive bet.
    #[must_use]
    pub fn all_bets_in(&self) -> bool {
        !self.seats.is_empty()
            && self
                .seats
                .iter()
                .all(|id| self.bets.get(id).copied().unwrap_or(0) > 0)
    }

    /// A player's bankroll.
    #[must_use]
    pub fn bankroll(&self, player: &PlayerId) -> Option<usize> {
        self.bankrolls.get(player).copied()
    }

    /// A player's bet this round.
    #[must_use]
    pub fn bet(&self, player: &PlayerId) -> Option<usize> {
        self.bets.get(player).copied()
    }

    /// A player's hands this round.
    #[must_use]
    pub fn player_hands(&self, player: &PlayerId) -> Option<&[Hand]> {
        self.hands.get(player).map(Vec::as_slice)
    }

    /// The hand index a player is on.
    #[must_use]
    pub fn hand_index(&self, player: &PlayerId) -> Option<usize> {
        self.current_hand_index.get(player).copied()
    }

    /// The `(player, hand index)` pair that may act now.
    #[must_use]
    pub fn current_turn(&self) -> Option<(&PlayerId, usize)> {
        if self.phase != Phase::Playing {
            return None;
        }
        let player = self.current_player_id.as_ref()?;
        Some((player, self.hand_index(player).unwrap_or(0)))
    }

    /// Whether `player` is seated.
    #[must_use]
    pub fn is_seated(&self, player: &PlayerId) -> bool {
        self.seats.contains(player)
    }
}
