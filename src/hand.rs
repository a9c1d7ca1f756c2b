//! Player and dealer hand representations.
//!
//! Every derived property (value, softness, blackjack, bust, eligibility)
//! is recomputed from the card list and flags on each call, so a hand
//! rebuilt from its serialized cards reports the same state as the original.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::result::HandOutcome;

/// Returns `(value, is_soft)` for a set of cards.
///
/// Aces start at 11 and are demoted to 1 one at a time while the total
/// exceeds 21. The hand is soft when at least one ace is still worth 11.
#[must_use]
pub fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        value = value.saturating_add(card.value());
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= 21;
    (value, is_soft)
}

/// Hand status, derived from the cards and the hand's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    /// Hand is active and can take actions.
    Active,
    /// Player has stood.
    Stand,
    /// Hand has busted (over 21).
    Bust,
    /// Hand is a blackjack (natural 21).
    Blackjack,
    /// Player doubled and received the final card.
    Doubled,
    /// Player has surrendered.
    Surrendered,
}

/// A player's hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireHand", from = "WireHand")]
pub struct Hand {
    cards: Vec<Card>,
    bet: usize,
    from_split: bool,
    doubled: bool,
    surrendered: bool,
    stood: bool,
    result: Option<HandOutcome>,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            bet,
            from_split: false,
            doubled: false,
            surrendered: false,
            stood: false,
            result: None,
        }
    }

    /// Creates a new hand from a split with a single inherited card.
    #[must_use]
    pub fn from_split(card: Card, bet: usize) -> Self {
        Self {
            cards: alloc::vec![card],
            from_split: true,
            ..Self::new(bet)
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Returns the settlement outcome, once the round is settled.
    #[must_use]
    pub const fn result(&self) -> Option<HandOutcome> {
        self.result
    }

    /// Records the settlement outcome.
    pub const fn set_result(&mut self, outcome: HandOutcome) {
        self.result = Some(outcome);
    }

    /// Returns whether this hand was produced by a split.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        self.from_split
    }

    /// Returns whether the player doubled on this hand.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Returns whether the player surrendered this hand.
    #[must_use]
    pub const fn is_surrendered(&self) -> bool {
        self.surrendered
    }

    /// Returns whether the player stood on this hand.
    #[must_use]
    pub const fn is_stood(&self) -> bool {
        self.stood
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Two-card 21 that did not come from a split.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21 && !self.from_split
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.value() > 21
    }

    /// Exactly two cards of the same rank.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Current status of the hand.
    #[must_use]
    pub fn status(&self) -> HandStatus {
        if self.surrendered {
            HandStatus::Surrendered
        } else if self.is_busted() {
            HandStatus::Bust
        } else if self.is_blackjack() {
            HandStatus::Blackjack
        } else if self.doubled {
            HandStatus::Doubled
        } else if self.stood {
            HandStatus::Stand
        } else {
            HandStatus::Active
        }
    }

    /// Returns whether the hand can still take actions.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status() == HandStatus::Active
    }

    /// Returns whether the hand may double down.
    ///
    /// Requires exactly two cards on an active, undoubled hand. Hands created
    /// by a split qualify only when `after_split` is allowed.
    #[must_use]
    pub fn can_double(&self, after_split: bool) -> bool {
        self.cards.len() == 2 && self.is_active() && (!self.from_split || after_split)
    }

    /// A pair that has not been split already.
    #[must_use]
    pub fn can_split(&self) -> bool {
        self.is_pair() && !self.from_split && self.is_active()
    }

    /// Two untouched cards that did not come from a split.
    #[must_use]
    pub fn can_surrender(&self) -> bool {
        self.cards.len() == 2 && !self.from_split && self.is_active()
    }

    /// Marks the hand as stood.
    pub const fn stand(&mut self) {
        self.stood = true;
    }

    /// Doubles the bet and adds the single card the double receives.
    pub fn double_down(&mut self, card: Card) {
        self.bet *= 2;
        self.doubled = true;
        self.cards.push(card);
    }

    /// Marks the hand as surrendered.
    pub const fn surrender(&mut self) {
        self.surrendered = true;
    }

    /// Removes the second card of a pair and flags this hand as split.
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() != 2 {
            return None;
        }
        let card = self.cards.pop()?;
        self.from_split = true;
        Some(card)
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Rebuilds a hand from its card list alone.
///
/// Value, softness, bust and blackjack match the original hand, except that
/// a split hand cannot be told apart from a dealt one: a split 21 comes back
/// as a blackjack.
#[must_use]
pub fn recreate_hand(cards: &[Card], bet: usize) -> Hand {
    let mut hand = Hand::new(bet);
    for &card in cards {
        hand.add_card(card);
    }
    hand
}

/// Serialized form of a [`Hand`].
///
/// The derived fields are written for readers that only display state.
/// They are ignored on the way back in and recomputed from `cards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireHand {
    /// Cards in deal order.
    pub cards: Vec<Card>,
    /// Hand value.
    #[serde(default)]
    pub value: u8,
    /// Soft flag.
    #[serde(default)]
    pub is_soft: bool,
    /// Bust flag.
    #[serde(default)]
    pub is_busted: bool,
    /// Blackjack flag.
    #[serde(default)]
    pub is_blackjack: bool,
    /// Wager on this hand.
    #[serde(default)]
    pub bet: usize,
    /// Settlement outcome.
    #[serde(default)]
    pub result: Option<HandOutcome>,
    /// Produced by a split.
    #[serde(default)]
    pub is_split: bool,
    /// Doubled down.
    #[serde(default)]
    pub is_doubled: bool,
    /// Surrendered.
    #[serde(default)]
    pub is_surrendered: bool,
    /// Stood.
    #[serde(default)]
    pub is_stood: bool,
}

impl From<Hand> for WireHand {
    fn from(hand: Hand) -> Self {
        let (value, is_soft) = evaluate_cards(&hand.cards);
        Self {
            value,
            is_soft,
            is_busted: hand.is_busted(),
            is_blackjack: hand.is_blackjack(),
            bet: hand.bet,
            result: hand.result,
            is_split: hand.from_split,
            is_doubled: hand.doubled,
            is_surrendered: hand.surrendered,
            is_stood: hand.stood,
            cards: hand.cards,
        }
    }
}

impl From<WireHand> for Hand {
    fn from(wire: WireHand) -> Self {
        let mut hand = recreate_hand(&wire.cards, wire.bet);
        hand.from_split = wire.is_split;
        hand.doubled = wire.is_doubled;
        hand.surrendered = wire.is_surrendered;
        hand.stood = wire.is_stood;
        hand.result = wire.result;
        hand
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireDealerHand", from = "WireDealerHand")]
pub struct DealerHand {
    cards: Vec<Card>,
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns the face-down second card.
    #[must_use]
    pub fn hole_card(&self) -> Option<&Card> {
        self.cards.get(1)
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card, returning it the first time only.
    pub fn reveal_hole(&mut self) -> Option<Card> {
        if self.hole_revealed {
            return None;
        }
        self.hole_revealed = true;
        self.hole_card().copied()
    }

    /// Calculates the visible value (only up card if hole not revealed).
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        if self.hole_revealed {
            self.value()
        } else {
            self.cards.first().map_or(0, Card::value)
        }
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Whether the dealer must draw another card.
    ///
    /// The dealer hits below 17 and, unless `stand_on_soft_17` is set, on
    /// soft 17. Hard 17, any 18 or more, and busted hands stand.
    #[must_use]
    pub fn should_hit(&self, stand_on_soft_17: bool) -> bool {
        let (value, is_soft) = evaluate_cards(&self.cards);
        value < 17 || (value == 17 && is_soft && !stand_on_soft_17)
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.hole_revealed = false;
    }
}

impl Default for DealerHand {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized form of a [`DealerHand`].
///
/// `value` only covers the up card until the hole card is shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDealerHand {
    /// Cards in deal order, hole card included.
    pub cards: Vec<Card>,
    /// Visible value.
    #[serde(default)]
    pub value: u8,
    /// Whether the hole card is face up.
    #[serde(default)]
    pub show_hole_card: bool,
}

impl From<DealerHand> for WireDealerHand {
    fn from(dealer: DealerHand) -> Self {
        Self {
            value: dealer.visible_value(),
            show_hole_card: dealer.hole_revealed,
            cards: dealer.cards,
        }
    }
}

impl From<WireDealerHand> for DealerHand {
    fn from(wire: WireDealerHand) -> Self {
        Self {
            cards: wire.cards,
            hole_revealed: wire.show_hole_card,
        }
    }
}
