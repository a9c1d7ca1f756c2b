//! Hi-Lo running count and true count.

use crate::card::Card;

/// Hi-Lo counter.
///
/// Feed every card as it becomes visible. A dealer hole card is counted
/// when it is turned over, not when it is dealt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    running_count: i32,
    cards_seen: usize,
}

impl Counter {
    /// Creates a counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            running_count: 0,
            cards_seen: 0,
        }
    }

    /// Adds a card's tag to the running count and returns the new count.
    pub const fn count_card(&mut self, card: &Card) -> i32 {
        self.running_count += card.hilo();
        self.cards_seen += 1;
        self.running_count
    }

    /// Counts a batch of cards.
    pub fn count_cards<'a>(&mut self, cards: impl IntoIterator<Item = &'a Card>) -> i32 {
        for card in cards {
            self.count_card(card);
        }
        self.running_count
    }

    /// Current running count.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Cards counted since the last reset.
    #[must_use]
    pub const fn cards_seen(&self) -> usize {
        self.cards_seen
    }

    /// Running count divided by decks remaining.
    ///
    /// Returns 0 when no decks remain.
    #[must_use]
    pub fn true_count(&self, decks_remaining: f64) -> f64 {
        if decks_remaining <= 0.0 {
            return 0.0;
        }
        f64::from(self.running_count) / decks_remaining
    }

    /// True count truncated toward zero (+2.7 becomes 2, -2.7 becomes -2).
    #[must_use]
    pub fn true_count_int(&self, decks_remaining: f64) -> i32 {
        self.true_count(decks_remaining) as i32
    }

    /// Resets the count; call after every shuffle.
    pub const fn reset(&mut self) {
        self.running_count = 0;
        self.cards_seen = 0;
    }
}
