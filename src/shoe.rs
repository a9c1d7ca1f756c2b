//! Deck and shoe management with penetration-based reshuffling.

use alloc::vec::Vec;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::ShoeError;

/// The canonical cards of one or more 52-card packs.
///
/// The top of the deck is the end of the underlying vector.
#[derive(Debug, Clone)]
pub struct Deck {
    packs: u8,
    cards: Vec<Card>,
}

impl Deck {
    /// Creates a full, unshuffled deck made of `packs` 52-card packs.
    #[must_use]
    pub fn new(packs: u8) -> Self {
        let mut deck = Self {
            packs: packs.max(1),
            cards: Vec::new(),
        };
        deck.reset();
        deck
    }

    /// Restores every card of every pack, in canonical order.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.cards.reserve(self.capacity());
        for _ in 0..self.packs {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    self.cards.push(Card::new(rank, suit));
                }
            }
        }
    }

    /// Permutes the remaining cards uniformly at random.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Number of packs in the deck.
    #[must_use]
    pub const fn packs(&self) -> u8 {
        self.packs
    }

    /// Number of cards in a full deck.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.packs as usize * DECK_SIZE
    }

    /// Number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is drained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A dealing shoe wrapping one [`Deck`].
///
/// The shoe tracks how many cards were dealt since the last shuffle and
/// reports [`Shoe::needs_shuffle`] once the configured penetration is
/// reached. It does not own the running count: whoever calls
/// [`Shoe::shuffle`] must reset its counter too.
#[derive(Debug, Clone)]
pub struct Shoe {
    deck: Deck,
    penetration: f64,
    dealt: usize,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates a shuffled shoe.
    ///
    /// A `penetration` of 0 disables reshuffle detection.
    #[must_use]
    pub fn new(packs: u8, penetration: f64, seed: u64) -> Self {
        let mut shoe = Self {
            deck: Deck::new(packs),
            penetration,
            dealt: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        shoe.shuffle();
        shoe
    }

    /// Creates a single-pack shoe that deals `draws` in order.
    ///
    /// Useful for replaying a known sequence; once drained or reshuffled it
    /// behaves like a normal single-deck shoe.
    #[must_use]
    pub fn stacked(draws: &[Card], penetration: f64) -> Self {
        let mut cards = draws.to_vec();
        cards.reverse();
        Self {
            deck: Deck { packs: 1, cards },
            penetration,
            dealt: 0,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    /// Refills the deck and shuffles it, resetting the dealt count.
    pub fn shuffle(&mut self) {
        self.deck.reset();
        self.deck.shuffle(&mut self.rng);
        self.dealt = 0;
        log::info!("shoe shuffled ({} cards)", self.deck.len());
    }

    /// Deals the top card.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] when no cards are left.
    pub fn deal(&mut self) -> Result<Card, ShoeError> {
        let card = self.deck.draw().ok_or(ShoeError::Empty)?;
        self.dealt += 1;
        Ok(card)
    }

    /// Deals up to `count` cards face up and returns them.
    pub fn burn(&mut self, count: usize) -> Vec<Card> {
        let mut burned = Vec::with_capacity(count);
        for _ in 0..count {
            match self.deal() {
                Ok(card) => burned.push(card),
                Err(_) => break,
            }
        }
        burned
    }

    /// Returns whether the dealt fraction has reached the penetration.
    ///
    /// Check this between hands or drill rounds, never mid-hand.
    #[must_use]
    pub fn needs_shuffle(&self) -> bool {
        if self.penetration == 0.0 {
            return false;
        }
        self.penetration_reached() >= self.penetration
    }

    /// Fraction of the full deck dealt since the last shuffle.
    #[must_use]
    pub fn penetration_reached(&self) -> f64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let reached = self.dealt as f64 / self.deck.capacity() as f64;
        reached
    }

    /// Configured penetration.
    #[must_use]
    pub const fn penetration(&self) -> f64 {
        self.penetration
    }

    /// Cards dealt since the last shuffle.
    #[must_use]
    pub const fn cards_dealt(&self) -> usize {
        self.dealt
    }

    /// Cards left in the shoe.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }

    /// Decks left, as used by the true count (`remaining / 52`).
    #[must_use]
    pub fn decks_remaining(&self) -> f64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let decks = self.deck.len() as f64 / DECK_SIZE as f64;
        decks
    }

    /// The undealt cards as a stack; the last element is dealt next.
    #[must_use]
    pub fn as_stack(&self) -> &[Card] {
        &self.deck.cards
    }

    /// Consumes the shoe, returning its undealt stack.
    #[must_use]
    pub fn into_stack(self) -> Vec<Card> {
        self.deck.cards
    }
}
