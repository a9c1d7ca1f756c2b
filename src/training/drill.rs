use alloc::vec::Vec;

use crate::card::Card;
use crate::counting::Counter;
use crate::error::{ActionError, ShoeError};
use crate::hand::Hand;
use crate::options::{GameOptions, TrainingOptions};
use crate::shoe::Shoe;
use crate::strategy::{Action, Allowed};

use super::{CountCheck, Feedback, SessionStats, grade_decision};

/// Running count practice.
///
/// Each round shows a few cards; the player then answers with the running
/// count since the last shuffle.
#[derive(Debug, Clone)]
pub struct CountingDrill {
    shoe: Shoe,
    counter: Counter,
    cards_per_round: usize,
    stats: SessionStats,
}

impl CountingDrill {
    /// Creates a drill over a freshly shuffled shoe.
    #[must_use]
    pub fn new(options: &GameOptions, training: &TrainingOptions, seed: u64) -> Self {
        Self::with_shoe(
            Shoe::new(options.decks, options.penetration, seed),
            training,
        )
    }

    /// Creates a drill that deals from `shoe`.
    #[must_use]
    pub fn with_shoe(shoe: Shoe, training: &TrainingOptions) -> Self {
        Self {
            shoe,
            counter: Counter::new(),
            cards_per_round: training.cards_per_drill.max(1),
            stats: SessionStats::new(),
        }
    }

    /// Shows the next round of cards.
    ///
    /// The penetration is checked before every card; reaching it reshuffles
    /// the shoe and resets the count.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if a shoe that never reshuffles runs dry.
    pub fn deal_round(&mut self) -> Result<Vec<Card>, ShoeError> {
        let mut cards = Vec::with_capacity(self.cards_per_round);
        for _ in 0..self.cards_per_round {
            if self.shoe.needs_shuffle() {
                self.shoe.shuffle();
                self.counter.reset();
            }
            let card = self.shoe.deal()?;
            self.counter.count_card(&card);
            cards.push(card);
        }
        self.stats.record_cards(cards.len());
        log::debug!(
            "counting drill dealt {} cards, running count {}",
            cards.len(),
            self.counter.running_count()
        );
        Ok(cards)
    }

    /// Grades a running count answer.
    pub fn check(&mut self, answer: i32) -> CountCheck {
        CountCheck::grade(self.counter.running_count(), answer, &mut self.stats)
    }

    /// The actual running count.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.counter.running_count()
    }

    /// True count for the cards left in the shoe.
    #[must_use]
    pub fn true_count(&self) -> f64 {
        self.counter.true_count(self.shoe.decks_remaining())
    }

    /// The shoe being dealt.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Session statistics.
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Reshuffles and clears the count and statistics.
    pub fn reset(&mut self) {
        self.shoe.shuffle();
        self.counter.reset();
        self.stats.reset();
    }
}

/// Basic strategy flash cards: a two-card hand against an upcard.
#[derive(Debug, Clone)]
pub struct StrategyDrill {
    shoe: Shoe,
    options: GameOptions,
    stats: SessionStats,
    current: Option<(Hand, Card)>,
}

impl StrategyDrill {
    /// Creates a drill dealing under `options`.
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        let shoe = Shoe::new(options.decks, options.penetration, seed);
        Self::with_shoe(options, shoe)
    }

    /// Creates a drill that deals from `shoe`.
    #[must_use]
    pub fn with_shoe(options: GameOptions, shoe: Shoe) -> Self {
        Self {
            shoe,
            options,
            stats: SessionStats::new(),
            current: None,
        }
    }

    /// Deals a new hand and upcard.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if a shoe that never reshuffles runs dry.
    pub fn next_hand(&mut self) -> Result<(&Hand, Card), ShoeError> {
        if self.shoe.needs_shuffle() || self.shoe.cards_remaining() < 3 {
            self.shoe.shuffle();
        }
        let mut hand = Hand::new(1);
        hand.add_card(self.shoe.deal()?);
        let upcard = self.shoe.deal()?;
        hand.add_card(self.shoe.deal()?);
        let (hand, upcard) = &*self.current.insert((hand, upcard));
        Ok((hand, *upcard))
    }

    /// The hand awaiting an answer.
    #[must_use]
    pub fn current(&self) -> Option<(&Hand, Card)> {
        self.current.as_ref().map(|(hand, upcard)| (hand, *upcard))
    }

    /// Options the current hand has under the drill's rules.
    #[must_use]
    pub fn allowed(&self) -> Option<Allowed> {
        self.current
            .as_ref()
            .map(|(hand, _)| Allowed::for_hand(hand, &self.options))
    }

    /// Grades `action` for the current hand and clears it.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidState`] when no hand is waiting.
    pub fn answer(&mut self, action: Action) -> Result<Feedback, ActionError> {
        let (hand, upcard) = self.current.take().ok_or(ActionError::InvalidState)?;
        let allowed = Allowed::for_hand(&hand, &self.options);
        Ok(grade_decision(
            action,
            &hand,
            &upcard,
            allowed,
            None,
            &mut self.stats,
        ))
    }

    /// Session statistics.
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }
}
