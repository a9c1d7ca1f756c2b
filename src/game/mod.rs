//! Single-player round engine for full play and the classic split mode.

use alloc::vec::Vec;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::counting::Counter;
use crate::error::ShoeError;
use crate::hand::{DealerHand, Hand};
use crate::options::{GameOptions, TrainingOptions};
use crate::result::RoundResult;
use crate::shoe::Shoe;
use crate::strategy::{self, Action, Allowed};
use crate::training::{CountCheck, SessionStats};

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::GameState;

/// A blackjack trainer table for one player.
///
/// The game owns the shoe, the Hi-Lo counter and the session stats. Every
/// card is counted as it becomes visible; the dealer's hole card is counted
/// when it is turned over. Use [`GameOptions::full_play`] for the
/// single-hand trainer or [`GameOptions::classic`] to allow splits.
#[derive(Debug, Clone)]
pub struct Game {
    options: GameOptions,
    training: TrainingOptions,
    shoe: Shoe,
    counter: Counter,
    stats: SessionStats,
    bankroll: usize,
    pending_bet: usize,
    hands: Vec<Hand>,
    active: usize,
    dealer: DealerHand,
    state: GameState,
    last_result: Option<RoundResult>,
    rng: ChaCha8Rng,
}

impl Game {
    /// Creates a game with a freshly shuffled shoe.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::{Game, GameOptions, GameState, TrainingOptions};
    ///
    /// let game = Game::new(GameOptions::full_play(), TrainingOptions::default(), 42);
    /// assert_eq!(game.state(), GameState::Betting);
    /// assert_eq!(game.bankroll(), 1000);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, training: TrainingOptions, seed: u64) -> Self {
        let shoe = Shoe::new(options.decks, options.penetration, seed);
        let mut game = Self::with_shoe(options, training, shoe);
        game.rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
        game
    }

    /// Creates a game dealing from `shoe`, e.g. a [`Shoe::stacked`] one.
    #[must_use]
    pub fn with_shoe(options: GameOptions, training: TrainingOptions, shoe: Shoe) -> Self {
        Self {
            bankroll: options.starting_bankroll,
            options,
            training,
            shoe,
            counter: Counter::new(),
            stats: SessionStats::new(),
            pending_bet: 0,
            hands: Vec::new(),
            active: 0,
            dealer: DealerHand::new(),
            state: GameState::Betting,
            last_result: None,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    /// Reshuffles the shoe and resets the count.
    ///
    /// Burns a card when the rules ask for it; the burned card is shown and
    /// counted.
    fn reshuffle(&mut self) {
        self.shoe.shuffle();
        self.counter.reset();
        if self.options.burn_after_shuffle {
            let burned = self.shoe.burn(1);
            self.counter.count_cards(&burned);
        }
    }

    /// Deals one card face up and counts it.
    fn deal_visible(&mut self) -> Result<Card, ShoeError> {
        let card = self.shoe.deal()?;
        self.counter.count_card(&card);
        Ok(card)
    }

    /// Turns the hole card over and counts it.
    fn reveal_hole(&mut self) {
        if let Some(card) = self.dealer.reveal_hole() {
            self.counter.count_card(&card);
            log::debug!("dealer reveals {card}");
        }
    }

    /// Table rules.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Training settings.
    #[must_use]
    pub const fn training(&self) -> &TrainingOptions {
        &self.training
    }

    /// Current round state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Chips not currently wagered.
    #[must_use]
    pub const fn bankroll(&self) -> usize {
        self.bankroll
    }

    /// Chips selected for the next deal.
    #[must_use]
    pub const fn pending_bet(&self) -> usize {
        self.pending_bet
    }

    /// The player's hands this round; more than one after a split.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Index of the hand being played.
    #[must_use]
    pub const fn active_hand_index(&self) -> usize {
        self.active
    }

    /// The hand being played, during the player's turn.
    #[must_use]
    pub fn active_hand(&self) -> Option<&Hand> {
        if self.state == GameState::PlayerTurn {
            self.hands.get(self.active)
        } else {
            None
        }
    }

    /// The dealer's hand.
    #[must_use]
    pub const fn dealer(&self) -> &DealerHand {
        &self.dealer
    }

    /// The dealer's upcard.
    #[must_use]
    pub fn upcard(&self) -> Option<Card> {
        self.dealer.up_card().copied()
    }

    /// The shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// The Hi-Lo counter.
    #[must_use]
    pub const fn counter(&self) -> &Counter {
        &self.counter
    }

    /// Running count of every card shown since the last shuffle.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.counter.running_count()
    }

    /// True count for the cards left in the shoe.
    #[must_use]
    pub fn true_count(&self) -> f64 {
        self.counter.true_count(self.shoe.decks_remaining())
    }

    /// True count truncated toward zero, as used by index plays.
    #[must_use]
    pub fn true_count_int(&self) -> i32 {
        self.counter.true_count_int(self.shoe.decks_remaining())
    }

    /// Session statistics.
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Result of the last settled round.
    #[must_use]
    pub const fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Options the active hand has right now, bankroll included.
    #[must_use]
    pub fn allowed(&self) -> Option<Allowed> {
        let hand = self.active_hand()?;
        Some(Allowed::for_hand(hand, &self.options).with_bankroll(self.bankroll, hand.bet()))
    }

    /// The recommended play for the active hand.
    ///
    /// Applies index plays when the training settings enable them.
    #[must_use]
    pub fn recommendation(&self) -> Option<Action> {
        let hand = self.active_hand()?;
        let upcard = self.upcard()?;
        let allowed = self.allowed()?;
        Some(if self.training.index_plays {
            strategy::recommend_with_count(hand, &upcard, allowed, self.true_count_int())
        } else {
            strategy::recommend(hand, &upcard, allowed)
        })
    }

    /// Whether to quiz the running count this hand, drawn at the configured
    /// frequency.
    pub fn should_quiz_count(&mut self) -> bool {
        self.rng.random::<f64>() < self.training.count_quiz_frequency
    }

    /// Grades a running count answer.
    pub fn check_count(&mut self, answer: i32) -> CountCheck {
        CountCheck::grade(self.counter.running_count(), answer, &mut self.stats)
    }

    /// Starts a new session: fresh shoe, zero count, starting bankroll and
    /// empty statistics.
    pub fn reset_session(&mut self) {
        self.reshuffle();
        self.stats.reset();
        self.bankroll = self.options.starting_bankroll;
        self.pending_bet = 0;
        self.hands.clear();
        self.active = 0;
        self.dealer.clear();
        self.last_result = None;
        self.state = GameState::Betting;
    }
}
