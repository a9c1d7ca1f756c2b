//! Table rules and training configuration.

use serde::{Deserialize, Serialize};

/// Rounding mode for payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Table rules for a blackjack game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtrain::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(2)
///     .with_penetration(0.75)
///     .with_stand_on_soft_17(true);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOptions {
    /// Number of 52-card packs in the shoe.
    pub decks: u8,
    /// Fraction of the shoe dealt before a reshuffle. 0 disables reshuffling.
    pub penetration: f64,
    /// Blackjack payout ratio (1.5 pays 3:2).
    pub blackjack_pays: f64,
    /// Whether the dealer stands on soft 17 (S17) instead of hitting (H17).
    pub stand_on_soft_17: bool,
    /// Whether pairs may be split.
    pub split: bool,
    /// Whether a hand produced by a split may double.
    pub double_after_split: bool,
    /// Whether late surrender is offered.
    pub surrender: bool,
    /// Whether the dealer checks for blackjack under an ace or ten upcard.
    pub dealer_peeks: bool,
    /// Whether one card is burned face up after each shuffle.
    pub burn_after_shuffle: bool,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Rounding mode for surrender refunds.
    pub rounding_surrender: RoundingMode,
    /// Bankroll given to a new player.
    pub starting_bankroll: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self::full_play()
    }
}

impl GameOptions {
    /// Single-player full play: one deck, H17, no split, double on the
    /// first two cards only.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::GameOptions;
    ///
    /// let options = GameOptions::full_play();
    /// assert!(!options.split);
    /// assert_eq!(options.penetration, 0.65);
    /// ```
    #[must_use]
    pub const fn full_play() -> Self {
        Self {
            decks: 1,
            penetration: 0.65,
            blackjack_pays: 1.5,
            stand_on_soft_17: false,
            split: false,
            double_after_split: false,
            surrender: true,
            dealer_peeks: false,
            burn_after_shuffle: false,
            rounding_blackjack: RoundingMode::Down,
            rounding_surrender: RoundingMode::Down,
            starting_bankroll: 1000,
        }
    }

    /// Classic mode: full play plus splitting and double after split.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::GameOptions;
    ///
    /// let options = GameOptions::classic();
    /// assert!(options.split && options.double_after_split);
    /// ```
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            split: true,
            double_after_split: true,
            ..Self::full_play()
        }
    }

    /// Multiplayer table: classic rules with deeper penetration.
    #[must_use]
    pub const fn multiplayer() -> Self {
        Self {
            penetration: 0.75,
            ..Self::classic()
        }
    }

    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the deck penetration.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::GameOptions;
    ///
    /// let options = GameOptions::default().with_penetration(0.80);
    /// assert_eq!(options.penetration, 0.80);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::GameOptions;
    ///
    /// let options = GameOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets whether dealer stands on soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::GameOptions;
    ///
    /// let options = GameOptions::default().with_stand_on_soft_17(true);
    /// assert!(options.stand_on_soft_17);
    /// ```
    #[must_use]
    pub const fn with_stand_on_soft_17(mut self, stand: bool) -> Self {
        self.stand_on_soft_17 = stand;
        self
    }

    /// Sets whether pairs may be split.
    #[must_use]
    pub const fn with_split(mut self, allowed: bool) -> Self {
        self.split = allowed;
        self
    }

    /// Sets whether double down is allowed after split.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets whether surrender is allowed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::GameOptions;
    ///
    /// let options = GameOptions::default().with_surrender(false);
    /// assert!(!options.surrender);
    /// ```
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender = allowed;
        self
    }

    /// Sets whether the dealer peeks for blackjack.
    #[must_use]
    pub const fn with_dealer_peeks(mut self, peeks: bool) -> Self {
        self.dealer_peeks = peeks;
        self
    }

    /// Sets whether a card is burned after each shuffle.
    #[must_use]
    pub const fn with_burn_after_shuffle(mut self, burn: bool) -> Self {
        self.burn_after_shuffle = burn;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::{GameOptions, RoundingMode};
    ///
    /// let options = GameOptions::default().with_rounding_blackjack(RoundingMode::Up);
    /// assert_eq!(options.rounding_blackjack, RoundingMode::Up);
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the rounding mode for surrender refunds.
    #[must_use]
    pub const fn with_rounding_surrender(mut self, mode: RoundingMode) -> Self {
        self.rounding_surrender = mode;
        self
    }

    /// Sets the starting bankroll.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::GameOptions;
    ///
    /// let options = GameOptions::default().with_starting_bankroll(500);
    /// assert_eq!(options.starting_bankroll, 500);
    /// ```
    #[must_use]
    pub const fn with_starting_bankroll(mut self, bankroll: usize) -> Self {
        self.starting_bankroll = bankroll;
        self
    }
}

/// Training drill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingOptions {
    /// Cards shown per counting drill round.
    pub cards_per_drill: usize,
    /// Fraction of full-play hands that quiz the running count.
    pub count_quiz_frequency: f64,
    /// Whether decisions are graded against count-based index plays.
    pub index_plays: bool,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            cards_per_drill: 3,
            count_quiz_frequency: 0.3,
            index_plays: false,
        }
    }
}

impl TrainingOptions {
    /// Sets the number of cards per counting drill round.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::TrainingOptions;
    ///
    /// let options = TrainingOptions::default().with_cards_per_drill(5);
    /// assert_eq!(options.cards_per_drill, 5);
    /// ```
    #[must_use]
    pub const fn with_cards_per_drill(mut self, cards: usize) -> Self {
        self.cards_per_drill = cards;
        self
    }

    /// Sets how often full play quizzes the running count.
    #[must_use]
    pub const fn with_count_quiz_frequency(mut self, frequency: f64) -> Self {
        self.count_quiz_frequency = frequency;
        self
    }

    /// Sets whether index plays are part of grading.
    #[must_use]
    pub const fn with_index_plays(mut self, enabled: bool) -> Self {
        self.index_plays = enabled;
        self
    }
}
