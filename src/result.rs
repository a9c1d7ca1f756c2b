//! Settlement outcomes and payouts.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::hand::{DealerHand, Hand};
use crate::options::{GameOptions, RoundingMode};

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses to a higher dealer total or a dealer blackjack.
    Lose,
    /// Push (tie).
    Push,
    /// Player has blackjack.
    Blackjack,
    /// Player surrendered.
    Surrendered,
    /// Player went over 21.
    Bust,
}

impl HandOutcome {
    /// Returns whether the player came out ahead.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win | Self::Blackjack)
    }
}

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

/// Decides a hand against the dealer's final hand.
///
/// Rules apply in order: surrender, player bust, both blackjack (push),
/// player blackjack, dealer blackjack, dealer bust, then value comparison.
#[must_use]
pub fn outcome(hand: &Hand, dealer: &DealerHand) -> HandOutcome {
    let player_value = hand.value();
    let dealer_value = dealer.value();

    if hand.is_surrendered() {
        HandOutcome::Surrendered
    } else if hand.is_busted() {
        HandOutcome::Bust
    } else if hand.is_blackjack() && dealer.is_blackjack() {
        HandOutcome::Push
    } else if hand.is_blackjack() {
        HandOutcome::Blackjack
    } else if dealer.is_blackjack() {
        HandOutcome::Lose
    } else if dealer.is_bust() || player_value > dealer_value {
        HandOutcome::Win
    } else if player_value < dealer_value {
        HandOutcome::Lose
    } else {
        HandOutcome::Push
    }
}

/// Amount returned to the bankroll for `outcome` on a wager of `bet`.
///
/// A win returns twice the bet, a blackjack the bet plus `blackjack_pays`
/// times the bet, a push the bet, a surrender half the bet, and a loss or
/// bust nothing.
#[must_use]
pub fn payout(outcome: HandOutcome, bet: usize, options: &GameOptions) -> usize {
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for monetary values"
    )]
    let stake = bet as f64;
    match outcome {
        HandOutcome::Win => bet * 2,
        HandOutcome::Blackjack => {
            bet + round_amount(stake * options.blackjack_pays, options.rounding_blackjack)
        }
        HandOutcome::Push => bet,
        HandOutcome::Surrendered => round_amount(stake * 0.5, options.rounding_surrender),
        HandOutcome::Lose | HandOutcome::Bust => 0,
    }
}

/// Settles one hand: records its outcome and returns the result line.
pub fn settle_hand(
    hand_index: usize,
    hand: &mut Hand,
    dealer: &DealerHand,
    options: &GameOptions,
) -> HandResult {
    let outcome = outcome(hand, dealer);
    hand.set_result(outcome);
    HandResult {
        hand_index,
        outcome,
        bet: hand.bet(),
        payout: payout(outcome, hand.bet(), options),
        player_value: hand.value(),
        dealer_value: dealer.value(),
    }
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// The hand index (for split hands).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The bet amount for this hand.
    pub bet: usize,
    /// The amount returned to the bankroll.
    pub payout: usize,
    /// The player's hand value.
    pub player_value: u8,
    /// The dealer's hand value.
    pub dealer_value: u8,
}

/// Result of a settled round for one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Results for each hand (multiple if split).
    pub hands: Vec<HandResult>,
    /// Total returned to the bankroll.
    pub total_payout: usize,
    /// Total wagered across all hands.
    pub total_bet: usize,
    /// Net result (positive = profit, negative = loss).
    pub net: isize,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
}

impl RoundResult {
    /// Builds a round result from per-hand lines.
    #[must_use]
    pub fn from_hands(hands: Vec<HandResult>, dealer: &DealerHand) -> Self {
        let total_payout = hands.iter().map(|h| h.payout).sum::<usize>();
        let total_bet = hands.iter().map(|h| h.bet).sum::<usize>();
        #[expect(clippy::cast_possible_wrap, reason = "payout values fit in isize")]
        let net = total_payout as isize - total_bet as isize;
        Self {
            hands,
            total_payout,
            total_bet,
            net,
            dealer_value: dealer.value(),
            dealer_bust: dealer.is_bust(),
            dealer_blackjack: dealer.is_blackjack(),
        }
    }
}
