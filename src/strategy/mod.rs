//! Basic strategy lookup and decision grading.
//!
//! The charts prescribe a [`Decision`], which may carry a fallback ("double,
//! else hit"). [`Allowed`] says which options a hand actually has, and
//! [`Decision::resolve`] turns the two into the one [`Action`] to take.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::hand::Hand;
use crate::options::GameOptions;

pub mod chart;
mod index;

pub use index::{
    Direction, INDEX_PLAYS, INSURANCE_INDEX, IndexPlay, Situation, deviation, find_index_play,
    recommend_with_count, should_take_insurance,
};

/// A chart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Hit.
    Hit,
    /// Stand.
    Stand,
    /// Double, or hit when doubling is not allowed.
    Double,
    /// Double, or stand when doubling is not allowed.
    DoubleOrStand,
    /// Split.
    Split,
    /// Surrender, or hit when surrender is not allowed.
    SurrenderOrHit,
    /// Surrender, or stand when surrender is not allowed.
    SurrenderOrStand,
}

impl Decision {
    /// Applies the fallback for whatever the hand is not allowed to do.
    ///
    /// `Split` resolves to [`Action::Split`] unconditionally; the chart
    /// lookup only yields it when splitting is allowed.
    #[must_use]
    pub const fn resolve(self, allowed: Allowed) -> Action {
        match self {
            Self::Hit => Action::Hit,
            Self::Stand => Action::Stand,
            Self::Double if allowed.double => Action::Double,
            Self::Double => Action::Hit,
            Self::DoubleOrStand if allowed.double => Action::Double,
            Self::DoubleOrStand => Action::Stand,
            Self::Split => Action::Split,
            Self::SurrenderOrHit | Self::SurrenderOrStand if allowed.surrender => {
                Action::Surrender
            }
            Self::SurrenderOrHit => Action::Hit,
            Self::SurrenderOrStand => Action::Stand,
        }
    }

    /// Short chart notation (`H`, `S`, `D`, `Ds`, `P`, `Rh`, `Rs`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Hit => "H",
            Self::Stand => "S",
            Self::Double => "D",
            Self::DoubleOrStand => "Ds",
            Self::Split => "P",
            Self::SurrenderOrHit => "Rh",
            Self::SurrenderOrStand => "Rs",
        }
    }
}

/// A player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Take another card.
    Hit,
    /// Keep the current total.
    Stand,
    /// Double the wager and take exactly one card.
    Double,
    /// Split a pair into two hands.
    Split,
    /// Give up half the wager.
    Surrender,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Double => "double",
            Self::Split => "split",
            Self::Surrender => "surrender",
        })
    }
}

/// Which optional actions a hand may take right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Allowed {
    /// Doubling is possible.
    pub double: bool,
    /// Splitting is possible.
    pub split: bool,
    /// Surrender is possible.
    pub surrender: bool,
}

impl Allowed {
    /// Every option open.
    pub const ALL: Self = Self {
        double: true,
        split: true,
        surrender: true,
    };

    /// Options for `hand` under the table rules.
    #[must_use]
    pub fn for_hand(hand: &Hand, options: &GameOptions) -> Self {
        Self {
            double: hand.can_double(options.double_after_split),
            split: options.split && hand.can_split(),
            surrender: options.surrender && hand.can_surrender(),
        }
    }

    /// Drops the options that need another `bet` when `bankroll` cannot
    /// cover it.
    #[must_use]
    pub const fn with_bankroll(self, bankroll: usize, bet: usize) -> Self {
        let funded = bankroll >= bet;
        Self {
            double: self.double && funded,
            split: self.split && funded,
            surrender: self.surrender,
        }
    }
}

/// Strategy value of the dealer upcard (ace = 11).
#[must_use]
pub const fn upcard_value(upcard: &Card) -> u8 {
    upcard.value()
}

/// The chart entry for `hand` against `upcard`.
///
/// An unsplit pair consults the pair chart first. A split verdict stands
/// only when splitting is allowed, and a surrender verdict is returned as
/// is. Any other pair verdict falls through to the soft or hard chart,
/// which is keyed on the pair's total. Hard totals below 5 hit, soft
/// totals below 13 (a pair of aces that may not split) hit, and busted
/// totals stand.
#[must_use]
pub fn basic_decision(hand: &Hand, upcard: &Card, allowed: Allowed) -> Decision {
    let up = upcard_value(upcard);

    if hand.is_pair() && !hand.is_split() {
        let pair_value = hand.cards()[0].value();
        match chart::pair(pair_value, up) {
            Some(Decision::Split) if allowed.split => return Decision::Split,
            Some(decision @ Decision::SurrenderOrHit) => return decision,
            _ => {}
        }
    }

    let total = hand.value();
    if total > 21 {
        return Decision::Stand;
    }
    if hand.is_soft() {
        return chart::soft(total, up).unwrap_or(Decision::Hit);
    }
    chart::hard(total, up).unwrap_or(Decision::Hit)
}

/// The action basic strategy prescribes for `hand` against `upcard`.
#[must_use]
pub fn recommend(hand: &Hand, upcard: &Card, allowed: Allowed) -> Action {
    basic_decision(hand, upcard, allowed).resolve(allowed)
}

/// Whether `action` is the basic strategy play.
///
/// Hitting where the chart says double is correct whenever the hand may
/// not double.
#[must_use]
pub fn is_action_correct(action: Action, hand: &Hand, upcard: &Card, allowed: Allowed) -> bool {
    let decision = basic_decision(hand, upcard, allowed);
    if decision == Decision::Double && !allowed.double {
        return action == Action::Hit;
    }
    action == decision.resolve(allowed)
}
