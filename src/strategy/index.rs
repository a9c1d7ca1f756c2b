//! Count-based deviations: the Illustrious 18 and the Fab 4.

use crate::card::Card;
use crate::hand::Hand;

use super::{Action, Allowed, Decision, recommend, upcard_value};

use Decision::{Double, Hit, Split, Stand, SurrenderOrHit};
use Direction::{AtOrAbove, AtOrBelow};
use Situation::{Hard, Insurance, TenPair};

/// True count at which insurance becomes a good bet.
pub const INSURANCE_INDEX: i32 = 3;

/// Hand situation an index play applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Situation {
    /// A hard total (pairs excluded).
    Hard(u8),
    /// A pair of tens.
    TenPair,
    /// The insurance side bet against an ace.
    Insurance,
}

/// Which side of the index triggers the deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Deviate when the true count is at or above the index.
    AtOrAbove,
    /// Deviate when the true count is at or below the index.
    AtOrBelow,
}

/// One count-based deviation from basic strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexPlay {
    /// Short name, e.g. `"16 vs 10 Stand"`.
    pub name: &'static str,
    /// Hand situation.
    pub situation: Situation,
    /// Dealer upcard value (ace = 11).
    pub upcard: u8,
    /// True count threshold.
    pub index: i32,
    /// Which side of the threshold deviates.
    pub direction: Direction,
    /// What to do instead of basic strategy.
    pub deviation: Decision,
}

impl IndexPlay {
    /// Whether `true_count` triggers this deviation.
    #[must_use]
    pub const fn should_deviate(&self, true_count: i32) -> bool {
        match self.direction {
            Direction::AtOrAbove => true_count >= self.index,
            Direction::AtOrBelow => true_count <= self.index,
        }
    }
}

const fn play(
    name: &'static str,
    situation: Situation,
    upcard: u8,
    index: i32,
    direction: Direction,
    deviation: Decision,
) -> IndexPlay {
    IndexPlay {
        name,
        situation,
        upcard,
        index,
        direction,
        deviation,
    }
}

/// Illustrious 18 in order of value, then the Fab 4 surrenders.
pub const INDEX_PLAYS: [IndexPlay; 22] = [
    play("Insurance", Insurance, 11, INSURANCE_INDEX, AtOrAbove, Stand),
    play("16 vs 10 Stand", Hard(16), 10, 0, AtOrAbove, Stand),
    play("15 vs 10 Stand", Hard(15), 10, 4, AtOrAbove, Stand),
    play("10,10 vs 5 Split", TenPair, 5, 5, AtOrAbove, Split),
    play("10,10 vs 6 Split", TenPair, 6, 4, AtOrAbove, Split),
    play("10 vs 10 Double", Hard(10), 10, 4, AtOrAbove, Double),
    play("12 vs 3 Stand", Hard(12), 3, 2, AtOrAbove, Stand),
    play("12 vs 2 Stand", Hard(12), 2, 3, AtOrAbove, Stand),
    play("11 vs A Double", Hard(11), 11, 1, AtOrAbove, Double),
    play("9 vs 2 Double", Hard(9), 2, 1, AtOrAbove, Double),
    play("10 vs A Double", Hard(10), 11, 4, AtOrAbove, Double),
    play("9 vs 7 Double", Hard(9), 7, 3, AtOrAbove, Double),
    play("16 vs 9 Stand", Hard(16), 9, 5, AtOrAbove, Stand),
    play("13 vs 2 Hit", Hard(13), 2, -1, AtOrBelow, Hit),
    play("12 vs 4 Hit", Hard(12), 4, 0, AtOrBelow, Hit),
    play("12 vs 5 Hit", Hard(12), 5, -2, AtOrBelow, Hit),
    play("12 vs 6 Hit", Hard(12), 6, -1, AtOrBelow, Hit),
    play("13 vs 3 Hit", Hard(13), 3, -2, AtOrBelow, Hit),
    play("14 vs 10 Surrender", Hard(14), 10, 3, AtOrAbove, SurrenderOrHit),
    play("15 vs 9 Surrender", Hard(15), 9, 2, AtOrAbove, SurrenderOrHit),
    play("15 vs A Surrender", Hard(15), 11, 1, AtOrAbove, SurrenderOrHit),
    play("14 vs A Surrender", Hard(14), 11, 3, AtOrAbove, SurrenderOrHit),
];

fn situation(hand: &Hand) -> Option<Situation> {
    if hand.is_pair() && !hand.is_split() {
        return hand.cards()[0].is_ten_value().then_some(TenPair);
    }
    (!hand.is_soft() && !hand.is_pair()).then(|| Hard(hand.value()))
}

/// The playing deviation covering `hand` against `upcard`, if any.
///
/// Insurance is not a playing decision and never matches here; see
/// [`should_take_insurance`].
#[must_use]
pub fn find_index_play(hand: &Hand, upcard: &Card) -> Option<&'static IndexPlay> {
    let situation = situation(hand)?;
    let up = upcard_value(upcard);
    INDEX_PLAYS
        .iter()
        .find(|play| play.situation == situation && play.upcard == up)
}

/// The deviation to play at `true_count`, if the count triggers one.
#[must_use]
pub fn deviation(hand: &Hand, upcard: &Card, true_count: i32) -> Option<Decision> {
    find_index_play(hand, upcard)
        .filter(|play| play.should_deviate(true_count))
        .map(|play| play.deviation)
}

/// Whether insurance is worth taking at `true_count`.
#[must_use]
pub const fn should_take_insurance(true_count: i32) -> bool {
    true_count >= INSURANCE_INDEX
}

/// Basic strategy adjusted by any triggered index play.
///
/// A split deviation that the hand cannot perform falls back to basic
/// strategy.
#[must_use]
pub fn recommend_with_count(
    hand: &Hand,
    upcard: &Card,
    allowed: Allowed,
    true_count: i32,
) -> Action {
    match deviation(hand, upcard, true_count) {
        Some(Split) if !allowed.split => recommend(hand, upcard, allowed),
        Some(decision) => decision.resolve(allowed),
        None => recommend(hand, upcard, allowed),
    }
}
