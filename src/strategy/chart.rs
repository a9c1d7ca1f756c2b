//! Single-deck H17 basic strategy charts.
//!
//! Columns are the dealer upcard, 2 through 10 then ace (11).

use super::Decision;

const H: Decision = Decision::Hit;
const S: Decision = Decision::Stand;
const D: Decision = Decision::Double;
const DS: Decision = Decision::DoubleOrStand;
const P: Decision = Decision::Split;
const RH: Decision = Decision::SurrenderOrHit;

type Row = [Decision; 10];

/// Hard 5 through hard 21.
const HARD: [Row; 17] = [
    [H, H, H, H, H, H, H, H, H, H],           // 5
    [H, H, H, H, H, H, H, H, H, H],           // 6
    [H, H, H, H, H, H, H, H, H, H],           // 7
    [H, H, H, H, H, H, H, H, H, H],           // 8
    [D, D, D, D, D, H, H, H, H, H],           // 9
    [D, D, D, D, D, D, D, D, H, H],           // 10
    [D, D, D, D, D, D, D, D, D, D],           // 11
    [H, H, S, S, S, H, H, H, H, H],           // 12
    [S, S, S, S, S, H, H, H, H, H],           // 13
    [S, S, S, S, S, H, H, H, H, H],           // 14
    [S, S, S, S, S, H, H, H, RH, RH],         // 15
    [S, S, S, S, S, H, H, RH, RH, RH],        // 16
    [S, S, S, S, S, S, S, S, S, S],           // 17
    [S, S, S, S, S, S, S, S, S, S],           // 18
    [S, S, S, S, S, S, S, S, S, S],           // 19
    [S, S, S, S, S, S, S, S, S, S],           // 20
    [S, S, S, S, S, S, S, S, S, S],           // 21
];

/// Soft 13 (A,2) through soft 21.
const SOFT: [Row; 9] = [
    [H, H, D, D, D, H, H, H, H, H],           // 13
    [H, H, D, D, D, H, H, H, H, H],           // 14
    [H, H, D, D, D, H, H, H, H, H],           // 15
    [H, H, D, D, D, H, H, H, H, H],           // 16
    [D, D, D, D, D, H, H, H, H, H],           // 17
    [S, DS, DS, DS, DS, S, S, H, H, S],       // 18
    [S, S, S, S, DS, S, S, S, S, S],          // 19
    [S, S, S, S, S, S, S, S, S, S],           // 20
    [S, S, S, S, S, S, S, S, S, S],           // 21
];

/// Pairs keyed by card value, 2s through aces (11).
const PAIRS: [Row; 10] = [
    [P, P, P, P, P, P, H, H, H, H],           // 2,2
    [P, P, P, P, P, P, P, H, H, H],           // 3,3
    [H, H, P, P, P, H, H, H, H, H],           // 4,4
    [D, D, D, D, D, D, D, D, H, H],           // 5,5
    [P, P, P, P, P, P, H, H, H, H],           // 6,6
    [P, P, P, P, P, P, P, H, RH, H],          // 7,7
    [P, P, P, P, P, P, P, P, P, P],           // 8,8
    [P, P, P, P, P, S, P, P, S, S],           // 9,9
    [S, S, S, S, S, S, S, S, S, S],           // 10,10
    [P, P, P, P, P, P, P, P, P, P],           // A,A
];

fn lookup(rows: &[Row], first: u8, row: u8, upcard: u8) -> Option<Decision> {
    if !(2..=11).contains(&upcard) || row < first {
        return None;
    }
    rows.get(usize::from(row - first))
        .map(|cells| cells[usize::from(upcard - 2)])
}

/// Chart entry for a hard total (5-21) against an upcard (2-11).
#[must_use]
pub fn hard(total: u8, upcard: u8) -> Option<Decision> {
    lookup(&HARD, 5, total, upcard)
}

/// Chart entry for a soft total (13-21) against an upcard (2-11).
#[must_use]
pub fn soft(total: u8, upcard: u8) -> Option<Decision> {
    lookup(&SOFT, 13, total, upcard)
}

/// Chart entry for a pair of `card_value` (2-11, ace = 11) against an upcard.
#[must_use]
pub fn pair(card_value: u8, upcard: u8) -> Option<Decision> {
    lookup(&PAIRS, 2, card_value, upcard)
}
