//! Mistake classification and EV loss estimates.

use serde::Serialize;

use crate::strategy::Action;

/// Approximate EV lost per mistake, in betting units.
pub mod ev_loss {
    /// Hit where stand was correct.
    pub const HIT_VS_STAND: f64 = 0.05;
    /// Stand where hit was correct.
    pub const STAND_VS_HIT: f64 = 0.06;
    /// Hit where double was correct.
    pub const HIT_VS_DOUBLE: f64 = 0.10;
    /// Stand where double was correct.
    pub const STAND_VS_DOUBLE: f64 = 0.08;
    /// Split where hit was correct.
    pub const SPLIT_VS_HIT: f64 = 0.07;
    /// Hit where split was correct.
    pub const HIT_VS_SPLIT: f64 = 0.05;
    /// Surrender where hit was correct.
    pub const SURRENDER_VS_HIT: f64 = 0.03;
    /// Hit where surrender was correct.
    pub const HIT_VS_SURRENDER: f64 = 0.04;
    /// Standing on a stiff 12-16 that should hit.
    pub const STAND_VS_HIT_STIFF: f64 = 0.15;
    /// Hitting 17 or more.
    pub const HIT_VS_STAND_HARD17: f64 = 0.20;
    /// Missing a triggered index play.
    pub const INDEX_NOT_FOLLOWED: f64 = 0.02;
    /// Any other wrong play.
    pub const OTHER: f64 = 0.05;
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MistakeKind {
    /// Wrong running count.
    Count {
        /// The actual running count.
        expected: i32,
        /// The player's answer.
        answered: i32,
    },
    /// Wrong basic strategy play.
    Strategy {
        /// The recommended action.
        expected: Action,
        /// The action taken.
        chosen: Action,
    },
    /// A triggered count deviation was ignored.
    Index {
        /// Name of the index play.
        play: &'static str,
    },
}

/// A graded mistake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mistake {
    /// What went wrong.
    #[serde(flatten)]
    pub kind: MistakeKind,
    /// 1 (minor) to 3 (major).
    pub severity: u8,
    /// Estimated EV lost, in betting units.
    pub ev_loss: f64,
}

/// Grades a running count answer; `None` when it is right.
///
/// Off by one is minor, off by up to three is moderate, anything more is a
/// major drift.
#[must_use]
pub fn evaluate_count(expected: i32, answered: i32) -> Option<Mistake> {
    let diff = expected.abs_diff(answered);
    let (severity, ev_loss) = match diff {
        0 => return None,
        1 => (1, 0.01),
        2 | 3 => (2, 0.03),
        _ => (3, 0.05),
    };
    Some(Mistake {
        kind: MistakeKind::Count { expected, answered },
        severity,
        ev_loss,
    })
}

/// Grades a playing decision; `None` when `chosen` matches `expected`.
///
/// `player_value` is the hand total before the action.
#[must_use]
pub fn evaluate_decision(chosen: Action, expected: Action, player_value: u8) -> Option<Mistake> {
    if chosen == expected {
        return None;
    }

    let (severity, ev_loss) = match (chosen, expected) {
        (Action::Stand, Action::Hit) if (12..=16).contains(&player_value) => {
            (3, ev_loss::STAND_VS_HIT_STIFF)
        }
        (Action::Hit, Action::Stand) if player_value >= 17 => (3, ev_loss::HIT_VS_STAND_HARD17),
        (Action::Hit, Action::Double) => (2, ev_loss::HIT_VS_DOUBLE),
        (Action::Hit, Action::Split) => (2, ev_loss::HIT_VS_SPLIT),
        (Action::Hit, Action::Stand) => (1, ev_loss::HIT_VS_STAND),
        (Action::Stand, Action::Hit) => (1, ev_loss::STAND_VS_HIT),
        (Action::Stand, Action::Double) => (1, ev_loss::STAND_VS_DOUBLE),
        (Action::Split, Action::Hit) => (1, ev_loss::SPLIT_VS_HIT),
        (Action::Surrender, Action::Hit) => (1, ev_loss::SURRENDER_VS_HIT),
        (Action::Hit, Action::Surrender) => (1, ev_loss::HIT_VS_SURRENDER),
        _ => (1, ev_loss::OTHER),
    };

    Some(Mistake {
        kind: MistakeKind::Strategy { expected, chosen },
        severity,
        ev_loss,
    })
}

/// Grades a triggered index play; `None` when it was followed.
#[must_use]
pub const fn evaluate_index(play: &'static str, followed: bool) -> Option<Mistake> {
    if followed {
        return None;
    }
    Some(Mistake {
        kind: MistakeKind::Index { play },
        severity: 1,
        ev_loss: ev_loss::INDEX_NOT_FOLLOWED,
    })
}
