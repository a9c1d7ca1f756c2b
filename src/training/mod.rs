//! Counting and strategy drills, grading, and session stats.

use serde::Serialize;

use crate::card::Card;
use crate::hand::Hand;
use crate::strategy::{self, Action, Allowed};

mod drill;
mod evaluate;
mod stats;

pub use drill::{CountingDrill, StrategyDrill};
pub use evaluate::{Mistake, MistakeKind, ev_loss, evaluate_count, evaluate_decision, evaluate_index};
pub use stats::SessionStats;

/// Grade for one playing decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// The action taken.
    pub action: Action,
    /// The recommended action.
    pub recommended: Action,
    /// Whether the action was acceptable.
    pub correct: bool,
    /// Index play that was triggered for this decision, if any.
    pub index_play: Option<&'static str>,
    /// The graded mistake, if any.
    pub mistake: Option<Mistake>,
}

/// Grade for one running count answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountCheck {
    /// The actual running count.
    pub expected: i32,
    /// The player's answer.
    pub answered: i32,
    /// Whether the answer was right.
    pub correct: bool,
    /// The graded mistake, if any.
    pub mistake: Option<Mistake>,
}

impl CountCheck {
    /// Grades `answered` against `expected` and records it in `stats`.
    pub fn grade(expected: i32, answered: i32, stats: &mut SessionStats) -> Self {
        let mistake = evaluate_count(expected, answered);
        let correct = mistake.is_none();
        stats.record_count_check(correct);
        if let Some(mistake) = &mistake {
            stats.add_ev_loss(mistake.ev_loss);
        }
        Self {
            expected,
            answered,
            correct,
            mistake,
        }
    }
}

/// Grades `action` for `hand` against `upcard` and records it in `stats`.
///
/// With a `true_count`, a triggered index play that changes the
/// recommendation becomes the right answer; playing basic strategy there
/// counts as a missed index play rather than a strategy error.
pub fn grade_decision(
    action: Action,
    hand: &Hand,
    upcard: &Card,
    allowed: Allowed,
    true_count: Option<i32>,
    stats: &mut SessionStats,
) -> Feedback {
    let basic = strategy::recommend(hand, upcard, allowed);
    let (recommended, triggered) = match true_count {
        Some(tc) => {
            let counted = strategy::recommend_with_count(hand, upcard, allowed, tc);
            let play = strategy::find_index_play(hand, upcard)
                .filter(|play| play.should_deviate(tc) && counted != basic);
            (counted, play)
        }
        None => (basic, None),
    };

    let (correct, mistake) = if let Some(play) = triggered {
        let followed = action == recommended;
        stats.record_index_play(followed);
        let mistake = if followed {
            None
        } else if action == basic {
            evaluate_index(play.name, false)
        } else {
            evaluate_decision(action, recommended, hand.value())
        };
        (followed, mistake)
    } else {
        let correct = strategy::is_action_correct(action, hand, upcard, allowed);
        let mistake = if correct {
            None
        } else {
            evaluate_decision(action, recommended, hand.value())
        };
        (correct, mistake)
    };

    stats.record_decision(correct);
    if let Some(mistake) = &mistake {
        stats.add_ev_loss(mistake.ev_loss);
    }
    log::debug!("graded {action} (recommended {recommended}): correct={correct}");

    Feedback {
        action,
        recommended,
        correct,
        index_play: triggered.map(|play| play.name),
        mistake,
    }
}
