//! Session statistics.

use serde::{Deserialize, Serialize};

/// Counters for one training session.
///
/// Everything only grows until [`SessionStats::reset`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    /// Hands dealt in full play.
    pub hands_played: usize,
    /// Graded playing decisions.
    pub decisions: usize,
    /// Decisions that matched the recommendation.
    pub correct_decisions: usize,
    /// Running count checks answered.
    pub count_checks: usize,
    /// Count checks answered correctly.
    pub correct_count_checks: usize,
    /// Cards shown in counting drills.
    pub cards_counted: usize,
    /// Decisions where an index play was triggered.
    pub index_opportunities: usize,
    /// Triggered index plays the player followed.
    pub index_followed: usize,
    /// Consecutive correct answers, decisions and count checks alike.
    pub current_streak: usize,
    /// Longest streak this session.
    pub best_streak: usize,
    /// Estimated expected value given up, in betting units.
    pub ev_loss: f64,
}

impl SessionStats {
    /// Creates empty stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn streak(&mut self, correct: bool) {
        if correct {
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
    }

    /// Records a dealt hand.
    pub const fn record_hand(&mut self) {
        self.hands_played += 1;
    }

    /// Records a graded decision.
    pub fn record_decision(&mut self, correct: bool) {
        self.decisions += 1;
        if correct {
            self.correct_decisions += 1;
        }
        self.streak(correct);
    }

    /// Records a running count check.
    pub fn record_count_check(&mut self, correct: bool) {
        self.count_checks += 1;
        if correct {
            self.correct_count_checks += 1;
        }
        self.streak(correct);
    }

    /// Records cards shown in a counting drill.
    pub const fn record_cards(&mut self, count: usize) {
        self.cards_counted += count;
    }

    /// Records a triggered index play.
    pub const fn record_index_play(&mut self, followed: bool) {
        self.index_opportunities += 1;
        if followed {
            self.index_followed += 1;
        }
    }

    /// Adds an estimated EV loss.
    pub fn add_ev_loss(&mut self, units: f64) {
        self.ev_loss += units;
    }

    /// Share of correct decisions, 0 when none were graded.
    #[must_use]
    pub fn strategy_accuracy(&self) -> f64 {
        ratio(self.correct_decisions, self.decisions)
    }

    /// Share of correct count checks, 0 when none were answered.
    #[must_use]
    pub fn count_accuracy(&self) -> f64 {
        ratio(self.correct_count_checks, self.count_checks)
    }

    /// Share of triggered index plays followed.
    #[must_use]
    pub fn index_accuracy(&self) -> f64 {
        ratio(self.index_followed, self.index_opportunities)
    }

    /// Clears every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "f64 has sufficient precision for session counters"
)]
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
