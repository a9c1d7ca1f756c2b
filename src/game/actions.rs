use crate::card::Card;
use crate::error::ActionError;
use crate::hand::Hand;
use crate::strategy::Action;
use crate::training::{self, Feedback};

use super::{Game, GameState};

impl Game {
    fn ensure_player_turn(&self) -> Result<(), ActionError> {
        if self.state != GameState::PlayerTurn {
            return Err(ActionError::InvalidState);
        }
        let hand = self.hands.get(self.active).ok_or(ActionError::HandNotFound)?;
        if !hand.is_active() {
            return Err(ActionError::HandNotActive);
        }
        Ok(())
    }

    /// Moves past finished hands; the dealer plays once none is left.
    fn advance_after_hand(&mut self) -> Result<(), ActionError> {
        while self.hands.get(self.active).is_some_and(|hand| !hand.is_active()) {
            self.active += 1;
        }
        if self.active >= self.hands.len() {
            self.state = GameState::DealerTurn;
            self.play_dealer()?;
        }
        Ok(())
    }

    /// Stands a hand that reached 21.
    fn stand_on_21(hand: &mut Hand) {
        if hand.is_active() && hand.value() == 21 {
            hand.stand();
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// Reaching 21 stands automatically; a bust finishes the hand.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn or the shoe is empty.
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        self.ensure_player_turn()?;

        let card = self.deal_visible()?;
        let hand = &mut self.hands[self.active];
        hand.add_card(card);
        Self::stand_on_21(hand);
        log::debug!("hit {card}, hand {} now {}", self.active, hand.value());

        self.advance_after_hand()?;
        Ok(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        self.ensure_player_turn()?;

        self.hands[self.active].stand();
        log::debug!("stand on hand {}", self.active);

        self.advance_after_hand()
    }

    /// Player action: Double down (double bet, receive one card, then stand).
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn, the hand may not
    /// double, the bankroll cannot cover the extra bet, or the shoe is empty.
    pub fn double_down(&mut self) -> Result<Card, ActionError> {
        self.ensure_player_turn()?;

        let hand = &self.hands[self.active];
        if !hand.can_double(self.options.double_after_split) {
            return Err(ActionError::CannotDouble);
        }
        let bet = hand.bet();
        if self.bankroll < bet {
            return Err(ActionError::InsufficientFunds);
        }

        let card = self.deal_visible()?;
        self.bankroll -= bet;
        let hand = &mut self.hands[self.active];
        hand.double_down(card);
        log::debug!("double on hand {}: {card}, total {}", self.active, hand.value());

        self.advance_after_hand()?;
        Ok(card)
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// The second card moves to a new hand with a matching bet, each hand
    /// receives one fresh card, and play continues on the first.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn, splitting is off,
    /// the hand is not an unsplit pair, the bankroll cannot cover the extra
    /// bet, or the shoe holds fewer than two cards.
    pub fn split(&mut self) -> Result<(), ActionError> {
        self.ensure_player_turn()?;

        let hand = &self.hands[self.active];
        if !self.options.split || !hand.can_split() {
            return Err(ActionError::CannotSplit);
        }
        let bet = hand.bet();
        if self.bankroll < bet {
            return Err(ActionError::InsufficientFunds);
        }
        if self.shoe.cards_remaining() < 2 {
            return Err(ActionError::NoCards);
        }

        let hand = &mut self.hands[self.active];
        let moved = hand.take_split_card().ok_or(ActionError::CannotSplit)?;
        self.bankroll -= bet;

        let first = self.deal_visible()?;
        let second = self.deal_visible()?;

        let hand = &mut self.hands[self.active];
        hand.add_card(first);
        Self::stand_on_21(hand);

        let mut new_hand = Hand::from_split(moved, bet);
        new_hand.add_card(second);
        Self::stand_on_21(&mut new_hand);
        self.hands.insert(self.active + 1, new_hand);
        log::debug!("split into {} hands", self.hands.len());

        self.advance_after_hand()
    }

    /// Player action: Surrender (give up half the bet).
    ///
    /// The half bet comes back at settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn, surrender is off,
    /// or the hand is past its first two cards or came from a split.
    pub fn surrender(&mut self) -> Result<(), ActionError> {
        self.ensure_player_turn()?;

        let hand = &mut self.hands[self.active];
        if !self.options.surrender || !hand.can_surrender() {
            return Err(ActionError::CannotSurrender);
        }
        hand.surrender();
        log::debug!("surrender on hand {}", self.active);

        self.advance_after_hand()
    }

    /// Grades `action` against the recommended play, then performs it.
    ///
    /// Nothing is graded or recorded when the action is rejected.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying action.
    pub fn act(&mut self, action: Action) -> Result<Feedback, ActionError> {
        self.ensure_player_turn()?;
        let allowed = self.allowed().ok_or(ActionError::InvalidState)?;
        let upcard = self.upcard().ok_or(ActionError::InvalidState)?;
        let hand = self.hands[self.active].clone();
        let true_count = self.training.index_plays.then(|| self.true_count_int());

        match action {
            Action::Hit => self.hit().map(|_| ()),
            Action::Stand => self.stand(),
            Action::Double => self.double_down().map(|_| ()),
            Action::Split => self.split(),
            Action::Surrender => self.surrender(),
        }?;

        Ok(training::grade_decision(
            action,
            &hand,
            &upcard,
            allowed,
            true_count,
            &mut self.stats,
        ))
    }
}
