use crate::error::{BetError, DealError};
use crate::hand::Hand;

use super::{Game, GameState};

impl Game {
    /// Adds a chip to the bet for the next deal.
    ///
    /// # Errors
    ///
    /// Returns an error if betting is closed, the chip is zero, or the bet
    /// would exceed the bankroll.
    pub fn add_chip(&mut self, amount: usize) -> Result<usize, BetError> {
        if self.state != GameState::Betting {
            return Err(BetError::InvalidState);
        }
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }
        let total = self.pending_bet + amount;
        if total > self.bankroll {
            return Err(BetError::InsufficientFunds);
        }
        self.pending_bet = total;
        Ok(total)
    }

    /// Clears the chips selected for the next deal.
    ///
    /// # Errors
    ///
    /// Returns an error if betting is closed.
    pub fn clear_bet(&mut self) -> Result<(), BetError> {
        if self.state != GameState::Betting {
            return Err(BetError::InvalidState);
        }
        self.pending_bet = 0;
        Ok(())
    }

    /// Deducts the bet and deals player, dealer up, player, dealer hole.
    ///
    /// Reshuffles first when the shoe reached its penetration. A player
    /// blackjack turns the hole card over and settles at once; so does a
    /// dealer blackjack when the dealer peeks.
    ///
    /// # Errors
    ///
    /// Returns an error if betting is closed or no chips were selected.
    pub fn deal(&mut self) -> Result<(), DealError> {
        if self.state != GameState::Betting {
            return Err(DealError::InvalidState);
        }
        if self.pending_bet == 0 {
            return Err(DealError::NoBet);
        }

        if self.shoe.needs_shuffle() || self.shoe.cards_remaining() < 4 {
            self.reshuffle();
        }
        if self.shoe.cards_remaining() < 4 {
            return Err(DealError::NotEnoughCards);
        }

        let bet = self.pending_bet;
        self.bankroll -= bet;
        self.pending_bet = 0;
        self.last_result = None;
        self.active = 0;
        self.dealer.clear();

        let mut hand = Hand::new(bet);
        hand.add_card(self.deal_visible()?);
        let up = self.deal_visible()?;
        self.dealer.add_card(up);
        hand.add_card(self.deal_visible()?);
        let hole = self.shoe.deal()?;
        self.dealer.add_card(hole);

        log::debug!(
            "dealt {} {} against {up}, bet {bet}",
            hand.cards()[0],
            hand.cards()[1]
        );
        self.hands = alloc::vec![hand];
        self.stats.record_hand();
        self.state = GameState::PlayerTurn;

        let peeked = self.options.dealer_peeks
            && (up.is_ace() || up.is_ten_value())
            && self.dealer.is_blackjack();
        if self.hands[0].is_blackjack() || peeked {
            self.reveal_hole();
            self.settle();
        }

        Ok(())
    }
}
