use alloc::vec::Vec;

use crate::card::Card;
use crate::error::{BetError, SettleError};
use crate::result::{self, RoundResult};

use super::{Game, GameState};

impl Game {
    /// Whether any hand still needs the dealer to finish.
    fn any_live_hands(&self) -> bool {
        self.hands
            .iter()
            .any(|hand| !hand.is_busted() && !hand.is_surrendered())
    }

    /// Dealer plays their hand according to the rules.
    ///
    /// Runs on its own once the last hand finishes; call it directly only
    /// to retry after the shoe ran dry mid-draw. The hole card is turned
    /// over and counted, then the dealer draws below 17 and on soft 17
    /// unless `stand_on_soft_17` is set. Nothing is drawn when every hand
    /// busted or surrendered.
    ///
    /// Returns the cards drawn by the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the dealer's turn or the shoe is empty
    /// while the dealer must draw.
    pub fn play_dealer(&mut self) -> Result<Vec<Card>, SettleError> {
        if self.state != GameState::DealerTurn {
            return Err(SettleError::InvalidState);
        }

        self.reveal_hole();

        let mut drawn = Vec::new();
        if self.any_live_hands() {
            while self.dealer.should_hit(self.options.stand_on_soft_17) {
                let card = self.deal_visible()?;
                self.dealer.add_card(card);
                drawn.push(card);
                log::debug!("dealer draws {card}, total {}", self.dealer.value());
            }
        }

        self.settle();
        Ok(drawn)
    }

    /// Settles every hand and pays the bankroll.
    pub(super) fn settle(&mut self) {
        let lines = self
            .hands
            .iter_mut()
            .enumerate()
            .map(|(index, hand)| result::settle_hand(index, hand, &self.dealer, &self.options))
            .collect();
        let round = RoundResult::from_hands(lines, &self.dealer);

        self.bankroll += round.total_payout;
        log::info!(
            "round settled: dealer {}, net {}, bankroll {}",
            round.dealer_value,
            round.net,
            self.bankroll
        );
        self.last_result = Some(round);
        self.state = GameState::Settled;
    }

    /// Clears the table and reopens betting.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not settled.
    pub fn next_hand(&mut self) -> Result<(), BetError> {
        if self.state != GameState::Settled {
            return Err(BetError::InvalidState);
        }
        self.hands.clear();
        self.active = 0;
        self.dealer.clear();
        self.state = GameState::Betting;
        Ok(())
    }
}
