use alloc::vec::Vec;

use crate::card::Card;
use crate::error::{ActionError, BetError, DealError, HostError, SettleError, ShoeError};
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::result::{self, HandOutcome, HandResult, RoundResult};
use crate::shoe::Shoe;
use crate::strategy::Action;

use super::{Phase, PlayerId, TableState};

impl TableState {
    /// Deals the top card of the shared stack.
    fn draw(&mut self) -> Result<Card, ShoeError> {
        let card = self.shoe.pop().ok_or(ShoeError::Empty)?;
        self.cards_dealt += 1;
        Ok(card)
    }

    /// Replaces the stack with a shoe's undealt cards.
    pub fn refill(&mut self, shoe: Shoe) {
        self.shoe = shoe.into_stack();
        self.cards_dealt = 0;
    }

    /// Restocks a stack that ran short mid-round.
    ///
    /// The new stack is `shoe` minus one copy of every card still on the
    /// table, so the table never holds more cards than its packs.
    pub fn restock(&mut self, shoe: Shoe) {
        let mut stack = shoe.into_stack();
        let on_table = self
            .hands
            .values()
            .flatten()
            .flat_map(Hand::cards)
            .chain(self.dealer_hand.cards());
        let mut dealt = 0;
        for card in on_table {
            if let Some(position) = stack.iter().position(|candidate| candidate == card) {
                stack.remove(position);
            }
            dealt += 1;
        }
        log::info!("stack restocked: {} cards, {dealt} on the table", stack.len());
        self.shoe = stack;
        self.cards_dealt = dealt;
    }

    /// First hand of `player` still waiting to act.
    fn pending_hand(&self, player: &PlayerId) -> Option<usize> {
        self.hands.get(player)?.iter().position(Hand::is_active)
    }

    /// Records a bet for `player` and takes it from their bankroll.
    ///
    /// # Errors
    ///
    /// Returns an error if betting is closed, the player is not seated, the
    /// amount is zero, the player already bet, or the bankroll is short.
    pub fn place_bet(&mut self, player: &PlayerId, amount: usize) -> Result<(), BetError> {
        if self.phase != Phase::Betting {
            return Err(BetError::InvalidState);
        }
        let bankroll = self.bankroll(player).ok_or(BetError::PlayerNotFound)?;
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }
        if self.bet(player).unwrap_or(0) > 0 {
            return Err(BetError::AlreadyBet);
        }
        if amount > bankroll {
            return Err(BetError::InsufficientFunds);
        }

        self.bankrolls.insert(player.clone(), bankroll - amount);
        self.bets.insert(player.clone(), amount);
        log::debug!("{player} bets {amount}");
        Ok(())
    }

    /// Deals two cards to every seat and two to the dealer, round-robin.
    ///
    /// The turn goes to the first seat with a hand to play; blackjacks are
    /// skipped. When nobody has to act the dealer plays at once.
    ///
    /// # Errors
    ///
    /// Returns an error if betting is not open, a seat has no bet yet, or the
    /// stack cannot cover the deal.
    pub fn deal(&mut self, options: &GameOptions) -> Result<(), DealError> {
        if self.phase != Phase::Betting {
            return Err(DealError::InvalidState);
        }
        if !self.all_bets_in() {
            return Err(DealError::BetsPending);
        }
        if self.shoe.len() < (self.seats.len() + 1) * 2 {
            return Err(DealError::NotEnoughCards);
        }

        self.hands.clear();
        self.current_hand_index.clear();
        self.dealer_hand.clear();
        for player in &self.seats {
            let bet = self.bets.get(player).copied().unwrap_or(0);
            self.hands.insert(player.clone(), alloc::vec![Hand::new(bet)]);
            self.current_hand_index.insert(player.clone(), 0);
        }

        for _ in 0..2 {
            for seat in 0..self.seats.len() {
                let card = self.draw()?;
                if let Some(hands) = self.hands.get_mut(&self.seats[seat]) {
                    hands[0].add_card(card);
                }
            }
            let card = self.draw()?;
            self.dealer_hand.add_card(card);
        }

        self.phase = Phase::Playing;
        self.current_player_id = None;
        log::debug!(
            "dealt {} seats, dealer shows {}",
            self.seats.len(),
            self.dealer_hand.visible_value()
        );

        // Only blackjacks skip every seat, and the dealer never draws to them.
        self.pass_turn_from(0, options)
            .map_err(|_| DealError::NotEnoughCards)
    }

    /// Loads `draws` (first card dealt first) and deals from it.
    ///
    /// # Errors
    ///
    /// Same as [`TableState::deal`].
    pub fn deal_from(&mut self, draws: &[Card], options: &GameOptions) -> Result<(), DealError> {
        self.load_shoe(draws);
        self.deal(options)
    }

    /// Hands the turn to the first seat at or after `seat` with a pending
    /// hand, or to the dealer when there is none.
    pub(super) fn pass_turn_from(
        &mut self,
        seat: usize,
        options: &GameOptions,
    ) -> Result<(), SettleError> {
        if self.phase != Phase::Playing {
            return Ok(());
        }
        let next = self.seats.iter().skip(seat).find_map(|player| {
            self.pending_hand(player)
                .map(|index| (player.clone(), index))
        });

        match next {
            Some((player, index)) => {
                self.current_hand_index.insert(player.clone(), index);
                self.current_player_id = Some(player);
                Ok(())
            }
            None => {
                self.current_player_id = None;
                self.phase = Phase::Dealer;
                self.play_dealer(options)
            }
        }
    }

    /// Moves to the player's next split hand, else to the next seat.
    fn advance(&mut self, player: &PlayerId, options: &GameOptions) -> Result<(), SettleError> {
        if let Some(index) = self.pending_hand(player) {
            self.current_hand_index.insert(player.clone(), index);
            return Ok(());
        }
        let seat = self
            .seats
            .iter()
            .position(|id| id == player)
            .map_or(self.seats.len(), |seat| seat + 1);
        self.pass_turn_from(seat, options)
    }

    /// Applies one action from `player` on their current hand.
    ///
    /// Rejected actions leave the state untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if nobody is playing, it is not the player's turn,
    /// the action is not allowed on the hand, the bankroll cannot cover a
    /// double or split, or the stack runs dry.
    pub fn act(
        &mut self,
        player: &PlayerId,
        action: Action,
        options: &GameOptions,
    ) -> Result<(), ActionError> {
        if self.phase != Phase::Playing {
            return Err(ActionError::InvalidState);
        }
        if self.current_player_id.as_ref() != Some(player) {
            return Err(ActionError::NotYourTurn);
        }
        let index = self.hand_index(player).ok_or(ActionError::PlayerNotFound)?;
        let bankroll = self.bankroll(player).ok_or(ActionError::PlayerNotFound)?;
        let hand = self
            .hands
            .get(player)
            .and_then(|hands| hands.get(index))
            .ok_or(ActionError::HandNotFound)?;
        if !hand.is_active() {
            return Err(ActionError::HandNotActive);
        }

        let bet = hand.bet();
        match action {
            Action::Hit => {
                let card = self.draw()?;
                let hand = self.hand_mut(player, index)?;
                hand.add_card(card);
                if hand.value() == 21 {
                    hand.stand();
                }
                log::debug!("{player} hits {card}, hand {index} now {}", hand.value());
            }
            Action::Stand => {
                self.hand_mut(player, index)?.stand();
                log::debug!("{player} stands on hand {index}");
            }
            Action::Double => {
                if !hand.can_double(options.double_after_split) {
                    return Err(ActionError::CannotDouble);
                }
                if bankroll < bet {
                    return Err(ActionError::InsufficientFunds);
                }
                let card = self.draw()?;
                self.bankrolls.insert(player.clone(), bankroll - bet);
                self.hand_mut(player, index)?.double_down(card);
                log::debug!("{player} doubles hand {index}: {card}");
            }
            Action::Split => {
                if !options.split || !hand.can_split() {
                    return Err(ActionError::CannotSplit);
                }
                if bankroll < bet {
                    return Err(ActionError::InsufficientFunds);
                }
                if self.shoe.len() < 2 {
                    return Err(ActionError::NoCards);
                }
                self.split(player, index, bet)?;
                self.bankrolls.insert(player.clone(), bankroll - bet);
                log::debug!("{player} splits hand {index}");
            }
            Action::Surrender => {
                if !options.surrender || !hand.can_surrender() {
                    return Err(ActionError::CannotSurrender);
                }
                let hand = self.hand_mut(player, index)?;
                hand.surrender();
                hand.set_result(HandOutcome::Surrendered);
                log::debug!("{player} surrenders hand {index}");
            }
        }

        // The action stands even if the dealer cannot finish; the host
        // restocks the stack and retries.
        if let Err(err) = self.advance(player, options) {
            log::debug!("dealer waiting for cards: {err}");
        }
        Ok(())
    }

    fn hand_mut(&mut self, player: &PlayerId, index: usize) -> Result<&mut Hand, ActionError> {
        self.hands
            .get_mut(player)
            .and_then(|hands| hands.get_mut(index))
            .ok_or(ActionError::HandNotFound)
    }

    /// Splits `player`'s hand at `index`, one fresh card to each half.
    fn split(&mut self, player: &PlayerId, index: usize, bet: usize) -> Result<(), ActionError> {
        let first = self.draw()?;
        let second = self.draw()?;

        let hands = self.hands.get_mut(player).ok_or(ActionError::PlayerNotFound)?;
        let hand = hands.get_mut(index).ok_or(ActionError::HandNotFound)?;
        let moved = hand.take_split_card().ok_or(ActionError::CannotSplit)?;
        hand.add_card(first);
        if hand.value() == 21 {
            hand.stand();
        }

        let mut new_hand = Hand::from_split(moved, bet);
        new_hand.add_card(second);
        if new_hand.value() == 21 {
            new_hand.stand();
        }
        hands.insert(index + 1, new_hand);
        Ok(())
    }

    /// Whether any dealt hand needs the dealer's final total.
    fn any_live_hands(&self) -> bool {
        self.hands
            .values()
            .flatten()
            .any(|hand| !hand.is_busted() && !hand.is_surrendered() && !hand.is_blackjack())
    }

    /// Reveals the hole card, draws to the dealer rule from the shared stack
    /// and settles every seat.
    ///
    /// Runs on its own once the last hand finishes; call it directly only to
    /// retry after the stack ran dry.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the dealer's turn or the stack is empty
    /// while the dealer must draw.
    pub fn play_dealer(&mut self, options: &GameOptions) -> Result<(), SettleError> {
        if self.phase != Phase::Dealer {
            return Err(SettleError::InvalidState);
        }
        self.dealer_hand.reveal_hole();

        if self.any_live_hands() {
            while self.dealer_hand.should_hit(options.stand_on_soft_17) {
                let card = self.draw()?;
                self.dealer_hand.add_card(card);
                log::debug!("dealer draws {card}, total {}", self.dealer_hand.value());
            }
        }

        self.settle(options);
        Ok(())
    }

    /// Settles every hand of every seat and pays the bankrolls.
    fn settle(&mut self, options: &GameOptions) {
        for player in &self.seats {
            let Some(hands) = self.hands.get_mut(player) else {
                continue;
            };
            let lines = hands
                .iter_mut()
                .enumerate()
                .map(|(index, hand)| result::settle_hand(index, hand, &self.dealer_hand, options))
                .collect();
            let round = RoundResult::from_hands(lines, &self.dealer_hand);
            if let Some(bankroll) = self.bankrolls.get_mut(player) {
                *bankroll += round.total_payout;
            }
            log::info!("{player} settled: net {}", round.net);
        }
        self.phase = Phase::Results;
        self.current_player_id = None;
    }

    /// Per-seat results of the settled round.
    ///
    /// Reads the outcome recorded on each hand; empty until the round is
    /// settled.
    #[must_use]
    pub fn results(&self, options: &GameOptions) -> Vec<(PlayerId, RoundResult)> {
        if self.phase != Phase::Results {
            return Vec::new();
        }
        self.seats
            .iter()
            .filter_map(|player| {
                let hands = self.hands.get(player)?;
                let lines = hands
                    .iter()
                    .enumerate()
                    .filter_map(|(index, hand)| {
                        let outcome = hand.result()?;
                        Some(HandResult {
                            hand_index: index,
                            outcome,
                            bet: hand.bet(),
                            payout: result::payout(outcome, hand.bet(), options),
                            player_value: hand.value(),
                            dealer_value: self.dealer_hand.value(),
                        })
                    })
                    .collect();
                Some((player.clone(), RoundResult::from_hands(lines, &self.dealer_hand)))
            })
            .collect()
    }

    /// Clears the table for the next round, keeping seats and bankrolls.
    ///
    /// # Errors
    ///
    /// Returns an error unless the round is settled.
    pub fn next_round(&mut self) -> Result<(), HostError> {
        if self.phase != Phase::Results {
            return Err(HostError::InvalidPhase);
        }
        self.hands.clear();
        self.current_hand_index.clear();
        self.dealer_hand.clear();
        for bet in self.bets.values_mut() {
            *bet = 0;
        }
        self.current_player_id = None;
        self.phase = Phase::Betting;
        Ok(())
    }
}
