use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::HostError;
use crate::options::GameOptions;
use crate::shoe::Shoe;
use crate::strategy::Action;
use crate::sync::Mutex;

use super::{Event, Phase, PlayerAction, PlayerId, TableState, Transport};

/// The single writer of a multiplayer table.
///
/// The host applies proposed actions one at a time in the order they
/// arrive and publishes the full [`TableState`] after every accepted
/// change. Rejected actions are dropped: the error is returned to the
/// caller and nothing is published.
pub struct Host<T: Transport> {
    id: PlayerId,
    options: GameOptions,
    state: Mutex<TableState>,
    rng: Mutex<ChaCha8Rng>,
    transport: T,
}

impl<T: Transport> Host<T> {
    /// Opens a table with the host in the first seat.
    #[must_use]
    pub fn new(id: PlayerId, options: GameOptions, seed: u64, transport: T) -> Self {
        let mut state = TableState::new();
        if let Err(err) = state.seat(id.clone(), options.starting_bankroll) {
            log::debug!("host {id} not seated: {err}");
        }
        Self::from_snapshot(id, options, state, seed, transport)
    }

    /// Takes over a table from its latest snapshot.
    ///
    /// Any participant holding the last broadcast can become host; the round
    /// continues from exactly that state.
    #[must_use]
    pub fn from_snapshot(
        id: PlayerId,
        options: GameOptions,
        state: TableState,
        seed: u64,
        transport: T,
    ) -> Self {
        log::info!("{id} hosts a table of {} seats", state.seats.len());
        Self {
            id,
            options,
            state: Mutex::new(state),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            transport,
        }
    }

    /// The host's own id.
    #[must_use]
    pub const fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Table rules.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// The transport snapshots are published on.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TableState {
        self.state.with(|state| state.clone())
    }

    /// Publishes the current state.
    pub fn broadcast(&self) {
        let snapshot = self.snapshot();
        self.transport.publish(&Event::GameState(snapshot));
    }

    /// Seats `player` with the default bankroll.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is already seated or the table is full.
    pub fn seat(&self, player: PlayerId) -> Result<(), HostError> {
        self.state
            .with(|state| state.seat(player.clone(), self.options.starting_bankroll))?;
        log::debug!("{player} takes a seat");
        self.broadcast();
        Ok(())
    }

    /// Removes `player` from the table.
    ///
    /// Their hands leave with them. If it was their turn the next seat
    /// plays; if everyone left has bet, the round is dealt.
    pub fn leave(&self, player: &PlayerId) -> bool {
        let seated = self.state.with(|state| {
            if !state.leave(player, &self.options) {
                return false;
            }
            self.finish_dealer(state);
            if let Err(err) = self.deal_if_ready(state) {
                log::debug!("deal after {player} left failed: {err}");
            }
            true
        });
        if !seated {
            return false;
        }
        log::debug!("{player} left the table");
        self.broadcast();
        true
    }

    /// Applies an action proposed by `from`.
    ///
    /// A bet that completes the table deals the round. Rejected actions
    /// change nothing and publish nothing.
    ///
    /// # Errors
    ///
    /// Returns the reason the action was dropped.
    pub fn handle(&self, from: &PlayerId, action: PlayerAction) -> Result<(), HostError> {
        let applied = self.state.with(|state| self.apply(state, from, action));
        match applied {
            Ok(()) => {
                self.broadcast();
                Ok(())
            }
            Err(err) => {
                log::debug!("dropped {action:?} from {from}: {err}");
                Err(err)
            }
        }
    }

    fn apply(
        &self,
        state: &mut TableState,
        from: &PlayerId,
        action: PlayerAction,
    ) -> Result<(), HostError> {
        let action = match action {
            PlayerAction::Bet { amount } => {
                state.place_bet(from, amount)?;
                // The bet stays placed even if the deal has to wait.
                if let Err(err) = self.deal_if_ready(state) {
                    log::debug!("deal postponed: {err}");
                }
                return Ok(());
            }
            PlayerAction::Hit => Action::Hit,
            PlayerAction::Stand => Action::Stand,
            PlayerAction::Double => Action::Double,
            PlayerAction::Split => Action::Split,
            PlayerAction::Surrender => Action::Surrender,
        };
        let short = state.phase == Phase::Playing && state.shoe.len() < 2;
        let stack = short.then(|| (state.shoe.clone(), state.cards_dealt));
        if short {
            self.restock(state);
        }
        if let Err(err) = state.act(from, action, &self.options) {
            // Rejected actions leave the table as it was.
            if let Some((shoe, cards_dealt)) = stack {
                state.shoe = shoe;
                state.cards_dealt = cards_dealt;
            }
            return Err(err.into());
        }
        self.finish_dealer(state);
        Ok(())
    }

    /// Deals once every seat has bet, each round from a fresh shoe.
    fn deal_if_ready(&self, state: &mut TableState) -> Result<(), HostError> {
        if state.phase != Phase::Betting || !state.all_bets_in() {
            return Ok(());
        }
        if state.needs_fresh_shoe() {
            state.refill(self.fresh_shoe());
        }
        state.deal(&self.options)?;
        Ok(())
    }

    fn fresh_shoe(&self) -> Shoe {
        let seed = self.rng.with(|rng| rng.random());
        Shoe::new(self.options.decks, self.options.penetration, seed)
    }

    /// Rebuilds a short stack from a fresh shoe without the table's cards.
    fn restock(&self, state: &mut TableState) {
        state.restock(self.fresh_shoe());
    }

    /// Completes a dealer turn that stopped on an empty stack.
    fn finish_dealer(&self, state: &mut TableState) {
        if state.phase != Phase::Dealer {
            return;
        }
        self.restock(state);
        if let Err(err) = state.play_dealer(&self.options) {
            log::debug!("dealer still waiting: {err}");
        }
    }

    /// Handles an event from the channel.
    ///
    /// Snapshots are ignored: the host is the only writer.
    ///
    /// # Errors
    ///
    /// Returns the reason a proposed action was dropped.
    pub fn receive(&self, event: &Event) -> Result<(), HostError> {
        match event {
            Event::PlayerAction { player_id, action } => self.handle(player_id, *action),
            Event::GameState(_) => Ok(()),
        }
    }

    /// Starts the next betting round. Only the host may do this.
    ///
    /// # Errors
    ///
    /// Returns an error if `by` is not the host or the round is not settled.
    pub fn next_round(&self, by: &PlayerId) -> Result<(), HostError> {
        if *by != self.id {
            return Err(HostError::NotHost);
        }
        self.state.with(TableState::next_round)?;
        log::debug!("next round opened");
        self.broadcast();
        Ok(())
    }
}
