//! Round state.

/// Where a single-player round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Chips may be added or cleared; dealing starts the round.
    Betting,
    /// The player acts on the active hand.
    PlayerTurn,
    /// Every hand is finished and the dealer draws.
    ///
    /// Only observable if the shoe ran dry mid-draw.
    DealerTurn,
    /// Payouts are made; [`Game::next_hand`](super::Game::next_hand) reopens betting.
    Settled,
}
