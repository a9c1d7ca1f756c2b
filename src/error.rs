//! Error types for engine operations.

use thiserror::Error;

/// Errors raised by the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// No cards are left to deal.
    #[error("the shoe is empty")]
    Empty,
}

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Insufficient funds.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// The player already placed a bet this round.
    #[error("bet already placed this round")]
    AlreadyBet,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid game state for dealing.
    #[error("invalid game state for dealing")]
    InvalidState,
    /// No bet has been placed.
    #[error("no bet has been placed")]
    NoBet,
    /// Not every seated player has placed a bet.
    #[error("not every seated player has bet")]
    BetsPending,
    /// Not enough cards in the shoe.
    #[error("not enough cards in the shoe")]
    NotEnoughCards,
}

impl From<ShoeError> for DealError {
    fn from(_: ShoeError) -> Self {
        Self::NotEnoughCards
    }
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Not this player's turn.
    #[error("not this player's turn")]
    NotYourTurn,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// Hand is not active.
    #[error("hand is not active")]
    HandNotActive,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Cannot surrender at this point.
    #[error("cannot surrender at this point")]
    CannotSurrender,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
}

impl From<ShoeError> for ActionError {
    fn from(_: ShoeError) -> Self {
        Self::NoCards
    }
}

/// Errors that can occur while the dealer plays or the round settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettleError {
    /// Invalid game state for settlement.
    #[error("invalid game state for settlement")]
    InvalidState,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
}

impl From<ShoeError> for SettleError {
    fn from(_: ShoeError) -> Self {
        Self::NoCards
    }
}

impl From<SettleError> for ActionError {
    fn from(err: SettleError) -> Self {
        match err {
            SettleError::InvalidState => Self::InvalidState,
            SettleError::NoCards => Self::NoCards,
        }
    }
}

/// Errors raised by the multiplayer host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HostError {
    /// Only the host may perform this operation.
    #[error("only the host may do this")]
    NotHost,
    /// The table is full.
    #[error("the table is full")]
    TableFull,
    /// The player is already seated.
    #[error("player is already seated")]
    AlreadySeated,
    /// Invalid table phase for this operation.
    #[error("invalid table phase")]
    InvalidPhase,
    /// The action was rejected.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// The bet was rejected.
    #[error(transparent)]
    Bet(#[from] BetError),
    /// The deal failed.
    #[error(transparent)]
    Deal(#[from] DealError),
}
