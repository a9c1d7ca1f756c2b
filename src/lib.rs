//! A blackjack training engine with optional `no_std` support.
//!
//! The crate covers what a card-counting and basic-strategy trainer needs:
//! a penetration-aware [`Shoe`], Hi-Lo counting through [`Counter`],
//! basic-strategy charts with count-based index plays in [`strategy`], a
//! single-player round engine in [`Game`], drills and session grading in
//! [`training`], and a host-authoritative multiplayer table in [`table`].
//!
//! # Example
//!
//! ```
//! use bjtrain::{Action, Game, GameOptions, GameState, TrainingOptions};
//!
//! let mut game = Game::new(GameOptions::classic(), TrainingOptions::default(), 7);
//! game.add_chip(25).unwrap();
//! game.deal().unwrap();
//!
//! while game.state() == GameState::PlayerTurn {
//!     let action = game.recommendation().unwrap_or(Action::Stand);
//!     let feedback = game.act(action).unwrap();
//!     assert!(feedback.correct);
//! }
//! assert_eq!(game.state(), GameState::Settled);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod counting;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod result;
pub mod shoe;
pub mod strategy;
pub mod table;
pub mod training;
mod sync;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use counting::Counter;
pub use error::{ActionError, BetError, DealError, HostError, SettleError, ShoeError};
pub use game::{Game, GameState};
pub use hand::{DealerHand, Hand, HandStatus, recreate_hand};
pub use options::{GameOptions, RoundingMode, TrainingOptions};
pub use result::{HandOutcome, HandResult, RoundResult};
pub use shoe::{Deck, Shoe};
pub use strategy::{Action, Allowed, Decision};
pub use table::{
    Event, EventQueue, Host, Phase, PlayerAction, PlayerId, Replica, TableState, Transport,
};
pub use training::{CountCheck, CountingDrill, Feedback, Mistake, SessionStats, StrategyDrill};
