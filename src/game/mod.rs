//! Core game rules: cards, combinations, and the turn state machine.
//!
//! This module provides:
//! - Card, rank, and suit values with the game's total order
//! - Combination classification (pairs, triples, runs, four of a kind)
//! - The rule engine applying deals, plays, and passes to a room's state

pub mod cards;
pub mod combos;
pub mod constants;
pub mod engine;
pub mod seats;

pub use cards::{standard_deck, Card, ParseCardError, Rank, Suit};
pub use combos::{classify, Combination, ParseCombinationError};
pub use engine::{
    DealOverrides, EngineError, EngineResult, GameEngine, PassOutcome, PassSnapshot, PlayOutcome,
    PlaySnapshot, PlayerId, RejectReason, RoomId, RoundStart, RoundView,
};
pub use seats::{Seat, SeatOutOfRange};
