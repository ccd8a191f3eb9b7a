//! # Tien Len
//!
//! A Tien Len ("Thirteen") card game engine: dealing, combination
//! classification, move validation, turn rotation, and round-resets for
//! four-seat rooms mutated by concurrent connections.
//!
//! The engine holds authoritative per-room state behind a narrow
//! key-addressed store and never trusts callers with rule decisions: a
//! transport hands it commands, gets back accepted snapshots or rejections
//! with reasons, and broadcasts the result itself.
//!
//! ## Architecture
//!
//! - **Cards and combinations** ([`game`]): the total order over the 52-card
//!   domain (twos high, spades low) and the classifier for pairs, triples,
//!   runs, and four of a kind.
//! - **Turn state machine** ([`game::engine`]): deals rounds, gates the
//!   opening play on the lowest dealt card, enforces board type and top-card
//!   beats, rotates seats modulo four, and resets the board after a full
//!   circuit of passes. Hand-to-board moves are atomic: a play either lands
//!   whole or not at all.
//! - **Store** ([`store`]): the [`store::GameStore`] contract plus an
//!   in-process [`store::MemoryStore`]. All state lives here; the engine is
//!   stateless between calls.
//! - **Rooms** ([`room`]): one single-writer actor per room serializes every
//!   mutation, closing the check-then-act races a shared store invites; a
//!   manager spawns actors and routes request/reply commands.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tien_len::{DealOverrides, GameEngine, MemoryStore, Seat};
//!
//! let engine = GameEngine::new(Arc::new(MemoryStore::new()), 5);
//! let players = vec!["ha".into(), "tuan".into(), "mai".into(), "linh".into()];
//! let start = engine.initialize("room-1", &players, DealOverrides::default()).await?;
//!
//! // Whoever holds the lowest dealt card opens the round with it.
//! let opener = Seat::ALL[0];
//! engine.play_cards("room-1", opener, &[start.lowest_dealt]).await?;
//! ```

/// Core game logic: cards, combinations, and the turn state machine.
pub mod game;
pub use game::{
    classify, standard_deck, Card, Combination, DealOverrides, EngineError, EngineResult,
    GameEngine, ParseCardError, PassOutcome, PassSnapshot, PlayOutcome, PlaySnapshot, PlayerId,
    Rank, RejectReason, RoomId, RoundStart, RoundView, Seat, Suit,
    constants::{self, DECK_SIZE, DEFAULT_HAND_SIZE},
};

/// Key-addressed round state storage.
pub mod store;
pub use store::{GameStore, MemoryStore, Pile, ScalarField, StoreError};

/// Room actors and the registry that spawns them.
pub mod room;
pub use room::{RoomConfig, RoomError, RoomHandle, RoomManager};
