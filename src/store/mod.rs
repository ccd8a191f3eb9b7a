//! Key-addressed storage for round state.
//!
//! The engine talks to its backing store through [`GameStore`], a deliberately
//! narrow contract: per-room scalar slots, per-room card piles, and one atomic
//! batch move between piles. Every key is structured (`(room, field)` or
//! `(room, pile)`), so two rooms can never collide and a hand can never alias
//! a seat's identity slot. No game rules live behind this trait.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::game::{Card, Seat};

mod memory;

pub use memory::MemoryStore;

/// Scalar slots a room owns. Values cross the trait as opaque strings; the
/// engine owns every encoding.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScalarField {
    /// Seat whose turn it is.
    CurrentSeat,
    /// Seat that made the most recent accepted play.
    LastSeat,
    /// Classification of the combination currently on the board.
    BoardKind,
    /// Highest card of the most recent accepted play.
    TopCard,
    /// The card that must open the round.
    LowestDealt,
    /// External identity bound to a seat at deal time.
    SeatIdentity(Seat),
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::CurrentSeat => write!(f, "current"),
            Self::LastSeat => write!(f, "last"),
            Self::BoardKind => write!(f, "board_kind"),
            Self::TopCard => write!(f, "top"),
            Self::LowestDealt => write!(f, "lowest"),
            Self::SeatIdentity(seat) => write!(f, "identity:{seat}"),
        }
    }
}

/// Card piles a room owns.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Pile {
    Hand(Seat),
    Board,
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unreachable(String),
    #[error("store operation failed: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Backing store contract. Implementations hold no rules; they move and
/// remember exactly what they are told to.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Read a scalar slot, `None` when unset.
    async fn scalar(&self, room: &str, field: ScalarField) -> StoreResult<Option<String>>;

    /// Write a scalar slot, replacing any previous value.
    async fn set_scalar(&self, room: &str, field: ScalarField, value: &str) -> StoreResult<()>;

    /// Unset a scalar slot. Clearing an absent slot is not an error.
    async fn clear_scalar(&self, room: &str, field: ScalarField) -> StoreResult<()>;

    /// Members of a pile in ascending card order; empty when absent.
    async fn members(&self, room: &str, pile: Pile) -> StoreResult<Vec<Card>>;

    /// Add cards to a pile. Piles are sets; re-adding a member is a no-op.
    async fn add_members(&self, room: &str, pile: Pile, cards: &[Card]) -> StoreResult<()>;

    /// Empty a pile, discarding its members.
    async fn clear_pile(&self, room: &str, pile: Pile) -> StoreResult<()>;

    /// Move a card batch between piles as one atomic step. `Ok(false)`
    /// reports a batch that was not fully present in the source pile (or
    /// that repeats a card); nothing moves in that case.
    async fn move_members(
        &self,
        room: &str,
        from: Pile,
        to: Pile,
        cards: &[Card],
    ) -> StoreResult<bool>;

    /// Drop every slot and pile the room owns.
    async fn wipe_room(&self, room: &str) -> StoreResult<()>;
}
