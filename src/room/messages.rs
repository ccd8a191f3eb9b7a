//! Room actor command types.

use tokio::sync::oneshot;

use crate::game::{
    Card, DealOverrides, EngineResult, PassOutcome, PlayOutcome, PlayerId, RoundStart, RoundView,
    Seat,
};

/// Commands a room actor consumes. Every request carries a oneshot sender
/// that the actor answers on; a dropped receiver just discards the reply.
#[derive(Debug)]
pub enum RoomCommand {
    /// Deal a fresh round, replacing whatever the room held.
    Initialize {
        identities: Vec<PlayerId>,
        overrides: DealOverrides,
        reply: oneshot::Sender<EngineResult<RoundStart>>,
    },

    /// Play cards for a seat.
    Play {
        seat: Seat,
        cards: Vec<Card>,
        reply: oneshot::Sender<EngineResult<PlayOutcome>>,
    },

    /// Pass the turn for a seat.
    Pass {
        seat: Seat,
        reply: oneshot::Sender<EngineResult<PassOutcome>>,
    },

    /// Snapshot the round for a seat, or for a spectator when `None`.
    View {
        seat: Option<Seat>,
        reply: oneshot::Sender<EngineResult<RoundView>>,
    },

    /// Stop the actor. Stored round state stays behind in the store.
    Close { reply: oneshot::Sender<()> },
}
