//! The rule engine and turn state machine.
//!
//! A [`GameEngine`] validates moves and mutates one room's round state
//! through a [`GameStore`]. It never broadcasts and never retries; callers
//! get back either an accepted snapshot, a rejection carrying its reason, or
//! a hard [`EngineError`] when the store itself fails. Rejections leave the
//! room untouched.
//!
//! The engine itself does not serialize concurrent callers. Route every
//! mutation for a room through one [`crate::room::RoomActor`] (or another
//! single-writer arrangement) so that two commands can never interleave
//! between the reads and the writes of a move.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::Arc};

use thiserror::Error;

use super::cards::{standard_deck, Card};
use super::combos::{classify, Combination};
use super::seats::Seat;
use crate::store::{GameStore, Pile, ScalarField, StoreError};

/// Identifier of a room, chosen by the caller.
pub type RoomId = String;

/// External identity of a connected player (a socket or session id). The
/// engine stores it per seat and otherwise leaves it opaque.
pub type PlayerId = String;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("room {room}: stored {field} is corrupt: {value:?}")]
    Corrupt {
        room: String,
        field: String,
        value: String,
    },
    #[error("a round seats 1 to 4 players, got {0}")]
    PlayerCount(usize),
    #[error("hands override covers {got} seats, round has {expected}")]
    HandsMismatch { expected: usize, got: usize },
    #[error("deck of {deck} cards cannot deal {hand_size} to each of {seats} seats")]
    DeckExhausted {
        deck: usize,
        hand_size: usize,
        seats: usize,
    },
    #[error("no cards dealt, nothing can open the round")]
    EmptyDeal,
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Why a move was turned down. Rejections are ordinary results, not errors;
/// the room's state is exactly as it was before the attempt.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("no cards were played")]
    EmptyPlay,
    #[error("the round has not been dealt")]
    RoundNotStarted,
    #[error("not this seat's turn")]
    OutOfTurn,
    #[error("the opening play must include the lowest dealt card")]
    MissingLowest,
    #[error("the cards are not a recognized combination")]
    Unrecognized,
    #[error("the combination does not match the board")]
    WrongKind,
    #[error("the play does not beat the top card")]
    TooLow,
    #[error("the seat does not hold every played card")]
    NotHeld,
}

/// Board and turn pointers after an accepted play.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlaySnapshot {
    pub board: Vec<Card>,
    pub kind: Combination,
    pub top: Card,
    pub current: Seat,
    pub last: Seat,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlayOutcome {
    Accepted(PlaySnapshot),
    Rejected(RejectReason),
}

impl PlayOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    #[must_use]
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            Self::Accepted(_) => None,
        }
    }
}

/// Turn pointer after an accepted pass. `board_reset` marks the pass that
/// closed a full circuit and cleared the board.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PassSnapshot {
    pub current: Seat,
    pub board_reset: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PassOutcome {
    Accepted(PassSnapshot),
    Rejected(RejectReason),
}

impl PassOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    #[must_use]
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            Self::Accepted(_) => None,
        }
    }
}

/// Summary returned by a successful deal, carrying what the caller persists
/// and announces to the table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoundStart {
    pub seats: Vec<Seat>,
    pub lowest_dealt: Card,
    pub hand_size: u8,
}

/// One seat's picture of the round: the shared board and pointers, that
/// seat's own cards, and how many cards everyone holds.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoundView {
    pub board: Vec<Card>,
    pub current: Option<Seat>,
    pub last: Option<Seat>,
    pub hand: Vec<Card>,
    pub hand_counts: [usize; Seat::COUNT],
}

/// Deterministic-deal hooks for tests and replays. `deck` narrows the pool
/// that random hands draw from; `hands` pins every hand exactly and wins
/// over `deck`; `lowest` overrides the computed lowest dealt card.
#[derive(Clone, Debug, Default)]
pub struct DealOverrides {
    pub deck: Option<Vec<Card>>,
    pub hands: Option<Vec<Vec<Card>>>,
    pub lowest: Option<Card>,
}

/// Rule engine for one store. Cheap to clone per room; all state lives
/// behind the store.
#[derive(Debug)]
pub struct GameEngine<S> {
    store: Arc<S>,
    hand_size: u8,
}

impl<S> Clone for GameEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hand_size: self.hand_size,
        }
    }
}

impl<S: GameStore> GameEngine<S> {
    #[must_use]
    pub fn new(store: Arc<S>, hand_size: u8) -> Self {
        Self { store, hand_size }
    }

    /// Deal a fresh round into `room`, wiping whatever a previous round
    /// left there. Seats are assigned in `identities` order starting at
    /// seat 1; the turn stays unclaimed until the first accepted play.
    pub async fn initialize(
        &self,
        room: &str,
        identities: &[PlayerId],
        overrides: DealOverrides,
    ) -> EngineResult<RoundStart> {
        let seat_count = identities.len();
        if seat_count == 0 || seat_count > Seat::COUNT {
            return Err(EngineError::PlayerCount(seat_count));
        }
        if let Some(hands) = &overrides.hands {
            if hands.len() != seat_count {
                return Err(EngineError::HandsMismatch {
                    expected: seat_count,
                    got: hands.len(),
                });
            }
        }

        self.store.wipe_room(room).await?;

        let hands = match overrides.hands {
            Some(hands) => hands,
            None => self.deal_hands(overrides.deck, seat_count)?,
        };

        let mut seats = Vec::with_capacity(seat_count);
        let mut lowest_seen: Option<Card> = None;
        for (idx, identity) in identities.iter().enumerate() {
            let seat = Seat::ALL[idx];
            self.store
                .add_members(room, Pile::Hand(seat), &hands[idx])
                .await?;
            self.store
                .set_scalar(room, ScalarField::SeatIdentity(seat), identity)
                .await?;
            if let Some(card) = hands[idx].iter().copied().min() {
                lowest_seen = Some(lowest_seen.map_or(card, |low| low.min(card)));
            }
            seats.push(seat);
        }

        let lowest_dealt = match overrides.lowest.or(lowest_seen) {
            Some(card) => card,
            None => return Err(EngineError::EmptyDeal),
        };
        self.store
            .set_scalar(room, ScalarField::LowestDealt, &lowest_dealt.to_string())
            .await?;

        log::info!("room {room}: dealt {seat_count} hands, {lowest_dealt} opens");
        Ok(RoundStart {
            seats,
            lowest_dealt,
            hand_size: self.hand_size,
        })
    }

    /// Play `cards` for `seat`.
    ///
    /// Before a turn holder exists the play must include the lowest dealt
    /// card, and the acting seat claims the turn; the seat number is taken
    /// on trust from the caller at that point. Afterwards only the turn
    /// holder may play, the combination must match the board (four of a
    /// kind excepted), and its highest card must beat the top card. The
    /// cards leave the hand for the board in one atomic step or not at all.
    pub async fn play_cards(
        &self,
        room: &str,
        seat: Seat,
        cards: &[Card],
    ) -> EngineResult<PlayOutcome> {
        use PlayOutcome::Rejected;

        let Some(highest) = cards.iter().copied().max() else {
            return Ok(Rejected(RejectReason::EmptyPlay));
        };

        let top: Option<Card> = self.read(room, ScalarField::TopCard).await?;
        let current: Option<Seat> = self.read(room, ScalarField::CurrentSeat).await?;
        let board_kind: Option<Combination> = self.read(room, ScalarField::BoardKind).await?;

        match current {
            Some(current) if current != seat => return Ok(Rejected(RejectReason::OutOfTurn)),
            Some(_) => {}
            None => {
                let lowest: Option<Card> = self.read(room, ScalarField::LowestDealt).await?;
                let Some(lowest) = lowest else {
                    return Ok(Rejected(RejectReason::RoundNotStarted));
                };
                if !cards.contains(&lowest) {
                    return Ok(Rejected(RejectReason::MissingLowest));
                }
            }
        }

        let Some(kind) = classify(cards) else {
            return Ok(Rejected(RejectReason::Unrecognized));
        };
        if top.is_some() && board_kind != Some(kind) && kind != Combination::FourOfAKind {
            return Ok(Rejected(RejectReason::WrongKind));
        }
        if let Some(top) = top {
            if highest <= top {
                return Ok(Rejected(RejectReason::TooLow));
            }
        }

        let moved = self
            .store
            .move_members(room, Pile::Hand(seat), Pile::Board, cards)
            .await?;
        if !moved {
            return Ok(Rejected(RejectReason::NotHeld));
        }

        let next = seat.next();
        self.store
            .set_scalar(room, ScalarField::BoardKind, kind.name())
            .await?;
        self.store
            .set_scalar(room, ScalarField::CurrentSeat, &next.to_string())
            .await?;
        self.store
            .set_scalar(room, ScalarField::LastSeat, &seat.to_string())
            .await?;
        self.store
            .set_scalar(room, ScalarField::TopCard, &highest.to_string())
            .await?;

        log::debug!("room {room}: seat {seat} played {kind} topped by {highest}");

        let board = self.store.members(room, Pile::Board).await?;
        Ok(PlayOutcome::Accepted(PlaySnapshot {
            board,
            kind,
            top: highest,
            current: next,
            last: seat,
        }))
    }

    /// Pass the turn for `seat`. When the turn has come back around to the
    /// seat that played last, the pass closes the circuit instead: the
    /// board is discarded and that seat leads the next combination.
    pub async fn pass_turn(&self, room: &str, seat: Seat) -> EngineResult<PassOutcome> {
        let current: Option<Seat> = self.read(room, ScalarField::CurrentSeat).await?;
        let last: Option<Seat> = self.read(room, ScalarField::LastSeat).await?;

        if current != Some(seat) {
            return Ok(PassOutcome::Rejected(RejectReason::OutOfTurn));
        }

        if last == Some(seat) {
            self.store.clear_pile(room, Pile::Board).await?;
            self.store.clear_scalar(room, ScalarField::TopCard).await?;
            self.store.clear_scalar(room, ScalarField::LastSeat).await?;
            self.store.clear_scalar(room, ScalarField::BoardKind).await?;
            log::debug!("room {room}: all passed, board cleared, seat {seat} leads");
            return Ok(PassOutcome::Accepted(PassSnapshot {
                current: seat,
                board_reset: true,
            }));
        }

        let next = seat.next();
        self.store
            .set_scalar(room, ScalarField::CurrentSeat, &next.to_string())
            .await?;
        Ok(PassOutcome::Accepted(PassSnapshot {
            current: next,
            board_reset: false,
        }))
    }

    pub async fn board(&self, room: &str) -> EngineResult<Vec<Card>> {
        Ok(self.store.members(room, Pile::Board).await?)
    }

    pub async fn hand(&self, room: &str, seat: Seat) -> EngineResult<Vec<Card>> {
        Ok(self.store.members(room, Pile::Hand(seat)).await?)
    }

    /// Every seat's hand, dealt or not; undealt seats are empty.
    pub async fn all_hands(&self, room: &str) -> EngineResult<[Vec<Card>; Seat::COUNT]> {
        let mut hands: [Vec<Card>; Seat::COUNT] = Default::default();
        for seat in Seat::ALL {
            hands[seat.index()] = self.store.members(room, Pile::Hand(seat)).await?;
        }
        Ok(hands)
    }

    pub async fn current_seat(&self, room: &str) -> EngineResult<Option<Seat>> {
        self.read(room, ScalarField::CurrentSeat).await
    }

    pub async fn last_seat(&self, room: &str) -> EngineResult<Option<Seat>> {
        self.read(room, ScalarField::LastSeat).await
    }

    pub async fn top_card(&self, room: &str) -> EngineResult<Option<Card>> {
        self.read(room, ScalarField::TopCard).await
    }

    pub async fn board_kind(&self, room: &str) -> EngineResult<Option<Combination>> {
        self.read(room, ScalarField::BoardKind).await
    }

    pub async fn lowest_dealt(&self, room: &str) -> EngineResult<Option<Card>> {
        self.read(room, ScalarField::LowestDealt).await
    }

    pub async fn seat_identity(&self, room: &str, seat: Seat) -> EngineResult<Option<PlayerId>> {
        Ok(self
            .store
            .scalar(room, ScalarField::SeatIdentity(seat))
            .await?)
    }

    /// Find the seat an external identity was dealt into.
    pub async fn seat_of(&self, room: &str, identity: &str) -> EngineResult<Option<Seat>> {
        for seat in Seat::ALL {
            if self.seat_identity(room, seat).await?.as_deref() == Some(identity) {
                return Ok(Some(seat));
            }
        }
        Ok(None)
    }

    /// Assemble the snapshot broadcast to one seat, or to a spectator when
    /// `seat` is `None` (own hand omitted).
    pub async fn view_for(&self, room: &str, seat: Option<Seat>) -> EngineResult<RoundView> {
        let board = self.board(room).await?;
        let current = self.current_seat(room).await?;
        let last = self.last_seat(room).await?;
        let hands = self.all_hands(room).await?;

        let hand = match seat {
            Some(seat) => hands[seat.index()].clone(),
            None => Vec::new(),
        };
        let mut hand_counts = [0; Seat::COUNT];
        for (idx, held) in hands.iter().enumerate() {
            hand_counts[idx] = held.len();
        }

        Ok(RoundView {
            board,
            current,
            last,
            hand,
            hand_counts,
        })
    }

    /// Shuffle and cut the deal, honoring a deck override. The pool keeps
    /// set semantics, so a repeated card narrows it.
    fn deal_hands(&self, deck: Option<Vec<Card>>, seat_count: usize) -> EngineResult<Vec<Vec<Card>>> {
        let hand_size = usize::from(self.hand_size);
        if hand_size == 0 {
            return Err(EngineError::EmptyDeal);
        }
        let mut deck = deck.unwrap_or_else(standard_deck);
        deck.sort_unstable();
        deck.dedup();

        let need = hand_size * seat_count;
        if deck.len() < need {
            return Err(EngineError::DeckExhausted {
                deck: deck.len(),
                hand_size,
                seats: seat_count,
            });
        }

        deck.shuffle(&mut rand::rng());
        deck.truncate(need);
        Ok(deck
            .chunks(hand_size)
            .map(|chunk| chunk.to_vec())
            .collect())
    }

    async fn read<T: FromStr>(&self, room: &str, field: ScalarField) -> EngineResult<Option<T>> {
        match self.store.scalar(room, field).await? {
            None => Ok(None),
            Some(raw) => match raw.parse::<T>() {
                Ok(value) => Ok(Some(value)),
                Err(_) => {
                    log::warn!("room {room}: stored {field} is corrupt: {raw:?}");
                    Err(EngineError::Corrupt {
                        room: room.to_string(),
                        field: field.to_string(),
                        value: raw,
                    })
                }
            },
        }
    }
}
