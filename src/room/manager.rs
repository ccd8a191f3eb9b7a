//! Room manager for spawning and tracking room actors.

use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tokio::sync::{oneshot, RwLock};

use super::{
    actor::{RoomActor, RoomHandle},
    config::{ConfigError, RoomConfig},
    messages::RoomCommand,
};
use crate::game::{
    Card, DealOverrides, EngineError, GameEngine, PassOutcome, PlayOutcome, PlayerId, RoomId,
    RoundStart, RoundView, Seat,
};
use crate::store::GameStore;

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("room {0} not found")]
    NotFound(RoomId),
    #[error("room {0} is already open")]
    AlreadyOpen(RoomId),
    #[error("room {0} is closed")]
    Closed(RoomId),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Registry of live rooms over one shared store. Opening a room spawns its
/// actor; the wrappers below do the oneshot round-trip for callers that do
/// not want to talk to handles directly.
pub struct RoomManager<S> {
    store: Arc<S>,
    rooms: Arc<RwLock<HashMap<RoomId, RoomHandle>>>,
}

impl<S: GameStore + 'static> RoomManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            rooms: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Spawn an actor for `room_id`. Each id gets at most one live actor;
    /// close it before opening it again.
    pub async fn open_room(
        &self,
        room_id: impl Into<RoomId>,
        config: RoomConfig,
    ) -> Result<RoomHandle, RoomError> {
        config.validate()?;
        let room_id = room_id.into();

        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&room_id) {
            return Err(RoomError::AlreadyOpen(room_id));
        }

        let engine = GameEngine::new(Arc::clone(&self.store), config.hand_size);
        let (actor, handle) = RoomActor::new(room_id.clone(), engine);
        rooms.insert(room_id.clone(), handle.clone());
        drop(rooms);

        tokio::spawn(async move {
            actor.run().await;
        });

        log::info!("room {room_id}: opened");
        Ok(handle)
    }

    /// Look up a live room's handle.
    pub async fn room(&self, room_id: &str) -> Option<RoomHandle> {
        let rooms = self.rooms.read().await;
        rooms.get(room_id).cloned()
    }

    /// Stop a room's actor and drop it from the registry. Stored round
    /// state stays behind for the store's owner to expire.
    pub async fn close_room(&self, room_id: &str) -> Result<(), RoomError> {
        let handle = {
            let mut rooms = self.rooms.write().await;
            rooms.remove(room_id)
        };
        let handle = handle.ok_or_else(|| RoomError::NotFound(room_id.to_string()))?;

        let (tx, rx) = oneshot::channel();
        handle.send(RoomCommand::Close { reply: tx }).await?;
        rx.await
            .map_err(|_| RoomError::Closed(room_id.to_string()))?;

        log::info!("room {room_id}: closed");
        Ok(())
    }

    pub async fn active_room_count(&self) -> usize {
        let rooms = self.rooms.read().await;
        rooms.len()
    }

    /// Deal a fresh round in a room.
    pub async fn initialize(
        &self,
        room_id: &str,
        identities: Vec<PlayerId>,
        overrides: DealOverrides,
    ) -> Result<RoundStart, RoomError> {
        let handle = self.require(room_id).await?;
        let (tx, rx) = oneshot::channel();
        handle
            .send(RoomCommand::Initialize {
                identities,
                overrides,
                reply: tx,
            })
            .await?;
        let result = rx
            .await
            .map_err(|_| RoomError::Closed(room_id.to_string()))?;
        Ok(result?)
    }

    /// Play cards for a seat.
    pub async fn play(
        &self,
        room_id: &str,
        seat: Seat,
        cards: Vec<Card>,
    ) -> Result<PlayOutcome, RoomError> {
        let handle = self.require(room_id).await?;
        let (tx, rx) = oneshot::channel();
        handle
            .send(RoomCommand::Play {
                seat,
                cards,
                reply: tx,
            })
            .await?;
        let result = rx
            .await
            .map_err(|_| RoomError::Closed(room_id.to_string()))?;
        Ok(result?)
    }

    /// Pass the turn for a seat.
    pub async fn pass(&self, room_id: &str, seat: Seat) -> Result<PassOutcome, RoomError> {
        let handle = self.require(room_id).await?;
        let (tx, rx) = oneshot::channel();
        handle.send(RoomCommand::Pass { seat, reply: tx }).await?;
        let result = rx
            .await
            .map_err(|_| RoomError::Closed(room_id.to_string()))?;
        Ok(result?)
    }

    /// Snapshot the round for a seat (spectator when `None`).
    pub async fn view(
        &self,
        room_id: &str,
        seat: Option<Seat>,
    ) -> Result<RoundView, RoomError> {
        let handle = self.require(room_id).await?;
        let (tx, rx) = oneshot::channel();
        handle.send(RoomCommand::View { seat, reply: tx }).await?;
        let result = rx
            .await
            .map_err(|_| RoomError::Closed(room_id.to_string()))?;
        Ok(result?)
    }

    async fn require(&self, room_id: &str) -> Result<RoomHandle, RoomError> {
        self.room(room_id)
            .await
            .ok_or_else(|| RoomError::NotFound(room_id.to_string()))
    }
}
