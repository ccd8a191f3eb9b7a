//! Room actor with a single-writer command loop.

use tokio::sync::mpsc;

use super::manager::RoomError;
use super::messages::RoomCommand;
use crate::game::{GameEngine, RoomId};
use crate::store::GameStore;

const MAILBOX_CAPACITY: usize = 100;

/// Cheap cloneable handle for sending commands to a room actor.
#[derive(Clone, Debug)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomCommand>,
    room_id: RoomId,
}

impl RoomHandle {
    pub fn new(sender: mpsc::Sender<RoomCommand>, room_id: RoomId) -> Self {
        Self { sender, room_id }
    }

    #[must_use]
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Queue a command for the room.
    pub async fn send(&self, command: RoomCommand) -> Result<(), RoomError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| RoomError::Closed(self.room_id.clone()))
    }
}

/// Actor owning all mutations of one room. Commands are handled strictly
/// one at a time in arrival order, so a move's reads and writes can never
/// interleave with another caller's.
pub struct RoomActor<S> {
    room_id: RoomId,
    engine: GameEngine<S>,
    inbox: mpsc::Receiver<RoomCommand>,
}

impl<S: GameStore> RoomActor<S> {
    /// Create an actor and the handle that feeds it.
    pub fn new(room_id: RoomId, engine: GameEngine<S>) -> (Self, RoomHandle) {
        let (sender, inbox) = mpsc::channel(MAILBOX_CAPACITY);
        let handle = RoomHandle::new(sender, room_id.clone());
        let actor = Self {
            room_id,
            engine,
            inbox,
        };
        (actor, handle)
    }

    /// Run the command loop until every handle is dropped or a close
    /// command arrives.
    pub async fn run(mut self) {
        log::info!("room {}: actor started", self.room_id);

        while let Some(command) = self.inbox.recv().await {
            if !self.handle_command(command).await {
                break;
            }
        }

        log::info!("room {}: actor stopped", self.room_id);
    }

    /// Handle one command; returns `false` when the actor should stop.
    async fn handle_command(&mut self, command: RoomCommand) -> bool {
        match command {
            RoomCommand::Initialize {
                identities,
                overrides,
                reply,
            } => {
                let result = self
                    .engine
                    .initialize(&self.room_id, &identities, overrides)
                    .await;
                let _ = reply.send(result);
            }

            RoomCommand::Play { seat, cards, reply } => {
                let result = self.engine.play_cards(&self.room_id, seat, &cards).await;
                let _ = reply.send(result);
            }

            RoomCommand::Pass { seat, reply } => {
                let result = self.engine.pass_turn(&self.room_id, seat).await;
                let _ = reply.send(result);
            }

            RoomCommand::View { seat, reply } => {
                let result = self.engine.view_for(&self.room_id, seat).await;
                let _ = reply.send(result);
            }

            RoomCommand::Close { reply } => {
                let _ = reply.send(());
                return false;
            }
        }

        true
    }
}
