//! Room runtime: one single-writer actor per room.
//!
//! This module implements:
//! - RoomActor: async actor owning all mutations of one room
//! - RoomManager: registry spawning and tracking room actors
//! - Message-based communication over tokio channels
//! - Room configuration and lifecycle management
//!
//! ## Architecture
//!
//! Every open room runs in its own tokio task consuming an mpsc inbox, so
//! commands for a room apply strictly one at a time no matter how many
//! connections race to mutate it. The manager owns the handle registry and
//! offers request/reply wrappers over the raw command channel.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tien_len::room::{RoomConfig, RoomManager};
//! use tien_len::store::MemoryStore;
//! use tien_len::DealOverrides;
//!
//! #[tokio::main]
//! async fn main() {
//!     let manager = RoomManager::new(Arc::new(MemoryStore::new()));
//!     manager.open_room("room-1", RoomConfig::default()).await?;
//!
//!     let players = vec!["a".into(), "b".into(), "c".into(), "d".into()];
//!     let start = manager
//!         .initialize("room-1", players, DealOverrides::default())
//!         .await?;
//!     println!("{} opens the round", start.lowest_dealt);
//! }
//! ```

pub mod actor;
pub mod config;
pub mod manager;
pub mod messages;

pub use actor::{RoomActor, RoomHandle};
pub use config::{ConfigError, RoomConfig};
pub use manager::{RoomError, RoomManager};
pub use messages::RoomCommand;
