//! Room configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::constants::{DECK_SIZE, DEFAULT_HAND_SIZE};
use crate::game::Seat;

/// Per-room settings, checked before a room spawns.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoomConfig {
    /// Cards dealt to each seat. Five gives the quick short-hand game;
    /// the traditional thirteen-card deal is a deliberate override.
    pub hand_size: u8,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("hand size must be at least 1")]
    HandSizeZero,
    #[error("hand size {0} cannot deal four seats from one deck")]
    HandSizeTooLarge(u8),
}

impl RoomConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::HandSizeZero);
        }
        if usize::from(self.hand_size) * Seat::COUNT > DECK_SIZE {
            return Err(ConfigError::HandSizeTooLarge(self.hand_size));
        }
        Ok(())
    }
}
