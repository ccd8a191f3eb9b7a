//! Gameplay constants.

/// Cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Cards dealt to each seat unless the room configures otherwise.
pub const DEFAULT_HAND_SIZE: u8 = 5;
