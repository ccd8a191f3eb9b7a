use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

use thiserror::Error;

/// A table position, 1 through 4. The turn always rotates modulo four,
/// even in rounds where fewer than four seats were dealt cards.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Seat(u8);

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("seat out of range: {0}")]
pub struct SeatOutOfRange(pub u8);

impl Seat {
    pub const COUNT: usize = 4;
    pub const ALL: [Seat; Seat::COUNT] = [Seat(1), Seat(2), Seat(3), Seat(4)];

    pub fn new(position: u8) -> Result<Self, SeatOutOfRange> {
        if (1..=Self::COUNT as u8).contains(&position) {
            Ok(Self(position))
        } else {
            Err(SeatOutOfRange(position))
        }
    }

    /// 1-based position.
    #[must_use]
    pub fn position(self) -> u8 {
        self.0
    }

    /// 0-based position for indexing per-seat arrays.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// The seat that plays after this one.
    #[must_use]
    pub fn next(self) -> Seat {
        Seat((self.0 % Self::COUNT as u8) + 1)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Seat {
    type Err = SeatOutOfRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let position = s.parse::<u8>().map_err(|_| SeatOutOfRange(0))?;
        Seat::new(position)
    }
}

impl Serialize for Seat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Seat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let position = u8::deserialize(deserializer)?;
        Seat::new(position).map_err(serde::de::Error::custom)
    }
}
