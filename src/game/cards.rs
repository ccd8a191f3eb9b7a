use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

use thiserror::Error;

/// Suits in ascending tie-break order. A higher suit wins when two cards
/// share a rank, so the hearts three beats the spades three.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Spades,
    Clubs,
    Diamonds,
    Hearts,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Clubs, Suit::Diamonds, Suit::Hearts];

    /// Single-letter wire code (`S`, `C`, `D`, `H`).
    pub fn letter(self) -> char {
        match self {
            Self::Spades => 'S',
            Self::Clubs => 'C',
            Self::Diamonds => 'D',
            Self::Hearts => 'H',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'S' => Some(Self::Spades),
            'C' => Some(Self::Clubs),
            'D' => Some(Self::Diamonds),
            'H' => Some(Self::Hearts),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Ranks in ascending game order: threes are the global low, the ace and
/// the two sit above the king, and the two beats everything.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    /// Numeric wire value: ace=1, two=2, three=3 ... ten=10, J=11, Q=12,
    /// K=13. This is the card-face numbering, not the game order.
    pub fn code(self) -> u8 {
        match self {
            Self::Ace => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten => 10,
            Self::Jack => 11,
            Self::Queen => 12,
            Self::King => 13,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Ace),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            6 => Some(Self::Six),
            7 => Some(Self::Seven),
            8 => Some(Self::Eight),
            9 => Some(Self::Nine),
            10 => Some(Self::Ten),
            11 => Some(Self::Jack),
            12 => Some(Self::Queen),
            13 => Some(Self::King),
            _ => None,
        }
    }

    /// Position on the run-adjacency line: 3..K keep their face value while
    /// the ace and the two extend the line past the king (14 and 15). Only
    /// run detection uses this; comparisons use the enum order.
    pub fn run_order(self) -> u8 {
        match self {
            Self::Ace => 14,
            Self::Two => 15,
            other => other.code(),
        }
    }
}

/// A card is a rank and a suit. Ordering is rank-major with the suit as the
/// tie-break, which makes the derived order a strict total order over the
/// 52-card domain.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(pub Rank, pub Suit);

impl Card {
    #[must_use]
    pub fn rank(self) -> Rank {
        self.0
    }

    #[must_use]
    pub fn suit(self) -> Suit {
        self.1
    }
}

/// Cards travel as suit letter plus face value, `S3` through `H13`.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.1.letter(), self.0.code())
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("not a card code: {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_string());
        let mut chars = s.chars();
        let suit = chars.next().and_then(Suit::from_letter).ok_or_else(err)?;
        let rank = chars
            .as_str()
            .parse::<u8>()
            .ok()
            .and_then(Rank::from_code)
            .ok_or_else(err)?;
        Ok(Card(rank, suit))
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// All 52 cards in ascending game order.
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for rank in Rank::ALL {
        for suit in Suit::ALL {
            deck.push(Card(rank, suit));
        }
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    #[test]
    fn twos_and_aces_outrank_everything() {
        assert!(card("S2") > card("S1"));
        assert!(card("S1") > card("S13"));
        assert!(card("S13") > card("S12"));
        assert!(card("H2") > card("H3"));
        assert!(card("S3") < card("C4"));
    }

    #[test]
    fn suits_break_rank_ties() {
        assert!(card("S7") < card("C7"));
        assert!(card("C7") < card("D7"));
        assert!(card("D7") < card("H7"));
        assert!(card("H7") > card("S7"));
    }

    #[test]
    fn comparator_is_a_strict_total_order() {
        let deck = standard_deck();
        for a in &deck {
            for b in &deck {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                if a.cmp(b).is_eq() {
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn deck_holds_52_distinct_cards() {
        let deck = standard_deck();
        assert_eq!(deck.len(), 52);
        let unique: std::collections::BTreeSet<_> = deck.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn wire_codes_parse_back() {
        for code in ["S3", "H13", "D1", "C2", "S10"] {
            assert_eq!(card(code).to_string(), code);
        }
        assert_eq!(card("S1").rank(), Rank::Ace);
        assert_eq!(card("C11").rank(), Rank::Jack);
    }

    #[test]
    fn bad_codes_are_rejected() {
        for bad in ["", "S", "3", "X3", "S0", "S14", "SS3", "s3", "H 4"] {
            assert!(bad.parse::<Card>().is_err(), "{bad:?} parsed");
        }
    }

    #[test]
    fn run_order_extends_past_the_king() {
        assert_eq!(Rank::King.run_order(), 13);
        assert_eq!(Rank::Ace.run_order(), 14);
        assert_eq!(Rank::Two.run_order(), 15);
        assert_eq!(Rank::Three.run_order(), 3);
    }

    #[test]
    fn cards_serialize_as_code_strings() {
        let json = serde_json::to_string(&vec![card("S3"), card("H1")]).unwrap();
        assert_eq!(json, r#"["S3","H1"]"#);
        let back: Vec<Card> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![card("S3"), card("H1")]);
    }
}
