use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use thiserror::Error;

use super::cards::Card;

/// Recognized playable combinations. Runs extend past the king through the
/// ace and the two, so K-A-2 is a run while A-2-3 is not.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Combination {
    Single,
    Pair,
    Triple,
    RunOfSingles,
    RunOfPairs,
    RunOfTriples,
    FourOfAKind,
}

impl Combination {
    /// Stable name used on the wire and in the store.
    pub fn name(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Pair => "pair",
            Self::Triple => "triple",
            Self::RunOfSingles => "run_of_singles",
            Self::RunOfPairs => "run_of_pairs",
            Self::RunOfTriples => "run_of_triples",
            Self::FourOfAKind => "four_of_a_kind",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "single" => Some(Self::Single),
            "pair" => Some(Self::Pair),
            "triple" => Some(Self::Triple),
            "run_of_singles" => Some(Self::RunOfSingles),
            "run_of_pairs" => Some(Self::RunOfPairs),
            "run_of_triples" => Some(Self::RunOfTriples),
            "four_of_a_kind" => Some(Self::FourOfAKind),
            _ => None,
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("not a combination name: {0:?}")]
pub struct ParseCombinationError(pub String);

impl FromStr for Combination {
    type Err = ParseCombinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParseCombinationError(s.to_string()))
    }
}

/// Classifies a card set, `None` meaning no recognized combination. The
/// result is a property of the set; input order never matters.
///
/// Four cards are only ever four of a kind. A 4-card straight such as
/// 3-4-5-6 is deliberately not recognized; longer and shorter straights
/// are.
pub fn classify(cards: &[Card]) -> Option<Combination> {
    match cards.len() {
        0 => None,
        1 => Some(Combination::Single),
        2 => same_rank(cards).then_some(Combination::Pair),
        3 => {
            if same_rank(cards) {
                Some(Combination::Triple)
            } else if run_unit(cards) == Some(1) {
                Some(Combination::RunOfSingles)
            } else {
                None
            }
        }
        4 => same_rank(cards).then_some(Combination::FourOfAKind),
        _ => match run_unit(cards) {
            Some(1) => Some(Combination::RunOfSingles),
            Some(2) => Some(Combination::RunOfPairs),
            Some(3) => Some(Combination::RunOfTriples),
            _ => None,
        },
    }
}

fn same_rank(cards: &[Card]) -> bool {
    cards.iter().all(|card| card.rank() == cards[0].rank())
}

/// Unit size of a run decomposition: 1 for a run of singles, 2 for pairs,
/// 3 for triples. `None` when the cards do not decompose into consecutive
/// same-ranked groups of one fixed size.
///
/// If a valid decomposition exists, every rank present appears exactly
/// `unit` times, so counting the lowest rank's multiplicity finds it.
fn run_unit(cards: &[Card]) -> Option<usize> {
    let mut orders: Vec<u8> = cards.iter().map(|card| card.rank().run_order()).collect();
    orders.sort_unstable();

    let lowest = orders[0];
    let unit = orders.iter().take_while(|&&order| order == lowest).count();
    if unit > 3 || orders.len() % unit != 0 {
        return None;
    }

    for (i, &order) in orders.iter().enumerate() {
        if order != lowest + (i / unit) as u8 {
            return None;
        }
    }
    Some(unit)
}
