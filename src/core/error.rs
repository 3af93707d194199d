use thiserror::Error;

use super::Card;

/// This is the core error type for the library. Every variant is an
/// input problem found before any simulation work starts, so none of
/// them are worth retrying without changing the input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquityError {
    #[error("Unable to parse card code {0:?}")]
    InvalidCard(String),
    #[error("Card {0} was chosen more than once")]
    DuplicateCard(Card),
    #[error("Board must have 0, 3, 4, or 5 cards, got {0}")]
    InvalidBoardSize(usize),
    #[error("Opponent count must be between 1 and 8, got {0}")]
    InvalidOpponentCount(usize),
    #[error("Can't score a hand of {len} cards: {reason}")]
    InvalidHand { len: usize, reason: &'static str },
    #[error("At least one iteration is needed, got {0}")]
    InvalidIterations(usize),
    #[error("Invalid {name}: {value}")]
    InvalidTableAmount { name: &'static str, value: f64 },
}
