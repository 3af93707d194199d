//! This is the core module. It exports the non-holdem
//! related code.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit plus the card code parser.
pub use self::card::{Card, Suit, Value, parse_cards};

/// Errors for everything that takes user input.
mod error;
/// Export the error type.
pub use self::error::EquityError;

/// Bitsets of cards, used for dead cards and duplicates.
mod card_bit_set;
/// Export the set and its iterator.
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Flattened deck
mod flat_deck;
/// Export the shuffleable deck.
pub use self::flat_deck::FlatDeck;

/// Best five card hand scoring.
mod rank;
/// Export the trait and the results.
pub use self::rank::{Category, HandScore, Rankable, evaluate_best};
pub(crate) use self::rank::rank_seven;
