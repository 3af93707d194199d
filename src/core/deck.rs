use crate::core::card::{Card, Suit, Value};
use crate::core::{CardBitSet, CardBitSetIter};

/// Deck struct that can tell quickly if a card is in the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck(CardBitSet);

impl Deck {
    /// Create a new empty deck
    ///
    /// ```
    /// use holdem_equity::core::Deck;
    ///
    /// assert!(Deck::new().is_empty());
    /// ```
    pub fn new() -> Self {
        Self(CardBitSet::new())
    }

    /// Every card that is not in `dead`.
    ///
    /// ```
    /// use holdem_equity::core::{parse_cards, CardBitSet, Deck};
    ///
    /// let dead: CardBitSet = parse_cards("AsAh").unwrap().into_iter().collect();
    /// assert_eq!(50, Deck::without(dead).len());
    /// ```
    pub fn without(dead: CardBitSet) -> Self {
        Self(!dead)
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.0.count()
    }
    /// Have all of the cards been dealt from this deck?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All 52 cards the way a card picker lists them: aces first,
    /// then down to the deuces, each value in `s h d c` order.
    ///
    /// ```
    /// use holdem_equity::core::Deck;
    ///
    /// let cards = Deck::picker_order();
    /// assert_eq!("As", cards[0].to_string());
    /// assert_eq!("Ah", cards[1].to_string());
    /// assert_eq!("2c", cards[51].to_string());
    /// ```
    pub fn picker_order() -> Vec<Card> {
        let suits = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];
        Value::values()
            .iter()
            .rev()
            .flat_map(|value| suits.iter().map(move |suit| Card::new(*value, *suit)))
            .collect()
    }
}

impl Default for Deck {
    /// Create the default 52 card deck
    ///
    /// ```
    /// use holdem_equity::core::Deck;
    ///
    /// assert_eq!(52, Deck::default().len());
    /// ```
    fn default() -> Self {
        Self(CardBitSet::default())
    }
}

/// Turn a deck into an iterator
impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = CardBitSetIter;
    /// Consume this deck and create a new iterator.
    fn into_iter(self) -> CardBitSetIter {
        self.0.into_iter()
    }
}
