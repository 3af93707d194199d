use crate::core::card::Card;
use crate::core::deck::Deck;
use std::ops::{Index, RangeFull};

use rand::Rng;
use rand::seq::SliceRandom;

/// `FlatDeck` is the cards left to deal, kept in a `Vec` so that
/// random cards can be pulled out cheaply. It does not provide
/// contains methods.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatDeck {
    /// Card storage.
    cards: Vec<Card>,
}

impl FlatDeck {
    /// How many cards are there in the deck ?
    pub fn len(&self) -> usize {
        self.cards.len()
    }
    /// Have all cards been dealt ?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deal `n` uniformly random cards, returned in random order.
    /// Only `n` steps of a Fisher-Yates shuffle are done, which is
    /// all a single deal needs. The deck keeps every card; the dealt
    /// ones are just moved into the returned slice.
    ///
    /// # Panics
    ///
    /// Panics if `n` is larger than the deck.
    ///
    /// ```
    /// use holdem_equity::core::{Deck, FlatDeck};
    ///
    /// let mut deck: FlatDeck = Deck::default().into();
    /// let dealt = deck.deal_random(&mut rand::rng(), 9);
    /// assert_eq!(9, dealt.len());
    /// ```
    pub fn deal_random<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize) -> &[Card] {
        assert!(n <= self.cards.len(), "can't deal {n} cards from {}", self.len());
        let (dealt, _) = self.cards.partial_shuffle(rng, n);
        dealt
    }
}

impl Index<RangeFull> for FlatDeck {
    type Output = [Card];
    fn index(&self, index: RangeFull) -> &[Card] {
        &self.cards[index]
    }
}

/// Allow creating a flat deck from a Deck
impl From<Deck> for FlatDeck {
    /// Flatten this deck, consuming it to produce a `FlatDeck` that's
    /// easier to get random access to.
    fn from(value: Deck) -> Self {
        // We sort the cards so that the same input
        // cards always result in the same starting flat deck
        let mut cards: Vec<Card> = value.into_iter().collect();
        cards.sort();
        Self { cards }
    }
}
