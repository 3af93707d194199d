use std::fmt;

use crate::core::{Card, CardBitSet, EquityError};

/// All the different possible hand categories, weakest first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Category {
    /// The lowest rank.
    /// No matches
    HighCard = 0,
    /// One Card matches another.
    OnePair = 1,
    /// Two diffent pair of matching cards.
    TwoPair = 2,
    /// Three of the same value.
    ThreeOfAKind = 3,
    /// Five cards in a sequence
    Straight = 4,
    /// Five cards of the same suit
    Flush = 5,
    /// Three of one value and two of another value
    FullHouse = 6,
    /// Four of the same value.
    FourOfAKind = 7,
    /// Five cards in a sequence all fo the same suit.
    StraightFlush = 8,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// Strength of the best five card hand in a set of cards.
///
/// This is the tuple `[category, tiebreak, ...]`: the category
/// followed by the face ranks (2 through 14) that decide between
/// hands of the same category, most significant first. Scores
/// compare element by element. A tiebreak slot that a category
/// doesn't use is stored as 0, so it is lower than any real rank.
///
/// ```
/// use holdem_equity::core::{evaluate_best, parse_cards, Category};
///
/// let wheel = evaluate_best(&parse_cards("Ad2c3s4h5s").unwrap()).unwrap();
/// assert_eq!(Category::Straight, wheel.category());
/// assert_eq!(&[5], wheel.tiebreaks());
/// assert_eq!(vec![4, 5], wheel.to_vec());
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct HandScore {
    category: Category,
    tiebreaks: [u8; 5],
}

impl HandScore {
    /// Below every real hand.
    const LOWEST: HandScore = HandScore {
        category: Category::HighCard,
        tiebreaks: [0; 5],
    };

    fn new(category: Category, ranks: &[u8]) -> Self {
        let mut tiebreaks = [0; 5];
        tiebreaks[..ranks.len()].copy_from_slice(ranks);
        Self {
            category,
            tiebreaks,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The tiebreak ranks this category uses.
    pub fn tiebreaks(&self) -> &[u8] {
        let used = self
            .tiebreaks
            .iter()
            .position(|r| *r == 0)
            .unwrap_or(self.tiebreaks.len());
        &self.tiebreaks[..used]
    }

    /// The score as a flat `[category, tiebreaks...]` vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(6);
        out.push(self.category as u8);
        out.extend_from_slice(self.tiebreaks());
        out
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category.name(), self.tiebreaks())
    }
}

/// Every way to pick 5 of 5 cards.
const FIVE_OF_FIVE: [[usize; 5]; 1] = [[0, 1, 2, 3, 4]];

/// Every way to pick 5 of 6 cards.
const FIVE_OF_SIX: [[usize; 5]; 6] = [
    [0, 1, 2, 3, 4],
    [0, 1, 2, 3, 5],
    [0, 1, 2, 4, 5],
    [0, 1, 3, 4, 5],
    [0, 2, 3, 4, 5],
    [1, 2, 3, 4, 5],
];

/// Every way to pick 5 of 7 cards.
const FIVE_OF_SEVEN: [[usize; 5]; 21] = [
    [0, 1, 2, 3, 4],
    [0, 1, 2, 3, 5],
    [0, 1, 2, 3, 6],
    [0, 1, 2, 4, 5],
    [0, 1, 2, 4, 6],
    [0, 1, 2, 5, 6],
    [0, 1, 3, 4, 5],
    [0, 1, 3, 4, 6],
    [0, 1, 3, 5, 6],
    [0, 1, 4, 5, 6],
    [0, 2, 3, 4, 5],
    [0, 2, 3, 4, 6],
    [0, 2, 3, 5, 6],
    [0, 2, 4, 5, 6],
    [0, 3, 4, 5, 6],
    [1, 2, 3, 4, 5],
    [1, 2, 3, 4, 6],
    [1, 2, 3, 5, 6],
    [1, 2, 4, 5, 6],
    [1, 3, 4, 5, 6],
    [2, 3, 4, 5, 6],
];

fn five_card_subsets(len: usize) -> Option<&'static [[usize; 5]]> {
    match len {
        5 => Some(&FIVE_OF_FIVE),
        6 => Some(&FIVE_OF_SIX),
        7 => Some(&FIVE_OF_SEVEN),
        _ => None,
    }
}

/// Highest card of a five card run in `ranks`. The ace also
/// plays low, so A-2-3-4-5 is a straight to the five.
fn straight_high(ranks: &[u8; 5]) -> Option<u8> {
    let mut mask: u16 = 0;
    for &r in ranks {
        mask |= 1u16 << r;
    }
    if mask & (1 << 14) != 0 {
        mask |= 1 << 1;
    }
    (5..=14u8).rev().find(|&high| {
        let run: u16 = 0b11111 << (high - 4);
        mask & run == run
    })
}

/// Score exactly five cards.
pub(crate) fn rank_five(cards: &[Card; 5]) -> HandScore {
    let mut ranks = [0u8; 5];
    for (slot, card) in ranks.iter_mut().zip(cards) {
        *slot = card.value.rank();
    }
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high(&ranks);

    // (count, rank) for each distinct rank, biggest group first and
    // higher rank first inside equal sized groups.
    let mut groups = [(0u8, 0u8); 5];
    let mut distinct = 0;
    for r in ranks {
        match groups[..distinct].iter_mut().find(|(_, rank)| *rank == r) {
            Some((count, _)) => *count += 1,
            None => {
                groups[distinct] = (1, r);
                distinct += 1;
            }
        }
    }
    let groups = &mut groups[..distinct];
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let mut by_group = [0u8; 5];
    for (slot, (_, rank)) in by_group.iter_mut().zip(groups.iter()) {
        *slot = *rank;
    }
    let by_group = &by_group[..distinct];

    let largest = groups[0].0;
    let second = groups.get(1).map_or(0, |g| g.0);

    let category = match (straight, is_flush, largest, second) {
        (Some(_), true, _, _) => Category::StraightFlush,
        (_, _, 4, _) => Category::FourOfAKind,
        (_, _, 3, 2) => Category::FullHouse,
        (_, true, _, _) => Category::Flush,
        (Some(_), false, _, _) => Category::Straight,
        (_, _, 3, _) => Category::ThreeOfAKind,
        (_, _, 2, 2) => Category::TwoPair,
        (_, _, 2, _) => Category::OnePair,
        _ => Category::HighCard,
    };

    match (category, straight) {
        (Category::StraightFlush | Category::Straight, Some(high)) => {
            HandScore::new(category, &[high])
        }
        // With no pairs the groups are just the ranks high to low.
        _ => HandScore::new(category, by_group),
    }
}

fn best_of(cards: &[Card], subsets: &[[usize; 5]]) -> HandScore {
    subsets
        .iter()
        .map(|idx| rank_five(&idx.map(|i| cards[i])))
        .fold(HandScore::LOWEST, Ord::max)
}

/// Best five card score out of two hole cards and a full board.
/// The caller guarantees the seven cards are distinct.
pub(crate) fn rank_seven(cards: &[Card; 7]) -> HandScore {
    best_of(cards, &FIVE_OF_SEVEN)
}

/// Can this be scored as a poker hand?
pub trait Rankable {
    /// Score the best five card hand inside this set of cards.
    fn rank(&self) -> Result<HandScore, EquityError>;
}

impl Rankable for [Card] {
    fn rank(&self) -> Result<HandScore, EquityError> {
        let len = self.len();
        let subsets = five_card_subsets(len).ok_or(EquityError::InvalidHand {
            len,
            reason: "a hand needs 5, 6, or 7 cards",
        })?;
        CardBitSet::try_from_unique(self).map_err(|_| EquityError::InvalidHand {
            len,
            reason: "a card is repeated",
        })?;
        Ok(best_of(self, subsets))
    }
}

/// Score the best five card hand in 5, 6, or 7 distinct cards.
///
/// ```
/// use holdem_equity::core::{evaluate_best, parse_cards, Category};
///
/// let cards = parse_cards("AsKsQsJsTs2d3c").unwrap();
/// let score = evaluate_best(&cards).unwrap();
/// assert_eq!(Category::StraightFlush, score.category());
/// assert_eq!(&[14], score.tiebreaks());
///
/// assert!(evaluate_best(&cards[..4]).is_err());
/// ```
pub fn evaluate_best(cards: &[Card]) -> Result<HandScore, EquityError> {
    cards.rank()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Deck, FlatDeck, Suit, Value, parse_cards};
    use rand::{SeedableRng, rngs::StdRng};

    fn score(cards: &str) -> HandScore {
        evaluate_best(&parse_cards(cards).unwrap()).unwrap()
    }

    #[test]
    fn test_cmp() {
        assert!(
            HandScore::new(Category::HighCard, &[14]) < HandScore::new(Category::OnePair, &[2])
        );
        assert!(
            HandScore::new(Category::FourOfAKind, &[2, 3])
                < HandScore::new(Category::StraightFlush, &[5])
        );
    }

    #[test]
    fn test_missing_tiebreak_is_lowest() {
        assert!(
            HandScore::new(Category::HighCard, &[9]) < HandScore::new(Category::HighCard, &[9, 2])
        );
        assert_eq!(HandScore::LOWEST, HandScore::new(Category::HighCard, &[]));
    }

    #[test]
    fn test_royal_flush() {
        let s = score("AsKsQsJsTs");
        assert_eq!(vec![8, 14], s.to_vec());
    }

    #[test]
    fn test_steel_wheel() {
        assert_eq!(vec![8, 5], score("5h4h3h2hAh").to_vec());
    }

    #[test]
    fn test_four_of_a_kind() {
        assert_eq!(vec![7, 14, 10], score("AdAcAsAhTs").to_vec());
        assert_eq!(vec![7, 14, 2], score("2cAdAcAsAh").to_vec());
    }

    #[test]
    fn test_full_house() {
        assert_eq!(vec![6, 9, 14], score("AdAc9d9c9s").to_vec());
        assert!(score("2d2c2sAcAs") < score("3d3c3s2c2h"));
    }

    #[test]
    fn test_flush() {
        assert_eq!(vec![5, 14, 10, 9, 8, 5], score("AdTd9d8d5d").to_vec());
        assert!(score("AdTd9d8d5d") > score("KsQsJs9s8s"));
    }

    #[test]
    fn test_straight() {
        assert_eq!(vec![4, 6], score("2c3s4h5s6d").to_vec());
        assert_eq!(vec![4, 14], score("AcKsQhJsTd").to_vec());
    }

    #[test]
    fn test_wheel() {
        let wheel = score("Ad2c3s4h5s");
        assert_eq!(vec![4, 5], wheel.to_vec());
        // The wheel is the lowest straight.
        assert!(wheel < score("2c3s4h5s6d"));
        assert!(wheel < score("AcKsQhJsTd"));
        assert!(wheel > score("AdAcAsKhQs"));
    }

    #[test]
    fn test_no_wrap_around_straight() {
        assert_eq!(Category::HighCard, score("QcKsAh2s3d").category());
    }

    #[test]
    fn test_three_of_a_kind() {
        assert_eq!(vec![3, 2, 6, 5], score("2c2s2h5s6d").to_vec());
    }

    #[test]
    fn test_two_pair() {
        assert_eq!(vec![2, 14, 9, 10], score("AdAc9d9cTs").to_vec());
        // Kicker decides.
        assert!(score("AdAc9d9cTs") > score("AhAs9h9s8c"));
    }

    #[test]
    fn test_one_pair() {
        assert_eq!(vec![1, 14, 10, 9, 8], score("AdAc9d8cTs").to_vec());
    }

    #[test]
    fn test_high_card_hand() {
        assert_eq!(vec![0, 14, 10, 9, 8, 5], score("Ad8h9cTc5c").to_vec());
    }

    #[test]
    fn test_best_of_seven_picks_flush_over_straight() {
        let s = score("9h8h7h6c5h2hKd");
        assert_eq!(vec![5, 9, 8, 7, 5, 2], s.to_vec());
    }

    #[test]
    fn test_best_of_six() {
        assert_eq!(vec![6, 13, 4], score("KdKcKs4h4s4d").to_vec());
    }

    #[test]
    fn test_seven_card_uses_board_kickers() {
        assert_eq!(vec![1, 12, 14, 11, 9], score("QcQd2s5h9dJsAc").to_vec());
    }

    #[test]
    fn test_invalid_sizes() {
        let cards = parse_cards("AsKsQsJsTs9s8s7s").unwrap();
        for len in [0, 1, 4, 8] {
            assert!(matches!(
                evaluate_best(&cards[..len]),
                Err(EquityError::InvalidHand { len: l, .. }) if l == len
            ));
        }
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let ace = Card::new(Value::Ace, Suit::Spade);
        let mut cards = parse_cards("KdQd2c7h").unwrap();
        cards.push(ace);
        cards.push(ace);
        assert!(matches!(
            evaluate_best(&cards),
            Err(EquityError::InvalidHand { len: 6, .. })
        ));
    }

    #[test]
    fn test_board_chop() {
        let board = parse_cards("AsKsQsJsTs").unwrap();
        let mut one = parse_cards("2c3d").unwrap();
        let mut two = parse_cards("9h8h").unwrap();
        one.extend(&board);
        two.extend(&board);
        let (one, two) = (evaluate_best(&one).unwrap(), evaluate_best(&two).unwrap());
        assert_eq!(one, two);
        assert_eq!(vec![8, 14], one.to_vec());
    }

    #[test]
    fn test_subset_tables() {
        for (n, expected) in [(5, 1), (6, 6), (7, 21)] {
            let subsets = five_card_subsets(n).unwrap();
            assert_eq!(expected, subsets.len());
            for idx in subsets {
                assert!(idx.windows(2).all(|w| w[0] < w[1]));
                assert!(idx[4] < n);
            }
            let mut unique = subsets.to_vec();
            unique.dedup();
            assert_eq!(expected, unique.len());
        }
        assert!(five_card_subsets(4).is_none());
        assert!(five_card_subsets(8).is_none());
    }

    #[test]
    fn test_best_of_n_and_order_invariance() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut deck: FlatDeck = Deck::default().into();
        for _ in 0..2_000 {
            let cards: Vec<Card> = deck.deal_random(&mut rng, 7).to_vec();
            let best = evaluate_best(&cards).unwrap();

            for subset in FIVE_OF_SEVEN {
                let five = subset.map(|i| cards[i]);
                assert!(best >= evaluate_best(&five).unwrap());
            }
            for skip in 0..7 {
                let six: Vec<Card> = cards
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, c)| *c)
                    .collect();
                assert!(best >= evaluate_best(&six).unwrap());
            }

            let mut reversed = cards.clone();
            reversed.reverse();
            assert_eq!(best, evaluate_best(&reversed).unwrap());
            let mut rotated = cards.clone();
            rotated.rotate_left(3);
            assert_eq!(best, evaluate_best(&rotated).unwrap());
        }
    }

    #[test]
    fn test_five_card_category_counts() {
        // Known frequencies over all 2,598,960 five card hands.
        let cards: Vec<Card> = Deck::default().into_iter().collect();
        let mut counts = [0usize; 9];
        let n = cards.len();
        for a in 0..n {
            for b in a + 1..n {
                for c in b + 1..n {
                    for d in c + 1..n {
                        for e in d + 1..n {
                            let hand = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                            counts[rank_five(&hand).category() as usize] += 1;
                        }
                    }
                }
            }
        }
        assert_eq!(
            [1_302_540, 1_098_240, 123_552, 54_912, 10_200, 5_108, 3_744, 624, 40],
            counts
        );
    }

    #[test]
    fn test_display() {
        assert_eq!("Straight [5]", score("Ad2c3s4h5s").to_string());
    }
}
