use std::fmt;
use std::str::FromStr;

use super::EquityError;

/// Card rank or value.
/// This is basically the face value - 2
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Take a u8 and convert it to a value.
    /// Anything past the ace wraps around.
    pub fn from_u8(v: u8) -> Value {
        VALUES[(v % 13) as usize]
    }

    /// Get all of the `Value`'s that are possible.
    /// This is used to iterate through all possible
    /// values when creating a new deck.
    pub fn values() -> [Value; 13] {
        VALUES
    }

    /// The face rank used by hand scores. Two is 2, the ace is 14.
    ///
    /// ```
    /// use holdem_equity::core::Value;
    ///
    /// assert_eq!(14, Value::Ace.rank());
    /// assert_eq!(10, Value::Ten.rank());
    /// ```
    pub fn rank(self) -> u8 {
        self as u8 + 2
    }

    pub fn from_char(c: char) -> Option<Value> {
        match c {
            'A' => Some(Value::Ace),
            'K' => Some(Value::King),
            'Q' => Some(Value::Queen),
            'J' => Some(Value::Jack),
            'T' => Some(Value::Ten),
            '9' => Some(Value::Nine),
            '8' => Some(Value::Eight),
            '7' => Some(Value::Seven),
            '6' => Some(Value::Six),
            '5' => Some(Value::Five),
            '4' => Some(Value::Four),
            '3' => Some(Value::Three),
            '2' => Some(Value::Two),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Value::Ace => 'A',
            Value::King => 'K',
            Value::Queen => 'Q',
            Value::Jack => 'J',
            Value::Ten => 'T',
            Value::Nine => '9',
            Value::Eight => '8',
            Value::Seven => '7',
            Value::Six => '6',
            Value::Five => '5',
            Value::Four => '4',
            Value::Three => '3',
            Value::Two => '2',
        }
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    pub fn from_u8(s: u8) -> Suit {
        SUITS[(s % 4) as usize]
    }

    pub fn from_char(s: char) -> Option<Suit> {
        match s {
            'd' => Some(Suit::Diamond),
            's' => Some(Suit::Spade),
            'h' => Some(Suit::Heart),
            'c' => Some(Suit::Club),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Diamond => 'd',
            Suit::Spade => 's',
            Suit::Heart => 'h',
            Suit::Club => 'c',
        }
    }

    /// Plural english name, as shown in card pickers.
    pub fn name(self) -> &'static str {
        match self {
            Suit::Spade => "Spades",
            Suit::Club => "Clubs",
            Suit::Heart => "Hearts",
            Suit::Diamond => "Diamonds",
        }
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
///
/// The text form is the two character code used everywhere
/// cards cross a boundary: value then suit, `As`, `Td`, `2c`.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// Long form label, e.g. `AS (Spades)`.
    ///
    /// ```
    /// use holdem_equity::core::{Card, Suit, Value};
    ///
    /// assert_eq!("TD (Diamonds)", Card::new(Value::Ten, Suit::Diamond).label());
    /// ```
    pub fn label(&self) -> String {
        format!(
            "{}{} ({})",
            self.value.to_char(),
            self.suit.to_char().to_ascii_uppercase(),
            self.suit.name()
        )
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        (card.value as u8) * 4 + card.suit as u8
    }
}

impl From<u8> for Card {
    fn from(idx: u8) -> Self {
        Self {
            value: Value::from_u8(idx / 4),
            suit: Suit::from_u8(idx % 4),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = EquityError;

    /// Parse exactly one two character card code.
    ///
    /// ```
    /// use holdem_equity::core::{Card, Suit, Value};
    ///
    /// let card: Card = "Td".parse().unwrap();
    /// assert_eq!(Card::new(Value::Ten, Suit::Diamond), card);
    /// assert!("1s".parse::<Card>().is_err());
    /// ```
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let mut chars = code.chars();
        let value = chars.next().and_then(Value::from_char);
        let suit = chars.next().and_then(Suit::from_char);
        match (value, suit, chars.next()) {
            (Some(value), Some(suit), None) => Ok(Card { value, suit }),
            _ => Err(EquityError::InvalidCard(code.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a run of card codes such as `AsKd` or `Qh 7c 2d`.
///
/// Whitespace and commas between codes are ignored. A card repeated
/// in the string is an error.
///
/// ```
/// use holdem_equity::core::parse_cards;
///
/// let board = parse_cards("Kd7c2s").unwrap();
/// assert_eq!(3, board.len());
/// assert!(parse_cards("AsAs").is_err());
/// ```
pub fn parse_cards(cards_str: &str) -> Result<Vec<Card>, EquityError> {
    let compact: Vec<char> = cards_str
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let mut seen = super::CardBitSet::new();
    let mut cards = Vec::with_capacity(compact.len() / 2);
    for pair in compact.chunks(2) {
        let code: String = pair.iter().collect();
        let card: Card = code.parse()?;
        if seen.contains(card) {
            return Err(EquityError::DuplicateCard(card));
        }
        seen.insert(card);
        cards.push(card);
    }
    Ok(cards)
}
