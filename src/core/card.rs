use std::fmt;

use super::error::CardError;

/// Card rank, ordered from deuce to ace.
///
/// The discriminant doubles as the bit position used by the rank
/// evaluator, so the order here must never change.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Value {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

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
    /// All thirteen values, lowest first.
    pub const fn values() -> [Value; 13] {
        VALUES
    }

    /// Parse the single character used in hand notation (`2`..`9`, `T`,
    /// `J`, `Q`, `K`, `A`). Case insensitive.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            '2' => Some(Value::Two),
            '3' => Some(Value::Three),
            '4' => Some(Value::Four),
            '5' => Some(Value::Five),
            '6' => Some(Value::Six),
            '7' => Some(Value::Seven),
            '8' => Some(Value::Eight),
            '9' => Some(Value::Nine),
            'T' => Some(Value::Ten),
            'J' => Some(Value::Jack),
            'Q' => Some(Value::Queen),
            'K' => Some(Value::King),
            'A' => Some(Value::Ace),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Value::Two => '2',
            Value::Three => '3',
            Value::Four => '4',
            Value::Five => '5',
            Value::Six => '6',
            Value::Seven => '7',
            Value::Eight => '8',
            Value::Nine => '9',
            Value::Ten => 'T',
            Value::Jack => 'J',
            Value::Queen => 'Q',
            Value::King => 'K',
            Value::Ace => 'A',
        }
    }
}

/// Card suit. Suits have no strength in holdem, the ordering only exists
/// so cards can be sorted and used as map keys.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Suit {
    Spade = 0,
    Club = 1,
    Heart = 2,
    Diamond = 3,
}

const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    pub const fn suits() -> [Suit; 4] {
        SUITS
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            's' => Some(Suit::Spade),
            'c' => Some(Suit::Club),
            'h' => Some(Suit::Heart),
            'd' => Some(Suit::Diamond),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spade => 's',
            Suit::Club => 'c',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
        }
    }
}

/// A single playing card.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Card {
    pub value: Value,
    pub suit: Suit,
}

impl Card {
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// Index of this card in a 52 card deck, `0..52`.
    pub fn index(&self) -> usize {
        (self.suit as usize) * 13 + self.value as usize
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

impl TryFrom<&str> for Card {
    type Error = CardError;

    /// Parse a two character card like `"As"` or `"td"`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        let card = parse_one(&mut chars)?;
        match chars.next() {
            None => Ok(card),
            Some(extra) => Err(CardError::UnexpectedChar(extra)),
        }
    }
}

fn parse_one(chars: &mut impl Iterator<Item = char>) -> Result<Card, CardError> {
    let value_char = chars.next().ok_or(CardError::TooFewChars)?;
    let suit_char = chars.next().ok_or(CardError::TooFewChars)?;
    let value = Value::from_char(value_char).ok_or(CardError::UnexpectedValueChar(value_char))?;
    let suit = Suit::from_char(suit_char).ok_or(CardError::UnexpectedSuitChar(suit_char))?;
    Ok(Card::new(value, suit))
}

/// Parse a run of cards such as `"AsKd"` or `"Ah 7c 2d"`.
///
/// Whitespace between cards is ignored. Duplicates are rejected since no
/// real hand or board can contain the same card twice.
///
/// # Examples
///
/// ```
/// use poker_ledger::core::{parse_cards, Card, Suit, Value};
///
/// let cards = parse_cards("AsKd").unwrap();
/// assert_eq!(cards[0], Card::new(Value::Ace, Suit::Spade));
/// assert_eq!(cards[1], Card::new(Value::King, Suit::Diamond));
/// ```
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardError> {
    let mut chars = s.chars().filter(|c| !c.is_whitespace()).peekable();
    let mut cards: Vec<Card> = Vec::with_capacity(7);
    while chars.peek().is_some() {
        let card = parse_one(&mut chars)?;
        if cards.contains(&card) {
            return Err(CardError::DuplicateCard(card));
        }
        cards.push(card);
    }
    Ok(cards)
}

/// Every card in a standard deck, ordered by suit then value.
pub fn standard_deck() -> Vec<Card> {
    SUITS
        .iter()
        .flat_map(|&suit| VALUES.iter().map(move |&value| Card::new(value, suit)))
        .collect()
}
