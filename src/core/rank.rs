use super::card::Card;
use super::error::CardError;

/// Strength of a made hand.
///
/// Variants are ordered weakest first and the `u32` payload orders hands
/// within a category, so the derived `Ord` is a total order over every
/// possible holdem hand. Two hands that split a pot compare equal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub enum Rank {
    HighCard(u32),
    OnePair(u32),
    TwoPair(u32),
    ThreeOfAKind(u32),
    Straight(u32),
    Flush(u32),
    FullHouse(u32),
    FourOfAKind(u32),
    StraightFlush(u32),
}

/// The capability the equity estimator consumes: given two private cards
/// and up to five public cards produce a comparable `Rank`.
///
/// Implementations must reject malformed input with an error rather than
/// panic; the estimator turns those errors into a degraded result.
pub trait HandRanker {
    fn rank(&self, hole_cards: &[Card], board: &[Card]) -> Result<Rank, CardError>;
}

impl<R: HandRanker + ?Sized> HandRanker for &R {
    fn rank(&self, hole_cards: &[Card], board: &[Card]) -> Result<Rank, CardError> {
        (**self).rank(hole_cards, board)
    }
}

/// Bit set evaluator that finds the best five card hand out of the two
/// hole cards plus the board.
#[derive(Debug, Default, Clone, Copy)]
pub struct SevenCardRanker;

impl HandRanker for SevenCardRanker {
    fn rank(&self, hole_cards: &[Card], board: &[Card]) -> Result<Rank, CardError> {
        if hole_cards.len() != 2 {
            return Err(CardError::WrongHoleCardCount(hole_cards.len()));
        }
        if board.len() > 5 {
            return Err(CardError::TooManyBoardCards(board.len()));
        }
        let mut seen: u64 = 0;
        for card in hole_cards.iter().chain(board) {
            let bit = 1u64 << card.index();
            if seen & bit != 0 {
                return Err(CardError::DuplicateCard(*card));
            }
            seen |= bit;
        }
        Ok(rank_cards(hole_cards.iter().chain(board).copied()))
    }
}

/// Mask of A-2-3-4-5, the only straight where the ace plays low.
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Per-value and per-suit bit sets for a group of cards.
struct Tally {
    /// Every value present at least once.
    values: u32,
    /// `by_count[n]` holds the values that appear exactly `n` times.
    by_count: [u32; 5],
    by_suit: [u32; 4],
}

impl Tally {
    fn new(cards: impl Iterator<Item = Card>) -> Self {
        let mut counts = [0u8; 13];
        let mut by_suit = [0u32; 4];
        let mut values = 0u32;
        for card in cards {
            let v = card.value as usize;
            counts[v] += 1;
            values |= 1 << v;
            by_suit[card.suit as usize] |= 1 << v;
        }
        let mut by_count = [0u32; 5];
        for (v, &n) in counts.iter().enumerate() {
            by_count[n as usize] |= 1 << v;
        }
        Self {
            values,
            by_count,
            by_suit,
        }
    }
}

/// Highest straight contained in `values`, 0 for the wheel up to 9 for
/// broadway.
fn straight_top(values: u32) -> Option<u32> {
    // A bit survives the shifted ANDs only when it tops a run of five, so the
    // leading zeros locate the highest straight.
    let runs = values & (values << 1) & (values << 2) & (values << 3) & (values << 4);
    if runs != 0 {
        Some(32 - 4 - runs.leading_zeros())
    } else if values & WHEEL == WHEEL {
        Some(0)
    } else {
        None
    }
}

/// Only the highest set bit, or 0 for an empty set. Short boards can leave
/// no kicker at all.
fn highest_bit(bits: u32) -> u32 {
    if bits == 0 {
        0
    } else {
        1 << (31 - bits.leading_zeros())
    }
}

/// Drop the lowest set bits until only `n` remain.
fn top_n(bits: u32, n: u32) -> u32 {
    let mut kept = bits;
    while kept.count_ones() > n {
        kept &= kept - 1;
    }
    kept
}

/// Rank any group of up to seven distinct cards.
pub fn rank_cards(cards: impl Iterator<Item = Card>) -> Rank {
    let t = Tally::new(cards);
    let quads = t.by_count[4];
    let trips = t.by_count[3];
    let pairs = t.by_count[2];

    if let Some(flush) = t.by_suit.iter().copied().find(|s| s.count_ones() >= 5) {
        return match straight_top(flush) {
            Some(top) => Rank::StraightFlush(top),
            None => Rank::Flush(top_n(flush, 5)),
        };
    }
    if quads != 0 {
        let kicker = highest_bit(t.values ^ quads);
        return Rank::FourOfAKind((quads << 13) | kicker);
    }
    if trips.count_ones() >= 2 {
        // The lower set plays as the pair.
        let set = highest_bit(trips);
        return Rank::FullHouse((set << 13) | (trips ^ set));
    }
    if trips != 0 && pairs != 0 {
        return Rank::FullHouse((trips << 13) | highest_bit(pairs));
    }
    if let Some(top) = straight_top(t.values) {
        return Rank::Straight(top);
    }
    if trips != 0 {
        return Rank::ThreeOfAKind((trips << 13) | top_n(t.values ^ trips, 2));
    }
    match pairs.count_ones() {
        0 => Rank::HighCard(top_n(t.values, 5)),
        1 => Rank::OnePair((pairs << 13) | top_n(t.values ^ pairs, 3)),
        _ => {
            let two = top_n(pairs, 2);
            Rank::TwoPair((two << 13) | highest_bit(t.values ^ two))
        }
    }
}
