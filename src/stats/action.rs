use std::fmt;

/// Betting round of a holdem hand.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn is_postflop(self) -> bool {
        self != Street::Preflop
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(name)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl ActionKind {
    /// Bets, raises and all-ins. These feed aggression and c-bet counters.
    pub fn is_aggressive(self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn)
    }

    /// Any action that puts chips in the pot by choice.
    pub fn is_voluntary(self) -> bool {
        self == ActionKind::Call || self.is_aggressive()
    }
}

/// One action taken by a player, as reported by the rules engine.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerAction {
    pub kind: ActionKind,
    /// Chips committed by the action, when the engine reports it
    pub amount: Option<f32>,
}

impl PlayerAction {
    pub fn new(kind: ActionKind, amount: Option<f32>) -> Self {
        Self { kind, amount }
    }

    pub fn fold() -> Self {
        Self::new(ActionKind::Fold, None)
    }

    pub fn check() -> Self {
        Self::new(ActionKind::Check, None)
    }

    pub fn call(amount: f32) -> Self {
        Self::new(ActionKind::Call, Some(amount))
    }

    pub fn bet(amount: f32) -> Self {
        Self::new(ActionKind::Bet, Some(amount))
    }

    pub fn raise(amount: f32) -> Self {
        Self::new(ActionKind::Raise, Some(amount))
    }

    pub fn all_in(amount: f32) -> Self {
        Self::new(ActionKind::AllIn, Some(amount))
    }
}

/// The slice of table state the observation tracker needs to classify an
/// action. All values describe the table immediately before the action.
///
/// A live rules engine and a recorded hand history can both provide this,
/// which is what lets stored sessions be replayed without an engine.
pub trait BettingContext {
    fn street(&self) -> Street;
    fn pot(&self) -> f32;
    fn current_bet(&self) -> f32;
    fn big_blind(&self) -> f32;
    /// Bets, raises and all-ins already made preflop this hand.
    fn preflop_raise_count(&self) -> usize;
}

/// Plain value implementation of [`BettingContext`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionContext {
    pub street: Street,
    pub pot: f32,
    pub current_bet: f32,
    pub big_blind: f32,
    pub preflop_raise_count: usize,
}

impl ActionContext {
    /// Context for the given street with an empty pot and no bet to face.
    pub fn new(street: Street, big_blind: f32) -> Self {
        Self {
            street,
            pot: 0.0,
            current_bet: 0.0,
            big_blind,
            preflop_raise_count: 0,
        }
    }

    pub fn with_pot(mut self, pot: f32) -> Self {
        self.pot = pot;
        self
    }

    pub fn with_current_bet(mut self, current_bet: f32) -> Self {
        self.current_bet = current_bet;
        self
    }

    pub fn with_preflop_raises(mut self, preflop_raise_count: usize) -> Self {
        self.preflop_raise_count = preflop_raise_count;
        self
    }
}

impl BettingContext for ActionContext {
    fn street(&self) -> Street {
        self.street
    }

    fn pot(&self) -> f32 {
        self.pot
    }

    fn current_bet(&self) -> f32 {
        self.current_bet
    }

    fn big_blind(&self) -> f32 {
        self.big_blind
    }

    fn preflop_raise_count(&self) -> usize {
        self.preflop_raise_count
    }
}
