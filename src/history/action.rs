use crate::stats::{ActionKind, BettingContext, PlayerAction, Street};

/// Whether a decision followed the baseline strategy. Stored as data so
/// nobody has to guess it from a free text explanation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    FollowedGto,
    Deviated { reason: String },
}

/// The minimum about an action needed to replay it through the tracker.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAction {
    pub street: Street,
    pub actor: String,
    pub kind: ActionKind,
    pub amount: Option<f32>,
    pub pot: f32,
    pub current_bet: f32,
    pub preflop_raise_count: usize,
    pub big_blind: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub decision: Option<DecisionKind>,
}

impl RecordedAction {
    /// Capture `action` by `actor` together with the table state it was
    /// taken in.
    pub fn new<C: BettingContext + ?Sized>(
        actor: impl Into<String>,
        action: &PlayerAction,
        context: &C,
    ) -> Self {
        Self {
            street: context.street(),
            actor: actor.into(),
            kind: action.kind,
            amount: action.amount,
            pot: context.pot(),
            current_bet: context.current_bet(),
            preflop_raise_count: context.preflop_raise_count(),
            big_blind: context.big_blind(),
            decision: None,
        }
    }

    pub fn with_decision(mut self, decision: DecisionKind) -> Self {
        self.decision = Some(decision);
        self
    }

    pub fn action(&self) -> PlayerAction {
        PlayerAction::new(self.kind, self.amount)
    }
}

impl BettingContext for RecordedAction {
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
