/// Expected versus actual chip result for one player in one showdown.
///
/// `ev_chips` is what the player's equity entitled them to and
/// `actual_chips` is what the runout gave them. Their difference is the
/// luck in the result and is always computed, never stored.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvRecord {
    hand_number: u64,
    player_id: String,
    equity: f32,
    pot_size: f32,
    amount_invested: f32,
    ev_chips: f32,
    actual_chips: f32,
}

impl EvRecord {
    /// Build a record from the player's equity when the chips went in.
    ///
    /// `equity` is clamped to `0..=1`.
    ///
    /// ```
    /// use poker_ledger::ev::EvRecord;
    ///
    /// // 20% to win a 1000 chip pot after putting in 500, and it got there.
    /// let record = EvRecord::new(1, "hero", 0.2, 1000.0, 500.0, true);
    /// assert_eq!(record.ev_chips(), -300.0);
    /// assert_eq!(record.actual_chips(), 500.0);
    /// assert_eq!(record.variance(), 800.0);
    /// ```
    pub fn new(
        hand_number: u64,
        player_id: impl Into<String>,
        equity: f32,
        pot_size: f32,
        amount_invested: f32,
        won: bool,
    ) -> Self {
        let equity = equity.clamp(0.0, 1.0);
        let ev_chips = equity * pot_size - amount_invested;
        let actual_chips = if won {
            pot_size - amount_invested
        } else {
            -amount_invested
        };
        Self {
            hand_number,
            player_id: player_id.into(),
            equity,
            pot_size,
            amount_invested,
            ev_chips,
            actual_chips,
        }
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn equity(&self) -> f32 {
        self.equity
    }

    pub fn pot_size(&self) -> f32 {
        self.pot_size
    }

    pub fn amount_invested(&self) -> f32 {
        self.amount_invested
    }

    pub fn ev_chips(&self) -> f32 {
        self.ev_chips
    }

    pub fn actual_chips(&self) -> f32 {
        self.actual_chips
    }

    /// Actual minus expected. Positive means the player ran above
    /// expectation.
    pub fn variance(&self) -> f32 {
        self.actual_chips - self.ev_chips
    }

    /// Result with the luck removed. For one showdown this is `ev_chips`.
    pub fn ev_adjusted(&self) -> f32 {
        self.ev_chips
    }
}
