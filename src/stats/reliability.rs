use std::fmt;

/// Hands needed before statistics are trusted for exploitation.
pub const MIN_RELIABLE_SAMPLE_SIZE: usize = 50;

/// Below this many hands percentages are noise and are not displayed.
pub const MIN_DISPLAY_SAMPLE_SIZE: usize = 20;

pub const RELIABLE_SAMPLE_SIZE: usize = 100;

pub const VERY_RELIABLE_SAMPLE_SIZE: usize = 500;

/// Confidence tier for a sample of observed hands. Presentation only, it
/// never changes what gets counted.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SampleReliability {
    /// Fewer than 20 hands
    Insufficient,
    /// 20 to 49 hands
    Directional,
    /// 50 to 99 hands
    Exploitable,
    /// 100 to 499 hands
    Reliable,
    /// 500 hands or more
    VeryReliable,
}

impl SampleReliability {
    pub fn from_hands(hands_played: usize) -> Self {
        if hands_played < MIN_DISPLAY_SAMPLE_SIZE {
            SampleReliability::Insufficient
        } else if hands_played < MIN_RELIABLE_SAMPLE_SIZE {
            SampleReliability::Directional
        } else if hands_played < RELIABLE_SAMPLE_SIZE {
            SampleReliability::Exploitable
        } else if hands_played < VERY_RELIABLE_SAMPLE_SIZE {
            SampleReliability::Reliable
        } else {
            SampleReliability::VeryReliable
        }
    }

    pub fn is_exploitable(self) -> bool {
        self >= SampleReliability::Exploitable
    }

    pub fn note(self) -> &'static str {
        match self {
            SampleReliability::Insufficient => "very low sample, do not exploit",
            SampleReliability::Directional => "low sample, stats unreliable",
            SampleReliability::Exploitable => "moderate sample, use with caution",
            SampleReliability::Reliable | SampleReliability::VeryReliable => {
                "good sample, stats reliable"
            }
        }
    }
}

impl fmt::Display for SampleReliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.note())
    }
}
