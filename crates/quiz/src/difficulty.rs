//! Difficulty tiers. Each tier maps to one arithmetic operator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest tier (addition).
pub const MIN_LEVEL: u8 = 1;
/// Highest tier (division). Progression wraps back to [`MIN_LEVEL`] after this.
pub const MAX_LEVEL: u8 = 4;

/// Rejected difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("difficulty must be between 1 and 4, got {0}")]
pub struct InvalidDifficulty(pub u8);

/// Quiz difficulty, always in `MIN_LEVEL..=MAX_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const ADDITION: Difficulty = Difficulty(1);
    pub const SUBTRACTION: Difficulty = Difficulty(2);
    pub const MULTIPLICATION: Difficulty = Difficulty(3);
    pub const DIVISION: Difficulty = Difficulty(4);

    pub fn new(level: u8) -> Result<Self, InvalidDifficulty> {
        if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            Ok(Self(level))
        } else {
            Err(InvalidDifficulty(level))
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Next tier in the 1 → 2 → 3 → 4 → 1 cycle.
    pub fn next(self) -> Self {
        Self(self.0 % MAX_LEVEL + 1)
    }

    /// Every tier in ascending order.
    pub fn all() -> impl Iterator<Item = Difficulty> {
        (MIN_LEVEL..=MAX_LEVEL).map(Difficulty)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::ADDITION
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = InvalidDifficulty;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> u8 {
        d.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_every_tier() {
        let mut d = Difficulty::default();
        let mut seen = Vec::new();
        for _ in 0..9 {
            seen.push(d.level());
            d = d.next();
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 1, 2, 3, 4, 1]);
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert_eq!(Difficulty::new(0), Err(InvalidDifficulty(0)));
        assert_eq!(Difficulty::new(5), Err(InvalidDifficulty(5)));
        assert_eq!(Difficulty::new(4), Ok(Difficulty::DIVISION));
    }

    #[test]
    fn all_lists_four_tiers() {
        let levels: Vec<u8> = Difficulty::all().map(Difficulty::level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4]);
    }
}
