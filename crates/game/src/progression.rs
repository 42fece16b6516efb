//! Player progression: coins, difficulty, home planet and the empire.

use crate::catalog::PlanetId;
use quiz::Difficulty;

/// Coins paid for a correct answer at each difficulty tier.
pub fn reward_for(difficulty: Difficulty) -> u32 {
    match difficulty.level() {
        1 => 5,
        2 => 10,
        3 => 15,
        _ => 20,
    }
}

/// `percent` of `coins`, rounded up. Integer math so 10% of 30 is exactly 3.
pub fn tribute_amount(coins: u32, percent: u32) -> u32 {
    let owed = (u64::from(coins) * u64::from(percent)).div_ceil(100);
    u32::try_from(owed).unwrap_or(u32::MAX)
}

/// Mutable state of one play session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    coins: u32,
    difficulty: Difficulty,
    current_planet: Option<PlanetId>,
    /// Unlocked planets in acquisition order. Never holds duplicates.
    empire: Vec<PlanetId>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh progress with `home` already owned and selected.
    pub fn with_home(home: PlanetId) -> Self {
        Self {
            current_planet: Some(home),
            empire: vec![home],
            ..Self::default()
        }
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn current_planet(&self) -> Option<PlanetId> {
        self.current_planet
    }

    pub fn empire(&self) -> &[PlanetId] {
        &self.empire
    }

    pub fn is_unlocked(&self, id: PlanetId) -> bool {
        self.empire.contains(&id)
    }

    pub fn earn(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Pay the reward for the current difficulty. Returns the amount paid.
    pub fn award_correct_answer(&mut self) -> u32 {
        let reward = reward_for(self.difficulty);
        self.earn(reward);
        reward
    }

    /// Move to the next tier in the cycle and return it.
    pub fn advance_difficulty(&mut self) -> Difficulty {
        self.difficulty = self.difficulty.next();
        self.difficulty
    }

    /// Deduct `amount` if affordable. Leaves coins untouched and returns false otherwise.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        match self.coins.checked_sub(amount) {
            Some(rest) => {
                self.coins = rest;
                true
            }
            None => false,
        }
    }

    /// Add a planet to the empire. Returns false if it was already there.
    pub fn conquer(&mut self, id: PlanetId) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.empire.push(id);
        true
    }

    /// Make `id` the home planet, adding it to the empire if needed.
    pub fn settle(&mut self, id: PlanetId) {
        self.conquer(id);
        self.current_planet = Some(id);
    }

    /// Remove a planet from the empire. If it was home, the oldest remaining
    /// planet becomes home. Returns false if the planet was not owned.
    pub fn surrender(&mut self, id: PlanetId) -> bool {
        let before = self.empire.len();
        self.empire.retain(|&p| p != id);
        if self.empire.len() == before {
            return false;
        }
        if self.current_planet == Some(id) {
            self.current_planet = self.empire.first().copied();
        }
        true
    }

    #[cfg(test)]
    pub(crate) fn set_coins(&mut self, coins: u32) {
        self.coins = coins;
    }

    #[cfg(test)]
    pub(crate) fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }
}
