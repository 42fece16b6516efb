//! Invasions: a defend-or-lose encounter that may follow a conquest.
//!
//! Idle → (roll) → Active/Defending → Active/AwaitingChoice → resolved → Idle.
//! The pending step lives inside [`InvasionState::roll`]: it picks the target and
//! invader and either opens the encounter or falls back to idle when every planet
//! is already owned.

use crate::catalog::{Catalog, PlanetId};
use crate::config::InvasionRules;
use crate::error::GameError;
use crate::progression::{tribute_amount, Progress};
use quiz::Challenge;
use rand::seq::SliceRandom;
use rand::Rng;

/// Where an active invasion stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The challenge can still be answered.
    Defending,
    /// Every attempt failed; only tribute or surrender remain.
    AwaitingChoice,
}

/// One open invasion.
#[derive(Debug, Clone, PartialEq)]
pub struct Invasion {
    pub target: PlanetId,
    pub invader: PlanetId,
    pub challenge: Challenge,
    attempts: u32,
    stage: Stage,
}

impl Invasion {
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

/// Result of the post-conquest invasion roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollOutcome {
    /// An invasion is now active.
    Started,
    /// The dice said no.
    Quiet,
    /// The empire has a single planet, so nothing is worth invading.
    EmpireTooSmall,
    /// Another invasion is already active.
    AlreadyActive,
    /// Every catalog planet is owned; there is nobody left to invade.
    NoAvailableInvader,
}

/// Result of one defense answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefenseResult {
    /// Correct; the invasion is over and the target is safe.
    Defended(Resolved),
    /// Wrong, but more attempts remain.
    Retry { attempts_left: u32 },
    /// Wrong with no attempts left; tribute or surrender must be chosen.
    Overrun,
}

/// How an invasion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Defended,
    Tribute { paid: u32 },
    Surrendered,
}

/// A finished invasion and how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub target: PlanetId,
    pub invader: PlanetId,
    pub resolution: Resolution,
}

/// At most one invasion exists at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InvasionState {
    #[default]
    Idle,
    Active(Invasion),
}

impl InvasionState {
    pub fn is_active(&self) -> bool {
        matches!(self, InvasionState::Active(_))
    }

    pub fn active(&self) -> Option<&Invasion> {
        match self {
            InvasionState::Active(invasion) => Some(invasion),
            InvasionState::Idle => None,
        }
    }

    /// Roll for an invasion after a conquest.
    pub fn roll<R: Rng + ?Sized>(
        &mut self,
        progress: &Progress,
        catalog: &Catalog,
        rules: &InvasionRules,
        rng: &mut R,
    ) -> RollOutcome {
        if self.is_active() {
            return RollOutcome::AlreadyActive;
        }
        if progress.empire().len() <= 1 {
            return RollOutcome::EmpireTooSmall;
        }
        if !rng.gen_bool(rules.chance) {
            return RollOutcome::Quiet;
        }
        self.begin(progress, catalog, rng)
    }

    /// Pending → Active. Picks a random owned target and a random unowned invader.
    fn begin<R: Rng + ?Sized>(&mut self, progress: &Progress, catalog: &Catalog, rng: &mut R) -> RollOutcome {
        let Some(&target) = progress.empire().choose(rng) else {
            return RollOutcome::EmpireTooSmall;
        };
        let locked: Vec<PlanetId> = catalog.ids().filter(|&id| !progress.is_unlocked(id)).collect();
        let Some(&invader) = locked.choose(rng) else {
            log::debug!("Invasion rolled but every planet is already conquered");
            return RollOutcome::NoAvailableInvader;
        };
        log::info!("{} is invading {}", catalog.name(invader), catalog.name(target));
        *self = InvasionState::Active(Invasion {
            target,
            invader,
            challenge: Challenge::generate(rng),
            attempts: 0,
            stage: Stage::Defending,
        });
        RollOutcome::Started
    }

    /// Answer the invasion challenge.
    pub fn defend(&mut self, input: &str, rules: &InvasionRules) -> Result<DefenseResult, GameError> {
        let InvasionState::Active(invasion) = self else {
            return Err(GameError::NoActiveInvasion);
        };
        if invasion.stage == Stage::AwaitingChoice {
            return Err(GameError::DefenseClosed);
        }
        if invasion.challenge.check_input(input, rules.tolerance) {
            let resolved = Resolved {
                target: invasion.target,
                invader: invasion.invader,
                resolution: Resolution::Defended,
            };
            *self = InvasionState::Idle;
            return Ok(DefenseResult::Defended(resolved));
        }
        invasion.attempts += 1;
        if invasion.attempts >= rules.max_attempts {
            invasion.stage = Stage::AwaitingChoice;
            Ok(DefenseResult::Overrun)
        } else {
            Ok(DefenseResult::Retry { attempts_left: rules.max_attempts - invasion.attempts })
        }
    }

    /// Close the invasion and hand it back.
    fn take(&mut self) -> Option<Invasion> {
        match std::mem::take(self) {
            InvasionState::Active(invasion) => Some(invasion),
            InvasionState::Idle => None,
        }
    }

    fn awaiting_choice(&self) -> Result<&Invasion, GameError> {
        match self {
            InvasionState::Idle => Err(GameError::NoActiveInvasion),
            InvasionState::Active(invasion) if invasion.stage == Stage::AwaitingChoice => Ok(invasion),
            InvasionState::Active(_) => Err(GameError::ChoiceNotAvailable),
        }
    }

    /// Pay the invader off. Fails without any change when coins fall short.
    pub fn pay_tribute(
        &mut self,
        progress: &mut Progress,
        catalog: &Catalog,
        rules: &InvasionRules,
    ) -> Result<Resolved, GameError> {
        let invasion = self.awaiting_choice()?;
        let amount = tribute_amount(progress.coins(), rules.tribute_percent);
        if !progress.try_spend(amount) {
            return Err(GameError::InsufficientFunds {
                item: format!("tribute to {}", catalog.name(invasion.invader)),
                needed: amount,
                available: progress.coins(),
            });
        }
        let invasion = self.take().ok_or(GameError::NoActiveInvasion)?;
        log::info!("Paid {} coins of tribute to {}", amount, catalog.name(invasion.invader));
        Ok(Resolved {
            target: invasion.target,
            invader: invasion.invader,
            resolution: Resolution::Tribute { paid: amount },
        })
    }

    /// Give the targeted planet up.
    pub fn surrender(&mut self, progress: &mut Progress, catalog: &Catalog) -> Result<Resolved, GameError> {
        self.awaiting_choice()?;
        let invasion = self.take().ok_or(GameError::NoActiveInvasion)?;
        progress.surrender(invasion.target);
        log::info!("{} surrendered to {}", catalog.name(invasion.target), catalog.name(invasion.invader));
        Ok(Resolved {
            target: invasion.target,
            invader: invasion.invader,
            resolution: Resolution::Surrendered,
        })
    }
}
