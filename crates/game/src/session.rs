//! The game session: owns every piece of state and applies player actions.
//!
//! All rule changes happen synchronously inside these methods. The scene only
//! follows along on [`GameSession::tick`] and never feeds back into the rules.

use crate::catalog::{Catalog, Planet, PlanetId};
use crate::cinematic::{FlybyPhase, Scene};
use crate::config::{GameConfig, InvasionRules};
use crate::error::GameError;
use crate::invasion::{DefenseResult, InvasionState, Resolution, Resolved, RollOutcome};
use crate::progression::Progress;
use crate::state::{GameMessages, Screen};
use engine_core::PhaseEvent;
use quiz::Question;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// What a quiz answer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Coins were paid. `choose_planet` is set when the selection screen opened
    /// because no home planet exists yet.
    Correct { reward: u32, choose_planet: bool },
    Incorrect,
}

/// A completed purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub planet: PlanetId,
    pub cost: u32,
    /// What the post-conquest invasion roll produced.
    pub invasion: RollOutcome,
}

/// How a planet appears on the selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordability {
    Conquered,
    /// Free and selectable as the home planet.
    Claimable,
    Affordable,
    TooExpensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanetOption {
    pub id: PlanetId,
    pub cost: u32,
    pub affordability: Affordability,
}

/// Info card for one planet.
#[derive(Debug, Clone, Copy)]
pub struct PlanetInfo<'a> {
    pub planet: &'a Planet,
    pub conquered: bool,
}

pub struct GameSession {
    config: GameConfig,
    rules: InvasionRules,
    catalog: Catalog,
    progress: Progress,
    question: Question,
    screen: Screen,
    invasion: InvasionState,
    rng: StdRng,
    pub messages: GameMessages,
    scene: Scene,
}

impl GameSession {
    /// Fresh session. The catalog's free starting planet, if any, is the home planet.
    pub fn new(config: GameConfig, catalog: Catalog) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let progress = match catalog.starting_planet() {
            Some(home) => Progress::with_home(home),
            None => Progress::new(),
        };
        let question = Question::generate(progress.difficulty(), &mut rng);
        let scene = Scene::new(&catalog);
        log::info!(
            "Session started: {} planets, home {}",
            catalog.len(),
            progress.current_planet().map(|id| catalog.name(id)).unwrap_or("none")
        );
        Self {
            rules: config.invasion_rules(),
            config,
            catalog,
            progress,
            question,
            screen: Screen::Start,
            invasion: InvasionState::Idle,
            rng,
            messages: GameMessages::new(),
            scene,
        }
    }

    /// Invasion tuning in effect, after clamping.
    pub fn invasion_rules(&self) -> &InvasionRules {
        &self.rules
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn invasion(&self) -> &InvasionState {
        &self.invasion
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Leave the start screen. Without a home planet the player picks one first.
    pub fn begin(&mut self) {
        if self.screen != Screen::Start {
            return;
        }
        if self.progress.current_planet().is_some() {
            self.screen = Screen::Quiz;
        } else {
            self.screen = Screen::PlanetSelection;
            self.messages.info("Choose a free planet to start your empire.");
        }
    }

    /// The expand-empire action is offered once a home exists, while the quiz shows.
    pub fn expand_available(&self) -> bool {
        self.progress.current_planet().is_some() && self.screen == Screen::Quiz && !self.invasion.is_active()
    }

    /// Show planet selection. Works from any screen, the start screen included.
    pub fn open_selection(&mut self) {
        self.screen = Screen::PlanetSelection;
    }

    pub fn back(&mut self) {
        if self.screen == Screen::PlanetSelection {
            self.screen = Screen::Quiz;
        }
    }

    fn ensure_no_invasion(&self) -> Result<(), GameError> {
        if self.invasion.is_active() {
            Err(GameError::InvasionInProgress)
        } else {
            Ok(())
        }
    }

    fn lookup(&self, name: &str) -> Result<PlanetId, GameError> {
        self.catalog
            .find(name)
            .ok_or_else(|| GameError::UnknownPlanet(name.trim().to_string()))
    }

    fn next_question(&mut self) {
        let difficulty = self.progress.advance_difficulty();
        self.question = Question::generate(difficulty, &mut self.rng);
        log::debug!("Difficulty {}: {}", difficulty, self.question);
    }

    /// Check an answer to the current question.
    pub fn submit_answer(&mut self, input: &str) -> Result<AnswerOutcome, GameError> {
        self.ensure_no_invasion()?;
        if self.screen == Screen::Start {
            self.screen = Screen::Quiz;
        }
        if !self.question.check(input) {
            self.messages.warning("Try again!");
            return Ok(AnswerOutcome::Incorrect);
        }
        let reward = self.progress.award_correct_answer();
        self.messages.success(format!("Correct! You earned {} coins.", reward));
        if self.progress.current_planet().is_none() {
            self.screen = Screen::PlanetSelection;
            return Ok(AnswerOutcome::Correct { reward, choose_planet: true });
        }
        self.next_question();
        Ok(AnswerOutcome::Correct { reward, choose_planet: false })
    }

    /// Buy a planet with coins, then roll for an invasion.
    pub fn purchase(&mut self, name: &str) -> Result<PurchaseReceipt, GameError> {
        self.ensure_no_invasion()?;
        let id = self.lookup(name)?;
        let planet = self.catalog.planet(id);
        if self.progress.current_planet().is_none() && planet.is_free() {
            self.select_starting_planet(name)?;
            return Ok(PurchaseReceipt { planet: id, cost: 0, invasion: RollOutcome::EmpireTooSmall });
        }
        if self.progress.is_unlocked(id) {
            return Err(GameError::AlreadyConquered(planet.name.clone()));
        }
        let cost = planet.cost;
        if !self.progress.try_spend(cost) {
            self.messages.warning(format!("Not enough coins to conquer {}.", planet.name));
            return Err(GameError::InsufficientFunds {
                item: planet.name.clone(),
                needed: cost,
                available: self.progress.coins(),
            });
        }

        if self.progress.current_planet().is_none() {
            self.progress.settle(id);
        } else {
            self.progress.conquer(id);
        }
        self.screen = Screen::Quiz;
        let name = planet.name.clone();
        self.messages.success(format!("Planet {} conquered!", name));
        log::info!("Conquered {} for {} coins ({} left)", name, cost, self.progress.coins());
        if self.config.cinematics {
            self.scene.start_flyby(&self.catalog, id);
        }

        let invasion = self
            .invasion
            .roll(&self.progress, &self.catalog, &self.rules, &mut self.rng);
        log::debug!("Invasion roll after {}: {:?}", name, invasion);
        if let Some(active) = self.invasion.active() {
            self.messages.warning(format!(
                "{} is planning an attack on {}!",
                self.catalog.name(active.invader),
                self.catalog.name(active.target)
            ));
            self.messages.info(active.challenge.text().to_string());
        }
        Ok(PurchaseReceipt { planet: id, cost, invasion })
    }

    /// Claim a free planet as home without spending coins.
    pub fn select_starting_planet(&mut self, name: &str) -> Result<PlanetId, GameError> {
        self.ensure_no_invasion()?;
        let id = self.lookup(name)?;
        let planet = self.catalog.planet(id);
        if let Some(home) = self.progress.current_planet() {
            return Err(GameError::AlreadyStarted(self.catalog.name(home).to_string()));
        }
        if !planet.is_free() {
            return Err(GameError::NotFree(planet.name.clone()));
        }
        self.progress.settle(id);
        self.screen = Screen::Quiz;
        self.messages
            .success(format!("Empire started on {}! Solve questions to earn coins.", planet.name));
        log::info!("Empire started on {}", planet.name);
        self.next_question();
        Ok(id)
    }

    /// Every catalog planet with how it can be acquired right now.
    pub fn planet_options(&self) -> Vec<PlanetOption> {
        let homeless = self.progress.current_planet().is_none();
        self.catalog
            .iter()
            .map(|(id, planet)| {
                let affordability = if homeless && planet.is_free() {
                    Affordability::Claimable
                } else if self.progress.is_unlocked(id) {
                    Affordability::Conquered
                } else if self.progress.coins() >= planet.cost {
                    Affordability::Affordable
                } else {
                    Affordability::TooExpensive
                };
                PlanetOption { id, cost: planet.cost, affordability }
            })
            .collect()
    }

    pub fn planet_info(&self, name: &str) -> Result<PlanetInfo<'_>, GameError> {
        let id = self.lookup(name)?;
        Ok(PlanetInfo {
            planet: self.catalog.planet(id),
            conquered: self.progress.is_unlocked(id),
        })
    }

    /// Answer the invasion challenge.
    pub fn defend(&mut self, input: &str) -> Result<DefenseResult, GameError> {
        let result = self.invasion.defend(input, &self.rules)?;
        match result {
            DefenseResult::Defended(resolved) => {
                let target = self.catalog.name(resolved.target);
                let invader = self.catalog.name(resolved.invader);
                self.messages
                    .success(format!("Correct! You defended {} with brainpower!", target));
                self.messages.info(format!(
                    "{} was successfully defended against {}.",
                    target, invader
                ));
                log::info!("{} defended against {}", target, invader);
            }
            DefenseResult::Retry { .. } => self.messages.warning("Incorrect. You get one more try..."),
            DefenseResult::Overrun => self
                .messages
                .warning("Still incorrect. Choose how to handle the invasion."),
        }
        Ok(result)
    }

    pub fn pay_tribute(&mut self) -> Result<Resolved, GameError> {
        let resolved = self
            .invasion
            .pay_tribute(&mut self.progress, &self.catalog, &self.rules)?;
        if let Resolution::Tribute { paid } = resolved.resolution {
            self.messages.warning(format!("Paid {} coins as tribute. For now...", paid));
            self.messages.info(format!(
                "Tribute paid to {}. {} is safe.",
                self.catalog.name(resolved.invader),
                self.catalog.name(resolved.target)
            ));
        }
        Ok(resolved)
    }

    pub fn surrender(&mut self) -> Result<Resolved, GameError> {
        let resolved = self.invasion.surrender(&mut self.progress, &self.catalog)?;
        self.messages.warning(format!(
            "{} has been surrendered to {}.",
            self.catalog.name(resolved.target),
            self.catalog.name(resolved.invader)
        ));
        Ok(resolved)
    }

    /// Advance orbits and camera animations.
    pub fn tick(&mut self, dt: f32, fixed_steps: u32) -> Vec<PhaseEvent<FlybyPhase>> {
        let events = self.scene.update(&self.catalog, dt, fixed_steps);
        for event in &events {
            log::debug!("Flyby {:?}", event);
        }
        events
    }

    pub fn reset_view(&mut self) {
        self.scene.reset_view();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invasion::Stage;
    use quiz::{Difficulty, Operator};

    fn config(invasion_chance: f64) -> GameConfig {
        GameConfig { invasion_chance, seed: Some(11), ..GameConfig::default() }
    }

    fn session(invasion_chance: f64) -> GameSession {
        let mut session = GameSession::new(config(invasion_chance), Catalog::solar_system());
        session.begin();
        session
    }

    fn answer(session: &mut GameSession) -> AnswerOutcome {
        let text = session.question().answer().to_string();
        session.submit_answer(&text).unwrap()
    }

    fn earn(session: &mut GameSession, coins: u32) {
        while session.progress().coins() < coins {
            answer(session);
        }
    }

    #[test]
    fn starts_on_earth_with_the_quiz() {
        let session = session(0.4);
        let earth = session.catalog().find("Earth").unwrap();
        assert_eq!(session.progress().current_planet(), Some(earth));
        assert_eq!(session.progress().empire(), &[earth]);
        assert_eq!(session.screen(), Screen::Quiz);
        assert!(session.expand_available());
    }

    #[test]
    fn first_question_pays_five() {
        let mut session = session(0.4);
        session.question = Question::new(Operator::Add, 3, 4).unwrap();
        assert_eq!(session.question().to_string(), "What is 3 + 4?");
        assert_eq!(
            session.submit_answer(" 7 ").unwrap(),
            AnswerOutcome::Correct { reward: 5, choose_planet: false }
        );
        assert_eq!(session.progress().coins(), 5);
        assert_eq!(session.progress().difficulty(), Difficulty::SUBTRACTION);
    }

    #[test]
    fn wrong_answers_change_nothing() {
        let mut session = session(0.4);
        let before = session.progress().clone();
        let wrong = (session.question().answer() + 1).to_string();
        assert_eq!(session.submit_answer(&wrong).unwrap(), AnswerOutcome::Incorrect);
        assert_eq!(session.submit_answer("banana").unwrap(), AnswerOutcome::Incorrect);
        assert_eq!(session.progress(), &before);
        assert_eq!(session.messages.latest().unwrap().text, "Try again!");
    }

    #[test]
    fn difficulty_cycles_through_every_tier() {
        let mut session = session(0.4);
        let mut levels = Vec::new();
        for _ in 0..5 {
            levels.push(session.progress().difficulty().level());
            answer(&mut session);
        }
        assert_eq!(levels, vec![1, 2, 3, 4, 1]);
        assert_eq!(session.progress().coins(), 5 + 10 + 15 + 20 + 5);
    }

    #[test]
    fn short_on_coins_is_refused_without_change() {
        let mut session = session(0.0);
        session.progress.set_coins(15);
        session.open_selection();
        let err = session.purchase("Venus").unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientFunds { item: "Venus".to_string(), needed: 20, available: 15 }
        );
        assert_eq!(session.progress().coins(), 15);
        assert_eq!(session.progress().empire().len(), 1);
        assert_eq!(session.screen(), Screen::PlanetSelection);
    }

    #[test]
    fn purchase_conquers_and_returns_to_quiz() {
        let mut session = session(0.0);
        earn(&mut session, 40);
        let coins = session.progress().coins();
        session.open_selection();
        assert!(!session.expand_available());

        let receipt = session.purchase("mars").unwrap();
        assert_eq!(receipt.cost, 40);
        assert_eq!(receipt.invasion, RollOutcome::Quiet);
        assert_eq!(session.progress().coins(), coins - 40);
        assert!(session.progress().is_unlocked(receipt.planet));
        assert_eq!(session.screen(), Screen::Quiz);
        assert!(session.expand_available());
        assert!(session.scene().flyby().is_some());
    }

    #[test]
    fn buying_twice_is_a_no_op() {
        let mut session = session(0.0);
        earn(&mut session, 30);
        session.purchase("Mercury").unwrap();
        let before = session.progress().clone();
        assert_eq!(
            session.purchase("Mercury"),
            Err(GameError::AlreadyConquered("Mercury".to_string()))
        );
        assert_eq!(session.progress(), &before);
        assert_eq!(session.purchase("Pluto"), Err(GameError::UnknownPlanet("Pluto".to_string())));
    }

    #[test]
    fn coins_never_go_negative() {
        let mut session = session(1.0);
        earn(&mut session, 60);
        for name in ["Mercury", "Venus", "Mars", "Saturn", "Jupiter", "Uranus", "Neptune"] {
            let before = session.progress().coins();
            match session.purchase(name) {
                Ok(receipt) => assert_eq!(session.progress().coins(), before - receipt.cost),
                Err(_) => assert_eq!(session.progress().coins(), before),
            }
            if session.invasion().is_active() {
                let wrong = format!("{}", session.invasion().active().unwrap().challenge.answer() + 9.0);
                session.defend(&wrong).unwrap();
                session.defend(&wrong).unwrap();
                let before = session.progress().coins();
                match session.pay_tribute() {
                    Ok(resolved) => {
                        let Resolution::Tribute { paid } = resolved.resolution else {
                            panic!("tribute resolved as {:?}", resolved.resolution);
                        };
                        assert!(paid <= before);
                        assert_eq!(session.progress().coins(), before - paid);
                    }
                    Err(_) => {
                        session.surrender().unwrap();
                    }
                }
            }
        }
        assert!(!session.invasion().is_active());
    }

    #[test]
    fn invasion_blocks_other_actions_until_resolved() {
        let mut session = session(1.0);
        earn(&mut session, 20);
        let receipt = session.purchase("Mercury").unwrap();
        assert_eq!(receipt.invasion, RollOutcome::Started);
        assert!(!session.expand_available());
        assert_eq!(session.submit_answer("1"), Err(GameError::InvasionInProgress));
        assert_eq!(session.purchase("Venus"), Err(GameError::InvasionInProgress));

        let active = session.invasion().active().unwrap().clone();
        assert!(session.progress().is_unlocked(active.target));
        let answer = active.challenge.answer().to_string();
        let Ok(DefenseResult::Defended(resolved)) = session.defend(&answer) else {
            panic!("correct answer did not defend");
        };
        assert_eq!(resolved.resolution, Resolution::Defended);
        assert_eq!((resolved.target, resolved.invader), (active.target, active.invader));
        assert_eq!(
            session.messages.latest().unwrap().text,
            format!(
                "{} was successfully defended against {}.",
                session.catalog().name(active.target),
                session.catalog().name(active.invader)
            )
        );
        assert!(!session.invasion().is_active());
        assert!(session.submit_answer("x").is_ok());
    }

    #[test]
    fn tribute_takes_a_tenth() {
        let mut session = session(1.0);
        earn(&mut session, 20);
        session.purchase("Mercury").unwrap();
        session.progress.set_coins(100);
        let wrong = format!("{}", session.invasion().active().unwrap().challenge.answer() + 9.0);
        assert_eq!(session.defend(&wrong), Ok(DefenseResult::Retry { attempts_left: 1 }));
        assert_eq!(session.defend(&wrong), Ok(DefenseResult::Overrun));
        assert_eq!(session.invasion().active().unwrap().stage(), Stage::AwaitingChoice);

        let resolved = session.pay_tribute().unwrap();
        assert_eq!(resolved.resolution, Resolution::Tribute { paid: 10 });
        assert_eq!(session.progress().coins(), 90);
        assert_eq!(session.progress().empire().len(), 2);
    }

    #[test]
    fn surrender_removes_the_target() {
        let mut session = session(1.0);
        earn(&mut session, 20);
        session.purchase("Mercury").unwrap();
        let wrong = format!("{}", session.invasion().active().unwrap().challenge.answer() + 9.0);
        session.defend(&wrong).unwrap();
        session.defend(&wrong).unwrap();
        let resolved = session.surrender().unwrap();
        assert!(!session.progress().is_unlocked(resolved.target));
        assert_eq!(session.progress().empire().len(), 1);
        assert!(session.progress().current_planet().is_some());
    }

    #[test]
    fn homeless_catalog_requires_a_free_start() {
        let catalog = Catalog::from_ron(
            r#"(planets: [(name: "Io", cost: 0), (name: "Europa", cost: 10)])"#,
        )
        .unwrap();
        let mut session = GameSession::new(config(0.0), catalog);
        session.begin();
        assert_eq!(session.screen(), Screen::PlanetSelection);
        assert!(session.progress().empire().is_empty());

        let options = session.planet_options();
        assert_eq!(options[0].affordability, Affordability::Claimable);
        assert_eq!(options[1].affordability, Affordability::TooExpensive);

        assert_eq!(session.select_starting_planet("Europa"), Err(GameError::NotFree("Europa".to_string())));
        let io = session.select_starting_planet("io").unwrap();
        assert_eq!(session.progress().current_planet(), Some(io));
        assert_eq!(session.progress().difficulty(), Difficulty::SUBTRACTION);
        assert_eq!(session.screen(), Screen::Quiz);
        assert_eq!(session.select_starting_planet("Io"), Err(GameError::AlreadyStarted("Io".to_string())));
    }

    #[test]
    fn correct_answer_without_home_opens_selection() {
        let catalog = Catalog::from_ron(r#"(planets: [(name: "Io", cost: 0)])"#).unwrap();
        let mut session = GameSession::new(config(0.0), catalog);
        let text = session.question().answer().to_string();
        assert_eq!(
            session.submit_answer(&text).unwrap(),
            AnswerOutcome::Correct { reward: 5, choose_planet: true }
        );
        assert_eq!(session.screen(), Screen::PlanetSelection);
        assert_eq!(session.progress().difficulty(), Difficulty::ADDITION);
    }

    #[test]
    fn options_reflect_coins_and_empire() {
        let mut session = session(0.0);
        session.progress.set_coins(20);
        let options = session.planet_options();
        let by_name = |name: &str| {
            let id = session.catalog().find(name).unwrap();
            options.iter().find(|o| o.id == id).unwrap().affordability
        };
        assert_eq!(by_name("Earth"), Affordability::Conquered);
        assert_eq!(by_name("Venus"), Affordability::Affordable);
        assert_eq!(by_name("Mars"), Affordability::TooExpensive);

        let info = session.planet_info("earth").unwrap();
        assert!(info.conquered);
        assert_eq!(info.planet.fun_fact, "Earth is the only known planet with life.");
    }

    #[test]
    fn seeded_sessions_repeat_exactly() {
        let a = session(0.4);
        let b = session(0.4);
        assert_eq!(a.question(), b.question());
    }

    #[test]
    fn flyby_plays_out_on_tick() {
        let mut session = session(0.0);
        earn(&mut session, 10);
        session.purchase("Mercury").unwrap();
        let mut phases = Vec::new();
        for _ in 0..600 {
            for event in session.tick(1.0 / 60.0, 1) {
                if let PhaseEvent::Enter(phase) = event {
                    phases.push(phase);
                }
            }
        }
        assert_eq!(phases, vec![FlybyPhase::ZoomIn, FlybyPhase::Orbit, FlybyPhase::Return]);
        assert!(session.scene().camera.controls_enabled);
    }
}
