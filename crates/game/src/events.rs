//! Command handling for GameSession.
//! Maps each parsed terminal command onto a session action and reports failures as feedback.

use input::Command;

use crate::error::GameError;
use crate::hud::HUDSystem;
use crate::invasion::Stage;
use crate::session::GameSession;

impl GameSession {
    /// Apply one command. Returns true if the app should exit.
    pub(crate) fn handle_command(&mut self, command: Command, hud: &HUDSystem) -> bool {
        let result = match command {
            Command::Quit => return true,
            // A bare answer goes to the invasion challenge while one is being defended.
            Command::Answer(text) => match self.invasion().active().map(|i| i.stage()) {
                Some(Stage::Defending) => self.defend(&text).map(drop),
                _ => self.submit_answer(&text).map(drop),
            },
            Command::Defend(text) => self.defend(&text).map(drop),
            Command::Buy(name) => self.purchase(&name).map(drop),
            Command::Start(name) => self.select_starting_planet(&name).map(drop),
            Command::Begin => {
                self.begin();
                Ok(())
            }
            Command::Expand => {
                if self.invasion().is_active() {
                    Err(GameError::InvasionInProgress)
                } else {
                    self.open_selection();
                    Ok(())
                }
            }
            Command::Back => {
                self.back();
                Ok(())
            }
            Command::Tribute => self.pay_tribute().map(drop),
            Command::Surrender => self.surrender().map(drop),
            Command::Inspect(name) => match self.planet_info(&name) {
                Ok(info) => {
                    let card = hud.planet_card(&info);
                    self.messages.info(card.trim_end().to_string());
                    Ok(())
                }
                Err(err) => Err(err),
            },
            Command::Status => {
                let panel = hud.status_panel(self);
                self.messages.info(panel.trim_end().to_string());
                Ok(())
            }
            Command::ResetView => {
                self.reset_view();
                self.messages.info("Resetting view.");
                Ok(())
            }
            Command::Help => {
                let panel = hud.help_panel();
                self.messages.info(panel.trim_end().to_string());
                Ok(())
            }
        };
        if let Err(err) = result {
            self.report(err);
        }
        false
    }

    fn report(&mut self, err: GameError) {
        log::debug!("Action refused: {:?}", err);
        // Purchase already explained the shortfall in the player's own words.
        if !matches!(err, GameError::InsufficientFunds { ref item, .. } if self.catalog().find(item).is_some()) {
            self.messages.warning(err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::GameConfig;
    use crate::state::Screen;

    fn session(invasion_chance: f64) -> GameSession {
        let config = GameConfig { seed: Some(21), invasion_chance, ..GameConfig::default() };
        GameSession::new(config, Catalog::solar_system())
    }

    fn run(session: &mut GameSession, line: &str) -> bool {
        let hud = HUDSystem::default();
        session.handle_command(Command::parse(line).unwrap(), &hud)
    }

    #[test]
    fn quit_exits_and_nothing_else_does() {
        let mut session = session(0.0);
        assert!(!run(&mut session, "start"));
        assert!(!run(&mut session, "status"));
        assert!(run(&mut session, "quit"));
    }

    #[test]
    fn bare_number_answers_the_quiz() {
        let mut session = session(0.0);
        run(&mut session, "start");
        assert_eq!(session.screen(), Screen::Quiz);
        let answer = session.question().answer().to_string();
        run(&mut session, &answer);
        assert_eq!(session.progress().coins(), 5);
    }

    #[test]
    fn refusals_become_warnings() {
        let mut session = session(0.0);
        run(&mut session, "start");
        session.messages.drain();
        run(&mut session, "buy Pluto");
        let lines = session.messages.drain();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "there is no planet called Pluto");
        run(&mut session, "buy Neptune");
        let lines = session.messages.drain();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Not enough coins to conquer Neptune.");
    }

    #[test]
    fn expand_works_from_the_start_screen() {
        let mut session = session(0.0);
        assert_eq!(session.screen(), Screen::Start);
        run(&mut session, "expand");
        assert_eq!(session.screen(), Screen::PlanetSelection);
        run(&mut session, "back");
        assert_eq!(session.screen(), Screen::Quiz);
    }

    #[test]
    fn bare_number_defends_during_an_invasion() {
        let mut session = session(1.0);
        run(&mut session, "start");
        while session.progress().coins() < 10 {
            let answer = session.question().answer().to_string();
            run(&mut session, &answer);
        }
        run(&mut session, "expand");
        assert_eq!(session.screen(), Screen::PlanetSelection);
        run(&mut session, "buy mercury");
        run(&mut session, "expand");
        assert_eq!(session.screen(), Screen::Quiz);
        assert_eq!(
            session.messages.drain().last().unwrap().text,
            GameError::InvasionInProgress.to_string()
        );
        let answer = session.invasion().active().unwrap().challenge.answer().to_string();
        run(&mut session, &format!("{} coins", answer));
        assert!(!session.invasion().is_active());
    }
}
