//! Text HUD for the terminal front end.
//! Turns session state into panels; never mutates anything.

use crate::catalog::Catalog;
use crate::cinematic::FlybyPhase;
use crate::invasion::Stage;
use crate::progression::tribute_amount;
use crate::session::{Affordability, GameSession, PlanetInfo};
use crate::state::{GameMessage, MessageKind, Screen};

const RULE: &str = "══════════════════════════════════════════════════════════";

/// HUD configuration
#[derive(Debug, Clone)]
pub struct HUDConfig {
    pub show_glyphs: bool,
    pub bar_width: usize,
}

impl Default for HUDConfig {
    fn default() -> Self {
        Self {
            show_glyphs: true,
            bar_width: 20,
        }
    }
}

/// Renders panels from session state.
pub struct HUDSystem {
    pub config: HUDConfig,
}

impl HUDSystem {
    pub fn new(config: HUDConfig) -> Self {
        Self { config }
    }

    fn label(&self, catalog: &Catalog, id: crate::catalog::PlanetId) -> String {
        catalog.planet(id).label(self.config.show_glyphs)
    }

    /// Coins, difficulty, home planet and empire.
    pub fn status_panel(&self, session: &GameSession) -> String {
        let catalog = session.catalog();
        let progress = session.progress();
        let home = progress
            .current_planet()
            .map(|id| self.label(catalog, id))
            .unwrap_or_else(|| "none".to_string());
        let empire: Vec<String> = progress.empire().iter().map(|&id| self.label(catalog, id)).collect();

        let mut out = String::new();
        out.push_str(&format!("╔{}╗\n", RULE));
        out.push_str(&format!(
            "  COINS: {:<6} │  DIFFICULTY: {}  │  HOME: {}\n",
            progress.coins(),
            progress.difficulty(),
            home
        ));
        out.push_str(&format!(
            "  EMPIRE ({}/{}): {}\n",
            empire.len(),
            catalog.len(),
            if empire.is_empty() { "-".to_string() } else { empire.join(", ") }
        ));
        out.push_str(&format!("╚{}╝\n", RULE));
        out
    }

    /// Whatever the current screen shows.
    pub fn screen_panel(&self, session: &GameSession) -> String {
        match session.screen() {
            Screen::Start => "  Solve math problems to conquer the solar system.\n  Type `start` to begin.\n".to_string(),
            Screen::Quiz => self.quiz_panel(session),
            Screen::PlanetSelection => self.selection_panel(session),
        }
    }

    fn quiz_panel(&self, session: &GameSession) -> String {
        let mut out = format!("  {}\n", session.question());
        if session.expand_available() {
            out.push_str("  (type `expand` to conquer more planets)\n");
        }
        out
    }

    pub fn selection_panel(&self, session: &GameSession) -> String {
        let catalog = session.catalog();
        let mut out = String::from("  CONQUER A PLANET\n");
        for option in session.planet_options() {
            let cost = if option.cost > 0 {
                format!("Cost: {}", option.cost)
            } else {
                "Free".to_string()
            };
            let status = match option.affordability {
                Affordability::Conquered => "[owned]",
                Affordability::Claimable => "[start here]",
                Affordability::Affordable => "[available]",
                Affordability::TooExpensive => "[locked]",
            };
            out.push_str(&format!(
                "    {:<14} {:<10} {}\n",
                self.label(catalog, option.id),
                cost,
                status
            ));
        }
        out.push_str("  (`buy <planet>`, `start <planet>`, `back`)\n");
        out
    }

    /// Invasion alert, if one is underway.
    pub fn invasion_panel(&self, session: &GameSession) -> Option<String> {
        let invasion = session.invasion().active()?;
        let catalog = session.catalog();
        let rules = session.invasion_rules();
        let mut out = format!("╔{}╗\n", RULE);
        out.push_str(&format!(
            "  INVASION! {} is attacking {}\n",
            self.label(catalog, invasion.invader),
            self.label(catalog, invasion.target)
        ));
        match invasion.stage() {
            Stage::Defending => {
                let left = rules.max_attempts.saturating_sub(invasion.attempts());
                out.push_str(&format!("  Solve this to defend your planet:\n  {}\n", invasion.challenge));
                out.push_str(&format!(
                    "  ({} {} left; `defend <answer>` or just type the number)\n",
                    left,
                    if left == 1 { "try" } else { "tries" }
                ));
            }
            Stage::AwaitingChoice => {
                out.push_str(&format!(
                    "  Defense failed. `tribute` pays {}% of your coins ({}), or `surrender` the planet.\n",
                    rules.tribute_percent,
                    tribute_amount(session.progress().coins(), rules.tribute_percent)
                ));
            }
        }
        out.push_str(&format!("╚{}╝\n", RULE));
        Some(out)
    }

    pub fn planet_card(&self, info: &PlanetInfo<'_>) -> String {
        let planet = info.planet;
        let mut out = format!("  {}\n", planet.label(self.config.show_glyphs));
        if !planet.fun_fact.is_empty() {
            out.push_str(&format!("    {}\n", planet.fun_fact));
        }
        out.push_str(&format!("    Difficulty: {}\n", planet.difficulty));
        if info.conquered {
            out.push_str("    Already conquered.\n");
        } else {
            out.push_str(&format!("    Cost: {} coins\n", planet.cost));
        }
        out
    }

    pub fn help_panel(&self) -> String {
        let mut out = String::from("  COMMANDS\n");
        for (usage, what) in input::HELP_LINES {
            out.push_str(&format!("    {:<24} {}\n", usage, what));
        }
        out
    }

    /// One-line flyby indicator while the camera is busy.
    pub fn flyby_line(&self, session: &GameSession) -> Option<String> {
        let flyby = session.scene().flyby()?;
        let phase = flyby.phase()?;
        let verb = match phase {
            FlybyPhase::ZoomIn => "Zooming in on",
            FlybyPhase::Orbit => "Orbiting",
            FlybyPhase::Return => "Returning from",
        };
        Some(format!(
            "  {} {} {}",
            verb,
            self.label(session.catalog(), flyby.planet()),
            self.progress_bar(flyby.phase_progress())
        ))
    }

    pub fn message_line(&self, message: &GameMessage) -> String {
        let marker = match message.kind {
            MessageKind::Info => "·",
            MessageKind::Success => "✅",
            MessageKind::Warning => "⚠️",
        };
        format!("{} {}", marker, message.text)
    }

    fn progress_bar(&self, percent: f32) -> String {
        let width = self.config.bar_width;
        let filled = (percent.clamp(0.0, 1.0) * width as f32) as usize;
        let empty = width - filled;
        format!("[{}{}]", "=".repeat(filled), "-".repeat(empty))
    }
}

impl Default for HUDSystem {
    fn default() -> Self {
        Self::new(HUDConfig::default())
    }
}
