//! Game configuration (invasion tuning, RNG seed, catalog, presentation). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Chance that a conquest triggers an invasion (0.0 - 1.0).
    #[serde(default = "default_invasion_chance")]
    pub invasion_chance: f64,
    /// Tribute as a percentage of current coins, rounded up.
    #[serde(default = "default_tribute_percent")]
    pub tribute_percent: u32,
    /// Wrong challenge answers allowed before tribute/surrender is forced.
    #[serde(default = "default_max_defense_attempts")]
    pub max_defense_attempts: u32,
    /// Accepted distance from the expected challenge answer.
    #[serde(default = "default_challenge_tolerance")]
    pub challenge_tolerance: f64,
    /// Fixed RNG seed for reproducible sessions. Random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Custom planet catalog (RON). Built-in solar system when absent.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Play the camera flyby after each conquest.
    #[serde(default = "default_true")]
    pub cinematics: bool,
    /// Show planet glyphs next to names.
    #[serde(default = "default_true")]
    pub show_glyphs: bool,
}

fn default_invasion_chance() -> f64 {
    0.4
}
fn default_tribute_percent() -> u32 {
    10
}
fn default_max_defense_attempts() -> u32 {
    2
}
fn default_challenge_tolerance() -> f64 {
    quiz::DEFAULT_TOLERANCE
}
fn default_true() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            invasion_chance: default_invasion_chance(),
            tribute_percent: default_tribute_percent(),
            max_defense_attempts: default_max_defense_attempts(),
            challenge_tolerance: default_challenge_tolerance(),
            seed: None,
            catalog_path: None,
            cinematics: default_true(),
            show_glyphs: default_true(),
        }
    }
}

/// Invasion tuning with out-of-range values pulled back into range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvasionRules {
    pub chance: f64,
    pub tribute_percent: u32,
    pub max_attempts: u32,
    pub tolerance: f64,
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from a specific file, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }

    /// True when `config.ron` exists in the current directory.
    pub fn file_exists() -> bool {
        config_path().is_file()
    }

    pub fn invasion_rules(&self) -> InvasionRules {
        let chance = if self.invasion_chance.is_finite() {
            self.invasion_chance.clamp(0.0, 1.0)
        } else {
            default_invasion_chance()
        };
        let tolerance = if self.challenge_tolerance.is_finite() && self.challenge_tolerance > 0.0 {
            self.challenge_tolerance
        } else {
            default_challenge_tolerance()
        };
        InvasionRules {
            chance,
            tribute_percent: self.tribute_percent.min(100),
            max_attempts: self.max_defense_attempts.max(1),
            tolerance,
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: GameConfig = ron::from_str("(seed: Some(7), invasion_chance: 1.0)").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.invasion_chance, 1.0);
        assert_eq!(config.tribute_percent, 10);
        assert_eq!(config.max_defense_attempts, 2);
        assert!(config.cinematics);
    }

    #[test]
    fn rules_clamp_nonsense_values() {
        let config = GameConfig {
            invasion_chance: 3.5,
            tribute_percent: 250,
            max_defense_attempts: 0,
            challenge_tolerance: -1.0,
            ..GameConfig::default()
        };
        let rules = config.invasion_rules();
        assert_eq!(rules.chance, 1.0);
        assert_eq!(rules.tribute_percent, 100);
        assert_eq!(rules.max_attempts, 1);
        assert_eq!(rules.tolerance, quiz::DEFAULT_TOLERANCE);
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = std::env::temp_dir().join(format!("planet-conquest-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.ron");
        let config = GameConfig { seed: Some(42), cinematics: false, ..GameConfig::default() };
        config.save_to(&path);
        assert_eq!(GameConfig::load_from(&path), config);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("planet-conquest-bad-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.ron");
        std::fs::write(&path, "(invasion_chance: \"lots\")").unwrap();
        assert_eq!(GameConfig::load_from(&path), GameConfig::default());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
