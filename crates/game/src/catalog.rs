//! Planet catalog: the one list of conquerable planets.
//!
//! Each entry carries both the economy data (cost, starting flag) and the visual
//! metadata the scene needs (glyph, texture, size, orbit). Whether a planet is
//! unlocked is not stored here; the empire in [`crate::progression::Progress`] is
//! the only record of ownership.

use crate::error::CatalogError;
use quiz::Difficulty;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Index of a planet in its catalog. Only the catalog hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanetId(usize);

impl PlanetId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a planet looks and moves in the orbital view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetVisual {
    pub texture: String,
    /// Sphere radius in scene units.
    pub size: f32,
    /// Orbit radius around the sun.
    pub distance: f32,
    /// Orbit angle advanced per fixed step, in radians.
    pub speed: f32,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    #[serde(default)]
    pub glyph: String,
    pub cost: u32,
    /// Owned from the first moment of a session.
    #[serde(default)]
    pub starts_unlocked: bool,
    #[serde(default)]
    pub fun_fact: String,
    /// Difficulty badge shown on the info card.
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub visual: Option<PlanetVisual>,
}

impl Planet {
    pub fn is_free(&self) -> bool {
        self.cost == 0
    }

    /// Name with glyph prefix when one is set.
    pub fn label(&self, with_glyph: bool) -> String {
        if with_glyph && !self.glyph.is_empty() {
            format!("{} {}", self.glyph, self.name)
        } else {
            self.name.clone()
        }
    }
}

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    planets: Vec<Planet>,
}

/// Validated, immutable list of planets.
#[derive(Debug, Clone)]
pub struct Catalog {
    planets: Vec<Planet>,
}

struct SolarPlanet {
    name: &'static str,
    glyph: &'static str,
    cost: u32,
    starts_unlocked: bool,
    fun_fact: &'static str,
    difficulty: u8,
    texture: &'static str,
    size: f32,
    distance: f32,
    speed: f32,
}

/// The built-in solar system, in the order the selection screen lists it.
const SOLAR_SYSTEM: &[SolarPlanet] = &[
    SolarPlanet {
        name: "Earth",
        glyph: "🌍",
        cost: 0,
        starts_unlocked: true,
        fun_fact: "Earth is the only known planet with life.",
        difficulty: 1,
        texture: "textures/earth.jpg",
        size: 2.0,
        distance: 35.0,
        speed: 0.002,
    },
    SolarPlanet {
        name: "Mercury",
        glyph: "☿",
        cost: 10,
        starts_unlocked: false,
        fun_fact: "Mercury has no atmosphere to retain heat.",
        difficulty: 1,
        texture: "textures/mercury.jpg",
        size: 1.0,
        distance: 15.0,
        speed: 0.004,
    },
    SolarPlanet {
        name: "Venus",
        glyph: "♀",
        cost: 20,
        starts_unlocked: false,
        fun_fact: "Venus is hotter than Mercury due to its thick atmosphere.",
        difficulty: 2,
        texture: "textures/venus.jpg",
        size: 1.5,
        distance: 25.0,
        speed: 0.003,
    },
    SolarPlanet {
        name: "Mars",
        glyph: "♂",
        cost: 40,
        starts_unlocked: false,
        fun_fact: "Mars has the tallest volcano in the solar system.",
        difficulty: 2,
        texture: "textures/mars.jpg",
        size: 1.8,
        distance: 45.0,
        speed: 0.0015,
    },
    SolarPlanet {
        name: "Saturn",
        glyph: "♄",
        cost: 60,
        starts_unlocked: false,
        fun_fact: "Saturn's rings are made of ice and rock.",
        difficulty: 3,
        texture: "textures/saturn.jpg",
        size: 3.5,
        distance: 75.0,
        speed: 0.0008,
    },
    SolarPlanet {
        name: "Jupiter",
        glyph: "♃",
        cost: 50,
        starts_unlocked: false,
        fun_fact: "Jupiter has a giant red storm that's been active for centuries.",
        difficulty: 3,
        texture: "textures/jupiter.jpg",
        size: 4.0,
        distance: 60.0,
        speed: 0.001,
    },
    SolarPlanet {
        name: "Uranus",
        glyph: "⛢",
        cost: 70,
        starts_unlocked: false,
        fun_fact: "Uranus rotates on its side.",
        difficulty: 4,
        texture: "textures/uranus.jpg",
        size: 3.0,
        distance: 90.0,
        speed: 0.0006,
    },
    SolarPlanet {
        name: "Neptune",
        glyph: "♆",
        cost: 80,
        starts_unlocked: false,
        fun_fact: "Neptune has supersonic winds.",
        difficulty: 4,
        texture: "textures/neptune.jpg",
        size: 3.0,
        distance: 105.0,
        speed: 0.0005,
    },
];

impl Catalog {
    /// Validate and wrap a planet list.
    pub fn new(planets: Vec<Planet>) -> Result<Self, CatalogError> {
        if planets.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        let mut starting: Option<&str> = None;
        for planet in &planets {
            let key = planet.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(CatalogError::BlankName);
            }
            if !seen.insert(key) {
                return Err(CatalogError::DuplicateName(planet.name.clone()));
            }
            if planet.starts_unlocked {
                if !planet.is_free() {
                    return Err(CatalogError::StartingPlanetNotFree(planet.name.clone()));
                }
                if let Some(first) = starting {
                    return Err(CatalogError::MultipleStartingPlanets(first.to_string(), planet.name.clone()));
                }
                starting = Some(planet.name.as_str());
            }
        }
        Ok(Self { planets })
    }

    /// The eight planets of the solar system, Earth owned from the start.
    pub fn solar_system() -> Self {
        let planets = SOLAR_SYSTEM
            .iter()
            .map(|p| Planet {
                name: p.name.to_string(),
                glyph: p.glyph.to_string(),
                cost: p.cost,
                starts_unlocked: p.starts_unlocked,
                fun_fact: p.fun_fact.to_string(),
                difficulty: Difficulty::new(p.difficulty).unwrap_or_default(),
                visual: Some(PlanetVisual {
                    texture: p.texture.to_string(),
                    size: p.size,
                    distance: p.distance,
                    speed: p.speed,
                }),
            })
            .collect();
        Self { planets }
    }

    /// Parse a RON catalog: `(planets: [(name: "Earth", cost: 0, starts_unlocked: true), ...])`.
    pub fn from_ron(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = ron::from_str(text)?;
        Self::new(file.planets)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_ron(&text)?;
        log::info!("Loaded {} planets from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    /// Look up a planet. Ids always come from this catalog, so this cannot miss.
    pub fn planet(&self, id: PlanetId) -> &Planet {
        &self.planets[id.0]
    }

    pub fn name(&self, id: PlanetId) -> &str {
        &self.planet(id).name
    }

    /// Find a planet by name, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<PlanetId> {
        let wanted = name.trim().to_lowercase();
        self.planets
            .iter()
            .position(|p| p.name.trim().to_lowercase() == wanted)
            .map(PlanetId)
    }

    pub fn ids(&self) -> impl Iterator<Item = PlanetId> {
        (0..self.planets.len()).map(PlanetId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlanetId, &Planet)> {
        self.planets.iter().enumerate().map(|(i, p)| (PlanetId(i), p))
    }

    /// The planet every session starts with, if the catalog has one.
    pub fn starting_planet(&self) -> Option<PlanetId> {
        self.planets.iter().position(|p| p.starts_unlocked).map(PlanetId)
    }
}
