//! Orbital scene state: planet orbits, the camera, and the conquest flyby.
//!
//! The scene is cosmetic. It reads the catalog for sizes and orbits but never
//! touches progression, so a flyby can lag behind the game state or be cut short
//! without changing any outcome.

use crate::catalog::{Catalog, PlanetId};
use engine_core::{tween, Ease, PhaseEvent, Sequence};
use glam::Vec3;
use std::f32::consts::TAU;

/// Where the camera sits when the game starts and after a view reset.
pub const INITIAL_CAMERA: Vec3 = Vec3::new(0.0, 30.0, 100.0);

const ZOOM_SECONDS: f32 = 2.0;
const ORBIT_SECONDS: f32 = 5.0;
const RETURN_SECONDS: f32 = 2.0;
const RESET_SECONDS: f32 = 2.0;
/// Camera distance from the planet, in planet radii.
const ZOOM_RADII: f32 = 6.0;
/// Radians per second while circling the conquered planet.
const ORBIT_ANGULAR_SPEED: f32 = 0.3;
/// Per-step lerp factors, tuned at 60 steps per second.
const ORBIT_FOLLOW: f32 = 0.05;
const RESET_TARGET_FOLLOW: f32 = 0.1;

/// Frame-rate independent version of a per-step lerp factor.
fn follow(per_step: f32, dt: f32) -> f32 {
    1.0 - (1.0 - per_step).powf(dt * 60.0)
}

/// Orbit angle of every planet around the sun.
#[derive(Debug, Clone)]
pub struct Orrery {
    angles: Vec<f32>,
}

impl Orrery {
    pub fn new(catalog: &Catalog) -> Self {
        Self { angles: vec![0.0; catalog.len()] }
    }

    /// Advance every orbit by `steps` fixed steps.
    pub fn step(&mut self, catalog: &Catalog, steps: u32) {
        for (id, planet) in catalog.iter() {
            if let (Some(visual), Some(angle)) = (&planet.visual, self.angles.get_mut(id.index())) {
                *angle = (*angle + visual.speed * steps as f32) % TAU;
            }
        }
    }

    pub fn angle(&self, id: PlanetId) -> f32 {
        self.angles.get(id.index()).copied().unwrap_or(0.0)
    }

    /// Planet centre in world space. `None` for planets without visuals.
    pub fn world_position(&self, catalog: &Catalog, id: PlanetId) -> Option<Vec3> {
        let visual = catalog.planet(id).visual.as_ref()?;
        let angle = self.angle(id);
        Some(Vec3::new(visual.distance * angle.cos(), 0.0, -visual.distance * angle.sin()))
    }
}

/// Orbit-controls camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    /// Whether the player may drag the camera.
    pub controls_enabled: bool,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: INITIAL_CAMERA,
            target: Vec3::ZERO,
            controls_enabled: true,
        }
    }
}

/// Phases of the conquest flyby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlybyPhase {
    /// Ease in towards the conquered planet.
    ZoomIn,
    /// Circle it.
    Orbit,
    /// Ease back to where the camera started.
    Return,
}

/// Camera flight celebrating a conquest.
#[derive(Debug, Clone)]
pub struct ConquestFlyby {
    planet: PlanetId,
    sequence: Sequence<FlybyPhase>,
    origin: Vec3,
    zoom_distance: f32,
    orbit_angle: f32,
    return_from: Vec3,
}

impl ConquestFlyby {
    pub fn new(planet: PlanetId, planet_size: f32, origin: Vec3) -> Self {
        Self {
            planet,
            sequence: Sequence::new([
                (FlybyPhase::ZoomIn, ZOOM_SECONDS),
                (FlybyPhase::Orbit, ORBIT_SECONDS),
                (FlybyPhase::Return, RETURN_SECONDS),
            ]),
            origin,
            zoom_distance: planet_size * ZOOM_RADII,
            orbit_angle: 0.0,
            return_from: origin,
        }
    }

    pub fn planet(&self) -> PlanetId {
        self.planet
    }

    pub fn phase(&self) -> Option<FlybyPhase> {
        self.sequence.current()
    }

    pub fn is_complete(&self) -> bool {
        self.sequence.is_complete()
    }

    /// Fraction of the current phase done.
    pub fn phase_progress(&self) -> f32 {
        self.sequence.phase_progress()
    }

    /// Step the flight and move the camera. `planet_pos` is the planet's current
    /// world position, since it keeps orbiting during the flight.
    pub fn update(&mut self, dt: f32, planet_pos: Vec3, camera: &mut CameraRig) -> Vec<PhaseEvent<FlybyPhase>> {
        let events = self.sequence.advance(dt);
        for event in &events {
            match *event {
                PhaseEvent::Enter(FlybyPhase::ZoomIn) => camera.controls_enabled = false,
                PhaseEvent::Enter(FlybyPhase::Orbit) => self.orbit_angle = 0.0,
                PhaseEvent::Enter(FlybyPhase::Return) => self.return_from = camera.position,
                PhaseEvent::Exit(FlybyPhase::Return) => {
                    camera.position = self.origin;
                    camera.target = Vec3::ZERO;
                    camera.controls_enabled = true;
                }
                PhaseEvent::Exit(_) => {}
            }
        }

        let zd = self.zoom_distance;
        let progress = self.sequence.phase_progress();
        match self.sequence.current() {
            Some(FlybyPhase::ZoomIn) => {
                let destination = planet_pos + Vec3::new(0.0, zd * 0.5, zd);
                camera.position = tween(self.origin, destination, progress, Ease::Power2InOut);
                camera.target = planet_pos;
            }
            Some(FlybyPhase::Orbit) => {
                self.orbit_angle += ORBIT_ANGULAR_SPEED * dt;
                let desired = planet_pos
                    + Vec3::new(zd * self.orbit_angle.cos(), zd * 0.3, zd * self.orbit_angle.sin());
                camera.position = camera.position.lerp(desired, follow(ORBIT_FOLLOW, dt));
                camera.target = planet_pos;
            }
            Some(FlybyPhase::Return) => {
                camera.position = tween(self.return_from, self.origin, progress, Ease::Power2InOut);
                camera.target = Vec3::ZERO;
            }
            None => {}
        }
        events
    }
}

/// Eased flight back to the initial viewpoint.
#[derive(Debug, Clone)]
struct ViewReset {
    from: Vec3,
    elapsed: f32,
}

impl ViewReset {
    /// Returns true once the camera is home.
    fn update(&mut self, dt: f32, camera: &mut CameraRig) -> bool {
        self.elapsed += dt;
        let t = self.elapsed / RESET_SECONDS;
        camera.position = tween(self.from, INITIAL_CAMERA, t, Ease::Power2InOut);
        camera.target = camera.target.lerp(Vec3::ZERO, follow(RESET_TARGET_FOLLOW, dt));
        if t >= 1.0 {
            camera.target = Vec3::ZERO;
            camera.controls_enabled = true;
            true
        } else {
            false
        }
    }
}

/// Everything the orbital view animates.
#[derive(Debug, Clone)]
pub struct Scene {
    pub orrery: Orrery,
    pub camera: CameraRig,
    flyby: Option<ConquestFlyby>,
    reset: Option<ViewReset>,
}

impl Scene {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            orrery: Orrery::new(catalog),
            camera: CameraRig::default(),
            flyby: None,
            reset: None,
        }
    }

    /// Start a flyby of a freshly conquered planet. Planets without visuals are skipped.
    /// A flyby already in the air is replaced but keeps the first flyby's return point.
    pub fn start_flyby(&mut self, catalog: &Catalog, planet: PlanetId) -> bool {
        let Some(visual) = catalog.planet(planet).visual.as_ref() else {
            return false;
        };
        let origin = self
            .flyby
            .as_ref()
            .map(|f| f.origin)
            .unwrap_or(self.camera.position);
        self.reset = None;
        self.flyby = Some(ConquestFlyby::new(planet, visual.size, origin));
        log::debug!("Flyby of {} queued", catalog.name(planet));
        true
    }

    /// Cancel any flyby and ease back to the initial viewpoint.
    pub fn reset_view(&mut self) {
        self.flyby = None;
        self.reset = Some(ViewReset { from: self.camera.position, elapsed: 0.0 });
    }

    pub fn flyby(&self) -> Option<&ConquestFlyby> {
        self.flyby.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn is_resetting(&self) -> bool {
        self.reset.is_some()
    }

    /// Advance orbits by `fixed_steps` and camera animations by `dt` seconds.
    pub fn update(&mut self, catalog: &Catalog, dt: f32, fixed_steps: u32) -> Vec<PhaseEvent<FlybyPhase>> {
        self.orrery.step(catalog, fixed_steps);

        let mut events = Vec::new();
        if let Some(flyby) = self.flyby.as_mut() {
            let planet_pos = self
                .orrery
                .world_position(catalog, flyby.planet())
                .unwrap_or(Vec3::ZERO);
            events = flyby.update(dt, planet_pos, &mut self.camera);
            if flyby.is_complete() {
                self.flyby = None;
            }
        }
        if let Some(reset) = self.reset.as_mut() {
            if reset.update(dt, &mut self.camera) {
                self.reset = None;
            }
        }
        events
    }
}
