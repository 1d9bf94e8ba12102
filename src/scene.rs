//! Scene state and the per-frame simulation step.
//!
//! `Scene::step` is the single entry point that moves the world forward:
//! it advances the orbit clock, recomputes every planet placement, and
//! animates the core and the background particles. Picking works on the
//! placements of the last step.

use crate::catalog::Catalog;
use crate::config::SceneConfig;
use crate::math::{hits_disc, Projector};
use crate::orbit::OrbitFrame;
use crate::orbital_core::{OrbitalCore, CORE_RADIUS};
use crate::planets::{generate, PlanetRecord};
use crate::time::SimClock;
use eframe::egui::Pos2;
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PARTICLE_SPIN: f64 = 0.01;
const PARTICLE_EXTENT: [f64; 3] = [60.0, 30.0, 60.0];

pub struct Scene {
    planets: Vec<PlanetRecord>,
    clock: SimClock,
    frame: OrbitFrame,
    core: OrbitalCore,
    particles: Vec<Point3<f64>>,
    particle_rotation: f64,
}

impl Scene {
    pub fn new(config: &SceneConfig, catalog: &Catalog) -> Self {
        let planets = generate(config.planet_count, catalog);
        let clock = SimClock::new(config.time_scale);
        let frame = OrbitFrame::evaluate(&planets, clock.time());
        log::info!("Scene ready with {} planets", planets.len());
        Self {
            planets,
            clock,
            frame,
            core: OrbitalCore::new(),
            particles: particle_field(config.particle_count, config.particle_seed),
            particle_rotation: 0.0,
        }
    }

    pub fn step(&mut self, dt: f64) {
        let time = self.clock.advance(dt);
        self.frame.update(&self.planets, time);
        self.core.step(dt);
        self.particle_rotation += dt * PARTICLE_SPIN;
    }

    pub fn planets(&self) -> &[PlanetRecord] {
        &self.planets
    }

    pub fn planet(&self, id: u32) -> Option<&PlanetRecord> {
        self.planets.iter().find(|p| p.id == id)
    }

    pub fn frame(&self) -> &OrbitFrame {
        &self.frame
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }

    pub fn core(&self) -> &OrbitalCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut OrbitalCore {
        &mut self.core
    }

    pub fn particles(&self) -> &[Point3<f64>] {
        &self.particles
    }

    pub fn particle_rotation(&self) -> f64 {
        self.particle_rotation
    }

    /// Id of the planet under the pointer, nearest to the camera first.
    pub fn pick_planet(&self, projector: &Projector, pointer: Pos2) -> Option<u32> {
        self.planets
            .iter()
            .zip(self.frame.placements())
            .filter_map(|(planet, placement)| {
                let (p, radius) = projector.project_sphere(&placement.position, planet.size)?;
                hits_disc(p.screen, radius, pointer).then_some((planet.id, p.depth))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub fn core_under_pointer(&self, projector: &Projector, pointer: Pos2) -> bool {
        projector
            .project_sphere(&Point3::origin(), CORE_RADIUS)
            .is_some_and(|(p, radius)| hits_disc(p.screen, radius, pointer))
    }
}

fn particle_field(count: usize, seed: u64) -> Vec<Point3<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Point3::new(
                rng.gen_range(-0.5..0.5) * PARTICLE_EXTENT[0],
                rng.gen_range(-0.5..0.5) * PARTICLE_EXTENT[1],
                rng.gen_range(-0.5..0.5) * PARTICLE_EXTENT[2],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraPose;
    use crate::orbit::position;
    use eframe::egui::{Rect, Vec2};

    fn scene() -> Scene {
        Scene::new(&SceneConfig::default(), &Catalog::builtin())
    }

    #[test]
    fn step_advances_orbits_at_half_rate_and_core_at_full_rate() {
        let mut scene = scene();
        scene.step(1.0);
        scene.step(1.0);
        assert!((scene.clock().time() - 1.0).abs() < 1e-12);
        assert!((scene.core().time() - 2.0).abs() < 1e-12);
        let first = &scene.planets()[0];
        assert_eq!(scene.frame().position_of(first.id), Some(position(first, scene.clock().time())));
    }

    #[test]
    fn paused_clock_keeps_planets_still() {
        let mut scene = scene();
        scene.step(0.5);
        let before = scene.frame().clone();
        scene.clock_mut().pause();
        scene.step(3.0);
        assert_eq!(scene.frame().placements(), before.placements());
    }

    #[test]
    fn particle_field_is_seeded_and_bounded() {
        let a = particle_field(500, 7);
        assert_eq!(a, particle_field(500, 7));
        assert_eq!(a.len(), 500);
        assert!(a.iter().all(|p| p.x.abs() <= 30.0 && p.y.abs() <= 15.0 && p.z.abs() <= 30.0));
    }

    fn scene_with(count: usize) -> Scene {
        let config = SceneConfig { planet_count: count, ..SceneConfig::default() };
        Scene::new(&config, &Catalog::builtin())
    }

    #[test]
    fn picks_planet_under_pointer() {
        let scene = scene_with(1);
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 800.0));
        let pos = scene.frame().position_of(1).unwrap();
        let pose = CameraPose::new(pos + nalgebra::Vector3::new(0.0, 0.0, 4.0), pos);
        let projector = Projector::new(&pose, 45.0, rect);

        assert_eq!(scene.pick_planet(&projector, rect.center()), Some(1));
        assert_eq!(scene.pick_planet(&projector, Pos2::new(5.0, 5.0)), None);
    }

    #[test]
    fn nearest_planet_wins_when_discs_overlap() {
        // At t = 0 every planet sits on the +X axis.
        let scene = scene_with(2);
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 800.0));
        let pose = CameraPose::new(Point3::new(20.0, 0.0, 0.0), Point3::origin());
        let projector = Projector::new(&pose, 45.0, rect);
        assert_eq!(scene.pick_planet(&projector, rect.center()), Some(2));
    }

    #[test]
    fn core_hover_detection() {
        let scene = scene();
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 800.0));
        let projector = Projector::new(&SceneConfig::default().home, 45.0, rect);
        assert!(scene.core_under_pointer(&projector, rect.center()));
        assert!(!scene.core_under_pointer(&projector, Pos2::new(1.0, 1.0)));
    }
}
