//! Orbit positions and instance transforms.
//!
//! A planet moves on a circle of radius `orbit_radius` in the XZ plane,
//! which is then tilted about the X axis by the planet's inclination.

use crate::planets::PlanetRecord;
use nalgebra::{Matrix4, Point3, Rotation3, Vector3};
use std::f64::consts::PI;

pub fn angle(planet: &PlanetRecord, time: f64) -> f64 {
    time * planet.speed
}

fn inclination_rotation(planet: &PlanetRecord) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), planet.inclination)
}

fn point_on_orbit(planet: &PlanetRecord, tilt: &Rotation3<f64>, a: f64) -> Point3<f64> {
    let base = Point3::new(a.cos() * planet.orbit_radius, 0.0, a.sin() * planet.orbit_radius);
    tilt * base
}

pub fn position(planet: &PlanetRecord, time: f64) -> Point3<f64> {
    point_on_orbit(planet, &inclination_rotation(planet), angle(planet, time))
}

/// Translation to the orbit position, yaw by the orbit angle, uniform
/// scale by the planet size.
pub fn transform(planet: &PlanetRecord, time: f64) -> Matrix4<f64> {
    compose(planet, &position(planet, time), angle(planet, time))
}

fn compose(planet: &PlanetRecord, pos: &Point3<f64>, a: f64) -> Matrix4<f64> {
    Matrix4::new_translation(&pos.coords)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), a).to_homogeneous()
        * Matrix4::new_scaling(planet.size)
}

/// Closed polyline of the full tilted orbit, for orbit guides.
pub fn orbit_path(planet: &PlanetRecord, segments: usize) -> Vec<Point3<f64>> {
    let tilt = inclination_rotation(planet);
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| point_on_orbit(planet, &tilt, 2.0 * PI * i as f64 / segments as f64))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlanetPlacement {
    pub id: u32,
    pub position: Point3<f64>,
    pub transform: Matrix4<f64>,
}

/// Positions and transforms of every planet at one instant.
///
/// Rebuilt from scratch every frame; entries keep the order of the planet
/// slice they were evaluated from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrbitFrame {
    time: f64,
    placements: Vec<PlanetPlacement>,
}

impl OrbitFrame {
    pub fn evaluate(planets: &[PlanetRecord], time: f64) -> Self {
        let mut frame = Self::default();
        frame.update(planets, time);
        frame
    }

    pub fn update(&mut self, planets: &[PlanetRecord], time: f64) {
        self.time = time;
        self.placements.clear();
        self.placements.extend(planets.iter().map(|planet| {
            let a = angle(planet, time);
            let pos = point_on_orbit(planet, &inclination_rotation(planet), a);
            PlanetPlacement {
                id: planet.id,
                position: pos,
                transform: compose(planet, &pos, a),
            }
        }));
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn placements(&self) -> &[PlanetPlacement] {
        &self.placements
    }

    pub fn position_of(&self, id: u32) -> Option<Point3<f64>> {
        self.placements.iter().find(|p| p.id == id).map(|p| p.position)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
