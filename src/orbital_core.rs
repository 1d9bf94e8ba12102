//! The animated core at the center of the system.
//!
//! A spinning core, two tumbling rings and four small tech satellites on
//! fixed circular paths. Unlike the planets it runs on real time.

use crate::color::Rgb;
use nalgebra::{Point3, Rotation3};
use std::f64::consts::PI;

pub const CORE_RADIUS: f64 = 0.9;
pub const SHELL_RADIUS: f64 = 0.7 * 2.4;
pub const INNER_RING_RADIUS: f64 = 1.4;
pub const OUTER_RING_RADIUS: f64 = 1.8;

const CORE_SPIN: f64 = 0.3;
const INNER_RING_SPIN: [f64; 2] = [0.7, 0.4];
const OUTER_RING_SPIN: [f64; 2] = [0.9, -0.25];

pub struct CoreSatellite {
    pub label: &'static str,
    pub radius: f64,
    pub speed: f64,
    pub size: f64,
    pub phase: f64,
    pub color: Rgb,
}

impl CoreSatellite {
    pub fn angle(&self, time: f64) -> f64 {
        self.phase + time * self.speed
    }

    /// Circular path with a small vertical bob.
    pub fn position(&self, time: f64) -> Point3<f64> {
        let a = self.angle(time);
        Point3::new(a.cos() * self.radius, (a * 1.7).sin() * 0.2, a.sin() * self.radius)
    }
}

pub static CORE_SATELLITES: [CoreSatellite; 4] = [
    CoreSatellite { label: "REACT", radius: 2.2, speed: 0.6, size: 0.22, phase: 0.0, color: Rgb::new(0x61, 0xDA, 0xFB) },
    CoreSatellite { label: "THREE", radius: 3.0, speed: 0.38, size: 0.26, phase: PI / 3.0, color: Rgb::new(0x88, 0xCC, 0xFF) },
    CoreSatellite { label: "GSAP", radius: 1.6, speed: 0.9, size: 0.18, phase: PI, color: Rgb::new(0x88, 0xCE, 0x02) },
    CoreSatellite { label: "R3F", radius: 3.6, speed: 0.22, size: 0.28, phase: 4.0 * PI / 3.0, color: Rgb::new(0xFF, 0xD7, 0x00) },
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrbitalCore {
    time: f64,
    core_spin: f64,
    /// Rotation of the inner ring about X and Z.
    inner_ring: [f64; 2],
    /// Rotation of the outer ring about Y and X.
    outer_ring: [f64; 2],
    hovered: bool,
}

impl OrbitalCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, dt: f64) {
        self.time += dt;
        self.core_spin += dt * CORE_SPIN;
        self.inner_ring[0] += dt * INNER_RING_SPIN[0];
        self.inner_ring[1] += dt * INNER_RING_SPIN[1];
        self.outer_ring[0] += dt * OUTER_RING_SPIN[0];
        self.outer_ring[1] += dt * OUTER_RING_SPIN[1];
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn core_spin(&self) -> f64 {
        self.core_spin
    }

    pub fn inner_ring_rotation(&self) -> Rotation3<f64> {
        Rotation3::from_euler_angles(self.inner_ring[0], 0.0, self.inner_ring[1])
    }

    pub fn outer_ring_rotation(&self) -> Rotation3<f64> {
        Rotation3::from_euler_angles(self.outer_ring[1], self.outer_ring[0], 0.0)
    }

    pub fn satellites(&self) -> impl Iterator<Item = (&'static CoreSatellite, Point3<f64>)> + '_ {
        CORE_SATELLITES.iter().map(move |s| (s, s.position(self.time)))
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Emissive strength of the core, raised while hovered.
    pub fn glow(&self) -> f64 {
        if self.hovered { 2.5 } else { 1.2 }
    }
}
