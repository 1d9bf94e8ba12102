//! Deterministic generation of the project planets.
//!
//! Every orbital parameter is a closed-form function of the planet index,
//! so the same catalog always yields the same system.

use crate::catalog::Catalog;
use crate::color::Rgb;
use url::Url;

pub const PLANET_COUNT: usize = 50;

pub const BASE_ORBIT_RADIUS: f64 = 6.0;
pub const ORBIT_SPACING: f64 = 0.4;

const PLACEHOLDER_TECHS: [&str; 2] = ["React", "Node.js"];
const PLACEHOLDER_LINK: &str = "#";

#[derive(Clone, PartialEq, Debug)]
pub struct PlanetRecord {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub techs: Vec<String>,
    pub link: String,
    pub has_real_data: bool,
    pub color: Rgb,
    pub size: f64,
    pub orbit_radius: f64,
    pub speed: f64,
    /// Tilt of the orbital plane about the X axis, in radians.
    pub inclination: f64,
}

impl PlanetRecord {
    /// The project link when it is an absolute http(s) URL.
    ///
    /// Placeholder (`#`) and malformed links yield `None` and are shown as
    /// plain text, never as something clickable.
    pub fn external_link(&self) -> Option<Url> {
        let url = Url::parse(&self.link).ok()?;
        match url.scheme() {
            "http" | "https" if url.host().is_some() => Some(url),
            _ => None,
        }
    }
}

pub fn orbit_radius(index: usize) -> f64 {
    BASE_ORBIT_RADIUS + index as f64 * ORBIT_SPACING
}

pub fn orbital_speed(index: usize) -> f64 {
    let i = index as f64;
    let base = 0.3 / orbit_radius(index).sqrt();
    base * (0.8 + 0.4 * (0.5 * (i * 7.3).sin() + 0.5))
}

pub fn planet_size(index: usize) -> f64 {
    0.8 + 0.3 * (index as f64).sin()
}

pub fn inclination(index: usize) -> f64 {
    0.4 * (index as f64 * 0.5).sin()
}

pub fn planet_color(index: usize, count: usize) -> Rgb {
    Rgb::from_hsl(index as f64 / count.max(1) as f64, 0.8, 0.6)
}

pub fn generate(count: usize, catalog: &Catalog) -> Vec<PlanetRecord> {
    let planets: Vec<PlanetRecord> = (0..count)
        .map(|i| {
            let number = i + 1;
            let (title, description, techs, link, has_real_data) = match catalog.get(i) {
                Some(entry) => (
                    entry.title.clone(),
                    entry.description.clone(),
                    entry.techs.clone(),
                    entry.link.clone(),
                    true,
                ),
                None => (
                    format!("Projet {number}"),
                    format!("Description du projet {number}. Cliquez pour en savoir plus."),
                    PLACEHOLDER_TECHS.iter().map(|t| t.to_string()).collect(),
                    PLACEHOLDER_LINK.to_string(),
                    false,
                ),
            };

            PlanetRecord {
                id: number as u32,
                title,
                description,
                techs,
                link,
                has_real_data,
                color: planet_color(i, count),
                size: planet_size(i),
                orbit_radius: orbit_radius(i),
                speed: orbital_speed(i),
                inclination: inclination(i),
            }
        })
        .collect();

    log::debug!(
        "Generated {} planets ({} with project data)",
        planets.len(),
        planets.iter().filter(|p| p.has_real_data).count()
    );
    planets
}
