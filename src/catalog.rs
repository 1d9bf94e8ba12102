//! Editable list of real projects shown on the first planets.
//!
//! The list lives in `assets/projects.json` and is embedded at build time.
//! Entry `i` of the catalog decorates planet `i`; planets past the end of
//! the list get placeholder content.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on catalog size: one entry per planet.
pub const MAX_ENTRIES: usize = 50;

const EMBEDDED_CATALOG: &str = include_str!("../assets/projects.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("project catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("project catalog has {count} entries, at most {max} are allowed")]
    TooManyEntries { count: usize, max: usize },

    #[error("project catalog entry {index} has an empty title")]
    EmptyTitle { index: usize },
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub techs: Vec<String>,
    #[serde(default = "default_link")]
    pub link: String,
}

fn default_link() -> String {
    "#".to_string()
}

impl ProjectEntry {
    pub fn new(title: &str, description: &str, techs: &[&str], link: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            techs: techs.iter().map(|t| t.to_string()).collect(),
            link: link.to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct Catalog {
    entries: Vec<ProjectEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<ProjectEntry>) -> Result<Self, CatalogError> {
        if entries.len() > MAX_ENTRIES {
            return Err(CatalogError::TooManyEntries {
                count: entries.len(),
                max: MAX_ENTRIES,
            });
        }
        if let Some(index) = entries.iter().position(|e| e.title.trim().is_empty()) {
            return Err(CatalogError::EmptyTitle { index });
        }
        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<ProjectEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Embedded catalog, or the built-in list when the asset is broken.
    pub fn load() -> Self {
        match Self::embedded() {
            Ok(catalog) => {
                log::info!("Loaded {} project(s) from catalog", catalog.len());
                catalog
            }
            Err(e) => {
                log::warn!("{e}; falling back to built-in projects");
                Self::builtin()
            }
        }
    }

    pub fn builtin() -> Self {
        Self {
            entries: vec![
                ProjectEntry::new(
                    "Gyroscopic Stabilizer",
                    "Système de stabilisation utilisant l'effet gyroscopique pour réduire le roulis d'un bateau en temps réel.",
                    &["Three.js", "React", "Arduino"],
                    "https://github.com/ton-repo",
                ),
                ProjectEntry::new(
                    "Portfolio Spatial",
                    "Portfolio interactif en 3D avec système solaire, animation de caméra et effets de post-traitement.",
                    &["React", "Three.js", "GSAP", "R3F"],
                    "https://github.com/ton-repo",
                ),
                ProjectEntry::new(
                    "Orbital Dashboard",
                    "Tableau de bord industriel avec visualisation de données en temps réel et interface cyberpunk.",
                    &["React", "WebGL", "GLSL", "WebSockets"],
                    "https://github.com/ton-repo",
                ),
            ],
        }
    }

    pub fn get(&self, index: usize) -> Option<&ProjectEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
