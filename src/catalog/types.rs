use serde::{Deserialize, Serialize};

/// One catalog row of planet and host-star parameters.
///
/// Field names follow the NASA Exoplanet Archive column convention. Every
/// measurement is optional; only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetInput {
    pub name: String,
    pub pl_rade: Option<f64>,     // Planet radius, Earth radii
    pub pl_radj: Option<f64>,     // Planet radius, Jupiter radii
    pub pl_orbsmax: Option<f64>,  // Semi-major axis, AU
    pub pl_orbper: Option<f64>,   // Orbital period, days
    pub pl_orbeccen: Option<f64>, // Eccentricity
    pub st_teff: Option<f64>,     // Stellar effective temperature, K
    pub st_rad: Option<f64>,      // Stellar radius, solar radii
    pub st_lum: Option<f64>,      // Stellar luminosity, solar units
    pub st_mass: Option<f64>,     // Stellar mass, solar masses
    pub st_metfe: Option<f64>,    // Metallicity [Fe/H], dex
    pub st_spectype: Option<String>,
    #[serde(default)]
    pub ra: Option<f64>,
    #[serde(default)]
    pub dec: Option<f64>,
}

impl PlanetInput {
    /// Create an input with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
