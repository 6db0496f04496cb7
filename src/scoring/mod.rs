//! Heuristic habitability scoring.
//!
//! This is a teaching heuristic, not a scientific habitability model. The
//! score blends six sub-scores with fixed weights; see [`engine`].

pub mod astro;
pub mod engine;
pub mod factors;
pub mod zone;

pub use astro::{
    equilibrium_temperature, estimate_luminosity, estimate_semi_major_axis, insolation_flux,
    radius_earth, stellar_class_multiplier,
};
pub use engine::{
    score_batch, score_planet, Contribution, Label, PlanetResult, SubScores, Weights, ALBEDO,
    LIKELY_THRESHOLD, POSSIBLE_THRESHOLD, WEIGHTS,
};
pub use zone::{hz_flux_bounds, HzBounds};

/// Shown wherever a score is presented
pub const DISCLAIMER: &str =
    "Scores are an educational heuristic, not a definitive habitability claim.";
