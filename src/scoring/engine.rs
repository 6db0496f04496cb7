use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::astro::{
    equilibrium_temperature, estimate_luminosity, estimate_semi_major_axis, insolation_flux,
    radius_earth, stellar_class_multiplier,
};
use super::factors::{
    clamp_score, ECCENTRICITY_FALLOFF, METALLICITY_BAND, SIZE_BAND, TEMPERATURE_BAND,
};
use super::zone::{hz_bounds_for, HzBounds};
use crate::catalog::PlanetInput;

/// Bond albedo assumed for every planet
pub const ALBEDO: f64 = 0.3;

/// Score at or above which a planet is labeled Likely
pub const LIKELY_THRESHOLD: f64 = 70.0;

/// Score at or above which a planet is labeled Possible
pub const POSSIBLE_THRESHOLD: f64 = 40.0;

/// Blend weights of the six sub-scores (sum to 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub flux: f64,
    pub size: f64,
    pub eccentricity: f64,
    pub stellar: f64,
    pub temperature: f64,
    pub metallicity: f64,
}

pub const WEIGHTS: Weights = Weights {
    flux: 0.40,
    size: 0.25,
    eccentricity: 0.10,
    stellar: 0.10,
    temperature: 0.10,
    metallicity: 0.05,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Likely,
    Possible,
    Unlikely,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Likely, Label::Possible, Label::Unlikely];

    pub fn from_score(score: f64) -> Self {
        if score >= LIKELY_THRESHOLD {
            Label::Likely
        } else if score >= POSSIBLE_THRESHOLD {
            Label::Possible
        } else {
            Label::Unlikely
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Likely => "Likely",
            Label::Possible => "Possible",
            Label::Unlikely => "Unlikely",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown label '{}' (use Likely, Possible or Unlikely)", s))
    }
}

/// Per-component scores, each 0 to 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub flux: f64,
    pub size: f64,
    pub eccentricity: f64,
    pub stellar: f64,
    pub temperature: f64,
    pub metallicity: f64,
}

/// One row of a score breakdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub name: &'static str,
    pub weight: f64,
    pub value: f64,
}

impl Contribution {
    pub fn weighted(&self) -> f64 {
        self.weight * self.value
    }
}

impl SubScores {
    /// Components in blend order with their weights
    pub fn contributions(&self) -> [Contribution; 6] {
        let c = |name, weight, value| Contribution {
            name,
            weight,
            value,
        };
        [
            c("flux", WEIGHTS.flux, self.flux),
            c("size", WEIGHTS.size, self.size),
            c("eccentricity", WEIGHTS.eccentricity, self.eccentricity),
            c("stellar", WEIGHTS.stellar, self.stellar),
            c("temperature", WEIGHTS.temperature, self.temperature),
            c("metallicity", WEIGHTS.metallicity, self.metallicity),
        ]
    }

    /// Weighted sum before clamping
    pub fn weighted_total(&self) -> f64 {
        self.contributions().iter().map(Contribution::weighted).sum()
    }
}

/// Derived quantities, score and label for one planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetResult {
    #[serde(rename = "a_AU")]
    pub a_au: Option<f64>,
    #[serde(rename = "L_Lsun")]
    pub l_lsun: f64,
    #[serde(rename = "S_earth")]
    pub s_earth: Option<f64>,
    #[serde(rename = "S_inner")]
    pub s_inner: Option<f64>,
    #[serde(rename = "S_outer")]
    pub s_outer: Option<f64>,
    #[serde(rename = "Teq_K")]
    pub teq_k: Option<f64>,
    #[serde(rename = "radius_Re")]
    pub radius_re: Option<f64>,
    pub score: f64,
    pub label: Label,
    pub in_hz: Option<bool>,
    pub subscores: SubScores,
}

impl PlanetResult {
    pub fn hz_bounds(&self) -> Option<HzBounds> {
        Some(HzBounds {
            inner: self.s_inner?,
            outer: self.s_outer?,
        })
    }
}

/// Score one planet
pub fn score_planet(input: &PlanetInput) -> PlanetResult {
    let a_au = estimate_semi_major_axis(input.pl_orbsmax, input.pl_orbper, input.st_mass);
    let l_lsun = estimate_luminosity(input.st_rad, input.st_teff, input.st_lum);
    let s_earth = insolation_flux(l_lsun, a_au);
    let radius_re = radius_earth(input.pl_rade, input.pl_radj);
    let teq_k = equilibrium_temperature(l_lsun, a_au, ALBEDO);
    let bounds = hz_bounds_for(input.st_teff);

    let (flux, in_hz) = match (s_earth, bounds) {
        (Some(s), Some(b)) => (flux_score(s, &b), Some(b.contains(s))),
        _ => (0.0, None),
    };

    let eccentricity = input.pl_orbeccen.unwrap_or(0.0).abs();
    let subscores = SubScores {
        flux,
        size: radius_re.map_or(0.0, |r| SIZE_BAND.score(r)),
        eccentricity: ECCENTRICITY_FALLOFF.score(eccentricity),
        stellar: 100.0 * stellar_class_multiplier(input.st_spectype.as_deref()),
        temperature: teq_k.map_or(0.0, |t| TEMPERATURE_BAND.score(t)),
        metallicity: METALLICITY_BAND.score(input.st_metfe.unwrap_or(0.0)),
    };

    let score = clamp_score(subscores.weighted_total());

    PlanetResult {
        a_au,
        l_lsun,
        s_earth,
        s_inner: bounds.map(|b| b.inner),
        s_outer: bounds.map(|b| b.outer),
        teq_k,
        radius_re,
        score,
        label: Label::from_score(score),
        in_hz,
        subscores,
    }
}

/// Score many planets, preserving input order
pub fn score_batch(inputs: &[PlanetInput]) -> Vec<PlanetResult> {
    inputs.iter().map(score_planet).collect()
}

/// Proximity of insolation to Earth's, normalized by the zone's extent.
///
/// The denominator is a heuristic normalization kept exactly as calibrated.
fn flux_score(s_earth: f64, bounds: &HzBounds) -> f64 {
    let width = match bounds.width() {
        w if w == 0.0 => 1.0,
        w => w,
    };
    let denom = (bounds.inner - 1.0)
        .abs()
        .max((1.0 - bounds.outer).abs())
        .max(0.5 * width)
        .max(1e-6);
    clamp_score(100.0 * (1.0 - (s_earth - 1.0).abs() / denom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::zone::hz_flux_bounds;

    const EPS: f64 = 1e-9;

    fn sun_like(name: &str) -> PlanetInput {
        PlanetInput {
            name: name.to_string(),
            pl_rade: Some(1.2),
            pl_orbsmax: Some(1.0),
            pl_orbeccen: Some(0.1),
            st_teff: Some(5772.0),
            st_rad: Some(1.0),
            st_spectype: Some("G2V".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(Label::from_score(70.0), Label::Likely);
        assert_eq!(Label::from_score(69.999), Label::Possible);
        assert_eq!(Label::from_score(40.0), Label::Possible);
        assert_eq!(Label::from_score(39.999), Label::Unlikely);
        assert_eq!(Label::from_score(100.0), Label::Likely);
        assert_eq!(Label::from_score(0.0), Label::Unlikely);
    }

    #[test]
    fn test_label_parse() {
        assert_eq!("likely".parse::<Label>().unwrap(), Label::Likely);
        assert_eq!(" POSSIBLE ".parse::<Label>().unwrap(), Label::Possible);
        assert!("maybe".parse::<Label>().is_err());
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total = WEIGHTS.flux
            + WEIGHTS.size
            + WEIGHTS.eccentricity
            + WEIGHTS.stellar
            + WEIGHTS.temperature
            + WEIGHTS.metallicity;
        assert!((total - 1.0).abs() < EPS);
    }

    #[test]
    fn test_earth_analog_scores_full_marks() {
        let result = score_planet(&sun_like("Earth analog"));

        assert_eq!(result.subscores.size, 100.0);
        assert_eq!(result.subscores.eccentricity, 100.0);
        assert_eq!(result.subscores.stellar, 100.0);
        assert_eq!(result.subscores.temperature, 100.0);
        assert_eq!(result.subscores.metallicity, 100.0);
        assert!((result.subscores.flux - 100.0).abs() < EPS);
        assert!((result.score - 100.0).abs() < EPS);
        assert_eq!(result.label, Label::Likely);
        assert_eq!(result.in_hz, Some(true));
        assert!((result.l_lsun - 1.0).abs() < EPS);
        assert_eq!(result.s_earth, Some(1.0));
    }

    #[test]
    fn test_weighted_aggregate_matches_hand_computation() {
        let mut input = sun_like("Wider orbit");
        input.pl_orbsmax = Some(1.2);
        input.st_metfe = Some(0.5);
        let result = score_planet(&input);

        // Hand computation from the documented formulas
        let s: f64 = 1.0 / (1.2 * 1.2);
        let t = 5772.0 - 5780.0;
        let inner = 1.0140 + 8.1774e-5 * t + 1.7063e-9 * t * t - 4.3241e-12 * t * t * t
            - 6.6462e-16 * t * t * t * t;
        let outer = 0.3438 + 5.8942e-5 * t + 1.6558e-9 * t * t - 3.0045e-12 * t * t * t
            - 5.2983e-16 * t * t * t * t;
        let denom = (inner - 1.0_f64)
            .abs()
            .max((1.0 - outer).abs())
            .max(0.5 * (inner - outer).abs());
        let flux = 100.0 * (1.0 - (s - 1.0).abs() / denom);
        let teq = 278.5 / 1.2_f64.sqrt() * 0.7_f64.powf(0.25);
        let temp = 100.0 * (teq - 180.0) / 60.0;
        let met = 100.0 * (0.7 - 0.5) / 0.4;
        let expected = 0.40 * flux + 0.25 * 100.0 + 0.10 * 100.0 + 0.10 * 100.0
            + 0.10 * temp
            + 0.05 * met;

        assert!((result.subscores.flux - flux).abs() < 1e-6);
        assert!((result.subscores.temperature - temp).abs() < 1e-6);
        assert!((result.subscores.metallicity - met).abs() < 1e-6);
        assert!((result.score - expected).abs() < 1e-6);
        assert_eq!(result.label, Label::from_score(expected));
        assert_eq!(result.in_hz, Some(true));
    }

    #[test]
    fn test_empty_input_is_unlikely() {
        let result = score_planet(&PlanetInput::named("Unknown"));

        assert_eq!(result.a_au, None);
        assert_eq!(result.l_lsun, 1.0);
        assert_eq!(result.s_earth, None);
        assert_eq!(result.s_inner, None);
        assert_eq!(result.s_outer, None);
        assert_eq!(result.teq_k, None);
        assert_eq!(result.radius_re, None);
        assert_eq!(result.in_hz, None);
        assert_eq!(result.subscores.flux, 0.0);
        assert_eq!(result.subscores.size, 0.0);
        assert_eq!(result.subscores.stellar, 0.0);
        assert_eq!(result.subscores.temperature, 0.0);
        // Missing eccentricity and metallicity default to ideal values
        assert_eq!(result.subscores.eccentricity, 100.0);
        assert_eq!(result.subscores.metallicity, 100.0);
        assert!((result.score - 15.0).abs() < EPS);
        assert_eq!(result.label, Label::Unlikely);
    }

    #[test]
    fn test_in_hz_undefined_without_temperature() {
        let mut input = sun_like("No teff");
        input.st_teff = None;
        let result = score_planet(&input);
        assert_eq!(result.in_hz, None);
        assert_eq!(result.subscores.flux, 0.0);
        // Flux is still known: luminosity falls back to solar
        assert_eq!(result.s_earth, Some(1.0));
    }

    #[test]
    fn test_in_hz_false_outside_zone() {
        let mut input = sun_like("Hot");
        input.pl_orbsmax = Some(0.3);
        let result = score_planet(&input);
        assert_eq!(result.in_hz, Some(false));
        assert_eq!(result.subscores.flux, 0.0);
        assert_eq!(result.subscores.temperature, 0.0);
    }

    #[test]
    fn test_negative_eccentricity_uses_magnitude() {
        let mut input = sun_like("Odd");
        input.pl_orbeccen = Some(-0.4);
        let result = score_planet(&input);
        assert!((result.subscores.eccentricity - 50.0).abs() < EPS);
    }

    #[test]
    fn test_jupiter_radius_conversion_feeds_size() {
        let mut input = sun_like("Giant");
        input.pl_rade = None;
        input.pl_radj = Some(1.0);
        let result = score_planet(&input);
        assert!((result.radius_re.unwrap() - 11.209).abs() < EPS);
        assert_eq!(result.subscores.size, 0.0);
    }

    #[test]
    fn test_size_boundaries() {
        for (r, full) in [(0.8, true), (1.6, true), (0.79999, false)] {
            let mut input = sun_like("Edge");
            input.pl_rade = Some(r);
            let size = score_planet(&input).subscores.size;
            if full {
                assert_eq!(size, 100.0, "radius {}", r);
            } else {
                assert!(size < 100.0, "radius {}", r);
            }
        }
    }

    #[test]
    fn test_kepler_fallback_feeds_flux() {
        let mut input = sun_like("Period only");
        input.pl_orbsmax = None;
        input.pl_orbper = Some(365.25);
        input.st_mass = Some(1.0);
        let result = score_planet(&input);
        assert!((result.a_au.unwrap() - 1.0).abs() < EPS);
        assert!((result.s_earth.unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_score_is_deterministic() {
        let input = sun_like("Repeat");
        let first = score_planet(&input);
        let second = score_planet(&input);
        assert_eq!(first.score.to_bits(), second.score.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_always_in_range() {
        let radii = [None, Some(0.1), Some(0.7), Some(1.0), Some(2.0), Some(30.0)];
        let axes = [None, Some(0.01), Some(0.5), Some(1.0), Some(3.0)];
        let temps = [None, Some(2500.0), Some(4000.0), Some(5780.0), Some(7500.0)];
        let metals = [None, Some(-2.0), Some(0.0), Some(0.5), Some(1.5)];
        for r in radii {
            for a in axes {
                for t in temps {
                    for m in metals {
                        let input = PlanetInput {
                            name: "grid".to_string(),
                            pl_rade: r,
                            pl_orbsmax: a,
                            st_teff: t,
                            st_metfe: m,
                            st_spectype: Some("M".to_string()),
                            pl_orbeccen: Some(0.9),
                            ..Default::default()
                        };
                        let result = score_planet(&input);
                        assert!((0.0..=100.0).contains(&result.score));
                        assert_eq!(result.label, Label::from_score(result.score));
                    }
                }
            }
        }
    }

    #[test]
    fn test_flux_score_zero_width_floor() {
        let bounds = HzBounds { inner: 1.0, outer: 1.0 };
        // width floors to 1.0, denom = 0.5
        assert!((flux_score(1.25, &bounds) - 50.0).abs() < EPS);
    }

    #[test]
    fn test_flux_score_reference_star() {
        let bounds = hz_flux_bounds(5780.0);
        // denom = |1 - 0.3438| = 0.6562
        let expected = 100.0 * (1.0 - 0.5 / 0.6562);
        assert!((flux_score(0.5, &bounds) - expected).abs() < 1e-9);
        assert_eq!(flux_score(1.0, &bounds), 100.0);
    }

    #[test]
    fn test_contributions_sum_to_score() {
        let result = score_planet(&sun_like("Sum"));
        let total: f64 = result
            .subscores
            .contributions()
            .iter()
            .map(Contribution::weighted)
            .sum();
        assert!((total - result.score).abs() < EPS);
        assert_eq!(result.subscores.contributions()[0].name, "flux");
    }

    #[test]
    fn test_score_batch_preserves_order() {
        let inputs = vec![sun_like("a"), PlanetInput::named("b"), sun_like("c")];
        let results = score_batch(&inputs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[1].label, Label::Unlikely);
        assert_eq!(results[0], results[2]);
    }

    #[test]
    fn test_result_serializes_with_catalog_names() {
        let result = score_planet(&sun_like("Json"));
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("a_AU").is_some());
        assert!(json.get("Teq_K").is_some());
        assert_eq!(json["label"], "Likely");
    }
}
