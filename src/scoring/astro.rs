//! Astrophysical estimators.
//!
//! Each estimator treats a missing input as a normal state and returns
//! `None` (or an explicit fallback) instead of failing. A value of exactly
//! zero counts as "not provided" for quantities the catalog leaves at zero
//! when unmeasured.

/// Solar effective temperature used for luminosity scaling, K
pub const SOLAR_TEFF_K: f64 = 5772.0;

/// Days per Julian year, for converting orbital periods
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Earth radii per Jupiter radius
pub const EARTH_RADII_PER_JUPITER: f64 = 11.209;

/// Zero-greenhouse equilibrium temperature of a perfect absorber at 1 AU, K
pub const EQUILIBRIUM_TEMP_1AU_K: f64 = 278.5;

/// Treat zero and NaN as absent
pub(crate) fn provided(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Stellar luminosity in solar units.
///
/// Prefers a positive catalog luminosity, then Stefan-Boltzmann scaling
/// from radius and temperature, then falls back to 1.0.
pub fn estimate_luminosity(st_rad: Option<f64>, st_teff: Option<f64>, st_lum: Option<f64>) -> f64 {
    if let Some(lum) = st_lum.filter(|l| *l > 0.0) {
        return lum;
    }
    if let (Some(rad), Some(teff)) = (provided(st_rad), provided(st_teff)) {
        return rad.powi(2) * (teff / SOLAR_TEFF_K).powi(4);
    }
    1.0
}

/// Semi-major axis in AU.
///
/// Uses the catalog value when positive, otherwise Kepler's third law with
/// the planet mass neglected. No fallback: None when neither is possible.
pub fn estimate_semi_major_axis(
    pl_orbsmax: Option<f64>,
    pl_orbper: Option<f64>,
    st_mass: Option<f64>,
) -> Option<f64> {
    if let Some(a) = pl_orbsmax.filter(|a| *a > 0.0) {
        return Some(a);
    }
    let period_days = provided(pl_orbper)?;
    let mass = provided(st_mass)?;
    Some(((period_days / DAYS_PER_YEAR).powi(2) * mass).cbrt())
}

/// Insolation relative to Earth: L / a²
pub fn insolation_flux(luminosity: f64, a_au: Option<f64>) -> Option<f64> {
    let a = a_au.filter(|a| *a > 0.0)?;
    Some(luminosity / (a * a))
}

/// Zero-greenhouse equilibrium temperature in K, normalized to Earth
pub fn equilibrium_temperature(luminosity: f64, a_au: Option<f64>, albedo: f64) -> Option<f64> {
    let a = a_au.filter(|a| *a > 0.0)?;
    Some(EQUILIBRIUM_TEMP_1AU_K * luminosity.powf(0.25) / a.sqrt() * (1.0 - albedo).powf(0.25))
}

/// Planet radius in Earth radii, converting from Jupiter radii if needed
pub fn radius_earth(pl_rade: Option<f64>, pl_radj: Option<f64>) -> Option<f64> {
    if let Some(r) = pl_rade.filter(|r| *r > 0.0) {
        return Some(r);
    }
    pl_radj
        .filter(|r| *r > 0.0)
        .map(|r| r * EARTH_RADII_PER_JUPITER)
}

/// Host-star preference from the spectral type's leading letter.
///
/// G and K dwarfs are favored, F stars mildly penalized, M dwarfs more so
/// (flares, tidal locking). Unknown classes get 0.9; no type at all gets 0.
pub fn stellar_class_multiplier(spectral_type: Option<&str>) -> f64 {
    let spt = match spectral_type {
        Some(s) if !s.is_empty() => s,
        _ => return 0.0,
    };
    match spt.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('G') | Some('K') => 1.0,
        Some('F') => 0.85,
        Some('M') => 0.75,
        _ => 0.9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_luminosity_prefers_catalog_value() {
        assert_eq!(estimate_luminosity(Some(2.0), Some(6000.0), Some(0.5)), 0.5);
    }

    #[test]
    fn test_luminosity_ignores_non_positive_catalog_value() {
        let l = estimate_luminosity(Some(1.0), Some(SOLAR_TEFF_K), Some(0.0));
        assert!((l - 1.0).abs() < EPS);
        let l = estimate_luminosity(Some(2.0), Some(SOLAR_TEFF_K), Some(-1.0));
        assert!((l - 4.0).abs() < EPS);
    }

    #[test]
    fn test_luminosity_solar_calibration() {
        let l = estimate_luminosity(Some(1.0), Some(5772.0), None);
        assert!((l - 1.0).abs() < EPS);
    }

    #[test]
    fn test_luminosity_stefan_boltzmann_scaling() {
        // Twice the radius, same temperature -> 4x luminosity
        let l = estimate_luminosity(Some(2.0), Some(5772.0), None);
        assert!((l - 4.0).abs() < EPS);
        // Half the temperature -> 1/16
        let l = estimate_luminosity(Some(1.0), Some(2886.0), None);
        assert!((l - 0.0625).abs() < EPS);
    }

    #[test]
    fn test_luminosity_defaults_to_solar() {
        assert_eq!(estimate_luminosity(None, None, None), 1.0);
        assert_eq!(estimate_luminosity(Some(1.0), None, None), 1.0);
        assert_eq!(estimate_luminosity(None, Some(5000.0), None), 1.0);
        assert_eq!(estimate_luminosity(Some(0.0), Some(5000.0), None), 1.0);
    }

    #[test]
    fn test_semi_major_axis_prefers_catalog_value() {
        assert_eq!(estimate_semi_major_axis(Some(0.7), Some(365.25), Some(1.0)), Some(0.7));
    }

    #[test]
    fn test_semi_major_axis_from_kepler() {
        // One year around one solar mass is 1 AU
        let a = estimate_semi_major_axis(None, Some(365.25), Some(1.0)).unwrap();
        assert!((a - 1.0).abs() < EPS);
        // Eight years -> 4 AU
        let a = estimate_semi_major_axis(Some(0.0), Some(8.0 * 365.25), Some(1.0)).unwrap();
        assert!((a - 4.0).abs() < EPS);
    }

    #[test]
    fn test_semi_major_axis_undefined_without_inputs() {
        assert_eq!(estimate_semi_major_axis(None, None, None), None);
        assert_eq!(estimate_semi_major_axis(None, Some(100.0), None), None);
        assert_eq!(estimate_semi_major_axis(None, None, Some(1.0)), None);
        assert_eq!(estimate_semi_major_axis(Some(-1.0), Some(0.0), Some(1.0)), None);
    }

    #[test]
    fn test_insolation_flux() {
        assert_eq!(insolation_flux(1.0, Some(1.0)), Some(1.0));
        assert_eq!(insolation_flux(4.0, Some(2.0)), Some(1.0));
        assert_eq!(insolation_flux(1.0, None), None);
        assert_eq!(insolation_flux(1.0, Some(0.0)), None);
        assert_eq!(insolation_flux(1.0, Some(-2.0)), None);
    }

    #[test]
    fn test_equilibrium_temperature_earth() {
        let teq = equilibrium_temperature(1.0, Some(1.0), 0.3).unwrap();
        assert!((teq - 255.0).abs() < 0.5, "got {}", teq);
        assert!((teq - 278.5 * 0.7_f64.powf(0.25)).abs() < EPS);
    }

    #[test]
    fn test_equilibrium_temperature_undefined() {
        assert_eq!(equilibrium_temperature(1.0, None, 0.3), None);
        assert_eq!(equilibrium_temperature(1.0, Some(0.0), 0.3), None);
    }

    #[test]
    fn test_radius_earth() {
        assert_eq!(radius_earth(Some(1.5), Some(1.0)), Some(1.5));
        let r = radius_earth(None, Some(1.0)).unwrap();
        assert!((r - 11.209).abs() < EPS);
        let r = radius_earth(Some(0.0), Some(0.1)).unwrap();
        assert!((r - 1.1209).abs() < EPS);
        assert_eq!(radius_earth(None, None), None);
        assert_eq!(radius_earth(Some(-1.0), Some(0.0)), None);
    }

    #[test]
    fn test_stellar_class_multiplier() {
        assert_eq!(stellar_class_multiplier(Some("G2V")), 1.0);
        assert_eq!(stellar_class_multiplier(Some("k5")), 1.0);
        assert_eq!(stellar_class_multiplier(Some("F8 IV")), 0.85);
        assert_eq!(stellar_class_multiplier(Some("m4.5V")), 0.75);
        assert_eq!(stellar_class_multiplier(Some("A0V")), 0.9);
        assert_eq!(stellar_class_multiplier(Some(" G2V")), 1.0);
    }

    #[test]
    fn test_stellar_class_multiplier_empty() {
        assert_eq!(stellar_class_multiplier(None), 0.0);
        assert_eq!(stellar_class_multiplier(Some("")), 0.0);
        // Whitespace is not empty: unknown class
        assert_eq!(stellar_class_multiplier(Some("  ")), 0.9);
    }
}
