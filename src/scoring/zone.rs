//! Habitable-zone flux limits (Kopparapu et al. 2013/2014 parameterization).

use super::astro::provided;

/// Reference temperature of the polynomial expansion, K
pub const HZ_REFERENCE_TEFF_K: f64 = 5780.0;

/// Coefficients of `S = S_effSun + a·T + b·T² + c·T³ + d·T⁴`, T = Teff − 5780 K
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HzCoefficients {
    pub s_eff_sun: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl HzCoefficients {
    /// Effective flux limit (Earth units) for a star of the given temperature
    pub fn flux(&self, teff: f64) -> f64 {
        let t = teff - HZ_REFERENCE_TEFF_K;
        self.s_eff_sun + self.a * t + self.b * t * t + self.c * t * t * t + self.d * t * t * t * t
    }
}

/// Inner edge: moist greenhouse limit
pub const MOIST_GREENHOUSE: HzCoefficients = HzCoefficients {
    s_eff_sun: 1.0140,
    a: 8.1774e-5,
    b: 1.7063e-9,
    c: -4.3241e-12,
    d: -6.6462e-16,
};

/// Outer edge: maximum greenhouse limit
pub const MAXIMUM_GREENHOUSE: HzCoefficients = HzCoefficients {
    s_eff_sun: 0.3438,
    a: 5.8942e-5,
    b: 1.6558e-9,
    c: -3.0045e-12,
    d: -5.2983e-16,
};

/// Habitable-zone limits expressed as insolation.
///
/// The inner edge is the larger flux: the zone is bounded in flux, not
/// distance, so `inner >= outer` for physical temperatures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HzBounds {
    pub inner: f64,
    pub outer: f64,
}

impl HzBounds {
    /// Whether an insolation value lies within `[outer, inner]`
    pub fn contains(&self, s_earth: f64) -> bool {
        self.outer <= s_earth && s_earth <= self.inner
    }

    pub fn width(&self) -> f64 {
        (self.inner - self.outer).abs()
    }
}

/// Inner and outer flux limits for a star of effective temperature `teff`
pub fn hz_flux_bounds(teff: f64) -> HzBounds {
    HzBounds {
        inner: MOIST_GREENHOUSE.flux(teff),
        outer: MAXIMUM_GREENHOUSE.flux(teff),
    }
}

/// Flux limits for an optional catalog temperature
pub fn hz_bounds_for(st_teff: Option<f64>) -> Option<HzBounds> {
    provided(st_teff).map(hz_flux_bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_temperature_collapses_polynomial() {
        let bounds = hz_flux_bounds(5780.0);
        assert_eq!(bounds.inner, 1.0140);
        assert_eq!(bounds.outer, 0.3438);
    }

    #[test]
    fn test_inner_flux_exceeds_outer() {
        for teff in [2600.0, 3500.0, 4500.0, 5780.0, 6500.0, 7200.0] {
            let bounds = hz_flux_bounds(teff);
            assert!(bounds.inner > bounds.outer, "teff {}", teff);
        }
    }

    #[test]
    fn test_cooler_star_lowers_limits() {
        let sun = hz_flux_bounds(5780.0);
        let m_dwarf = hz_flux_bounds(3000.0);
        assert!(m_dwarf.inner < sun.inner);
        assert!(m_dwarf.outer < sun.outer);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bounds = HzBounds { inner: 1.0, outer: 0.4 };
        assert!(bounds.contains(1.0));
        assert!(bounds.contains(0.4));
        assert!(bounds.contains(0.7));
        assert!(!bounds.contains(1.01));
        assert!(!bounds.contains(0.39));
    }

    #[test]
    fn test_bounds_undefined_without_temperature() {
        assert!(hz_bounds_for(None).is_none());
        assert!(hz_bounds_for(Some(0.0)).is_none());
        assert_eq!(hz_bounds_for(Some(5780.0)), Some(hz_flux_bounds(5780.0)));
    }

    #[test]
    fn test_width() {
        let bounds = hz_flux_bounds(5780.0);
        assert!((bounds.width() - 0.6702).abs() < 1e-12);
    }
}
