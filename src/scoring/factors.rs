/// Clamp a score into [0, 100]. NaN collapses to 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Trapezoidal preference band.
///
/// Full marks on `[full_lo, full_hi]`, linear ramps down to zero at
/// `zero_lo` (inclusive, lower ramp `[zero_lo, full_lo)`) and `zero_hi`
/// (upper ramp `(full_hi, zero_hi]`), zero outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub zero_lo: f64,
    pub full_lo: f64,
    pub full_hi: f64,
    pub zero_hi: f64,
}

impl Band {
    pub const fn new(zero_lo: f64, full_lo: f64, full_hi: f64, zero_hi: f64) -> Self {
        Self {
            zero_lo,
            full_lo,
            full_hi,
            zero_hi,
        }
    }

    pub fn score(&self, value: f64) -> f64 {
        if self.full_lo <= value && value <= self.full_hi {
            100.0
        } else if self.zero_lo <= value && value < self.full_lo {
            100.0 * (value - self.zero_lo) / (self.full_lo - self.zero_lo)
        } else if self.full_hi < value && value <= self.zero_hi {
            100.0 * (self.zero_hi - value) / (self.zero_hi - self.full_hi)
        } else {
            0.0
        }
    }
}

/// One-sided preference: full marks up to `full_to`, zero from `zero_from`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Falloff {
    pub full_to: f64,
    pub zero_from: f64,
}

impl Falloff {
    pub const fn new(full_to: f64, zero_from: f64) -> Self {
        Self { full_to, zero_from }
    }

    pub fn score(&self, value: f64) -> f64 {
        if value <= self.full_to {
            100.0
        } else if value >= self.zero_from {
            0.0
        } else {
            100.0 * (self.zero_from - value) / (self.zero_from - self.full_to)
        }
    }
}

/// Planet radius, Earth radii
pub const SIZE_BAND: Band = Band::new(0.5, 0.8, 1.6, 2.5);

/// Equilibrium temperature, K
pub const TEMPERATURE_BAND: Band = Band::new(180.0, 240.0, 320.0, 380.0);

/// Stellar metallicity [Fe/H], dex
pub const METALLICITY_BAND: Band = Band::new(-0.7, -0.3, 0.3, 0.7);

/// Orbital eccentricity
pub const ECCENTRICITY_FALLOFF: Falloff = Falloff::new(0.2, 0.6);
