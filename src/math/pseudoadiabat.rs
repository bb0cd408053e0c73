//! Non-iterative pseudoadiabats.
//!
//! Polynomial approximations of Moisseeva and Stull (2017) with revised
//! coefficients:
//!
//! Moisseeva, N. and Stull, R., 2017. A noniterative approach to modelling
//! moist thermodynamics. Atmospheric Chemistry and Physics, 17, 15037-15043.

use super::coefficients::{
    TEMPERATURE_REFERENCE, TEMPERATURE_TERMS, WBPT_REFERENCE, WBPT_TERMS,
};
use super::polynomial::{BivariateSurrogate, DomainBounds};

/// Forward model: (pressure, temperature) -> wet-bulb potential temperature.
pub static WBPT_MODEL: BivariateSurrogate = BivariateSurrogate {
    reference: &WBPT_REFERENCE,
    terms: &WBPT_TERMS,
    bounds: DomainBounds {
        pressure_min: 50.0,
        pressure_max: 1100.0,
        value_min: -100.0,
        value_max: 50.0,
    },
};

/// Inverse model: (pressure, wet-bulb potential temperature) -> temperature.
pub static TEMPERATURE_MODEL: BivariateSurrogate = BivariateSurrogate {
    reference: &TEMPERATURE_REFERENCE,
    terms: &TEMPERATURE_TERMS,
    bounds: DomainBounds {
        pressure_min: 50.0,
        pressure_max: 1100.0,
        value_min: -70.0,
        value_max: 50.0,
    },
};

/// Wet-bulb potential temperature (K) of the pseudoadiabat passing through
/// pressure `p` (Pa) and temperature `t` (K).
///
/// Valid for 50-1100 hPa and -100 to 50 degC; returns NaN outside that range.
pub fn wbpt(p: f64, t: f64) -> f64 {
    WBPT_MODEL.evaluate(p, t)
}

/// Temperature (K) at pressure `p` (Pa) on the pseudoadiabat with wet-bulb
/// potential temperature `thw` (K).
///
/// Valid for 50-1100 hPa and -70 to 50 degC; returns NaN outside that range.
/// Fitted independently of [`wbpt`], so the two only invert each other to
/// within the fit residual.
pub fn temperature(p: f64, thw: f64) -> f64 {
    TEMPERATURE_MODEL.evaluate(p, thw)
}
