mod coefficients;
pub mod physics;
pub mod polynomial;
pub mod pseudoadiabat;

#[cfg(test)]
mod tests;

pub use physics::*;
pub use polynomial::{horner, BivariateSurrogate, DomainBounds};
pub use pseudoadiabat::*;

/// Sentinel for "outside the fitted domain" or "input already undefined".
pub const UNDEFINED: f64 = f64::NAN;

/// Offset between the Kelvin and Celsius scales used by the fitted models
pub const CELSIUS_OFFSET: f64 = 273.15;

/// Pascals per hectopascal
pub const PA_PER_HPA: f64 = 100.0;

/// True for the undefined sentinel
pub fn is_undefined(value: f64) -> bool {
    value.is_nan()
}
