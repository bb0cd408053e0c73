use super::{CELSIUS_OFFSET, PA_PER_HPA, UNDEFINED};

/// Number of coefficients in every fitted polynomial (degree 20).
pub const TERM_COUNT: usize = 21;

/// Evaluate a univariate polynomial with coefficients in ascending order.
///
/// Uses Horner's scheme from the highest-order coefficient down to the
/// constant term, so `[c0, c1, c2]` evaluates as `c0 + x * (c1 + x * c2)`.
/// An empty coefficient slice evaluates to zero.
pub fn horner(coefficients: &[f64], x: f64) -> f64 {
    let mut terms = coefficients.iter().rev();
    match terms.next() {
        Some(&highest) => terms.fold(highest, |acc, &c| c + x * acc),
        None => 0.0,
    }
}

/// Inclusive validity rectangle of a fitted surrogate, in hPa and degC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainBounds {
    pub pressure_min: f64,
    pub pressure_max: f64,
    pub value_min: f64,
    pub value_max: f64,
}

impl DomainBounds {
    /// True when both converted inputs lie inside the rectangle.
    ///
    /// NaN never lies inside, so undefined inputs fall out of the domain.
    pub fn contains(&self, pressure_hpa: f64, value_celsius: f64) -> bool {
        (self.pressure_min..=self.pressure_max).contains(&pressure_hpa)
            && (self.value_min..=self.value_max).contains(&value_celsius)
    }
}

/// Bivariate polynomial surrogate `f(p, v) = sum_k P_k(v) * Ref(p)^k`.
///
/// `reference` holds the coefficients of `Ref`, a polynomial in pressure
/// (hPa). Row `k` of `terms` holds the coefficients of `P_k`, a polynomial in
/// the second variable (degC). Both levels, and the outer sum over `k`, are
/// evaluated in Horner form.
#[derive(Debug)]
pub struct BivariateSurrogate {
    pub reference: &'static [f64; TERM_COUNT],
    pub terms: &'static [[f64; TERM_COUNT]],
    pub bounds: DomainBounds,
}

impl BivariateSurrogate {
    /// Evaluate at `pressure` (Pa) and `value` (K), returning kelvin.
    ///
    /// Returns [`UNDEFINED`] outside the fitted domain.
    pub fn evaluate(&self, pressure: f64, value: f64) -> f64 {
        let pressure_hpa = pressure / PA_PER_HPA;
        let value_celsius = value - CELSIUS_OFFSET;

        if !self.bounds.contains(pressure_hpa, value_celsius) {
            return UNDEFINED;
        }

        let reference = horner(self.reference, pressure_hpa);
        let mut rows = self.terms.iter().rev();
        let result = match rows.next() {
            Some(highest) => rows.fold(horner(highest, value_celsius), |acc, row| {
                horner(row, value_celsius) + reference * acc
            }),
            None => 0.0,
        };

        result + CELSIUS_OFFSET
    }
}
