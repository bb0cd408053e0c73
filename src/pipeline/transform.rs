use std::fmt;
use thiserror::Error;

use crate::config::Constants;
use crate::math::{self, UNDEFINED};

/// A transform refused to evaluate an element
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{transform} rejected {inputs:?}: {message}")]
pub struct TransformError {
    pub transform: String,
    pub inputs: Vec<f64>,
    pub message: String,
}

/// Pure function applied independently to every element of aligned fields.
///
/// Implementations must not keep mutable state between calls: the pipeline
/// invokes `apply` concurrently from several workers and in no particular
/// order.
pub trait ElementwiseTransform: Send + Sync {
    fn name(&self) -> &str;

    /// Number of operand fields
    fn arity(&self) -> usize;

    /// Units of the produced field
    fn units(&self) -> &str {
        ""
    }

    /// Evaluate one element; `args.len() == self.arity()`
    fn apply(&self, args: &[f64]) -> Result<f64, TransformError>;

    /// When false (the default) the pipeline yields NaN for any element with
    /// a NaN operand and never calls `apply` for it.
    fn accepts_undefined(&self) -> bool {
        false
    }
}

/// Apply `transform` over one chunk worth of operand values.
pub(crate) fn apply_chunk(
    transform: &dyn ElementwiseTransform,
    operands: &[&[f64]],
    len: usize,
) -> Result<Vec<f64>, TransformError> {
    let mut args = vec![0.0; operands.len()];
    let mut out = Vec::with_capacity(len);

    for i in 0..len {
        for (slot, operand) in args.iter_mut().zip(operands) {
            *slot = operand[i];
        }
        if !transform.accepts_undefined() && args.iter().any(|v| v.is_nan()) {
            out.push(UNDEFINED);
            continue;
        }
        out.push(transform.apply(&args)?);
    }

    Ok(out)
}

/// `(pressure [Pa], temperature [K]) -> wet-bulb potential temperature [K]`
#[derive(Debug, Clone, Copy, Default)]
pub struct WetBulbPotentialTemperature;

impl ElementwiseTransform for WetBulbPotentialTemperature {
    fn name(&self) -> &str {
        "wbpt"
    }

    fn arity(&self) -> usize {
        2
    }

    fn units(&self) -> &str {
        "K"
    }

    fn apply(&self, args: &[f64]) -> Result<f64, TransformError> {
        Ok(math::wbpt(args[0], args[1]))
    }
}

/// `(pressure [Pa], wet-bulb potential temperature [K]) -> temperature [K]`
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoadiabatTemperature;

impl ElementwiseTransform for PseudoadiabatTemperature {
    fn name(&self) -> &str {
        "temperature"
    }

    fn arity(&self) -> usize {
        2
    }

    fn units(&self) -> &str {
        "K"
    }

    fn apply(&self, args: &[f64]) -> Result<f64, TransformError> {
        Ok(math::temperature(args[0], args[1]))
    }
}

/// `(pressure [Pa], dewpoint [K]) -> specific humidity [kg/kg]`
#[derive(Debug, Clone, Default)]
pub struct SpecificHumidityFromDewpoint {
    pub constants: Constants,
}

impl ElementwiseTransform for SpecificHumidityFromDewpoint {
    fn name(&self) -> &str {
        "q"
    }

    fn arity(&self) -> usize {
        2
    }

    fn units(&self) -> &str {
        "kg kg-1"
    }

    fn apply(&self, args: &[f64]) -> Result<f64, TransformError> {
        Ok(math::specific_humidity_from_dewpoint(
            args[0],
            args[1],
            &self.constants,
        ))
    }
}

/// `(pressure [Pa], temperature [K], specific humidity [kg/kg]) -> wet-bulb temperature [K]`
#[derive(Debug, Clone, Default)]
pub struct AdiabaticWetBulbTemperature {
    pub constants: Constants,
}

impl ElementwiseTransform for AdiabaticWetBulbTemperature {
    fn name(&self) -> &str {
        "tw"
    }

    fn arity(&self) -> usize {
        3
    }

    fn units(&self) -> &str {
        "K"
    }

    fn apply(&self, args: &[f64]) -> Result<f64, TransformError> {
        Ok(math::adiabatic_wet_bulb_temperature(
            args[0],
            args[1],
            args[2],
            &self.constants,
        ))
    }
}

/// Presentation conversion from kelvin to degrees Celsius
#[derive(Debug, Clone, Default)]
pub struct KelvinToCelsius {
    pub constants: Constants,
}

impl ElementwiseTransform for KelvinToCelsius {
    fn name(&self) -> &str {
        "kelvin_to_celsius"
    }

    fn arity(&self) -> usize {
        1
    }

    fn units(&self) -> &str {
        "degC"
    }

    fn apply(&self, args: &[f64]) -> Result<f64, TransformError> {
        Ok(math::kelvin_to_celsius(args[0], &self.constants))
    }
}

type ElementFn = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// Wraps an arbitrary pure closure as a transform
pub struct FnTransform {
    name: String,
    arity: usize,
    units: String,
    func: Box<ElementFn>,
}

impl FnTransform {
    pub fn new<F>(name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            units: String::new(),
            func: Box::new(func),
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }
}

impl fmt::Debug for FnTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransform")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("units", &self.units)
            .finish()
    }
}

impl ElementwiseTransform for FnTransform {
    fn name(&self) -> &str {
        &self.name
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn units(&self) -> &str {
        &self.units
    }

    fn apply(&self, args: &[f64]) -> Result<f64, TransformError> {
        Ok((self.func)(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_chunk_skips_undefined_elements() {
        let double = FnTransform::new("double", 1, |a| a[0] * 2.0);
        let values = [1.0, f64::NAN, 3.0];
        let out = apply_chunk(&double, &[&values], 3).unwrap();
        assert_eq!(out[0], 2.0);
        assert!(out[1].is_nan());
        assert_eq!(out[2], 6.0);
    }

    struct CountNans;

    impl ElementwiseTransform for CountNans {
        fn name(&self) -> &str {
            "count_nans"
        }
        fn arity(&self) -> usize {
            2
        }
        fn apply(&self, args: &[f64]) -> Result<f64, TransformError> {
            Ok(args.iter().filter(|v| v.is_nan()).count() as f64)
        }
        fn accepts_undefined(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_transform_may_opt_into_undefined_inputs() {
        let a = [f64::NAN, 1.0];
        let b = [f64::NAN, f64::NAN];
        let out = apply_chunk(&CountNans, &[&a, &b], 2).unwrap();
        assert_eq!(out, vec![2.0, 1.0]);
    }

    #[test]
    fn test_builtin_transforms_match_scalar_functions() {
        let constants = Constants::default();
        assert_eq!(
            WetBulbPotentialTemperature.apply(&[85000.0, 283.15]).unwrap(),
            math::wbpt(85000.0, 283.15)
        );
        assert_eq!(
            PseudoadiabatTemperature.apply(&[85000.0, 289.0]).unwrap(),
            math::temperature(85000.0, 289.0)
        );
        let q = SpecificHumidityFromDewpoint::default()
            .apply(&[100000.0, 290.0])
            .unwrap();
        assert_eq!(q, math::specific_humidity_from_dewpoint(100000.0, 290.0, &constants));
        assert_eq!(KelvinToCelsius::default().apply(&[273.15]).unwrap(), 0.0);
    }
}
