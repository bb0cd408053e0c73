use crate::config::Constants;

use super::pseudoadiabat::{temperature, wbpt};
use super::UNDEFINED;

/// Convert temperature from kelvin to degrees Celsius
pub fn kelvin_to_celsius(temperature: f64, constants: &Constants) -> f64 {
    temperature - constants.celsius_offset
}

/// Convert temperature from degrees Celsius to kelvin
pub fn celsius_to_kelvin(temperature: f64, constants: &Constants) -> f64 {
    temperature + constants.celsius_offset
}

/// Saturation vapour pressure over liquid water (Pa), Bolton (1980) Eq. 10
pub fn saturation_vapour_pressure(temperature: f64, constants: &Constants) -> f64 {
    let t_c = kelvin_to_celsius(temperature, constants);
    constants.es_ref * (constants.es_a * t_c / (t_c + constants.es_b)).exp()
}

/// Dewpoint (K) for a given vapour pressure (Pa); inverse of
/// [`saturation_vapour_pressure`]
pub fn dewpoint_from_vapour_pressure(vapour_pressure: f64, constants: &Constants) -> f64 {
    if vapour_pressure <= 0.0 {
        return UNDEFINED;
    }
    let ln_ratio = (vapour_pressure / constants.es_ref).ln();
    celsius_to_kelvin(
        constants.es_b * ln_ratio / (constants.es_a - ln_ratio),
        constants,
    )
}

/// Vapour pressure (Pa) from pressure (Pa) and specific humidity (kg/kg)
pub fn vapour_pressure_from_specific_humidity(
    pressure: f64,
    specific_humidity: f64,
    constants: &Constants,
) -> f64 {
    let eps = constants.epsilon();
    pressure * specific_humidity / (eps + (1.0 - eps) * specific_humidity)
}

/// Specific humidity (kg/kg) from pressure (Pa) and dewpoint temperature (K).
///
/// Undefined when the vapour pressure at the dewpoint would exceed what the
/// total pressure can hold.
pub fn specific_humidity_from_dewpoint(pressure: f64, dewpoint: f64, constants: &Constants) -> f64 {
    let eps = constants.epsilon();
    let e = saturation_vapour_pressure(dewpoint, constants);
    let dry = pressure - (1.0 - eps) * e;
    if dry.is_nan() || dry <= 0.0 {
        return UNDEFINED;
    }
    eps * e / dry
}

/// Lifting condensation level `(pressure, temperature)` of a parcel.
///
/// LCL temperature from Bolton (1980) Eq. 15, pressure from Poisson's
/// equation with a moisture-corrected exponent. A parcel whose dewpoint is
/// at or above its temperature is already saturated and is its own LCL.
pub fn lifting_condensation_level(
    pressure: f64,
    temperature: f64,
    specific_humidity: f64,
    constants: &Constants,
) -> (f64, f64) {
    if !(0.0..1.0).contains(&specific_humidity) {
        return (UNDEFINED, UNDEFINED);
    }

    let e = vapour_pressure_from_specific_humidity(pressure, specific_humidity, constants);
    let dewpoint = dewpoint_from_vapour_pressure(e, constants);
    if dewpoint.is_nan() {
        return (UNDEFINED, UNDEFINED);
    }
    if dewpoint >= temperature {
        return (pressure, temperature);
    }

    let t_lcl = 1.0
        / (1.0 / (dewpoint - constants.lcl_offset)
            + (temperature / dewpoint).ln() / constants.lcl_scale)
        + constants.lcl_offset;

    let mixing_ratio = specific_humidity / (1.0 - specific_humidity);
    let kappa = constants.kappa_dry * (1.0 - constants.kappa_moisture * mixing_ratio);
    let p_lcl = pressure * (t_lcl / temperature).powf(1.0 / kappa);

    (p_lcl, t_lcl)
}

/// Adiabatic (pseudo) wet-bulb temperature (K) without iteration.
///
/// Lifts the parcel dry-adiabatically to its LCL, takes the wet-bulb
/// potential temperature of the pseudoadiabat through that point and follows
/// it back down to the parcel pressure. Undefined whenever either
/// pseudoadiabat evaluation leaves its fitted domain.
pub fn adiabatic_wet_bulb_temperature(
    pressure: f64,
    temperature_k: f64,
    specific_humidity: f64,
    constants: &Constants,
) -> f64 {
    let (p_lcl, t_lcl) =
        lifting_condensation_level(pressure, temperature_k, specific_humidity, constants);
    let thw = wbpt(p_lcl, t_lcl);
    temperature(pressure, thw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturation_vapour_pressure_at_freezing() {
        let constants = Constants::default();
        let es = saturation_vapour_pressure(273.15, &constants);
        assert!((es - 611.2).abs() < 1e-9);
    }

    #[test]
    fn test_dewpoint_inverts_saturation_vapour_pressure() {
        let constants = Constants::default();
        for td in [250.0, 273.15, 288.0, 300.0] {
            let e = saturation_vapour_pressure(td, &constants);
            let back = dewpoint_from_vapour_pressure(e, &constants);
            assert!((back - td).abs() < 1e-9, "{td} -> {back}");
        }
        assert!(dewpoint_from_vapour_pressure(0.0, &constants).is_nan());
    }

    #[test]
    fn test_saturated_parcel_is_its_own_lcl() {
        let constants = Constants::default();
        let q = specific_humidity_from_dewpoint(100000.0, 293.15, &constants);
        let (p_lcl, t_lcl) = lifting_condensation_level(100000.0, 293.15, q, &constants);
        assert!((p_lcl - 100000.0).abs() < 1e-3);
        assert!((t_lcl - 293.15).abs() < 1e-6);
    }

    #[test]
    fn test_lcl_is_cooler_and_higher() {
        let constants = Constants::default();
        let q = specific_humidity_from_dewpoint(100000.0, 283.15, &constants);
        let (p_lcl, t_lcl) = lifting_condensation_level(100000.0, 303.15, q, &constants);
        assert!(p_lcl < 100000.0);
        assert!(t_lcl < 283.15);
        assert!(t_lcl > 270.0);
    }

    #[test]
    fn test_invalid_humidity_is_undefined() {
        let constants = Constants::default();
        let (p, t) = lifting_condensation_level(100000.0, 300.0, -0.01, &constants);
        assert!(p.is_nan() && t.is_nan());
        assert!(adiabatic_wet_bulb_temperature(100000.0, 300.0, 1.5, &constants).is_nan());
    }
}
