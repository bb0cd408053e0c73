use super::*;
use approx::assert_abs_diff_eq;

// (pressure Pa, temperature K, wbpt K)
const WBPT_TABLE: [(f64, f64, f64); 12] = [
    (100000.0, 293.15, 293.1497107916625),
    (100000.0, 273.15, 273.149898192976),
    (100000.0, 253.15, 253.1487650211084),
    (100000.0, 303.15, 303.1496912562138),
    (90000.0, 298.15, 301.5994018556307),
    (85000.0, 283.15, 289.6867276103169),
    (70000.0, 300.0, 310.4431572188696),
    (50000.0, 253.15, 286.6150386357834),
    (30000.0, 233.15, 291.78205993721537),
    (5000.0, 273.15, 337.28964980563137),
    (5000.0, 173.15, 306.27214958317415),
    (110000.0, 323.15, 320.53879113233484),
];

// (pressure Pa, wbpt K, temperature K)
const TEMPERATURE_TABLE: [(f64, f64, f64); 5] = [
    (100000.0, 293.15, 293.15066550567263),
    (100000.0, 293.1497107916625, 293.1503763335604),
    (85000.0, 289.6867276103169, 283.1444785622138),
    (5000.0, 203.15, 86.38109732502161),
    (110000.0, 323.15, 325.7507366012372),
];

#[test]
fn test_wbpt_matches_fitted_polynomial() {
    for &(p, t, expected) in WBPT_TABLE.iter() {
        assert_abs_diff_eq!(wbpt(p, t), expected, epsilon = 1e-9);
    }
}

#[test]
fn test_temperature_matches_fitted_polynomial() {
    for &(p, thw, expected) in TEMPERATURE_TABLE.iter() {
        assert_abs_diff_eq!(temperature(p, thw), expected, epsilon = 1e-9);
    }
}

#[test]
fn test_domain_corners_are_defined() {
    assert!(wbpt(5000.0, 173.15).is_finite());
    assert!(wbpt(110000.0, 173.15).is_finite());
    assert!(wbpt(5000.0, 323.15).is_finite());
    assert!(wbpt(110000.0, 323.15).is_finite());

    assert!(temperature(5000.0, 203.15).is_finite());
    assert!(temperature(110000.0, 323.15).is_finite());
}

#[test]
fn test_outside_domain_is_undefined() {
    assert!(is_undefined(wbpt(4999.0, 273.15)));
    assert!(is_undefined(wbpt(110001.0, 273.15)));
    assert!(is_undefined(wbpt(85000.0, 173.14)));
    assert!(is_undefined(wbpt(85000.0, 323.16)));

    assert!(is_undefined(temperature(85000.0, 203.14)));
    assert!(is_undefined(temperature(85000.0, 323.16)));
    // wbpt at the top of the domain exceeds the inverse model's range
    assert!(is_undefined(temperature(5000.0, 337.28964980563137)));
}

#[test]
fn test_undefined_inputs_propagate() {
    assert!(wbpt(f64::NAN, 273.15).is_nan());
    assert!(wbpt(85000.0, f64::NAN).is_nan());
    assert!(temperature(f64::NAN, 290.0).is_nan());
    assert!(temperature(85000.0, f64::NAN).is_nan());
}

#[test]
fn test_near_surface_wbpt_close_to_temperature() {
    for t in [253.15, 273.15, 293.15, 303.15] {
        assert!((wbpt(100000.0, t) - t).abs() < 0.01);
    }
}
