use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn clamped_fade_holds_endpoints() {
    assert_eq!(interpolate_clamped(-5.0, &[0.0, 14.0], &[0.0, 1.0]).unwrap(), 0.0);
    assert!(approx(
        interpolate_clamped(7.0, &[0.0, 14.0], &[0.0, 1.0]).unwrap(),
        0.5
    ));
    assert_eq!(interpolate_clamped(40.0, &[0.0, 14.0], &[0.0, 1.0]).unwrap(), 1.0);
}

#[test]
fn default_extrapolation_extends_linearly() {
    let v = interpolate(20.0, &[0.0, 10.0], &[0.0, 1.0], InterpolateOpts::default()).unwrap();
    assert!(approx(v, 2.0));
    let v = interpolate(-10.0, &[0.0, 10.0], &[0.0, 1.0], InterpolateOpts::default()).unwrap();
    assert!(approx(v, -1.0));
}

#[test]
fn multi_segment_pulse_peaks_in_the_middle() {
    let r = [44.0, 52.0, 62.0];
    let o = [1.0, 1.05, 1.0];
    assert_eq!(interpolate_clamped(0.0, &r, &o).unwrap(), 1.0);
    assert!(approx(interpolate_clamped(52.0, &r, &o).unwrap(), 1.05));
    assert!(approx(interpolate_clamped(57.0, &r, &o).unwrap(), 1.025));
    assert_eq!(interpolate_clamped(90.0, &r, &o).unwrap(), 1.0);
}

#[test]
fn decreasing_output_ranges_are_allowed() {
    let v = interpolate_clamped(150.0, &[0.0, 300.0], &[14.0, -14.0]).unwrap();
    assert!(approx(v, 0.0));
}

#[test]
fn identity_returns_input_outside_range() {
    let opts = InterpolateOpts {
        left: Extrapolate::Identity,
        right: Extrapolate::Identity,
        easing: Ease::Linear,
    };
    assert_eq!(interpolate(-3.0, &[0.0, 1.0], &[10.0, 20.0], opts).unwrap(), -3.0);
    assert_eq!(interpolate(7.0, &[0.0, 1.0], &[10.0, 20.0], opts).unwrap(), 7.0);
}

#[test]
fn wrap_repeats_the_range() {
    let opts = InterpolateOpts {
        left: Extrapolate::Wrap,
        right: Extrapolate::Wrap,
        easing: Ease::Linear,
    };
    assert!(approx(
        interpolate(12.5, &[0.0, 10.0], &[0.0, 1.0], opts).unwrap(),
        0.25
    ));
    assert!(approx(
        interpolate(-2.5, &[0.0, 10.0], &[0.0, 1.0], opts).unwrap(),
        0.75
    ));
}

#[test]
fn easing_shapes_segment_progress() {
    let opts = InterpolateOpts::clamped().with_easing(Ease::InQuad);
    assert!(approx(
        interpolate(5.0, &[0.0, 10.0], &[0.0, 100.0], opts).unwrap(),
        25.0
    ));
}

#[test]
fn flat_output_short_circuits() {
    assert_eq!(interpolate_clamped(3.0, &[0.0, 10.0], &[4.0, 4.0]).unwrap(), 4.0);
}

#[test]
fn invalid_ranges_are_rejected() {
    let err = interpolate_clamped(0.0, &[0.0, 0.0], &[0.0, 1.0]).unwrap_err();
    assert!(err.to_string().contains("strictly increasing"));
    assert!(interpolate_clamped(0.0, &[0.0, 1.0, 2.0], &[0.0, 1.0]).is_err());
    assert!(interpolate_clamped(0.0, &[0.0], &[0.0]).is_err());
    assert!(interpolate_clamped(0.0, &[0.0, f64::INFINITY], &[0.0, 1.0]).is_err());
    assert!(interpolate_clamped(f64::NAN, &[0.0, 1.0], &[0.0, 1.0]).is_err());
}
