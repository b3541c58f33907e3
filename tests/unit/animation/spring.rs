use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn starts_at_zero_and_clamps_negative_frames() {
    let cfg = SpringConfig::default();
    assert_eq!(spring(0.0, fps30(), cfg).unwrap(), 0.0);
    assert_eq!(spring(-12.0, fps30(), cfg).unwrap(), 0.0);
}

#[test]
fn default_config_overshoots_then_settles() {
    let cfg = SpringConfig::default();
    let peak = (0..60)
        .map(|f| spring(f as f64, fps30(), cfg).unwrap())
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0, "underdamped spring should overshoot, peak={peak}");
    let late = spring(300.0, fps30(), cfg).unwrap();
    assert!((late - 1.0).abs() < 1e-3);
}

#[test]
fn heavy_damping_rises_monotonically() {
    let cfg = SpringConfig::damped(200.0, 100.0);
    let mut prev = 0.0;
    for f in 0..90 {
        let v = spring(f as f64, fps30(), cfg).unwrap();
        assert!(v >= prev - 1e-12, "frame {f}: {v} < {prev}");
        assert!(v <= 1.0 + 1e-12);
        prev = v;
    }
}

#[test]
fn critically_damped_branch_does_not_overshoot() {
    let cfg = SpringConfig::damped(20.0, 100.0);
    assert!((cfg.damping_ratio() - 1.0).abs() < 1e-12);
    for f in 0..120 {
        let v = spring(f as f64, fps30(), cfg).unwrap();
        assert!(v.is_finite() && v <= 1.0 + 1e-9);
    }
}

#[test]
fn overshoot_clamping_caps_progress() {
    let mut cfg = SpringConfig::default();
    cfg.overshoot_clamping = true;
    for f in 0..60 {
        assert!(spring(f as f64, fps30(), cfg).unwrap() <= 1.0);
    }
}

#[test]
fn fractional_frames_land_between_neighbours() {
    let cfg = SpringConfig::new(18.0, 120.0, 0.9);
    let a = spring(2.0, fps30(), cfg).unwrap();
    let mid = spring(2.5, fps30(), cfg).unwrap();
    let b = spring(3.0, fps30(), cfg).unwrap();
    assert!(a < mid && mid < b);
}

#[test]
fn invalid_config_is_rejected() {
    let err = spring(3.0, fps30(), SpringConfig::damped(0.0, 100.0)).unwrap_err();
    assert!(err.to_string().contains("damping"));
    assert!(spring(3.0, fps30(), SpringConfig::new(10.0, 100.0, -1.0)).is_err());
}

#[test]
fn measure_spring_finds_a_settled_frame() {
    let cfg = SpringConfig::default();
    let n = measure_spring(fps30(), &cfg, 0.005).unwrap();
    assert!(n > 0);
    for f in n..n + 40 {
        let v = spring(f as f64, fps30(), cfg).unwrap();
        assert!((v - 1.0).abs() < 0.005, "frame {f} not settled: {v}");
    }
}

#[test]
fn stiffer_springs_settle_sooner() {
    let soft = measure_spring(fps30(), &SpringConfig::damped(26.0, 100.0), 0.005).unwrap();
    let stiff = measure_spring(fps30(), &SpringConfig::damped(26.0, 400.0), 0.005).unwrap();
    assert!(stiff < soft);
}

#[test]
fn measure_spring_rejects_non_positive_threshold() {
    assert!(measure_spring(fps30(), &SpringConfig::default(), 0.0).is_err());
    assert!(measure_spring(fps30(), &SpringConfig::default(), -1.0).is_err());
}

#[test]
fn duration_stretches_and_finishes_at_target() {
    let s = Spring::new(SpringConfig::damped(200.0, 100.0)).duration(20.0);
    assert_eq!(s.sample(0.0, fps30()).unwrap(), 0.0);
    let near_end = s.sample(20.0, fps30()).unwrap();
    assert!((near_end - 1.0).abs() < 0.005);
    assert_eq!(s.sample(21.0, fps30()).unwrap(), 1.0);
    let mid = s.sample(10.0, fps30()).unwrap();
    assert!(mid > 0.0 && mid < 1.0);
}

#[test]
fn delay_holds_the_start_value() {
    let s = Spring::new(SpringConfig::damped(14.0, 180.0)).delay(6.0);
    assert_eq!(s.sample(6.0, fps30()).unwrap(), 0.0);
    assert!(s.sample(10.0, fps30()).unwrap() > 0.0);
}

#[test]
fn range_maps_progress_onto_from_to() {
    let s = Spring::new(SpringConfig::damped(200.0, 100.0)).range(100.0, 50.0);
    assert_eq!(s.sample(0.0, fps30()).unwrap(), 100.0);
    let late = s.sample(200.0, fps30()).unwrap();
    assert!((late - 50.0).abs() < 0.5);
}

#[test]
fn reverse_runs_from_target_back_to_start() {
    let s = Spring::new(SpringConfig::damped(200.0, 100.0)).reversed();
    let natural = measure_spring(fps30(), &s.config, s.rest_threshold).unwrap() as f64;
    assert!((s.sample(0.0, fps30()).unwrap() - 1.0).abs() < 0.005);
    assert_eq!(s.sample(natural, fps30()).unwrap(), 0.0);
}

#[test]
fn same_inputs_give_identical_values() {
    let cfg = SpringConfig::new(16.0, 160.0, 0.9);
    let a: Vec<f64> = (0..50).map(|f| spring(f as f64, fps30(), cfg).unwrap()).collect();
    let b: Vec<f64> = (0..50).map(|f| spring(f as f64, fps30(), cfg).unwrap()).collect();
    assert_eq!(a, b);
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn reference_curve_values() {
    assert_close(
        spring(10.0, fps30(), SpringConfig::default()).unwrap(),
        1.1552855913778497,
    );
    assert_close(
        spring(7.5, fps30(), SpringConfig::new(14.0, 180.0, 0.8)).unwrap(),
        1.1039821799999456,
    );
    let stretched = Spring::new(SpringConfig::damped(200.0, 100.0)).duration(20.0);
    assert_close(stretched.sample(10.0, fps30()).unwrap(), 0.8954193748557834);
}

#[test]
fn reference_settle_frames() {
    let default = measure_spring(fps30(), &SpringConfig::default(), 0.005).unwrap();
    assert_eq!(default, 28);
    let heavy = measure_spring(fps30(), &SpringConfig::damped(200.0, 100.0), 0.005).unwrap();
    assert_eq!(heavy, 23);
}
