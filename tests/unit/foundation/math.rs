use super::*;

#[test]
fn fnv_split_writes_match_single_write() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"springreel");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"spring");
    b.write_bytes(b"reel");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn responsive_takes_the_larger_of_min_and_scaled() {
    assert_eq!(responsive(1920.0, 0.06, 48.0), 115.0);
    assert_eq!(responsive(640.0, 0.06, 48.0), 48.0);
}

#[test]
fn round_half_up_matches_js_rounding() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(-2.6), -3.0);
}
