use super::*;

#[test]
fn flatten_composites_over_background() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![0, 0, 0, 0, 128, 0, 0, 128],
    };
    let out = frame.flatten_onto([0, 0, 255]);
    assert_eq!(&out[0..4], &[0, 0, 255, 255]);
    assert_eq!(out[4], 128);
    assert_eq!(out[6], 127);
    assert_eq!(out[7], 255);
}

#[test]
fn straight_conversion_undoes_premultiplication() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 32, 0, 128],
    };
    assert_eq!(frame.to_straight(), vec![128, 64, 0, 128]);
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let frame = FrameRGBA::transparent(3, 2);
    assert_eq!(frame.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(3, 0), None);
}

#[test]
fn flatten_into_checks_buffer_length() {
    let frame = FrameRGBA::transparent(2, 2);
    let mut short = vec![0u8; 4];
    assert!(frame.flatten_into(&mut short, [0, 0, 0]).is_err());
    let mut ok = vec![0u8; 16];
    frame.flatten_into(&mut ok, [9, 8, 7]).unwrap();
    assert_eq!(&ok[12..16], &[9, 8, 7, 255]);
}
