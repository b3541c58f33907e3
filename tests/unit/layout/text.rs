use super::*;

fn style(size: f64) -> TextStyle {
    TextStyle {
        size,
        line_height: 1.25,
        ..TextStyle::default()
    }
}

#[test]
fn estimate_is_proportional_to_length() {
    let mut shaper = TextShaper::new(None).unwrap();
    assert!(!shaper.has_font());
    let (w1, h1) = shaper.measure("abcd", &style(20.0), None).unwrap();
    let (w2, h2) = shaper.measure("abcdabcd", &style(20.0), None).unwrap();
    assert!((w2 - 2.0 * w1).abs() < 1e-3);
    assert_eq!(h1, h2);
    assert_eq!(h1, 25.0);
}

#[test]
fn estimate_wraps_on_word_boundaries() {
    let mut shaper = TextShaper::new(None).unwrap();
    let s = style(10.0);
    let (one_line_w, _) = shaper.measure("aaaa bbbb", &s, None).unwrap();
    let (w, h) = shaper.measure("aaaa bbbb", &s, Some(one_line_w - 1.0)).unwrap();
    assert!(w < one_line_w);
    assert_eq!(h, 2.0 * 12.5);
}

#[test]
fn min_content_width_is_the_longest_word() {
    let mut shaper = TextShaper::new(None).unwrap();
    let s = style(10.0);
    let (w, _) = shaper.measure("a bbbbbb cc", &s, Some(0.0)).unwrap();
    let (word, _) = shaper.measure("bbbbbb", &s, None).unwrap();
    assert!((w - word).abs() < 1e-3);
}

#[test]
fn uppercase_and_letter_spacing_affect_size() {
    let mut shaper = TextShaper::new(None).unwrap();
    let plain = style(10.0);
    let spaced = TextStyle {
        letter_spacing: 2.0,
        ..plain
    };
    let (a, _) = shaper.measure("jan", &plain, None).unwrap();
    let (b, _) = shaper.measure("jan", &spaced, None).unwrap();
    assert!((b - a - 6.0).abs() < 1e-3);
}

#[test]
fn shaping_without_font_has_no_glyphs() {
    let mut shaper = TextShaper::new(None).unwrap();
    let shaped = shaper.shape("Get started", &style(20.0), 400.0).unwrap();
    assert!(shaped.runs.is_empty());
    assert_eq!(shaped.lines, 1);
}

#[test]
fn align_shift_distributes_free_space() {
    assert_eq!(align_shift(TextAlign::Start, 100.0, 40.0), 0.0);
    assert_eq!(align_shift(TextAlign::Center, 100.0, 40.0), 30.0);
    assert_eq!(align_shift(TextAlign::End, 100.0, 40.0), 60.0);
    assert_eq!(align_shift(TextAlign::End, 30.0, 40.0), 0.0);
}
