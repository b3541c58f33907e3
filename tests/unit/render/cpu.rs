use super::*;
use crate::style::color::Color;

fn fill(rect: Rect, paint: Paint) -> DrawOp {
    DrawOp::Fill {
        transform: Affine::IDENTITY,
        rect,
        radius: 0.0,
        paint,
    }
}

fn render(ops: Vec<DrawOp>, assets: &AssetStore) -> FrameRGBA {
    let tree = RenderTree {
        width: 32,
        height: 32,
        ops,
    };
    CpuBackend::new().render_tree(&tree, assets).unwrap()
}

#[test]
fn solid_fill_covers_its_rect_only() {
    let f = render(
        vec![fill(
            Rect::new(0.0, 0.0, 16.0, 32.0),
            Paint::solid(Color::rgb(255, 0, 0)),
        )],
        &AssetStore::empty(),
    );
    assert_eq!(f.pixel(4, 4), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(24, 4), Some([0, 0, 0, 0]));
}

#[test]
fn opacity_group_scales_alpha() {
    let f = render(
        vec![
            DrawOp::PushOpacity { opacity: 0.5 },
            fill(Rect::new(0.0, 0.0, 32.0, 32.0), Paint::solid(Color::WHITE)),
            DrawOp::Pop,
        ],
        &AssetStore::empty(),
    );
    let a = f.pixel(10, 10).unwrap()[3];
    assert!((126..=129).contains(&a), "alpha {a}");
}

#[test]
fn clip_limits_children() {
    let f = render(
        vec![
            DrawOp::PushClip {
                transform: Affine::IDENTITY,
                rect: Rect::new(0.0, 0.0, 8.0, 8.0),
                radius: 0.0,
            },
            fill(Rect::new(0.0, 0.0, 32.0, 32.0), Paint::solid(Color::WHITE)),
            DrawOp::Pop,
        ],
        &AssetStore::empty(),
    );
    assert_eq!(f.pixel(2, 2).unwrap()[3], 255);
    assert_eq!(f.pixel(20, 20).unwrap()[3], 0);
}

#[test]
fn gradient_fill_is_drawn_through_an_image_paint() {
    let f = render(
        vec![fill(
            Rect::new(0.0, 0.0, 32.0, 32.0),
            Paint::linear(90.0, &[Color::rgb(0, 0, 0), Color::rgb(255, 255, 255)]),
        )],
        &AssetStore::empty(),
    );
    let left = f.pixel(1, 16).unwrap();
    let right = f.pixel(30, 16).unwrap();
    assert_eq!(left[3], 255);
    assert!(right[0] > left[0] + 150);
}

#[test]
fn border_leaves_the_middle_empty() {
    let f = render(
        vec![DrawOp::Border {
            transform: Affine::IDENTITY,
            rect: Rect::new(0.0, 0.0, 32.0, 32.0),
            radius: 0.0,
            width: 4.0,
            color: Color::WHITE,
        }],
        &AssetStore::empty(),
    );
    assert_eq!(f.pixel(1, 16).unwrap()[3], 255);
    assert_eq!(f.pixel(16, 16).unwrap()[3], 0);
}

#[test]
fn shadow_bleeds_outside_the_box() {
    let f = render(
        vec![DrawOp::Shadow {
            transform: Affine::IDENTITY,
            rect: Rect::new(8.0, 8.0, 24.0, 24.0),
            radius: 0.0,
            shadow: Shadow::glow(6.0, Color::rgb(0, 0, 0)),
        }],
        &AssetStore::empty(),
    );
    assert!(f.pixel(16, 16).unwrap()[3] > 200);
    let halo = f.pixel(6, 16).unwrap()[3];
    assert!(halo > 0 && halo < 200, "halo alpha {halo}");
}

#[test]
fn images_are_scaled_into_their_rect() {
    let mut assets = AssetStore::empty();
    assets.insert_image(
        "dot",
        PreparedImage {
            width: 2,
            height: 2,
            rgba8_premul: Arc::new([0u8, 0, 255, 255].repeat(4)),
        },
    );
    let f = render(
        vec![DrawOp::Image {
            transform: Affine::IDENTITY,
            rect: Rect::new(0.0, 0.0, 16.0, 16.0),
            key: "dot".to_owned(),
        }],
        &assets,
    );
    assert_eq!(f.pixel(8, 8), Some([0, 0, 255, 255]));
    assert_eq!(f.pixel(24, 24).unwrap()[3], 0);
}

#[test]
fn missing_image_is_an_error() {
    let tree = RenderTree {
        width: 4,
        height: 4,
        ops: vec![DrawOp::Image {
            transform: Affine::IDENTITY,
            rect: Rect::new(0.0, 0.0, 4.0, 4.0),
            key: "nope".to_owned(),
        }],
    };
    assert!(CpuBackend::new().render_tree(&tree, &AssetStore::empty()).is_err());
}

#[test]
fn text_without_font_draws_nothing() {
    let f = render(
        vec![DrawOp::Text {
            transform: Affine::IDENTITY,
            origin: (0.0, 0.0),
            color: Color::WHITE,
            glyphs: 0,
            runs: Vec::new(),
        }],
        &AssetStore::empty(),
    );
    assert!(f.data.iter().all(|&b| b == 0));
}
