use super::*;

fn tree(opacity: f32) -> RenderTree {
    RenderTree {
        width: 10,
        height: 10,
        ops: vec![
            DrawOp::PushOpacity { opacity },
            DrawOp::Fill {
                transform: Affine::IDENTITY,
                rect: Rect::new(0.0, 0.0, 5.0, 5.0),
                radius: 0.0,
                paint: Paint::solid(Color::WHITE),
            },
            DrawOp::Pop,
        ],
    }
}

#[test]
fn identical_trees_share_a_fingerprint() {
    assert_eq!(fingerprint_tree(&tree(0.5)), fingerprint_tree(&tree(0.5)));
}

#[test]
fn any_change_alters_the_fingerprint() {
    let base = fingerprint_tree(&tree(0.5));
    assert_ne!(base, fingerprint_tree(&tree(0.6)));

    let mut moved = tree(0.5);
    if let DrawOp::Fill { transform, .. } = &mut moved.ops[1] {
        *transform = Affine::translate((1.0, 0.0));
    }
    assert_ne!(base, fingerprint_tree(&moved));

    let mut bigger = tree(0.5);
    bigger.width = 11;
    assert_ne!(base, fingerprint_tree(&bigger));
}
