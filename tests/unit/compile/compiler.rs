use super::*;
use crate::layout::{TextShaper, compute_layout};
use crate::style::color::Color;
use crate::style::paint::Shadow;
use crate::style::style::pct;

fn compile(root: &Node) -> RenderTree {
    let canvas = Canvas::new(200, 100).unwrap();
    let assets = AssetStore::empty();
    let mut shaper = TextShaper::new(None).unwrap();
    let layout = compute_layout(root, canvas, &assets, &mut shaper).unwrap();
    compile_frame(root, &layout, canvas, &assets).unwrap()
}

fn fills(tree: &RenderTree) -> Vec<(Affine, Rect)> {
    tree.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Fill {
                transform, rect, ..
            } => Some((*transform, *rect)),
            _ => None,
        })
        .collect()
}

#[test]
fn children_inherit_parent_offsets() {
    let root = Node::column()
        .size_px(200.0, 100.0)
        .padding(crate::style::style::Edges::all(10.0))
        .child(Node::row().size_px(20.0, 20.0).bg(Color::WHITE));
    let tree = compile(&root);
    let f = fills(&tree);
    assert_eq!(f.len(), 1);
    assert_eq!(f[0].0 * kurbo::Point::ZERO, kurbo::Point::new(10.0, 10.0));
}

#[test]
fn percent_translate_uses_own_size() {
    let root = Node::column().size_px(200.0, 100.0).child(
        Node::row()
            .size_px(40.0, 20.0)
            .translate_len(pct(-50.0), pct(100.0))
            .bg(Color::WHITE),
    );
    let f = fills(&compile(&root));
    assert_eq!(f[0].0 * kurbo::Point::ZERO, kurbo::Point::new(-20.0, 20.0));
}

#[test]
fn scale_is_about_the_center() {
    let root = Node::column()
        .size_px(200.0, 100.0)
        .child(Node::row().size_px(40.0, 20.0).scale(2.0).bg(Color::WHITE));
    let f = fills(&compile(&root));
    let (t, r) = f[0];
    let mapped = t.transform_rect_bbox(r);
    assert_eq!(mapped, Rect::new(-20.0, -10.0, 60.0, 30.0));
}

#[test]
fn opacity_wraps_subtree_in_a_group() {
    let root = Node::column().size_px(200.0, 100.0).child(
        Node::row()
            .size_px(40.0, 20.0)
            .opacity(0.5)
            .bg(Color::WHITE)
            .child(Node::row().size_px(10.0, 10.0).bg(Color::WHITE)),
    );
    let tree = compile(&root);
    assert!(matches!(tree.ops[0], DrawOp::PushOpacity { opacity } if opacity == 0.5));
    assert!(matches!(tree.ops.last(), Some(DrawOp::Pop)));
    assert_eq!(tree.draw_count(), 2);
}

#[test]
fn invisible_subtrees_are_dropped() {
    let root = Node::column()
        .size_px(200.0, 100.0)
        .child(Node::row().size_px(40.0, 20.0).opacity(0.0).bg(Color::WHITE))
        .child(Node::row().size_px(40.0, 20.0).hidden().bg(Color::WHITE))
        .child(Node::row().size_px(40.0, 20.0).bg(Color::TRANSPARENT));
    assert!(compile(&root).ops.is_empty());
}

#[test]
fn shadow_precedes_fill_and_clip_wraps_children() {
    let root = Node::column().size_px(200.0, 100.0).child(
        Node::row()
            .size_px(40.0, 20.0)
            .radius(100.0)
            .shadow(Shadow::drop(4.0, 8.0, Color::rgba(0, 0, 0, 0.3)))
            .bg(Color::WHITE)
            .clip()
            .child(Node::row().size_px(80.0, 80.0).bg(Color::WHITE)),
    );
    let tree = compile(&root);
    assert!(matches!(tree.ops[0], DrawOp::Shadow { .. }));
    assert!(matches!(tree.ops[1], DrawOp::Fill { radius, .. } if radius == 10.0));
    assert!(matches!(tree.ops[2], DrawOp::PushClip { .. }));
    assert!(matches!(tree.ops[4], DrawOp::Pop));
}

#[test]
fn contain_fit_centers_the_image() {
    let r = fit_contain(Rect::new(0.0, 0.0, 100.0, 50.0), 20.0, 20.0);
    assert_eq!(r, Rect::new(25.0, 0.0, 75.0, 50.0));
    assert_eq!(fit_contain(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, 5.0), Rect::ZERO);
}

#[test]
fn layout_mismatch_is_rejected() {
    let canvas = Canvas::new(10, 10).unwrap();
    let err = compile_frame(
        &Node::row().child(Node::row()),
        &LayoutTree::default(),
        canvas,
        &AssetStore::empty(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("layout has 0 nodes"));
}
