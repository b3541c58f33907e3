use super::*;
use crate::style::style::{Edges, TextStyle, pct};

fn lay(root: &Node) -> LayoutTree {
    let mut shaper = TextShaper::new(None).unwrap();
    compute_layout(
        root,
        Canvas::new(400, 200).unwrap(),
        &AssetStore::empty(),
        &mut shaper,
    )
    .unwrap()
}

#[test]
fn rects_follow_preorder() {
    let root = Node::column()
        .size_px(400.0, 200.0)
        .child(Node::row().size_px(50.0, 20.0).child(Node::row().size_px(10.0, 10.0)))
        .child(Node::row().size_px(30.0, 30.0));
    let l = lay(&root);
    assert_eq!(l.len(), 4);
    assert_eq!(l.rects[1], RectPx { x: 0.0, y: 0.0, w: 50.0, h: 20.0 });
    assert_eq!(l.rects[2].w, 10.0);
    assert_eq!(l.rects[3].y, 20.0);
}

#[test]
fn centered_child_and_percent_width() {
    let root = Node::row()
        .size_px(400.0, 200.0)
        .center()
        .child(Node::row().size(pct(50.0), px_len(40.0)));
    let l = lay(&root);
    assert_eq!(l.rects[1].w, 200.0);
    assert_eq!(l.rects[1].x, 100.0);
    assert_eq!(l.rects[1].y, 80.0);
}

fn px_len(v: f64) -> Length {
    Length::Px(v)
}

#[test]
fn sizes_exclude_padding() {
    let root = Node::column()
        .size_px(400.0, 200.0)
        .align(crate::style::style::Align::Start)
        .child(Node::row().size_px(100.0, 50.0).padding(Edges::all(10.0)));
    let l = lay(&root);
    assert_eq!(l.rects[1].w, 120.0);
    assert_eq!(l.rects[1].h, 70.0);
}

#[test]
fn absolute_fill_covers_parent() {
    let root = Node::column()
        .size_px(400.0, 200.0)
        .child(Node::row().size_px(10.0, 10.0))
        .child(Node::fill());
    let l = lay(&root);
    assert_eq!(l.rects[2], RectPx { x: 0.0, y: 0.0, w: 400.0, h: 200.0 });
}

#[test]
fn text_leaf_is_measured_and_shaped() {
    let ts = TextStyle {
        size: 20.0,
        ..TextStyle::default()
    };
    let root = Node::column()
        .size_px(400.0, 200.0)
        .child(Node::text("abcd", ts));
    let l = lay(&root);
    assert_eq!(l.rects[1].w, 400.0);
    assert_eq!(l.rects[1].h, 24.0);
    let shaped = l.text[1].as_ref().unwrap();
    assert_eq!(shaped.lines, 1);
    assert!(l.text[0].is_none());
}

#[test]
fn hidden_subtrees_are_invisible_and_take_no_space() {
    let root = Node::column()
        .size_px(400.0, 200.0)
        .child(Node::row().size_px(10.0, 30.0).hidden().child(Node::row()))
        .child(Node::row().size_px(10.0, 10.0));
    let l = lay(&root);
    assert_eq!(l.visible, vec![true, false, false, true]);
    assert_eq!(l.rects[3].y, 0.0);
}

#[test]
fn image_with_fixed_width_keeps_aspect_ratio() {
    let mut assets = AssetStore::empty();
    assets.insert_image(
        "logo",
        crate::assets::store::PreparedImage {
            width: 40,
            height: 20,
            rgba8_premul: std::sync::Arc::new(vec![0; 40 * 20 * 4]),
        },
    );
    let root = Node::column()
        .size_px(400.0, 200.0)
        .align(crate::style::style::Align::Start)
        .child(Node::image("logo").width(crate::style::style::px(100.0)));
    let mut shaper = TextShaper::new(None).unwrap();
    let l = compute_layout(&root, Canvas::new(400, 200).unwrap(), &assets, &mut shaper).unwrap();
    assert_eq!(l.rects[1].w, 100.0);
    assert_eq!(l.rects[1].h, 50.0);
}
