//! Integration tests for size/fill conflict detection.

use trellis_layout::conflict::MAX_SCAN_DEPTH;
use trellis_layout::{
    Arrangement, Axis, BoxId, BoxSpec, BoxTree, Dimension, Size, SizeFill,
    SizeFillConflictResolver,
};

fn fills_width() -> BoxSpec {
    BoxSpec {
        auto_fills_width: true,
        ..BoxSpec::default()
    }
}

/// `outer` (given spec) > `inner` (given spec) > leaf.
fn nested(outer: BoxSpec, inner: BoxSpec) -> (BoxTree, BoxId) {
    let mut tree = BoxTree::new();
    let outer = tree.add_container(outer, Arrangement::Default);
    let inner = tree.add_container(inner, Arrangement::Default);
    let leaf = tree.add_leaf(BoxSpec::default(), Size::new(10, 10));
    tree.attach_child(outer, inner).unwrap();
    tree.attach_child(inner, leaf).unwrap();
    (tree, outer)
}

#[test]
fn test_size_box_with_filling_container_conflicts() {
    let (tree, outer) = nested(BoxSpec::default(), fills_width());
    let report = SizeFillConflictResolver::resolve(&tree, outer);
    assert_eq!(report.width, SizeFill::HasConflict);
    assert_eq!(report.height, SizeFill::NoConflict);
}

#[test]
fn test_explicit_width_settles_first() {
    let outer = BoxSpec {
        width: Some(Dimension::px(200.0)),
        ..BoxSpec::default()
    };
    let (tree, outer) = nested(outer, fills_width());
    assert_eq!(
        SizeFillConflictResolver::resolve_axis(&tree, outer, Axis::Horizontal),
        SizeFill::NoConflict
    );
}

#[test]
fn test_filling_box_has_no_conflict() {
    let (tree, outer) = nested(fills_width(), fills_width());
    assert!(!SizeFillConflictResolver::resolve(&tree, outer).has_conflict(Axis::Horizontal));
}

#[test]
fn test_filling_leaf_is_ignored() {
    let mut tree = BoxTree::new();
    let outer = tree.add_container(BoxSpec::default(), Arrangement::Default);
    let leaf = tree.add_leaf(fills_width(), Size::new(10, 10));
    tree.attach_child(outer, leaf).unwrap();
    assert_eq!(
        SizeFillConflictResolver::resolve_axis(&tree, outer, Axis::Horizontal),
        SizeFill::NoConflict
    );
}

#[test]
fn test_leaf_never_conflicts() {
    let mut tree = BoxTree::new();
    let leaf = tree.add_leaf(BoxSpec::default(), Size::ZERO);
    let report = SizeFillConflictResolver::resolve(&tree, leaf);
    assert!(!report.has_conflict(Axis::Horizontal));
    assert!(!report.has_conflict(Axis::Vertical));
}

#[test]
fn test_descendant_with_explicit_size_does_not_conflict() {
    let inner = BoxSpec {
        width: Some(Dimension::px(50.0)),
        ..fills_width()
    };
    let (tree, outer) = nested(BoxSpec::default(), inner);
    assert_eq!(
        SizeFillConflictResolver::resolve_axis(&tree, outer, Axis::Horizontal),
        SizeFill::NoConflict
    );
}

#[test]
fn test_size_or_fill_flag_is_not_consulted() {
    let inner = BoxSpec {
        size_or_fill_width_enabled: false,
        ..fills_width()
    };
    let (tree, outer) = nested(BoxSpec::default(), inner);
    assert_eq!(
        SizeFillConflictResolver::resolve_axis(&tree, outer, Axis::Horizontal),
        SizeFill::HasConflict
    );
}

#[test]
fn test_conflict_found_deep_in_subtree() {
    let mut tree = BoxTree::new();
    let outer = tree.add_container(BoxSpec::default(), Arrangement::Vertical);
    let mut parent = outer;
    for _ in 0..4 {
        let next = tree.add_container(BoxSpec::default(), Arrangement::Default);
        tree.attach_child(parent, next).unwrap();
        parent = next;
    }
    let filler = tree.add_container(
        BoxSpec {
            auto_fills_height: true,
            ..BoxSpec::default()
        },
        Arrangement::Default,
    );
    tree.attach_child(parent, filler).unwrap();

    let report = SizeFillConflictResolver::resolve(&tree, outer);
    assert_eq!(report.height, SizeFill::HasConflict);
    assert_eq!(report.width, SizeFill::NoConflict);
}

#[test]
fn test_scan_stops_at_depth_cap() {
    let mut tree = BoxTree::new();
    let outer = tree.add_container(BoxSpec::default(), Arrangement::Default);
    let mut parent = outer;
    for _ in 0..MAX_SCAN_DEPTH + 10 {
        let next = tree.add_container(BoxSpec::default(), Arrangement::Default);
        tree.attach_child(parent, next).unwrap();
        parent = next;
    }
    let filler = tree.add_container(fills_width(), Arrangement::Default);
    tree.attach_child(parent, filler).unwrap();

    assert_eq!(
        SizeFillConflictResolver::resolve_axis(&tree, outer, Axis::Horizontal),
        SizeFill::NoConflict
    );
}
