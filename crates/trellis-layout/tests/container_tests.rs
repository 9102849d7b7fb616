//! Integration tests for the root container surface.

use trellis_layout::{
    Arrangement, BoxId, BoxSpec, BoxTree, Dimension, LayoutContainer, LayoutError, MeasureMode,
    NullHost, Rect, RecordingHost, Size, ZIndex,
};

/// A small mixed tree: a vertical root holding a wrapping toolbar, a
/// pin-defined panel and a flexible footer.
fn sample() -> (LayoutContainer, Vec<BoxId>) {
    let mut container = LayoutContainer::new(Arrangement::Vertical);
    let root = container.root();
    let tree = container.tree_mut();

    let toolbar = tree.add_container(
        BoxSpec {
            auto_fills_width: true,
            ..BoxSpec::default()
        },
        Arrangement::Horizontal,
    );
    let buttons: Vec<BoxId> = (0..5)
        .map(|i| {
            tree.add_leaf(
                BoxSpec {
                    left: Some(Dimension::px(4.0)),
                    z_index: ZIndex::from((i % 2 == 0).then_some(i)),
                    ..BoxSpec::default()
                },
                Size::new(48, 24 + i * 2),
            )
        })
        .collect();
    let panel = tree.add_leaf(
        BoxSpec {
            left: Some(Dimension::px(12.0)),
            right: Some(Dimension::percent(10.0)),
            height: Some(Dimension::px(80.0)),
            size_or_fill_width_enabled: false,
            ..BoxSpec::default()
        },
        Size::new(10, 10),
    );
    let footer = tree.add_leaf(
        BoxSpec {
            flex: Some(1.0),
            ..BoxSpec::default()
        },
        Size::new(100, 10),
    );

    tree.attach_child(root, toolbar).unwrap();
    for &button in &buttons {
        tree.attach_child(toolbar, button).unwrap();
    }
    tree.attach_child(root, panel).unwrap();
    tree.attach_child(root, footer).unwrap();

    let mut ids = vec![toolbar, panel, footer];
    ids.extend(buttons);
    (container, ids)
}

#[test]
fn test_repeated_passes_are_identical() {
    let (mut container, _) = sample();
    let viewport = Size::new(200, 320);
    let _ = container.run(viewport, &mut NullHost).unwrap();
    let first = container.positions();
    let _ = container.run(viewport, &mut NullHost).unwrap();
    assert_eq!(container.positions(), first);
}

#[test]
fn test_repeated_passes_hand_over_the_same_rects() {
    let (mut container, _) = sample();
    let mut first = RecordingHost::default();
    let mut second = RecordingHost::default();
    let _ = container.run(Size::new(240, 400), &mut first).unwrap();
    let _ = container.run(Size::new(240, 400), &mut second).unwrap();
    assert_eq!(first.placed, second.placed);
}

#[test]
fn test_positions_are_depth_first_from_root() {
    let (mut container, ids) = sample();
    let _ = container.run(Size::new(200, 320), &mut NullHost).unwrap();
    let order: Vec<BoxId> = container.positions().into_iter().map(|(id, _)| id).collect();
    assert_eq!(order.len(), 1 + ids.len());
    assert_eq!(order[0], container.root());
    assert_eq!(order[1], ids[0]);
    assert_eq!(order[order.len() - 2], ids[1]);
    assert_eq!(order[order.len() - 1], ids[2]);
}

#[test]
fn test_root_rect_is_viewport() {
    let (mut container, _) = sample();
    let _ = container.run(Size::new(200, 320), &mut NullHost).unwrap();
    assert_eq!(
        container.tree().rect(container.root()).unwrap(),
        Rect::new(0, 0, 200, 320)
    );
}

#[test]
fn test_measure_at_most_reports_content() {
    let mut container = LayoutContainer::new(Arrangement::Default);
    let root = container.root();
    let leaf = container.tree_mut().add_leaf(BoxSpec::default(), Size::new(30, 40));
    container.attach_child(root, leaf).unwrap();
    let size = container
        .measure(500, MeasureMode::AtMost, 500, MeasureMode::AtMost, &mut NullHost)
        .unwrap();
    assert_eq!(size, Size::new(30, 40));
}

#[test]
fn test_attach_after_layout_resorts() {
    let mut container = LayoutContainer::new(Arrangement::Default);
    let root = container.root();
    let low = container.tree_mut().add_leaf(BoxSpec::default(), Size::new(5, 5));
    container.attach_child(root, low).unwrap();
    let _ = container.run(Size::new(50, 50), &mut NullHost).unwrap();

    let high = container.tree_mut().add_leaf(
        BoxSpec {
            z_index: ZIndex::Integer(-2),
            ..BoxSpec::default()
        },
        Size::new(5, 5),
    );
    container.attach_child(root, high).unwrap();
    assert!(container.tree().node(root).unwrap().container().unwrap().needs_sort());
    let _ = container.run(Size::new(50, 50), &mut NullHost).unwrap();
    assert_eq!(container.tree().children(root), &[high, low]);
}

#[test]
fn test_detach_removes_child_from_pass() {
    let (mut container, ids) = sample();
    let root = container.root();
    container.detach_child(root, ids[1]).unwrap();
    let mut host = RecordingHost::default();
    let _ = container.run(Size::new(200, 320), &mut host).unwrap();
    assert!(host.last_rect(ids[1]).is_none());
    assert_eq!(
        container.detach_child(root, ids[1]),
        Err(LayoutError::NotAChild {
            parent: root,
            child: ids[1]
        })
    );
}

#[test]
fn test_from_tree_rejects_leaf_root() {
    let mut tree = BoxTree::new();
    let leaf = tree.add_leaf(BoxSpec::default(), Size::ZERO);
    assert_eq!(
        LayoutContainer::from_tree(tree, leaf).err(),
        Some(LayoutError::NotAContainer(leaf))
    );
}

#[test]
fn test_arrangement_change_applies_next_pass() {
    let mut container = LayoutContainer::new(Arrangement::Default);
    let root = container.root();
    let ids: Vec<BoxId> = (0..2)
        .map(|_| {
            let id = container.tree_mut().add_leaf(BoxSpec::default(), Size::new(10, 10));
            container.attach_child(root, id).unwrap();
            id
        })
        .collect();
    let _ = container.run(Size::new(100, 100), &mut NullHost).unwrap();
    assert_eq!(
        container.tree().rect(ids[0]).unwrap(),
        container.tree().rect(ids[1]).unwrap()
    );

    container.set_arrangement(Arrangement::Vertical).unwrap();
    let _ = container.run(Size::new(100, 100), &mut NullHost).unwrap();
    assert_eq!(container.tree().rect(ids[1]).unwrap().top, 10);
}

#[test]
fn test_first_pass_measures_in_z_order() {
    let mut container = LayoutContainer::new(Arrangement::Default);
    let root = container.root();
    let row = container
        .tree_mut()
        .add_container(BoxSpec::default(), Arrangement::Horizontal);
    container.attach_child(root, row).unwrap();
    let raised = container.tree_mut().add_leaf(
        BoxSpec {
            z_index: ZIndex::Integer(1),
            ..BoxSpec::default()
        },
        Size::new(50, 10),
    );
    let wide = container.tree_mut().add_leaf(BoxSpec::default(), Size::new(60, 10));
    let narrow = container.tree_mut().add_leaf(BoxSpec::default(), Size::new(50, 10));
    for id in [raised, wide, narrow] {
        container.attach_child(row, id).unwrap();
    }

    let viewport = Size::new(100, 200);
    let _ = container.run(viewport, &mut NullHost).unwrap();
    let first = container.positions();

    // Sorted order packs onto two full-width lines: [wide] then [narrow, raised].
    assert_eq!(container.tree().rect(row).unwrap(), Rect::new(0, 90, 100, 110));
    assert_eq!(container.tree().rect(narrow).unwrap(), Rect::new(0, 10, 50, 20));
    assert_eq!(container.tree().rect(raised).unwrap(), Rect::new(50, 10, 100, 20));

    let _ = container.run(viewport, &mut NullHost).unwrap();
    assert_eq!(container.positions(), first);
}
