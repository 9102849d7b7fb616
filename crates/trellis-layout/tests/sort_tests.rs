//! Integration tests for z-order sorting.

use std::cmp::Ordering;

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use trellis_layout::{
    Arrangement, BoxId, BoxSpec, BoxTree, LayoutError, Size, ZIndex, ZOrderSorter,
};

fn container_with(z: &[Option<i32>]) -> (BoxTree, BoxId, Vec<BoxId>) {
    let mut tree = BoxTree::new();
    let root = tree.add_container(BoxSpec::default(), Arrangement::Default);
    let children = z
        .iter()
        .map(|z| {
            let spec = BoxSpec {
                z_index: ZIndex::from(*z),
                ..BoxSpec::default()
            };
            let id = tree.add_leaf(spec, Size::new(10, 10));
            tree.attach_child(root, id).unwrap();
            id
        })
        .collect();
    (tree, root, children)
}

#[test]
fn test_explicit_levels_then_insertion_order() {
    let (mut tree, root, ids) = container_with(&[Some(2), None, Some(-1), None]);
    ZOrderSorter::sort(&mut tree, root).unwrap();
    assert_eq!(tree.children(root), &[ids[2], ids[1], ids[3], ids[0]]);
}

#[test]
fn test_zero_ties_with_auto() {
    assert_eq!(
        ZOrderSorter::compare_z(ZIndex::Integer(0), ZIndex::Auto),
        Ordering::Equal
    );
    assert_eq!(
        ZOrderSorter::compare_z(ZIndex::Auto, ZIndex::Integer(7)),
        Ordering::Less
    );
    assert_eq!(
        ZOrderSorter::compare_z(ZIndex::Integer(-3), ZIndex::Auto),
        Ordering::Less
    );
}

#[test]
fn test_sort_assigns_indices_and_clears_dirty_flag() {
    let (mut tree, root, ids) = container_with(&[Some(1), None]);
    assert!(ZOrderSorter::sort_if_needed(&mut tree, root).unwrap());
    assert_eq!(tree.spec(ids[0]).unwrap().index, 0);
    assert_eq!(tree.spec(ids[1]).unwrap().index, 1);
    assert!(!ZOrderSorter::sort_if_needed(&mut tree, root).unwrap());
}

#[test]
fn test_resort_after_z_change() {
    let (mut tree, root, ids) = container_with(&[None, None]);
    ZOrderSorter::sort(&mut tree, root).unwrap();
    tree.spec_mut(ids[0]).unwrap().z_index = ZIndex::Integer(4);
    tree.resort(root).unwrap();
    assert!(ZOrderSorter::sort_if_needed(&mut tree, root).unwrap());
    assert_eq!(tree.children(root), &[ids[1], ids[0]]);
}

#[test]
fn test_identical_keys_are_ambiguous() {
    let a = BoxSpec {
        z_index: ZIndex::Integer(0),
        ..BoxSpec::default()
    };
    let b = BoxSpec::default();
    // Level 0 ties with auto and both carry index 0.
    assert_eq!(ZOrderSorter::compare(&a, &b), None);
    assert_eq!(ZOrderSorter::compare(&a, &a), None);
}

#[test]
fn test_sort_on_leaf_fails() {
    let mut tree = BoxTree::new();
    let leaf = tree.add_leaf(BoxSpec::default(), Size::ZERO);
    assert_eq!(
        ZOrderSorter::sort(&mut tree, leaf),
        Err(LayoutError::NotAContainer(leaf))
    );
}

#[quickcheck]
fn prop_sort_is_a_strict_total_order(z: Vec<Option<i8>>) -> TestResult {
    if z.len() > 64 {
        return TestResult::discard();
    }
    let z: Vec<Option<i32>> = z.into_iter().map(|z| z.map(i32::from)).collect();
    let (mut tree, root, _) = container_with(&z);
    if ZOrderSorter::sort(&mut tree, root).is_err() {
        return TestResult::failed();
    }
    let children = tree.children(root);
    let strictly_increasing = children.windows(2).all(|pair| {
        let a = tree.spec(pair[0]).unwrap();
        let b = tree.spec(pair[1]).unwrap();
        ZOrderSorter::compare(a, b) == Some(Ordering::Less)
    });
    TestResult::from_bool(strictly_increasing)
}

#[quickcheck]
fn prop_sort_is_idempotent(z: Vec<Option<i8>>) -> TestResult {
    if z.len() > 64 {
        return TestResult::discard();
    }
    let z: Vec<Option<i32>> = z.into_iter().map(|z| z.map(i32::from)).collect();
    let (mut tree, root, _) = container_with(&z);
    ZOrderSorter::sort(&mut tree, root).unwrap();
    let first = tree.children(root).to_vec();
    tree.mark_dirty(root).unwrap();
    ZOrderSorter::sort(&mut tree, root).unwrap();
    TestResult::from_bool(tree.children(root) == first.as_slice())
}
