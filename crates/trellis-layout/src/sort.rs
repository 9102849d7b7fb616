//! Paint and traversal order of siblings.
//!
//! Siblings are ordered by z-index, then by insertion order. The order is
//! applied structurally: the container's child list is rewritten, because
//! every later sweep (measure, layout, painting by the host) walks children
//! in list order.

use std::cmp::Ordering;

use trellis_common::layout_trace;

use crate::error::{LayoutError, LayoutResult};
use crate::spec::{BoxSpec, ZIndex};
use crate::tree::{BoxId, BoxTree};

/// Sorts a container's children into z-order.
pub struct ZOrderSorter;

impl ZOrderSorter {
    /// Compare two z-indices.
    ///
    /// Two explicit levels compare numerically. An explicit level against
    /// `Auto` compares by its sign against an implicit 0, so a level of 0
    /// ties with `Auto`. Two `Auto` values tie.
    #[must_use]
    pub fn compare_z(a: ZIndex, b: ZIndex) -> Ordering {
        match (a, b) {
            (ZIndex::Integer(a), ZIndex::Integer(b)) => a.cmp(&b),
            (ZIndex::Integer(a), ZIndex::Auto) => a.signum().cmp(&0),
            (ZIndex::Auto, ZIndex::Integer(b)) => 0.cmp(&b.signum()),
            (ZIndex::Auto, ZIndex::Auto) => Ordering::Equal,
        }
    }

    /// Compare two siblings: z-index first, then sort index.
    ///
    /// Returns `None` when both keys tie, which only happens if two
    /// siblings were given the same index.
    #[must_use]
    pub fn compare(a: &BoxSpec, b: &BoxSpec) -> Option<Ordering> {
        match Self::compare_z(a.z_index, b.z_index).then(a.index.cmp(&b.index)) {
            Ordering::Equal => None,
            order => Some(order),
        }
    }

    /// Order `container`'s children by the indices they currently carry,
    /// without changing the tree.
    pub fn sorted_order(tree: &BoxTree, container: BoxId) -> LayoutResult<Vec<BoxId>> {
        let mut order = tree.children(container).to_vec();
        let mut ambiguity: Option<LayoutError> = None;

        order.sort_by(|&a, &b| {
            if a == b {
                return Ordering::Equal;
            }
            let (Some(spec_a), Some(spec_b)) = (tree.get(a), tree.get(b)) else {
                return a.cmp(&b);
            };
            Self::compare(&spec_a.spec, &spec_b.spec).unwrap_or_else(|| {
                if ambiguity.is_none() {
                    ambiguity = Some(LayoutError::AmbiguousOrder {
                        parent: container,
                        first: a,
                        second: b,
                        index: spec_a.spec.index,
                    });
                }
                Ordering::Equal
            })
        });

        match ambiguity {
            Some(err) => Err(err),
            None => Ok(order),
        }
    }

    /// Reassign each child's index to its current position, sort, and
    /// rewrite the child list in the new order. Clears the container's
    /// dirty flag.
    pub fn sort(tree: &mut BoxTree, container: BoxId) -> LayoutResult<()> {
        let children = tree.node(container)?.container().map_or_else(
            || Err(LayoutError::NotAContainer(container)),
            |c| Ok(c.children().to_vec()),
        )?;
        for (i, child) in children.iter().enumerate() {
            tree.spec_mut(*child)?.index = i;
        }

        if children.len() > 1 {
            let order = Self::sorted_order(tree, container)?;
            layout_trace!("SORT", "{container} children ordered as {order:?}");
            tree.set_children_order(container, order)?;
        }
        tree.clear_needs_sort(container)
    }

    /// Sort only if the container was marked dirty since its last sort.
    pub fn sort_if_needed(tree: &mut BoxTree, container: BoxId) -> LayoutResult<bool> {
        let dirty = tree
            .node(container)?
            .container()
            .is_some_and(|c| c.needs_sort());
        if dirty {
            Self::sort(tree, container)?;
        }
        Ok(dirty)
    }
}
