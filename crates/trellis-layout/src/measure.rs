//! The measure pass.
//!
//! Measurement runs bottom-up inside a top-down recursion: a container
//! derives a [`MeasureSpec`] for each child from its own constraint and
//! the child's [`BoxSpec`], measures the child, and aggregates the results
//! according to its [`Arrangement`]. Flexible children are then measured a
//! second time with their share of whatever space the fixed-size siblings
//! left.
//!
//! Pins do not position anything here. A child's left+right (or
//! top+bottom) pins are padding: they shrink the space offered to the
//! child and are added back to its footprint in the parent.

use trellis_common::{layout_trace, trace};

use crate::conflict::{ConflictReport, SizeFillConflictResolver};
use crate::error::LayoutResult;
use crate::geometry::Size;
use crate::host::LayoutHost;
use crate::measure_spec::{ChildDimension, MeasureMode, MeasureSpec};
use crate::sort::ZOrderSorter;
use crate::spec::Axis;
use crate::tree::{Arrangement, BoxId, BoxTree, NodeKind};

/// Computes measured sizes for boxes and their subtrees.
pub struct MeasureEngine;

impl MeasureEngine {
    /// Measure `id` under the given constraints and store the result.
    ///
    /// Leaves reconcile their content size with the constraints.
    /// Containers measure their children first and size themselves from
    /// the aggregate. Every stored size is handed to the host.
    pub fn measure<H: LayoutHost + ?Sized>(
        tree: &mut BoxTree,
        id: BoxId,
        width: MeasureSpec,
        height: MeasureSpec,
        host: &mut H,
    ) -> LayoutResult<Size> {
        let _scope = trace::enter();
        let content = match tree.node(id)?.kind() {
            NodeKind::Leaf { content } => Some(*content),
            NodeKind::Container(_) => None,
        };
        let size = match content {
            Some(content) => Size::new(width.resolve(content.width), height.resolve(content.height)),
            None => Self::measure_container(tree, id, width, height, host)?,
        };
        layout_trace!(
            "MEASURE",
            "{id} under {width:?} x {height:?} -> {}x{}",
            size.width,
            size.height
        );
        tree.set_measured(id, size)?;
        host.apply_measured_size(id, size);
        Ok(size)
    }

    /// Measure `child` inside a parent whose constraint is `parent_width`
    /// by `parent_height`.
    ///
    /// Each axis resolves a [`ChildDimension`] (see
    /// [`MeasureEngine::child_dimension`]), subtracts the child's pins as
    /// padding, and combines the result with the parent's constraint via
    /// [`MeasureSpec::child_spec`].
    pub fn constrain_child<H: LayoutHost + ?Sized>(
        tree: &mut BoxTree,
        child: BoxId,
        parent_width: MeasureSpec,
        parent_height: MeasureSpec,
        host: &mut H,
    ) -> LayoutResult<Size> {
        let mut conflicts = None;
        let width_spec = Self::child_spec(tree, child, Axis::Horizontal, parent_width, &mut conflicts)?;
        let height_spec = Self::child_spec(tree, child, Axis::Vertical, parent_height, &mut conflicts)?;
        Self::measure(tree, child, width_spec, height_spec, host)
    }

    /// What `child` asks for on `axis`, given the parent's size there.
    ///
    /// An explicit size resolves against `reference` (percentages of an
    /// unknown reference give 0). Without one, `auto_fills_*` selects
    /// fill, and otherwise the size/fill conflict scan decides between
    /// fill and content. The scan runs at most once per child; its report
    /// is cached in `conflicts` for the other axis.
    pub fn child_dimension(
        tree: &BoxTree,
        child: BoxId,
        axis: Axis,
        reference: i32,
        conflicts: &mut Option<ConflictReport>,
    ) -> LayoutResult<ChildDimension> {
        let spec = tree.spec(child)?;
        if let Some(size) = spec.size(axis) {
            return Ok(ChildDimension::Exact(size.resolve(reference)));
        }
        if spec.auto_fills(axis) {
            return Ok(ChildDimension::Fill);
        }
        let report = conflicts.get_or_insert_with(|| SizeFillConflictResolver::resolve(tree, child));
        if report.has_conflict(axis) {
            Ok(ChildDimension::Fill)
        } else {
            Ok(ChildDimension::Content)
        }
    }

    fn child_spec(
        tree: &BoxTree,
        child: BoxId,
        axis: Axis,
        parent: MeasureSpec,
        conflicts: &mut Option<ConflictReport>,
    ) -> LayoutResult<MeasureSpec> {
        let dimension = Self::child_dimension(tree, child, axis, parent.size, conflicts)?;
        let padding = tree.spec(child)?.pins(axis).padding(parent.size);
        Ok(parent.child_spec(padding, dimension))
    }

    fn measure_container<H: LayoutHost + ?Sized>(
        tree: &mut BoxTree,
        id: BoxId,
        width: MeasureSpec,
        height: MeasureSpec,
        host: &mut H,
    ) -> LayoutResult<Size> {
        if !tree.is_container(id) {
            return Ok(Size::ZERO);
        }
        // Aggregate in the same order layout will place in.
        if ZOrderSorter::sort_if_needed(tree, id)? {
            layout_trace!("MEASURE", "{id} re-sorted children");
        }
        let node = tree.node(id)?;
        let Some(container) = node.container() else {
            return Ok(Size::ZERO);
        };
        let children = container.children().to_vec();
        let arrangement = container.arrangement();
        let wrap = container.wrap_enabled();
        let padding = container.padding;
        let min = container.min_size;

        // Children see the larger of the offered size and our own minimum.
        let w = width.size.max(min.width);
        let h = height.size.max(min.height);
        let offered_width = MeasureSpec::new(w, width.mode);
        let offered_height = MeasureSpec::new(h, height.mode);

        let flex_axis = flex_axis(arrangement);
        let flex_reference = match flex_axis {
            Axis::Horizontal => w,
            Axis::Vertical => h,
        };

        let mut extent = Size::ZERO;
        let mut row = Size::ZERO;
        let mut fixed_total = 0;
        let mut flex_total = 0.0;

        for &child in &children {
            let measured = Self::constrain_child(tree, child, offered_width, offered_height, host)?;
            let spec = tree.spec(child)?;
            let child_width = measured.width.saturating_add(spec.pins(Axis::Horizontal).padding(w));
            let child_height = measured.height.saturating_add(spec.pins(Axis::Vertical).padding(h));

            match arrangement {
                Arrangement::Horizontal if wrap => {
                    if row.width.saturating_add(child_width) > w {
                        // Start a new line.
                        extent.height = extent.height.saturating_add(row.height);
                        row = Size::new(child_width, child_height);
                    } else {
                        row.width = row.width.saturating_add(child_width);
                    }
                    extent.width = extent.width.max(row.width);
                    row.height = row.height.max(child_height);
                }
                Arrangement::Horizontal => {
                    extent.width = extent.width.saturating_add(child_width);
                    row.height = row.height.max(child_height);
                }
                Arrangement::Vertical => {
                    extent.width = extent.width.max(child_width);
                    extent.height = extent.height.saturating_add(child_height);
                }
                Arrangement::Default => {
                    extent = extent.max(Size::new(child_width, child_height));
                }
            }

            if let Some(fixed) = spec.size(flex_axis) {
                fixed_total = fixed.resolve(flex_reference).saturating_add(fixed_total);
            }
            if let Some(weight) = spec.flex_weight(flex_axis) {
                flex_total += weight;
            }
        }

        if arrangement == Arrangement::Horizontal {
            extent.height = extent.height.saturating_add(row.height);
        }

        extent.width = extent.width.saturating_add(padding.horizontal());
        extent.height = extent.height.saturating_add(padding.vertical());
        extent = extent.max(min);

        let measured = Size::new(width.resolve(extent.width), height.resolve(extent.height));

        if flex_total > 0.0 {
            let remaining = match flex_axis {
                Axis::Horizontal => measured.width,
                Axis::Vertical => measured.height,
            }
            .saturating_sub(fixed_total);
            layout_trace!(
                "MEASURE",
                "{id} distributing {remaining}px over flex weight {flex_total}"
            );
            for &child in &children {
                let Some(weight) = tree.spec(child)?.flex_weight(flex_axis) else {
                    continue;
                };
                let share = flex_share(remaining, weight, flex_total);
                let cross_mode = match flex_axis {
                    Axis::Horizontal => height.mode,
                    Axis::Vertical => width.mode,
                };
                let _ = Self::measure_flexed(tree, child, flex_axis, share, measured, cross_mode, host)?;
            }
        }

        Ok(measured)
    }

    /// Re-measure a flexible child: exactly `share` on the flex axis, and
    /// the usual child rules on the cross axis against the container's
    /// measured cross size.
    fn measure_flexed<H: LayoutHost + ?Sized>(
        tree: &mut BoxTree,
        child: BoxId,
        flex_axis: Axis,
        share: i32,
        container: Size,
        cross_mode: MeasureMode,
        host: &mut H,
    ) -> LayoutResult<Size> {
        let main = MeasureSpec::exact(share.max(0));
        let mut conflicts = None;
        match flex_axis {
            Axis::Horizontal => {
                let parent = MeasureSpec::new(container.height, cross_mode);
                let cross = Self::child_spec(tree, child, Axis::Vertical, parent, &mut conflicts)?;
                Self::measure(tree, child, main, cross, host)
            }
            Axis::Vertical => {
                let parent = MeasureSpec::new(container.width, cross_mode);
                let cross = Self::child_spec(tree, child, Axis::Horizontal, parent, &mut conflicts)?;
                Self::measure(tree, child, cross, main, host)
            }
        }
    }
}

/// Horizontal containers flex widths; all others flex heights.
#[must_use]
pub const fn flex_axis(arrangement: Arrangement) -> Axis {
    match arrangement {
        Arrangement::Horizontal => Axis::Horizontal,
        Arrangement::Vertical | Arrangement::Default => Axis::Vertical,
    }
}

/// `round(remaining * weight / total)`; 0 when `total` is not positive.
#[must_use]
pub fn flex_share(remaining: i32, weight: f64, total: f64) -> i32 {
    if total <= 0.0 {
        return 0;
    }
    (f64::from(remaining) * weight / total).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flex_share_rounds_to_nearest() {
        assert_eq!(flex_share(100, 1.0, 3.0), 33);
        assert_eq!(flex_share(100, 2.0, 3.0), 67);
    }

    #[test]
    fn flex_share_with_zero_total_is_zero() {
        assert_eq!(flex_share(100, 1.0, 0.0), 0);
    }

    #[test]
    fn only_horizontal_flexes_width() {
        assert_eq!(flex_axis(Arrangement::Horizontal), Axis::Horizontal);
        assert_eq!(flex_axis(Arrangement::Vertical), Axis::Vertical);
        assert_eq!(flex_axis(Arrangement::Default), Axis::Vertical);
    }
}
