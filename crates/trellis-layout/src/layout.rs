//! The layout pass.
//!
//! [`LayoutEngine::layout`] gives a container its final rectangle and then
//! walks its children in z-order, turning each child's measured size and
//! pins into a rectangle relative to the container:
//!
//! - **Default** places every child independently with
//!   [`compute_position`] on both axes.
//! - **Vertical** does the same horizontally but stacks children
//!   top-to-bottom, each below the previous one plus its own top pin.
//! - **Horizontal** flows children left-to-right, optionally wrapping onto
//!   new lines when a child would overflow the container's width.
//!
//! A child whose final rectangle differs from its measured size is
//! re-measured at the exact final size before its own children are laid
//! out.

use trellis_common::warning::warn_once;
use trellis_common::{layout_trace, trace};

use crate::dimension::resolve_or_zero;
use crate::error::LayoutResult;
use crate::geometry::{Rect, Size};
use crate::host::LayoutHost;
use crate::measure::MeasureEngine;
use crate::measure_spec::MeasureSpec;
use crate::position::{compute_position, size_from_pins, stack_position};
use crate::sort::ZOrderSorter;
use crate::spec::{Axis, BoxSpec};
use crate::tree::{Arrangement, BoxId, BoxTree};

/// How a layout pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// Every box in the subtree was placed.
    Completed,
    /// The host context went away part way through. Boxes placed before
    /// that point keep their rectangles.
    Aborted,
}

/// Assigns final rectangles to boxes.
pub struct LayoutEngine;

impl LayoutEngine {
    /// Give `id` the rectangle `rect` (relative to its parent) and lay out
    /// its subtree.
    ///
    /// The root's rectangle is not handed to the host; the host chose it.
    pub fn layout<H: LayoutHost + ?Sized>(
        tree: &mut BoxTree,
        id: BoxId,
        rect: Rect,
        host: &mut H,
    ) -> LayoutResult<LayoutOutcome> {
        tree.set_rect(id, rect)?;
        Self::layout_children(tree, id, rect.size(), host)
    }

    fn layout_children<H: LayoutHost + ?Sized>(
        tree: &mut BoxTree,
        id: BoxId,
        size: Size,
        host: &mut H,
    ) -> LayoutResult<LayoutOutcome> {
        if !tree.is_container(id) {
            return Ok(LayoutOutcome::Completed);
        }
        let _scope = trace::enter();
        if ZOrderSorter::sort_if_needed(tree, id)? {
            layout_trace!("LAYOUT", "{id} re-sorted children");
        }

        let children = tree.children(id).to_vec();
        let arrangement = tree.arrangement(id)?;
        let wrap = tree.node(id)?.container().is_some_and(|c| c.wrap_enabled());

        let mut flow = if arrangement == Arrangement::Horizontal {
            let footprints = footprints(tree, &children, size)?;
            Some(HorizontalFlow::new(footprints, size, wrap))
        } else {
            None
        };
        let mut current_height = 0;

        for (index, &child) in children.iter().enumerate() {
            let spec = tree.spec(child)?.clone();
            let measured = tree.measured(child)?;

            let rect = match flow.as_mut() {
                Some(flow) => flow.place(index, &spec, measured),
                None => place_pinned(&spec, measured, size, arrangement, &mut current_height),
            };
            layout_trace!(
                "LAYOUT",
                "{child} -> ({}, {}, {}, {})",
                rect.left,
                rect.top,
                rect.right,
                rect.bottom
            );

            if rect.size() != measured {
                let _ = MeasureEngine::measure(
                    tree,
                    child,
                    MeasureSpec::exact(rect.width().max(0)),
                    MeasureSpec::exact(rect.height().max(0)),
                    host,
                )?;
            }

            if !host.is_context_available() {
                let _ = warn_once(
                    "Layout",
                    "the host context is no longer available; skipping layout pass",
                );
                return Ok(LayoutOutcome::Aborted);
            }

            tree.set_rect(child, rect)?;
            host.apply_final_rect(child, rect, tree.node(child)?.opacity());

            if Self::layout_children(tree, child, rect.size(), host)? == LayoutOutcome::Aborted {
                return Ok(LayoutOutcome::Aborted);
            }

            current_height = current_height
                .saturating_add(rect.height())
                .saturating_add(resolve_or_zero(spec.top, size.height));
        }

        host.layout_complete(id);
        let node = tree.node(id)?;
        if let Some(proxy) = node.proxy() {
            proxy.post_layout(id, node.rect());
        }
        Ok(LayoutOutcome::Completed)
    }
}

/// Default and vertical placement.
///
/// Both axes first try to recover a pin-defined size. Vertical stacking
/// advances `current_height` by the child's bottom pin here; the caller
/// adds the placed height and top pin afterwards.
fn place_pinned(
    spec: &BoxSpec,
    measured: Size,
    container: Size,
    arrangement: Arrangement,
    current_height: &mut i32,
) -> Rect {
    let width = size_from_pins(
        spec,
        Axis::Horizontal,
        0,
        container.width,
        container.width,
        measured.width,
    );
    let height = size_from_pins(
        spec,
        Axis::Vertical,
        0,
        container.height,
        container.height,
        measured.height,
    );

    let (left, right) = compute_position(
        spec.pins(Axis::Horizontal),
        width,
        0,
        container.width,
        container.width,
    );
    let (top, bottom) = if arrangement == Arrangement::Vertical {
        let edges = stack_position(
            *current_height,
            spec.top,
            height,
            0,
            container.height,
            container.height,
        );
        *current_height = current_height.saturating_add(resolve_or_zero(spec.bottom, container.height));
        edges
    } else {
        compute_position(
            spec.pins(Axis::Vertical),
            height,
            0,
            container.height,
            container.height,
        )
    };
    Rect::new(left, top, right, bottom)
}

/// Each child's measured size plus its pins, as seen by a row scan.
fn footprints(tree: &BoxTree, children: &[BoxId], container: Size) -> LayoutResult<Vec<Size>> {
    children
        .iter()
        .map(|&child| {
            let spec = tree.spec(child)?;
            let measured = tree.measured(child)?;
            Ok(Size::new(
                measured.width.saturating_add(spec.pins(Axis::Horizontal).padding(container.width)),
                measured.height.saturating_add(spec.pins(Axis::Vertical).padding(container.height)),
            ))
        })
        .collect()
}

/// Running state of one horizontal sweep.
///
/// Lives only for a single container's layout call.
#[derive(Debug)]
struct HorizontalFlow {
    footprints: Vec<Size>,
    container: Size,
    wrap: bool,
    current_left: i32,
    previous_right: i32,
    line_height: i32,
    top_buffer: i32,
    /// Index of the last child the most recent row scan fitted on its line.
    last_before_wrap: usize,
    on_line: usize,
}

impl HorizontalFlow {
    fn new(footprints: Vec<Size>, container: Size, wrap: bool) -> Self {
        let mut flow = Self {
            footprints,
            container,
            wrap,
            current_left: 0,
            previous_right: 0,
            line_height: 0,
            top_buffer: 0,
            last_before_wrap: 0,
            on_line: 0,
        };
        flow.scan_row(0);
        flow
    }

    fn place(&mut self, index: usize, spec: &BoxSpec, measured: Size) -> Rect {
        let width = self.container.width;
        let left_pin = resolve_or_zero(spec.left, width);
        let mut left = self
            .current_left
            .saturating_add(self.previous_right)
            .saturating_add(left_pin);
        self.previous_right = resolve_or_zero(spec.right, width);
        let mut right = left.saturating_add(measured.width);

        let mut wrapped = false;
        if self.wrap && self.on_line > 0 && right.saturating_add(self.previous_right) > width {
            left = left_pin;
            right = left.saturating_add(measured.width);
            self.top_buffer = self.top_buffer.saturating_add(self.line_height);
            self.line_height = 0;
            self.on_line = 0;
            wrapped = true;
        }
        self.on_line += 1;
        self.current_left = right;

        let mut height = measured.height;
        let mut line_bottom = self.container.height;
        if self.wrap {
            if index != 0 && (wrapped || index > self.last_before_wrap) {
                self.scan_row(index);
            }
            height = size_from_pins(
                spec,
                Axis::Vertical,
                self.top_buffer,
                self.top_buffer.saturating_add(self.line_height),
                self.line_height,
                height,
            );
            line_bottom = self.line_height;
        }

        let (top, bottom) = compute_position(
            spec.pins(Axis::Vertical),
            height,
            0,
            line_bottom,
            self.container.height,
        );
        Rect::new(
            left,
            top.saturating_add(self.top_buffer),
            right,
            bottom.saturating_add(self.top_buffer),
        )
    }

    /// Look ahead from `from` to find where the current line ends and how
    /// tall it is. A child that overflows on its own still gets a line.
    fn scan_row(&mut self, from: usize) {
        let max_right = self.container.width;
        let mut row_width = 0;
        self.line_height = 0;
        for (i, item) in self.footprints.iter().enumerate().skip(from) {
            row_width = item.width.saturating_add(row_width);
            if row_width > max_right {
                if i == from {
                    self.line_height = item.height;
                    self.last_before_wrap = i;
                } else {
                    self.last_before_wrap = i - 1;
                }
                return;
            }
            self.line_height = self.line_height.max(item.height);
            if row_width == max_right {
                self.last_before_wrap = i;
                return;
            }
        }
        self.last_before_wrap = self.footprints.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_scan_stops_before_overflow() {
        let flow = HorizontalFlow::new(
            vec![Size::new(40, 10), Size::new(40, 30), Size::new(40, 20)],
            Size::new(100, 100),
            true,
        );
        assert_eq!(flow.line_height, 30);
        assert_eq!(flow.last_before_wrap, 1);
    }

    #[test]
    fn row_scan_keeps_an_oversized_first_child() {
        let flow = HorizontalFlow::new(vec![Size::new(150, 25)], Size::new(100, 100), true);
        assert_eq!(flow.line_height, 25);
        assert_eq!(flow.last_before_wrap, 0);
    }

    #[test]
    fn row_scan_includes_exact_fit() {
        let flow = HorizontalFlow::new(
            vec![Size::new(50, 10), Size::new(50, 40), Size::new(10, 90)],
            Size::new(100, 100),
            true,
        );
        assert_eq!(flow.line_height, 40);
        assert_eq!(flow.last_before_wrap, 1);
    }

    #[test]
    fn first_child_on_a_line_never_wraps() {
        let mut flow = HorizontalFlow::new(vec![Size::new(150, 20)], Size::new(100, 100), true);
        let rect = flow.place(0, &BoxSpec::default(), Size::new(150, 20));
        assert_eq!(rect, Rect::new(0, 0, 150, 20));
    }
}
