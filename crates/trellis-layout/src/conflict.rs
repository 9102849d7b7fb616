//! Size/fill conflict detection.
//!
//! A container that sizes to its content cannot also hold a descendant
//! container that fills its parent: the content size depends on the fill
//! size, which depends on the content size. When that happens the outer
//! box is measured with fill behaviour instead, which keeps measurement
//! finite.
//!
//! The scan is a read-only walk of the subtree. It never consults
//! `size_or_fill_*_enabled`; those flags only matter during layout.

use trellis_common::warning::warn_once;

use crate::spec::Axis;
use crate::tree::{BoxId, BoxTree};

/// Deepest level below the scanned box that the conflict scan descends to.
pub const MAX_SCAN_DEPTH: usize = 256;

/// Outcome of the conflict scan on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeFill {
    /// A descendant demands fill while the scanned box demands size; the
    /// scanned box must fill.
    HasConflict,
    /// Size behaviour stands.
    NoConflict,
}

/// Conflict outcome for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConflictReport {
    /// Width axis.
    pub width: SizeFill,
    /// Height axis.
    pub height: SizeFill,
}

impl ConflictReport {
    /// Outcome on `axis`.
    #[must_use]
    pub const fn get(&self, axis: Axis) -> SizeFill {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Whether `axis` must switch to fill behaviour.
    #[must_use]
    pub fn has_conflict(&self, axis: Axis) -> bool {
        self.get(axis) == SizeFill::HasConflict
    }
}

/// Scans a box's subtree for size/fill conflicts.
pub struct SizeFillConflictResolver;

impl SizeFillConflictResolver {
    /// Scan `id` and its descendants on both axes at once.
    ///
    /// The scanned box settles an axis as conflict-free if it fills or has
    /// an explicit size there. Otherwise the first descendant container
    /// found (depth first, in child order) that fills the axis without an
    /// explicit size settles it as a conflict. Leaves never take part. The
    /// walk stops as soon as both axes are settled; unsettled axes default
    /// to [`SizeFill::NoConflict`].
    #[must_use]
    pub fn resolve(tree: &BoxTree, id: BoxId) -> ConflictReport {
        let mut scan = Scan::default();
        let _ = scan.visit(tree, id, true, 0);
        ConflictReport {
            width: scan.width.unwrap_or(SizeFill::NoConflict),
            height: scan.height.unwrap_or(SizeFill::NoConflict),
        }
    }

    /// Scan a single axis.
    #[must_use]
    pub fn resolve_axis(tree: &BoxTree, id: BoxId, axis: Axis) -> SizeFill {
        Self::resolve(tree, id).get(axis)
    }
}

#[derive(Default)]
struct Scan {
    width: Option<SizeFill>,
    height: Option<SizeFill>,
}

impl Scan {
    const fn slot(&mut self, axis: Axis) -> &mut Option<SizeFill> {
        match axis {
            Axis::Horizontal => &mut self.width,
            Axis::Vertical => &mut self.height,
        }
    }

    const fn settled(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    /// Returns `true` once both axes are settled.
    fn visit(&mut self, tree: &BoxTree, id: BoxId, first: bool, depth: usize) -> bool {
        let Some(node) = tree.get(id) else {
            return false;
        };
        let Some(container) = node.container() else {
            return false;
        };
        let spec = &node.spec;

        for axis in [Axis::Horizontal, Axis::Vertical] {
            let explicit = spec.size(axis).is_some();
            let fills = spec.auto_fills(axis);
            let slot = self.slot(axis);
            if first && (fills || explicit) {
                *slot = Some(SizeFill::NoConflict);
            }
            if fills && !explicit && slot.is_none() {
                *slot = Some(SizeFill::HasConflict);
            }
        }
        if self.settled() {
            return true;
        }

        if depth >= MAX_SCAN_DEPTH {
            let _ = warn_once(
                "Measure",
                &format!("size/fill conflict scan stopped at depth {MAX_SCAN_DEPTH}"),
            );
            return false;
        }
        container
            .children()
            .iter()
            .any(|child| self.visit(tree, *child, false, depth + 1))
    }
}
