//! A box tree bundled with its root container.
//!
//! [`LayoutContainer`] is the inbound surface a host drives: it owns the
//! tree, forwards structural edits, and runs the two passes from the root.

use trellis_common::layout_trace;

use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{Rect, Size};
use crate::host::LayoutHost;
use crate::layout::{LayoutEngine, LayoutOutcome};
use crate::measure::MeasureEngine;
use crate::measure_spec::{MeasureMode, MeasureSpec};
use crate::spec::BoxSpec;
use crate::tree::{Arrangement, BoxId, BoxTree};

/// Root container plus the tree it lives in.
#[derive(Debug, Clone)]
pub struct LayoutContainer {
    tree: BoxTree,
    root: BoxId,
}

impl LayoutContainer {
    /// A new tree whose root is an empty container with `arrangement`.
    #[must_use]
    pub fn new(arrangement: Arrangement) -> Self {
        let mut tree = BoxTree::new();
        let root = tree.add_container(BoxSpec::default(), arrangement);
        Self { tree, root }
    }

    /// Wrap an existing tree. `root` must be a container.
    pub fn from_tree(tree: BoxTree, root: BoxId) -> LayoutResult<Self> {
        if tree.node(root)?.container().is_none() {
            return Err(LayoutError::NotAContainer(root));
        }
        Ok(Self { tree, root })
    }

    /// The root container.
    #[must_use]
    pub const fn root(&self) -> BoxId {
        self.root
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &BoxTree {
        &self.tree
    }

    /// Mutable access to the underlying tree, for adding boxes and editing
    /// specs.
    pub const fn tree_mut(&mut self) -> &mut BoxTree {
        &mut self.tree
    }

    /// Give the tree back.
    #[must_use]
    pub fn into_tree(self) -> BoxTree {
        self.tree
    }

    /// Change the root's arrangement.
    pub fn set_arrangement(&mut self, arrangement: Arrangement) -> LayoutResult<()> {
        self.tree.set_arrangement(self.root, arrangement)
    }

    /// Enable or disable line wrapping for a horizontal root.
    pub fn set_wrap_enabled(&mut self, enabled: bool) -> LayoutResult<()> {
        self.tree.set_wrap_enabled(self.root, enabled)
    }

    /// Attach `child` under `parent` (see [`BoxTree::attach_child`]).
    pub fn attach_child(&mut self, parent: BoxId, child: BoxId) -> LayoutResult<()> {
        self.tree.attach_child(parent, child)
    }

    /// Detach `child` from `parent` (see [`BoxTree::detach_child`]).
    pub fn detach_child(&mut self, parent: BoxId, child: BoxId) -> LayoutResult<()> {
        self.tree.detach_child(parent, child)
    }

    /// Request a re-sort of the root's children before the next layout.
    pub fn mark_dirty(&mut self) -> LayoutResult<()> {
        self.tree.mark_dirty(self.root)
    }

    /// Measure the whole tree from the root.
    pub fn measure<H: LayoutHost + ?Sized>(
        &mut self,
        width: i32,
        width_mode: MeasureMode,
        height: i32,
        height_mode: MeasureMode,
        host: &mut H,
    ) -> LayoutResult<Size> {
        MeasureEngine::measure(
            &mut self.tree,
            self.root,
            MeasureSpec::new(width, width_mode),
            MeasureSpec::new(height, height_mode),
            host,
        )
    }

    /// Lay out the whole tree with the root occupying `rect`.
    pub fn layout<H: LayoutHost + ?Sized>(
        &mut self,
        rect: Rect,
        host: &mut H,
    ) -> LayoutResult<LayoutOutcome> {
        LayoutEngine::layout(&mut self.tree, self.root, rect, host)
    }

    /// Measure exactly at `viewport` and lay the root out to fill it.
    pub fn run<H: LayoutHost + ?Sized>(
        &mut self,
        viewport: Size,
        host: &mut H,
    ) -> LayoutResult<LayoutOutcome> {
        layout_trace!("CONTAINER", "pass at {}x{}", viewport.width, viewport.height);
        let _ = self.measure(
            viewport.width,
            MeasureMode::Exact,
            viewport.height,
            MeasureMode::Exact,
            host,
        )?;
        self.layout(Rect::from_size(viewport), host)
    }

    /// Every box under the root with its parent-relative rectangle, in
    /// depth-first paint order (the root first).
    #[must_use]
    pub fn positions(&self) -> Vec<(BoxId, Rect)> {
        let mut out = Vec::with_capacity(self.tree.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Ok(rect) = self.tree.rect(id) {
                out.push((id, rect));
            }
            stack.extend(self.tree.children(id).iter().rev());
        }
        out
    }
}

impl Default for LayoutContainer {
    fn default() -> Self {
        Self::new(Arrangement::Default)
    }
}
