//! Arena-backed box tree.
//!
//! All boxes live in one contiguous vector and refer to each other through
//! [`BoxId`] indices, so the recursive passes can walk and mutate the tree
//! without fighting the borrow checker. A parent owns the ordering of its
//! children; children only record their parent for traversal.

use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use trellis_common::layout_trace;

use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{Insets, Rect, Size};
use crate::host::LayoutProxy;
use crate::spec::BoxSpec;

/// A type-safe index into a [`BoxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoxId(pub usize);

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a container stacks its children.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Arrangement {
    /// Children overlap, each positioned by its own pins.
    #[default]
    #[strum(to_string = "default", serialize = "composite")]
    Default,
    /// Children stack top to bottom.
    Vertical,
    /// Children run left to right, optionally wrapping onto new lines.
    Horizontal,
}

impl Arrangement {
    /// Map the host's layout property to an arrangement. Anything that is
    /// not `"vertical"` or `"horizontal"` (including no value) selects
    /// [`Arrangement::Default`].
    #[must_use]
    pub fn from_property(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

/// State that only container boxes carry.
#[derive(Debug, Clone)]
pub struct ContainerState {
    pub(crate) children: Vec<BoxId>,
    pub(crate) arrangement: Arrangement,
    pub(crate) wrap_enabled: bool,
    pub(crate) needs_sort: bool,
    pub(crate) padding: Insets,
    pub(crate) min_size: Size,
}

impl ContainerState {
    fn new(arrangement: Arrangement) -> Self {
        Self {
            children: Vec::new(),
            arrangement,
            wrap_enabled: true,
            needs_sort: true,
            padding: Insets::default(),
            min_size: Size::ZERO,
        }
    }

    /// Children in their current structural (paint) order.
    #[must_use]
    pub fn children(&self) -> &[BoxId] {
        &self.children
    }

    /// How the children are stacked.
    #[must_use]
    pub const fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    /// Whether horizontal arrangement breaks onto new lines.
    #[must_use]
    pub const fn wrap_enabled(&self) -> bool {
        self.wrap_enabled
    }

    /// Whether the children must be re-sorted before the next layout.
    #[must_use]
    pub const fn needs_sort(&self) -> bool {
        self.needs_sort
    }
}

/// Leaf or container.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A box with no children that reports an intrinsic content size.
    Leaf {
        /// Size the box would like when unconstrained.
        content: Size,
    },
    /// A box that arranges children.
    Container(ContainerState),
}

/// One box of the tree.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    /// Layout parameters written by the host.
    pub spec: BoxSpec,
    kind: NodeKind,
    parent: Option<BoxId>,
    measured: Size,
    rect: Rect,
    opacity: f32,
    proxy: Option<Weak<dyn LayoutProxy>>,
}

impl LayoutNode {
    fn new(spec: BoxSpec, kind: NodeKind) -> Self {
        Self {
            spec,
            kind,
            parent: None,
            measured: Size::ZERO,
            rect: Rect::default(),
            opacity: 1.0,
            proxy: None,
        }
    }

    /// Leaf or container.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Container state, or `None` for a leaf.
    #[must_use]
    pub const fn container(&self) -> Option<&ContainerState> {
        match &self.kind {
            NodeKind::Container(c) => Some(c),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub(crate) const fn container_mut(&mut self) -> Option<&mut ContainerState> {
        match &mut self.kind {
            NodeKind::Container(c) => Some(c),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// The parent box, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<BoxId> {
        self.parent
    }

    /// Size stored by the last measure pass.
    #[must_use]
    pub const fn measured(&self) -> Size {
        self.measured
    }

    /// Rectangle stored by the last layout pass, relative to the parent.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Opacity handed to the host with the final rectangle.
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// The host proxy, if one is set and still alive.
    #[must_use]
    pub fn proxy(&self) -> Option<Rc<dyn LayoutProxy>> {
        self.proxy.as_ref().and_then(Weak::upgrade)
    }

    /// Label for traces: the proxy's label when it has one.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.proxy().and_then(|p| p.label())
    }
}

/// Arena-based box tree with O(1) access by [`BoxId`].
#[derive(Debug, Clone, Default)]
pub struct BoxTree {
    nodes: Vec<LayoutNode>,
}

impl BoxTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of boxes allocated in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no box has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached leaf box.
    pub fn add_leaf(&mut self, spec: BoxSpec, content: Size) -> BoxId {
        self.alloc(LayoutNode::new(spec, NodeKind::Leaf { content }))
    }

    /// Allocate a detached, empty container box.
    pub fn add_container(&mut self, spec: BoxSpec, arrangement: Arrangement) -> BoxId {
        self.alloc(LayoutNode::new(
            spec,
            NodeKind::Container(ContainerState::new(arrangement)),
        ))
    }

    fn alloc(&mut self, node: LayoutNode) -> BoxId {
        let id = BoxId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Get a box by id.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&LayoutNode> {
        self.nodes.get(id.0)
    }

    /// Get a box by id, or fail with [`LayoutError::UnknownBox`].
    pub fn node(&self, id: BoxId) -> LayoutResult<&LayoutNode> {
        self.get(id).ok_or(LayoutError::UnknownBox(id))
    }

    pub(crate) fn node_mut(&mut self, id: BoxId) -> LayoutResult<&mut LayoutNode> {
        self.nodes.get_mut(id.0).ok_or(LayoutError::UnknownBox(id))
    }

    fn container_mut(&mut self, id: BoxId) -> LayoutResult<&mut ContainerState> {
        self.node_mut(id)?
            .container_mut()
            .ok_or(LayoutError::NotAContainer(id))
    }

    /// Read a box's layout parameters.
    pub fn spec(&self, id: BoxId) -> LayoutResult<&BoxSpec> {
        Ok(&self.node(id)?.spec)
    }

    /// Edit a box's layout parameters.
    ///
    /// Changing a z-index does not reorder anything by itself; call
    /// [`BoxTree::resort`] on the parent afterwards.
    pub fn spec_mut(&mut self, id: BoxId) -> LayoutResult<&mut BoxSpec> {
        Ok(&mut self.node_mut(id)?.spec)
    }

    /// Append `child` as the last child of `parent` and mark `parent` dirty.
    pub fn attach_child(&mut self, parent: BoxId, child: BoxId) -> LayoutResult<()> {
        if let Some(current) = self.node(child)?.parent {
            return Err(LayoutError::AlreadyAttached {
                child,
                parent: current,
            });
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(LayoutError::WouldCycle { parent, child });
        }
        let container = self.container_mut(parent)?;
        container.children.push(child);
        container.needs_sort = true;
        self.node_mut(child)?.parent = Some(parent);
        layout_trace!("TREE", "attaching {child} to {parent}");
        Ok(())
    }

    /// Remove `child` from `parent` and mark `parent` dirty.
    pub fn detach_child(&mut self, parent: BoxId, child: BoxId) -> LayoutResult<()> {
        let container = self.container_mut(parent)?;
        let Some(pos) = container.children.iter().position(|c| *c == child) else {
            return Err(LayoutError::NotAChild { parent, child });
        };
        let _ = container.children.remove(pos);
        container.needs_sort = true;
        self.node_mut(child)?.parent = None;
        layout_trace!("TREE", "removing {child} from {parent}");
        Ok(())
    }

    /// Children of `id` in structural order (empty for leaves and unknown ids).
    #[must_use]
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        self.get(id)
            .and_then(LayoutNode::container)
            .map_or(&[], ContainerState::children)
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: BoxId) -> Option<BoxId> {
        self.get(id).and_then(LayoutNode::parent)
    }

    /// Iterate over the ancestors of `id`, from its parent to the root.
    #[must_use]
    pub fn ancestors(&self, id: BoxId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Whether `id` is a container.
    #[must_use]
    pub fn is_container(&self, id: BoxId) -> bool {
        self.get(id).and_then(LayoutNode::container).is_some()
    }

    /// Arrangement of a container.
    pub fn arrangement(&self, id: BoxId) -> LayoutResult<Arrangement> {
        self.node(id)?
            .container()
            .map(ContainerState::arrangement)
            .ok_or(LayoutError::NotAContainer(id))
    }

    /// Change how a container stacks its children.
    pub fn set_arrangement(&mut self, id: BoxId, arrangement: Arrangement) -> LayoutResult<()> {
        self.container_mut(id)?.arrangement = arrangement;
        layout_trace!("TREE", "{id} arrangement set to {arrangement}");
        Ok(())
    }

    /// Enable or disable line wrapping for horizontal arrangement.
    pub fn set_wrap_enabled(&mut self, id: BoxId, enabled: bool) -> LayoutResult<()> {
        self.container_mut(id)?.wrap_enabled = enabled;
        Ok(())
    }

    /// Set a container's own content padding.
    pub fn set_padding(&mut self, id: BoxId, padding: Insets) -> LayoutResult<()> {
        self.container_mut(id)?.padding = padding;
        Ok(())
    }

    /// Set the minimum size a container reports from measurement.
    pub fn set_min_size(&mut self, id: BoxId, min: Size) -> LayoutResult<()> {
        self.container_mut(id)?.min_size = min;
        Ok(())
    }

    /// Change a leaf's intrinsic content size.
    pub fn set_content_size(&mut self, id: BoxId, size: Size) -> LayoutResult<()> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Leaf { content } => {
                *content = size;
                Ok(())
            }
            NodeKind::Container(_) => Err(LayoutError::NotALeaf(id)),
        }
    }

    /// Set the opacity passed to the host, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, id: BoxId, opacity: f32) -> LayoutResult<()> {
        self.node_mut(id)?.opacity = opacity.clamp(0.0, 1.0);
        Ok(())
    }

    /// Associate a host proxy without taking ownership of it.
    pub fn set_proxy(&mut self, id: BoxId, proxy: Weak<dyn LayoutProxy>) -> LayoutResult<()> {
        self.node_mut(id)?.proxy = Some(proxy);
        Ok(())
    }

    /// Mark a container so its children are re-sorted before the next layout.
    pub fn mark_dirty(&mut self, id: BoxId) -> LayoutResult<()> {
        self.container_mut(id)?.needs_sort = true;
        Ok(())
    }

    /// Request a re-sort after a z-index change.
    pub fn resort(&mut self, id: BoxId) -> LayoutResult<()> {
        self.mark_dirty(id)
    }

    /// Size stored by the last measure pass.
    pub fn measured(&self, id: BoxId) -> LayoutResult<Size> {
        Ok(self.node(id)?.measured)
    }

    /// Rectangle stored by the last layout pass, relative to the parent.
    pub fn rect(&self, id: BoxId) -> LayoutResult<Rect> {
        Ok(self.node(id)?.rect)
    }

    /// Rectangle of `id` in the root's coordinate frame.
    pub fn absolute_rect(&self, id: BoxId) -> LayoutResult<Rect> {
        let mut rect = self.rect(id)?;
        for ancestor in self.ancestors(id) {
            let origin = self.rect(ancestor)?;
            rect = rect.translate(origin.left, origin.top);
        }
        Ok(rect)
    }

    pub(crate) fn set_measured(&mut self, id: BoxId, size: Size) -> LayoutResult<()> {
        self.node_mut(id)?.measured = size;
        Ok(())
    }

    pub(crate) fn set_rect(&mut self, id: BoxId, rect: Rect) -> LayoutResult<()> {
        self.node_mut(id)?.rect = rect;
        Ok(())
    }

    pub(crate) fn set_children_order(&mut self, id: BoxId, order: Vec<BoxId>) -> LayoutResult<()> {
        let container = self.container_mut(id)?;
        debug_assert_eq!(container.children.len(), order.len());
        container.children = order;
        Ok(())
    }

    pub(crate) fn clear_needs_sort(&mut self, id: BoxId) -> LayoutResult<()> {
        self.container_mut(id)?.needs_sort = false;
        Ok(())
    }
}

/// Iterator over ancestors of a box.
pub struct AncestorIterator<'a> {
    tree: &'a BoxTree,
    current: Option<BoxId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = BoxId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrangement_from_property() {
        assert_eq!(
            Arrangement::from_property(Some("horizontal")),
            Arrangement::Horizontal
        );
        assert_eq!(
            Arrangement::from_property(Some("Vertical")),
            Arrangement::Vertical
        );
        assert_eq!(
            Arrangement::from_property(Some("grid")),
            Arrangement::Default
        );
        assert_eq!(Arrangement::from_property(None), Arrangement::Default);
    }

    #[test]
    fn attach_marks_parent_dirty_and_records_parent() {
        let mut tree = BoxTree::new();
        let root = tree.add_container(BoxSpec::default(), Arrangement::Default);
        let leaf = tree.add_leaf(BoxSpec::default(), Size::new(5, 5));
        tree.clear_needs_sort(root).unwrap();

        tree.attach_child(root, leaf).unwrap();

        assert_eq!(tree.children(root), &[leaf]);
        assert_eq!(tree.parent(leaf), Some(root));
        assert!(tree.node(root).unwrap().container().unwrap().needs_sort());
    }

    #[test]
    fn attach_rejects_cycles_and_double_parents() {
        let mut tree = BoxTree::new();
        let a = tree.add_container(BoxSpec::default(), Arrangement::Default);
        let b = tree.add_container(BoxSpec::default(), Arrangement::Default);
        let c = tree.add_container(BoxSpec::default(), Arrangement::Default);
        tree.attach_child(a, b).unwrap();

        assert_eq!(
            tree.attach_child(b, a),
            Err(LayoutError::WouldCycle {
                parent: b,
                child: a
            })
        );
        assert_eq!(
            tree.attach_child(c, b),
            Err(LayoutError::AlreadyAttached {
                child: b,
                parent: a
            })
        );
    }

    #[test]
    fn leaf_cannot_hold_children() {
        let mut tree = BoxTree::new();
        let leaf = tree.add_leaf(BoxSpec::default(), Size::ZERO);
        let other = tree.add_leaf(BoxSpec::default(), Size::ZERO);
        assert_eq!(
            tree.attach_child(leaf, other),
            Err(LayoutError::NotAContainer(leaf))
        );
    }

    #[test]
    fn detach_unknown_child_fails() {
        let mut tree = BoxTree::new();
        let root = tree.add_container(BoxSpec::default(), Arrangement::Default);
        let leaf = tree.add_leaf(BoxSpec::default(), Size::ZERO);
        assert_eq!(
            tree.detach_child(root, leaf),
            Err(LayoutError::NotAChild {
                parent: root,
                child: leaf
            })
        );
    }

    #[test]
    fn absolute_rect_folds_parent_offsets() {
        let mut tree = BoxTree::new();
        let root = tree.add_container(BoxSpec::default(), Arrangement::Default);
        let inner = tree.add_container(BoxSpec::default(), Arrangement::Default);
        let leaf = tree.add_leaf(BoxSpec::default(), Size::ZERO);
        tree.attach_child(root, inner).unwrap();
        tree.attach_child(inner, leaf).unwrap();
        tree.set_rect(root, Rect::new(0, 0, 100, 100)).unwrap();
        tree.set_rect(inner, Rect::new(10, 20, 60, 80)).unwrap();
        tree.set_rect(leaf, Rect::new(5, 5, 15, 15)).unwrap();

        assert_eq!(tree.absolute_rect(leaf).unwrap(), Rect::new(15, 25, 25, 35));
    }
}
