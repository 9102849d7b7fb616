//! Boundary between the layout core and the hosting view system.
//!
//! The core never draws or attaches anything itself. It hands measured
//! sizes and final rectangles to a [`LayoutHost`], asks it whether the
//! hosting context is still there, and reports each container that has
//! laid out its children, both to the host and to the box's
//! [`LayoutProxy`].

use crate::geometry::{Rect, Size};
use crate::tree::BoxId;

/// Outbound calls made by the measure and layout passes.
///
/// Every method has a no-op default so a host only implements what it
/// consumes.
pub trait LayoutHost {
    /// A box's measured size was stored.
    fn apply_measured_size(&mut self, _id: BoxId, _size: Size) {}

    /// A box received its final rectangle, relative to its parent.
    fn apply_final_rect(&mut self, _id: BoxId, _rect: Rect, _opacity: f32) {}

    /// Whether the hosting context can still accept layout. Returning
    /// `false` stops the current pass cleanly; boxes already placed keep
    /// their rectangles.
    fn is_context_available(&self) -> bool {
        true
    }

    /// A container finished placing all of its children. Sent bottom-up,
    /// before the container's own proxy is notified; not sent for leaves
    /// or for containers of an aborted pass.
    fn layout_complete(&mut self, _id: BoxId) {}
}

/// Host-side object associated with a box.
///
/// Boxes hold proxies through a `Weak` reference: the host may drop the
/// proxy at any time and the box simply stops notifying it.
pub trait LayoutProxy {
    /// Name used in traces and diagnostics.
    fn label(&self) -> Option<String> {
        None
    }

    /// Called after the box has placed all of its children.
    fn post_layout(&self, id: BoxId, rect: Rect);
}

/// A host that accepts everything and records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl LayoutHost for NullHost {}

/// A host that records every hand-off, in call order.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    /// `(box, size)` for every measured size applied.
    pub measured: Vec<(BoxId, Size)>,
    /// `(box, rect, opacity)` for every final rectangle applied.
    pub placed: Vec<(BoxId, Rect, f32)>,
    /// Containers reported through [`LayoutHost::layout_complete`].
    pub completed: Vec<BoxId>,
    /// Answer given to [`LayoutHost::is_context_available`].
    pub available: bool,
    /// When set, the context disappears after this many placements.
    pub available_for: Option<usize>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            measured: Vec::new(),
            placed: Vec::new(),
            completed: Vec::new(),
            available: true,
            available_for: None,
        }
    }
}

impl RecordingHost {
    /// A host whose context goes away after `placements` rectangles.
    #[must_use]
    pub fn available_for(placements: usize) -> Self {
        Self {
            available_for: Some(placements),
            ..Self::default()
        }
    }

    /// The last rectangle handed over for `id`.
    #[must_use]
    pub fn last_rect(&self, id: BoxId) -> Option<Rect> {
        self.placed
            .iter()
            .rev()
            .find(|(placed, _, _)| *placed == id)
            .map(|(_, rect, _)| *rect)
    }
}

impl LayoutHost for RecordingHost {
    fn apply_measured_size(&mut self, id: BoxId, size: Size) {
        self.measured.push((id, size));
    }

    fn apply_final_rect(&mut self, id: BoxId, rect: Rect, opacity: f32) {
        self.placed.push((id, rect, opacity));
    }

    fn layout_complete(&mut self, id: BoxId) {
        self.completed.push(id);
    }

    fn is_context_available(&self) -> bool {
        self.available && self.available_for.is_none_or(|n| self.placed.len() < n)
    }
}
