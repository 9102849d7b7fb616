//! Error taxonomy for tree edits and layout passes.
//!
//! Only defects surface as errors. Conditions the engine recovers from
//! locally (percent against an unknown reference size, a zero flex sum,
//! a host that went away mid-pass) never reach this type.

use crate::tree::BoxId;

/// Convenience result type used across the layout crate.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors returned by [`BoxTree`](crate::BoxTree) edits and by the
/// measure/layout passes.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Two siblings compared equal while sorting by z-order. Sort indices
    /// are reassigned before every sort, so this is always a defect.
    #[error("ambiguous z-order in {parent}: {first} and {second} share index {index}")]
    AmbiguousOrder {
        /// Container whose children were being sorted.
        parent: BoxId,
        /// First sibling of the tie.
        first: BoxId,
        /// Second sibling of the tie.
        second: BoxId,
        /// The duplicated sort index.
        index: usize,
    },

    /// The id does not name a box in this tree.
    #[error("unknown box {0}")]
    UnknownBox(BoxId),

    /// A container operation was applied to a leaf box.
    #[error("{0} is a leaf and cannot hold children")]
    NotAContainer(BoxId),

    /// A leaf-only operation was applied to a container box.
    #[error("{0} is a container and has no content size")]
    NotALeaf(BoxId),

    /// The child already has a parent; detach it first.
    #[error("{child} is already attached to {parent}")]
    AlreadyAttached {
        /// The box being attached.
        child: BoxId,
        /// Its current parent.
        parent: BoxId,
    },

    /// Attaching would make a box its own ancestor.
    #[error("attaching {child} to {parent} would create a cycle")]
    WouldCycle {
        /// Intended parent.
        parent: BoxId,
        /// Intended child.
        child: BoxId,
    },

    /// The box is not a child of the given container.
    #[error("{child} is not a child of {parent}")]
    NotAChild {
        /// The container.
        parent: BoxId,
        /// The box that was expected among its children.
        child: BoxId,
    },

    /// A dimension string could not be parsed.
    #[error("invalid dimension {0:?}")]
    InvalidDimension(String),

    /// An arrangement name could not be parsed.
    #[error("invalid arrangement {0:?}")]
    InvalidArrangement(String),
}
