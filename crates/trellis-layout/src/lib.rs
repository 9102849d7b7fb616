//! Measure and layout passes for pin-based composite box trees.
//!
//! # Scope
//!
//! This crate implements:
//! - **Box tree**: an arena of leaf and container boxes addressed by
//!   [`BoxId`], each carrying a [`BoxSpec`] of pins, sizes, z-index and
//!   flex weight.
//! - **Z-order**: [`ZOrderSorter`] orders a container's children by
//!   explicit z-index, falling back to insertion order.
//! - **Size/fill conflicts**: [`SizeFillConflictResolver`] detects a
//!   size-to-content box that contains a fill-parent container.
//! - **Measure**: [`MeasureEngine`] with exact / at-most / unconstrained
//!   [`MeasureSpec`]s, pin padding and flex distribution.
//! - **Layout**: [`LayoutEngine`] for default (overlapping), vertical and
//!   horizontal (optionally wrapping) arrangements.
//! - **Host boundary**: [`LayoutHost`] and [`LayoutProxy`] receive measured
//!   sizes, final rectangles and post-layout notifications.
//! - **Descriptions**: [`BoxDescription`] builds a tree from JSON.
//!
//! # Coordinates
//!
//! Rectangles are integer pixels relative to the parent's top-left corner.
//! [`BoxTree::absolute_rect`] folds in the ancestors' offsets.

/// Size/fill conflict detection.
pub mod conflict;
/// A tree bundled with its root container.
pub mod container;
/// JSON box descriptions.
pub mod description;
/// Pixel and percent dimensions.
pub mod dimension;
/// Error taxonomy.
pub mod error;
/// Sizes, rectangles and insets.
pub mod geometry;
/// Host collaborator traits.
pub mod host;
/// The layout pass.
pub mod layout;
/// The measure pass.
pub mod measure;
/// Measure constraints.
pub mod measure_spec;
/// Pin arithmetic.
pub mod position;
/// Z-order sorting.
pub mod sort;
/// Per-box layout parameters.
pub mod spec;
/// The box tree arena.
pub mod tree;

pub use conflict::{ConflictReport, SizeFill, SizeFillConflictResolver};
pub use container::LayoutContainer;
pub use description::{BoxDescription, DescribedTree, Extent};
pub use dimension::{Dimension, Unit};
pub use error::{LayoutError, LayoutResult};
pub use geometry::{Insets, MAX_PIXELS, Rect, Size};
pub use host::{LayoutHost, LayoutProxy, NullHost, RecordingHost};
pub use layout::{LayoutEngine, LayoutOutcome};
pub use measure::MeasureEngine;
pub use measure_spec::{ChildDimension, MeasureMode, MeasureSpec};
pub use sort::ZOrderSorter;
pub use spec::{Axis, AxisPins, BoxSpec, UnresolvedEdges, ZIndex};
pub use tree::{Arrangement, BoxId, BoxTree, LayoutNode, NodeKind};
