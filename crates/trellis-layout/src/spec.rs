//! Per-box layout parameters.
//!
//! A [`BoxSpec`] is owned by its box and written by the host. The measure
//! and layout passes only read it, except for [`BoxSpec::index`], which the
//! z-order sort reassigns on every pass.

use serde::{Deserialize, Serialize};

use crate::dimension::{Dimension, resolve_or_zero};

/// Stack level of a box among its siblings.
///
/// A box without an explicit z-index stacks as if it had level 0 when
/// compared against a sibling that has one, and falls back to insertion
/// order otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<i32>", into = "Option<i32>")]
pub enum ZIndex {
    /// No explicit stack level.
    #[default]
    Auto,
    /// An explicit stack level.
    Integer(i32),
}

impl ZIndex {
    /// The explicit level, if any.
    #[must_use]
    pub const fn get(self) -> Option<i32> {
        match self {
            Self::Auto => None,
            Self::Integer(z) => Some(z),
        }
    }
}

impl From<Option<i32>> for ZIndex {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Self::Auto, Self::Integer)
    }
}

impl From<ZIndex> for Option<i32> {
    fn from(value: ZIndex) -> Self {
        value.get()
    }
}

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Width, left/right/centerX pins.
    Horizontal,
    /// Height, top/bottom/centerY pins.
    Vertical,
}

/// Four optional edge values.
///
/// Stored and deserialised, but not consumed by measure or layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnresolvedEdges {
    /// Top edge.
    pub top: Option<Dimension>,
    /// Right edge.
    pub right: Option<Dimension>,
    /// Bottom edge.
    pub bottom: Option<Dimension>,
    /// Left edge.
    pub left: Option<Dimension>,
}

/// Layout parameters of a single box.
///
/// Width behaviour is picked in this order: an explicit `width` wins; else
/// `auto_fills_width` selects fill behaviour; else the box sizes to its
/// content, unless the size/fill conflict scan forces fill. Height is
/// symmetric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct BoxSpec {
    /// Offset of the left edge from the parent's left edge.
    pub left: Option<Dimension>,
    /// Offset of the top edge from the parent's top edge.
    pub top: Option<Dimension>,
    /// Offset of the right edge from the parent's right edge.
    pub right: Option<Dimension>,
    /// Offset of the bottom edge from the parent's bottom edge.
    pub bottom: Option<Dimension>,
    /// Horizontal position of the box centre.
    pub center_x: Option<Dimension>,
    /// Vertical position of the box centre.
    pub center_y: Option<Dimension>,
    /// Explicit width.
    pub width: Option<Dimension>,
    /// Explicit height.
    pub height: Option<Dimension>,
    /// Stack level among siblings.
    pub z_index: ZIndex,
    /// Share of the space left on the flex axis after fixed siblings.
    pub flex: Option<f64>,
    /// Fill the parent's width when no explicit width is set.
    pub auto_fills_width: bool,
    /// Fill the parent's height when no explicit height is set.
    pub auto_fills_height: bool,
    /// When `false`, width may be recovered from opposing pins at layout time.
    pub size_or_fill_width_enabled: bool,
    /// When `false`, height may be recovered from opposing pins at layout time.
    pub size_or_fill_height_enabled: bool,
    /// Reserved.
    pub margins: UnresolvedEdges,
    /// Reserved.
    pub paddings: UnresolvedEdges,
    /// Insertion position, reassigned by every z-order sort.
    #[serde(skip)]
    pub index: usize,
}

impl Default for BoxSpec {
    fn default() -> Self {
        Self {
            left: None,
            top: None,
            right: None,
            bottom: None,
            center_x: None,
            center_y: None,
            width: None,
            height: None,
            z_index: ZIndex::Auto,
            flex: None,
            auto_fills_width: false,
            auto_fills_height: false,
            size_or_fill_width_enabled: true,
            size_or_fill_height_enabled: true,
            margins: UnresolvedEdges::default(),
            paddings: UnresolvedEdges::default(),
            index: 0,
        }
    }
}

impl BoxSpec {
    /// Explicit size on `axis`.
    #[must_use]
    pub const fn size(&self, axis: Axis) -> Option<Dimension> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// `auto_fills_*` on `axis`.
    #[must_use]
    pub const fn auto_fills(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.auto_fills_width,
            Axis::Vertical => self.auto_fills_height,
        }
    }

    /// `size_or_fill_*_enabled` on `axis`.
    #[must_use]
    pub const fn size_or_fill_enabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.size_or_fill_width_enabled,
            Axis::Vertical => self.size_or_fill_height_enabled,
        }
    }

    /// The `(start, center, end)` pins on `axis`.
    #[must_use]
    pub const fn pins(&self, axis: Axis) -> AxisPins {
        match axis {
            Axis::Horizontal => AxisPins {
                start: self.left,
                center: self.center_x,
                end: self.right,
            },
            Axis::Vertical => AxisPins {
                start: self.top,
                center: self.center_y,
                end: self.bottom,
            },
        }
    }

    /// Flex weight that takes part in distribution: positive and not
    /// overridden by an explicit size on `axis`.
    #[must_use]
    pub fn flex_weight(&self, axis: Axis) -> Option<f64> {
        if self.size(axis).is_some() {
            return None;
        }
        self.flex.filter(|w| *w > FLEX_EPSILON)
    }
}

/// Weights at or below this are treated as "no flex".
pub const FLEX_EPSILON: f64 = 0.0001;

/// The three pins of one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisPins {
    /// Left or top.
    pub start: Option<Dimension>,
    /// centerX or centerY.
    pub center: Option<Dimension>,
    /// Right or bottom.
    pub end: Option<Dimension>,
}

impl AxisPins {
    /// `start + end` resolved against `reference`; unset pins count as 0.
    ///
    /// During measurement the pins act as padding around the child.
    #[must_use]
    pub fn padding(&self, reference: i32) -> i32 {
        resolve_or_zero(self.start, reference).saturating_add(resolve_or_zero(self.end, reference))
    }
}
