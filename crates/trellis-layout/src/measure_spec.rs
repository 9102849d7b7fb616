//! Constraints passed down the measure pass.
//!
//! A parent hands each child a [`MeasureSpec`] per axis: a size plus a
//! [`MeasureMode`] saying how binding that size is. The child answers with
//! its measured size; [`MeasureSpec::resolve`] is how it reconciles what it
//! wants with what it was offered.

use crate::geometry::clamp_pixels;

/// How binding the size in a [`MeasureSpec`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasureMode {
    /// The box must be exactly this size.
    Exact,
    /// The box may be any size up to this one.
    AtMost,
    /// The parent imposes no limit; the size is only a hint.
    Unconstrained,
}

/// A size constraint on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasureSpec {
    /// Offered size in pixels.
    pub size: i32,
    /// How binding `size` is.
    pub mode: MeasureMode,
}

/// What a child asks for on one axis, before the parent's constraint is
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildDimension {
    /// A resolved explicit size.
    Exact(i32),
    /// Fill behaviour: take everything the parent offers.
    Fill,
    /// Size behaviour: as large as the content.
    Content,
}

impl MeasureSpec {
    /// `size` exactly.
    #[must_use]
    pub const fn exact(size: i32) -> Self {
        Self::new(size, MeasureMode::Exact)
    }

    /// Up to `size`.
    #[must_use]
    pub const fn at_most(size: i32) -> Self {
        Self::new(size, MeasureMode::AtMost)
    }

    /// No limit, with `size` as a hint.
    #[must_use]
    pub const fn unconstrained(size: i32) -> Self {
        Self::new(size, MeasureMode::Unconstrained)
    }

    /// Build a spec with the given size and mode. The size is clamped to
    /// [`MAX_PIXELS`](crate::geometry::MAX_PIXELS).
    #[must_use]
    pub const fn new(size: i32, mode: MeasureMode) -> Self {
        Self {
            size: clamp_pixels(size),
            mode,
        }
    }

    /// Derive the spec for a child from this (the parent's) spec.
    ///
    /// `padding` is subtracted from the offered size first. An explicit
    /// child size always wins and is exact. Otherwise:
    ///
    /// | parent \ child | Fill              | Content           |
    /// |----------------|-------------------|-------------------|
    /// | Exact          | Exact(available)  | AtMost(available) |
    /// | AtMost         | AtMost(available) | AtMost(available) |
    /// | Unconstrained  | Unconstrained     | Unconstrained     |
    #[must_use]
    pub const fn child_spec(self, padding: i32, dimension: ChildDimension) -> Self {
        let remaining = self.size.saturating_sub(padding);
        let available = if remaining > 0 { remaining } else { 0 };
        match (dimension, self.mode) {
            (ChildDimension::Exact(px), _) => Self::exact(if px > 0 { px } else { 0 }),
            (ChildDimension::Fill, MeasureMode::Exact) => Self::exact(available),
            (ChildDimension::Fill | ChildDimension::Content, MeasureMode::AtMost)
            | (ChildDimension::Content, MeasureMode::Exact) => Self::at_most(available),
            (ChildDimension::Fill | ChildDimension::Content, MeasureMode::Unconstrained) => {
                Self::unconstrained(available)
            }
        }
    }

    /// Reconcile a desired `size` with this constraint.
    ///
    /// Exact returns the constraint, AtMost clamps to it, Unconstrained
    /// returns `size` unchanged.
    #[must_use]
    pub fn resolve(self, size: i32) -> i32 {
        match self.mode {
            MeasureMode::Exact => self.size,
            MeasureMode::AtMost => clamp_pixels(size.min(self.size)),
            MeasureMode::Unconstrained => clamp_pixels(size),
        }
    }
}
