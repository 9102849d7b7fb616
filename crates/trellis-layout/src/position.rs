//! Pin arithmetic shared by the layout arrangements.
//!
//! All functions work on one axis at a time and return `(start, end)`
//! edges relative to the parent's top-left corner.

use crate::dimension::{Dimension, resolve_or_zero};
use crate::geometry::clamp_pixels;
use crate::spec::{Axis, AxisPins, BoxSpec};

/// Place a box of `size` inside `[bound_start, bound_end]`.
///
/// The first matching rule wins: a start pin offsets from `bound_start`;
/// a non-zero center pin centers the box on `bound_start + center`; an end
/// pin places the box `end` pixels before the far edge; with no pins the
/// box is centered in the bounds. Pins resolve against `reference`.
#[must_use]
pub fn compute_position(
    pins: AxisPins,
    size: i32,
    bound_start: i32,
    bound_end: i32,
    reference: i32,
) -> (i32, i32) {
    let dist = bound_end.saturating_sub(bound_start);
    if let Some(start) = pins.start {
        let start = bound_start.saturating_add(start.resolve(reference));
        return (start, start.saturating_add(size));
    }
    if let Some(center) = pins.center.filter(|c| !c.is_zero()) {
        let start = bound_start
            .saturating_add(center.resolve(reference))
            .saturating_sub(size / 2);
        return (start, start.saturating_add(size));
    }
    if let Some(end) = pins.end {
        let end = dist.saturating_sub(end.resolve(reference));
        return (end.saturating_sub(size), end);
    }
    let start = bound_start.saturating_add(dist.saturating_sub(size) / 2);
    (start, start.saturating_add(size))
}

/// Recover a size on `axis` from opposing pins.
///
/// Only boxes with no explicit size and `size_or_fill_*_enabled` switched
/// off are pin-defined; everything else keeps `measured`. The pairs are
/// tried in order: start+center, start+end, center+end.
#[must_use]
pub fn size_from_pins(
    spec: &BoxSpec,
    axis: Axis,
    parent_start: i32,
    parent_end: i32,
    parent_extent: i32,
    measured: i32,
) -> i32 {
    if spec.size(axis).is_some() || spec.size_or_fill_enabled(axis) {
        return measured;
    }
    let reference = parent_extent;
    let recovered = match spec.pins(axis) {
        AxisPins {
            start: Some(start),
            center: Some(center),
            ..
        } => center
            .resolve(reference)
            .saturating_sub(start.resolve(reference))
            .saturating_sub(parent_start)
            .saturating_mul(2),
        AxisPins {
            start: Some(start),
            end: Some(end),
            ..
        } => parent_extent
            .saturating_sub(end.resolve(reference))
            .saturating_sub(start.resolve(reference)),
        AxisPins {
            center: Some(center),
            end: Some(end),
            ..
        } => parent_end
            .saturating_sub(end.resolve(reference))
            .saturating_sub(center.resolve(reference))
            .saturating_mul(2),
        _ => return measured,
    };
    clamp_pixels(recovered)
}

/// Vertical-arrangement placement: stack below `current` plus the top
/// pin, capping the bottom edge at `max_bottom`.
#[must_use]
pub fn stack_position(
    current: i32,
    top_pin: Option<Dimension>,
    size: i32,
    layout_top: i32,
    max_bottom: i32,
    reference: i32,
) -> (i32, i32) {
    let top = layout_top
        .saturating_add(current)
        .saturating_add(resolve_or_zero(top_pin, reference));
    (top, top.saturating_add(size).min(max_bottom))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pins(start: Option<i32>, center: Option<i32>, end: Option<i32>) -> AxisPins {
        AxisPins {
            start: start.map(|v| Dimension::px(f64::from(v))),
            center: center.map(|v| Dimension::px(f64::from(v))),
            end: end.map(|v| Dimension::px(f64::from(v))),
        }
    }

    #[test]
    fn start_pin_wins() {
        assert_eq!(compute_position(pins(Some(5), Some(50), Some(5)), 20, 0, 100, 100), (5, 25));
    }

    #[test]
    fn zero_center_falls_through_to_end() {
        assert_eq!(compute_position(pins(None, Some(0), Some(10)), 20, 0, 100, 100), (70, 90));
    }

    #[test]
    fn center_pin_centers_on_offset() {
        assert_eq!(compute_position(pins(None, Some(50), None), 20, 0, 100, 100), (40, 60));
    }

    #[test]
    fn no_pins_centers_in_bounds() {
        assert_eq!(compute_position(AxisPins::default(), 20, 10, 110, 100), (50, 70));
    }

    #[test]
    fn stack_clamps_bottom() {
        assert_eq!(stack_position(90, None, 40, 0, 100, 100), (90, 100));
    }
}
