//! Pin and size values with a unit.
//!
//! A [`Dimension`] is what a host writes into a [`BoxSpec`](crate::BoxSpec)
//! pin: a number of pixels or a percentage of the parent's extent on the
//! same axis. An unset pin is `None`, never a special `Dimension`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::geometry::clamp_pixels;

/// Unit of a [`Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Absolute device pixels.
    Pixels,
    /// Percentage of a reference size supplied at resolution time.
    Percent,
}

/// A value plus unit, resolved to whole pixels against a reference size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionRepr", into = "String")]
pub struct Dimension {
    value: f64,
    unit: Unit,
}

impl Dimension {
    /// A dimension of `value` pixels.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Pixels,
        }
    }

    /// A dimension of `value` percent.
    #[must_use]
    pub const fn percent(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Percent,
        }
    }

    /// The raw number, without its unit.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// The unit.
    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Whether this is a percentage.
    #[must_use]
    pub fn is_percent(&self) -> bool {
        self.unit == Unit::Percent
    }

    /// Whether the raw number is exactly zero, in either unit.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    /// Resolve to whole pixels.
    ///
    /// Pixels round to the nearest integer. Percentages resolve to
    /// `round(value / 100 * reference)`; a reference of zero or less means
    /// the parent's extent is not known yet, and the percentage resolves
    /// to 0. The result is clamped to [`MAX_PIXELS`](crate::geometry::MAX_PIXELS).
    #[must_use]
    pub fn resolve(&self, reference: i32) -> i32 {
        match self.unit {
            Unit::Pixels => clamp_pixels(self.value.round() as i32),
            Unit::Percent if reference <= 0 => 0,
            Unit::Percent => percent_of(self.value, reference),
        }
    }
}

/// `round(percentage / 100 * reference)`.
#[must_use]
pub fn percent_of(percentage: f64, reference: i32) -> i32 {
    clamp_pixels((percentage / 100.0 * f64::from(reference)).round() as i32)
}

/// Resolve an optional pin, treating an unset pin as 0.
#[must_use]
pub fn resolve_or_zero(pin: Option<Dimension>, reference: i32) -> i32 {
    pin.map_or(0, |d| d.resolve(reference))
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Pixels => write!(f, "{}px", self.value),
            Unit::Percent => write!(f, "{}%", self.value),
        }
    }
}

impl From<Dimension> for String {
    fn from(d: Dimension) -> Self {
        d.to_string()
    }
}

impl FromStr for Dimension {
    type Err = LayoutError;

    /// Parse `"12"`, `"12px"` or `"50%"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (number, unit) = if let Some(n) = text.strip_suffix('%') {
            (n, Unit::Percent)
        } else if let Some(n) = text.strip_suffix("px") {
            (n, Unit::Pixels)
        } else {
            (text, Unit::Pixels)
        };
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| LayoutError::InvalidDimension(s.to_string()))?;
        if !value.is_finite() {
            return Err(LayoutError::InvalidDimension(s.to_string()));
        }
        Ok(Self { value, unit })
    }
}

/// Wire form accepted when deserialising: a bare number means pixels.
#[derive(Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = LayoutError;

    fn try_from(repr: DimensionRepr) -> Result<Self, Self::Error> {
        match repr {
            DimensionRepr::Number(n) if n.is_finite() => Ok(Self::px(n)),
            DimensionRepr::Number(n) => Err(LayoutError::InvalidDimension(n.to_string())),
            DimensionRepr::Text(s) => s.parse(),
        }
    }
}
