//! Viewport-relative lengths.

use std::fmt;

/// A length relative to the viewport or to the containing element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Percent of the viewport height.
    Vh(f64),
    /// Percent of the viewport width.
    Vw(f64),
    /// Percent of the containing element along the same axis.
    Percent(f64),
}

impl Length {
    /// The numeric part, whatever the unit.
    pub fn value(self) -> f64 {
        match self {
            Length::Vh(v) | Length::Vw(v) | Length::Percent(v) => v,
        }
    }

    /// Resolve to an absolute size given the viewport and the container extent
    /// along the axis this length applies to.
    pub fn resolve(self, viewport_width: f64, viewport_height: f64, container: f64) -> f64 {
        match self {
            Length::Vh(v) => v / 100.0 * viewport_height,
            Length::Vw(v) => v / 100.0 * viewport_width,
            Length::Percent(v) => v / 100.0 * container,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Vh(v) => write!(f, "{v}vh"),
            Length::Vw(v) => write!(f, "{v}vw"),
            Length::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Which offset of an element a [`Length`] is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Left,
    Top,
}
