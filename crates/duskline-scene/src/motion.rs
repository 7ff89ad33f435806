//! Keyframe motion descriptors handed to the rendering surface.
//!
//! The core never tweens anything itself. It describes a one-shot or
//! repeating motion (start, end, duration, easing) and lets whatever
//! presents the scene play it back, either natively or by sampling
//! [`Motion::sample`] every frame.

use std::fmt;

use crate::ease::{cubic_bezier, ease_out, lerp};

/// Timing curve of a motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseOut,
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress.
    pub fn apply(self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        match self {
            Easing::Linear => x,
            Easing::EaseOut => ease_out(x),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, x),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::EaseOut => write!(f, "ease-out"),
            Easing::CubicBezier(x1, y1, x2, y2) => write!(f, "cubic-bezier({x1},{y1},{x2},{y2})"),
        }
    }
}

/// Transform and opacity at one end of a motion.
///
/// Translation is relative to the element's own offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub dx_vw: f64,
    pub dy_vh: f64,
    pub rotate_deg: f64,
    /// `None` leaves the element's own opacity untouched.
    pub opacity: Option<f64>,
}

impl Keyframe {
    /// The identity transform.
    pub const REST: Self = Self {
        dx_vw: 0.0,
        dy_vh: 0.0,
        rotate_deg: 0.0,
        opacity: None,
    };

    fn lerp(self, other: Self, f: f64) -> Self {
        let opacity = match (self.opacity, other.opacity) {
            (Some(a), Some(b)) => Some(lerp(a, b, f)),
            (a, b) => a.or(b),
        };
        Self {
            dx_vw: lerp(self.dx_vw, other.dx_vw, f),
            dy_vh: lerp(self.dy_vh, other.dy_vh, f),
            rotate_deg: lerp(self.rotate_deg, other.rotate_deg, f),
            opacity,
        }
    }
}

/// A named two-keyframe animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    pub name: &'static str,
    pub from: Keyframe,
    pub to: Keyframe,
    pub duration_ms: f64,
    pub easing: Easing,
    pub iterations: u32,
    /// Hold the final keyframe once finished instead of snapping back.
    pub fill_forwards: bool,
}

impl Motion {
    /// Total play time across all iterations.
    pub fn total_ms(&self) -> f64 {
        self.duration_ms * f64::from(self.iterations.max(1))
    }

    /// Whether a motion started `elapsed_ms` ago has completed.
    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.total_ms()
    }

    /// The keyframe in effect `elapsed_ms` after the motion started.
    ///
    /// Returns `None` once finished unless the motion fills forwards.
    pub fn sample(&self, elapsed_ms: f64) -> Option<Keyframe> {
        let elapsed_ms = elapsed_ms.max(0.0);
        if self.is_finished(elapsed_ms) {
            return self.fill_forwards.then_some(self.to);
        }
        if self.duration_ms <= 0.0 {
            return Some(self.to);
        }
        let progress = (elapsed_ms % self.duration_ms) / self.duration_ms;
        Some(self.from.lerp(self.to, self.easing.apply(progress)))
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}ms {} {}",
            self.name, self.duration_ms, self.easing, self.iterations
        )?;
        if self.fill_forwards {
            write!(f, " forwards")?;
        }
        Ok(())
    }
}
