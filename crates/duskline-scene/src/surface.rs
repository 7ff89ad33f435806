//! The rendering surface the animation writes to.
//!
//! A surface is a retained set of drawable elements with a handful of
//! style properties. The animation only ever calls the methods of
//! [`Surface`]; everything about how elements are laid out and presented
//! is up to the implementation.

use duskline_core::{Axis, Length};

use crate::motion::Motion;
use crate::sky::LinearGradient;
use crate::waves::WavePath;

/// Identifies a drawable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    Sky,
    Sun,
    Reflection,
    Clouds,
    /// Wave layer, back to front.
    Wave(usize),
    /// Star from the fixed pool.
    Star(usize),
    /// An in-flight meteor.
    Meteor(u64),
}

/// Style and lifecycle primitives of a rendering surface.
pub trait Surface {
    fn set_background(&mut self, id: ElementId, gradient: &LinearGradient);

    fn set_offset(&mut self, id: ElementId, axis: Axis, value: Length);

    fn set_opacity(&mut self, id: ElementId, opacity: f64);

    fn set_path(&mut self, id: ElementId, path: &WavePath);

    fn create(&mut self, id: ElementId);

    fn remove(&mut self, id: ElementId);

    /// Start `motion` on `id`, replacing any running animation.
    fn start_animation(&mut self, id: ElementId, motion: &Motion);

    fn stop_animation(&mut self, id: ElementId);

    /// Elements whose one-shot animation completed since the last call.
    fn drain_finished(&mut self) -> Vec<ElementId>;
}

/// A surface that discards every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn set_background(&mut self, _id: ElementId, _gradient: &LinearGradient) {}

    fn set_offset(&mut self, _id: ElementId, _axis: Axis, _value: Length) {}

    fn set_opacity(&mut self, _id: ElementId, _opacity: f64) {}

    fn set_path(&mut self, _id: ElementId, _path: &WavePath) {}

    fn create(&mut self, _id: ElementId) {}

    fn remove(&mut self, _id: ElementId) {}

    fn start_animation(&mut self, _id: ElementId, _motion: &Motion) {}

    fn stop_animation(&mut self, _id: ElementId) {}

    fn drain_finished(&mut self) -> Vec<ElementId> {
        Vec::new()
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Background(ElementId, String),
    Offset(ElementId, Axis, Length),
    Opacity(ElementId, f64),
    Path(ElementId, String),
    Create(ElementId),
    Remove(ElementId),
    StartAnimation(ElementId, Motion),
    StopAnimation(ElementId),
}

/// A surface that records every call, for tests and debugging.
///
/// Completion notifications are queued by hand with [`finish`](Self::finish).
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    finished: Vec<ElementId>,
}

impl RecordingSurface {
    /// Report `id`'s animation as complete on the next drain.
    pub fn finish(&mut self, id: ElementId) {
        self.finished.push(id);
    }

    /// Forget recorded calls, keeping queued completions.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Recorded calls that target `id`.
    pub fn calls_for(&self, id: ElementId) -> impl Iterator<Item = &SurfaceCall> {
        self.calls.iter().filter(move |call| call.target() == id)
    }
}

impl SurfaceCall {
    /// The element a call applies to.
    pub fn target(&self) -> ElementId {
        match self {
            SurfaceCall::Background(id, _)
            | SurfaceCall::Offset(id, _, _)
            | SurfaceCall::Opacity(id, _)
            | SurfaceCall::Path(id, _)
            | SurfaceCall::Create(id)
            | SurfaceCall::Remove(id)
            | SurfaceCall::StartAnimation(id, _)
            | SurfaceCall::StopAnimation(id) => *id,
        }
    }
}

impl Surface for RecordingSurface {
    fn set_background(&mut self, id: ElementId, gradient: &LinearGradient) {
        self.calls.push(SurfaceCall::Background(id, gradient.to_string()));
    }

    fn set_offset(&mut self, id: ElementId, axis: Axis, value: Length) {
        self.calls.push(SurfaceCall::Offset(id, axis, value));
    }

    fn set_opacity(&mut self, id: ElementId, opacity: f64) {
        self.calls.push(SurfaceCall::Opacity(id, opacity));
    }

    fn set_path(&mut self, id: ElementId, path: &WavePath) {
        self.calls.push(SurfaceCall::Path(id, path.to_string()));
    }

    fn create(&mut self, id: ElementId) {
        self.calls.push(SurfaceCall::Create(id));
    }

    fn remove(&mut self, id: ElementId) {
        self.calls.push(SurfaceCall::Remove(id));
    }

    fn start_animation(&mut self, id: ElementId, motion: &Motion) {
        self.calls.push(SurfaceCall::StartAnimation(id, motion.clone()));
    }

    fn stop_animation(&mut self, id: ElementId) {
        self.calls.push(SurfaceCall::StopAnimation(id));
    }

    fn drain_finished(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.finished)
    }
}
