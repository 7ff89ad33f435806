//! Retained element store backing the terminal renderer.
//!
//! The animator writes style properties and starts motions here; the
//! painter reads the resolved pose of every element when a frame is drawn.

use std::collections::BTreeMap;

use duskline_core::{Axis, Length};
use duskline_scene::{ElementId, Keyframe, LinearGradient, Motion, Surface, WavePath};

/// A motion in progress, started at `started_ms` on the surface clock.
#[derive(Debug, Clone, PartialEq)]
struct Running {
    motion: Motion,
    started_ms: f64,
}

/// Style state of one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub left: Option<Length>,
    pub top: Option<Length>,
    /// Style opacity; `None` means fully opaque.
    pub opacity: Option<f64>,
    pub background: Option<LinearGradient>,
    pub path: Option<WavePath>,
    running: Option<Running>,
    /// Final keyframe of a finished fill-forwards motion.
    held: Option<Keyframe>,
}

impl Element {
    /// Transform in effect at `now_ms`.
    pub fn pose(&self, now_ms: f64) -> Keyframe {
        match &self.running {
            Some(running) => running
                .motion
                .sample(now_ms - running.started_ms)
                .unwrap_or(Keyframe::REST),
            None => self.held.unwrap_or(Keyframe::REST),
        }
    }

    /// Opacity in effect at `now_ms`; an animated opacity wins over the style.
    pub fn effective_opacity(&self, now_ms: f64) -> f64 {
        self.pose(now_ms)
            .opacity
            .or(self.opacity)
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    }

    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }
}

/// A [`Surface`] that keeps every element in memory for the painter.
#[derive(Debug, Clone, Default)]
pub struct TerminalSurface {
    elements: BTreeMap<ElementId, Element>,
    finished: Vec<ElementId>,
    clock_ms: f64,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current surface clock in milliseconds.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Every element, in paint order of their ids.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter().map(|(id, element)| (*id, element))
    }

    /// Move the surface clock to `now_ms` and retire completed motions.
    pub fn advance(&mut self, now_ms: f64) {
        self.clock_ms = now_ms;
        for (id, element) in &mut self.elements {
            let Some(running) = &element.running else {
                continue;
            };
            let elapsed = now_ms - running.started_ms;
            if !running.motion.is_finished(elapsed) {
                continue;
            }
            element.held = running.motion.sample(elapsed);
            element.running = None;
            self.finished.push(*id);
        }
    }

    fn entry(&mut self, id: ElementId) -> &mut Element {
        self.elements.entry(id).or_default()
    }
}

impl Surface for TerminalSurface {
    fn set_background(&mut self, id: ElementId, gradient: &LinearGradient) {
        self.entry(id).background = Some(gradient.clone());
    }

    fn set_offset(&mut self, id: ElementId, axis: Axis, value: Length) {
        let element = self.entry(id);
        match axis {
            Axis::Left => element.left = Some(value),
            Axis::Top => element.top = Some(value),
        }
    }

    fn set_opacity(&mut self, id: ElementId, opacity: f64) {
        self.entry(id).opacity = Some(opacity);
    }

    fn set_path(&mut self, id: ElementId, path: &WavePath) {
        self.entry(id).path = Some(path.clone());
    }

    fn create(&mut self, id: ElementId) {
        self.entry(id);
    }

    fn remove(&mut self, id: ElementId) {
        self.elements.remove(&id);
    }

    fn start_animation(&mut self, id: ElementId, motion: &Motion) {
        let started_ms = self.clock_ms;
        let element = self.entry(id);
        element.held = None;
        element.running = Some(Running {
            motion: motion.clone(),
            started_ms,
        });
    }

    fn stop_animation(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.running = None;
            element.held = None;
        }
    }

    fn drain_finished(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duskline_scene::Easing;

    fn fade_out(duration_ms: f64, fill_forwards: bool) -> Motion {
        Motion {
            name: "fade",
            from: Keyframe {
                opacity: Some(1.0),
                ..Keyframe::REST
            },
            to: Keyframe {
                dx_vw: 10.0,
                opacity: Some(0.0),
                ..Keyframe::REST
            },
            duration_ms,
            easing: Easing::Linear,
            iterations: 1,
            fill_forwards,
        }
    }

    #[test]
    fn motions_are_tweened_against_the_surface_clock() {
        let mut surface = TerminalSurface::new();
        surface.advance(1000.0);
        surface.start_animation(ElementId::Meteor(0), &fade_out(100.0, false));
        surface.advance(1050.0);

        let element = surface.element(ElementId::Meteor(0)).unwrap();
        assert_eq!(element.pose(1050.0).dx_vw, 5.0);
        assert_eq!(element.effective_opacity(1050.0), 0.5);
    }

    #[test]
    fn completion_is_reported_once() {
        let mut surface = TerminalSurface::new();
        surface.start_animation(ElementId::Meteor(3), &fade_out(100.0, false));
        surface.advance(50.0);
        assert!(surface.drain_finished().is_empty());
        surface.advance(100.0);
        assert_eq!(surface.drain_finished(), vec![ElementId::Meteor(3)]);
        surface.advance(200.0);
        assert!(surface.drain_finished().is_empty());
    }

    #[test]
    fn fill_forwards_holds_the_last_keyframe() {
        let mut surface = TerminalSurface::new();
        surface.set_opacity(ElementId::Clouds, 0.85);
        surface.start_animation(
            ElementId::Clouds,
            &Motion {
                to: Keyframe {
                    dx_vw: 240.0,
                    ..Keyframe::REST
                },
                from: Keyframe::REST,
                ..fade_out(100.0, true)
            },
        );
        surface.advance(500.0);
        let clouds = surface.element(ElementId::Clouds).unwrap();
        assert!(!clouds.is_animating());
        assert_eq!(clouds.pose(500.0).dx_vw, 240.0);
        assert_eq!(clouds.effective_opacity(500.0), 0.85);

        surface.stop_animation(ElementId::Clouds);
        assert_eq!(surface.element(ElementId::Clouds).unwrap().pose(600.0), Keyframe::REST);
    }

    #[test]
    fn removed_elements_are_gone() {
        let mut surface = TerminalSurface::new();
        surface.create(ElementId::Star(1));
        surface.set_offset(ElementId::Star(1), Axis::Left, Length::Percent(30.0));
        assert_eq!(
            surface.element(ElementId::Star(1)).unwrap().left,
            Some(Length::Percent(30.0))
        );
        surface.remove(ElementId::Star(1));
        assert!(surface.element(ElementId::Star(1)).is_none());
    }
}
