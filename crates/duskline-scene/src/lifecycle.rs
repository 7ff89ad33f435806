//! Meteor entities: creation, flight and removal.

use std::collections::BTreeSet;

use duskline_config::MeteorConfig;
use duskline_core::{Axis, Length};

use crate::meteors::MeteorSpawn;
use crate::surface::{ElementId, Surface};

/// Owns every meteor element between launch and completion.
#[derive(Debug, Clone, Default)]
pub struct MeteorLifecycle {
    next_id: u64,
    in_flight: BTreeSet<u64>,
}

impl MeteorLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of meteors launched and not yet removed.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Create a meteor element and start its flight.
    pub fn launch(
        &mut self,
        surface: &mut dyn Surface,
        spawn: &MeteorSpawn,
        config: &MeteorConfig,
    ) -> ElementId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.in_flight.insert(id);

        let element = ElementId::Meteor(id);
        surface.create(element);
        surface.set_offset(element, Axis::Left, Length::Vw(spawn.left_vw));
        surface.set_offset(element, Axis::Top, Length::Vh(spawn.top_vh));
        surface.start_animation(element, &spawn.motion(config));
        log::trace!(
            "meteor {id} launched at ({:.1}vw, {:.1}vh) for {:.0}ms",
            spawn.left_vw,
            spawn.top_vh,
            spawn.flight_ms
        );
        element
    }

    /// Remove every meteor whose flight the surface reports as finished.
    ///
    /// Completions for other elements are ignored.
    pub fn reap(&mut self, surface: &mut dyn Surface) -> usize {
        let mut removed = 0;
        for finished in surface.drain_finished() {
            let ElementId::Meteor(id) = finished else {
                continue;
            };
            if self.in_flight.remove(&id) {
                surface.remove(finished);
                log::trace!("meteor {id} removed");
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceCall};
    use duskline_config::SceneConfig;

    fn spawn() -> MeteorSpawn {
        MeteorSpawn {
            spawned_at: 11700.0,
            left_vw: 12.0,
            top_vh: 8.0,
            flight_ms: 1600.0,
        }
    }

    #[test]
    fn launch_creates_positions_and_animates() {
        let config = SceneConfig::builtin().unwrap();
        let mut surface = RecordingSurface::default();
        let mut lifecycle = MeteorLifecycle::new();

        let id = lifecycle.launch(&mut surface, &spawn(), &config.meteors);
        assert_eq!(id, ElementId::Meteor(0));
        assert_eq!(lifecycle.in_flight(), 1);
        assert_eq!(
            surface.calls[..3],
            [
                SurfaceCall::Create(id),
                SurfaceCall::Offset(id, Axis::Left, Length::Vw(12.0)),
                SurfaceCall::Offset(id, Axis::Top, Length::Vh(8.0)),
            ]
        );
        let SurfaceCall::StartAnimation(target, motion) = &surface.calls[3] else {
            panic!("expected the fall animation, got {:?}", surface.calls[3]);
        };
        assert_eq!(*target, id);
        assert_eq!(motion.duration_ms, 1600.0);
    }

    #[test]
    fn completion_removes_only_known_meteors() {
        let config = SceneConfig::builtin().unwrap();
        let mut surface = RecordingSurface::default();
        let mut lifecycle = MeteorLifecycle::new();
        let first = lifecycle.launch(&mut surface, &spawn(), &config.meteors);
        let second = lifecycle.launch(&mut surface, &spawn(), &config.meteors);

        surface.finish(first);
        surface.finish(ElementId::Clouds);
        surface.finish(ElementId::Meteor(99));
        assert_eq!(lifecycle.reap(&mut surface), 1);
        assert_eq!(lifecycle.in_flight(), 1);
        assert!(surface.calls.contains(&SurfaceCall::Remove(first)));
        assert!(!surface.calls.contains(&SurfaceCall::Remove(second)));
        assert!(!surface.calls.contains(&SurfaceCall::Remove(ElementId::Clouds)));
    }
}
