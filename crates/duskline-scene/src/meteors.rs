//! Meteor burst scheduling (stateful).
//!
//! Once per cycle a burst window opens when night sets in. While it is
//! open, meteors spawn at randomized intervals. The scheduler only emits
//! spawn events; creating, animating and removing the meteors belongs to
//! [`MeteorLifecycle`](crate::MeteorLifecycle).

use duskline_config::{MeteorConfig, SceneConfig, Timing};

use crate::clock::CyclePosition;
use crate::motion::{Easing, Keyframe, Motion};
use crate::random::RandomSource;

/// Time range of one cycle's burst, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstWindow {
    pub cycle: i64,
    pub start_ms: f64,
    pub end_ms: f64,
}

impl BurstWindow {
    /// The window belonging to `cycle`.
    pub fn for_cycle(cycle: i64, timing: &Timing) -> Self {
        let start_ms = CyclePosition::cycle_start_ms(cycle, timing.duration_ms)
            + timing.night_start * timing.duration_ms;
        Self {
            cycle,
            start_ms,
            end_ms: start_ms + timing.meteor_burst_ms,
        }
    }

    /// Whether `now_ms` falls inside the window.
    pub fn contains(&self, now_ms: f64) -> bool {
        now_ms >= self.start_ms && now_ms <= self.end_ms
    }
}

/// Cross-frame burst bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstState {
    pub active: bool,
    /// Timestamp of the frame that opened the current burst.
    pub burst_start: f64,
    pub next_spawn_at: f64,
    /// Cycle whose window the current burst belongs to.
    pub cycle: i64,
}

impl Default for BurstState {
    fn default() -> Self {
        Self {
            active: false,
            burst_start: 0.0,
            next_spawn_at: 0.0,
            cycle: 0,
        }
    }
}

/// A meteor to launch: where it starts and how long it flies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteorSpawn {
    pub spawned_at: f64,
    pub left_vw: f64,
    pub top_vh: f64,
    pub flight_ms: f64,
}

impl MeteorSpawn {
    /// The diagonal streak: slide down and right while fading out.
    pub fn motion(&self, config: &MeteorConfig) -> Motion {
        Motion {
            name: "meteor",
            from: Keyframe {
                dx_vw: 0.0,
                dy_vh: 0.0,
                rotate_deg: config.rotate_deg,
                opacity: Some(1.0),
            },
            to: Keyframe {
                dx_vw: config.travel_vw,
                dy_vh: config.travel_vh,
                rotate_deg: config.rotate_deg,
                opacity: Some(0.0),
            },
            duration_ms: self.flight_ms,
            easing: Easing::CubicBezier(0.2, 0.6, 0.2, 1.0),
            iterations: 1,
            fill_forwards: false,
        }
    }
}

/// The burst-window state machine: idle, or bursting.
#[derive(Debug, Clone, Default)]
pub struct MeteorScheduler {
    state: BurstState,
}

impl MeteorScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BurstState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Advance the scheduler to `now_ms`, returning a meteor to launch on
    /// this frame, if any.
    pub fn update<R: RandomSource + ?Sized>(
        &mut self,
        now_ms: f64,
        config: &SceneConfig,
        rng: &mut R,
    ) -> Option<MeteorSpawn> {
        let timing = &config.timing;
        let position = CyclePosition::at(now_ms, timing.duration_ms);
        let window = BurstWindow::for_cycle(position.cycle, timing);
        let inside = window.contains(now_ms);

        if self.state.active && (!inside || self.state.cycle != window.cycle) {
            log::debug!(
                "meteor burst of cycle {} ended after {:.0}ms",
                self.state.cycle,
                now_ms - self.state.burst_start
            );
            self.state.active = false;
        }

        if inside && !self.state.active {
            log::debug!("meteor burst opened for cycle {}", window.cycle);
            self.state = BurstState {
                active: true,
                burst_start: now_ms,
                next_spawn_at: now_ms,
                cycle: window.cycle,
            };
        }

        if !self.state.active || now_ms < self.state.next_spawn_at {
            return None;
        }

        let meteors = &config.meteors;
        let spawn = MeteorSpawn {
            spawned_at: now_ms,
            left_vw: meteors.start_left_vw.at(rng.next_unit()),
            top_vh: meteors.start_top_vh.at(rng.next_unit()),
            flight_ms: meteors.flight_ms.at(rng.next_unit()),
        };
        self.state.next_spawn_at = now_ms + meteors.spawn_interval_ms.at(rng.next_unit());
        Some(spawn)
    }
}
