//! Nightly cloud pass, edge-triggered once per cycle.

use duskline_config::{CloudConfig, Timing};

use crate::clock::CyclePosition;
use crate::motion::{Easing, Keyframe, Motion};

/// What the cloud layer should do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudCommand {
    /// Begin the traversal and fade the layer in.
    Start,
    /// Park the layer off-screen, hidden, with no animation.
    Reset,
    /// Leave the layer as it is.
    Hold,
}

/// Remembers which cycle last started a cloud pass.
#[derive(Debug, Clone, Default)]
pub struct CloudTrigger {
    last_cycle: Option<i64>,
}

impl CloudTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle of the most recent pass, if any.
    pub fn last_cycle(&self) -> Option<i64> {
        self.last_cycle
    }

    /// Decide the cloud command for `position`.
    ///
    /// Only a trigger records the cycle; resets leave the memory alone.
    pub fn update(&mut self, position: CyclePosition, timing: &Timing) -> CloudCommand {
        if position.t > timing.night_start {
            if self.last_cycle == Some(position.cycle) {
                return CloudCommand::Hold;
            }
            log::debug!("cloud pass started for cycle {}", position.cycle);
            self.last_cycle = Some(position.cycle);
            CloudCommand::Start
        } else {
            CloudCommand::Reset
        }
    }
}

/// The slow linear drift across the sky, holding its end position.
pub fn cloud_pass_motion(config: &CloudConfig) -> Motion {
    Motion {
        name: "cloudPass",
        from: Keyframe::REST,
        to: Keyframe {
            dx_vw: config.travel_vw,
            ..Keyframe::REST
        },
        duration_ms: config.pass_ms,
        easing: Easing::Linear,
        iterations: 1,
        fill_forwards: true,
    }
}
