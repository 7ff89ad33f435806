//! Sun arc and its reflection on the water.

use duskline_config::SceneConfig;

use crate::ease::{ease_out, lerp};

/// Sun placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunState {
    /// Arc progress, reaching 1 slightly before the end of the cycle.
    pub progress: f64,
    /// Top offset in vh.
    pub top_vh: f64,
    /// Whether the sun is still above the horizon threshold.
    pub visible: bool,
}

impl SunState {
    /// Place the sun at cycle position `t`.
    pub fn at(t: f64, config: &SceneConfig) -> Self {
        let sun = &config.sun;
        let progress = (t * sun.speedup).min(1.0);
        let top_vh = lerp(sun.start_vh, sun.end_vh, ease_out(progress));
        let visible = top_vh < config.timing.horizon_vh + sun.visible_margin_vh;
        Self {
            progress,
            top_vh,
            visible,
        }
    }

    /// Opacity of the sun's reflection given the current horizon warmth.
    pub fn reflection_opacity(&self, warm_band: f64, config: &SceneConfig) -> f64 {
        let sun = &config.sun;
        if self.visible {
            sun.reflection_visible
        } else {
            (warm_band * sun.reflection_warm_scale).max(sun.reflection_floor)
        }
    }
}
