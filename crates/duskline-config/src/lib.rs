//! Scene parameters for the duskline sky animation.
//!
//! Every tunable number of the animation lives in [`SceneConfig`]. The
//! values ship as an embedded TOML document and are validated once at
//! startup, so a malformed palette or an impossible range fails before the
//! first frame is drawn.

use duskline_core::{HexColor, Palette};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The built-in scene definition.
const DEFAULT_SCENE: &str = include_str!("default_scene.toml");

/// Errors produced while loading a scene definition.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML or does not match the schema.
    /// Malformed colors surface here.
    #[error("failed to parse scene definition: {0}")]
    Parse(#[from] toml::de::Error),
    /// A parameter parsed but has an unusable value.
    #[error("invalid scene parameter `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// A half-open numeric range `[min, max)` written as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a unit fraction in `[0, 1)` into the interval.
    pub fn at(self, fraction: f64) -> f64 {
        self.min + fraction * (self.max - self.min)
    }

    /// Whether `value` lies in `[min, max)`.
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    fn validate(self, field: &'static str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min >= self.max {
            return Err(invalid(
                field,
                format!("range [{}, {}) is empty", self.min, self.max),
            ));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for Interval {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<Interval> for [f64; 2] {
    fn from(interval: Interval) -> Self {
        [interval.min, interval.max]
    }
}

/// Cycle length and phase boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Length of one day/night cycle.
    pub duration_ms: f64,
    /// Phase at which sunset turns into twilight.
    pub twilight_start: f64,
    /// Phase at which twilight turns into night.
    pub night_start: f64,
    /// Length of the meteor burst window that opens at `night_start`.
    pub meteor_burst_ms: f64,
    /// Horizon line, in vh from the top of the viewport.
    pub horizon_vh: f64,
}

/// Horizon warmth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyConfig {
    /// Warm band intensity during the day.
    pub warm_band: f64,
    /// Tint the horizon band is pulled toward while warm.
    pub horizon_accent: HexColor,
}

/// Sun arc and its reflection on the water.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunConfig {
    pub start_vh: f64,
    pub end_vh: f64,
    /// Multiplier on the phase; above 1 the sun finishes its arc early.
    pub speedup: f64,
    /// The sun counts as visible while above `horizon_vh + visible_margin_vh`.
    pub visible_margin_vh: f64,
    pub reflection_visible: f64,
    pub reflection_floor: f64,
    pub reflection_warm_scale: f64,
}

/// The fixed star pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarConfig {
    pub count: usize,
    /// Stars are placed between the top of the viewport and this line.
    pub max_top_vh: f64,
    /// Twinkle frequency range.
    pub frequency: Interval,
    /// How far before `night_start` stars begin to appear.
    pub ramp_lead: f64,
    /// Slope of the visibility ramp, per unit of phase.
    pub ramp_rate: f64,
}

/// Meteor burst spawning and flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeteorConfig {
    pub spawn_interval_ms: Interval,
    pub flight_ms: Interval,
    pub start_left_vw: Interval,
    pub start_top_vh: Interval,
    pub travel_vw: f64,
    pub travel_vh: f64,
    pub rotate_deg: f64,
}

/// The nightly cloud pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    pub pass_ms: f64,
    pub opacity: f64,
    /// Parked position while hidden, in percent of the viewport width.
    pub reset_left_percent: f64,
    /// Horizontal distance covered by one pass.
    pub travel_vw: f64,
}

/// One ocean wave silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveLayerSpec {
    pub amplitude: f64,
    pub wavelength: f64,
    /// Phase advance in viewbox units per second.
    pub speed: f64,
    /// Resting height as a fraction of the viewbox height.
    pub base_height: f64,
}

/// Wave viewbox and layers, back to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    pub width: f64,
    pub height: f64,
    /// Horizontal sampling step.
    pub step: f64,
    pub layers: Vec<WaveLayerSpec>,
}

/// Every parameter of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub timing: Timing,
    pub palette: Palette,
    pub sky: SkyConfig,
    pub sun: SunConfig,
    pub stars: StarConfig,
    pub meteors: MeteorConfig,
    pub clouds: CloudConfig,
    pub waves: WaveConfig,
}

impl SceneConfig {
    /// Load and validate the built-in scene.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(DEFAULT_SCENE)
    }

    /// Parse and validate a scene definition.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter is usable.
    ///
    /// Misordered phase boundaries are accepted: the blend fractions clamp,
    /// so the sky degrades visually instead of breaking.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        if !(timing.duration_ms.is_finite() && timing.duration_ms > 0.0) {
            return Err(invalid("timing.duration_ms", "must be a positive number"));
        }
        for (field, value) in [
            ("timing.twilight_start", timing.twilight_start),
            ("timing.night_start", timing.night_start),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{value} is outside [0, 1]")));
            }
        }
        if timing.twilight_start >= timing.night_start {
            log::warn!(
                "twilight_start {} is not before night_start {}; sky transitions will snap",
                timing.twilight_start,
                timing.night_start
            );
        }
        if !(timing.meteor_burst_ms >= 0.0) {
            return Err(invalid("timing.meteor_burst_ms", "must not be negative"));
        }

        self.stars.frequency.validate("stars.frequency")?;
        if !(self.stars.max_top_vh >= 0.0) {
            return Err(invalid("stars.max_top_vh", "must not be negative"));
        }

        let meteors = &self.meteors;
        meteors.spawn_interval_ms.validate("meteors.spawn_interval_ms")?;
        if meteors.spawn_interval_ms.min < 0.0 {
            return Err(invalid("meteors.spawn_interval_ms", "must not be negative"));
        }
        meteors.flight_ms.validate("meteors.flight_ms")?;
        meteors.start_left_vw.validate("meteors.start_left_vw")?;
        meteors.start_top_vh.validate("meteors.start_top_vh")?;

        if !(self.clouds.pass_ms > 0.0) {
            return Err(invalid("clouds.pass_ms", "must be positive"));
        }

        let waves = &self.waves;
        if !(waves.width > 0.0 && waves.height > 0.0) {
            return Err(invalid("waves", "viewbox must have a positive size"));
        }
        if !(waves.step > 0.0) {
            return Err(invalid("waves.step", "must be positive"));
        }
        if waves.layers.iter().any(|layer| !(layer.wavelength > 0.0)) {
            return Err(invalid("waves.layers.wavelength", "must be positive"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_scene_loads() {
        let config = SceneConfig::builtin().unwrap();
        assert_eq!(config.timing.duration_ms, 15000.0);
        assert_eq!(config.timing.twilight_start, 0.55);
        assert_eq!(config.timing.night_start, 0.78);
        assert_eq!(config.timing.meteor_burst_ms, 6000.0);
        assert_eq!(config.timing.horizon_vh, 45.0);
        assert_eq!(config.stars.count, 160);
        assert_eq!(config.waves.layers.len(), 3);
        assert_eq!(config.palette.night.top, HexColor::new(0x02, 0x08, 0x15));
        assert_eq!(config.sky.horizon_accent, HexColor::new(0xff, 0xb4, 0x5a));
    }

    #[test]
    fn malformed_palette_color_fails_the_load() {
        let source = DEFAULT_SCENE.replace("#73b3ff", "#73b3fz");
        let err = SceneConfig::from_toml_str(&source).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("non-hex digit"));
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let source = DEFAULT_SCENE.replace("duration_ms = 15000.0", "duration_ms = 0.0");
        let err = SceneConfig::from_toml_str(&source).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "timing.duration_ms",
                ..
            }
        ));
    }

    #[test]
    fn empty_spawn_interval_is_rejected() {
        let source = DEFAULT_SCENE.replace(
            "spawn_interval_ms = [240.0, 500.0]",
            "spawn_interval_ms = [500.0, 240.0]",
        );
        let err = SceneConfig::from_toml_str(&source).unwrap_err();
        assert!(err.to_string().contains("meteors.spawn_interval_ms"));
    }

    #[test]
    fn misordered_boundaries_are_tolerated() {
        let source = DEFAULT_SCENE.replace("twilight_start = 0.55", "twilight_start = 0.9");
        assert!(SceneConfig::from_toml_str(&source).is_ok());
    }

    #[test]
    fn interval_maps_unit_fractions() {
        let interval = Interval::new(240.0, 500.0);
        assert_eq!(interval.at(0.0), 240.0);
        assert_eq!(interval.at(0.5), 370.0);
        assert!(interval.contains(240.0));
        assert!(!interval.contains(500.0));
    }
}
