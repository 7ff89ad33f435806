//! Sky-phase state machine and the sky gradient.

use std::fmt;

use duskline_config::SceneConfig;
use duskline_core::{HexColor, PaletteStop, SkyBands};

use crate::color::{mix, mix_bands};
use crate::ease::{lerp, smoothstep};

/// Which transition of the day the sky is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkyPhase {
    DayToSunset,
    SunsetToTwilight,
    TwilightToNight,
}

impl SkyPhase {
    /// Select the phase for a cycle position `t`.
    pub fn at(t: f64, twilight_start: f64, night_start: f64) -> Self {
        if t < twilight_start {
            SkyPhase::DayToSunset
        } else if t < night_start {
            SkyPhase::SunsetToTwilight
        } else {
            SkyPhase::TwilightToNight
        }
    }

    /// Palette stops this phase blends from and to.
    pub fn stops(self) -> (PaletteStop, PaletteStop) {
        match self {
            SkyPhase::DayToSunset => (PaletteStop::Day, PaletteStop::Sunset),
            SkyPhase::SunsetToTwilight => (PaletteStop::Sunset, PaletteStop::Twilight),
            SkyPhase::TwilightToNight => (PaletteStop::Twilight, PaletteStop::Night),
        }
    }

    /// Phase range `[start, end)` covered by this state.
    pub fn span(self, twilight_start: f64, night_start: f64) -> (f64, f64) {
        match self {
            SkyPhase::DayToSunset => (0.0, twilight_start),
            SkyPhase::SunsetToTwilight => (twilight_start, night_start),
            SkyPhase::TwilightToNight => (night_start, 1.0),
        }
    }
}

/// Everything the sky needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyState {
    pub phase: SkyPhase,
    /// Eased blend fraction within the phase.
    pub blend: f64,
    pub bands: SkyBands,
    /// Horizon band, pulled toward the accent color while warm.
    pub horizon_warm: HexColor,
    /// Horizon warmth, from the configured maximum down to 0 at night.
    pub warm_band: f64,
}

impl SkyState {
    /// Compute the sky at cycle position `t`.
    pub fn at(t: f64, config: &SceneConfig) -> Self {
        let timing = &config.timing;
        let phase = SkyPhase::at(t, timing.twilight_start, timing.night_start);
        let (start, end) = phase.span(timing.twilight_start, timing.night_start);
        let blend = smoothstep(start, end, t);

        let (from, to) = phase.stops();
        let bands = mix_bands(config.palette.stop(from), config.palette.stop(to), blend);

        let warm_band = match phase {
            SkyPhase::DayToSunset => config.sky.warm_band,
            SkyPhase::SunsetToTwilight => lerp(config.sky.warm_band, 0.0, blend),
            SkyPhase::TwilightToNight => 0.0,
        };
        let horizon_warm = mix(bands.low, config.sky.horizon_accent, warm_band.min(1.0));

        Self {
            phase,
            blend,
            bands,
            horizon_warm,
            warm_band,
        }
    }

    /// The four-stop vertical gradient painted behind everything.
    pub fn gradient(&self) -> LinearGradient {
        LinearGradient {
            angle_deg: 180.0,
            stops: vec![
                GradientStop::new(self.bands.top, None),
                GradientStop::new(self.bands.mid, Some(40.0)),
                GradientStop::new(self.horizon_warm, Some(62.0)),
                GradientStop::new(self.bands.low, Some(82.0)),
            ],
        }
    }
}

/// A color stop, positioned in percent along the gradient line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: HexColor,
    pub position: Option<f64>,
}

impl GradientStop {
    pub fn new(color: HexColor, position: Option<f64>) -> Self {
        Self { color, position }
    }
}

/// A CSS-style linear gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub angle_deg: f64,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Color at `fraction` (0 = start, 1 = end) along the gradient line.
    ///
    /// Unpositioned first and last stops sit at 0% and 100%; other
    /// unpositioned stops are spread evenly between their neighbours.
    pub fn sample(&self, fraction: f64) -> HexColor {
        let positions = self.resolved_positions();
        let Some(first) = self.stops.first() else {
            return HexColor::BLACK;
        };
        let percent = fraction * 100.0;
        if percent <= positions[0] {
            return first.color;
        }
        for i in 1..self.stops.len() {
            let (p0, p1) = (positions[i - 1], positions[i]);
            if percent <= p1 {
                let f = if p1 > p0 { (percent - p0) / (p1 - p0) } else { 1.0 };
                return mix(self.stops[i - 1].color, self.stops[i].color, f);
            }
        }
        self.stops[self.stops.len() - 1].color
    }

    fn resolved_positions(&self) -> Vec<f64> {
        let n = self.stops.len();
        if n == 0 {
            return Vec::new();
        }
        let mut positions: Vec<Option<f64>> = self.stops.iter().map(|s| s.position).collect();
        if positions[0].is_none() {
            positions[0] = Some(0.0);
        }
        if positions[n - 1].is_none() {
            let furthest = positions[..n - 1].iter().flatten().copied().fold(0.0, f64::max);
            positions[n - 1] = Some(furthest.max(100.0));
        }

        // Positions never go backwards.
        let mut last = 0.0_f64;
        for p in positions.iter_mut().flatten() {
            last = last.max(*p);
            *p = last;
        }

        let mut resolved = vec![0.0; n];
        let mut i = 0;
        while i < n {
            if let Some(p) = positions[i] {
                resolved[i] = p;
                i += 1;
                continue;
            }
            let gap_start = i;
            while positions[i].is_none() {
                i += 1;
            }
            let before = resolved[gap_start - 1];
            let after = positions[i].unwrap_or(before);
            let steps = (i - gap_start + 1) as f64;
            for (k, slot) in resolved[gap_start..i].iter_mut().enumerate() {
                *slot = lerp(before, after, (k + 1) as f64 / steps);
            }
        }
        resolved
    }
}

impl fmt::Display for LinearGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "linear-gradient({}deg", self.angle_deg)?;
        for stop in &self.stops {
            write!(f, ", {}", stop.color)?;
            if let Some(position) = stop.position {
                write!(f, " {position}%")?;
            }
        }
        write!(f, ")")
    }
}
