//! Ocean wave silhouettes built from two superposed sines.

use std::fmt;

use duskline_config::{WaveConfig, WaveLayerSpec};

/// A closed wave silhouette inside a `width` x `height` viewbox.
///
/// The sampled crest runs left to right; the shape is closed along the
/// bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePath {
    pub points: Vec<(f64, f64)>,
    pub width: f64,
    pub height: f64,
}

impl WavePath {
    /// Sample one layer with its phase already advanced.
    pub fn generate(layer: &WaveLayerSpec, phase: f64, viewbox: &WaveConfig) -> Self {
        let base = viewbox.height * layer.base_height;
        let samples = (viewbox.width / viewbox.step).floor() as usize;
        let points = (0..=samples)
            .map(|i| {
                let x = i as f64 * viewbox.step;
                let shifted = x + phase;
                // second sine at half the spatial frequency, 40% amplitude
                let y = base
                    + (shifted / layer.wavelength).sin() * layer.amplitude
                    + (shifted * 0.5 / layer.wavelength).sin() * layer.amplitude * 0.4;
                (x, y)
            })
            .collect();
        Self {
            points,
            width: viewbox.width,
            height: viewbox.height,
        }
    }

    /// Crest height at viewbox column `x`, interpolated between samples.
    ///
    /// Columns outside the sampled range clamp to the nearest sample.
    pub fn height_at(&self, x: f64) -> f64 {
        let Some(&(first_x, first_y)) = self.points.first() else {
            return self.height;
        };
        if x <= first_x {
            return first_y;
        }
        for pair in self.points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            if x <= x1 {
                let f = if x1 > x0 { (x - x0) / (x1 - x0) } else { 1.0 };
                return y0 + (y1 - y0) * f;
            }
        }
        self.points[self.points.len() - 1].1
    }
}

impl fmt::Display for WavePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first_y = self.points.first().map_or(self.height, |&(_, y)| y);
        write!(f, "M0,{} L0,{first_y:.2} L", self.height)?;
        for (x, y) in &self.points {
            write!(f, " {x},{y:.2}")?;
        }
        write!(f, " L {},{} Z", self.width, self.height)
    }
}

/// Phase of a layer at `now_ms`; outer layers advance faster.
pub fn layer_phase(now_ms: f64, layer: &WaveLayerSpec) -> f64 {
    now_ms / 1000.0 * layer.speed
}

/// Every configured layer, back to front.
pub fn wave_paths(now_ms: f64, config: &WaveConfig) -> Vec<WavePath> {
    config
        .layers
        .iter()
        .map(|layer| WavePath::generate(layer, layer_phase(now_ms, layer), config))
        .collect()
}
