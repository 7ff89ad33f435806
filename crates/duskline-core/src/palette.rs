//! Named sky palettes.

use serde::{Deserialize, Serialize};

use crate::HexColor;

/// The three horizontal bands of the sky: zenith, middle and horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[HexColor; 3]", into = "[HexColor; 3]")]
pub struct SkyBands {
    pub top: HexColor,
    pub mid: HexColor,
    pub low: HexColor,
}

impl From<[HexColor; 3]> for SkyBands {
    fn from([top, mid, low]: [HexColor; 3]) -> Self {
        Self { top, mid, low }
    }
}

impl From<SkyBands> for [HexColor; 3] {
    fn from(bands: SkyBands) -> Self {
        [bands.top, bands.mid, bands.low]
    }
}

/// One of the four named palette stops of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteStop {
    Day,
    Sunset,
    Twilight,
    Night,
}

/// Sky colors for each stop of the day/night loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub day: SkyBands,
    pub sunset: SkyBands,
    pub twilight: SkyBands,
    pub night: SkyBands,
}

impl Palette {
    /// Bands for the given stop.
    pub fn stop(&self, stop: PaletteStop) -> SkyBands {
        match stop {
            PaletteStop::Day => self.day,
            PaletteStop::Sunset => self.sunset,
            PaletteStop::Twilight => self.twilight,
            PaletteStop::Night => self.night,
        }
    }
}
