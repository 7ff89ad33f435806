//! Color blending for sky transitions.

use duskline_core::{HexColor, SkyBands};

use crate::ease::lerp;

/// Blend two colors channel by channel, rounding to the nearest integer.
///
/// `fraction` is expected in `[0, 1]`; callers ease it through
/// [`smoothstep`](crate::ease::smoothstep), which clamps.
pub fn mix(a: HexColor, b: HexColor, fraction: f64) -> HexColor {
    let channel = |x: u8, y: u8| {
        lerp(f64::from(x), f64::from(y), fraction)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    HexColor::new(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b))
}

/// Blend every band of two sky palettes.
pub fn mix_bands(a: SkyBands, b: SkyBands, fraction: f64) -> SkyBands {
    SkyBands {
        top: mix(a.top, b.top, fraction),
        mid: mix(a.mid, b.mid, fraction),
        low: mix(a.low, b.low, fraction),
    }
}
