//! Core value types for the duskline sky animation.
//!
//! Colors, palettes and viewport units shared by the configuration,
//! the animation engine and the terminal presenter.

mod color;
mod palette;
mod units;

pub use color::{ColorError, HexColor};
pub use palette::{Palette, PaletteStop, SkyBands};
pub use units::{Axis, Length};
