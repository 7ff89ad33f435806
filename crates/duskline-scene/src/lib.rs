//! Frame-driven engine for the duskline sky and ocean animation.
//!
//! Given a timestamp, the engine maps it onto the day/night cycle and
//! derives the sky gradient, sun position, star twinkle, wave silhouettes,
//! meteor bursts and the nightly cloud pass. Drawing is delegated to a
//! [`Surface`], so the same engine can feed a terminal, a recorder in
//! tests, or nothing at all.

mod clock;
mod clouds;
mod color;
mod driver;
pub mod ease;
mod lifecycle;
mod meteors;
mod motion;
mod random;
mod sky;
mod stars;
mod sun;
pub mod surface;
mod waves;

pub use clock::CyclePosition;
pub use clouds::{CloudCommand, CloudTrigger, cloud_pass_motion};
pub use color::{mix, mix_bands};
pub use driver::{FrameHost, FrameReport, SceneFrame, SkyAnimator, StopHandle};
pub use lifecycle::MeteorLifecycle;
pub use meteors::{BurstState, BurstWindow, MeteorScheduler, MeteorSpawn};
pub use motion::{Easing, Keyframe, Motion};
pub use random::{RandomSource, ScriptedRandom};
pub use sky::{GradientStop, LinearGradient, SkyPhase, SkyState};
pub use stars::{Star, Starfield};
pub use sun::SunState;
pub use surface::{ElementId, NullSurface, RecordingSurface, Surface, SurfaceCall};
pub use waves::{WavePath, wave_paths};
