//! The per-frame animation driver.
//!
//! [`SkyAnimator::frame`] turns one timestamp into every visual parameter
//! of the scene and writes them to the surface. Only three pieces of state
//! survive between frames: the star pool, the meteor scheduler and the
//! cloud trigger.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use duskline_config::SceneConfig;
use duskline_core::{Axis, Length};

use crate::clock::CyclePosition;
use crate::clouds::{CloudCommand, CloudTrigger, cloud_pass_motion};
use crate::lifecycle::MeteorLifecycle;
use crate::meteors::{MeteorScheduler, MeteorSpawn};
use crate::random::RandomSource;
use crate::sky::SkyState;
use crate::stars::Starfield;
use crate::sun::SunState;
use crate::surface::{ElementId, Surface};
use crate::waves::{WavePath, wave_paths};

/// Shared flag that stops the frame loop from scheduling further frames.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Where frames come from and where they go.
pub trait FrameHost {
    /// Wait until the next frame is due and return its timestamp in
    /// milliseconds, or `None` once the host is shutting down.
    fn next_frame(&mut self) -> Option<f64>;

    /// The surface to draw on, if one is available right now.
    fn surface(&mut self) -> Option<&mut dyn Surface>;
}

/// The time-derived part of a frame: a pure function of the timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub now_ms: f64,
    pub position: CyclePosition,
    pub sky: SkyState,
    pub sun: SunState,
    pub reflection_opacity: f64,
    pub star_opacities: Vec<f64>,
    pub waves: Vec<WavePath>,
}

impl SceneFrame {
    /// Compute every stateless visual parameter at `now_ms`.
    pub fn compute(now_ms: f64, config: &SceneConfig, starfield: &Starfield) -> Self {
        let position = CyclePosition::at(now_ms, config.timing.duration_ms);
        let sky = SkyState::at(position.t, config);
        let sun = SunState::at(position.t, config);
        let reflection_opacity = sun.reflection_opacity(sky.warm_band, config);
        Self {
            now_ms,
            position,
            sky,
            sun,
            reflection_opacity,
            star_opacities: starfield.opacities(position.t, now_ms, config),
            waves: wave_paths(now_ms, &config.waves),
        }
    }
}

/// Everything decided on one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: SceneFrame,
    pub clouds: CloudCommand,
    pub meteor: Option<MeteorSpawn>,
    pub burst_active: bool,
}

/// Drives the whole scene, one frame at a time.
#[derive(Debug)]
pub struct SkyAnimator<R> {
    config: SceneConfig,
    starfield: Starfield,
    meteors: MeteorScheduler,
    clouds: CloudTrigger,
    lifecycle: MeteorLifecycle,
    rng: R,
    stop: StopHandle,
    stars_mounted: bool,
}

impl<R: RandomSource> SkyAnimator<R> {
    /// Create an animator, scattering the star pool from `rng`.
    pub fn new(config: SceneConfig, mut rng: R) -> Self {
        let starfield = Starfield::new(&config.stars, &mut rng);
        Self {
            config,
            starfield,
            meteors: MeteorScheduler::new(),
            clouds: CloudTrigger::new(),
            lifecycle: MeteorLifecycle::new(),
            rng,
            stop: StopHandle::default(),
            stars_mounted: false,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn meteors(&self) -> &MeteorScheduler {
        &self.meteors
    }

    pub fn clouds(&self) -> &CloudTrigger {
        &self.clouds
    }

    pub fn lifecycle(&self) -> &MeteorLifecycle {
        &self.lifecycle
    }

    /// A handle that stops [`run`](Self::run) and makes further frames no-ops.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Render one frame at `now_ms`.
    ///
    /// Without a surface the frame is still computed and the scheduler and
    /// cloud trigger still advance; only the writes are skipped.
    pub fn frame(
        &mut self,
        now_ms: f64,
        surface: Option<&mut dyn Surface>,
    ) -> ControlFlow<(), FrameReport> {
        if self.stop.is_stopped() {
            return ControlFlow::Break(());
        }

        let frame = SceneFrame::compute(now_ms, &self.config, &self.starfield);
        let clouds = self.clouds.update(frame.position, &self.config.timing);
        let meteor = self.meteors.update(now_ms, &self.config, &mut self.rng);

        match surface {
            Some(surface) => self.apply(surface, &frame, clouds, meteor.as_ref()),
            None if meteor.is_some() => log::warn!("no surface, meteor at {now_ms:.0}ms dropped"),
            None => {}
        }

        ControlFlow::Continue(FrameReport {
            frame,
            clouds,
            meteor,
            burst_active: self.meteors.is_active(),
        })
    }

    /// Pull frames from `host` until it shuts down or the animator is
    /// stopped. Returns the number of frames rendered.
    pub fn run<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let mut frames = 0;
        while !self.stop.is_stopped() {
            let Some(now_ms) = host.next_frame() else {
                break;
            };
            if self.frame(now_ms, host.surface()).is_break() {
                break;
            }
            frames += 1;
        }
        frames
    }

    fn apply(
        &mut self,
        surface: &mut dyn Surface,
        frame: &SceneFrame,
        clouds: CloudCommand,
        meteor: Option<&MeteorSpawn>,
    ) {
        if !self.stars_mounted {
            self.mount_stars(surface);
        }
        self.lifecycle.reap(surface);

        surface.set_offset(ElementId::Sun, Axis::Top, Length::Vh(frame.sun.top_vh));
        surface.set_background(ElementId::Sky, &frame.sky.gradient());
        surface.set_opacity(ElementId::Reflection, frame.reflection_opacity);

        for (i, opacity) in frame.star_opacities.iter().enumerate() {
            surface.set_opacity(ElementId::Star(i), *opacity);
        }

        let cloud_config = &self.config.clouds;
        match clouds {
            CloudCommand::Start => {
                surface.start_animation(ElementId::Clouds, &cloud_pass_motion(cloud_config));
                surface.set_opacity(ElementId::Clouds, cloud_config.opacity);
            }
            CloudCommand::Reset => {
                surface.stop_animation(ElementId::Clouds);
                surface.set_offset(
                    ElementId::Clouds,
                    Axis::Left,
                    Length::Percent(cloud_config.reset_left_percent),
                );
                surface.set_opacity(ElementId::Clouds, 0.0);
            }
            CloudCommand::Hold => {}
        }

        if let Some(spawn) = meteor {
            self.lifecycle.launch(surface, spawn, &self.config.meteors);
        }

        for (i, path) in frame.waves.iter().enumerate() {
            surface.set_path(ElementId::Wave(i), path);
        }
    }

    fn mount_stars(&mut self, surface: &mut dyn Surface) {
        for (i, star) in self.starfield.stars().iter().enumerate() {
            let id = ElementId::Star(i);
            surface.create(id);
            surface.set_offset(id, Axis::Left, Length::Percent(star.left_percent));
            surface.set_offset(id, Axis::Top, Length::Vh(star.top_vh));
        }
        self.stars_mounted = true;
        log::debug!("mounted {} stars", self.starfield.len());
    }
}
