use std::ops::ControlFlow;

use duskline_config::SceneConfig;
use duskline_core::HexColor;
use duskline_scene::surface::SurfaceCall;
use duskline_scene::{
    CloudCommand, ElementId, FrameHost, RecordingSurface, ScriptedRandom, SkyAnimator, SkyPhase,
    SkyState, StopHandle, Surface,
};

fn config() -> SceneConfig {
    SceneConfig::builtin().unwrap()
}

fn animator() -> SkyAnimator<ScriptedRandom> {
    SkyAnimator::new(config(), ScriptedRandom::new([0.1, 0.4, 0.7, 0.9]))
}

/// Replays a list of timestamps onto a recording surface.
struct ScriptedHost {
    frames: Vec<f64>,
    cursor: usize,
    surface: RecordingSurface,
    attached: bool,
    stop_after: Option<(usize, StopHandle)>,
}

impl ScriptedHost {
    fn new(frames: Vec<f64>) -> Self {
        Self {
            frames,
            cursor: 0,
            surface: RecordingSurface::default(),
            attached: true,
            stop_after: None,
        }
    }
}

impl FrameHost for ScriptedHost {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some((limit, handle)) = &self.stop_after {
            if self.cursor >= *limit {
                handle.stop();
            }
        }
        let now = self.frames.get(self.cursor).copied();
        self.cursor += 1;
        now
    }

    fn surface(&mut self) -> Option<&mut dyn Surface> {
        if self.attached {
            Some(&mut self.surface)
        } else {
            None
        }
    }
}

#[test]
fn sky_hits_each_palette_at_its_boundary() {
    let config = config();
    assert_eq!(SkyState::at(0.0, &config).bands, config.palette.day);
    assert_eq!(SkyState::at(0.55, &config).bands, config.palette.sunset);
    assert_eq!(SkyState::at(0.78, &config).bands, config.palette.twilight);
    assert_eq!(SkyState::at(0.55, &config).phase, SkyPhase::SunsetToTwilight);
    assert_eq!(SkyState::at(0.78, &config).phase, SkyPhase::TwilightToNight);

    // the end of each phase lands on the next palette
    let close = |a: HexColor, b: HexColor| {
        a.r.abs_diff(b.r) <= 1 && a.g.abs_diff(b.g) <= 1 && a.b.abs_diff(b.b) <= 1
    };
    let late_day = SkyState::at(0.5499, &config);
    assert_eq!(late_day.phase, SkyPhase::DayToSunset);
    assert!(close(late_day.bands.top, config.palette.sunset.top));
    assert!(close(late_day.bands.low, config.palette.sunset.low));
    let late_sunset = SkyState::at(0.7799, &config);
    assert_eq!(late_sunset.phase, SkyPhase::SunsetToTwilight);
    assert!(close(late_sunset.bands.top, config.palette.twilight.top));
    assert!(close(late_sunset.bands.mid, config.palette.twilight.mid));

    let dusk = SkyState::at(0.9999, &config);
    let night = config.palette.night;
    assert!(dusk.bands.top.r.abs_diff(night.top.r) <= 1);
    assert!(dusk.bands.low.b.abs_diff(night.low.b) <= 1);
}

#[test]
fn warm_band_fades_across_sunset() {
    let config = config();
    let mid = SkyState::at((0.55 + 0.78) / 2.0, &config);
    assert!((mid.warm_band - 0.45).abs() < 1e-6);
    let early = SkyState::at(0.6, &config).warm_band;
    let late = SkyState::at(0.75, &config).warm_band;
    assert!(early > late);
}

#[test]
fn first_frame_is_full_day() {
    let mut animator = animator();
    let mut surface = RecordingSurface::default();
    let ControlFlow::Continue(report) = animator.frame(0.0, Some(&mut surface)) else {
        panic!("animator stopped");
    };

    let frame = &report.frame;
    assert_eq!(frame.position.t, 0.0);
    assert_eq!(frame.position.cycle, 0);
    assert_eq!(frame.sun.top_vh, -12.0);
    assert!(frame.sun.visible);
    assert_eq!(frame.reflection_opacity, 0.95);
    assert!(frame.star_opacities.iter().all(|o| *o == 0.0));
    assert_eq!(frame.waves.len(), 3);
    assert_eq!(report.clouds, CloudCommand::Reset);
    assert_eq!(report.meteor, None);
    assert!(!report.burst_active);

    assert!(surface.calls.contains(&SurfaceCall::Background(
        ElementId::Sky,
        frame.sky.gradient().to_string()
    )));
    assert!(surface.calls.contains(&SurfaceCall::Path(
        ElementId::Wave(2),
        frame.waves[2].to_string()
    )));
}

#[test]
fn night_frame_bursts_and_dims_the_reflection() {
    let mut animator = animator();
    let ControlFlow::Continue(report) = animator.frame(12000.0, None) else {
        panic!("animator stopped");
    };

    let frame = &report.frame;
    assert!((frame.position.t - 0.8).abs() < 1e-12);
    assert_eq!(frame.sky.phase, SkyPhase::TwilightToNight);
    assert!(!frame.sun.visible);
    assert_eq!(frame.reflection_opacity, 0.06);
    assert!(frame.star_opacities.iter().all(|o| *o <= 0.6 + 1e-9));
    assert!(frame.star_opacities.iter().any(|o| *o > 0.0));
    assert!(report.burst_active);
    assert!(report.meteor.is_some());
    assert_eq!(report.clouds, CloudCommand::Start);
}

#[test]
fn clouds_start_once_per_cycle() {
    let mut animator = animator();
    let mut starts = 0;
    let mut now = 0.0;
    while now < 30000.0 {
        let ControlFlow::Continue(report) = animator.frame(now, None) else {
            panic!("animator stopped");
        };
        if report.clouds == CloudCommand::Start {
            starts += 1;
        }
        now += 16.0;
    }
    assert_eq!(starts, 2);
    assert_eq!(animator.clouds().last_cycle(), Some(1));
}

#[test]
fn meteors_only_fall_inside_the_burst_window() {
    let mut animator = animator();
    let mut spawns = Vec::new();
    let mut now = 0.0;
    while now < 15000.0 {
        if let ControlFlow::Continue(report) = animator.frame(now, None) {
            spawns.extend(report.meteor);
        }
        now += 16.0;
    }
    assert!(!spawns.is_empty());
    assert!(spawns.iter().all(|s| (11700.0..15000.0).contains(&s.spawned_at)));
    for pair in spawns.windows(2) {
        assert!(pair[1].spawned_at - pair[0].spawned_at >= 240.0);
    }
}

#[test]
fn finished_meteors_are_removed_on_the_next_frame() {
    let mut animator = animator();
    let mut surface = RecordingSurface::default();
    animator.frame(11700.0, Some(&mut surface));
    assert_eq!(animator.lifecycle().in_flight(), 1);

    surface.finish(ElementId::Meteor(0));
    surface.clear();
    animator.frame(11716.0, Some(&mut surface));
    assert_eq!(animator.lifecycle().in_flight(), 0);
    assert!(surface.calls.contains(&SurfaceCall::Remove(ElementId::Meteor(0))));
}

#[test]
fn run_renders_until_the_host_runs_dry() {
    let mut animator = animator();
    let mut host = ScriptedHost::new(vec![0.0, 16.0, 32.0, 48.0]);
    assert_eq!(animator.run(&mut host), 4);
    assert!(host.surface.calls.contains(&SurfaceCall::Create(ElementId::Star(0))));
}

#[test]
fn stop_handle_ends_the_loop() {
    let mut animator = animator();
    let mut host = ScriptedHost::new((0..100).map(|i| i as f64 * 16.0).collect());
    host.stop_after = Some((3, animator.stop_handle()));
    assert_eq!(animator.run(&mut host), 3);

    let calls = host.surface.calls.len();
    assert!(animator.frame(1000.0, Some(&mut host.surface)).is_break());
    assert_eq!(host.surface.calls.len(), calls);
}

#[test]
fn detached_surface_is_skipped() {
    let mut animator = animator();
    let mut host = ScriptedHost::new(vec![12000.0, 12016.0]);
    host.attached = false;
    assert_eq!(animator.run(&mut host), 2);
    assert!(host.surface.calls.is_empty());
    assert!(animator.meteors().is_active());
}
