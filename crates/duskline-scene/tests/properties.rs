use duskline_config::SceneConfig;
use duskline_core::HexColor;
use duskline_scene::ease::smoothstep;
use duskline_scene::{CyclePosition, MeteorScheduler, SkyState, Starfield, mix};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn color() -> impl Strategy<Value = HexColor> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| HexColor::new(r, g, b))
}

proptest! {
    #[test]
    fn phase_stays_in_the_unit_interval(now in -1.0e12f64..1.0e12, duration in 1.0f64..1.0e6) {
        let position = CyclePosition::at(now, duration);
        prop_assert!((0.0..1.0).contains(&position.t));
    }

    #[test]
    fn cycle_index_never_goes_backwards(a in -1.0e9f64..1.0e9, b in -1.0e9f64..1.0e9) {
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let duration = 15000.0;
        let first = CyclePosition::at(early, duration);
        let second = CyclePosition::at(late, duration);
        prop_assert!(first.cycle <= second.cycle);
    }

    #[test]
    fn mix_endpoints_are_exact(a in color(), b in color()) {
        prop_assert_eq!(mix(a, b, 0.0), a);
        prop_assert_eq!(mix(a, b, 1.0), b);
        prop_assert_eq!(mix(a, a, 0.37), a);
    }

    #[test]
    fn mix_stays_between_its_inputs(a in color(), b in color(), f in 0.0f64..=1.0) {
        let mixed = mix(a, b, f);
        for (m, x, y) in [(mixed.r, a.r, b.r), (mixed.g, a.g, b.g), (mixed.b, a.b, b.b)] {
            prop_assert!(m >= x.min(y) && m <= x.max(y));
        }
    }

    #[test]
    fn smoothstep_is_monotone(x in -1.0f64..2.0, dx in 0.0f64..1.0) {
        let lo = smoothstep(0.2, 0.8, x);
        let hi = smoothstep(0.2, 0.8, x + dx);
        prop_assert!(lo <= hi);
        prop_assert!((0.0..=1.0).contains(&lo));
    }

    #[test]
    fn sky_blend_is_bounded(t in 0.0f64..1.0) {
        let config = SceneConfig::builtin().unwrap();
        let sky = SkyState::at(t, &config);
        prop_assert!((0.0..=1.0).contains(&sky.blend));
        prop_assert!((0.0..=config.sky.warm_band).contains(&sky.warm_band));
    }

    #[test]
    fn star_opacity_is_bounded(seed in any::<u64>(), now in 0.0f64..1.0e8) {
        let config = SceneConfig::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let starfield = Starfield::new(&config.stars, &mut rng);
        let position = CyclePosition::at(now, config.timing.duration_ms);
        for opacity in starfield.opacities(position.t, now, &config) {
            prop_assert!((0.0..=1.0).contains(&opacity));
        }
    }

    #[test]
    fn spawn_interval_stays_in_range(seed in any::<u64>(), cycle in 0i64..1000) {
        let config = SceneConfig::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scheduler = MeteorScheduler::new();
        let start = cycle as f64 * config.timing.duration_ms + 11700.0;
        let mut now = start;
        while now < start + config.timing.meteor_burst_ms {
            if let Some(spawn) = scheduler.update(now, &config, &mut rng) {
                let gap = scheduler.state().next_spawn_at - spawn.spawned_at;
                prop_assert!(config.meteors.spawn_interval_ms.contains(gap));
                prop_assert!(config.meteors.flight_ms.contains(spawn.flight_ms));
                prop_assert!(config.meteors.start_left_vw.contains(spawn.left_vw));
                prop_assert!(config.meteors.start_top_vh.contains(spawn.top_vh));
            }
            now += 16.0;
        }
    }
}
