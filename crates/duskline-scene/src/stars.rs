//! Twinkling starfield (fixed pool, stateless per frame).

use duskline_config::{SceneConfig, StarConfig};

use crate::random::RandomSource;

/// A star placed once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Horizontal offset, percent of the viewport width.
    pub left_percent: f64,
    /// Vertical offset in vh.
    pub top_vh: f64,
    /// Twinkle frequency; also serves as the twinkle phase offset.
    pub frequency: f64,
}

/// The fixed pool of stars.
#[derive(Debug, Clone, PartialEq)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Scatter `config.count` stars over the upper sky.
    pub fn new<R: RandomSource + ?Sized>(config: &StarConfig, rng: &mut R) -> Self {
        let stars = (0..config.count)
            .map(|_| {
                let left_percent = rng.next_unit() * 100.0;
                let top_vh = rng.next_unit() * config.max_top_vh;
                // two decimals, so frequencies read back like configured ones
                let frequency = (config.frequency.at(rng.next_unit()) * 100.0).round() / 100.0;
                Star {
                    left_percent,
                    top_vh,
                    frequency,
                }
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Opacity of every star at cycle position `t` and time `now_ms`.
    pub fn opacities(&self, t: f64, now_ms: f64, config: &SceneConfig) -> Vec<f64> {
        let ramp = visibility_ramp(t, config).min(1.0);
        let now_s = now_ms / 1000.0;
        self.stars
            .iter()
            .map(|star| ramp * twinkle(now_s, star.frequency))
            .collect()
    }
}

/// Global star visibility, rising from zero shortly before night.
///
/// Unclamped above; callers cap it at 1.
pub fn visibility_ramp(t: f64, config: &SceneConfig) -> f64 {
    let stars = &config.stars;
    ((t - (config.timing.night_start - stars.ramp_lead)) * stars.ramp_rate).max(0.0)
}

/// Per-star brightness oscillation in `[0.2, 1.0]`.
pub fn twinkle(now_s: f64, frequency: f64) -> f64 {
    0.6 + (now_s * frequency + frequency).sin() * 0.4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn config() -> SceneConfig {
        SceneConfig::builtin().unwrap()
    }

    #[test]
    fn pool_has_configured_size_and_bounds() {
        let config = config();
        let mut rng = ScriptedRandom::new([0.0, 0.5, 0.999, 0.25, 0.75]);
        let field = Starfield::new(&config.stars, &mut rng);
        assert_eq!(field.len(), 160);
        for star in field.stars() {
            assert!((0.0..100.0).contains(&star.left_percent));
            assert!((0.0..45.0).contains(&star.top_vh));
            assert!((0.5..=2.0).contains(&star.frequency));
        }
    }

    #[test]
    fn frequency_is_rounded_to_hundredths() {
        let config = config();
        let mut rng = ScriptedRandom::new([0.1, 0.2, 0.3337]);
        let field = Starfield::new(&config.stars, &mut rng);
        // 0.5 + 0.3337 * 1.5 = 1.00055
        assert_eq!(field.stars()[0].frequency, 1.0);
    }

    #[test]
    fn stars_are_invisible_during_the_day() {
        let config = config();
        assert_eq!(visibility_ramp(0.0, &config), 0.0);
        assert_eq!(visibility_ramp(0.69, &config), 0.0);
        assert!(visibility_ramp(0.75, &config) > 0.0);
        assert!(visibility_ramp(0.99, &config) > 1.0);
    }

    #[test]
    fn opacity_is_ramp_times_twinkle() {
        let config = config();
        let field = Starfield {
            stars: vec![Star {
                left_percent: 10.0,
                top_vh: 10.0,
                frequency: 1.5,
            }],
        };
        let opacities = field.opacities(0.95, 2000.0, &config);
        assert!((opacities[0] - twinkle(2.0, 1.5)).abs() < 1e-12);
        assert!(field.opacities(0.1, 2000.0, &config)[0] == 0.0);
    }

    #[test]
    fn twinkle_stays_in_band() {
        for i in 0..500 {
            let value = twinkle(i as f64 * 0.37, 0.5 + (i % 16) as f64 * 0.1);
            assert!((0.2..=1.0).contains(&value));
        }
    }
}
