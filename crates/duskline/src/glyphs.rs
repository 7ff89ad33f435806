//! Character constants for the terminal scene.

/// Star glyphs from faint to bright.
pub const STAR_GLYPHS: &[char] = &['·', '.', '+', '*', '✦', '✧'];

/// Meteor head followed by its trail, brightest first.
pub const METEOR_GLYPHS: &[char] = &['✶', '╲', '╲', '·'];

/// Cloud fill from thin edge to dense core.
pub const CLOUD_GLYPHS: &[char] = &['░', '▒', '▓'];

/// Glints used for the sun's reflection on the water.
pub const GLINT_GLYPHS: &[char] = &['─', '━', '═', '~'];

/// Full block used for the sun disc and solid fills.
pub const SOLID: char = '█';

/// Pick a glyph from `set` by a brightness in `[0, 1]`.
pub fn by_level(set: &[char], level: f64) -> char {
    let Some(&last) = set.last() else {
        return ' ';
    };
    let index = (level.clamp(0.0, 1.0) * (set.len() - 1) as f64).round() as usize;
    set.get(index).copied().unwrap_or(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_pick_from_both_ends() {
        assert_eq!(by_level(STAR_GLYPHS, 0.0), '·');
        assert_eq!(by_level(STAR_GLYPHS, 1.0), '✧');
        assert_eq!(by_level(CLOUD_GLYPHS, 0.5), '▒');
        assert_eq!(by_level(&[], 0.5), ' ');
    }
}
