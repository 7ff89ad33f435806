//! Mapping absolute timestamps onto the repeating day/night cycle.

/// Where a timestamp falls within the repeating cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePosition {
    /// Phase within the cycle, always in `[0, 1)`.
    pub t: f64,
    /// Index of the cycle, `floor(now / duration)`.
    pub cycle: i64,
}

impl CyclePosition {
    /// Map a millisecond timestamp onto a cycle of `duration_ms`.
    ///
    /// Stateless modulo arithmetic: any gap between calls is harmless.
    pub fn at(now_ms: f64, duration_ms: f64) -> Self {
        let offset = now_ms.rem_euclid(duration_ms);
        let mut cycle = ((now_ms - offset) / duration_ms).round() as i64;
        let mut t = offset / duration_ms;
        // rem_euclid may round up to exactly `duration_ms` for tiny negatives
        if t >= 1.0 {
            t = 0.0;
            cycle += 1;
        }
        Self { t, cycle }
    }

    /// Timestamp at which the given cycle starts.
    pub fn cycle_start_ms(cycle: i64, duration_ms: f64) -> f64 {
        cycle as f64 * duration_ms
    }
}
