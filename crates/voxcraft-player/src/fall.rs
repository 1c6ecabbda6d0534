//! Hard-landing detection.

/// One-shot edge detector that turns a fall into a single damage event.
///
/// The detector arms when the vertical velocity drops below
/// `fall_threshold` and remembers the fastest downward speed seen while
/// armed. It fires once, and disarms, when the velocity rises back above
/// `landing_threshold`. Samples between the two thresholds keep it armed, so
/// a bounce that never clears `landing_threshold` cannot fire twice.
#[derive(Debug, Clone, PartialEq)]
pub struct FallDamageDetector {
    fall_threshold: f32,
    landing_threshold: f32,
    divisor: f32,
    /// Peak downward velocity (negative) while armed.
    peak: Option<f32>,
}

impl Default for FallDamageDetector {
    fn default() -> Self {
        Self::new(-10.0, -3.0, 5.0)
    }
}

impl FallDamageDetector {
    /// Create a detector.
    ///
    /// `fall_threshold` must be below `landing_threshold`; `divisor` must be
    /// positive.
    #[must_use]
    pub fn new(fall_threshold: f32, landing_threshold: f32, divisor: f32) -> Self {
        debug_assert!(fall_threshold < landing_threshold);
        debug_assert!(divisor > 0.0);
        Self {
            fall_threshold,
            landing_threshold,
            divisor,
            peak: None,
        }
    }

    /// Returns `true` while a hard fall is in progress.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.peak.is_some()
    }

    /// Feed one vertical velocity sample. Returns the damage to apply when a
    /// landing completes a hard fall.
    pub fn observe(&mut self, vy: f32) -> Option<u32> {
        if !vy.is_finite() {
            return None;
        }
        if vy < self.fall_threshold {
            self.peak = Some(self.peak.map_or(vy, |peak| peak.min(vy)));
            return None;
        }
        if vy <= self.landing_threshold {
            return None;
        }
        let peak = self.peak.take()?;
        let damage = (peak.abs() / self.divisor).floor() as u32;
        (damage > 0).then_some(damage)
    }

    /// Forget any fall in progress.
    pub fn reset(&mut self) {
        self.peak = None;
    }
}
