/// Attack-instant, decay-per-tick peak-hold envelope.
///
/// Two decay rates act on the same value: the metering loop folds a new
/// level in with `update` once per display tick, and the independent
/// 250 ms ticker applies a coarser factor through `decay`. The fast
/// micro-decay plus slow macro-decay gives the classic "peak hangs
/// briefly, then drops" VU motion.
#[derive(Debug, Clone, Copy)]
pub struct PeakEnvelope {
    value: f32,
    frame_decay: f32,
}

impl PeakEnvelope {
    pub fn new(frame_decay: f32) -> Self {
        Self {
            value: 0.0,
            frame_decay,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Fold a new normalized level in: a louder reading snaps the peak up
    /// immediately, otherwise the held peak decays by one frame factor.
    pub fn update(&mut self, level: f32) -> f32 {
        self.value = (self.value * self.frame_decay).max(level).clamp(0.0, 1.0);
        self.value
    }

    /// Apply the coarse ticker decay.
    pub fn decay(&mut self, factor: f32) -> f32 {
        self.value = (self.value * factor).clamp(0.0, 1.0);
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn loud_reading_snaps_up_instantly() {
        let mut envelope = PeakEnvelope::new(0.92);
        envelope.update(0.3);
        assert_relative_eq!(envelope.value(), 0.3);
        envelope.update(0.9);
        assert_relative_eq!(envelope.value(), 0.9);
    }

    #[test]
    fn silent_ticks_decay_geometrically() {
        let mut envelope = PeakEnvelope::new(0.92);
        envelope.update(1.0);

        let mut previous = envelope.value();
        for _ in 0..10 {
            let value = envelope.update(0.0);
            assert_relative_eq!(value, previous * 0.92, epsilon = 1e-6);
            assert!(value < previous);
            previous = value;
        }
    }

    #[test]
    fn ticker_decay_is_coarser() {
        let mut envelope = PeakEnvelope::new(0.92);
        envelope.update(1.0);
        assert_relative_eq!(envelope.decay(0.6), 0.6);
        assert_relative_eq!(envelope.decay(0.6), 0.36);
    }

    #[test]
    fn stays_within_unit_range() {
        let mut envelope = PeakEnvelope::new(0.92);
        assert_eq!(envelope.update(3.0), 1.0);
        assert_eq!(envelope.update(-1.0), 0.92);
        envelope.reset();
        assert_eq!(envelope.value(), 0.0);
        assert_eq!(envelope.decay(0.6), 0.0);
    }

    #[test]
    fn decays_to_indistinguishable_from_zero() {
        let mut envelope = PeakEnvelope::new(0.92);
        envelope.update(1.0);
        for _ in 0..1000 {
            envelope.update(0.0);
        }
        assert!(envelope.value() < 1e-6);
    }
}
